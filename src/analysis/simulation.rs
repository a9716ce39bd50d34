use super::{is_low, ResultSequence};
use crate::models::Settings;
use tracing::{debug, warn};

/// Strategy knobs for the capped martingale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub starting_balance: f64,
    pub base_bet: f64,
    pub max_doubling: u32,
    pub auto_cashout: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            starting_balance: 20000.0,
            base_bet: 200.0,
            max_doubling: 5,
            auto_cashout: 2.0,
        }
    }
}

impl From<&Settings> for SimulationParams {
    fn from(settings: &Settings) -> Self {
        Self {
            starting_balance: settings.starting_balance,
            base_bet: settings.base_bet,
            max_doubling: settings.max_doubling,
            auto_cashout: settings.auto_cashout,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    Running,
    /// Stopped at this 1-based round because the balance could not cover the bet.
    Terminated { round: usize },
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetAction {
    Win,
    Loss,
}

/// One placed bet, as seen right after it settled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetRecord {
    pub round: usize,
    pub outcome: f64,
    pub stake: f64,
    pub payout: f64,
    pub balance: f64,
    pub max_balance: f64,
    pub action: BetAction,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Trigger did not hold; nothing changed.
    Skipped,
    Bet(BetRecord),
    /// Not enough money for the current bet. No further rounds are processed.
    Terminated,
    /// The state already left `Running`.
    Halted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    params: SimulationParams,
    pub balance: f64,
    pub current_bet: f64,
    pub consecutive_losses: u32,
    pub max_balance: f64,
    pub total_bets: u32,
    pub winning_bets: u32,
    pub status: SimulationStatus,
}

impl SimulationState {
    pub fn new(params: SimulationParams) -> Self {
        Self {
            params,
            balance: params.starting_balance,
            current_bet: params.base_bet,
            consecutive_losses: 0,
            max_balance: params.starting_balance,
            total_bets: 0,
            winning_bets: 0,
            status: SimulationStatus::Running,
        }
    }

    /// Advances the state by one round.
    ///
    /// `window` holds the two preceding outcomes followed by the current one and
    /// `round` is the 1-based position of the current outcome.
    pub fn step(&mut self, round: usize, window: [f64; 3]) -> Step {
        if self.status != SimulationStatus::Running {
            return Step::Halted;
        }

        let [before_last, last, current] = window;
        if !(is_low(last) && is_low(before_last)) {
            return Step::Skipped;
        }

        if self.balance < self.current_bet {
            warn!(
                round,
                balance = self.balance,
                bet = self.current_bet,
                "Not enough money to bet. Game over."
            );
            self.status = SimulationStatus::Terminated { round };
            return Step::Terminated;
        }

        let stake = self.current_bet;
        self.balance -= stake;
        self.total_bets += 1;

        let (payout, action) = if current >= self.params.auto_cashout {
            let payout = stake * self.params.auto_cashout;
            self.balance += payout;
            self.winning_bets += 1;
            self.consecutive_losses = 0;
            self.current_bet = self.params.base_bet;
            (payout, BetAction::Win)
        } else {
            self.consecutive_losses += 1;
            if self.consecutive_losses <= self.params.max_doubling {
                self.current_bet *= 2.0;
            } else {
                self.current_bet = self.params.base_bet;
            }
            (0.0, BetAction::Loss)
        };
        self.max_balance = self.max_balance.max(self.balance);

        Step::Bet(BetRecord {
            round,
            outcome: current,
            stake,
            payout,
            balance: self.balance,
            max_balance: self.max_balance,
            action,
        })
    }

    pub fn finish(mut self) -> SimulationOutcome {
        if self.status == SimulationStatus::Running {
            self.status = SimulationStatus::Completed;
        }

        SimulationOutcome {
            params: self.params,
            final_balance: self.balance,
            max_balance: self.max_balance,
            total_bets: self.total_bets,
            winning_bets: self.winning_bets,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOutcome {
    pub params: SimulationParams,
    pub final_balance: f64,
    pub max_balance: f64,
    pub total_bets: u32,
    pub winning_bets: u32,
    pub status: SimulationStatus,
}

impl SimulationOutcome {
    pub fn profit(&self) -> f64 {
        self.final_balance - self.params.starting_balance
    }
}

pub fn simulate(numbers: &ResultSequence, params: &SimulationParams) -> SimulationOutcome {
    simulate_with(numbers, params, |_| {})
}

/// Replays the sequence, handing every settled bet to `on_bet`.
pub fn simulate_with<F>(
    numbers: &ResultSequence,
    params: &SimulationParams,
    mut on_bet: F,
) -> SimulationOutcome
where
    F: FnMut(&BetRecord),
{
    let mut state = SimulationState::new(*params);

    for i in 2..numbers.len() {
        match state.step(i + 1, [numbers[i - 2], numbers[i - 1], numbers[i]]) {
            Step::Bet(record) => on_bet(&record),
            Step::Terminated | Step::Halted => break,
            Step::Skipped => {}
        }
    }

    let outcome = state.finish();
    debug!(
        final_balance = outcome.final_balance,
        total_bets = outcome.total_bets,
        winning_bets = outcome.winning_bets,
        "simulation finished"
    );
    outcome
}
