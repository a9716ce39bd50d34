use super::{is_low, ResultSequence};

/// Counts maximal runs of low outcomes whose length is greater than `cutoff`.
///
/// A run that is still open when the sequence ends is evaluated as well.
pub fn count_long_streaks(numbers: &ResultSequence, cutoff: usize) -> usize {
    let mut streak_count = 0;
    let mut current_streak = 0usize;

    for &value in numbers.iter() {
        if is_low(value) {
            current_streak += 1;
        } else {
            if current_streak > cutoff {
                streak_count += 1;
            }
            current_streak = 0;
        }
    }

    if current_streak > cutoff {
        streak_count += 1;
    }

    streak_count
}
