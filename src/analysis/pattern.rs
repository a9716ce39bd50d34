use super::{is_low, ResultSequence, LOW_THRESHOLD};

/// Counts "two lows then a high" triples.
///
/// The closing value must be strictly above the threshold, so an outcome of
/// exactly 2.0 neither counts as low nor closes a win.
pub fn count_wins(numbers: &ResultSequence) -> usize {
    if numbers.len() < 3 {
        return 0;
    }

    numbers
        .windows(3)
        .into_iter()
        .filter(|w| is_low(w[0]) && is_low(w[1]) && w[2] > LOW_THRESHOLD)
        .count()
}
