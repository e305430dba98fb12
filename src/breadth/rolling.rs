//! Trailing moving averages over sparse price columns.

/// Trailing simple moving average of `prices` over `window` rows.
///
/// The average at row `i` covers rows `i + 1 - window ..= i` and is defined
/// only when every one of those rows has a price. A missing row, whether a
/// day without trade, a listing that has not started yet or one that has
/// ended, leaves the average undefined for the next `window` rows.
pub fn trailing_sma(prices: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; prices.len()];
    }

    (0..prices.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            prices[i + 1 - window..=i]
                .iter()
                .try_fold(0.0, |sum, price| price.map(|p| sum + p))
                .map(|sum| sum / window as f64)
        })
        .collect()
}
