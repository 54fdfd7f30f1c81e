/// Number of past draws kept in the visible history.
pub const HISTORY_LIMIT: usize = 10;

/// Visible history window plus lifetime counters.
///
/// `total_count` and `sum_values` cover every draw ever recorded and are not
/// bounded by the window, so the average keeps counting evicted draws. The sum
/// is kept in `i128` so any run of `i64` draws adds up exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLedger {
    history: Vec<i64>,
    total_count: u64,
    sum_values: i128,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from stored parts, trimming an oversized history.
    pub fn restore(mut history: Vec<i64>, total_count: u64, sum_values: i128) -> Self {
        history.truncate(HISTORY_LIMIT);
        Self { history, total_count, sum_values }
    }

    // Getters
    /// Most recent first.
    pub fn history(&self) -> &[i64] {
        &self.history
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn sum_values(&self) -> i128 {
        self.sum_values
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    //  --- Public mutators ---
    pub fn record(&mut self, value: i64) {
        self.history.insert(0, value);
        self.total_count += 1;
        self.sum_values += i128::from(value);
        self.history.truncate(HISTORY_LIMIT);
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.total_count = 0;
        self.sum_values = 0;
    }

    /// `round(sum / count)`, halves rounded up, or 0 before the first draw.
    pub fn average(&self) -> i64 {
        if self.total_count == 0 {
            return 0;
        }
        // floor((2 * sum + count) / (2 * count)) rounds half toward +inf
        let count = i128::from(self.total_count);
        (2 * self.sum_values + count).div_euclid(2 * count) as i64
    }
}
