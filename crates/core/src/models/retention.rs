/// Maximum number of previous prices kept per city.
pub const PRICE_HISTORY_LIMIT: usize = 20;

/// Maximum number of recorded price-log entries.
pub const PRICE_LOG_LIMIT: usize = 15;

/// Maximum number of trip-log entries.
pub const TRIP_LOG_LIMIT: usize = 50;

/// Insert `entry` at the front of `log` and drop everything past `limit`.
///
/// Every bounded log in the dashboard is stored most-recent-first, so the
/// oldest entries are the ones that age out.
pub fn prepend_bounded<T>(log: &mut Vec<T>, entry: T, limit: usize) {
    log.insert(0, entry);
    log.truncate(limit);
}

/// Trim an existing log to `limit` entries, keeping the most recent.
/// Returns the number of entries dropped.
pub fn enforce_limit<T>(log: &mut Vec<T>, limit: usize) -> usize {
    let dropped = log.len().saturating_sub(limit);
    log.truncate(limit);
    dropped
}
