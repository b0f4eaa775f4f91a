// Stats Aggregator: success rate over client-reported session counters.

pub mod handlers;

use crate::models::session::SessionStats;

/// `round(100 * helpful / queries)` with halves rounded up, capped at 100.
/// Zero when no queries have been counted.
pub fn success_rate(stats: &SessionStats) -> u32 {
    rate(stats.queries_count, stats.helpful_count)
}

fn rate(queries_count: u32, helpful_count: u32) -> u32 {
    if queries_count == 0 {
        return 0;
    }
    let queries = u64::from(queries_count);
    let helpful = u64::from(helpful_count);
    // floor((100h / q) + 1/2) in integer arithmetic
    let rounded = (200 * helpful + queries) / (2 * queries);
    rounded.min(100) as u32
}
