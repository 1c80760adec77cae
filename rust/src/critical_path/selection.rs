//! Critical path selection by slack threshold.

use crate::interner::ActivityIdx;

use super::types::ActivityTiming;

/// Indices of critical activities ordered by earliest start.
///
/// The sort is stable, so activities starting together keep input order.
pub fn select_critical(timings: &[ActivityTiming]) -> Vec<ActivityIdx> {
    let mut critical: Vec<ActivityIdx> = timings
        .iter()
        .enumerate()
        .filter(|(_, timing)| timing.is_critical())
        .map(|(idx, _)| idx as ActivityIdx)
        .collect();
    critical.sort_by(|&x, &y| {
        timings[x as usize]
            .earliest_start
            .total_cmp(&timings[y as usize].earliest_start)
    });
    critical
}
