use crate::Interval;

/// Merge possibly overlapping, unordered intervals into the minimal ordered
/// set of disjoint ones covering the same time.
///
/// Intervals that merely touch (`a.end == b.start`) are merged as well.
pub fn merge_intervals(intervals: impl IntoIterator<Item = Interval>) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals.into_iter().collect();
    // Ord on Interval is (start, end)
    sorted.sort_unstable();

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(current) if interval.start <= current.end => {
                current.end = current.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}
