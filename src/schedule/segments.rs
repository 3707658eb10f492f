use std::collections::VecDeque;

use super::types::{ScheduleWindow, Segment, DAYS};

/// Finds every maximal run of contiguous available hours, scanning each day
/// on its own so a run never spans a day boundary. The result is sorted
/// longest-first (ties by earliest start) so the allocator always sees the
/// biggest block a participant can offer at the front.
pub fn extract_segments(slot_bits: &[bool], window: &ScheduleWindow) -> VecDeque<Segment> {
    let per_day = window.hours_per_day();
    let mut segments = Vec::new();

    for day in 0..DAYS {
        let base = day * per_day;
        let mut i = 0;
        while i < per_day {
            if slot_bits[base + i] {
                let start = base + i;
                while i < per_day && slot_bits[base + i] {
                    i += 1;
                }
                segments.push(Segment {
                    start,
                    len: base + i - start,
                });
            } else {
                i += 1;
            }
        }
    }

    segments.sort_by(|a, b| b.len.cmp(&a.len).then(a.start.cmp(&b.start)));
    segments.into()
}
