use chrono::NaiveTime;

use super::allocator::AllocationState;
use super::types::{Assignment, Participant, ScheduleWindow};

/// Turns the per-slot occupant lists into concrete calendar assignments,
/// ordered by slot index and, within a slot, by the order participants were
/// placed. Stable for identical inputs.
pub fn assemble(
    window: &ScheduleWindow,
    participants: &[Participant],
    state: &AllocationState,
) -> Vec<Assignment> {
    let mut result = Vec::new();
    for slot in 0..state.slot_count() {
        let day = window.day_of(slot);
        let offset = window.hour_offset_of(slot);
        let start_hour = window.start_hour + offset as u32;
        for &p in state.occupants(slot) {
            result.push(Assignment {
                day,
                hour_offset: offset,
                start_time: clock(start_hour),
                end_time: clock(start_hour + 1),
                participant: participants[p].name.clone(),
            });
        }
    }
    result
}

/// Whole-hour clock time; a window ending at 24 wraps to midnight.
fn clock(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour % 24, 0, 0).unwrap_or(NaiveTime::MIN)
}
