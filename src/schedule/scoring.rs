use super::types::{ScheduleWindow, DAYS};

/// Score added to every available slot on a day the participant already has
/// commitments: work should pile onto days that are broken up anyway.
pub const LECTURE_DAY_BONUS: i32 = 100;

/// Score for slots on a completely free day. Strongly negative so that
/// entirely open days are consumed only as a last resort.
pub const FREE_DAY_PENALTY: i32 = -500;

/// Slots scoring below this are too undesirable to be forced into a
/// contiguous block; the allocator falls back to scattered placement
/// instead. Must stay between `FREE_DAY_PENALTY` and zero.
pub const BLOCK_REJECT_THRESHOLD: i32 = -50;

/// Flags each weekday on which the raw half-hour mask contains at least one
/// busy interval, i.e. the participant already has a commitment that day.
pub fn lecture_days(half_bits: &str, window: &ScheduleWindow) -> Vec<bool> {
    let per_day = window.hours_per_day() * 2;
    let bytes = half_bits.as_bytes();

    (0..DAYS)
        .map(|day| {
            let base = day * per_day;
            bytes[base..base + per_day].iter().any(|&b| b == b'0')
        })
        .collect()
}

/// Desirability score for every hourly slot of the week. With the lecture
/// gap flag off everything scores zero; with it on, slots on committed days
/// get the bonus and slots on free days the penalty. Scores for unavailable
/// slots are computed the same way but never consulted by the allocator.
pub fn slot_scores(
    lecture: &[bool],
    window: &ScheduleWindow,
    consider_lecture_gap: bool,
) -> Vec<i32> {
    (0..window.total_slots())
        .map(|slot| {
            if !consider_lecture_gap {
                0
            } else if lecture[window.day_of(slot)] {
                LECTURE_DAY_BONUS
            } else {
                FREE_DAY_PENALTY
            }
        })
        .collect()
}
