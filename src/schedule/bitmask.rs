use super::types::{ScheduleWindow, DAYS};

/// Converts a half-hour availability string into an hourly availability
/// vector of length `total_slots`, optionally eroding the mask with the
/// travel buffer first.
///
/// An hour counts as available only when both of its half-hours are free:
/// a partially free hour is never assignable.
pub fn hourly_availability(
    half_bits: &str,
    window: &ScheduleWindow,
    apply_travel_buffer: bool,
) -> Vec<bool> {
    let mut half: Vec<bool> = half_bits.chars().map(|c| c == '1').collect();

    if apply_travel_buffer {
        erode_travel_buffer(&mut half, window);
    }

    (0..window.total_slots())
        .map(|slot| half[slot * 2] && half[slot * 2 + 1])
        .collect()
}

/// Clears the half-hour on each side of every busy half-hour, within the
/// same day. A free interval touching a busy one loses its edge to transit
/// time. Erosion is computed from the original mask, so a freshly cleared
/// bit does not knock out its own neighbors in turn.
fn erode_travel_buffer(half: &mut [bool], window: &ScheduleWindow) {
    let per_day = window.hours_per_day() * 2;
    let original = half.to_vec();

    for day in 0..DAYS {
        let base = day * per_day;
        for i in 0..per_day {
            if original[base + i] {
                continue;
            }
            if i > 0 {
                half[base + i - 1] = false;
            }
            if i + 1 < per_day {
                half[base + i + 1] = false;
            }
        }
    }
}
