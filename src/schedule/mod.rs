pub mod allocator;
pub mod assemble;
pub mod bitmask;
pub mod repair;
pub mod scoring;
pub mod segments;
pub mod types;

pub use types::{
    Assignment, OptimizeOptions, ParticipantRequest, PlannerError, ScheduleWindow, DAYS,
};

use std::collections::HashSet;

use allocator::AllocationState;
use types::Participant;

/// Computes a complete weekly assignment for the given window, constraints
/// and participant availabilities.
///
/// The whole computation is a pure function of its inputs: no I/O, no
/// shared state, identical inputs always produce the identical result.
/// Returns [`PlannerError::Infeasible`] when one or more participants
/// cannot reach the minimum hours even after the repair pass; every other
/// error variant flags invalid input and is raised before the engine runs.
pub fn optimize(
    window: ScheduleWindow,
    options: &OptimizeOptions,
    requests: &[ParticipantRequest],
) -> Result<Vec<Assignment>, PlannerError> {
    validate(&window, options, requests)?;
    if requests.is_empty() {
        return Ok(Vec::new());
    }

    let mut participants = build_participants(&window, options, requests)?;
    let mut state = AllocationState::new(window.total_slots(), options.participants_per_slot);

    allocator::run(&mut participants, &mut state);
    repair::repair_quotas(&mut participants, &mut state)?;

    Ok(assemble::assemble(&window, &participants, &state))
}

fn validate(
    window: &ScheduleWindow,
    options: &OptimizeOptions,
    requests: &[ParticipantRequest],
) -> Result<(), PlannerError> {
    if window.start_hour >= window.end_hour || window.end_hour > 24 {
        return Err(PlannerError::InvalidWindow {
            start: window.start_hour,
            end: window.end_hour,
        });
    }
    if options.participants_per_slot == 0 {
        return Err(PlannerError::InvalidCapacity);
    }
    if let (Some(min), Some(max)) = (
        options.min_hours_per_participant,
        options.max_hours_per_participant,
    ) {
        if max < min {
            return Err(PlannerError::QuotaRange { min, max });
        }
    }

    let expected = window.half_slot_count();
    let mut seen = HashSet::new();
    for request in requests {
        if !seen.insert(request.name.as_str()) {
            return Err(PlannerError::DuplicateParticipant(request.name.clone()));
        }
        if request.bits.len() != expected {
            return Err(PlannerError::BitmaskLength {
                name: request.name.clone(),
                got: request.bits.len(),
                expected,
            });
        }
        if request.bits.bytes().any(|b| b != b'0' && b != b'1') {
            return Err(PlannerError::BitmaskCharacter {
                name: request.name.clone(),
            });
        }
    }
    Ok(())
}

/// Derives the per-participant working state from the raw requests. With no
/// explicit max quota the week's total capacity is fair-split: everyone
/// gets `total / count`, and the first `total % count` participants one
/// hour more.
fn build_participants(
    window: &ScheduleWindow,
    options: &OptimizeOptions,
    requests: &[ParticipantRequest],
) -> Result<Vec<Participant>, PlannerError> {
    let min = options.min_hours_per_participant.unwrap_or(0) as usize;
    let seats = window.total_slots() * options.participants_per_slot;
    let base = seats / requests.len();
    let extra = seats % requests.len();

    requests
        .iter()
        .enumerate()
        .map(|(i, request)| {
            let max = match options.max_hours_per_participant {
                Some(m) => m as usize,
                None => base + usize::from(i < extra),
            };
            if max < min {
                return Err(PlannerError::QuotaRange {
                    min: min as u32,
                    max: max as u32,
                });
            }

            let slot_bits = bitmask::hourly_availability(
                &request.bits,
                window,
                options.apply_travel_time_buffer,
            );
            // lecture days come from the raw mask, before any buffering
            let lecture = scoring::lecture_days(&request.bits, window);
            let scores = scoring::slot_scores(&lecture, window, options.consider_lecture_gap);
            let segments = segments::extract_segments(&slot_bits, window);

            Ok(Participant {
                name: request.name.clone(),
                min_quota: min,
                max_quota: max,
                slot_bits,
                scores,
                segments,
                assigned: 0,
            })
        })
        .collect()
}
