use super::allocator::AllocationState;
use super::types::{Participant, PlannerError};

/// Lifts participants stuck below their minimum hours by trading slots away
/// from occupants with slack. For every candidate slot the donor must both
/// have hours to spare above their own minimum and want the slot less than
/// the recipient does. This is a bounded local-search pass, not a solver:
/// whatever deficit survives it makes the whole optimization fail.
pub fn repair_quotas(
    participants: &mut [Participant],
    state: &mut AllocationState,
) -> Result<(), PlannerError> {
    for i in 0..participants.len() {
        let mut need = participants[i]
            .min_quota
            .saturating_sub(participants[i].assigned);

        for slot in 0..state.slot_count() {
            if need == 0 {
                break;
            }
            if !participants[i].slot_bits[slot] || state.holds(slot, i) {
                continue;
            }
            if let Some(donor) = pick_donor(participants, state, slot, i) {
                state.swap_occupant(slot, donor, i);
                participants[donor].assigned -= 1;
                participants[i].assigned += 1;
                need -= 1;
            }
        }
    }

    let short: Vec<String> = participants
        .iter()
        .filter(|p| p.assigned < p.min_quota)
        .map(|p| p.name.clone())
        .collect();
    if short.is_empty() {
        Ok(())
    } else {
        Err(PlannerError::Infeasible(short))
    }
}

/// Chooses the occupant of `slot` to trade away, if any qualifies: slack
/// above their own minimum and a strictly lower score for the slot than the
/// recipient's. The least-interested donor goes first; names settle ties.
fn pick_donor(
    participants: &[Participant],
    state: &AllocationState,
    slot: usize,
    recipient: usize,
) -> Option<usize> {
    let recipient_score = participants[recipient].scores[slot];
    state
        .occupants(slot)
        .iter()
        .copied()
        .filter(|&d| {
            participants[d].assigned > participants[d].min_quota
                && participants[d].scores[slot] < recipient_score
        })
        .min_by(|&x, &y| {
            participants[x].scores[slot]
                .cmp(&participants[y].scores[slot])
                .then_with(|| participants[x].name.cmp(&participants[y].name))
        })
}
