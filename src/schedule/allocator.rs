use std::collections::HashSet;

use super::scoring::BLOCK_REJECT_THRESHOLD;
use super::types::{Participant, Segment};

/// Per-call allocation bookkeeping: who occupies which slot, bounded by the
/// uniform per-slot capacity. Owned by one optimization call, never shared.
#[derive(Debug)]
pub struct AllocationState {
    capacity: usize,
    occupants: Vec<Vec<usize>>,
}

impl AllocationState {
    pub fn new(total_slots: usize, capacity: usize) -> Self {
        AllocationState {
            capacity,
            occupants: vec![Vec::new(); total_slots],
        }
    }

    pub fn slot_count(&self) -> usize {
        self.occupants.len()
    }

    pub fn occupants(&self, slot: usize) -> &[usize] {
        &self.occupants[slot]
    }

    pub fn has_room(&self, slot: usize) -> bool {
        self.occupants[slot].len() < self.capacity
    }

    pub fn holds(&self, slot: usize, participant: usize) -> bool {
        self.occupants[slot].contains(&participant)
    }

    pub fn place(&mut self, slot: usize, participant: usize) {
        debug_assert!(self.has_room(slot));
        debug_assert!(!self.holds(slot, participant));
        self.occupants[slot].push(participant);
    }

    /// Hands `from`'s seat in `slot` to `to`, keeping the seat's position so
    /// output ordering stays stable. Used by the quota repair pass.
    pub fn swap_occupant(&mut self, slot: usize, from: usize, to: usize) {
        debug_assert!(!self.holds(slot, to));
        if let Some(seat) = self.occupants[slot].iter_mut().find(|p| **p == from) {
            *seat = to;
        }
    }
}

/// Main assignment loop followed by the fill pass.
///
/// Each round re-ranks every participant that still has headroom and
/// segments left, pops the winner, and gives them either one whole
/// contiguous block or the best scattered slots of their largest block.
/// Ranking is recomputed from live counters every round, so it can never go
/// stale the way a heap keyed at insertion time would.
pub fn run(participants: &mut [Participant], state: &mut AllocationState) {
    while let Some(p_idx) = select_next(participants) {
        if !try_contiguous(p_idx, participants, state) {
            scatter_into_best_segment(p_idx, participants, state);
        }
    }
    fill_open_slots(participants, state);
}

/// Picks the next participant to serve, or `None` when everyone is either
/// at their max quota or out of segments.
fn select_next(participants: &[Participant]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, p) in participants.iter().enumerate() {
        if p.assigned >= p.max_quota || p.segments.is_empty() {
            continue;
        }
        best = Some(match best {
            None => i,
            Some(b) if ranks_before(p, &participants[b]) => i,
            Some(b) => b,
        });
    }
    best
}

/// Selection order: most desirable best block, then longest block, then the
/// least-served participant (by assigned/max ratio), then name.
fn ranks_before(a: &Participant, b: &Participant) -> bool {
    let (sa, sb) = (best_segment_score(a), best_segment_score(b));
    if sa != sb {
        return sa > sb;
    }
    let (la, lb) = (longest_segment(a), longest_segment(b));
    if la != lb {
        return la > lb;
    }
    // compare assigned/max fractions without leaving the integers
    let (ra, rb) = (a.assigned * b.max_quota, b.assigned * a.max_quota);
    if ra != rb {
        return ra < rb;
    }
    a.name < b.name
}

/// The best contiguous option a participant still has: the maximum over
/// their segments of the worst score inside each segment.
fn best_segment_score(p: &Participant) -> i32 {
    p.segments
        .iter()
        .map(|seg| {
            (seg.start..seg.start + seg.len)
                .map(|slot| p.scores[slot])
                .min()
                .unwrap_or(i32::MIN)
        })
        .max()
        .unwrap_or(i32::MIN)
}

fn longest_segment(p: &Participant) -> usize {
    p.segments.iter().map(|seg| seg.len).max().unwrap_or(0)
}

/// Tries to place the participant's entire remaining quota as one block.
/// A segment qualifies when its first `remaining` slots are all available,
/// under capacity, not already held, and none score below the rejection
/// threshold. The consumed head is split off; any tail goes back in the
/// queue.
fn try_contiguous(
    p_idx: usize,
    participants: &mut [Participant],
    state: &mut AllocationState,
) -> bool {
    let remaining = participants[p_idx].max_quota - participants[p_idx].assigned;

    let pos = {
        let p = &participants[p_idx];
        p.segments.iter().position(|seg| {
            seg.len >= remaining
                && (seg.start..seg.start + remaining).all(|slot| {
                    p.slot_bits[slot]
                        && state.has_room(slot)
                        && !state.holds(slot, p_idx)
                        && p.scores[slot] >= BLOCK_REJECT_THRESHOLD
                })
        })
    };

    let Some(pos) = pos else {
        return false;
    };
    let Some(seg) = participants[p_idx].segments.remove(pos) else {
        return false;
    };

    for slot in seg.start..seg.start + remaining {
        state.place(slot, p_idx);
    }
    participants[p_idx].assigned += remaining;

    if seg.len > remaining {
        participants[p_idx].segments.push_back(Segment {
            start: seg.start + remaining,
            len: seg.len - remaining,
        });
    }
    true
}

/// Fallback when no block fits: consume the participant's first (largest)
/// segment slot by slot, best-scoring slots first. Unconsumed stretches of
/// the block are re-queued; if nothing at all could be taken the segment is
/// dropped, since capacity only ever fills up during the main loop and the
/// segment can never become usable again.
fn scatter_into_best_segment(
    p_idx: usize,
    participants: &mut [Participant],
    state: &mut AllocationState,
) {
    let Some(seg) = participants[p_idx].segments.pop_front() else {
        return;
    };
    let remaining = participants[p_idx].max_quota - participants[p_idx].assigned;

    let mut open: Vec<usize> = {
        let p = &participants[p_idx];
        (seg.start..seg.start + seg.len)
            .filter(|&slot| p.slot_bits[slot] && state.has_room(slot) && !state.holds(slot, p_idx))
            .collect()
    };
    open.sort_by(|&a, &b| {
        let p = &participants[p_idx];
        p.scores[b].cmp(&p.scores[a]).then(a.cmp(&b))
    });

    let taken: HashSet<usize> = open.into_iter().take(remaining).collect();
    if taken.is_empty() {
        return;
    }

    for &slot in &taken {
        state.place(slot, p_idx);
    }
    participants[p_idx].assigned += taken.len();

    // push the untouched stretches of the block back as fresh segments
    let mut run_start: Option<usize> = None;
    for slot in seg.start..=seg.start + seg.len {
        let open_here = slot < seg.start + seg.len && !taken.contains(&slot);
        match (open_here, run_start) {
            (true, None) => run_start = Some(slot),
            (false, Some(start)) => {
                participants[p_idx].segments.push_back(Segment {
                    start,
                    len: slot - start,
                });
                run_start = None;
            }
            _ => {}
        }
    }
}

/// Final sweep: every slot still under capacity is topped up with the
/// highest-scoring eligible participant, least-served first on ties.
fn fill_open_slots(participants: &mut [Participant], state: &mut AllocationState) {
    for slot in 0..state.slot_count() {
        while state.has_room(slot) {
            let mut best: Option<usize> = None;
            for (i, p) in participants.iter().enumerate() {
                if p.assigned >= p.max_quota || !p.slot_bits[slot] || state.holds(slot, i) {
                    continue;
                }
                best = Some(match best {
                    None => i,
                    Some(b) if fill_beats(p, &participants[b], slot) => i,
                    Some(b) => b,
                });
            }
            match best {
                Some(i) => {
                    state.place(slot, i);
                    participants[i].assigned += 1;
                }
                None => break,
            }
        }
    }
}

fn fill_beats(a: &Participant, b: &Participant, slot: usize) -> bool {
    if a.scores[slot] != b.scores[slot] {
        return a.scores[slot] > b.scores[slot];
    }
    if a.assigned != b.assigned {
        return a.assigned < b.assigned;
    }
    a.name < b.name
}
