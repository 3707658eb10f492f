use std::collections::{HashMap, HashSet};

use shift_planner::schedule::{
    optimize, Assignment, OptimizeOptions, ParticipantRequest, PlannerError, ScheduleWindow,
};

fn window(start_hour: u32, end_hour: u32) -> ScheduleWindow {
    ScheduleWindow {
        start_hour,
        end_hour,
    }
}

fn request(name: &str, bits: &str) -> ParticipantRequest {
    ParticipantRequest {
        name: name.to_string(),
        bits: bits.to_string(),
    }
}

fn full_week(w: &ScheduleWindow) -> String {
    "1".repeat(w.half_slot_count())
}

/// Availability built day by day from half-hour patterns.
fn week(days: [&str; 5]) -> String {
    days.concat()
}

fn counts(assignments: &[Assignment]) -> HashMap<String, usize> {
    let mut by_name = HashMap::new();
    for a in assignments {
        *by_name.entry(a.participant.clone()).or_insert(0) += 1;
    }
    by_name
}

#[test]
fn capacity_is_never_exceeded() {
    let w = window(9, 13);
    let options = OptimizeOptions::default();
    let requests = vec![
        request("ana", &full_week(&w)),
        request("bob", &full_week(&w)),
        request("cleo", &full_week(&w)),
    ];

    let assignments = optimize(w, &options, &requests).unwrap();

    let mut per_slot: HashMap<(usize, usize), usize> = HashMap::new();
    for a in &assignments {
        *per_slot.entry((a.day, a.hour_offset)).or_insert(0) += 1;
    }
    assert!(per_slot.values().all(|&n| n <= options.participants_per_slot));
}

#[test]
fn no_double_assignment_and_bits_respected() {
    let w = window(9, 13);
    let options = OptimizeOptions {
        participants_per_slot: 2,
        ..OptimizeOptions::default()
    };
    // ana is only free the first two hours of every day
    let ana_day = "11110000";
    let requests = vec![
        request("ana", &week([ana_day; 5])),
        request("bob", &full_week(&w)),
    ];

    let assignments = optimize(w, &options, &requests).unwrap();

    let mut seen = HashSet::new();
    for a in &assignments {
        assert!(
            seen.insert((a.day, a.hour_offset, a.participant.clone())),
            "slot assigned twice to the same participant"
        );
        if a.participant == "ana" {
            assert!(a.hour_offset < 2, "ana assigned outside her availability");
        }
    }
}

#[test]
fn max_quota_is_respected() {
    let w = window(9, 13);
    let options = OptimizeOptions {
        max_hours_per_participant: Some(3),
        ..OptimizeOptions::default()
    };
    let requests = vec![
        request("ana", &full_week(&w)),
        request("bob", &full_week(&w)),
    ];

    let assignments = optimize(w, &options, &requests).unwrap();
    assert!(counts(&assignments).values().all(|&n| n <= 3));
}

#[test]
fn success_implies_min_quota_met() {
    let w = window(9, 13);
    let options = OptimizeOptions {
        min_hours_per_participant: Some(2),
        ..OptimizeOptions::default()
    };
    let requests = vec![
        request("ana", &full_week(&w)),
        request("bob", &full_week(&w)),
    ];

    let assignments = optimize(w, &options, &requests).unwrap();
    let by_name = counts(&assignments);
    assert!(by_name.get("ana").copied().unwrap_or(0) >= 2);
    assert!(by_name.get("bob").copied().unwrap_or(0) >= 2);
}

#[test]
fn identical_input_yields_identical_output() {
    let w = window(8, 14);
    let options = OptimizeOptions {
        participants_per_slot: 2,
        min_hours_per_participant: Some(1),
        consider_lecture_gap: true,
        apply_travel_time_buffer: true,
        ..OptimizeOptions::default()
    };
    let requests = vec![
        request("ana", &week(["111111000111", "111111111111", "000000111111", "111100001111", "111111111111"])),
        request("bob", &full_week(&w)),
        request("cleo", &week(["000011111111", "111111110000", "111111111111", "001111111100", "111111111111"])),
    ];

    let first = optimize(w, &options, &requests).unwrap();
    let second = optimize(w, &options, &requests).unwrap();
    assert_eq!(first, second);
}

#[test]
fn partial_hours_never_become_segments() {
    // half-hour pattern 111100 over a 3-hour day gives hours "110":
    // exactly one two-hour block at the start of Monday
    let w = window(9, 12);
    let requests = vec![request(
        "ana",
        &week(["111100", "000000", "000000", "000000", "000000"]),
    )];

    let assignments = optimize(w, &OptimizeOptions::default(), &requests).unwrap();

    let mut offsets: Vec<usize> = assignments.iter().map(|a| a.hour_offset).collect();
    offsets.sort_unstable();
    assert!(assignments.iter().all(|a| a.day == 0));
    assert_eq!(offsets, vec![0, 1]);
}

#[test]
fn travel_buffer_consumes_eroded_days() {
    // Monday's 110011 erodes to 100001, leaving no whole free hour there
    let w = window(9, 12);
    let options = OptimizeOptions {
        apply_travel_time_buffer: true,
        ..OptimizeOptions::default()
    };
    let requests = vec![request(
        "ana",
        &week(["110011", "111111", "111111", "111111", "111111"]),
    )];

    let assignments = optimize(w, &options, &requests).unwrap();
    assert!(!assignments.iter().any(|a| a.day == 0));
    assert_eq!(assignments.len(), 12);
}

#[test]
fn infeasible_quota_fails_without_partial_result() {
    // only three available hours all week, but five are demanded
    let w = window(9, 11);
    let options = OptimizeOptions {
        min_hours_per_participant: Some(5),
        max_hours_per_participant: Some(5),
        ..OptimizeOptions::default()
    };
    let requests = vec![request(
        "ana",
        &week(["1111", "1100", "0000", "0000", "0000"]),
    )];

    let err = optimize(w, &options, &requests).unwrap_err();
    match err {
        PlannerError::Infeasible(names) => assert_eq!(names, vec!["ana".to_string()]),
        other => panic!("expected infeasible, got: {other}"),
    }
}

#[test]
fn identical_participants_split_the_week_evenly() {
    let w = window(9, 13);
    let options = OptimizeOptions {
        max_hours_per_participant: Some(10),
        ..OptimizeOptions::default()
    };
    let requests = vec![
        request("ana", &full_week(&w)),
        request("bob", &full_week(&w)),
    ];

    let assignments = optimize(w, &options, &requests).unwrap();
    let by_name = counts(&assignments);
    let ana = by_name.get("ana").copied().unwrap_or(0);
    let bob = by_name.get("bob").copied().unwrap_or(0);
    assert_eq!(assignments.len(), 20);
    assert!(ana.abs_diff(bob) <= 1, "uneven split: {ana} vs {bob}");
}

#[test]
fn lecture_gap_steers_work_onto_committed_days() {
    // Monday has a committed half-hour, the rest of the week is wide open;
    // with the flag on, both assigned hours must land on Monday
    let w = window(9, 12);
    let options = OptimizeOptions {
        consider_lecture_gap: true,
        max_hours_per_participant: Some(2),
        ..OptimizeOptions::default()
    };
    let requests = vec![request(
        "ana",
        &week(["111110", "111111", "111111", "111111", "111111"]),
    )];

    let assignments = optimize(w, &options, &requests).unwrap();
    assert_eq!(assignments.len(), 2);
    assert!(assignments.iter().all(|a| a.day == 0));
}

#[test]
fn repair_recovers_minimum_through_a_swap() {
    // alice can work most of Monday and Tuesday; bob only Monday's first
    // hour, which alice grabs first. The repair pass must hand it over,
    // since alice wants that free-day slot less than bob does.
    let w = window(9, 12);
    let options = OptimizeOptions {
        consider_lecture_gap: true,
        min_hours_per_participant: Some(1),
        max_hours_per_participant: Some(4),
        ..OptimizeOptions::default()
    };
    let requests = vec![
        request(
            "alice",
            &week(["111111", "111110", "000000", "000000", "000000"]),
        ),
        request(
            "bob",
            &week(["110000", "000000", "000000", "000000", "000000"]),
        ),
    ];

    let assignments = optimize(w, &options, &requests).unwrap();
    let by_name = counts(&assignments);
    assert_eq!(by_name.get("bob"), Some(&1));
    assert_eq!(by_name.get("alice"), Some(&3));

    let bob_slot: Vec<_> = assignments
        .iter()
        .filter(|a| a.participant == "bob")
        .collect();
    assert_eq!((bob_slot[0].day, bob_slot[0].hour_offset), (0, 0));
    assert!(!assignments
        .iter()
        .any(|a| a.participant == "alice" && a.day == 0 && a.hour_offset == 0));
}

#[test]
fn fill_pass_tops_up_open_capacity() {
    let w = window(9, 11);
    let options = OptimizeOptions {
        participants_per_slot: 2,
        ..OptimizeOptions::default()
    };
    let requests = vec![
        request("ana", &full_week(&w)),
        request("bob", &full_week(&w)),
    ];

    let assignments = optimize(w, &options, &requests).unwrap();

    let mut per_slot: HashMap<(usize, usize), usize> = HashMap::new();
    for a in &assignments {
        *per_slot.entry((a.day, a.hour_offset)).or_insert(0) += 1;
    }
    assert_eq!(per_slot.len(), 10);
    assert!(per_slot.values().all(|&n| n == 2));

    let by_name = counts(&assignments);
    assert_eq!(by_name.get("ana"), Some(&10));
    assert_eq!(by_name.get("bob"), Some(&10));
}
