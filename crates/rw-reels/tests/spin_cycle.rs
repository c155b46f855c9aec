//! End-to-end spin round tests
//!
//! Drives whole rounds frame by frame and checks:
//! - the left-to-right stop chain
//! - stage notifications
//! - scoring of known layouts

use std::sync::mpsc;

use rw_reels::{REEL_COUNT, SLOTS_PER_REEL, SlotConfig, SpinController};
use rw_stage::{Stage, StageEvent};

const FRAME: f64 = 1.0 / 60.0;
const FRAME_BUDGET: usize = 100_000;

fn fixed_layout() -> SlotConfig {
    SlotConfig {
        shuffle_on_init: false,
        ..SlotConfig::classic()
    }
}

fn finish_round(machine: &mut SpinController) {
    let mut frames = 0;
    while !machine.can_spin() {
        machine.advance_frame(FRAME);
        frames += 1;
        assert!(frames < FRAME_BUDGET, "stop chain stalled");
    }
}

fn stoppers(machine: &SpinController) -> Vec<usize> {
    (0..REEL_COUNT)
        .filter(|&reel| machine.reel(reel).iter().any(|u| u.is_stopper()))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// STOP CHAIN
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_reels_settle_left_to_right() {
    let mut machine = SpinController::seeded(SlotConfig::classic(), 7).unwrap();
    assert!(machine.request_spin());

    let mut settled_order = Vec::new();
    let mut frames = 0;
    while !machine.can_spin() {
        machine.advance_frame(FRAME);
        frames += 1;
        assert!(frames < FRAME_BUDGET);

        // Never more than one armed stopper, and it belongs to the active reel
        let armed = stoppers(&machine);
        assert!(armed.len() <= 1);
        if let Some(active) = machine.active_reel() {
            assert_eq!(armed, vec![active]);
            for reel in 0..active {
                assert!(machine.result_grid().is_settled(reel));
            }
            for reel in active..REEL_COUNT {
                assert!(!machine.result_grid().is_settled(reel));
                assert!(machine.reel(reel).iter().all(|u| u.is_spinning()));
            }
        }

        for reel in 0..REEL_COUNT {
            if machine.result_grid().is_settled(reel) && !settled_order.contains(&reel) {
                settled_order.push(reel);
            }
        }
    }

    assert_eq!(settled_order, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_each_reel_spins_at_least_min_duration() {
    let mut machine = SpinController::seeded(SlotConfig::classic(), 3).unwrap();
    machine.request_spin();
    finish_round(&mut machine);

    let trace = machine.last_trace();
    let start = trace.events[0].timestamp_ms;
    let stops: Vec<f64> = trace.reel_stops().iter().map(|e| e.timestamp_ms).collect();
    assert_eq!(stops.len(), REEL_COUNT);

    // One second minimum per reel, give or take the arming frame
    assert!(stops[0] - start > 950.0);
    for pair in stops.windows(2) {
        assert!(pair[1] - pair[0] > 950.0);
    }
}

#[test]
fn test_settled_units_sit_exactly_on_targets() {
    let mut machine = SpinController::seeded(SlotConfig::turbo(), 99).unwrap();
    for _ in 0..5 {
        machine.request_spin();
        finish_round(&mut machine);
        for reel in 0..REEL_COUNT {
            let mut slots: Vec<usize> = machine.reel(reel).iter().map(|u| u.target_slot()).collect();
            for unit in machine.reel(reel) {
                assert_eq!(unit.velocity(), 0.0);
                assert_eq!(unit.position(), unit.target_slot() as f64 * 53.0);
            }
            slots.sort_unstable();
            assert_eq!(slots, (0..SLOTS_PER_REEL).collect::<Vec<_>>());
        }
    }
    assert_eq!(machine.stats().rounds, 5);
}

// ═══════════════════════════════════════════════════════════════════════════════
// NOTIFICATIONS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_listener_sees_round_lifecycle() {
    let (tx, rx) = mpsc::channel::<StageEvent>();
    let listener = move |event: &StageEvent| {
        let _ = tx.send(event.clone());
    };
    let mut machine = SpinController::seeded(fixed_layout(), 1)
        .unwrap()
        .with_listener(Box::new(listener));

    machine.spin_forced([0; REEL_COUNT]);
    finish_round(&mut machine);

    let events: Vec<StageEvent> = rx.try_iter().collect();
    assert_eq!(events, machine.last_trace().events);

    let names: Vec<&str> = events.iter().map(|e| e.type_name()).collect();
    assert_eq!(names.first(), Some(&"spin_start"));
    assert_eq!(names.last(), Some(&"spin_end"));
    assert_eq!(names.iter().filter(|&&n| n == "reel_spinning").count(), 5);
    assert!(names.contains(&"win_present"));

    let stop_reels: Vec<u8> = machine
        .last_trace()
        .reel_stops()
        .iter()
        .filter_map(|e| e.stage.reel_index())
        .collect();
    assert_eq!(stop_reels, vec![0, 1, 2, 3, 4]);

    // Reel stops report the visible column top to bottom
    match &machine.last_trace().reel_stops()[2].stage {
        Stage::ReelStop { symbols, .. } => assert_eq!(symbols, &vec![0, 1, 2]),
        other => panic!("unexpected stage {other:?}"),
    }
}

#[test]
fn test_losing_round_has_no_win_stages() {
    let mut machine = SpinController::seeded(fixed_layout(), 1).unwrap();
    machine.spin_forced([0, 6, 0, 6, 0]);
    finish_round(&mut machine);

    assert_eq!(machine.score(), 0);
    assert!(machine.winning_lines().is_empty());
    assert!(!machine.last_trace().has_stage("win_present"));
    assert!(!machine.last_trace().has_stage("win_line_show"));
    assert_eq!(machine.last_trace().final_score(), Some(0));
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCORING
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_straight_rows_score_three_fives() {
    let mut machine = SpinController::seeded(fixed_layout(), 1).unwrap();
    machine.spin_forced([0; REEL_COUNT]);
    finish_round(&mut machine);

    assert_eq!(machine.score(), 300_000);
    let lines: Vec<u8> = machine.winning_lines().iter().map(|w| w.line_index).collect();
    assert_eq!(lines, vec![0, 1, 2]);

    // Trace points are the drawn symbol centres
    let middle = &machine.winning_lines()[0];
    for (reel, point) in middle.trace.iter().enumerate() {
        assert_eq!(point.x, reel as f64 * 53.0 + 25.0);
        assert_eq!(point.y, 4.0 * 53.0 + 25.0);
    }
}

#[test]
fn test_wild_middle_row_lights_many_lines() {
    // Offset 4 shows symbols 4, 5 (wild), 6 on every reel
    let mut machine = SpinController::seeded(fixed_layout(), 1).unwrap();
    machine.spin_forced([4; REEL_COUNT]);
    finish_round(&mut machine);

    assert_eq!(machine.winning_lines().len(), 17);
    assert_eq!(machine.score(), 1_502_000);
    assert_eq!(machine.line_traces().len(), 17);
}

#[test]
fn test_seeded_machines_agree() {
    let mut a = SpinController::seeded(SlotConfig::classic(), 2024).unwrap();
    let mut b = SpinController::seeded(SlotConfig::classic(), 2024).unwrap();

    for _ in 0..10 {
        a.request_spin();
        b.request_spin();
        assert_eq!(a.round().top_offsets, b.round().top_offsets);
        finish_round(&mut a);
        finish_round(&mut b);
        assert_eq!(a.score(), b.score());
    }
    assert_eq!(a.stats(), b.stats());
}

#[test]
fn test_gate_reopens_between_rounds() {
    let mut machine = SpinController::seeded(SlotConfig::classic(), 5).unwrap();
    assert!(machine.request_spin());
    assert!(!machine.request_spin());
    finish_round(&mut machine);
    assert!(machine.request_spin());
    assert_eq!(machine.round().spin_id, 2);
    assert_eq!(machine.score(), 0);
}
