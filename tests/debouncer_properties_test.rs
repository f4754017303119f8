//! Behavioural properties of the gesture debouncer


use gesture_interaction::{
    classifier::GestureSymbol,
    config::DebounceConfig,
    debouncer::{DebounceState, Debouncer, Decision},
};
use rand::Rng;
use std::time::{Duration, Instant};
use test_helpers::FRAME;

const ALL_SYMBOLS: [GestureSymbol; 7] = [
    GestureSymbol::None,
    GestureSymbol::Wave,
    GestureSymbol::Point,
    GestureSymbol::Fist,
    GestureSymbol::Ok,
    GestureSymbol::ThumbsUp,
    GestureSymbol::Peace,
];

/// Random stream made of runs, the way real classification flickers
fn random_runs(total: usize) -> Vec<GestureSymbol> {
    let mut rng = rand::thread_rng();
    let mut stream = Vec::with_capacity(total);
    while stream.len() < total {
        let symbol = ALL_SYMBOLS[rng.gen_range(0..ALL_SYMBOLS.len())];
        let run = rng.gen_range(1..15);
        stream.extend(std::iter::repeat(symbol).take(run));
    }
    stream.truncate(total);
    stream
}

/// Feed a stream 33 ms apart, returning (time, decision) pairs
fn run(debouncer: &mut Debouncer, start: Instant, stream: &[GestureSymbol]) -> Vec<(Instant, Decision)> {
    stream
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let now = start + FRAME * i as u32;
            (now, debouncer.update(*g, now))
        })
        .collect()
}

#[test]
fn test_fist_scenario() {
    let mut debouncer = Debouncer::new(DebounceConfig::default());
    let start = Instant::now();

    let first = debouncer.update(GestureSymbol::Fist, start);
    assert_eq!(first, Decision::Accumulating(GestureSymbol::Fist));
    assert_eq!(debouncer.state(), DebounceState::Locked(GestureSymbol::Fist));

    let mut fired = Vec::new();
    for i in 1..10u32 {
        let now = start + FRAME * i;
        let decision = debouncer.update(GestureSymbol::Fist, now);
        if i == 3 {
            assert_eq!(debouncer.counters(GestureSymbol::Fist).stability, 4);
        }
        if let Some(g) = decision.fired() {
            fired.push((i, g));
        }
    }

    // Seventh frame (index 6) fires, nothing through the tenth
    assert_eq!(fired, vec![(6, GestureSymbol::Fist)]);
    let fired_at = start + FRAME * 6;
    assert_eq!(debouncer.global_cooldown_until(), Some(fired_at + Duration::from_millis(2000)));
    assert_eq!(
        debouncer.counters(GestureSymbol::Fist).cooldown_until,
        Some(fired_at + Duration::from_millis(3000))
    );
}

#[test]
fn test_at_most_one_lock() {
    for _ in 0..50 {
        let mut debouncer = Debouncer::new(DebounceConfig::default());
        let start = Instant::now();
        for (_, decision) in run(&mut debouncer, start, &random_runs(400)) {
            match debouncer.state() {
                DebounceState::Idle => assert_eq!(debouncer.locked(), None),
                DebounceState::Locked(g) => {
                    assert_eq!(debouncer.locked(), Some(g));
                    assert_ne!(g, GestureSymbol::None);
                }
            }
            if let Some(g) = decision.fired() {
                assert_eq!(debouncer.locked(), Some(g));
            }
        }
    }
}

#[test]
fn test_short_challenges_never_displace_lock() {
    let config = DebounceConfig::default();
    let mut rng = rand::thread_rng();

    for _ in 0..50 {
        let mut debouncer = Debouncer::new(config.clone());
        let start = Instant::now();
        let (a, b) = (GestureSymbol::Fist, GestureSymbol::Peace);

        let mut stream = Vec::new();
        while stream.len() < 60 {
            stream.extend(std::iter::repeat(a).take(rng.gen_range(1..6)));
            let challenge = rng.gen_range(1..config.min_transition_frames) as usize;
            stream.extend(std::iter::repeat(b).take(challenge));
        }

        for (_, decision) in run(&mut debouncer, start, &stream) {
            assert_ne!(decision.fired(), Some(b));
            assert_ne!(debouncer.locked(), Some(b));
        }
    }
}

#[test]
fn test_alternating_single_frames_keep_initial_lock() {
    let mut debouncer = Debouncer::new(DebounceConfig::default());
    let start = Instant::now();
    let stream: Vec<GestureSymbol> = (0..6)
        .map(|i| if i % 2 == 0 { GestureSymbol::Ok } else { GestureSymbol::Point })
        .collect();

    for (_, decision) in run(&mut debouncer, start, &stream) {
        assert_eq!(debouncer.locked(), Some(GestureSymbol::Ok));
        assert!(decision.fired().is_none());
    }
    assert_eq!(debouncer.counters(GestureSymbol::Point).transitions, 1);
}

#[test]
fn test_two_interleaved_challengers_keep_lock() {
    let mut debouncer = Debouncer::new(DebounceConfig::default());
    let start = Instant::now();
    let mut stream = vec![GestureSymbol::Fist];
    for _ in 0..6 {
        stream.extend([GestureSymbol::Ok, GestureSymbol::Peace]);
    }

    for (_, decision) in run(&mut debouncer, start, &stream) {
        assert!(matches!(
            decision,
            Decision::Accumulating(GestureSymbol::Fist) | Decision::Challenging { frames: 1, .. }
        ));
    }
    assert_eq!(debouncer.locked(), Some(GestureSymbol::Fist));
}

#[test]
fn test_lock_changes_only_after_consecutive_challenger_frames() {
    let config = DebounceConfig::default();
    let mut rng = rand::thread_rng();

    for _ in 0..100 {
        let mut debouncer = Debouncer::new(config.clone());
        let start = Instant::now();

        // Short runs over every symbol so challengers interleave constantly
        let mut stream = Vec::new();
        while stream.len() < 600 {
            let symbol = ALL_SYMBOLS[rng.gen_range(0..ALL_SYMBOLS.len())];
            stream.extend(std::iter::repeat(symbol).take(rng.gen_range(1..9)));
        }

        // Consecutive frames of one symbol that reached the lock logic
        let mut streak: (GestureSymbol, u32) = (GestureSymbol::None, 0);
        for (i, g) in stream.iter().enumerate() {
            let now = start + FRAME * i as u32;
            debouncer.poll(now);
            let before = debouncer.locked();
            let decision = debouncer.update(*g, now);

            if !matches!(decision, Decision::GlobalCooldown | Decision::GestureCooldown(_)) {
                streak = if streak.0 == *g { (*g, streak.1 + 1) } else { (*g, 1) };
            }

            let after = debouncer.locked();
            if let (Some(old), Some(new)) = (before, after) {
                if old != new {
                    assert_eq!(new, *g, "lock moved to a gesture not seen this frame");
                    assert!(
                        streak.0 == new && streak.1 >= config.min_transition_frames,
                        "{old} -> {new} after only {} consecutive frames",
                        streak.1
                    );
                }
            }
        }
    }
}

#[test]
fn test_steady_hold_fires_exactly_once() {
    for frames in [7usize, 10, 30, 60, 90] {
        let mut debouncer = Debouncer::new(DebounceConfig::default());
        let stream = vec![GestureSymbol::ThumbsUp; frames];
        let fired: Vec<GestureSymbol> = run(&mut debouncer, Instant::now(), &stream)
            .into_iter()
            .filter_map(|(_, d)| d.fired())
            .collect();
        assert_eq!(fired, vec![GestureSymbol::ThumbsUp], "held for {frames} frames");
    }
}

#[test]
fn test_six_frames_are_not_enough() {
    let mut debouncer = Debouncer::new(DebounceConfig::default());
    let decisions = run(&mut debouncer, Instant::now(), &[GestureSymbol::Point; 6]);
    assert!(decisions.iter().all(|(_, d)| d.fired().is_none()));
}

#[test]
fn test_cooldowns_hold_for_random_streams() {
    let config = DebounceConfig::default();
    for _ in 0..50 {
        let mut debouncer = Debouncer::new(config.clone());
        let fires: Vec<(Instant, GestureSymbol)> = run(&mut debouncer, Instant::now(), &random_runs(600))
            .into_iter()
            .filter_map(|(t, d)| d.fired().map(|g| (t, g)))
            .collect();

        for (i, (t, g)) in fires.iter().enumerate() {
            for (later_t, later_g) in &fires[i + 1..] {
                let gap = later_t.duration_since(*t);
                assert!(gap >= config.global_cooldown(), "{later_g} fired {gap:?} after {g}");
                if later_g == g {
                    assert!(gap >= config.per_gesture_cooldown(), "{g} refired after {gap:?}");
                }
            }
        }
    }
}

#[test]
fn test_fired_gesture_waits_for_its_own_cooldown() {
    let config = DebounceConfig::default();
    let mut debouncer = Debouncer::new(config.clone());
    let start = Instant::now();

    // Fire once, then keep holding the same pose for four more seconds
    let decisions = run(&mut debouncer, start, &[GestureSymbol::Fist; 150]);
    let fires: Vec<Instant> = decisions
        .iter()
        .filter_map(|(t, d)| d.fired().map(|_| *t))
        .collect();
    assert!(fires.len() >= 2);
    assert!(fires[1].duration_since(fires[0]) >= config.per_gesture_cooldown());

    // Between the global and the per-gesture deadline the gesture is still ignored
    let global_end = fires[0] + config.global_cooldown();
    let own_end = fires[0] + config.per_gesture_cooldown();
    assert!(decisions
        .iter()
        .filter(|(t, _)| *t >= global_end && *t < own_end)
        .all(|(_, d)| *d == Decision::GestureCooldown(GestureSymbol::Fist)));
}

#[test]
fn test_other_gesture_can_fire_after_global_cooldown() {
    let mut debouncer = Debouncer::new(DebounceConfig::default());
    let start = Instant::now();

    let mut stream = vec![GestureSymbol::Fist; 7];
    // 70 frames of point: the first ~60 land in the global cooldown
    stream.extend([GestureSymbol::Point; 70]);
    let fired: Vec<GestureSymbol> = run(&mut debouncer, start, &stream)
        .into_iter()
        .filter_map(|(_, d)| d.fired())
        .collect();
    assert_eq!(fired, vec![GestureSymbol::Fist, GestureSymbol::Point]);
}

#[test]
fn test_none_resets_everything() {
    for _ in 0..50 {
        let mut debouncer = Debouncer::new(DebounceConfig::default());
        let start = Instant::now();
        let prefix = random_runs(rand::thread_rng().gen_range(1..120));
        run(&mut debouncer, start, &prefix);

        // Outside the global cooldown so the frame is not ignored
        let now = debouncer
            .global_cooldown_until()
            .map_or(start + FRAME * prefix.len() as u32, |until| until.max(start + FRAME * prefix.len() as u32));
        assert_eq!(debouncer.update(GestureSymbol::None, now), Decision::Reset);

        assert_eq!(debouncer.state(), DebounceState::Idle);
        for g in GestureSymbol::ACTIVE {
            let counters = debouncer.counters(g);
            assert_eq!(counters.stability, 0, "{g} stability");
            assert_eq!(counters.repeats, 0, "{g} repeats");
            assert_eq!(counters.transitions, 0, "{g} transitions");
        }
    }
}

#[test]
fn test_gap_restarts_stability() {
    let mut debouncer = Debouncer::new(DebounceConfig::default());
    let start = Instant::now();
    run(&mut debouncer, start, &[GestureSymbol::Peace; 5]);
    assert_eq!(debouncer.counters(GestureSymbol::Peace).stability, 5);

    // Longer than the stability window since the last frame
    debouncer.update(GestureSymbol::Peace, start + FRAME * 4 + Duration::from_millis(300));
    let counters = debouncer.counters(GestureSymbol::Peace);
    assert_eq!(counters.stability, 1);
    assert_eq!(counters.repeats, 0);
}
