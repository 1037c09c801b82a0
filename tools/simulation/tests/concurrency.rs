//! Concurrency test
//!
//! Verifies that independent arcades can run on separate threads
//! (each arcade owns all its state, nothing is shared).

use game_core::{Arcade, ArcadeConfig};
use simulation::bots::perfect_memory::PerfectMemoryPlayer;
use simulation::bots::random_clicker::RandomClicker;
use simulation::runner::{run_sessions, RunnerConfig};
use std::thread;

fn seeded(seed: u64) -> ArcadeConfig {
    ArcadeConfig {
        seed: Some(seed),
        ..Default::default()
    }
}

#[test]
fn test_concurrent_arcades() {
    let seeds = vec![1u64, 2, 3, 4];

    let handles: Vec<_> = seeds
        .into_iter()
        .map(|seed| {
            thread::spawn(move || {
                let mut arcade = Arcade::new(seeded(seed)).unwrap();
                let mut player = PerfectMemoryPlayer::new();
                let (reports, metrics) =
                    run_sessions(&mut arcade, &mut player, &RunnerConfig::default(), 5);

                // Every session cleared, one unit per pair
                assert!(reports.iter().all(|r| r.completed));
                let held: u64 = arcade.wallet().coins().map(|c| c.quantity).sum();
                assert_eq!(held, 45);
                metrics.completed_sessions
            })
        })
        .collect();

    let mut total = 0;
    for handle in handles {
        total += handle.join().unwrap();
    }

    assert_eq!(total, 20); // 5 sessions × 4 arcades
}

#[test]
fn test_concurrent_determinism() {
    let run = || {
        let mut arcade = Arcade::new(seeded(99)).unwrap();
        let mut player = RandomClicker::new(7);
        let (reports, _) = run_sessions(&mut arcade, &mut player, &RunnerConfig::default(), 3);
        (reports, arcade.total_value(), arcade.price_snapshot())
    };

    let h1 = thread::spawn(run);
    let h2 = thread::spawn(run);

    let r1 = h1.join().unwrap();
    let r2 = h2.join().unwrap();

    assert_eq!(r1, r2, "Parallel runs must produce identical results");
}
