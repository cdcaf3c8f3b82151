//! Basic headless demonstration of the arena battle simulation.
//!
//! Run with: cargo run --example basic_demo

use arena_sim::{BattleSim, CardId, Team};

fn main() {
    env_logger::init();
    println!("=== Two-Lane Arena Battler - Simulation Demo ===\n");

    let mut sim = BattleSim::new(2024);

    println!("Initial state:");
    print_snapshot(&mut sim);

    // Open with a knight push down the left lane.
    println!("\n--- Player opens with a knight on the left bridge ---\n");
    sim.spawn_unit(CardId::Knight, Team::Player, 100.0, 420.0);

    // Run one minute of game time at 60 ticks/sec.
    println!("Running simulation for 3600 ticks (60 seconds at 60 ticks/sec)...\n");
    for tick in 0..3600 {
        sim.step(1.0 / 60.0);

        if (tick + 1) % 600 == 0 {
            println!(
                "--- Tick {} (clock {:.0}s) ---",
                sim.current_tick(),
                sim.time_remaining()
            );
            print_snapshot(&mut sim);
        }
        if sim.is_over() {
            println!("Match decided early: {:?}", sim.winner());
            break;
        }
    }

    println!("\n=== Final State (JSON) ===\n");
    match sim.snapshot().to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("snapshot serialization failed: {err}"),
    }
}

fn print_snapshot(sim: &mut BattleSim) {
    let snapshot = sim.snapshot();

    for side in ["player", "enemy"] {
        println!("  {side} entities:");
        for entity in snapshot.entities.iter().filter(|e| e.team == side) {
            let label = entity
                .tower
                .as_deref()
                .or(entity.card.as_deref())
                .unwrap_or(entity.kind.as_str());
            println!(
                "    #{} {}: pos=({:.0}, {:.0}) hp={:.0}/{:.0}",
                entity.id, label, entity.x, entity.y, entity.health, entity.max_health
            );
        }
    }
    println!(
        "  elixir: player {:.1} / enemy {:.1}",
        snapshot.player.elixir, snapshot.enemy.elixir
    );
}
