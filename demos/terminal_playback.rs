//! Terminal Playback
//!
//! Plays the contention chain for each reference class and prints the
//! panels a browser front-end would draw.
//!
//! Key concepts:
//! - Shared simulator driven by a cancellable playback task
//! - Class switch resets the session and stops playback
//! - Snapshots as the only interface to the presentation layer
//!
//! Run with: cargo run --example terminal_playback

use aloha_dtmc::catalog::ModelCatalog;
use aloha_dtmc::core::ChainState;
use aloha_dtmc::playback::{self, SharedSimulator};
use aloha_dtmc::simulator::SimulatorBuilder;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const TICK: Duration = Duration::from_millis(100);
const TICKS_PER_CLASS: u32 = 30;

#[tokio::main]
async fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    println!("=== IEEE 802.15.6 DTMC Playback ===\n");

    let catalog = Arc::new(ModelCatalog::reference().unwrap());
    let ids: Vec<_> = catalog.ids().collect();

    let sim = SimulatorBuilder::new(Arc::clone(&catalog))
        .tick_interval(TICK)
        .build()
        .unwrap();
    let sim: SharedSimulator<_> = Arc::new(Mutex::new(sim));

    for id in ids {
        sim.lock().await.set_active_priority(id).unwrap();
        info!("Playing {} for {} ticks", id, TICKS_PER_CLASS);

        let handle = playback::play(Arc::clone(&sim)).await;
        tokio::time::sleep(TICK * TICKS_PER_CLASS + TICK / 2).await;
        handle.pause().await;

        print_panels(&sim).await;
    }

    println!("=== Playback Complete ===");
}

async fn print_panels<U>(sim: &SharedSimulator<U>)
where
    U: aloha_dtmc::simulator::UniformSource,
{
    let guard = sim.lock().await;
    let class = guard.active_class();
    let params = guard.current_params();

    println!("--- {} ---", class.name);
    println!("Current state: {}", guard.current_state());
    println!("Step: {}", guard.step_count());
    println!("Contention probability: {:.3}", params.contention_probability);
    println!("Success probability: {:.4}", params.success_probability);
    println!("Collision probability: {:.4}", params.collision_probability);
    println!("Idle probability: {:.4}", params.idle_probability);
    println!("Steady-state probability: {:.4}", guard.current_steady_state());

    println!("\nEdge shading:");
    for from in ChainState::ALL {
        for to in ChainState::ALL {
            let opacity = guard.transition_opacity(from.index(), to.index(), true);
            if opacity > 0.0 {
                println!("  {from} → {to}: {opacity:.3}");
            }
        }
    }

    println!("\nRecent transitions:");
    for record in guard.recent_transitions(5) {
        println!("  {record}");
    }

    match guard.snapshot().to_json() {
        Ok(json) => println!("\nSnapshot: {} bytes of JSON\n", json.len()),
        Err(err) => println!("\nSnapshot failed: {err}\n"),
    }
}
