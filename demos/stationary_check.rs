//! Stationary Distribution Check
//!
//! Compares each class's stored steady-state constants with the
//! distribution solved from its transition matrix, and with the empirical
//! occupancy of a long simulated run.
//!
//! The stored constants stay authoritative for display; this only reports
//! how far they are from the chain as modeled.
//!
//! Run with: cargo run --example stationary_check

use aloha_dtmc::catalog::ModelCatalog;
use aloha_dtmc::core::ChainState;
use aloha_dtmc::simulator::ChainSimulator;
use log::{info, warn};
use simple_logger::SimpleLogger;
use std::sync::Arc;

const RUN_LENGTH: u64 = 200_000;

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let catalog = Arc::new(ModelCatalog::reference().unwrap());
    let mut sim = ChainSimulator::new(Arc::clone(&catalog)).unwrap();

    for class in catalog.classes() {
        sim.set_active_priority(class.id).unwrap();

        let mut occupancy = [0u64; 3];
        for _ in 0..RUN_LENGTH {
            let record = sim.step();
            occupancy[record.to.index()] += 1;
        }

        println!("=== {} ===", class.name);
        println!("{:>6} {:>10} {:>10} {:>10}", "state", "stored", "solved", "simulated");

        let solved = class.stationary_distribution();
        for state in ChainState::ALL {
            let i = state.index();
            let solved_i = solved.map(|pi| format!("{:.6}", pi[i]));
            println!(
                "{:>6} {:>10.6} {:>10} {:>10.6}",
                i,
                class.steady_state[i],
                solved_i.as_deref().unwrap_or("n/a"),
                occupancy[i] as f64 / RUN_LENGTH as f64
            );
        }

        match class.steady_state_deviation() {
            Some(deviation) if deviation > 1e-3 => {
                warn!("{}: stored steady state deviates by {:.6}", class.id, deviation)
            }
            Some(deviation) => info!("{}: stored steady state within {:.6}", class.id, deviation),
            None => warn!("{}: transition matrix has no unique stationary distribution", class.id),
        }
        println!();
    }
}
