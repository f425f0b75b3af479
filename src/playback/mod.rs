//! Periodic playback of a shared simulator.
//!
//! The simulator never schedules itself. Playback is a tokio task that
//! ticks at the simulator's configured interval and calls `step()` while
//! the `running` flag holds.
//!
//! # Cancellation
//!
//! Each call to [`play`] opens a new run generation on the simulator.
//! Pausing, resetting, switching class or starting another playback moves
//! the simulator to a later generation, which wakes the superseded task
//! and ends it without a further step. Dropping the [`PlaybackHandle`]
//! also ends the task and clears `running` if its run is still current.
//!
//! # Example
//!
//! ```rust
//! use aloha_dtmc::catalog::ModelCatalog;
//! use aloha_dtmc::playback::{self, SharedSimulator};
//! use aloha_dtmc::simulator::SimulatorBuilder;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio::sync::Mutex;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let catalog = Arc::new(ModelCatalog::reference().unwrap());
//! let sim = SimulatorBuilder::new(catalog)
//!     .tick_interval(Duration::from_millis(10))
//!     .build()
//!     .unwrap();
//! let sim: SharedSimulator<_> = Arc::new(Mutex::new(sim));
//!
//! let handle = playback::play(sim.clone()).await;
//! tokio::time::sleep(Duration::from_millis(35)).await;
//! handle.pause().await;
//!
//! assert!(sim.lock().await.step_count() >= 1);
//! # }
//! ```

use crate::simulator::{ChainSimulator, UniformSource};
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Simulator shared between a presentation layer and its playback task.
pub type SharedSimulator<U> = Arc<Mutex<ChainSimulator<U>>>;

/// Handle to a playback task.
///
/// Dropping the handle ends the task. If its run was still current,
/// `running` is cleared on the way out.
#[derive(Debug)]
pub struct PlaybackHandle<U> {
    sim: SharedSimulator<U>,
    task: JoinHandle<()>,
    generation: u64,
    _release: oneshot::Sender<()>,
}

impl<U: UniformSource> PlaybackHandle<U> {
    /// Clear `running` if this handle's run is still current.
    pub async fn pause(&self) {
        let mut guard = self.sim.lock().await;
        if guard.run_generation() == self.generation {
            guard.set_running(false);
        }
    }

    /// Run generation this playback was started under.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the task is still ticking.
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

/// Mark the simulator running and start stepping it once per configured
/// tick interval. The first step fires one interval after the call.
///
/// Any playback already stepping `sim` is superseded and stops.
pub async fn play<U>(sim: SharedSimulator<U>) -> PlaybackHandle<U>
where
    U: UniformSource + Send + 'static,
{
    let (period, run) = {
        let mut guard = sim.lock().await;
        let run = guard.begin_run();
        (guard.config().tick_interval, run)
    };
    let generation = *run.borrow();
    info!(
        "Playback started (run {}), one step every {:?}",
        generation, period
    );

    let (release, released) = oneshot::channel();
    let task = tokio::spawn(run_ticks(Arc::clone(&sim), period, run, released));
    PlaybackHandle {
        sim,
        task,
        generation,
        _release: release,
    }
}

async fn run_ticks<U: UniformSource>(
    sim: SharedSimulator<U>,
    period: Duration,
    mut run: watch::Receiver<u64>,
    mut released: oneshot::Receiver<()>,
) {
    let generation = *run.borrow_and_update();
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = run.changed() => {
                debug!("Playback run {} superseded", generation);
                return;
            }
            _ = &mut released => {
                let mut guard = sim.lock().await;
                if guard.run_generation() == generation {
                    guard.set_running(false);
                }
                debug!("Playback run {} released at step {}", generation, guard.step_count());
                return;
            }
        }

        let mut guard = sim.lock().await;
        if !guard.is_running() || guard.run_generation() != generation {
            debug!("Playback run {} stopped at step {}", generation, guard.step_count());
            return;
        }
        guard.step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ModelCatalog;
    use crate::simulator::ScriptedSource;

    fn shared() -> SharedSimulator<ScriptedSource> {
        let catalog = Arc::new(ModelCatalog::reference().unwrap());
        let source = ScriptedSource::new(vec![0.5]).unwrap();
        Arc::new(Mutex::new(
            ChainSimulator::with_source(catalog, source).unwrap(),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn play_sets_running() {
        let sim = shared();
        let handle = play(Arc::clone(&sim)).await;

        assert!(sim.lock().await.is_running());
        assert!(handle.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn first_step_waits_one_interval() {
        let sim = shared();
        let _handle = play(Arc::clone(&sim)).await;

        time::sleep(Duration::from_millis(900)).await;
        assert_eq!(sim.lock().await.step_count(), 0);

        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(sim.lock().await.step_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_clears_running_and_stops_task() {
        let sim = shared();
        let handle = play(Arc::clone(&sim)).await;

        time::sleep(Duration::from_millis(1500)).await;
        handle.pause().await;
        time::sleep(Duration::from_secs(5)).await;

        let guard = sim.lock().await;
        assert!(!guard.is_running());
        assert_eq!(guard.step_count(), 1);
        drop(guard);
        assert!(!handle.is_active());
    }
}
