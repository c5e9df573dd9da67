use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::domains::simulation::{GameStatus, SimulationEngine, SimulationState};

/// Cancellable periodic tick source.
///
/// Ticks run one after another on a single task, each holding the session
/// lock for its whole body, so two ticks never overlap. Dropping the driver
/// without calling [`TickDriver::stop`] also ends the loop.
pub struct TickDriver {
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
    period: Duration,
}

impl TickDriver {
    pub fn spawn(
        session: Arc<Mutex<SimulationState>>,
        engine: SimulationEngine,
        period: Duration,
    ) -> Self {
        let (stop_sender, stop_receiver) = oneshot::channel();
        let handle = tokio::spawn(drive(session, engine, period, stop_receiver));
        info!(period_ms = period.as_millis() as u64, "tick driver started");
        Self {
            stop: Some(stop_sender),
            handle,
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signals the loop and waits until any tick in flight has returned.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Err(e) = (&mut self.handle).await {
            warn!("tick driver ended abnormally: {}", e);
        }
    }
}

async fn drive(
    session: Arc<Mutex<SimulationState>>,
    engine: SimulationEngine,
    period: Duration,
    mut stop_receiver: oneshot::Receiver<()>,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut stop_receiver => {
                debug!("tick driver received stop signal");
                break;
            }
            _ = interval.tick() => {}
        }

        let report = {
            let mut state = session.lock().await;
            engine.run_tick(&mut state)
        };
        debug!(
            tick = report.tick,
            events = report.events.len(),
            status = ?report.game_status,
            "tick complete"
        );

        if report.game_status != GameStatus::Running {
            if report.is_terminal() {
                info!(tick = report.tick, status = ?report.game_status, "game over, tick driver stopping");
            }
            break;
        }
    }
}
