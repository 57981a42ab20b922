//! Session energy use cases.
//!
//! `EnergyMonitor` wraps the domain estimator with a clock, a periodic
//! recompute timer and a watch channel publishing every new snapshot.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use connection_cards_domain::{EnergyEstimator, InteractionKind, InteractionMetrics, SessionEnergy};

use crate::infrastructure::ports::ClockPort;

/// Default period of the recompute timer
pub const DEFAULT_ENERGY_TICK: Duration = Duration::from_secs(30);

/// Live energy state for one play session.
///
/// Timer ticks and interaction events both funnel into the same recompute
/// under one lock, so they can race without corrupting state. Dropping the
/// monitor stops the timer.
pub struct EnergyMonitor {
    estimator: Arc<Mutex<EnergyEstimator>>,
    clock: Arc<dyn ClockPort>,
    sender: Arc<watch::Sender<SessionEnergy>>,
    cancel: CancellationToken,
    timer: Option<JoinHandle<()>>,
}

impl EnergyMonitor {
    /// A monitor without a timer; it recomputes only on interactions.
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        let estimator = EnergyEstimator::new(clock.now());
        let (sender, _) = watch::channel(estimator.snapshot().clone());
        Self {
            estimator: Arc::new(Mutex::new(estimator)),
            clock,
            sender: Arc::new(sender),
            cancel: CancellationToken::new(),
            timer: None,
        }
    }

    /// A monitor that also recomputes every `period`, starting immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(clock: Arc<dyn ClockPort>, period: Duration) -> Self {
        let mut monitor = Self::new(clock);
        monitor.timer = Some(tokio::spawn(run_timer(
            monitor.estimator.clone(),
            monitor.clock.clone(),
            monitor.sender.clone(),
            period,
            monitor.cancel.clone(),
        )));
        tracing::debug!(period_secs = period.as_secs_f64(), "Energy timer started");
        monitor
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<SessionEnergy> {
        self.sender.subscribe()
    }

    pub async fn snapshot(&self) -> SessionEnergy {
        self.estimator.lock().await.snapshot().clone()
    }

    pub async fn level(&self) -> u8 {
        self.estimator.lock().await.level()
    }

    pub async fn metrics(&self) -> InteractionMetrics {
        self.estimator.lock().await.metrics().clone()
    }

    pub async fn recompute(&self) -> SessionEnergy {
        let snapshot = {
            let mut estimator = self.estimator.lock().await;
            estimator
                .recompute(self.clock.now(), self.clock.local_hour())
                .clone()
        };
        self.publish(snapshot)
    }

    /// Fold an answered question or a wildcard into the metrics and recompute.
    pub async fn record_interaction(&self, kind: InteractionKind) -> SessionEnergy {
        let snapshot = {
            let mut estimator = self.estimator.lock().await;
            estimator
                .record_interaction(kind, self.clock.now(), self.clock.local_hour())
                .clone()
        };
        tracing::debug!(?kind, level = snapshot.level, "Interaction recorded");
        self.publish(snapshot)
    }

    /// Players set the level directly; later recomputes keep the bias.
    pub async fn override_level(&self, target: i32) -> SessionEnergy {
        let snapshot = {
            let mut estimator = self.estimator.lock().await;
            estimator.override_level(target, self.clock.now()).clone()
        };
        tracing::info!(target, level = snapshot.level, "Energy overridden");
        self.publish(snapshot)
    }

    /// +1 / -1 adjustment from the energy controls
    pub async fn step(&self, delta: i32) -> SessionEnergy {
        let snapshot = {
            let mut estimator = self.estimator.lock().await;
            estimator.step(delta, self.clock.now()).clone()
        };
        tracing::info!(delta, level = snapshot.level, "Energy adjusted");
        self.publish(snapshot)
    }

    /// Stop the timer. Interactions keep recomputing.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    fn publish(&self, snapshot: SessionEnergy) -> SessionEnergy {
        self.sender.send_replace(snapshot.clone());
        snapshot
    }
}

impl Drop for EnergyMonitor {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_timer(
    estimator: Arc<Mutex<EnergyEstimator>>,
    clock: Arc<dyn ClockPort>,
    sender: Arc<watch::Sender<SessionEnergy>>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Energy timer shutting down");
                break;
            }
            _ = ticker.tick() => {
                let snapshot = {
                    let mut estimator = estimator.lock().await;
                    estimator.recompute(clock.now(), clock.local_hour()).clone()
                };
                tracing::trace!(level = snapshot.level, trend = ?snapshot.trend, "Energy recomputed");
                sender.send_replace(snapshot);
            }
        }
    }
}
