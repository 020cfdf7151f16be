//! Periodic driver for the token lifecycle engine
//!
//! Replaces the original client's recurring UI timer with an explicit tokio
//! task: real elapsed time is measured with [`Instant`] and fed to
//! `engine.tick`, and every resulting snapshot is published on a watch
//! channel for the presentation layer to observe.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use daytoken_core::{DayTokenError, TokenLifecycleEngine, TokenSnapshot};

use crate::error::{Result, ServiceError};

/// Drives an engine's countdown on a fixed cadence.
///
/// Owns the timer resource. [`shutdown`](Self::shutdown) lets an in-flight
/// tick complete, then stops the task; no tick is delivered afterwards.
/// Dropping the ticker without calling `shutdown` still signals the task to
/// stop.
pub struct TokenTicker {
    engine: Arc<TokenLifecycleEngine>,
    snapshot_tx: Arc<watch::Sender<TokenSnapshot>>,
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TokenTicker {
    /// Start the engine and spawn the tick loop.
    ///
    /// Fails if the initial credential cannot be generated; nothing is
    /// spawned in that case.
    pub fn spawn(engine: Arc<TokenLifecycleEngine>, tick_interval: Duration) -> Result<Self> {
        let initial = engine.start()?;
        info!(
            "Token ticker started (cycle {} s, tick every {:?})",
            engine.config().cycle_secs,
            tick_interval
        );

        let (snapshot_tx, _) = watch::channel(initial);
        let snapshot_tx = Arc::new(snapshot_tx);
        let (stop_tx, stop_rx) = oneshot::channel();

        let handle = tokio::spawn(run_loop(
            Arc::clone(&engine),
            Arc::clone(&snapshot_tx),
            tick_interval,
            stop_rx,
        ));

        Ok(Self {
            engine,
            snapshot_tx,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Watch receiver over published snapshots
    pub fn subscribe(&self) -> watch::Receiver<TokenSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// The driven engine
    pub fn engine(&self) -> &Arc<TokenLifecycleEngine> {
        &self.engine
    }

    /// Rotate immediately and publish the fresh snapshot.
    ///
    /// Serializes with the tick loop inside the engine, so a refresh racing
    /// a tick never rotates the same expiry twice.
    pub fn refresh(&self) -> Result<TokenSnapshot> {
        let snapshot = self.engine.manual_refresh()?;
        info!(
            "Manual refresh (token ending *{})",
            snapshot.credential.mask_suffix()
        );
        self.snapshot_tx.send_replace(snapshot.clone());
        Ok(snapshot)
    }

    /// Stop the tick loop and wait for it to finish.
    ///
    /// An in-flight tick completes first; the call cannot deadlock because
    /// the loop never waits on anything but the timer and the stop signal.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle
                .await
                .map_err(|e| ServiceError::TickerTask(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for TokenTicker {
    fn drop(&mut self) {
        // Signal the task even on non-graceful exits
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }
}

async fn run_loop(
    engine: Arc<TokenLifecycleEngine>,
    snapshot_tx: Arc<watch::Sender<TokenSnapshot>>,
    tick_interval: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut interval = tokio::time::interval(tick_interval);
    let mut last = Instant::now();

    loop {
        tokio::select! {
            _ = &mut stop_rx => break,
            _ = interval.tick() => {
                let now = Instant::now();
                let elapsed = now.duration_since(last).as_secs_f64();
                last = now;

                match engine.tick(elapsed) {
                    Ok(snapshot) => {
                        if snapshot.rotated {
                            info!(
                                "Credential rotated (token ending *{})",
                                snapshot.credential.mask_suffix()
                            );
                        }
                        snapshot_tx.send_replace(snapshot);
                    }
                    Err(DayTokenError::GenerationUnavailable(reason)) => {
                        // Rotation deferred; the previous credential stays
                        // visible until a later tick succeeds
                        warn!("Rotation deferred: {}", reason);
                    }
                    Err(e) => {
                        error!("Tick failed: {}", e);
                    }
                }
            }
        }
    }

    debug!("Token ticker stopped");
}
