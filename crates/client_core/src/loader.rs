//! Fetch-on-mount lifecycle for the values list.
//!
//! A [`ValuesLoader`] starts in [`LoadPhase::Loading`] and moves exactly once
//! to `Loaded` or `Failed`. Dropping or unmounting the loader cancels the
//! in-flight fetch; a response that lands afterwards is never applied.

use std::sync::Arc;

use shared::domain::Value;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::ValuesSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    /// Values in server response order.
    Loaded(Vec<Value>),
    Failed(String),
}

impl LoadPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }
}

pub struct ValuesLoader {
    phase_rx: watch::Receiver<LoadPhase>,
    cancel: CancellationToken,
}

impl ValuesLoader {
    /// Starts the single fetch for this mount. Must be called inside a tokio runtime.
    pub fn mount(source: Arc<dyn ValuesSource>) -> Self {
        let (phase_tx, phase_rx) = watch::channel(LoadPhase::Loading);
        let cancel = CancellationToken::new();
        tokio::spawn(run_fetch(source, phase_tx, cancel.clone()));
        Self { phase_rx, cancel }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase_rx.borrow().clone()
    }

    /// Receiver that sees the initial `Loading` and the one transition after it.
    /// The channel closes once the fetch task finishes or is cancelled.
    pub fn subscribe(&self) -> watch::Receiver<LoadPhase> {
        self.phase_rx.clone()
    }

    /// Waits for the terminal phase.
    pub async fn settled(&self) -> LoadPhase {
        let mut rx = self.phase_rx.clone();
        if let Ok(phase) = rx.wait_for(LoadPhase::is_settled).await {
            return phase.clone();
        }
        // Fetch task ended without a transition.
        let phase = rx.borrow().clone();
        phase
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for ValuesLoader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_fetch(
    source: Arc<dyn ValuesSource>,
    phase_tx: watch::Sender<LoadPhase>,
    cancel: CancellationToken,
) {
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("values loader unmounted before the response arrived");
            return;
        }
        // A cancel that is already pending when the response lands wins.
        outcome = source.fetch_values() => outcome,
    };

    let next = match outcome {
        Ok(values) => LoadPhase::Loaded(values),
        Err(err) => {
            error!(kind = ?err.kind(), error = %err, "failed to fetch values");
            LoadPhase::Failed(err.to_string())
        }
    };

    phase_tx.send_if_modified(|phase| {
        if !phase.is_loading() {
            return false;
        }
        *phase = next;
        true
    });
}
