//! Call history — append-only, in-memory log of completed calls with
//! broadcast to subscribers.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use tracing::info;

use super::model::CompletedCall;

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Events published when the history changes.
#[derive(Debug, Clone)]
pub enum HistoryEvent {
    /// A call was appended; `total` is the history length afterwards.
    CallRecorded { call: CompletedCall, total: usize },
}

/// Session-lifetime list of completed calls. Entries are never edited or
/// removed.
pub struct CallHistory {
    calls: RwLock<Vec<CompletedCall>>,
    tx: broadcast::Sender<HistoryEvent>,
}

impl CallHistory {
    pub fn new() -> Arc<Self> {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        Arc::new(Self {
            calls: RwLock::new(Vec::new()),
            tx,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.tx.subscribe()
    }

    /// Append a completed call and notify subscribers.
    pub async fn record(&self, call: CompletedCall) {
        let total = {
            let mut calls = self.calls.write().await;
            calls.push(call.clone());
            calls.len()
        };

        info!(
            outcome = %call.outcome,
            exchanges = call.exchanges(),
            total,
            "Call recorded"
        );

        // ok if nobody is listening
        let _ = self.tx.send(HistoryEvent::CallRecorded { call, total });
    }

    /// Copy of every completed call in insertion order.
    pub async fn snapshot(&self) -> Vec<CompletedCall> {
        self.calls.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.calls.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.calls.read().await.is_empty()
    }
}
