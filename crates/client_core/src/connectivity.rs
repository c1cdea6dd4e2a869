use std::{fmt, sync::Arc, time::Duration};

use tokio::{
    sync::mpsc::UnboundedSender,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::debug;

use crate::{
    backend::CaseBackend,
    error::{ClientError, Operation},
    events::SessionEvent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityStatus {
    #[default]
    Connecting,
    Connected,
    Error,
}

impl ConnectivityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One health call bounded by `timeout`.
pub async fn check(backend: &dyn CaseBackend, timeout: Duration) -> Result<(), ClientError> {
    match time::timeout(timeout, backend.health()).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(ClientError::request(Operation::Health, &err)),
        Err(_) => Err(ClientError::Connectivity(format!(
            "no health response within {timeout:?}"
        ))),
    }
}

pub async fn probe(backend: &dyn CaseBackend, timeout: Duration) -> ConnectivityStatus {
    match check(backend, timeout).await {
        Ok(()) => ConnectivityStatus::Connected,
        Err(err) => {
            debug!("health probe failed: {err}");
            ConnectivityStatus::Error
        }
    }
}

/// Probes immediately, then once per `interval`, until the session stops
/// listening or the task is aborted.
pub fn spawn_monitor(
    backend: Arc<dyn CaseBackend>,
    interval: Duration,
    probe_timeout: Duration,
    events: UnboundedSender<SessionEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let status = probe(backend.as_ref(), probe_timeout).await;
            if events.send(SessionEvent::Connectivity(status)).is_err() {
                break;
            }
        }
    })
}
