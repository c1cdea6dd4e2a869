use std::{future::Future, sync::Arc, time::Duration};

use shared::{domain::CaseScope, protocol::ChatResponse};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    backend::{CaseBackend, UploadFile},
    board::EvidenceSnippet,
    cases::{ActiveView, FetchKind, RequestToken, RequestTokens, StalePolicy},
    connectivity,
    conversation::FALLBACK_REPLY,
    error::{ClientError, Operation},
    events::{Applied, SessionEvent},
    state::SessionState,
    timeline::TimelineEntry,
    trace::GraphNode,
};

pub const DEFAULT_GREETING: &str =
    "Welcome, Detective. The evidence files are loaded. What's on your mind?";
pub const INGEST_CONFIRMATION: &str =
    "Evidence re-indexed. Case list and timeline have been refreshed.";

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub greeting: String,
    pub health_interval: Duration,
    pub probe_timeout: Duration,
    pub stale_policy: StalePolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            health_interval: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(5),
            stale_policy: StalePolicy::LatestOnly,
        }
    }
}

/// Owns the session state and is the only place it is mutated.
///
/// Backend calls run as spawned tasks that hold nothing but the backend handle
/// and a sender; their completions come back through [`Self::next_event`] and
/// are applied by [`Self::apply`] in arrival order.
pub struct SessionController {
    backend: Arc<dyn CaseBackend>,
    options: SessionOptions,
    state: SessionState,
    tokens: RequestTokens,
    events_tx: UnboundedSender<SessionEvent>,
    events_rx: UnboundedReceiver<SessionEvent>,
    monitor: Option<JoinHandle<()>>,
    closed: bool,
}

impl SessionController {
    pub fn new(backend: Arc<dyn CaseBackend>, options: SessionOptions) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            state: SessionState::new(&options.greeting),
            options,
            tokens: RequestTokens::default(),
            events_tx,
            events_rx,
            monitor: None,
            closed: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Starts the connectivity monitor and the initial case and timeline loads.
    pub fn start(&mut self) {
        if self.closed {
            return;
        }
        if self.monitor.is_none() {
            info!(
                interval = ?self.options.health_interval,
                "starting connectivity monitor"
            );
            self.monitor = Some(connectivity::spawn_monitor(
                Arc::clone(&self.backend),
                self.options.health_interval,
                self.options.probe_timeout,
                self.events_tx.clone(),
            ));
        }
        self.refresh_cases();
        self.refresh_timeline();
        if self.state.view == ActiveView::Trace {
            self.refresh_trace();
        }
    }

    pub fn send(&mut self, text: &str) -> Result<(), ClientError> {
        self.ensure_open()?;
        let turn = self.state.conversation.begin(text)?;
        let turn_id = turn.id();
        let query = turn.query().to_string();
        debug!(query = %query, "dispatching chat query");

        let backend = Arc::clone(&self.backend);
        self.spawn_request(async move {
            SessionEvent::ChatCompleted {
                turn: turn_id,
                result: backend.chat(&query).await,
            }
        });
        Ok(())
    }

    pub fn select_case(&mut self, name: &str) -> Result<(), ClientError> {
        self.ensure_open()?;
        let selected = self.state.cases.select(name)?;
        info!(case = %selected, "case selected");
        self.reconcile_views();
        Ok(())
    }

    pub fn set_view(&mut self, view: ActiveView) {
        if self.closed {
            return;
        }
        self.state.view = view;
        self.reconcile_views();
    }

    /// Issues the fetch backing the active view for the current selection.
    pub fn reconcile_views(&mut self) {
        match self.state.view.fetch_kind() {
            Some(FetchKind::Timeline) => self.refresh_timeline(),
            Some(FetchKind::Trace) => self.refresh_trace(),
            Some(FetchKind::Cases) | None => {}
        }
    }

    pub fn refresh_cases(&mut self) {
        if self.closed {
            return;
        }
        let token = self.tokens.issue(FetchKind::Cases);
        let backend = Arc::clone(&self.backend);
        self.spawn_request(async move {
            SessionEvent::CasesLoaded {
                token,
                result: backend.list_cases().await,
            }
        });
    }

    pub fn refresh_timeline(&mut self) {
        if self.closed {
            return;
        }
        let token = self.tokens.issue(FetchKind::Timeline);
        let scope = self.state.cases.selected().clone();
        debug!(case_id = %scope, ?token, "requesting timeline");
        let backend = Arc::clone(&self.backend);
        self.spawn_request(async move {
            let result = backend.timeline(&scope).await;
            SessionEvent::TimelineLoaded {
                token,
                scope,
                result,
            }
        });
    }

    pub fn refresh_trace(&mut self) {
        if self.closed {
            return;
        }
        let token = self.tokens.issue(FetchKind::Trace);
        let scope = self.state.cases.selected().clone();
        debug!(case_id = %scope, ?token, "requesting trace");
        let backend = Arc::clone(&self.backend);
        self.spawn_request(async move {
            let result = backend.trace(&scope).await;
            SessionEvent::TraceLoaded {
                token,
                scope,
                result,
            }
        });
    }

    pub fn ingest(&mut self) -> Result<(), ClientError> {
        self.ensure_open()?;
        info!("requesting evidence re-index");
        let backend = Arc::clone(&self.backend);
        self.spawn_request(async move {
            SessionEvent::IngestCompleted {
                result: backend.ingest().await,
            }
        });
        Ok(())
    }

    pub fn upload(&mut self, file: UploadFile) -> Result<(), ClientError> {
        self.ensure_open()?;
        if !file.is_plain_text() {
            return Err(ClientError::UnsupportedUploadType {
                declared: file.declared_type().to_string(),
            });
        }
        if self.state.uploading {
            return Err(ClientError::UploadInProgress);
        }
        self.state.uploading = true;
        info!(filename = %file.filename, bytes = file.bytes.len(), "uploading evidence");

        let backend = Arc::clone(&self.backend);
        self.spawn_request(async move {
            let filename = file.filename.clone();
            SessionEvent::UploadCompleted {
                filename,
                result: backend.upload(file).await,
            }
        });
        Ok(())
    }

    /// Waits for the next completion. Returns `None` once the session is shut down.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        if self.closed {
            return None;
        }
        self.events_rx.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<SessionEvent> {
        if self.closed {
            return None;
        }
        self.events_rx.try_recv().ok()
    }

    /// Receives and applies one completion.
    pub async fn pump(&mut self) -> Option<Applied> {
        let event = self.next_event().await?;
        Some(self.apply(event))
    }

    pub fn apply(&mut self, event: SessionEvent) -> Applied {
        if self.closed {
            return Applied::Ignored;
        }
        match event {
            SessionEvent::Connectivity(status) => {
                if self.state.connectivity == status {
                    return Applied::Ignored;
                }
                debug!(%status, "connectivity changed");
                self.state.connectivity = status;
                Applied::Connectivity(status)
            }
            SessionEvent::CasesLoaded { token, result } => self.apply_cases(token, result),
            SessionEvent::TimelineLoaded {
                token,
                scope,
                result,
            } => {
                let items = match result {
                    Ok(items) => items,
                    Err(err) => {
                        warn!(case_id = %scope, "timeline fetch failed: {err:#}");
                        return Applied::RequestFailed(Operation::Timeline);
                    }
                };
                if !self.accepts(FetchKind::Timeline, token, &scope) {
                    debug!(case_id = %scope, ?token, "discarding stale timeline response");
                    return Applied::Discarded(FetchKind::Timeline);
                }
                let entries = items.into_iter().map(TimelineEntry::from).collect();
                self.state.timeline.replace(scope, entries);
                Applied::Timeline
            }
            SessionEvent::TraceLoaded {
                token,
                scope,
                result,
            } => {
                let trace = match result {
                    Ok(trace) => trace,
                    Err(err) => {
                        warn!(case_id = %scope, "trace fetch failed: {err:#}");
                        return Applied::RequestFailed(Operation::Trace);
                    }
                };
                if !self.accepts(FetchKind::Trace, token, &scope) {
                    debug!(case_id = %scope, ?token, "discarding stale trace response");
                    return Applied::Discarded(FetchKind::Trace);
                }
                let links = trace.parsed_links();
                if links.len() < trace.links.len() {
                    debug!(
                        skipped = trace.links.len() - links.len(),
                        "ignoring trace links without source and target"
                    );
                }
                let nodes = trace.nodes.into_iter().map(GraphNode::from).collect();
                self.state.trace.replace(scope, nodes, links);
                Applied::Trace
            }
            SessionEvent::ChatCompleted { turn, result } => match result {
                Ok(ChatResponse { response, sources }) => {
                    if !self.state.conversation.finalize(turn, response) {
                        return Applied::Ignored;
                    }
                    let incoming: Vec<EvidenceSnippet> =
                        sources.into_iter().map(EvidenceSnippet::from).collect();
                    self.state.board.merge(incoming);
                    self.refresh_timeline();
                    Applied::ChatReply
                }
                Err(err) => {
                    warn!("{}", ClientError::request(Operation::Chat, &err));
                    if !self.state.conversation.fail(turn, FALLBACK_REPLY) {
                        return Applied::Ignored;
                    }
                    Applied::ChatFailed
                }
            },
            SessionEvent::IngestCompleted { result } => match result {
                Ok(()) => {
                    info!("evidence re-index finished");
                    self.refresh_cases();
                    self.refresh_timeline();
                    self.state.conversation.push_assistant(INGEST_CONFIRMATION);
                    Applied::Ingested
                }
                Err(err) => {
                    warn!("{}", ClientError::request(Operation::Ingest, &err));
                    Applied::RequestFailed(Operation::Ingest)
                }
            },
            SessionEvent::UploadCompleted { filename, result } => {
                self.state.uploading = false;
                match result {
                    Ok(()) => {
                        info!(%filename, "evidence uploaded");
                        self.refresh_cases();
                        self.refresh_timeline();
                        self.state.conversation.push_assistant(format!(
                            "Uploaded {filename}. The new evidence has been indexed."
                        ));
                        Applied::Uploaded { filename }
                    }
                    Err(err) => {
                        let err = ClientError::request(Operation::Upload, &err);
                        warn!(%filename, "{err}");
                        self.state
                            .conversation
                            .push_assistant(format!("Upload of {filename} failed: {}", err.reason()));
                        Applied::UploadFailed { filename }
                    }
                }
            }
        }
    }

    /// Stops the monitor and drops every completion still in flight.
    pub fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Some(monitor) = self.monitor.take() {
            monitor.abort();
        }
        self.events_rx.close();
        while self.events_rx.try_recv().is_ok() {}
        info!("session shut down");
    }

    fn apply_cases(
        &mut self,
        token: RequestToken,
        result: anyhow::Result<Vec<String>>,
    ) -> Applied {
        let names = match result {
            Ok(names) => names,
            Err(err) => {
                warn!("{}", ClientError::request(Operation::Cases, &err));
                return Applied::RequestFailed(Operation::Cases);
            }
        };
        if self.options.stale_policy == StalePolicy::LatestOnly
            && !self.tokens.is_latest(FetchKind::Cases, token)
        {
            return Applied::Discarded(FetchKind::Cases);
        }
        let selection_reset = self.state.cases.replace_names(names);
        if selection_reset {
            info!("selected case no longer exists; falling back to All");
            self.reconcile_views();
        }
        Applied::Cases { selection_reset }
    }

    fn accepts(&self, kind: FetchKind, token: RequestToken, scope: &CaseScope) -> bool {
        match self.options.stale_policy {
            StalePolicy::ArrivalOrder => true,
            StalePolicy::LatestOnly => {
                self.tokens.is_latest(kind, token) && self.state.cases.selected() == scope
            }
        }
    }

    fn ensure_open(&self) -> Result<(), ClientError> {
        if self.closed {
            Err(ClientError::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn spawn_request<F>(&self, request: F)
    where
        F: Future<Output = SessionEvent> + Send + 'static,
    {
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let event = request.await;
            // The receiver is closed after shutdown; late completions are dropped.
            let _ = events.send(event);
        });
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(monitor) = self.monitor.take() {
            monitor.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
