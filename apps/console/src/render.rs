//! Text rendering of the session for the terminal.

use std::fmt::Write as _;

use client_core::{
    ActiveView, Applied, ConnectivityStatus, Delivery, EvidenceBoard, Message, SessionState,
    TimelineView, TraceGraph, BOARD_CAPACITY,
};
use shared::domain::{NodeKind, Role};

pub const SEARCHING: &str = "Searching files...";
const EMPTY_BOARD: &str = "Ask a question to pin evidence to the board.";

pub fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Detective AI",
    }
}

pub fn message(message: &Message) -> String {
    let marker = match message.delivery {
        Some(Delivery::Provisional) => " (sending)",
        Some(Delivery::Unanswered) => " (no answer)",
        Some(Delivery::Answered) | None => "",
    };
    format!(
        "[{}] {}{}: {}",
        message.sent_at.format("%H:%M"),
        speaker(message.role),
        marker,
        message.content
    )
}

pub fn status_line(state: &SessionState) -> String {
    let dot = match state.connectivity() {
        ConnectivityStatus::Connected => "●",
        ConnectivityStatus::Connecting => "◌",
        ConnectivityStatus::Error => "✕",
    };
    let mut line = format!(
        "{dot} {} | case: {} | view: {} | board: {}/{}",
        state.connectivity(),
        state.cases().selected(),
        state.view(),
        state.board().len(),
        BOARD_CAPACITY
    );
    if state.conversation().is_pending() {
        line.push_str(" | waiting for reply");
    }
    if state.is_uploading() {
        line.push_str(" | uploading");
    }
    line
}

pub fn board(board: &EvidenceBoard) -> String {
    if board.is_empty() {
        return EMPTY_BOARD.to_string();
    }
    let mut out = String::from("Case Board\n");
    for (index, snippet) in board.snippets().iter().enumerate() {
        let _ = writeln!(out, "{:>2}. [{}] {}", index + 1, snippet.tag(), snippet.preview());
    }
    out
}

pub fn timeline(view: &TimelineView) -> String {
    let mut out = String::from("Detective's Timeline\n");
    if view.entries().is_empty() {
        out.push_str("No events recorded for this case.\n");
        return out;
    }
    for entry in view.entries() {
        let _ = writeln!(out, "  {} | {} ({})", entry.time, entry.event, entry.source_id);
    }
    out
}

pub fn trace(graph: &TraceGraph) -> String {
    let mut out = String::from("Evidence Trace\n");
    let placements = graph.layout();
    if placements.is_empty() {
        out.push_str("No trace available for this case.\n");
        return out;
    }
    for placement in &placements {
        let kind = match placement.kind {
            NodeKind::Root => "root",
            NodeKind::Leaf => "leaf",
        };
        let _ = writeln!(
            out,
            "  {kind:<4} {} @ ({:.1}%, {:.1}%)",
            placement.label, placement.x_pct, placement.y_pct
        );
    }
    for link in graph.links() {
        let _ = writeln!(out, "  {} -> {}", link.source, link.target);
    }
    out
}

pub fn active_view(state: &SessionState) -> String {
    match state.view() {
        ActiveView::Board => board(state.board()),
        ActiveView::Timeline => timeline(state.timeline()),
        ActiveView::Trace => trace(state.trace()),
    }
}

pub fn cases(state: &SessionState) -> String {
    let selected = state.cases().selected();
    let mut out = String::from("Cases\n");
    let mark = |is_selected: bool| if is_selected { '*' } else { ' ' };
    let _ = writeln!(out, " {} All", mark(selected.is_all()));
    for name in state.cases().names() {
        let _ = writeln!(out, " {} {name}", mark(selected.name() == Some(name.as_str())));
    }
    out
}

/// Lines to print after a completion has been applied. Empty when nothing
/// user-visible changed.
pub fn announcement(applied: &Applied, state: &SessionState) -> Vec<String> {
    let last_message = || {
        state
            .conversation()
            .messages()
            .last()
            .map(message)
            .into_iter()
            .collect::<Vec<_>>()
    };
    match applied {
        Applied::Connectivity(status) => vec![format!("server status: {status}")],
        Applied::Cases { selection_reset } => {
            let mut lines = Vec::new();
            if *selection_reset {
                lines.push(format!(
                    "selected case is no longer available; showing {}",
                    state.cases().selected()
                ));
            }
            lines.push(cases(state));
            lines
        }
        Applied::Timeline if state.view() == ActiveView::Timeline => {
            vec![timeline(state.timeline())]
        }
        Applied::Trace if state.view() == ActiveView::Trace => vec![trace(state.trace())],
        Applied::Timeline | Applied::Trace => Vec::new(),
        Applied::ChatReply => {
            let mut lines = last_message();
            if state.view() == ActiveView::Board {
                lines.push(board(state.board()));
            }
            lines
        }
        Applied::ChatFailed
        | Applied::Ingested
        | Applied::Uploaded { .. }
        | Applied::UploadFailed { .. } => last_message(),
        Applied::RequestFailed(operation) => vec![format!("{operation} request failed")],
        Applied::Discarded(_) | Applied::Ignored => Vec::new(),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
