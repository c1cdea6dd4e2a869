use client_core::{ConversationSession, EvidenceSnippet, GraphNode, Operation, TimelineEntry};
use shared::{
    domain::{CaseScope, NodeId, SourceId},
    protocol::TraceLink,
};

use super::*;

fn node(id: &str, kind: NodeKind) -> GraphNode {
    GraphNode {
        id: NodeId::new(id),
        label: id.to_uppercase(),
        kind,
    }
}

#[test]
fn messages_show_speaker_and_delivery() {
    let mut conversation = ConversationSession::with_greeting("Welcome.");
    conversation.begin("who was at the dock?").expect("begin");

    let greeting = message(&conversation.messages()[0]);
    assert!(greeting.ends_with("Detective AI: Welcome."));

    let pending = message(&conversation.messages()[1]);
    assert!(pending.ends_with("You (sending): who was at the dock?"));
}

#[test]
fn empty_board_prompts_for_a_question() {
    assert_eq!(board(&EvidenceBoard::new()), EMPTY_BOARD);
}

#[test]
fn board_lists_tags_and_previews() {
    let mut evidence = EvidenceBoard::new();
    evidence.merge(vec![
        EvidenceSnippet::new("witness_statement_a.txt", "x".repeat(200)),
        EvidenceSnippet::new("ledger.txt", "paid in cash"),
    ]);

    let rendered = board(&evidence);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "Case Board");
    assert!(lines[1].starts_with(" 1. [witness statement_a] "));
    assert!(lines[1].ends_with(&format!("{}...", "x".repeat(150))));
    assert_eq!(lines[2], " 2. [ledger] paid in cash...");
}

#[test]
fn timeline_rows_keep_backend_order() {
    let mut view = TimelineView::default();
    view.replace(
        CaseScope::All,
        vec![
            TimelineEntry {
                time: "21:40".into(),
                event: "Truck leaves".into(),
                source_id: SourceId::new("gate_log.txt"),
            },
            TimelineEntry {
                time: "20:15".into(),
                event: "Alarm disabled".into(),
                source_id: SourceId::new("alarm.txt"),
            },
        ],
    );

    let rendered = timeline(&view);
    let truck = rendered.find("Truck leaves").expect("truck row");
    let alarm = rendered.find("Alarm disabled").expect("alarm row");
    assert!(truck < alarm);
    assert!(rendered.contains("(gate_log.txt)"));
}

#[test]
fn trace_prints_root_at_centre_and_links() {
    let mut graph = TraceGraph::default();
    graph.replace(
        CaseScope::Named("Harbor".into()),
        vec![node("case", NodeKind::Root), node("ledger", NodeKind::Leaf)],
        vec![TraceLink {
            source: NodeId::new("case"),
            target: NodeId::new("ledger"),
        }],
    );

    let rendered = trace(&graph);
    assert!(rendered.contains("root CASE @ (50.0%, 50.0%)"));
    assert!(rendered.contains("leaf LEDGER @ (85.0%, 50.0%)"));
    assert!(rendered.contains("case -> ledger"));
}

#[test]
fn status_line_reports_session_basics() {
    let state = SessionState::new("hi");
    let line = status_line(&state);
    assert!(line.contains("connecting"));
    assert!(line.contains("case: All"));
    assert!(line.contains("view: board"));
    assert!(line.contains("board: 0/9"));
}

#[test]
fn cases_listing_marks_all_by_default() {
    let state = SessionState::new("hi");
    assert_eq!(cases(&state), "Cases\n * All\n");
}

#[test]
fn announcements_follow_what_changed() {
    let state = SessionState::new("hi");

    assert_eq!(
        announcement(&Applied::Connectivity(ConnectivityStatus::Error), &state),
        vec!["server status: error".to_string()]
    );
    assert_eq!(
        announcement(&Applied::RequestFailed(Operation::Timeline), &state),
        vec!["timeline request failed".to_string()]
    );
    // timeline is not the active view
    assert!(announcement(&Applied::Timeline, &state).is_empty());
    assert!(announcement(&Applied::Ignored, &state).is_empty());
}

#[test]
fn refreshed_case_list_is_announced() {
    let state = SessionState::new("hi");

    assert_eq!(
        announcement(&Applied::Cases { selection_reset: false }, &state),
        vec!["Cases\n * All\n".to_string()]
    );

    let reset = announcement(&Applied::Cases { selection_reset: true }, &state);
    assert_eq!(reset.len(), 2);
    assert_eq!(reset[0], "selected case is no longer available; showing All");
}
