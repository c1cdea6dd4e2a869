use super::*;

fn snippet(id: &str, content: &str) -> EvidenceSnippet {
    EvidenceSnippet::new(id, content)
}

fn ids(snippets: &[EvidenceSnippet]) -> Vec<&str> {
    snippets.iter().map(|s| s.source_id.as_str()).collect()
}

#[test]
fn incoming_snippet_replaces_existing_source_and_moves_to_front() {
    let current = vec![snippet("a", "a1"), snippet("b", "b1"), snippet("c", "c1")];
    let incoming = vec![snippet("b", "b2"), snippet("d", "d1")];

    let merged = merge_snippets(incoming, current);

    assert_eq!(ids(&merged), vec!["b", "d", "a", "c"]);
    assert_eq!(merged[0].content, "b2");
}

#[test]
fn first_duplicate_within_incoming_wins() {
    let merged = merge_snippets(
        vec![snippet("a", "first"), snippet("a", "second"), snippet("b", "b")],
        Vec::new(),
    );
    assert_eq!(ids(&merged), vec!["a", "b"]);
    assert_eq!(merged[0].content, "first");
}

#[test]
fn merge_is_bounded_to_capacity_in_merge_order() {
    let incoming: Vec<_> = (0..12)
        .map(|i| snippet(&format!("doc_{i}.txt"), "x"))
        .collect();
    let mut board = EvidenceBoard::new();
    board.merge(incoming);

    assert_eq!(board.len(), BOARD_CAPACITY);
    let expected: Vec<String> = (0..9).map(|i| format!("doc_{i}.txt")).collect();
    assert_eq!(
        ids(board.snippets()),
        expected.iter().map(String::as_str).collect::<Vec<_>>()
    );
}

#[test]
fn capacity_evicts_oldest_board_entries_first() {
    let mut board = EvidenceBoard::new();
    board.merge((0..9).map(|i| snippet(&format!("old{i}"), "o")).collect());
    board.merge(vec![snippet("new0", "n"), snippet("new1", "n")]);

    assert_eq!(board.len(), BOARD_CAPACITY);
    assert_eq!(ids(&board.snippets()[..3]), vec!["new0", "new1", "old0"]);
    assert!(!board.contains(&SourceId::from("old7")));
    assert!(!board.contains(&SourceId::from("old8")));
}

#[test]
fn merging_nothing_leaves_board_unchanged() {
    let mut board = EvidenceBoard::new();
    board.merge(vec![snippet("a", "1"), snippet("b", "2")]);
    let before = board.clone();

    board.merge(Vec::new());

    assert_eq!(board, before);
}

#[test]
fn tag_and_preview_follow_card_formatting() {
    let long = "x".repeat(400);
    let card = snippet("police_log.txt", &long);
    assert_eq!(card.tag(), "police log");
    assert_eq!(card.preview().chars().count(), 153);
    assert!(card.preview().ends_with("..."));

    let short = snippet("witness_statement_2.txt", "Saw a van.");
    assert_eq!(short.tag(), "witness statement_2");
    assert_eq!(short.preview(), "Saw a van....");
}
