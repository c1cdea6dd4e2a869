use super::*;

#[test]
fn begin_rejects_blank_input_without_appending() {
    let mut session = ConversationSession::with_greeting("Welcome, Detective.");
    assert!(matches!(session.begin("   \n\t"), Err(ClientError::EmptyQuery)));
    assert_eq!(session.len(), 1);
    assert!(!session.is_pending());
}

#[test]
fn begin_while_pending_is_a_no_op() {
    let mut session = ConversationSession::new();
    let turn = session.begin("who owns the warehouse?").expect("first turn");

    assert!(matches!(
        session.begin("and the van?"),
        Err(ClientError::ChatPending)
    ));
    assert_eq!(session.len(), 1);
    assert_eq!(turn.query(), "who owns the warehouse?");
}

#[test]
fn finalize_marks_user_message_answered_and_releases_pending() {
    let mut session = ConversationSession::new();
    let turn = session.begin("  where was the suspect?  ").expect("turn");
    assert_eq!(session.messages()[0].content, "where was the suspect?");
    assert_eq!(
        session.messages()[0].delivery,
        Some(Delivery::Provisional)
    );

    assert!(session.finalize(turn.id(), "At the dock [police_log.txt]."));

    assert!(!session.is_pending());
    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].delivery, Some(Delivery::Answered));
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].content, "At the dock [police_log.txt].");
}

#[test]
fn fail_appends_fallback_and_releases_pending() {
    let mut session = ConversationSession::new();
    let turn = session.begin("timeline?").expect("turn");

    assert!(session.fail(turn.id(), FALLBACK_REPLY));

    assert!(!session.is_pending());
    assert_eq!(session.messages()[0].delivery, Some(Delivery::Unanswered));
    assert_eq!(session.messages()[1].content, FALLBACK_REPLY);
}

#[test]
fn resolving_a_stale_turn_is_ignored() {
    let mut session = ConversationSession::new();
    let first = session.begin("one").expect("turn");
    session.finalize(first.id(), "reply one");
    let second = session.begin("two").expect("turn");

    assert!(!session.finalize(first.id(), "late duplicate"));
    assert!(session.is_pending());
    assert_eq!(session.len(), 3);

    assert!(session.finalize(second.id(), "reply two"));
    assert_eq!(session.len(), 4);
}

#[test]
fn sequences_strictly_increase_across_notices_and_turns() {
    let mut session = ConversationSession::with_greeting("hi");
    let turn = session.begin("q").expect("turn");
    session.push_assistant("Evidence re-indexed.");
    session.finalize(turn.id(), "a");

    let sequences: Vec<u64> = session.messages().iter().map(|m| m.sequence).collect();
    assert_eq!(sequences, vec![0, 1, 2, 3]);
}
