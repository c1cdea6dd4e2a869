use super::*;

fn registry_with(names: &[&str]) -> CaseRegistry {
    let mut registry = CaseRegistry::new();
    registry.replace_names(names.iter().map(|n| n.to_string()).collect());
    registry
}

#[test]
fn selection_defaults_to_all() {
    assert_eq!(CaseRegistry::new().selected(), &CaseScope::All);
}

#[test]
fn selecting_unknown_case_is_rejected_and_keeps_selection() {
    let mut registry = registry_with(&["Homicide-12"]);
    registry.select("Homicide-12").expect("known case");

    let err = registry.select("Arson-3").expect_err("unknown case");
    assert!(matches!(err, ClientError::UnknownCase(name) if name == "Arson-3"));
    assert_eq!(
        registry.selected(),
        &CaseScope::Named("Homicide-12".to_string())
    );
}

#[test]
fn all_is_always_selectable() {
    let mut registry = CaseRegistry::new();
    assert_eq!(registry.select("All").expect("all"), &CaseScope::All);
}

#[test]
fn replacing_names_dedups_and_resets_vanished_selection() {
    let mut registry = registry_with(&["Homicide-12", "Arson-3"]);
    registry.select("Arson-3").expect("select");

    let reset = registry.replace_names(vec![
        "Homicide-12".to_string(),
        " Homicide-12 ".to_string(),
        "All".to_string(),
        "Theft-7".to_string(),
    ]);

    assert!(reset);
    assert_eq!(registry.names(), ["Homicide-12", "Theft-7"]);
    assert_eq!(registry.selected(), &CaseScope::All);
}

#[test]
fn tokens_track_latest_per_kind() {
    let mut tokens = RequestTokens::default();
    let first = tokens.issue(FetchKind::Timeline);
    let trace = tokens.issue(FetchKind::Trace);
    let second = tokens.issue(FetchKind::Timeline);

    assert!(second > first);
    assert!(!tokens.is_latest(FetchKind::Timeline, first));
    assert!(tokens.is_latest(FetchKind::Timeline, second));
    assert!(tokens.is_latest(FetchKind::Trace, trace));
}

#[test]
fn views_and_policies_parse_from_text() {
    assert_eq!("Timeline".parse::<ActiveView>(), Ok(ActiveView::Timeline));
    assert!("graph".parse::<ActiveView>().is_err());
    assert_eq!(ActiveView::Board.fetch_kind(), None);
    assert_eq!(
        "arrival-order".parse::<StalePolicy>(),
        Ok(StalePolicy::ArrivalOrder)
    );
}
