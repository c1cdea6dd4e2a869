use super::*;

const EPS: f64 = 1e-9;

fn node(id: &str, kind: NodeKind) -> GraphNode {
    GraphNode {
        id: NodeId::from(id),
        label: format!("label {id}"),
        kind,
    }
}

fn graph(leaves: usize) -> Vec<GraphNode> {
    let mut nodes = vec![node("query", NodeKind::Root)];
    nodes.extend((0..leaves).map(|i| node(&format!("doc{i}"), NodeKind::Leaf)));
    nodes
}

#[test]
fn root_is_centred_for_any_leaf_count() {
    for leaves in [0, 1, 7] {
        let layout = radial_layout(&graph(leaves));
        let root = &layout[0];
        assert_eq!(root.kind, NodeKind::Root);
        assert_eq!((root.x_pct, root.y_pct), (CENTER_PCT, CENTER_PCT));
        assert_eq!(root.angle, None);
        assert_eq!(layout.len(), leaves + 1);
    }
}

#[test]
fn leaf_angles_are_evenly_spaced_in_arrival_order() {
    let n = 6;
    let layout = radial_layout(&graph(n));
    for (i, placement) in layout.iter().skip(1).enumerate() {
        let expected = (i as f64 / n as f64) * TAU;
        let angle = placement.angle.expect("leaf angle");
        assert!((angle - expected).abs() < EPS, "leaf {i}: {angle} != {expected}");
        let distance = ((placement.x_pct - CENTER_PCT).powi(2)
            + (placement.y_pct - CENTER_PCT).powi(2))
        .sqrt();
        assert!((distance - RING_PCT).abs() < EPS);
    }
}

#[test]
fn single_leaf_sits_to_the_right_of_root() {
    let layout = radial_layout(&graph(1));
    assert!((layout[1].x_pct - (CENTER_PCT + RING_PCT)).abs() < EPS);
    assert!((layout[1].y_pct - CENTER_PCT).abs() < EPS);
}

#[test]
fn root_position_in_list_does_not_shift_leaf_indices() {
    let nodes = vec![
        node("a", NodeKind::Leaf),
        node("query", NodeKind::Root),
        node("b", NodeKind::Leaf),
    ];
    let layout = radial_layout(&nodes);
    assert_eq!(layout[1].kind, NodeKind::Root);
    assert!((layout[0].angle.expect("a") - 0.0).abs() < EPS);
    assert!((layout[2].angle.expect("b") - std::f64::consts::PI).abs() < EPS);
}

#[test]
fn layout_is_deterministic() {
    let nodes = graph(5);
    assert_eq!(radial_layout(&nodes), radial_layout(&nodes));
}

#[test]
fn extra_roots_are_placed_as_leaves() {
    let nodes = vec![
        node("q1", NodeKind::Root),
        node("q2", NodeKind::Root),
        node("doc", NodeKind::Leaf),
    ];
    let layout = radial_layout(&nodes);
    assert_eq!(layout[0].kind, NodeKind::Root);
    assert_eq!(layout[1].kind, NodeKind::Leaf);
    assert!((layout[2].angle.expect("doc") - std::f64::consts::PI).abs() < EPS);
}

#[test]
fn empty_graph_has_empty_layout() {
    assert!(radial_layout(&[]).is_empty());
    assert!(TraceGraph::default().layout().is_empty());
}
