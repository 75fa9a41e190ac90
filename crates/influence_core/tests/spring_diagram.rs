//! End-to-end walk through the spring influence diagram
//!
//! Mirrors the caller flow: build the component chain, add the spring term on
//! top, loop position back into the displacement, then swap every word label
//! for its symbol.

use influence_core::{
    CorridorAxis, DiagramBuilder, DiagramError, RevealStep, Side, SymbolStyle,
};

const COMPONENTS: [&str; 4] = ["Force", "Acceleration", "Velocity", "Position"];

#[test]
fn build_chain_matches_component_model() {
    let chain = DiagramBuilder::default().build_chain(&COMPONENTS).unwrap();

    assert_eq!(chain.len(), 4);
    assert_eq!(chain.connectors().count(), 3);
    assert_eq!(chain.head().unwrap().label(), "Force");

    let tops: Vec<f32> = chain.nodes().map(|n| n.position().y).collect();
    let pitch = chain.config().pitch();
    for pair in tops.windows(2) {
        assert!(pair[0] > pair[1]);
        assert!((pair[0] - pair[1] - pitch).abs() < 1e-5);
    }
}

#[test]
fn spring_term_goes_on_top() {
    let mut chain = DiagramBuilder::default().build_chain(&COMPONENTS).unwrap();
    let force = chain.head().unwrap().id();

    chain.insert_head("Spring Stuff").unwrap();

    assert_eq!(chain.len(), 5);
    assert_eq!(chain.node(0).unwrap().label(), "Spring Stuff");
    assert_eq!(chain.node(1).unwrap().label(), "Force");
    assert_eq!(chain.node(1).unwrap().id(), force);
    assert_eq!(
        chain.relabel(10, "x"),
        Err(DiagramError::IndexOutOfRange { index: 10, len: 5 })
    );
}

#[test]
fn feedback_loops_position_back_to_displacement() {
    let mut chain = DiagramBuilder::default().build_chain(&COMPONENTS).unwrap();
    chain.insert_head("Spring Stuff").unwrap();
    chain.relabel(0, "Spring Displacement").unwrap();

    let route = chain
        .compute_feedback_route(4, 0, 1.3, CorridorAxis::Horizontal)
        .unwrap();

    let stand_off = chain.config().stand_off;
    let tail = chain.node(4).unwrap().bounds();
    let head = chain.node(0).unwrap().bounds();

    assert_eq!(route.points.len(), 4);
    assert_eq!(route.start(), tail.edge(Side::Left).offset(-stand_off, 0.0));
    assert_eq!(route.end(), head.edge(Side::Left).offset(-stand_off, 0.0));
    assert!(route.is_axis_aligned());

    // The bend happens in the corridor, left of every node.
    let corridor_x = route.points[1].x;
    assert_eq!(route.points[2].x, corridor_x);
    assert!(chain.nodes().all(|n| n.bounds().min_x() > corridor_x));
    for node in chain.nodes() {
        for (a, b) in route.segments() {
            assert!(!node.bounds().intersects_segment(a, b));
        }
    }
}

#[test]
fn words_become_symbols() {
    let mut chain = DiagramBuilder::default()
        .build_chain(&[
            "Node Force",
            "Node Acceleration",
            "Node Velocity",
            "Node Position",
        ])
        .unwrap();
    chain.insert_head("Spring Displacement").unwrap();
    chain
        .attach_feedback(4, 0, 1.3, CorridorAxis::Horizontal)
        .unwrap();

    let symbols = [r"\Delta x", r"\vec{F}", r"\vec{a}", r"\vec{v}", r"\vec{x}"];
    let style = SymbolStyle::KeepSubject {
        separator: " ".to_string(),
    };
    let plan = chain.symbol_transition_with(&symbols, &style).unwrap();
    let targets: Vec<String> = plan.iter().map(|r| r.to.clone()).collect();

    chain.apply_relabels(&plan).unwrap();
    assert_eq!(chain.labels(), targets);
    assert_eq!(chain.node(2).unwrap().label(), r"Node \vec{a}");

    // Relabeling never moves anything, so the feedback connector is the last
    // thing revealed and still ends at the head.
    let steps = chain.reveal_sequence();
    assert_eq!(steps.len(), 5 + 4 + 1);
    assert!(matches!(steps.last(), Some(RevealStep::Connector(_))));
}

#[test]
fn damping_branch_hangs_off_the_chain() {
    let mut chain = DiagramBuilder::default().build_chain(&COMPONENTS).unwrap();
    chain.insert_head("Spring Displacement").unwrap();
    chain.translate(-1.0, 0.0).unwrap();

    let branch = chain
        .side_branch("Spring Damping", 0, 2, 4.0, Side::Right)
        .unwrap();

    assert_eq!(branch.source, chain.node(0).unwrap().id());
    assert_eq!(branch.target, chain.node(2).unwrap().id());
    assert!(chain
        .nodes()
        .all(|n| n.bounds().max_x() < branch.bounds.min_x()));
    assert_eq!(chain.len(), 5);
    assert_eq!(chain.connectors().count(), 4);
}
