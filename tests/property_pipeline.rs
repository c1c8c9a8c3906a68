use std::collections::HashSet;

use nodeflow::{Command, LayoutConfig, Link, Node, Pipeline, vec2};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Press { pick: u16 },
    Release,
    Drag { x: i16, y: i16 },
    Place { x: i16, y: i16 },
    BeginLink { pick: u16 },
    BeginEdit { pick: u16 },
    CommitEdit { text: String },
    Tick { delta: TickDelta },
}

#[derive(Clone, Copy, Debug)]
enum TickDelta {
    Normal(u8),
    Zero,
    Negative,
    NotANumber,
    Infinite,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u16>().prop_map(|pick| Op::Press { pick }),
        Just(Op::Release),
        (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Op::Drag { x, y }),
        (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Op::Place { x, y }),
        any::<u16>().prop_map(|pick| Op::BeginLink { pick }),
        any::<u16>().prop_map(|pick| Op::BeginEdit { pick }),
        "[a-z]{0,8}".prop_map(|text| Op::CommitEdit { text }),
        tick_strategy().prop_map(|delta| Op::Tick { delta }),
    ]
}

fn tick_strategy() -> impl Strategy<Value = TickDelta> {
    prop_oneof![
        (1u8..=30u8).prop_map(TickDelta::Normal),
        Just(TickDelta::Zero),
        Just(TickDelta::Negative),
        Just(TickDelta::NotANumber),
        Just(TickDelta::Infinite),
    ]
}

fn seed_pipeline() -> Pipeline {
    let mut input = Node::new("in", vec2(100.0, 100.0));
    input.is_input = true;
    let mut output = Node::new("out", vec2(300.0, 500.0));
    output.is_output = true;
    let mid = Node::new("mid", vec2(200.0, 300.0));

    Pipeline::new(
        vec![input, mid, output],
        vec![
            Link { from: "in".to_owned(), to: "mid".to_owned() },
            Link { from: "mid".to_owned(), to: "out".to_owned() },
        ],
        LayoutConfig::default(),
    )
}

fn pick_key(pipeline: &Pipeline, pick: u16) -> Option<String> {
    let nodes = &pipeline.state().nodes;
    if nodes.is_empty() {
        return None;
    }
    // Occasionally aim past the node list to exercise the unknown-key path.
    let span = nodes.len() + 1;
    let index = pick as usize % span;
    nodes.get(index).map(|node| node.key.clone()).or(Some("ghost".to_owned()))
}

fn to_command(pipeline: &Pipeline, op: Op) -> Option<Command> {
    match op {
        Op::Press { pick } => Some(Command::StartDragging {
            key: pick_key(pipeline, pick)?,
        }),
        Op::Release => Some(Command::StopDragging),
        Op::Drag { x, y } => Some(Command::Drag {
            position: vec2(x as f64, y as f64),
        }),
        Op::Place { x, y } => Some(Command::PlaceNode {
            position: vec2(x as f64, y as f64),
        }),
        Op::BeginLink { pick } => Some(Command::StartAddingLink {
            key: pick_key(pipeline, pick)?,
        }),
        Op::BeginEdit { pick } => Some(Command::StartEditing {
            key: pick_key(pipeline, pick)?,
        }),
        Op::CommitEdit { text } => Some(Command::StopEditing { text }),
        Op::Tick { delta } => {
            let delta = match delta {
                TickDelta::Normal(tenths) => tenths as f64 / 10.0,
                TickDelta::Zero => 0.0,
                TickDelta::Negative => -1.0,
                TickDelta::NotANumber => f64::NAN,
                TickDelta::Infinite => f64::INFINITY,
            };
            Some(Command::Tick { delta })
        }
    }
}

fn check_invariants(pipeline: &Pipeline) {
    let state = pipeline.state();

    let mut seen = HashSet::new();
    for node in &state.nodes {
        assert!(seen.insert(node.key.as_str()), "duplicate key {}", node.key);
        assert!(
            node.position.is_finite(),
            "node {} has non-finite position {:?}",
            node.key,
            node.position
        );
    }

    for key in [&state.dragging, &state.adding_link_from, &state.editing_node]
        .into_iter()
        .flatten()
    {
        assert!(state.contains_key(key), "stale interaction key {key}");
    }
}

// Pinning only holds right after a tick; a drag may pull an anchor off its
// row until the next simulation step snaps it back.
fn check_pinning(pipeline: &Pipeline) {
    let state = pipeline.state();
    let config = pipeline.config();
    for node in &state.nodes {
        if node.is_input {
            assert_eq!(node.position.y, config.top_margin, "unpinned input {}", node.key);
        }
        if node.is_output {
            assert_eq!(node.position.y, config.bottom_margin, "unpinned output {}", node.key);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Any command stream keeps the state well formed: finite positions,
    // unique keys, interaction flags that resolve, and append-only node and
    // link collections.
    #[test]
    fn arbitrary_command_streams_keep_state_well_formed(
        ops in prop::collection::vec(op_strategy(), 1..120)
    ) {
        let mut pipeline = seed_pipeline();

        for op in ops {
            let node_count = pipeline.state().node_count();
            let link_count = pipeline.state().link_count();

            let Some(command) = to_command(&pipeline, op) else {
                continue;
            };
            let was_tick = matches!(command, Command::Tick { .. });
            pipeline.apply(command);

            prop_assert!(pipeline.state().node_count() >= node_count);
            prop_assert!(pipeline.state().link_count() >= link_count);
            check_invariants(&pipeline);
            if was_tick {
                check_pinning(&pipeline);
            }
        }

        check_invariants(&pipeline);
        // The snapshot must always be serializable, whatever happened above.
        serde_json::to_string(&pipeline.snapshot()).unwrap();
    }
}
