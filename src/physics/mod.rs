mod forces;

use crate::graph::GraphState;
use crate::vec2::Vec2;

use forces::{attraction_force, repulsion_force};

/// Tuning for one layout step. Distances are in diagram units; `delta_ticks`
/// passed to [`step_layout`] is elapsed time normalized to 60 Hz frames.
#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
    /// `y` forced onto every `is_input` node after the force passes.
    pub top_margin: f64,
    /// `y` forced onto every `is_output` node after the force passes.
    pub bottom_margin: f64,
    /// Link rest length; attraction strength never drops below one full
    /// unit and grows linearly past this distance.
    pub link_length: f64,
    /// Pairwise repulsion reaches zero at this separation.
    pub repulsion_radius: f64,
    /// Divisor shaping how fast repulsion fades toward the radius.
    pub repulsion_falloff: f64,
    /// Upper clamp on `delta_ticks`; larger gaps (a backgrounded session
    /// resuming) would otherwise overshoot wildly.
    pub max_delta: f64,
}

impl LayoutConfig {
    pub const PIN_MARGIN: f64 = 50.0;

    /// Margins derived from a viewport height: inputs pin near the top edge,
    /// outputs near the bottom edge.
    pub fn for_viewport(height: f64) -> Self {
        Self {
            bottom_margin: (height - Self::PIN_MARGIN).max(Self::PIN_MARGIN),
            ..Self::default()
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            top_margin: Self::PIN_MARGIN,
            bottom_margin: 600.0 - Self::PIN_MARGIN,
            link_length: 100.0,
            repulsion_radius: 300.0,
            repulsion_falloff: 150.0,
            max_delta: 10.0,
        }
    }
}

/// Reusable buffers for one step; owned by the pipeline so a tick allocates
/// nothing once the graph stops growing.
#[derive(Clone, Debug, Default)]
pub struct LayoutScratch {
    displacements: Vec<Vec2>,
    positions: Vec<Vec2>,
    held: Vec<bool>,
}

/// Advances every node position by one simulation step.
///
/// Both force passes read the positions the frame started with and
/// accumulate displacements into scratch, so the outcome does not depend on
/// node or link iteration order; the displacements are applied in one go
/// afterwards, followed by the pinning pass. Nodes being dragged or edited
/// hold their position through the force passes but are still pinned.
///
/// Deterministic: identical state and delta produce identical output. The
/// delta is clamped to `(0, max_delta]`; non-finite or non-positive values
/// leave positions untouched so NaN can never enter the state.
pub fn step_layout(
    state: &mut GraphState,
    config: &LayoutConfig,
    scratch: &mut LayoutScratch,
    delta_ticks: f64,
) {
    if !delta_ticks.is_finite() || delta_ticks <= 0.0 {
        pin_anchors(state, config);
        return;
    }
    let delta_ticks = delta_ticks.min(config.max_delta);

    let node_count = state.nodes.len();
    scratch.displacements.clear();
    scratch.displacements.resize(node_count, Vec2::ZERO);
    scratch.positions.clear();
    scratch.positions.reserve(node_count);
    scratch.held.clear();
    scratch.held.reserve(node_count);
    for node in &state.nodes {
        scratch.positions.push(node.position);
        scratch.held.push(state.is_held(&node.key));
    }

    let displacements = &mut scratch.displacements;
    let positions = &scratch.positions;
    let held = &scratch.held;

    for link in &state.links {
        let (Some(&from), Some(&to)) = (
            state.index_by_key.get(&link.from),
            state.index_by_key.get(&link.to),
        ) else {
            // Dangling endpoint: the link contributes nothing.
            continue;
        };
        if from == to {
            continue;
        }

        let force = attraction_force(
            positions[from] - positions[to],
            config.link_length,
            delta_ticks,
        );
        if !held[from] {
            displacements[from] -= force;
        }
        if !held[to] {
            displacements[to] += force;
        }
    }

    for node in 0..node_count {
        for other in 0..node_count {
            if other == node || held[other] {
                continue;
            }
            let force = repulsion_force(
                positions[node] - positions[other],
                config.repulsion_radius,
                config.repulsion_falloff,
                delta_ticks,
            );
            displacements[other] -= force;
        }
    }

    for (node, displacement) in state.nodes.iter_mut().zip(displacements.iter()) {
        if displacement.is_finite() {
            node.position += *displacement;
        }
    }

    pin_anchors(state, config);
}

/// Input nodes anchor to the top margin, output nodes to the bottom margin;
/// `x` stays free, and dragging does not override the pin.
fn pin_anchors(state: &mut GraphState, config: &LayoutConfig) {
    for node in &mut state.nodes {
        if node.is_input {
            node.position.y = config.top_margin;
        }
        if node.is_output {
            node.position.y = config.bottom_margin;
        }
    }
}
