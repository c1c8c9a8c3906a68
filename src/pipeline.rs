use crate::graph::{GraphState, Link, Node};
use crate::interaction::{Command, apply};
use crate::physics::{LayoutConfig, LayoutScratch};
use crate::snapshot::Snapshot;

/// Owns the one mutable `GraphState` and serializes every mutation: each
/// incoming command is applied synchronously, one at a time, in arrival
/// order, and the state each command observes is the result of the previous
/// one. Collaborators read through [`Pipeline::state`] or take an owned
/// [`Snapshot`]; nothing mutates out of band.
#[derive(Clone, Debug)]
pub struct Pipeline {
    state: GraphState,
    config: LayoutConfig,
    scratch: LayoutScratch,
}

impl Pipeline {
    pub fn new(seed_nodes: Vec<Node>, seed_links: Vec<Link>, config: LayoutConfig) -> Self {
        Self {
            state: GraphState::new(seed_nodes, seed_links),
            config,
            scratch: LayoutScratch::default(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn state(&self) -> &GraphState {
        &self.state
    }

    pub fn apply(&mut self, command: Command) {
        apply(&mut self.state, &self.config, &mut self.scratch, command);
    }

    /// Left fold of an ordered command stream over the current state.
    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.apply(command);
        }
    }

    /// Convenience for the timer collaborator; equivalent to applying
    /// [`Command::Tick`].
    pub fn tick(&mut self, delta: f64) {
        self.apply(Command::Tick { delta });
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }
}
