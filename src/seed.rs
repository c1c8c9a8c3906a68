use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::graph::{Link, Node};
use crate::vec2::{Vec2, vec2};

/// On-disk seed format. Only `key` and a position are required per node;
/// label and code fall back to the key like nodes placed interactively.
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    nodes: Vec<SeedNode>,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct SeedNode {
    key: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    code: Option<String>,
    position: Vec2,
    #[serde(default)]
    is_input: bool,
    #[serde(default)]
    is_output: bool,
}

impl SeedNode {
    fn into_node(self) -> Node {
        let mut node = Node::new(self.key, self.position);
        if let Some(label) = self.label {
            node.label = label;
        }
        if let Some(code) = self.code {
            node.code = code;
        }
        node.is_input = self.is_input;
        node.is_output = self.is_output;
        node
    }
}

pub fn load_seed(path: &Path) -> Result<(Vec<Node>, Vec<Link>)> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let seed: SeedFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse seed file {}", path.display()))?;

    let mut nodes = Vec::with_capacity(seed.nodes.len());
    for seed_node in seed.nodes {
        if seed_node.key.is_empty() {
            bail!("seed file {} contains a node with an empty key", path.display());
        }
        if !seed_node.position.is_finite() {
            bail!(
                "seed node {} in {} has a non-finite position",
                seed_node.key,
                path.display()
            );
        }
        nodes.push(seed_node.into_node());
    }

    // Dangling link endpoints are tolerated downstream, so they are not an
    // ingest error.
    Ok((nodes, seed.links))
}

/// Built-in demo diagram: an input anchor feeding two stages that join into
/// an output anchor.
pub fn sample() -> (Vec<Node>, Vec<Link>) {
    let mut source = Node::new("source", vec2(280.0, 80.0));
    source.label = "Source".to_owned();
    source.is_input = true;

    let mut parse = Node::new("parse", vec2(160.0, 240.0));
    parse.label = "Parse".to_owned();

    let mut transform = Node::new("transform", vec2(420.0, 260.0));
    transform.label = "Transform".to_owned();

    let mut sink = Node::new("sink", vec2(300.0, 480.0));
    sink.label = "Sink".to_owned();
    sink.is_output = true;

    let links = [
        ("source", "parse"),
        ("source", "transform"),
        ("parse", "sink"),
        ("transform", "sink"),
    ]
    .into_iter()
    .map(|(from, to)| Link {
        from: from.to_owned(),
        to: to.to_owned(),
    })
    .collect();

    (vec![source, parse, transform, sink], links)
}
