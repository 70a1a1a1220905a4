//! Scene loader.
//!
//! Scenes reference nodes by name. Names are resolved against the node list
//! in file order, so node ids follow the order nodes are declared in.

use std::path::Path;

use anyhow::Context;
use game_core::{GimmickPlacement, HideSpot, NodeGraph, NodeId, PatrolPath, Scene};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeRon {
    name: String,
    position: (f32, f32, f32),
    #[serde(default = "default_true")]
    active: bool,
    /// Hide spot on this node; `Some(false)` places a disabled one.
    #[serde(default)]
    hide: Option<bool>,
    #[serde(default)]
    gimmick: Option<GimmickRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GimmickRon {
    #[serde(default)]
    unlocks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PatrolRon {
    nodes: Vec<String>,
    #[serde(default = "default_true")]
    looped: bool,
}

/// Scene data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SceneRon {
    nodes: Vec<NodeRon>,
    /// Symmetric connections.
    #[serde(default)]
    edges: Vec<(String, String)>,
    /// One-way connections.
    #[serde(default)]
    links: Vec<(String, String)>,
    #[serde(default)]
    patrol: Option<PatrolRon>,
    player_start: String,
    adversary_spawn: (f32, f32, f32),
    #[serde(default)]
    respawn_anchor: Option<(f32, f32, f32)>,
}

fn vec3((x, y, z): (f32, f32, f32)) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Loader for encounter scenes from RON files.
pub struct SceneLoader;

impl SceneLoader {
    /// Load and validate a scene from a RON file.
    pub fn load(path: &Path) -> LoadResult<Scene> {
        let content = read_file(path)?;
        let scene =
            Self::parse(&content).with_context(|| format!("Invalid scene {}", path.display()))?;

        tracing::debug!(
            target: "content::loaders",
            path = %path.display(),
            nodes = scene.graph.len(),
            patrol = scene.patrol.as_ref().map_or(0, PatrolPath::len),
            "Scene loaded"
        );
        Ok(scene)
    }

    /// Parse and validate scene RON from a string.
    pub fn parse(content: &str) -> LoadResult<Scene> {
        let data: SceneRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scene RON: {}", e))?;
        Self::build(data)
    }

    fn build(data: SceneRon) -> LoadResult<Scene> {
        let mut builder = NodeGraph::builder();
        for node in &data.nodes {
            builder.add_node(node.name.clone(), vec3(node.position), node.active);
        }

        let resolve = |name: &str| -> LoadResult<NodeId> {
            builder
                .id_of(name)
                .with_context(|| format!("Unresolved node name '{name}'"))
        };

        let edges = data
            .edges
            .iter()
            .map(|(a, b)| Ok((resolve(a)?, resolve(b)?)))
            .collect::<LoadResult<Vec<_>>>()?;
        let links = data
            .links
            .iter()
            .map(|(a, b)| Ok((resolve(a)?, resolve(b)?)))
            .collect::<LoadResult<Vec<_>>>()?;

        let mut hide_spots = Vec::new();
        let mut gimmicks = Vec::new();
        for node in &data.nodes {
            let id = resolve(&node.name)?;
            if let Some(enabled) = node.hide {
                hide_spots.push(HideSpot { node: id, enabled });
            }
            if let Some(gimmick) = &node.gimmick {
                let unlocks = gimmick
                    .unlocks
                    .iter()
                    .map(|name| resolve(name))
                    .collect::<LoadResult<Vec<_>>>()?;
                gimmicks.push(GimmickPlacement { node: id, unlocks });
            }
        }

        let patrol = data
            .patrol
            .as_ref()
            .map(|p| {
                let nodes = p
                    .nodes
                    .iter()
                    .map(|name| resolve(name))
                    .collect::<LoadResult<Vec<_>>>()?;
                Ok::<_, anyhow::Error>(PatrolPath::new(nodes, p.looped))
            })
            .transpose()?;
        let player_start = resolve(&data.player_start)?;

        for (a, b) in edges {
            builder.connect(a, b);
        }
        for (a, b) in links {
            builder.link(a, b);
        }
        let graph = builder.build()?;

        let scene = Scene {
            graph,
            patrol,
            hide_spots,
            gimmicks,
            player_start,
            adversary_spawn: vec3(data.adversary_spawn),
            respawn_anchor: data.respawn_anchor.map(vec3),
        };
        scene.validate()?;
        Ok(scene)
    }
}
