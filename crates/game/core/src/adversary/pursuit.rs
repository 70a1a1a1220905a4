//! Next-node selection.
//!
//! Two layers: [`pursuit_step`] turns a target node into a single bounded
//! graph step, and [`choose_next_node`] decides which target to pursue by
//! blending patrol following with direct pursuit of the player.

use crate::config::AdversaryConfig;
use crate::graph::{NodeGraph, NodeId};
use crate::patrol::{PatrolCursor, PatrolPath};
use crate::rng::RandomSource;

/// Draws attempted by the random-pick branch before falling through.
pub const RANDOM_PICK_ATTEMPTS: usize = 6;

/// Which policy produced a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Branch {
    /// Patrol ignored by the detour roll; pursuing the player directly.
    Detour,
    /// Stepping toward a patrol waypoint.
    Patrol { waypoint: NodeId },
    /// No usable patrol; pursuing the player directly.
    Pursuit,
}

/// Outcome of one think-tick's selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub from: NodeId,
    pub next: NodeId,
    pub branch: Branch,
}

impl Decision {
    /// Whether the decision asks for a move at all.
    pub fn moves(&self) -> bool {
        self.next != self.from
    }
}

fn is_candidate(graph: &NodeGraph, from: NodeId, node: NodeId) -> bool {
    node != from && graph.is_active(node)
}

fn first_active_neighbor(graph: &NodeGraph, from: NodeId) -> Option<NodeId> {
    graph
        .neighbors(from)
        .iter()
        .copied()
        .find(|&n| is_candidate(graph, from, n))
}

/// One greedy, bounded graph step from `from` toward `target`.
///
/// - With probability `random_pick_chance`, up to [`RANDOM_PICK_ATTEMPTS`]
///   uniform neighbor draws; the first active one wins.
/// - Otherwise the closest active neighbor that is strictly closer to `target`
///   than the running best (starting at `from`) and improves on it by no more
///   than `max_step_jump`.
/// - If nothing improves, the first active neighbor.
/// - `from` itself only when it has no active neighbor.
///
/// Self-links and references to unknown nodes are never selected.
pub fn pursuit_step(
    graph: &NodeGraph,
    from: NodeId,
    target: NodeId,
    config: &AdversaryConfig,
    rng: &mut dyn RandomSource,
) -> NodeId {
    let neighbors = graph.neighbors(from);
    if neighbors.is_empty() {
        return from;
    }

    if rng.next_f32() < config.random_pick_chance {
        for _ in 0..RANDOM_PICK_ATTEMPTS {
            let pick = neighbors[rng.index(neighbors.len())];
            if is_candidate(graph, from, pick) {
                return pick;
            }
        }
    }

    let fallback = || first_active_neighbor(graph, from).unwrap_or(from);
    let (Some(from_pos), Some(target_pos)) = (graph.position(from), graph.position(target)) else {
        return fallback();
    };

    let mut best = from;
    let mut best_distance = from_pos.distance(target_pos);
    for &candidate in neighbors {
        if !is_candidate(graph, from, candidate) {
            continue;
        }
        let Some(position) = graph.position(candidate) else {
            continue;
        };
        let d = position.distance(target_pos);
        if d < best_distance && best_distance - d <= config.max_step_jump {
            best = candidate;
            best_distance = d;
        }
    }

    if best == from { fallback() } else { best }
}

/// Upcoming patrol waypoint closest to `player`, scanning `count` entries.
///
/// Inactive and unknown waypoints are skipped; ties keep the first found.
pub fn best_waypoint_ahead(
    graph: &NodeGraph,
    path: &PatrolPath,
    cursor: &PatrolCursor,
    player: NodeId,
    count: usize,
) -> Option<NodeId> {
    let player_pos = graph.position(player)?;
    let mut best = None;
    let mut best_distance = f32::MAX;
    for index in cursor.look_ahead(path, count) {
        let Some(node) = path.get(index) else {
            continue;
        };
        if !graph.is_active(node) {
            continue;
        }
        let Some(position) = graph.position(node) else {
            continue;
        };
        let d = position.distance(player_pos);
        if d < best_distance {
            best_distance = d;
            best = Some(node);
        }
    }
    best
}

/// Picks the node to step to on this think-tick.
///
/// `threat01` is the normalized threat. Draw order: detour roll, then (on the
/// patrol branch) the bias roll, then the draws of [`pursuit_step`].
pub fn choose_next_node(
    graph: &NodeGraph,
    from: NodeId,
    player: NodeId,
    patrol: Option<(&PatrolPath, &PatrolCursor)>,
    threat01: f32,
    config: &AdversaryConfig,
    rng: &mut dyn RandomSource,
) -> Decision {
    let detour = rng.next_f32() < config.detour_chance.at(threat01);

    if !detour
        && config.follow_patrol
        && let Some((path, cursor)) = patrol
        && path.is_valid()
        && let Some(patrol_next) = cursor.next_node(path)
    {
        let best_ahead = best_waypoint_ahead(graph, path, cursor, player, config.look_ahead)
            .unwrap_or(patrol_next);
        let waypoint = if rng.next_f32() < config.player_ward_bias.at(threat01) {
            best_ahead
        } else {
            patrol_next
        };
        return Decision {
            from,
            next: pursuit_step(graph, from, waypoint, config, rng),
            branch: Branch::Patrol { waypoint },
        };
    }

    Decision {
        from,
        next: pursuit_step(graph, from, player, config, rng),
        branch: if detour { Branch::Detour } else { Branch::Pursuit },
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::patrol::PatrolDirection;
    use crate::rng::ScriptedRandom;

    fn deterministic() -> AdversaryConfig {
        AdversaryConfig {
            random_pick_chance: 0.0,
            ..AdversaryConfig::default()
        }
    }

    /// 0-1-2-3-4 along x, one unit apart.
    fn line(n: u32) -> NodeGraph {
        let mut builder = NodeGraph::builder();
        let ids: Vec<_> = (0..n)
            .map(|i| builder.add_node(format!("l{i}"), Vec3::new(i as f32, 0.0, 0.0), true))
            .collect();
        for pair in ids.windows(2) {
            builder.connect(pair[0], pair[1]);
        }
        builder.build().unwrap()
    }

    /// Hub at the origin with spokes at increasing distance toward +x.
    fn star() -> (NodeGraph, [NodeId; 4]) {
        let mut builder = NodeGraph::builder();
        let hub = builder.add_node("hub", Vec3::ZERO, true);
        let near = builder.add_node("near", Vec3::new(2.0, 0.0, 0.0), true);
        let far = builder.add_node("far", Vec3::new(15.0, 0.0, 0.0), true);
        let goal = builder.add_node("goal", Vec3::new(20.0, 0.0, 0.0), true);
        builder.connect(hub, near).connect(hub, far).connect(far, goal);
        (builder.build().unwrap(), [hub, near, far, goal])
    }

    #[test]
    fn greedy_step_moves_one_node_toward_target() {
        let graph = line(5);
        let mut rng = ScriptedRandom::new([0.9]);

        let next = pursuit_step(&graph, NodeId(1), NodeId(4), &deterministic(), &mut rng);
        assert_eq!(next, NodeId(2));
    }

    #[test]
    fn greedy_step_respects_max_jump() {
        let (graph, [hub, near, _, goal]) = star();
        let mut rng = ScriptedRandom::new([0.9]);

        // far improves by 15, near by 2; only near is within the bound.
        let next = pursuit_step(&graph, hub, goal, &deterministic(), &mut rng);
        assert_eq!(next, near);

        let loose = AdversaryConfig {
            max_step_jump: 100.0,
            ..deterministic()
        };
        let next = pursuit_step(&graph, hub, goal, &loose, &mut rng);
        assert_eq!(next, NodeId(2));
    }

    #[test]
    fn greedy_step_never_selects_inactive_neighbors() {
        let mut graph = line(3);
        graph.set_active(NodeId(2), false);
        let mut rng = ScriptedRandom::new([0.9]);

        // 2 is closer but inactive, so the only fallback is 0.
        let next = pursuit_step(&graph, NodeId(1), NodeId(2), &deterministic(), &mut rng);
        assert_eq!(next, NodeId(0));
    }

    #[test]
    fn isolated_node_stays_put() {
        let mut graph = line(2);
        graph.set_active(NodeId(1), false);
        let mut rng = ScriptedRandom::new([0.0]);
        let config = AdversaryConfig {
            random_pick_chance: 1.0,
            ..AdversaryConfig::default()
        };

        assert_eq!(
            pursuit_step(&graph, NodeId(0), NodeId(1), &config, &mut rng),
            NodeId(0)
        );
    }

    #[test]
    fn self_link_is_treated_as_dead_end() {
        let mut builder = NodeGraph::builder();
        let a = builder.add_node("a", Vec3::ZERO, true);
        let b = builder.add_node("b", Vec3::X, true);
        builder.link(a, a);
        builder.link(b, a);
        let graph = builder.build().unwrap();
        let mut rng = ScriptedRandom::new([0.9]);

        assert_eq!(pursuit_step(&graph, a, b, &deterministic(), &mut rng), a);
    }

    #[test]
    fn no_improvement_falls_back_to_first_active_neighbor() {
        let graph = line(5);
        let mut rng = ScriptedRandom::new([0.9]);

        // Already on the target: nothing is strictly closer.
        let next = pursuit_step(&graph, NodeId(2), NodeId(2), &deterministic(), &mut rng);
        assert_eq!(next, NodeId(1));
    }

    #[test]
    fn random_pick_returns_first_active_draw() {
        let mut graph = line(3);
        graph.set_active(NodeId(0), false);
        let config = AdversaryConfig {
            random_pick_chance: 0.5,
            ..AdversaryConfig::default()
        };
        // roll 0.1 < 0.5; first draw hits index 0 (node 0, inactive), second index 1 (node 2).
        let mut rng = ScriptedRandom::new([0.1, 0.2, 0.7]);

        let next = pursuit_step(&graph, NodeId(1), NodeId(0), &config, &mut rng);
        assert_eq!(next, NodeId(2));
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn random_pick_falls_through_after_six_misses() {
        let mut graph = line(3);
        graph.set_active(NodeId(0), false);
        let config = AdversaryConfig {
            random_pick_chance: 0.5,
            ..AdversaryConfig::default()
        };
        // roll, then six draws that all land on the inactive node 0.
        let mut rng = ScriptedRandom::new([0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        let next = pursuit_step(&graph, NodeId(1), NodeId(0), &config, &mut rng);
        assert_eq!(next, NodeId(2));
        assert_eq!(rng.draws(), 7);
    }

    #[test]
    fn without_patrol_decision_pursues_player() {
        let graph = line(5);
        let mut rng = ScriptedRandom::new([0.9]);

        let decision = choose_next_node(
            &graph,
            NodeId(0),
            NodeId(4),
            None,
            0.0,
            &deterministic(),
            &mut rng,
        );

        assert_eq!(decision.branch, Branch::Pursuit);
        assert_eq!(decision.next, NodeId(1));
        assert!(decision.moves());
    }

    #[test]
    fn detour_roll_skips_patrol() {
        let graph = line(5);
        let path = PatrolPath::new(vec![NodeId(2), NodeId(1), NodeId(0)], true);
        let cursor = PatrolCursor::new(0, PatrolDirection::Forward);
        // detour chance at zero threat is 0.05.
        let mut rng = ScriptedRandom::new([0.01, 0.9]);

        let decision = choose_next_node(
            &graph,
            NodeId(2),
            NodeId(4),
            Some((&path, &cursor)),
            0.0,
            &deterministic(),
            &mut rng,
        );

        assert_eq!(decision.branch, Branch::Detour);
        assert_eq!(decision.next, NodeId(3));
    }

    #[test]
    fn low_bias_follows_patrol_order() {
        let graph = line(5);
        let path = PatrolPath::new(vec![NodeId(2), NodeId(1), NodeId(0), NodeId(3)], true);
        let cursor = PatrolCursor::new(0, PatrolDirection::Forward);
        // no detour, bias roll 0.5 > 0.15 keeps the next waypoint.
        let mut rng = ScriptedRandom::new([0.9, 0.5, 0.9]);

        let decision = choose_next_node(
            &graph,
            NodeId(2),
            NodeId(4),
            Some((&path, &cursor)),
            0.0,
            &deterministic(),
            &mut rng,
        );

        assert_eq!(
            decision.branch,
            Branch::Patrol {
                waypoint: NodeId(1)
            }
        );
        assert_eq!(decision.next, NodeId(1));
    }

    #[test]
    fn high_bias_takes_player_ward_waypoint() {
        let graph = line(5);
        let path = PatrolPath::new(vec![NodeId(2), NodeId(1), NodeId(0), NodeId(3)], true);
        let cursor = PatrolCursor::new(0, PatrolDirection::Forward);
        // detour at full threat is 0.35; 0.9 avoids it. bias 0.85; 0.5 takes best-ahead.
        let mut rng = ScriptedRandom::new([0.9, 0.5, 0.9]);

        let decision = choose_next_node(
            &graph,
            NodeId(2),
            NodeId(4),
            Some((&path, &cursor)),
            1.0,
            &deterministic(),
            &mut rng,
        );

        assert_eq!(
            decision.branch,
            Branch::Patrol {
                waypoint: NodeId(3)
            }
        );
        assert_eq!(decision.next, NodeId(3));
    }

    #[test]
    fn best_ahead_skips_inactive_waypoints() {
        let mut graph = line(5);
        graph.set_active(NodeId(3), false);
        let path = PatrolPath::new(vec![NodeId(0), NodeId(3), NodeId(2), NodeId(1)], false);
        let cursor = PatrolCursor::default();

        assert_eq!(
            best_waypoint_ahead(&graph, &path, &cursor, NodeId(4), 3),
            Some(NodeId(2))
        );
        assert_eq!(
            best_waypoint_ahead(&graph, &path, &cursor, NodeId(99), 3),
            None
        );
    }

    #[test]
    fn disabled_patrol_following_pursues_player() {
        let graph = line(5);
        let path = PatrolPath::new(vec![NodeId(0), NodeId(1)], true);
        let cursor = PatrolCursor::default();
        let config = AdversaryConfig {
            follow_patrol: false,
            ..deterministic()
        };
        let mut rng = ScriptedRandom::new([0.9]);

        let decision = choose_next_node(
            &graph,
            NodeId(2),
            NodeId(4),
            Some((&path, &cursor)),
            0.0,
            &config,
            &mut rng,
        );

        assert_eq!(decision.branch, Branch::Pursuit);
        assert_eq!(decision.next, NodeId(3));
    }
}
