//! Grid-keyed pipe storage and the symmetric adjacency graph.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use irrigation_core::fixed::GameMinutes;
use irrigation_core::grid::GridPosition;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::pipe::{Pipe, PipeClass};

/// Every pipe on the course, keyed by coordinate.
///
/// Adjacency invariant: pipe A lists B as connected iff B lists A, and
/// that holds exactly when A and B are orthogonal neighbors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipeNetwork {
    #[serde(with = "pipes_as_seq")]
    pipes: BTreeMap<GridPosition, Pipe>,
    /// Timestamp of the last leak check that actually rolled.
    #[serde(default)]
    pub(crate) last_leak_check: Option<GameMinutes>,
}

impl PipeNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay a pipe at `position`, connecting it to every existing orthogonal
    /// neighbor on both sides of each edge.
    ///
    /// Returns `false` and leaves the network untouched if a pipe already
    /// occupies the coordinate.
    pub fn add_pipe(&mut self, position: GridPosition, class: PipeClass, now: GameMinutes) -> bool {
        if self.pipes.contains_key(&position) {
            tracing::warn!(x = position.x, y = position.y, "pipe already present, add ignored");
            return false;
        }

        let mut pipe = Pipe::new(position, class, now);
        for neighbor in position.neighbors_4() {
            if let Some(other) = self.pipes.get_mut(&neighbor) {
                other.connect(position);
                pipe.connect(neighbor);
            }
        }

        tracing::debug!(
            x = position.x,
            y = position.y,
            ?class,
            connections = pipe.connections().len(),
            "pipe added"
        );
        self.pipes.insert(position, pipe);
        true
    }

    /// Remove the pipe at `position` and strip it from its neighbors'
    /// adjacency lists. Returns the removed pipe, or `None` if there was none.
    pub fn remove_pipe(&mut self, position: GridPosition) -> Option<Pipe> {
        let removed = self.pipes.remove(&position)?;
        for neighbor in removed.connections() {
            if let Some(other) = self.pipes.get_mut(neighbor) {
                other.disconnect(position);
            }
        }
        tracing::debug!(x = position.x, y = position.y, "pipe removed");
        Some(removed)
    }

    /// The pipe at `position`, if any.
    pub fn pipe_at(&self, position: GridPosition) -> Option<&Pipe> {
        self.pipes.get(&position)
    }

    pub(crate) fn pipe_at_mut(&mut self, position: GridPosition) -> Option<&mut Pipe> {
        self.pipes.get_mut(&position)
    }

    pub fn contains(&self, position: GridPosition) -> bool {
        self.pipes.contains_key(&position)
    }

    /// All pipes in row-major coordinate order.
    pub fn pipes(&self) -> impl Iterator<Item = &Pipe> {
        self.pipes.values()
    }

    pub(crate) fn pipes_mut(&mut self) -> impl Iterator<Item = &mut Pipe> {
        self.pipes.values_mut()
    }

    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + '_ {
        self.pipes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    /// Timestamp of the last leak check that rolled, if any.
    pub fn last_leak_check(&self) -> Option<GameMinutes> {
        self.last_leak_check
    }

    /// Coordinates of every leaking pipe, in row-major order.
    pub fn leaking_positions(&self) -> Vec<GridPosition> {
        self.pipes
            .values()
            .filter(|p| p.is_leaking())
            .map(|p| p.position())
            .collect()
    }

    // -- Graph queries --

    /// Every pipe reachable from `start` through the adjacency graph,
    /// including `start` itself. Empty if there is no pipe at `start`.
    pub fn reachable_from(&self, start: GridPosition) -> BTreeSet<GridPosition> {
        let mut seen = BTreeSet::new();
        if !self.pipes.contains_key(&start) {
            return seen;
        }
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(pos) = queue.pop_front() {
            let Some(pipe) = self.pipes.get(&pos) else {
                continue;
            };
            for &next in pipe.connections() {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Hop counts from `start` to every pipe reachable from it.
    pub fn hop_distances(&self, start: GridPosition) -> BTreeMap<GridPosition, u32> {
        let mut dist = BTreeMap::new();
        if !self.pipes.contains_key(&start) {
            return dist;
        }
        let mut queue = VecDeque::from([start]);
        dist.insert(start, 0u32);
        while let Some(pos) = queue.pop_front() {
            let here = dist[&pos];
            let Some(pipe) = self.pipes.get(&pos) else {
                continue;
            };
            for &next in pipe.connections() {
                if !dist.contains_key(&next) {
                    dist.insert(next, here + 1);
                    queue.push_back(next);
                }
            }
        }
        dist
    }

    /// Checks the adjacency invariant: every edge is listed on both sides,
    /// only between orthogonal neighbors, and every orthogonal neighbor pair
    /// is connected.
    pub fn is_symmetric(&self) -> bool {
        self.pipes.values().all(|pipe| {
            let listed_ok = pipe.connections().iter().all(|other| {
                pipe.position().is_orthogonally_adjacent(other)
                    && self
                        .pipes
                        .get(other)
                        .is_some_and(|o| o.is_connected_to(pipe.position()))
            });
            let complete = pipe
                .position()
                .neighbors_4()
                .iter()
                .filter(|n| self.pipes.contains_key(n))
                .all(|n| pipe.is_connected_to(*n));
            listed_ok && complete
        })
    }
}

/// Pipes persist as a coordinate-ordered list; the map key is rebuilt from
/// each pipe's own position. Text formats reject struct-typed map keys.
mod pipes_as_seq {
    use super::*;

    pub fn serialize<S: Serializer>(
        pipes: &BTreeMap<GridPosition, Pipe>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(pipes.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<GridPosition, Pipe>, D::Error> {
        let pipes = Vec::<Pipe>::deserialize(deserializer)?;
        Ok(pipes.into_iter().map(|p| (p.position(), p)).collect())
    }
}
