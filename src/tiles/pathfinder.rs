//! Breadth-first search from a start tile to a target tile across the
//! [CollisionMap] and [TransportGraph].
//!
//! Every edge, whether a grid step or a transport, costs the same, so the
//! first time the target is discovered the route to it has the fewest
//! possible hops. Neighbours are discovered in [Direction::ALL] order followed
//! by transports in load order, which makes the returned path identical for
//! identical inputs.
//!
//! A search is bounded by a [SearchBudget]: a cap on how many tiles may be
//! visited and optionally on how many hops a path may be. Running out of
//! budget is an ordinary outcome and is reported as no path.
//!

use std::collections::VecDeque;

use crate::prelude::*;
use bevy::prelude::*;
use rustc_hash::FxHashMap;

/// Limits placed on a single search
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
	/// Maximum number of distinct tiles the search may visit, including the start
	max_visited: usize,
	/// Maximum number of hops a path may be
	max_depth: Option<u32>,
}

impl Default for SearchBudget {
	fn default() -> Self {
		SearchBudget {
			max_visited: 8192,
			max_depth: Some(64),
		}
	}
}

impl SearchBudget {
	/// Create a new instance of [SearchBudget]
	pub fn new(max_visited: usize, max_depth: Option<u32>) -> Self {
		SearchBudget {
			max_visited,
			max_depth,
		}
	}
	/// Get the visited tile cap
	pub fn get_max_visited(&self) -> usize {
		self.max_visited
	}
	/// Get the hop cap
	pub fn get_max_depth(&self) -> Option<u32> {
		self.max_depth
	}
}

/// An ordered, non-empty series of tiles from a start to a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePath(Vec<Tile>);

impl TilePath {
	/// Get the tiles of the path
	pub fn get(&self) -> &[Tile] {
		&self.0
	}
	/// Number of tiles on the path, one more than the number of hops
	pub fn len(&self) -> usize {
		self.0.len()
	}
	/// A path always holds at least its start
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
	/// Iterate over the tiles from start to target
	pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
		self.0.iter()
	}
}

/// Result of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
	/// The target was reached
	Found(TilePath),
	/// Every reachable tile was visited without finding the target
	Exhausted {
		/// Tiles visited
		visited: usize,
	},
	/// The search stopped early because of its [SearchBudget]
	BudgetExceeded {
		/// Tiles visited
		visited: usize,
	},
}

impl SearchOutcome {
	/// The path if one was found
	pub fn get_path(&self) -> Option<&TilePath> {
		match self {
			SearchOutcome::Found(path) => Some(path),
			_ => None,
		}
	}
	/// Whether a path was found
	pub fn is_found(&self) -> bool {
		matches!(self, SearchOutcome::Found(_))
	}
}

/// Finds paths between tiles. Borrows the collision data, every search owns
/// its own frontier and visited set
#[derive(Clone, Copy)]
pub struct Pathfinder<'a> {
	/// Grid movement rules
	collision_map: &'a CollisionMap,
	/// Shortcuts layered on top of the grid
	transports: &'a TransportGraph,
	/// Limits applied to each search
	budget: SearchBudget,
}

impl<'a> Pathfinder<'a> {
	/// Create a new instance of [Pathfinder]
	pub fn new(
		collision_map: &'a CollisionMap,
		transports: &'a TransportGraph,
		budget: SearchBudget,
	) -> Self {
		Pathfinder {
			collision_map,
			transports,
			budget,
		}
	}
	/// Get the budget applied to each search
	pub fn get_budget(&self) -> SearchBudget {
		self.budget
	}
	/// Search for the path with the fewest hops from `start` to `target`
	pub fn find_path(&self, start: Tile, target: Tile) -> SearchOutcome {
		if start == target {
			return SearchOutcome::Found(TilePath(vec![start]));
		}
		let outcome = Search::new(self, target).run(start);
		match &outcome {
			SearchOutcome::Found(path) => {
				debug!("Path {:?} -> {:?} found, {} hops", start, target, path.len() - 1)
			}
			SearchOutcome::Exhausted { visited } => {
				debug!("No path {:?} -> {:?}, exhausted after {} tiles", start, target, visited)
			}
			SearchOutcome::BudgetExceeded { visited } => debug!(
				"No path {:?} -> {:?}, budget exceeded after {} tiles",
				start,
				target,
				visited
			),
		}
		outcome
	}
}

/// State of one search invocation
struct Search<'p, 'a> {
	/// The map, transports and budget being searched
	pathfinder: &'p Pathfinder<'a>,
	/// Tile being searched for
	target: Tile,
	/// Tiles waiting to be expanded with their hop count from the start
	frontier: VecDeque<(Tile, u32)>,
	/// Every visited tile and the tile it was discovered from
	predecessors: FxHashMap<Tile, Option<Tile>>,
	/// Whether any tile was skipped because of the hop cap
	pruned: bool,
}

impl<'p, 'a> Search<'p, 'a> {
	/// Create a new instance of [Search]
	fn new(pathfinder: &'p Pathfinder<'a>, target: Tile) -> Self {
		Search {
			pathfinder,
			target,
			frontier: VecDeque::new(),
			predecessors: FxHashMap::default(),
			pruned: false,
		}
	}
	/// Expand the frontier until the target is discovered, the frontier
	/// empties or the budget runs out
	fn run(mut self, start: Tile) -> SearchOutcome {
		let budget = self.pathfinder.budget;
		if budget.get_max_visited() == 0 {
			return SearchOutcome::BudgetExceeded { visited: 0 };
		}
		self.predecessors.insert(start, None);
		self.frontier.push_back((start, 0));
		let mut candidates = Vec::with_capacity(8);
		while let Some((tile, depth)) = self.frontier.pop_front() {
			if budget.get_max_depth().is_some_and(|max| depth >= max) {
				self.pruned = true;
				continue;
			}
			candidates.clear();
			candidates.extend(self.pathfinder.collision_map.get_neighbours(tile));
			candidates.extend_from_slice(self.pathfinder.transports.destinations_from(&tile));
			for next in candidates.iter() {
				if self.predecessors.contains_key(next) {
					continue;
				}
				if self.predecessors.len() >= budget.get_max_visited() {
					return SearchOutcome::BudgetExceeded {
						visited: self.predecessors.len(),
					};
				}
				self.predecessors.insert(*next, Some(tile));
				if *next == self.target {
					return SearchOutcome::Found(self.reconstruct());
				}
				self.frontier.push_back((*next, depth + 1));
			}
		}
		let visited = self.predecessors.len();
		if self.pruned {
			SearchOutcome::BudgetExceeded { visited }
		} else {
			SearchOutcome::Exhausted { visited }
		}
	}
	/// Walk the predecessor links back from the target and reverse them
	fn reconstruct(&self) -> TilePath {
		let mut path = vec![self.target];
		let mut current = self.target;
		while let Some(Some(previous)) = self.predecessors.get(&current) {
			path.push(*previous);
			current = *previous;
		}
		path.reverse();
		TilePath(path)
	}
}
