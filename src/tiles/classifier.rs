//! Decides which tracked tiles are one-click.
//!
//! A tracked tile `X` is one-click from the player tile `P` when `X` lies
//! within [ReachSettings::get_radius] of `P`, a path from `P` to `X` exists and
//! every tile on that path is itself tracked:
//!
//! ```text
//!  _____ _____ _____
//! |  t  |  t  |  X  |   P -> t -> t -> X, every step tracked, X is one-click
//! |_____|_____|_____|
//! |  P  |     |  Y  |   the shortest path to Y crosses an untracked tile,
//! |_____|_____|_____|   Y is not one-click
//! ```
//!
//! The player's own tile is the first tile of every path. By default it has
//! to be tracked as well, [ReachSettings::get_require_tracked_start] exempts it.
//!

use crate::prelude::*;
use bevy::prelude::*;
use rustc_hash::FxHashSet;

/// Tuning of a classification pass
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ReachSettings {
	/// Tracked tiles must be strictly closer than this to the player
	radius: f32,
	/// How distance to the player is measured
	metric: DistanceMetric,
	/// Limits on each path search
	budget: SearchBudget,
	/// Whether the player's tile must be tracked for any path to count
	require_tracked_start: bool,
}

impl Default for ReachSettings {
	fn default() -> Self {
		ReachSettings {
			radius: 32.0,
			metric: DistanceMetric::default(),
			budget: SearchBudget::default(),
			require_tracked_start: true,
		}
	}
}

impl ReachSettings {
	/// Create a new instance of [ReachSettings]
	pub fn new(
		radius: f32,
		metric: DistanceMetric,
		budget: SearchBudget,
		require_tracked_start: bool,
	) -> Self {
		ReachSettings {
			radius,
			metric,
			budget,
			require_tracked_start,
		}
	}
	/// Get the consideration radius
	pub fn get_radius(&self) -> f32 {
		self.radius
	}
	/// Get the distance metric
	pub fn get_metric(&self) -> DistanceMetric {
		self.metric
	}
	/// Get the search budget
	pub fn get_budget(&self) -> SearchBudget {
		self.budget
	}
	/// Get whether the player's tile must be tracked
	pub fn get_require_tracked_start(&self) -> bool {
		self.require_tracked_start
	}
	/// Whether `tile` is on the player's plane and strictly inside the radius
	pub fn is_within_radius(&self, player: Tile, tile: Tile) -> bool {
		self.metric
			.distance(player, tile)
			.is_some_and(|distance| distance < self.radius)
	}
	/// Read settings from a ron file
	#[cfg(feature = "ron")]
	pub fn from_ron(path: impl AsRef<std::path::Path>) -> Result<Self, LoadError> {
		let path = path.as_ref();
		let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let settings: ReachSettings =
			ron::de::from_reader(file).map_err(|e| LoadError::Settings {
				path: path.to_path_buf(),
				message: e.to_string(),
			})?;
		info!("Loaded reach settings {:?}", settings);
		Ok(settings)
	}
}

/// Find every tracked tile which is one-click from the `player`. The result
/// is computed from scratch, nothing is carried over from earlier calls
pub fn classify(
	collision_map: &CollisionMap,
	transports: &TransportGraph,
	player: Tile,
	tracked: &TrackedTiles,
	settings: &ReachSettings,
) -> FxHashSet<Tile> {
	let mut one_click = FxHashSet::default();
	// with the start required every path fails on its first tile
	if settings.get_require_tracked_start() && !tracked.contains(&player) {
		debug!("Player tile {:?} is not tracked, nothing is one-click", player);
		return one_click;
	}
	let pathfinder = Pathfinder::new(collision_map, transports, settings.get_budget());
	let mut candidates = 0;
	for tile in tracked.iter() {
		if !settings.is_within_radius(player, *tile) {
			continue;
		}
		candidates += 1;
		if let SearchOutcome::Found(path) = pathfinder.find_path(player, *tile) {
			let skip = usize::from(!settings.get_require_tracked_start());
			if path.iter().skip(skip).all(|step| tracked.contains(step)) {
				one_click.insert(*tile);
			}
		}
	}
	debug!(
		"{} of {} candidate tiles are one-click from {:?}",
		one_click.len(),
		candidates,
		player
	);
	one_click
}
