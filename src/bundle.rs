//! Components grouped together so a single entity can carry everything the
//! [OneClickTilesPlugin] systems query
//!

use std::path::Path;

use crate::prelude::*;
use bevy::prelude::*;

/// The player's current tile, [None] while the player is not resolved
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub struct PlayerTile(Option<Tile>);

impl PlayerTile {
	/// Create a new instance of [PlayerTile]
	pub fn new(tile: Option<Tile>) -> Self {
		PlayerTile(tile)
	}
	/// Get the tile the player stands on
	pub fn get(&self) -> Option<Tile> {
		self.0
	}
	/// Set the tile the player stands on
	pub fn set(&mut self, tile: Option<Tile>) {
		self.0 = tile;
	}
}

/// Collision data, transports, settings and per-tick state of the one-click
/// tile engine
#[derive(Bundle)]
pub struct OneClickTilesBundle {
	/// Grid movement rules
	collision_map: CollisionMap,
	/// Shortcuts across the grid
	transports: TransportGraph,
	/// Classification tuning
	settings: ReachSettings,
	/// Tiles the player has marked
	tracked: TrackedTiles,
	/// Result of the latest classification pass
	one_click: OneClickTiles,
	/// Where the player is standing
	player: PlayerTile,
}

impl OneClickTilesBundle {
	/// Create a new instance of [OneClickTilesBundle] with nothing tracked and
	/// the player not yet resolved
	pub fn new(
		collision_map: CollisionMap,
		transports: TransportGraph,
		settings: ReachSettings,
	) -> Self {
		OneClickTilesBundle {
			collision_map,
			transports,
			settings,
			tracked: TrackedTiles::default(),
			one_click: OneClickTiles::default(),
			player: PlayerTile::default(),
		}
	}
	/// Create a new instance of [OneClickTilesBundle] from a directory of Region
	/// payloads and a transport list
	pub fn new_from_disk(
		region_directory: impl AsRef<Path>,
		transports_path: impl AsRef<Path>,
		settings: ReachSettings,
	) -> Result<Self, LoadError> {
		let collision_map = CollisionMap::from_dir(region_directory)?;
		let transports = TransportGraph::from_file(transports_path)?;
		Ok(OneClickTilesBundle::new(collision_map, transports, settings))
	}
	/// Start with an initial tracked set and player position
	pub fn with_state(mut self, tracked: TrackedTiles, player: Option<Tile>) -> Self {
		self.tracked = tracked;
		self.player = PlayerTile::new(player);
		self
	}
}
