//! Logic run once per game tick: take in changes to the tracked tiles and the
//! player's position, then recompute which tracked tiles are one-click
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Replace the tracked tiles of every [OneClickTilesBundle]
#[derive(Event)]
pub struct EventUpdateTrackedTiles {
	/// The full new set of tracked tiles
	tracked: TrackedTiles,
}

impl EventUpdateTrackedTiles {
	/// Create a new instance of [EventUpdateTrackedTiles]
	#[cfg(not(tarpaulin_include))]
	pub fn new(tracked: TrackedTiles) -> Self {
		EventUpdateTrackedTiles { tracked }
	}
	/// Get the new tracked tiles
	#[cfg(not(tarpaulin_include))]
	pub fn get_tracked(&self) -> &TrackedTiles {
		&self.tracked
	}
}

/// The player moved to a tile, or became unavailable with [None]
#[derive(Event)]
pub struct EventPlayerMoved(Option<Tile>);

impl EventPlayerMoved {
	/// Create a new instance of [EventPlayerMoved]
	#[cfg(not(tarpaulin_include))]
	pub fn new(tile: Option<Tile>) -> Self {
		EventPlayerMoved(tile)
	}
	/// Get the player's new tile
	#[cfg(not(tarpaulin_include))]
	pub fn get_tile(&self) -> Option<Tile> {
		self.0
	}
}

/// Read [EventUpdateTrackedTiles] and swap in the newest tracked set
#[cfg(not(tarpaulin_include))]
pub fn process_tracked_tile_updates(
	mut events: EventReader<EventUpdateTrackedTiles>,
	mut query: Query<&mut TrackedTiles>,
) {
	// only the newest set matters
	if let Some(event) = events.read().last() {
		debug!("Tracking {} tiles", event.get_tracked().len());
		for mut tracked in query.iter_mut() {
			*tracked = event.get_tracked().clone();
		}
	}
}

/// Read [EventPlayerMoved] and record where the player now stands
#[cfg(not(tarpaulin_include))]
pub fn process_player_moves(
	mut events: EventReader<EventPlayerMoved>,
	mut query: Query<&mut PlayerTile>,
) {
	if let Some(event) = events.read().last() {
		for mut player in query.iter_mut() {
			player.set(event.get_tile());
		}
	}
}

/// Recompute [OneClickTiles] from scratch. While the player is unavailable the
/// previous result is left untouched
#[cfg(not(tarpaulin_include))]
pub fn update_one_click_tiles(
	mut query: Query<(
		&CollisionMap,
		&TransportGraph,
		&ReachSettings,
		&TrackedTiles,
		&PlayerTile,
		&mut OneClickTiles,
	)>,
) {
	for (collision_map, transports, settings, tracked, player, mut one_click) in query.iter_mut() {
		let Some(player) = player.get() else {
			continue;
		};
		if tracked.is_empty() {
			if !one_click.is_empty() {
				one_click.clear();
			}
			continue;
		}
		let tiles = classify(collision_map, transports, player, tracked, settings);
		one_click.set(tiles);
	}
}
