//! Defines the Bevy [Plugin] for OneClickTiles
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod tick_layer;

/// Ordering of the tick systems: state changes are applied before the
/// classification pass reads them
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	/// Apply tracked tile and player position updates
	Ingest,
	/// Recompute the one-click tiles
	Classify,
}

/// Registers the events and the systems which keep [OneClickTiles] up to date
/// on every entity spawned with a [OneClickTilesBundle]. Systems run in
/// [FixedUpdate], one pass per game tick
pub struct OneClickTilesPlugin;

impl Plugin for OneClickTilesPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<Tile>()
			.register_type::<RegionID>()
			.register_type::<Direction>()
			.register_type::<DistanceMetric>()
			.register_type::<Flag>()
			.register_type::<TrackedTile>()
			.register_type::<PlayerTile>()
			.add_event::<tick_layer::EventUpdateTrackedTiles>()
			.add_event::<tick_layer::EventPlayerMoved>()
			.configure_sets(
				FixedUpdate,
				(OrderingSet::Ingest, OrderingSet::Classify).chain(),
			)
			.add_systems(
				FixedUpdate,
				(
					(
						tick_layer::process_tracked_tile_updates,
						tick_layer::process_player_moves,
					)
						.in_set(OrderingSet::Ingest),
					tick_layer::update_one_click_tiles.in_set(OrderingSet::Classify),
				),
			);
	}
}
