//! The tiles a player has marked and the subset of them found to be one-click.
//!
//! Marked tiles are persisted relative to the Region they sit in. When a
//! Region has instanced copies elsewhere in the world one persisted record
//! stands for a tile in every copy, so converting records into absolute
//! [Tile]s may yield several tiles per record.
//!

use crate::prelude::*;
use bevy::prelude::*;
use rustc_hash::FxHashSet;

/// A marked tile as it is persisted, relative to its Region
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Reflect)]
pub struct TrackedTile {
	/// Packed region id, `(regionX << 8) | regionY`
	region_id: i32,
	/// Offset from the west edge of the Region
	region_x: i32,
	/// Offset from the south edge of the Region
	region_y: i32,
	/// Vertical level
	plane: i32,
}

impl TrackedTile {
	/// Create a new instance of [TrackedTile]
	pub fn new(region_id: i32, region_x: i32, region_y: i32, plane: i32) -> Self {
		TrackedTile {
			region_id,
			region_x,
			region_y,
			plane,
		}
	}
	/// Record the position of a world [Tile]
	pub fn from_tile(tile: Tile) -> Self {
		let (local_x, local_y) = tile.get_local();
		TrackedTile::new(
			tile.get_region_id().get_packed(),
			local_x as i32,
			local_y as i32,
			tile.get_plane(),
		)
	}
	/// Get the packed region id
	pub fn get_region_id(&self) -> i32 {
		self.region_id
	}
	/// Get the offset within the Region
	pub fn get_region_offset(&self) -> (i32, i32) {
		(self.region_x, self.region_y)
	}
	/// Get the plane
	pub fn get_plane(&self) -> i32 {
		self.plane
	}
	/// The world [Tile] of this record
	pub fn to_tile(&self) -> Tile {
		Tile::from_region(self.region_id, self.region_x, self.region_y, self.plane)
	}
}

/// The set of tiles the player has marked, in absolute coordinates
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct TrackedTiles(FxHashSet<Tile>);

impl TrackedTiles {
	/// Create a new instance of [TrackedTiles]
	pub fn new() -> Self {
		TrackedTiles::default()
	}
	/// Convert persisted records into world tiles. `resolve` returns every
	/// world tile a record's tile stands for, which is just the tile itself
	/// when its Region has no instanced copies
	pub fn rebuild<I>(
		records: impl IntoIterator<Item = TrackedTile>,
		mut resolve: impl FnMut(Tile) -> I,
	) -> Self
	where
		I: IntoIterator<Item = Tile>,
	{
		let mut tracked = TrackedTiles::default();
		for record in records {
			tracked.0.extend(resolve(record.to_tile()));
		}
		tracked
	}
	/// Whether the tile is marked
	pub fn contains(&self, tile: &Tile) -> bool {
		self.0.contains(tile)
	}
	/// Mark a tile, returns `false` if it was already marked
	pub fn insert(&mut self, tile: Tile) -> bool {
		self.0.insert(tile)
	}
	/// Unmark a tile, returns `false` if it was not marked
	pub fn remove(&mut self, tile: &Tile) -> bool {
		self.0.remove(tile)
	}
	/// Swap the whole set for a new one
	pub fn replace(&mut self, tiles: impl IntoIterator<Item = Tile>) {
		self.0.clear();
		self.0.extend(tiles);
	}
	/// Number of marked tiles
	pub fn len(&self) -> usize {
		self.0.len()
	}
	/// Whether nothing is marked
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
	/// Iterate over the marked tiles in no particular order
	pub fn iter(&self) -> impl Iterator<Item = &Tile> {
		self.0.iter()
	}
}

impl FromIterator<Tile> for TrackedTiles {
	fn from_iter<T: IntoIterator<Item = Tile>>(iter: T) -> Self {
		TrackedTiles(iter.into_iter().collect())
	}
}

/// The marked tiles found to be one-click in the latest classification pass
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct OneClickTiles(FxHashSet<Tile>);

impl OneClickTiles {
	/// Create a new instance of [OneClickTiles]
	pub fn new(tiles: FxHashSet<Tile>) -> Self {
		OneClickTiles(tiles)
	}
	/// Get the set of one-click tiles
	pub fn get(&self) -> &FxHashSet<Tile> {
		&self.0
	}
	/// Whether the tile is one-click
	pub fn contains(&self, tile: &Tile) -> bool {
		self.0.contains(tile)
	}
	/// Number of one-click tiles
	pub fn len(&self) -> usize {
		self.0.len()
	}
	/// Whether no tile is one-click
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
	/// Replace the result of the previous pass
	pub fn set(&mut self, tiles: FxHashSet<Tile>) {
		self.0 = tiles;
	}
	/// Forget every one-click tile
	pub fn clear(&mut self) {
		self.0.clear();
	}
	/// The one-click tiles in ascending order, handy for stable output
	pub fn sorted(&self) -> Vec<Tile> {
		let mut tiles: Vec<Tile> = self.0.iter().copied().collect();
		tiles.sort();
		tiles
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn record_to_tile() {
		let record = TrackedTile::new(12850, 22, 18, 0);
		let result = record.to_tile();
		let actual = Tile::new(3222, 3218, 0);
		assert_eq!(actual, result);
	}
	#[test]
	fn tile_to_record() {
		let tile = Tile::new(3222, 3218, 2);
		let result = TrackedTile::from_tile(tile);
		let actual = TrackedTile::new(12850, 22, 18, 2);
		assert_eq!(actual, result);
		assert_eq!(12850, result.get_region_id());
		assert_eq!((22, 18), result.get_region_offset());
		assert_eq!(2, result.get_plane());
		assert_eq!(tile, result.to_tile());
	}
	#[test]
	fn rebuild_without_instances() {
		let records = vec![
			TrackedTile::new(12850, 0, 0, 0),
			TrackedTile::new(12850, 1, 0, 0),
			TrackedTile::new(12850, 1, 0, 0),
		];
		let tracked = TrackedTiles::rebuild(records, |tile| [tile]);
		assert_eq!(2, tracked.len());
		assert!(tracked.contains(&Tile::new(3200, 3200, 0)));
		assert!(tracked.contains(&Tile::new(3201, 3200, 0)));
	}
	#[test]
	fn rebuild_with_instances() {
		// an instanced copy of region (50, 50) lives 6400 tiles to the east
		let records = vec![TrackedTile::new(12850, 5, 5, 0)];
		let tracked = TrackedTiles::rebuild(records, |tile| {
			let copy = Tile::new(tile.get_x() + 6400, tile.get_y(), tile.get_plane());
			vec![tile, copy]
		});
		assert_eq!(2, tracked.len());
		assert!(tracked.contains(&Tile::new(3205, 3205, 0)));
		assert!(tracked.contains(&Tile::new(9605, 3205, 0)));
	}
	#[test]
	fn insert_remove_replace() {
		let mut tracked = TrackedTiles::new();
		assert!(tracked.insert(Tile::new(1, 1, 0)));
		assert!(!tracked.insert(Tile::new(1, 1, 0)));
		assert!(tracked.remove(&Tile::new(1, 1, 0)));
		assert!(tracked.is_empty());
		tracked.replace([Tile::new(2, 2, 0), Tile::new(3, 3, 0)]);
		assert_eq!(2, tracked.len());
		tracked.replace([Tile::new(4, 4, 0)]);
		assert_eq!(1, tracked.len());
		assert!(!tracked.contains(&Tile::new(2, 2, 0)));
	}
	#[test]
	fn one_click_sorted() {
		let tiles: FxHashSet<Tile> = [Tile::new(3, 0, 0), Tile::new(0, 1, 0), Tile::new(0, 0, 0)]
			.into_iter()
			.collect();
		let result = OneClickTiles::new(tiles).sorted();
		let actual = vec![Tile::new(0, 0, 0), Tile::new(0, 1, 0), Tile::new(3, 0, 0)];
		assert_eq!(actual, result);
	}
}
