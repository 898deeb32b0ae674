//! Coordinates of tiles and of the Regions which contain them
//!

use crate::prelude::*;
use bevy::prelude::*;

/// A discrete grid cell in the world, `(x, y, plane)`
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct Tile {
	/// Position along the west-east axis
	x: i32,
	/// Position along the south-north axis
	y: i32,
	/// Vertical level of the tile
	plane: i32,
}

impl Tile {
	/// Create a new instance of [Tile]
	pub fn new(x: i32, y: i32, plane: i32) -> Self {
		Tile { x, y, plane }
	}
	/// Get the `x` coordinate
	pub fn get_x(&self) -> i32 {
		self.x
	}
	/// Get the `y` coordinate
	pub fn get_y(&self) -> i32 {
		self.y
	}
	/// Get the plane
	pub fn get_plane(&self) -> i32 {
		self.plane
	}
	/// The tile one step away in `direction`, on the same plane. [None] when
	/// the step would leave the `i32` coordinate space
	pub fn step(&self, direction: Direction) -> Option<Tile> {
		let (dx, dy) = direction.offset();
		Some(Tile::new(
			self.x.checked_add(dx)?,
			self.y.checked_add(dy)?,
			self.plane,
		))
	}
	/// The [RegionID] of the Region holding this tile
	pub fn get_region_id(&self) -> RegionID {
		RegionID::new(
			self.x.div_euclid(REGION_SIZE),
			self.y.div_euclid(REGION_SIZE),
		)
	}
	/// The `(x, y)` offset of this tile from the south-west corner of its Region
	pub fn get_local(&self) -> (usize, usize) {
		(
			self.x.rem_euclid(REGION_SIZE) as usize,
			self.y.rem_euclid(REGION_SIZE) as usize,
		)
	}
	/// Build a tile from a packed region id and an offset within that Region
	pub fn from_region(region_id: i32, region_x: i32, region_y: i32, plane: i32) -> Self {
		let region = RegionID::from_packed(region_id);
		Tile::new(
			region.get_x() * REGION_SIZE + region_x,
			region.get_y() * REGION_SIZE + region_y,
			plane,
		)
	}
}

/// Unique ID of a Region, `(regionX, regionY)`. A Region covers every plane
/// of its `64x64` footprint
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct RegionID((i32, i32));

impl RegionID {
	/// Create a new instance of [RegionID]
	pub fn new(x: i32, y: i32) -> Self {
		RegionID((x, y))
	}
	/// Get the `(x, y)` tuple
	pub fn get(&self) -> (i32, i32) {
		self.0
	}
	/// Get the Region `x`
	pub fn get_x(&self) -> i32 {
		self.0 .0
	}
	/// Get the Region `y`
	pub fn get_y(&self) -> i32 {
		self.0 .1
	}
	/// Decode the host client's packed region id, `(x << 8) | y`
	pub fn from_packed(region_id: i32) -> Self {
		RegionID::new((region_id >> 8) & 0xFF, region_id & 0xFF)
	}
	/// Encode into the host client's packed region id
	pub fn get_packed(&self) -> i32 {
		((self.get_x() & 0xFF) << 8) | (self.get_y() & 0xFF)
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn step_each_direction() {
		let tile = Tile::new(5, 5, 2);
		assert_eq!(Some(Tile::new(5, 6, 2)), tile.step(Direction::North));
		assert_eq!(Some(Tile::new(4, 4, 2)), tile.step(Direction::SouthWest));
		assert_eq!(Some(Tile::new(6, 4, 2)), tile.step(Direction::SouthEast));
	}
	#[test]
	fn step_off_coordinate_space() {
		let tile = Tile::new(i32::MAX, i32::MIN, 0);
		assert_eq!(None, tile.step(Direction::East));
		assert_eq!(None, tile.step(Direction::South));
		assert_eq!(None, tile.step(Direction::NorthEast));
		let actual = Some(Tile::new(i32::MAX - 1, i32::MIN + 1, 0));
		assert_eq!(actual, tile.step(Direction::NorthWest));
	}
	#[test]
	fn region_of_tile() {
		let tile = Tile::new(3222, 3218, 0);
		let result = tile.get_region_id();
		let actual = RegionID::new(50, 50);
		assert_eq!(actual, result);
		assert_eq!((22, 18), tile.get_local());
	}
	#[test]
	fn region_of_negative_tile() {
		let tile = Tile::new(-1, -64, 0);
		let result = tile.get_region_id();
		let actual = RegionID::new(-1, -1);
		assert_eq!(actual, result);
		assert_eq!((63, 0), tile.get_local());
	}
	#[test]
	fn packed_region_id() {
		let region = RegionID::new(50, 50);
		assert_eq!(12850, region.get_packed());
		assert_eq!(region, RegionID::from_packed(12850));
	}
	#[test]
	fn tile_from_region() {
		let result = Tile::from_region(12850, 22, 18, 1);
		let actual = Tile::new(3222, 3218, 1);
		assert_eq!(actual, result);
	}
}
