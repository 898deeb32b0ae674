//! Useful structures and tools used across the engine
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Number of tiles along each side of a Region
pub const REGION_SIZE: i32 = 64;
/// Number of planes held by every Region
pub const PLANE_COUNT: i32 = 4;

/// The 8 compass directions an actor can step in.
///
/// [Direction::ALL] holds them in the canonical search order: the four
/// orthogonals followed by the four diagonals
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Reflect)]
pub enum Direction {
	North,
	South,
	East,
	West,
	NorthEast,
	NorthWest,
	SouthEast,
	SouthWest,
}

impl Direction {
	/// Every direction in the order a search expands them
	pub const ALL: [Direction; 8] = [
		Direction::North,
		Direction::South,
		Direction::East,
		Direction::West,
		Direction::NorthEast,
		Direction::NorthWest,
		Direction::SouthEast,
		Direction::SouthWest,
	];
	/// The `(dx, dy)` step of the direction
	pub fn offset(&self) -> (i32, i32) {
		match self {
			Direction::North => (0, 1),
			Direction::South => (0, -1),
			Direction::East => (1, 0),
			Direction::West => (-1, 0),
			Direction::NorthEast => (1, 1),
			Direction::NorthWest => (-1, 1),
			Direction::SouthEast => (1, -1),
			Direction::SouthWest => (-1, -1),
		}
	}
	/// The [Flag] which, when set on a tile, forbids leaving it in this direction
	pub fn flag(&self) -> Flag {
		match self {
			Direction::North => Flag::North,
			Direction::South => Flag::South,
			Direction::East => Flag::East,
			Direction::West => Flag::West,
			Direction::NorthEast => Flag::NorthEast,
			Direction::NorthWest => Flag::NorthWest,
			Direction::SouthEast => Flag::SouthEast,
			Direction::SouthWest => Flag::SouthWest,
		}
	}
	/// Returns the opposite [Direction] of the current
	pub fn inverse(&self) -> Direction {
		match self {
			Direction::North => Direction::South,
			Direction::South => Direction::North,
			Direction::East => Direction::West,
			Direction::West => Direction::East,
			Direction::NorthEast => Direction::SouthWest,
			Direction::NorthWest => Direction::SouthEast,
			Direction::SouthEast => Direction::NorthWest,
			Direction::SouthWest => Direction::NorthEast,
		}
	}
	/// For a diagonal direction get the `(vertical, horizontal)` pair it is
	/// composed of, orthogonal directions return [None]
	pub fn orthogonal_components(&self) -> Option<(Direction, Direction)> {
		match self {
			Direction::NorthEast => Some((Direction::North, Direction::East)),
			Direction::NorthWest => Some((Direction::North, Direction::West)),
			Direction::SouthEast => Some((Direction::South, Direction::East)),
			Direction::SouthWest => Some((Direction::South, Direction::West)),
			_ => None,
		}
	}
	/// For two tiles next to each other on the same plane find the
	/// [Direction] pointing from the `source` to the `target`
	pub fn between(source: Tile, target: Tile) -> Option<Self> {
		if source.get_plane() != target.get_plane() {
			return None;
		}
		let delta = (
			target.get_x().checked_sub(source.get_x())?,
			target.get_y().checked_sub(source.get_y())?,
		);
		Direction::ALL
			.into_iter()
			.find(|direction| direction.offset() == delta)
	}
}

/// How the distance between the player and a tile is measured when deciding
/// whether the tile is close enough to be considered
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Reflect)]
pub enum DistanceMetric {
	/// Straight-line distance between tile centres
	#[default]
	Euclidean,
	/// Largest of the axis deltas, the host client's notion of tile distance
	Chebyshev,
}

impl DistanceMetric {
	/// Measure from `a` to `b` in tiles. Tiles on different planes have no
	/// distance between them and [None] is returned
	pub fn distance(&self, a: Tile, b: Tile) -> Option<f32> {
		if a.get_plane() != b.get_plane() {
			return None;
		}
		let dx = (i64::from(a.get_x()) - i64::from(b.get_x())) as f32;
		let dy = (i64::from(a.get_y()) - i64::from(b.get_y())) as f32;
		match self {
			DistanceMetric::Euclidean => Some((dx * dx + dy * dy).sqrt()),
			DistanceMetric::Chebyshev => Some(dx.abs().max(dy.abs())),
		}
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn canonical_order() {
		let result = Direction::ALL;
		let actual = [
			Direction::North,
			Direction::South,
			Direction::East,
			Direction::West,
			Direction::NorthEast,
			Direction::NorthWest,
			Direction::SouthEast,
			Direction::SouthWest,
		];
		assert_eq!(actual, result);
	}
	#[test]
	fn inverse_cancels_offset() {
		for direction in Direction::ALL {
			let (dx, dy) = direction.offset();
			let (ix, iy) = direction.inverse().offset();
			assert_eq!((0, 0), (dx + ix, dy + iy));
		}
	}
	#[test]
	fn diagonal_components() {
		let result = Direction::SouthWest.orthogonal_components();
		let actual = Some((Direction::South, Direction::West));
		assert_eq!(actual, result);
		assert_eq!(None, Direction::East.orthogonal_components());
	}
	#[test]
	fn between_north_east() {
		let source = Tile::new(10, 10, 0);
		let target = Tile::new(11, 11, 0);
		let result = Direction::between(source, target);
		assert_eq!(Some(Direction::NorthEast), result);
	}
	#[test]
	fn between_not_adjacent() {
		let source = Tile::new(10, 10, 0);
		assert_eq!(None, Direction::between(source, Tile::new(12, 10, 0)));
		assert_eq!(None, Direction::between(source, Tile::new(10, 11, 1)));
		assert_eq!(None, Direction::between(source, source));
	}
	#[test]
	fn euclidean_distance() {
		let a = Tile::new(0, 0, 0);
		let b = Tile::new(3, 4, 0);
		let result = DistanceMetric::Euclidean.distance(a, b);
		assert_eq!(Some(5.0), result);
	}
	#[test]
	fn chebyshev_distance() {
		let a = Tile::new(0, 0, 0);
		let b = Tile::new(3, -7, 0);
		let result = DistanceMetric::Chebyshev.distance(a, b);
		assert_eq!(Some(7.0), result);
	}
	#[test]
	fn distance_across_planes() {
		let a = Tile::new(0, 0, 0);
		let b = Tile::new(0, 0, 1);
		assert_eq!(None, DistanceMetric::Euclidean.distance(a, b));
		assert_eq!(None, DistanceMetric::Chebyshev.distance(a, b));
	}
	#[test]
	fn extreme_coordinates() {
		let a = Tile::new(i32::MAX, 0, 0);
		let b = Tile::new(i32::MIN, 0, 0);
		assert_eq!(None, Direction::between(a, b));
		assert_eq!(None, Direction::between(b, a));
		let result = DistanceMetric::Chebyshev.distance(a, b).unwrap();
		assert!(result > 4.0e9);
	}
}
