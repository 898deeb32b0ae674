//! The queryable union of every [FlagRegion]. Translates absolute tiles into
//! a Region and local offset and answers whether a tile can be entered and
//! whether an actor can step from one tile to its neighbour.
//!
//! Tiles inside a Region which was never loaded are treated as impassable.
//!
//! Diagonal steps may not cut corners. Stepping north-east from `S` to `T`
//! requires `S` to be able to step north and east, and both corner tiles
//! `A` and `B` to be able to step into `T`:
//!
//! ```text
//!  _____ _____
//! |     |     |
//! |  A  |  T  |
//! |_____|_____|
//! |     |     |
//! |  S  |  B  |
//! |_____|_____|
//! ```
//!

use std::path::{Path, PathBuf};

use crate::prelude::*;
use bevy::prelude::*;

/// World collision data built from compressed Region payloads
#[derive(Component, Debug, Default)]
pub struct CollisionMap {
	/// Lazily decompressed flags of each Region
	store: FlagRegionStore,
}

impl CollisionMap {
	/// Create a new instance of [CollisionMap] from compressed Region payloads
	pub fn new(payloads: impl IntoIterator<Item = (RegionID, Vec<u8>)>) -> Result<Self, LoadError> {
		let store = FlagRegionStore::new(payloads)?;
		info!("Loaded collision map with {} regions", store.region_count());
		Ok(CollisionMap { store })
	}
	/// Create a [CollisionMap] from authored Regions, compressing each of them
	pub fn from_builders<'a>(
		builders: impl IntoIterator<Item = (RegionID, &'a FlagRegionBuilder)>,
	) -> Result<Self, LoadError> {
		let mut payloads = Vec::new();
		for (region, builder) in builders {
			let payload = builder
				.to_payload()
				.map_err(|source| LoadError::Compress { region, source })?;
			payloads.push((region, payload));
		}
		CollisionMap::new(payloads)
	}
	/// From a directory containing one file per Region generate the
	/// [CollisionMap]. Each file is named `{regionX}_{regionY}`, any extension
	/// is ignored
	pub fn from_dir(directory: impl AsRef<Path>) -> Result<Self, LoadError> {
		let directory = directory.as_ref();
		let io_error = |path: &Path| {
			let path = path.to_path_buf();
			move |source: std::io::Error| LoadError::Io { path, source }
		};
		let mut payloads = Vec::new();
		for entry in std::fs::read_dir(directory).map_err(io_error(directory))? {
			let entry = entry.map_err(io_error(directory))?;
			let path = entry.path();
			if !path.is_file() {
				continue;
			}
			let region = region_from_file_name(&path)?;
			let payload = std::fs::read(&path).map_err(io_error(&path))?;
			payloads.push((region, payload));
		}
		CollisionMap::new(payloads)
	}
	/// Get a reference to the underlying [FlagRegionStore]
	pub fn get_store(&self) -> &FlagRegionStore {
		&self.store
	}
	/// Whether `flag` is set on a tile, [None] if the tile's Region is unknown
	pub fn get_flag(&self, tile: Tile, flag: Flag) -> Option<bool> {
		let region = self.store.get(&tile.get_region_id())?;
		Some(region.is_set(tile.get_local(), tile.get_plane(), flag))
	}
	/// True if the tile cannot be entered, either because it is flagged as
	/// [Flag::Blocked] or because its Region is unknown
	pub fn is_blocked(&self, tile: Tile) -> bool {
		self.get_flag(tile, Flag::Blocked).unwrap_or(true)
	}
	/// True if an actor standing on `from` may move to the neighbouring tile in
	/// `direction`
	pub fn can_traverse(&self, from: Tile, direction: Direction) -> bool {
		match direction.orthogonal_components() {
			None => self.can_step(from, direction),
			Some((vertical, horizontal)) => {
				self.can_step(from, direction)
					&& self.can_step(from, vertical)
					&& self.can_step(from, horizontal)
					&& from
						.step(vertical)
						.is_some_and(|corner| self.can_step(corner, horizontal))
					&& from
						.step(horizontal)
						.is_some_and(|corner| self.can_step(corner, vertical))
			}
		}
	}
	/// A single step ignoring corners: the origin is enterable and has no flag
	/// for `direction`, and the destination exists and is enterable
	fn can_step(&self, from: Tile, direction: Direction) -> bool {
		match (
			self.get_flag(from, Flag::Blocked),
			self.get_flag(from, direction.flag()),
		) {
			(Some(false), Some(false)) => from
				.step(direction)
				.is_some_and(|to| !self.is_blocked(to)),
			_ => false,
		}
	}
	/// Every tile reachable in one legal step from `tile`, in canonical
	/// [Direction::ALL] order
	pub fn get_neighbours(&self, tile: Tile) -> Vec<Tile> {
		Direction::ALL
			.iter()
			.filter(|direction| self.can_traverse(tile, **direction))
			.filter_map(|direction| tile.step(*direction))
			.collect()
	}
}

/// Parse a [RegionID] from a file named `{regionX}_{regionY}[.ext]`
fn region_from_file_name(path: &Path) -> Result<RegionID, LoadError> {
	let name_error = || LoadError::RegionName {
		name: path
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_default(),
	};
	let stem = path
		.file_stem()
		.and_then(|s| s.to_str())
		.ok_or_else(name_error)?;
	let (x, y) = stem.split_once('_').ok_or_else(name_error)?;
	let x = x.parse::<i32>().map_err(|_| name_error())?;
	let y = y.parse::<i32>().map_err(|_| name_error())?;
	Ok(RegionID::new(x, y))
}

/// Write a directory of Region payloads in the layout read by
/// [CollisionMap::from_dir]
pub fn write_region_dir<'a>(
	directory: impl AsRef<Path>,
	builders: impl IntoIterator<Item = (RegionID, &'a FlagRegionBuilder)>,
) -> Result<Vec<PathBuf>, LoadError> {
	let directory = directory.as_ref();
	std::fs::create_dir_all(directory).map_err(|source| LoadError::Io {
		path: directory.to_path_buf(),
		source,
	})?;
	let mut written = Vec::new();
	for (region, builder) in builders {
		let payload = builder
			.to_payload()
			.map_err(|source| LoadError::Compress { region, source })?;
		let path = directory.join(format!("{}_{}", region.get_x(), region.get_y()));
		std::fs::write(&path, payload).map_err(|source| LoadError::Io {
			path: path.clone(),
			source,
		})?;
		written.push(path);
	}
	Ok(written)
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;

	/// Region (0, 0) built from `builder`, everything else unknown
	fn map_of(builder: &FlagRegionBuilder) -> CollisionMap {
		CollisionMap::from_builders([(RegionID::new(0, 0), builder)]).unwrap()
	}
	#[test]
	fn open_tile_is_not_blocked() {
		let map = map_of(&FlagRegionBuilder::new());
		assert!(!map.is_blocked(Tile::new(10, 10, 0)));
	}
	#[test]
	fn unknown_region_is_blocked() {
		let map = map_of(&FlagRegionBuilder::new());
		assert!(map.is_blocked(Tile::new(64, 10, 0)));
		assert!(map.is_blocked(Tile::new(-1, 10, 0)));
		assert_eq!(None, map.get_flag(Tile::new(-1, 10, 0), Flag::North));
	}
	#[test]
	fn plane_outside_region_is_blocked() {
		let map = map_of(&FlagRegionBuilder::new());
		assert!(map.is_blocked(Tile::new(10, 10, 4)));
		assert!(map.is_blocked(Tile::new(10, 10, -1)));
	}
	#[test]
	fn cannot_step_into_blocked_tile() {
		let mut builder = FlagRegionBuilder::new();
		builder.block_tile((10, 11), 0);
		let map = map_of(&builder);
		assert!(!map.can_traverse(Tile::new(10, 10, 0), Direction::North));
		assert!(map.can_traverse(Tile::new(10, 10, 0), Direction::South));
	}
	#[test]
	fn cannot_step_off_region_edge() {
		let map = map_of(&FlagRegionBuilder::new());
		assert!(!map.can_traverse(Tile::new(63, 5, 0), Direction::East));
		assert!(map.can_traverse(Tile::new(63, 5, 0), Direction::West));
	}
	#[test]
	fn cannot_step_from_unknown_region() {
		let map = map_of(&FlagRegionBuilder::new());
		assert!(!map.can_traverse(Tile::new(64, 5, 0), Direction::West));
	}
	#[test]
	fn cannot_step_from_blocked_tile() {
		let mut builder = FlagRegionBuilder::new();
		builder.block_tile((10, 10), 0);
		let map = map_of(&builder);
		assert!(!map.can_traverse(Tile::new(10, 10, 0), Direction::North));
	}
	#[test]
	fn directional_flag_on_origin() {
		let mut builder = FlagRegionBuilder::new();
		builder.set_flag((10, 10), 0, Flag::East, true);
		let map = map_of(&builder);
		assert!(!map.can_traverse(Tile::new(10, 10, 0), Direction::East));
		// flags only restrict leaving the tile they are set on
		assert!(map.can_traverse(Tile::new(11, 10, 0), Direction::West));
	}
	#[test]
	fn wall_blocks_both_ways() {
		let mut builder = FlagRegionBuilder::new();
		builder.add_wall((10, 10), 0, Direction::North);
		let map = map_of(&builder);
		assert!(!map.can_traverse(Tile::new(10, 10, 0), Direction::North));
		assert!(!map.can_traverse(Tile::new(10, 11, 0), Direction::South));
	}
	#[test]
	fn diagonal_flag_on_origin() {
		let mut builder = FlagRegionBuilder::new();
		builder.set_flag((10, 10), 0, Flag::SouthWest, true);
		let map = map_of(&builder);
		assert!(!map.can_traverse(Tile::new(10, 10, 0), Direction::SouthWest));
		assert!(map.can_traverse(Tile::new(10, 10, 0), Direction::SouthEast));
	}
	#[test]
	fn corner_cutting_both_corners_blocked() {
		//  _____ _____
		// |  x  |  T  |
		// |_____|_____|
		// |  S  |  x  |
		// |_____|_____|
		let mut builder = FlagRegionBuilder::new();
		builder.block_tile((10, 11), 0);
		builder.block_tile((11, 10), 0);
		let map = map_of(&builder);
		assert!(!map.can_traverse(Tile::new(10, 10, 0), Direction::NorthEast));
		assert!(!map.can_traverse(Tile::new(11, 11, 0), Direction::SouthWest));
	}
	#[test]
	fn corner_cutting_one_corner_blocked() {
		let mut builder = FlagRegionBuilder::new();
		builder.block_tile((11, 10), 0);
		let map = map_of(&builder);
		assert!(!map.can_traverse(Tile::new(10, 10, 0), Direction::NorthEast));
		assert!(map.can_traverse(Tile::new(10, 10, 0), Direction::NorthWest));
	}
	#[test]
	fn corner_cutting_through_wall() {
		//  _____ _____
		// |  A  ‖  T  |
		// |_____‖_____|
		// |  S  |     |
		// |_____|_____|
		let mut builder = FlagRegionBuilder::new();
		builder.add_wall((10, 11), 0, Direction::East);
		let map = map_of(&builder);
		assert!(!map.can_traverse(Tile::new(10, 10, 0), Direction::NorthEast));
		assert!(map.can_traverse(Tile::new(10, 10, 0), Direction::North));
		assert!(map.can_traverse(Tile::new(10, 10, 0), Direction::East));
	}
	#[test]
	fn neighbours_in_canonical_order() {
		let mut builder = FlagRegionBuilder::new();
		builder.block_tile((10, 11), 0);
		let map = map_of(&builder);
		let result = map.get_neighbours(Tile::new(10, 10, 0));
		let actual = vec![
			Tile::new(10, 9, 0),
			Tile::new(11, 10, 0),
			Tile::new(9, 10, 0),
			Tile::new(11, 9, 0),
			Tile::new(9, 9, 0),
		];
		assert_eq!(actual, result);
	}
	#[test]
	fn planes_do_not_interact() {
		let mut builder = FlagRegionBuilder::new();
		builder.block_tile((10, 11), 1);
		let map = map_of(&builder);
		assert!(map.can_traverse(Tile::new(10, 10, 0), Direction::North));
		assert!(!map.can_traverse(Tile::new(10, 10, 1), Direction::North));
	}
	#[test]
	fn region_at_edge_of_coordinate_space() {
		// the east column of region 33554431 sits on x = i32::MAX
		let builder = FlagRegionBuilder::new();
		let map = CollisionMap::from_builders([(RegionID::new(33554431, 0), &builder)]).unwrap();
		let edge = Tile::new(i32::MAX, 5, 0);
		assert!(!map.is_blocked(edge));
		assert!(!map.can_traverse(edge, Direction::East));
		assert!(!map.can_traverse(edge, Direction::NorthEast));
		assert!(map.can_traverse(edge, Direction::West));
		let result = map.get_neighbours(edge);
		let actual = vec![
			Tile::new(i32::MAX, 6, 0),
			Tile::new(i32::MAX, 4, 0),
			Tile::new(i32::MAX - 1, 5, 0),
			Tile::new(i32::MAX - 1, 6, 0),
			Tile::new(i32::MAX - 1, 4, 0),
		];
		assert_eq!(actual, result);
	}
	#[test]
	fn region_at_edge_from_file_name() {
		let region = region_from_file_name(Path::new("/tmp/33554431_0")).unwrap();
		assert_eq!(RegionID::new(33554431, 0), region);
	}
	#[test]
	fn region_file_names() {
		let result = region_from_file_name(Path::new("/tmp/50_-3.bin")).unwrap();
		assert_eq!(RegionID::new(50, -3), result);
		let result = region_from_file_name(Path::new("/tmp/50_51")).unwrap();
		assert_eq!(RegionID::new(50, 51), result);
		assert!(region_from_file_name(Path::new("/tmp/fifty_51")).is_err());
		assert!(region_from_file_name(Path::new("/tmp/5051")).is_err());
	}
}
