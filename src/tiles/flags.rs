//! Every tile carries [FLAG_COUNT] movement flags. A [FlagRegion] holds the
//! flags of every tile of a Region, across all planes, as one dense bitset.
//!
//! On disk a Region is a zlib stream which decompresses to exactly
//! [REGION_PAYLOAD_BYTES] bytes. The bytes are a little-endian bitset, bit `i`
//! lives in bit `i % 8` of byte `i / 8`, and the flag `f` of the local tile
//! `(lx, ly)` on plane `p` sits at bit
//!
//! ```text
//! ((p * 64 + ly) * 64 + lx) * 9 + f
//! ```
//!
//! A directional flag forbids leaving the tile in that direction. Walls
//! between two tiles are therefore authored on both sides, see
//! [FlagRegionBuilder::add_wall].
//!

use std::io::{Read, Write};

use crate::prelude::*;
use bevy::prelude::*;
use fixedbitset::FixedBitSet;
use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

/// Number of flags stored for each tile
pub const FLAG_COUNT: usize = 9;
/// Number of tiles held by a Region across all of its planes
pub const REGION_TILE_COUNT: usize = (PLANE_COUNT * REGION_SIZE * REGION_SIZE) as usize;
/// Size of a decompressed Region payload
pub const REGION_PAYLOAD_BYTES: usize = REGION_TILE_COUNT * FLAG_COUNT / 8;

/// Movement flags of a tile, the discriminant is the bit offset within the tile
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Reflect)]
pub enum Flag {
	/// The tile cannot be entered at all
	Blocked = 0,
	North = 1,
	South = 2,
	East = 3,
	West = 4,
	NorthEast = 5,
	NorthWest = 6,
	SouthEast = 7,
	SouthWest = 8,
}

impl Flag {
	/// Offset of the flag within a tile's group of bits
	pub fn bit(&self) -> usize {
		*self as usize
	}
}

/// Bit position of `flag` for a local tile of a Region. Returns [None] if
/// the plane is outside of the Region
fn bit_index(local: (usize, usize), plane: i32, flag: Flag) -> Option<usize> {
	if !(0..PLANE_COUNT).contains(&plane) {
		return None;
	}
	let size = REGION_SIZE as usize;
	if local.0 >= size || local.1 >= size {
		return None;
	}
	let tile_index = (plane as usize * size + local.1) * size + local.0;
	Some(tile_index * FLAG_COUNT + flag.bit())
}

/// The decompressed flags of one Region. Once built it is never mutated
#[derive(Clone, Debug, PartialEq)]
pub struct FlagRegion(FixedBitSet);

impl FlagRegion {
	/// Decompress a Region payload into its flags
	pub fn from_payload(region: RegionID, payload: &[u8]) -> Result<Self, LoadError> {
		let mut decoder = ZlibDecoder::new(payload);
		let mut bytes = Vec::with_capacity(REGION_PAYLOAD_BYTES);
		decoder
			.read_to_end(&mut bytes)
			.map_err(|source| LoadError::Decompress { region, source })?;
		if bytes.len() != REGION_PAYLOAD_BYTES {
			return Err(LoadError::PayloadSize {
				region,
				expected: REGION_PAYLOAD_BYTES,
				actual: bytes.len() as u64,
			});
		}
		let mut bits = FixedBitSet::with_capacity(REGION_PAYLOAD_BYTES * 8);
		for (i, byte) in bytes.iter().enumerate() {
			if *byte == 0 {
				continue;
			}
			for b in 0..8 {
				if (byte >> b) & 1 == 1 {
					bits.insert(i * 8 + b);
				}
			}
		}
		Ok(FlagRegion(bits))
	}
	/// Check that a payload decompresses to a full Region without keeping the
	/// result around
	pub fn validate_payload(region: RegionID, payload: &[u8]) -> Result<(), LoadError> {
		let mut decoder = ZlibDecoder::new(payload);
		let actual = std::io::copy(&mut decoder, &mut std::io::sink())
			.map_err(|source| LoadError::Decompress { region, source })?;
		if actual != REGION_PAYLOAD_BYTES as u64 {
			return Err(LoadError::PayloadSize {
				region,
				expected: REGION_PAYLOAD_BYTES,
				actual,
			});
		}
		Ok(())
	}
	/// Whether `flag` is set on the local tile. Planes outside of the Region
	/// report every flag as set
	pub fn is_set(&self, local: (usize, usize), plane: i32, flag: Flag) -> bool {
		match bit_index(local, plane, flag) {
			Some(index) => self.0.contains(index),
			None => true,
		}
	}
	/// Number of flags set across the Region
	pub fn count_set(&self) -> usize {
		self.0.count_ones(..)
	}
}

/// Authors the flags of a Region and compresses them into a payload
#[derive(Clone, Debug)]
pub struct FlagRegionBuilder(FixedBitSet);

impl Default for FlagRegionBuilder {
	fn default() -> Self {
		FlagRegionBuilder(FixedBitSet::with_capacity(REGION_PAYLOAD_BYTES * 8))
	}
}

impl FlagRegionBuilder {
	/// Create a builder where every tile is open
	pub fn new() -> Self {
		FlagRegionBuilder::default()
	}
	/// Create a builder where every tile on every plane is [Flag::Blocked]
	pub fn all_blocked() -> Self {
		let mut builder = FlagRegionBuilder::default();
		let size = REGION_SIZE as usize;
		for plane in 0..PLANE_COUNT {
			for y in 0..size {
				for x in 0..size {
					builder.block_tile((x, y), plane);
				}
			}
		}
		builder
	}
	/// Set or clear a flag on a local tile, out of range tiles are ignored
	pub fn set_flag(&mut self, local: (usize, usize), plane: i32, flag: Flag, value: bool) {
		if let Some(index) = bit_index(local, plane, flag) {
			self.0.set(index, value);
		} else {
			warn!(
				"Ignoring flag {:?} on tile {:?} plane {}, it is outside of the region",
				flag, local, plane
			);
		}
	}
	/// Make a local tile impassable
	pub fn block_tile(&mut self, local: (usize, usize), plane: i32) {
		self.set_flag(local, plane, Flag::Blocked, true);
	}
	/// Make a local tile passable again
	pub fn open_tile(&mut self, local: (usize, usize), plane: i32) {
		self.set_flag(local, plane, Flag::Blocked, false);
	}
	/// Place a wall on the `direction` side of a local tile. The tile loses
	/// the ability to step in `direction` and, when the neighbour lies inside
	/// the same Region, the neighbour loses the ability to step back
	pub fn add_wall(&mut self, local: (usize, usize), plane: i32, direction: Direction) {
		self.set_flag(local, plane, direction.flag(), true);
		let (dx, dy) = direction.offset();
		let nx = local.0 as i32 + dx;
		let ny = local.1 as i32 + dy;
		if (0..REGION_SIZE).contains(&nx) && (0..REGION_SIZE).contains(&ny) {
			self.set_flag(
				(nx as usize, ny as usize),
				plane,
				direction.inverse().flag(),
				true,
			);
		}
	}
	/// Snapshot the authored flags as a [FlagRegion]
	pub fn build(&self) -> FlagRegion {
		FlagRegion(self.0.clone())
	}
	/// Compress the authored flags into a Region payload
	pub fn to_payload(&self) -> std::io::Result<Vec<u8>> {
		let mut bytes = vec![0_u8; REGION_PAYLOAD_BYTES];
		for i in self.0.ones() {
			bytes[i / 8] |= 1 << (i % 8);
		}
		let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
		encoder.write_all(&bytes)?;
		encoder.finish()
	}
}
