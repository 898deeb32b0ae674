//! Holds the compressed payload of every known Region and decompresses each
//! one into a [FlagRegion] the first time it is queried. Decompressed Regions
//! are cached for the lifetime of the store and never rewritten, so the store
//! can be read from several threads at once
//!

use std::sync::OnceLock;

use crate::prelude::*;
use bevy::prelude::*;
use rustc_hash::FxHashMap;

/// A compressed Region and the slot its flags are decompressed into
#[derive(Debug)]
struct RegionSlot {
	/// zlib compressed flags
	payload: Vec<u8>,
	/// Filled on first access, [None] if decompression failed at that point
	flags: OnceLock<Option<FlagRegion>>,
}

/// Lazily decompressing cache of [FlagRegion]s keyed by [RegionID]
#[derive(Debug, Default)]
pub struct FlagRegionStore {
	/// Every Region supplied at construction
	slots: FxHashMap<RegionID, RegionSlot>,
}

impl FlagRegionStore {
	/// Create a new instance of [FlagRegionStore]. Every payload is checked
	/// up front so that corrupt data fails loading rather than silently
	/// blocking tiles during play
	pub fn new(
		payloads: impl IntoIterator<Item = (RegionID, Vec<u8>)>,
	) -> Result<Self, LoadError> {
		let mut slots = FxHashMap::default();
		for (region, payload) in payloads {
			FlagRegion::validate_payload(region, &payload)?;
			let slot = RegionSlot {
				payload,
				flags: OnceLock::new(),
			};
			if slots.insert(region, slot).is_some() {
				return Err(LoadError::DuplicateRegion(region));
			}
		}
		Ok(FlagRegionStore { slots })
	}
	/// Get the flags of a Region, decompressing them if this is the first
	/// request. Regions which were never supplied return [None]
	pub fn get(&self, region: &RegionID) -> Option<&FlagRegion> {
		let slot = self.slots.get(region)?;
		slot.flags
			.get_or_init(|| match FlagRegion::from_payload(*region, &slot.payload) {
				Ok(flags) => {
					debug!("Decompressed region {:?}", region.get());
					Some(flags)
				}
				Err(e) => {
					error!("{}, treating region as unknown", e);
					None
				}
			})
			.as_ref()
	}
	/// Whether a payload was supplied for the Region
	pub fn contains_region(&self, region: &RegionID) -> bool {
		self.slots.contains_key(region)
	}
	/// Number of Regions supplied
	pub fn region_count(&self) -> usize {
		self.slots.len()
	}
	/// Number of Regions which have been decompressed so far
	pub fn decompressed_count(&self) -> usize {
		self.slots
			.values()
			.filter(|slot| slot.flags.get().is_some())
			.count()
	}
	/// Decompress every Region now instead of on first query
	pub fn decompress_all(&self) {
		for region in self.slots.keys() {
			self.get(region);
		}
	}
}
