//! `use bevy_one_click_tiles_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::tiles::{
	classifier::*, collision_map::*, error::*, flags::*, pathfinder::*, region_store::*,
	tile::*, tracked::*, transports::*, utilities::*, *,
};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	plugin::{tick_layer::*, *},
};
