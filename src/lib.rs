//! This is a plugin for Bevy game engine to track player-marked tiles and
//! work out, each tick, which of them can be walked to using only other
//! marked tiles as stepping stones
//!

pub mod bundle;
pub mod plugin;
pub mod tiles;

pub mod prelude;
