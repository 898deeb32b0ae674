//! The tile reachability engine.
//!
//! The world is a grid of [tile::Tile]s stacked on a small number of planes.
//! Movement across the grid is described by a set of per-tile flags which
//! mark a tile as impassable or forbid leaving it in a given direction. The
//! flags are stored per Region, a `64x64` block of tiles covering every
//! plane, compressed on disk and only expanded in memory the first time a
//! query touches that Region.
//!
//! ```text
//!  region (0, 1)        region (1, 1)
//!  ___________________ ___________________
//! |                   |                   |
//! |     64 x 64       |                   |
//! |  tiles per plane  |                   |
//! |___________________|___________________|
//! |                   |                   |
//! |                   |                   |
//! |                   |                   |
//! |___________________|___________________|
//!  region (0, 0)        region (1, 0)
//! ```
//!
//! Definitions:
//!
//! * Tile - one discrete grid cell `(x, y, plane)`. North is `+y`, east is `+x`
//! * Region - a `64x64` block of tiles, the unit of collision storage
//! * Flag - a bit on a tile indicating a directional blockage or that the tile is impassable
//! * Transport - a directed shortcut from one tile to another (doors, teleports, ladders) which ignores the grid
//! * Tracked tile - a tile the player has marked
//! * One-click tile - a tracked tile reachable from the player using only tracked tiles
//!
//! A [pathfinder::Pathfinder] runs a breadth-first search across the
//! [collision_map::CollisionMap] and [transports::TransportGraph], and the
//! [classifier] uses it once per candidate tile to decide which tracked tiles
//! are one-click.
//!

pub mod classifier;
pub mod collision_map;
pub mod error;
pub mod flags;
pub mod pathfinder;
pub mod region_store;
pub mod tile;
pub mod tracked;
pub mod transports;
pub mod utilities;
