//! Doors, ladders, teleports and other shortcuts which move an actor from
//! one tile to another regardless of grid adjacency or collision flags.
//!
//! The transport list is a text file with one directed edge per line,
//! `x1 y1 z1 x2 y2 z2`, where lines beginning with `#` are comments:
//!
//! ```text
//! # ladder up
//! 3208 3220 0 3208 3220 1
//! # ladder down
//! 3208 3220 1 3208 3220 0
//! ```
//!

use std::{io::Read, path::Path};

use crate::prelude::*;
use bevy::prelude::*;
use rustc_hash::FxHashMap;

/// Directed adjacency from a source tile to every tile a transport on it leads to
#[derive(Component, Debug, Default, Clone)]
pub struct TransportGraph {
	/// Destinations of each source in the order they were loaded
	edges: FxHashMap<Tile, Vec<Tile>>,
	/// Total number of edges
	edge_count: usize,
}

impl TransportGraph {
	/// Create a new instance of [TransportGraph] from a list of `(source, destination)` edges
	pub fn new(edges: impl IntoIterator<Item = (Tile, Tile)>) -> Self {
		let mut graph = TransportGraph::default();
		for (source, destination) in edges {
			graph.add_edge(source, destination);
		}
		graph
	}
	/// Append an edge. Destinations are not checked against any collision
	/// data, a transport is allowed to land on any tile
	pub fn add_edge(&mut self, source: Tile, destination: Tile) {
		self.edges.entry(source).or_default().push(destination);
		self.edge_count += 1;
	}
	/// Tiles directly reachable from `tile` by a transport, in load order
	pub fn destinations_from(&self, tile: &Tile) -> &[Tile] {
		self.edges.get(tile).map(Vec::as_slice).unwrap_or(&[])
	}
	/// Total number of edges
	pub fn edge_count(&self) -> usize {
		self.edge_count
	}
	/// Number of distinct tiles with at least one transport leaving them
	pub fn source_count(&self) -> usize {
		self.edges.len()
	}
	/// Parse a transport list
	pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
		let mut rdr = csv::ReaderBuilder::new()
			.has_headers(false)
			.delimiter(b' ')
			.comment(Some(b'#'))
			.flexible(true)
			.from_reader(reader);
		let mut graph = TransportGraph::default();
		for record in rdr.records() {
			let record = record?;
			let line = record.position().map(|p| p.line()).unwrap_or_default();
			// repeated separators produce empty fields
			let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
			if fields.is_empty() {
				continue;
			}
			if fields.len() != 6 {
				return Err(LoadError::Transport {
					line,
					message: format!("expected 6 coordinates, found {}", fields.len()),
				});
			}
			let mut coords = [0_i32; 6];
			for (coord, field) in coords.iter_mut().zip(fields.iter()) {
				*coord = field.trim().parse().map_err(|_| LoadError::Transport {
					line,
					message: format!("`{}` is not an integer", field),
				})?;
			}
			graph.add_edge(
				Tile::new(coords[0], coords[1], coords[2]),
				Tile::new(coords[3], coords[4], coords[5]),
			);
		}
		info!(
			"Loaded {} transports from {} tiles",
			graph.edge_count(),
			graph.source_count()
		);
		Ok(graph)
	}
	/// Parse a transport list from disk
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
		let path = path.as_ref();
		let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		TransportGraph::from_reader(file)
	}
}
