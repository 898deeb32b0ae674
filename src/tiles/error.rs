//! Failures which can occur while loading collision data, transports and
//! settings. Only startup can fail, every runtime query resolves to a value
//!

use std::{io, path::PathBuf};

use crate::prelude::*;

/// Reasons the static data behind the engine could not be loaded
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
	/// A file or directory could not be read
	#[error("failed reading {}: {}", .path.display(), .source)]
	Io {
		/// The path being read
		path: PathBuf,
		/// Underlying failure
		#[source]
		source: io::Error,
	},
	/// A collision file name is not of the form `{regionX}_{regionY}`
	#[error("collision file `{name}` is not named `{{regionX}}_{{regionY}}`")]
	RegionName {
		/// The offending file name
		name: String,
	},
	/// Two payloads were supplied for the same Region
	#[error("region {:?} was supplied more than once", .0.get())]
	DuplicateRegion(RegionID),
	/// A Region payload is not a valid zlib stream
	#[error("failed decompressing region {:?}: {}", .region.get(), .source)]
	Decompress {
		/// Region the payload belongs to
		region: RegionID,
		/// Underlying failure
		#[source]
		source: io::Error,
	},
	/// A Region payload could not be compressed
	#[error("failed compressing region {:?}: {}", .region.get(), .source)]
	Compress {
		/// Region the payload belongs to
		region: RegionID,
		/// Underlying failure
		#[source]
		source: io::Error,
	},
	/// A Region payload decompressed to the wrong number of bytes
	#[error("region {:?} decompressed to {} bytes, expected {}", .region.get(), .actual, .expected)]
	PayloadSize {
		/// Region the payload belongs to
		region: RegionID,
		/// Number of bytes a Region must hold
		expected: usize,
		/// Number of bytes found
		actual: u64,
	},
	/// A transport row is malformed
	#[error("invalid transport on line {line}: {message}")]
	Transport {
		/// Line of the transport list the row sits on
		line: u64,
		/// What is wrong with it
		message: String,
	},
	/// The transport list could not be tokenised
	#[error("failed reading transports: {0}")]
	Csv(#[from] csv::Error),
	/// A settings file could not be deserialised
	#[error("failed deserializing settings {}: {}", .path.display(), .message)]
	Settings {
		/// The path being read
		path: PathBuf,
		/// What is wrong with it
		message: String,
	},
}
