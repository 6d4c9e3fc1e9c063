//! Reading and writing Gaussian Cube files.
//!
//! A cube file stores a molecule and one or more scalar fields sampled on a
//! regular grid. Lengths on disk are in Bohr; the in-memory [`System`] uses
//! Ångström, and the conversion happens here.
//!
//! ```
//! use std::io::Cursor;
//! use cube_forge::io::{CubeReader, CubeWriter};
//!
//! let text = "\
//! hydrogen
//! density
//!     1    0.000000    0.000000    0.000000
//!     1    1.000000    0.000000    0.000000
//!     1    0.000000    1.000000    0.000000
//!     2    0.000000    0.000000    1.000000
//!     1    1.000000    0.000000    0.000000    0.000000
//!  1.00000e-01  2.00000e-01
//! ";
//!
//! let system = CubeReader::new(Cursor::new(text)).read()?;
//! assert_eq!(system.atom_count(), 1);
//! assert_eq!(system.cube(0).map(|c| c.dimensions()), Some([1, 1, 2]));
//!
//! let mut out = Vec::new();
//! CubeWriter::new(&mut out).write(&system)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Only the first grid of a system is written; multi-grid files can be read
//! but are written back as single-grid files.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::model::system::{DEFAULT_BOND_TOLERANCE, DEFAULT_MIN_BOND_DISTANCE, System};

pub mod error;
pub mod util;

pub mod cube {
    pub mod reader;
    pub mod writer;
}

pub use error::{DecodeError, EncodeError};

/// File extensions recognized as cube files.
pub const FILE_EXTENSIONS: &[&str] = &["cube"];

/// Cube files have no registered MIME type.
pub const MIME_TYPES: &[&str] = &[];

/// Banner written on the first line when none is configured.
pub const DEFAULT_BANNER: &str = "Gaussian Cube file generated by cube-forge.";

pub fn is_cube_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

#[derive(Debug, Clone)]
pub struct ReadConfig {
    /// Slack added to the covalent radius sum when perceiving bonds (Å).
    pub bond_tolerance: f64,
    /// Pairs closer than this are never bonded (Å).
    pub min_bond_distance: f64,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            bond_tolerance: DEFAULT_BOND_TOLERANCE,
            min_bond_distance: DEFAULT_MIN_BOND_DISTANCE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WriteConfig {
    /// First line of the file; readers treat it as free text.
    pub banner: String,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            banner: DEFAULT_BANNER.to_string(),
        }
    }
}

pub struct CubeReader<R: BufRead> {
    reader: R,
    config: ReadConfig,
}

impl<R: BufRead> CubeReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            config: ReadConfig::default(),
        }
    }

    pub fn config(mut self, config: ReadConfig) -> Self {
        self.config = config;
        self
    }

    pub fn read(self) -> Result<System, DecodeError> {
        cube::reader::read(self.reader, &self.config)
    }

    /// Appends the decoded atoms and grids to an existing system.
    ///
    /// On failure `system` may be left partially populated.
    pub fn read_into(self, system: &mut System) -> Result<(), DecodeError> {
        cube::reader::read_into(self.reader, system, &self.config)
    }
}

pub struct CubeWriter<W: Write> {
    writer: W,
    config: WriteConfig,
}

impl<W: Write> CubeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            config: WriteConfig::default(),
        }
    }

    pub fn config(mut self, config: WriteConfig) -> Self {
        self.config = config;
        self
    }

    pub fn banner(mut self, banner: impl Into<String>) -> Self {
        self.config.banner = banner.into();
        self
    }

    pub fn write(self, system: &System) -> Result<(), EncodeError> {
        cube::writer::write(self.writer, system, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn recognizes_cube_extension() {
        assert!(is_cube_path(Path::new("density.cube")));
        assert!(is_cube_path(Path::new("/tmp/ORBITAL.CUBE")));
        assert!(!is_cube_path(Path::new("density.cub")));
        assert!(!is_cube_path(Path::new("cube")));
        assert!(MIME_TYPES.is_empty());
    }

    #[test]
    fn reader_builder_uses_config() {
        let text = "\
pair
title
    2    0.000000    0.000000    0.000000
    1    1.000000    0.000000    0.000000
    1    0.000000    1.000000    0.000000
    1    0.000000    0.000000    1.000000
    1    0.000000    0.000000    0.000000    0.000000
    1    0.000000    1.400000    0.000000    0.000000
  5.00000e-01
";
        let bonded = CubeReader::new(Cursor::new(text)).read().unwrap();
        assert_eq!(bonded.bond_count(), 1);

        let strict = ReadConfig {
            bond_tolerance: 0.0,
            ..ReadConfig::default()
        };
        let unbonded = CubeReader::new(Cursor::new(text)).config(strict).read().unwrap();
        assert_eq!(unbonded.bond_count(), 0);
    }

    #[test]
    fn read_into_appends_to_existing_system() {
        let text = "\
a
b
    0    0.000000    0.000000    0.000000
    1    1.000000    0.000000    0.000000
    1    0.000000    1.000000    0.000000
    1    0.000000    0.000000    1.000000
  2.00000e+00
";
        let mut system = System::new();
        system.add_cube();
        CubeReader::new(Cursor::new(text))
            .read_into(&mut system)
            .unwrap();
        assert_eq!(system.cube_count(), 2);
        assert_eq!(system.data("name"), Some("a"));
        assert_eq!(system.cubes[1].data(), &[2.0]);
    }

    #[test]
    fn writer_builder_sets_banner() {
        let mut system = System::new();
        let cube = system.add_cube();
        cube.set_limits([0.0; 3], [1, 1, 1], [1.0; 3]);
        cube.set_data(vec![0.5]).unwrap();

        let mut out = Vec::new();
        CubeWriter::new(&mut out)
            .banner("electrostatic potential")
            .write(&system)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("electrostatic potential\n\n    0"));
        assert!(text.ends_with("  5.00000e-01"));
    }
}
