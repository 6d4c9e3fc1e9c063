//! A pure Rust reader and writer for Gaussian Cube files, the plain-text
//! format quantum chemistry packages use to export volumetric data such as
//! electron densities, molecular orbitals and electrostatic potentials.
//!
//! # Features
//!
//! - **Decoding**: Header, atoms, optional orbital list and every grid
//!   block of a cube file, converted from Bohr to Ångström
//! - **Bond perception**: Covalent-radius bonding applied once after all
//!   atoms are read, with a configurable tolerance
//! - **Encoding**: Fixed-column output compatible with common viewers,
//!   written back in Bohr
//! - **Diagnostics**: Every decode error carries the 1-based line number
//!   and field position where parsing stopped
//!
//! # Quick Start
//!
//! ```
//! use std::io::Cursor;
//! use cube_forge::{Element, System};
//! use cube_forge::io::{CubeReader, CubeWriter};
//!
//! // A water molecule with a 2×2×2 density grid
//! let mut system = System::new();
//! system.set_data("name", "water");
//! system.add_atom(8).set_position([0.000, 0.000, 0.000]);
//! system.add_atom(1).set_position([0.757, 0.586, 0.000]);
//! system.add_atom(1).set_position([-0.757, 0.586, 0.000]);
//!
//! let grid = system.add_cube();
//! grid.set_limits([-1.0, -1.0, -1.0], [2, 2, 2], [1.0, 1.0, 1.0]);
//! grid.set_data(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8])?;
//!
//! let mut bytes = Vec::new();
//! CubeWriter::new(&mut bytes).write(&system)?;
//!
//! let decoded = CubeReader::new(Cursor::new(bytes)).read()?;
//! assert_eq!(decoded.data("name"), Some("water"));
//! assert_eq!(decoded.atoms[0].element(), Some(Element::O));
//!
//! // Both O–H bonds are perceived, H–H is not
//! assert_eq!(decoded.bond_count(), 2);
//! assert_eq!(decoded.cube(0).map(|c| c.point_count()), Some(8));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`]: Cube decoding and encoding, unit conversion and errors
//!
//! # Data Types
//!
//! - [`System`]: Atoms, bonds, grids and string metadata
//! - [`Atom`]: Atomic number and Cartesian position in Å
//! - [`Bond`]: Unordered pair of atom indices
//! - [`Cube`]: Regular grid of `f32` samples
//! - [`Element`]: Chemical element (H through Og)

mod model;

pub mod io;

pub use model::atom::Atom;
pub use model::cube::{Cube, DataLengthError};
pub use model::system::{Bond, DEFAULT_BOND_TOLERANCE, DEFAULT_MIN_BOND_DISTANCE, System};
pub use model::types::Element;

pub use io::util::{ANGSTROM_TO_BOHR, BOHR_TO_ANGSTROM};
pub use io::{DecodeError, EncodeError};
