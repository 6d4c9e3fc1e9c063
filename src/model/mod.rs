//! In-memory model produced and consumed by the cube codec.
//!
//! - [`types`] – Periodic table elements with covalent radii.
//! - [`atom`] – Atomic number plus Cartesian position in Å.
//! - [`cube`] – Regular 3D scalar grids with a flat sample buffer.
//! - [`system`] – Atoms, perceived bonds, grids and string metadata.
//!
//! All lengths are in Ångström; conversion to and from the Bohr units used on
//! disk happens in [`crate::io`].

pub mod atom;
pub mod cube;
pub mod system;
pub mod types;
