use std::io::Write;

use log::debug;

use crate::io::util::{self, write_fixed_float, write_fixed_int, write_scientific};
use crate::io::{WriteConfig, error::EncodeError};
use crate::model::system::System;

const VALUES_PER_LINE: usize = 6;

/// Writes the first grid of `system` together with its atoms.
///
/// Grids past the first are not written. Nothing is written when the system
/// has no grid, when that grid is empty or short of samples, or when the
/// banner or name would break the two comment lines.
pub fn write<W: Write>(
    mut writer: W,
    system: &System,
    config: &WriteConfig,
) -> Result<(), EncodeError> {
    let cube = system.cube(0).ok_or(EncodeError::NoGridData)?;
    if cube.point_count() == 0 || cube.data().len() != cube.point_count() {
        return Err(EncodeError::IncompleteGrid {
            dimensions: cube.dimensions(),
            samples: cube.data().len(),
        });
    }

    let name = system.data("name").unwrap_or_default();
    if is_multiline(&config.banner) {
        return Err(EncodeError::MultilineText("banner"));
    }
    if is_multiline(name) {
        return Err(EncodeError::MultilineText("name"));
    }

    if system.cube_count() > 1 {
        debug!(
            "writing grid 1 of {}; remaining grids are dropped",
            system.cube_count()
        );
    }

    let min = util::to_file(cube.min());
    let spacing = util::to_file(cube.spacing());
    let dimensions = cube.dimensions();

    writeln!(writer, "{}", config.banner)?;
    writeln!(writer, "{name}")?;

    let atom_count = system.atom_count();
    write_fixed_int(&mut writer, atom_count as i64)?;
    for component in min {
        write_fixed_float(&mut writer, component)?;
    }
    // one value per point, not a vector field
    write_fixed_int(&mut writer, 1)?;
    writeln!(writer)?;

    for axis in 0..3 {
        write_fixed_int(&mut writer, dimensions[axis] as i64)?;
        for k in 0..3 {
            write_fixed_float(&mut writer, if k == axis { spacing[axis] } else { 0.0 })?;
        }
        writeln!(writer)?;
    }

    for index in 0..atom_count {
        let atom = system
            .atom(index)
            .filter(|atom| atom.is_valid())
            .ok_or(EncodeError::InvalidAtom(index))?;

        write_fixed_int(&mut writer, i64::from(atom.atomic_number))?;
        write_fixed_float(&mut writer, 0.0)?;
        for component in util::to_file(atom.position) {
            write_fixed_float(&mut writer, component)?;
        }
        writeln!(writer)?;
    }

    for (i, &value) in cube.data().iter().enumerate() {
        write_scientific(&mut writer, f64::from(value))?;
        if i % VALUES_PER_LINE == VALUES_PER_LINE - 1 {
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn is_multiline(text: &str) -> bool {
    text.contains(['\n', '\r'])
}
