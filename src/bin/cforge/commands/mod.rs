mod convert;
mod info;

use convert::run_convert;
use info::run_info;

use anyhow::{Context, Result};

use cube_forge::System;
use cube_forge::io::{CubeReader, ReadConfig};

use crate::cli::Command;
use crate::display::Context as DisplayContext;
use crate::io::InputSource;

pub fn dispatch(command: Command, ctx: DisplayContext) -> Result<()> {
    match command {
        Command::Info(args) => run_info(args, ctx),
        Command::Convert(args) => run_convert(args, ctx),
    }
}

fn read_system(input: InputSource, config: ReadConfig) -> Result<System> {
    let label = input.label().to_string();
    CubeReader::new(input)
        .config(config)
        .read()
        .with_context(|| format!("Failed to decode cube data from {label}"))
}

fn read_substeps(system: &System) -> Vec<String> {
    let mut steps = vec![
        format!("Parse {} atoms", system.atom_count()),
        format!("Perceive {} bonds", system.bond_count()),
    ];
    let points: usize = system.cubes.iter().map(|c| c.point_count()).sum();
    steps.push(format!(
        "Load {} grid(s), {} points",
        system.cube_count(),
        crate::util::text::group_thousands(points)
    ));
    steps
}
