use std::io::{self, Write};

use anyhow::{Context, Result, bail};

use super::{read_substeps, read_system};
use crate::cli::InfoArgs;
use crate::config::build_read_config;
use crate::display::{
    Context as DisplayContext, Progress, print_element_distribution, print_grid_info,
    print_structure_info,
};
use crate::io::{open_input, resolve_path, stdin_is_tty};

const TOTAL_STEPS: u8 = 1;

pub fn run_info(args: InfoArgs, ctx: DisplayContext) -> Result<()> {
    if resolve_path(args.input.as_deref()).is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: cforge info <INPUT> or pipe data via stdin."
        );
    }

    let read_config = build_read_config(&args.read)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading cube file");
    let input = open_input(args.input.as_deref())?;
    let system = read_system(input, read_config)?;

    let substeps = read_substeps(&system);
    let substeps_ref: Vec<&str> = substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Reading cube file", &substeps_ref);
    progress.finish();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_structure_info(&mut out, &system);
    print_element_distribution(&mut out, &system);
    print_grid_info(&mut out, &system);
    out.flush().context("Failed to write summary")?;

    Ok(())
}
