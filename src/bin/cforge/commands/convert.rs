use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;

use cube_forge::System;
use cube_forge::io::CubeWriter;

use super::{read_substeps, read_system};
use crate::cli::ConvertArgs;
use crate::config::{build_read_config, build_write_config};
use crate::display::{Context as DisplayContext, Progress, print_structure_info};
use crate::io::{create_output, open_input, resolve_path, stdin_is_tty, stdout_is_tty};

const TOTAL_STEPS: u8 = 3;

pub fn run_convert(args: ConvertArgs, ctx: DisplayContext) -> Result<()> {
    if resolve_path(args.input.as_deref()).is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: cforge convert <INPUT> -o <OUTPUT> or pipe data via stdin."
        );
    }
    let output_path = resolve_path(args.write.output.as_deref());
    if output_path.is_none() && stdout_is_tty() {
        bail!(
            "No output file specified and stdout is a terminal.\n\nUsage: cforge convert <INPUT> -o <OUTPUT> or pipe output."
        );
    }

    let read_config = build_read_config(&args.read)?;
    let write_config = build_write_config(&args.write)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading cube file");
    let input = open_input(args.input.as_deref())?;
    let mut system = read_system(input, read_config)?;

    let substeps = read_substeps(&system);
    let substeps_ref: Vec<&str> = substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Reading cube file", &substeps_ref);

    if ctx.interactive {
        print_structure_info(&mut io::stderr().lock(), &system);
    }

    progress.step("Selecting grid");
    let dropped = select_grid(&mut system, args.write.cube)?;
    if let Some(name) = &args.write.name {
        system.set_data("name", name.as_str());
    }

    let mut select_substeps = vec![format!("Keep grid {}", args.write.cube)];
    if dropped > 0 {
        select_substeps.push(format!("Drop {dropped} other grid(s)"));
    }
    let select_ref: Vec<&str> = select_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Selecting grid", &select_ref);

    progress.step("Writing cube file");
    let output = create_output(output_path)?;
    CubeWriter::new(output)
        .config(write_config)
        .write(&system)
        .context("Failed to encode cube file")?;

    let target = describe_target(output_path);
    info!("wrote {} atoms and 1 grid to {target}", system.atom_count());
    let write_step = format!("Write cube → {target}");
    progress.complete_step("Writing cube file", &[write_step.as_str()]);

    progress.finish();

    Ok(())
}

/// Moves grid `index` to the front so the writer emits it.
///
/// Returns how many grids will not be written.
fn select_grid(system: &mut System, index: usize) -> Result<usize> {
    let count = system.cube_count();
    if count == 0 && index == 0 {
        // the writer reports the missing grid
        return Ok(0);
    }
    if index >= count {
        bail!("Grid {index} requested but the input holds {count} grid(s) (counted from 0)");
    }

    if index > 0 {
        let grid = system.cubes.remove(index);
        system.cubes.insert(0, grid);
    }
    Ok(count - 1)
}

fn describe_target(path: Option<&Path>) -> String {
    path.map(|p| {
        p.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    })
    .unwrap_or_else(|| "stdout".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_grids(values: &[f32]) -> System {
        let mut system = System::new();
        for &value in values {
            let grid = system.add_cube();
            grid.set_limits([0.0; 3], [1, 1, 1], [1.0; 3]);
            grid.set_data(vec![value]).unwrap();
        }
        system
    }

    #[test]
    fn first_grid_is_kept_in_place() {
        let mut system = with_grids(&[1.0, 2.0]);
        assert_eq!(select_grid(&mut system, 0).unwrap(), 1);
        assert_eq!(system.cubes[0].data(), &[1.0]);
    }

    #[test]
    fn selected_grid_moves_to_front() {
        let mut system = with_grids(&[1.0, 2.0, 3.0]);
        assert_eq!(select_grid(&mut system, 2).unwrap(), 2);
        assert_eq!(system.cubes[0].data(), &[3.0]);
        assert_eq!(system.cubes[1].data(), &[1.0]);
        assert_eq!(system.cubes[2].data(), &[2.0]);
    }

    #[test]
    fn out_of_range_grid_is_rejected() {
        let mut system = with_grids(&[1.0]);
        let err = select_grid(&mut system, 1).unwrap_err();
        assert!(err.to_string().contains("holds 1 grid"));
    }

    #[test]
    fn empty_system_defers_to_writer() {
        let mut system = System::new();
        assert_eq!(select_grid(&mut system, 0).unwrap(), 0);
        assert!(select_grid(&mut system, 1).is_err());
    }

    #[test]
    fn target_names_file_or_stdout() {
        assert_eq!(describe_target(Some(Path::new("/tmp/out.cube"))), "out.cube");
        assert_eq!(describe_target(None), "stdout");
    }
}
