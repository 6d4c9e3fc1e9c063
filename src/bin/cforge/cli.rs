use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cforge",
    about = "Inspect and convert Gaussian Cube volumetric data files",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize the atoms and grids of a cube file
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Decode a cube file and write it back in canonical layout
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),
}

/// Flags accepted by every command.
#[derive(Args)]
pub struct GlobalOptions {
    /// Suppress banner and progress output (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Bond perception applied after the atoms are decoded.
#[derive(Args)]
#[command(next_help_heading = "Bond Perception")]
pub struct ReadOptions {
    /// Slack added to the sum of covalent radii (Å)
    #[arg(
        long = "bond-tolerance",
        value_name = "Å",
        default_value = "0.45",
        allow_hyphen_values = true
    )]
    pub bond_tolerance: f64,

    /// Pairs closer than this are never bonded (Å)
    #[arg(long = "min-bond-distance", value_name = "Å", default_value = "0.32")]
    pub min_bond_distance: f64,
}

#[derive(Args)]
#[command(next_help_heading = "Output")]
pub struct WriteOptions {
    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Grid to write, counted from 0; other grids are dropped
    #[arg(long = "cube", value_name = "N", default_value = "0")]
    pub cube: usize,

    /// Text for the first line of the written file
    #[arg(long, value_name = "TEXT")]
    pub banner: Option<String>,

    /// Replace the molecule name on the second line
    #[arg(long, value_name = "TEXT")]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Input cube file (stdin if omitted or '-')
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub read: ReadOptions,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Input cube file (stdin if omitted or '-')
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub read: ReadOptions,

    #[command(flatten)]
    pub write: WriteOptions,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_info_with_defaults() {
        let cli = Cli::try_parse_from(["cforge", "info", "density.cube"]).unwrap();
        assert!(!cli.global.quiet);
        assert_eq!(cli.global.verbose, 0);
        let Command::Info(args) = cli.command else {
            panic!("expected info command");
        };
        assert_eq!(args.input, Some(PathBuf::from("density.cube")));
        assert_eq!(args.read.bond_tolerance, 0.45);
        assert_eq!(args.read.min_bond_distance, 0.32);
    }

    #[test]
    fn parses_convert_options() {
        let cli = Cli::try_parse_from([
            "cforge",
            "convert",
            "in.cube",
            "-o",
            "out.cube",
            "--cube",
            "2",
            "--banner",
            "ESP",
            "--name",
            "benzene",
            "--bond-tolerance",
            "-0.1",
            "-vv",
            "-q",
        ])
        .unwrap();

        assert!(cli.global.quiet);
        assert_eq!(cli.global.verbose, 2);
        let Command::Convert(args) = cli.command else {
            panic!("expected convert command");
        };
        assert_eq!(args.write.output, Some(PathBuf::from("out.cube")));
        assert_eq!(args.write.cube, 2);
        assert_eq!(args.write.banner.as_deref(), Some("ESP"));
        assert_eq!(args.write.name.as_deref(), Some("benzene"));
        assert_eq!(args.read.bond_tolerance, -0.1);
    }

    #[test]
    fn convert_alias_and_stdin_input() {
        let cli = Cli::try_parse_from(["cforge", "c"]).unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert command");
        };
        assert!(args.input.is_none());
        assert!(args.write.output.is_none());
        assert_eq!(args.write.cube, 0);
    }

    #[test]
    fn rejects_negative_grid_index() {
        assert!(Cli::try_parse_from(["cforge", "convert", "in.cube", "--cube", "-1"]).is_err());
    }
}
