mod banner;
mod error;
mod progress;
mod tables;

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use tables::{print_element_distribution, print_grid_info, print_structure_info};

#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Banner and spinners are drawn on stderr.
    pub interactive: bool,
}

impl Context {
    pub fn detect() -> Self {
        Self {
            interactive: crate::io::stderr_is_tty(),
        }
    }

    pub fn with_quiet(self, quiet: bool) -> Self {
        Self {
            interactive: self.interactive && !quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_disables_interactive_output() {
        let ctx = Context { interactive: true };
        assert!(!ctx.with_quiet(true).interactive);
        assert!(ctx.with_quiet(false).interactive);
        assert!(!Context { interactive: false }.with_quiet(false).interactive);
    }
}
