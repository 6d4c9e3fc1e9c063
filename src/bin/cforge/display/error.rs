use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    let hints = collect_hints(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn collect_hints(err: &Error) -> Vec<String> {
    let mut collector = HintCollector::default();

    collector.collect_decode_hints(err);
    collector.collect_encode_hints(err);

    if !collector.has_typed_hints {
        collector.collect_fallback_hints(err);
    }

    collector.hints
}

#[derive(Default)]
struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn collect_decode_hints(&mut self, err: &Error) {
        use cube_forge::DecodeError;

        let Some(decode_err) = err.downcast_ref::<DecodeError>() else {
            return;
        };
        self.has_typed_hints = true;

        match decode_err {
            DecodeError::Io { source } => self.collect_std_io_hints(source),

            DecodeError::MalformedNumber { line, field, token } => {
                if token.is_empty() {
                    self.add(format!(
                        "Line {line} ends before field {field} of the {}",
                        section_for_line(*line)
                    ));
                } else {
                    self.add(format!(
                        "'{token}' is not a number (line {line}, field {field} of the {})",
                        section_for_line(*line)
                    ));
                }
                self.add("Fields are whitespace-separated; fixed columns are not required");
                self.add("Check that the file was not edited or wrapped by hand");
            }

            DecodeError::UnexpectedEof { line } => {
                self.add(format!("Input ended at line {line} while more data was expected"));
                self.add("The file may be truncated; compare its size with the original");
                self.add("A negative atom count announces an orbital list before the voxels");
            }

            DecodeError::InvalidDimensions { line, dimension } => {
                self.add(format!("Axis on line {line} declares {dimension} grid points"));
                self.add("Every axis needs at least one point");
                self.add("Negative counts (Ångström axes) are not supported");
            }

            DecodeError::NumericOverflow { line, field, value } => {
                self.add(format!(
                    "Value {value} on line {line}, field {field} is out of range"
                ));
                self.add("Atomic numbers must lie between 0 and 255");
            }
        }
    }

    fn collect_encode_hints(&mut self, err: &Error) {
        use cube_forge::EncodeError;

        let Some(encode_err) = err.downcast_ref::<EncodeError>() else {
            return;
        };
        self.has_typed_hints = true;

        match encode_err {
            EncodeError::Io { source } => self.collect_std_io_hints(source),

            EncodeError::NoGridData => {
                self.add("The input declares zero grids, so there is nothing to write");
                self.add("A multi-grid file with an orbital count of 0 has no voxel data");
            }

            EncodeError::IncompleteGrid {
                dimensions,
                samples,
            } => {
                let [nx, ny, nz] = dimensions;
                self.add(format!(
                    "A {nx} × {ny} × {nz} grid needs {} samples, found {samples}",
                    nx * ny * nz
                ));
                self.add("Every axis needs at least one point");
            }

            EncodeError::MultilineText(what) => {
                self.add(format!("The {what} is written as a single comment line"));
                self.add("Remove line breaks from --banner and --name");
            }

            EncodeError::InvalidAtom(index) => {
                self.add(format!("Atom {index} has a non-finite coordinate"));
                self.add("Check the source data for NaN or infinite positions");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("Check the path spelling and ensure the file exists");
            }
            ErrorKind::PermissionDenied => {
                self.add("Check file permissions with `ls -la`");
            }
            ErrorKind::InvalidData => {
                self.add("Cube files are plain text; the input may be binary or compressed");
            }
            ErrorKind::OutOfMemory => {
                self.add("The declared grid is too large to hold in memory");
                self.add("Verify the three axis point counts on lines 4 to 6");
            }
            ErrorKind::WriteZero => {
                self.add("Failed to write data (disk full?)");
            }
            ErrorKind::BrokenPipe => {
                self.add("Output consumer terminated early");
                self.add("This may occur when piping to commands like `head`");
            }
            _ => {
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let text = error_chain_text(err);

        if text.contains("terminal") {
            self.add("Provide an input file or pipe data to stdin");
        } else if text.contains("failed to open") || text.contains("failed to create") {
            self.collect_path_hints(&text);
        }
    }

    fn collect_path_hints(&mut self, text: &str) {
        if text.contains("no such file") || text.contains("not found") {
            self.add("Check that the file path is correct");
        } else if text.contains("permission denied") {
            self.add("Ensure you have the required access rights");
        } else {
            self.add("Verify the path points to a regular file");
        }
    }
}

/// Names the part of the cube grammar a 1-based line number falls in.
fn section_for_line(line: usize) -> &'static str {
    match line {
        1 | 2 => "comment lines",
        3 => "atom count and origin line",
        4..=6 => "axis lines",
        _ => "atom, orbital or voxel data",
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use cube_forge::{DecodeError, EncodeError};

    #[test]
    fn sections_follow_header_layout() {
        assert_eq!(section_for_line(2), "comment lines");
        assert_eq!(section_for_line(3), "atom count and origin line");
        assert_eq!(section_for_line(5), "axis lines");
        assert_eq!(section_for_line(40), "atom, orbital or voxel data");
    }

    #[test]
    fn decode_hints_survive_context() {
        let err = Err::<(), _>(DecodeError::malformed(4, 1, "abc"))
            .context("Failed to decode cube data from in.cube")
            .unwrap_err();
        let hints = collect_hints(&err);
        assert!(hints[0].contains("'abc'"));
        assert!(hints[0].contains("axis lines"));
    }

    #[test]
    fn missing_field_hint() {
        let err = Error::new(DecodeError::missing(3, 2));
        let hints = collect_hints(&err);
        assert!(hints[0].starts_with("Line 3 ends before field 2"));
    }

    #[test]
    fn encode_hints() {
        let err = Error::new(EncodeError::NoGridData);
        assert!(collect_hints(&err)[0].contains("zero grids"));

        let err = Error::new(EncodeError::InvalidAtom(5));
        assert!(collect_hints(&err)[0].contains("Atom 5"));

        let err = Error::new(EncodeError::IncompleteGrid {
            dimensions: [2, 3, 4],
            samples: 10,
        });
        assert_eq!(
            collect_hints(&err)[0],
            "A 2 × 3 × 4 grid needs 24 samples, found 10"
        );

        let err = Error::new(EncodeError::MultilineText("name"));
        assert!(collect_hints(&err)[0].contains("name"));
    }

    #[test]
    fn fallback_hints_for_untyped_errors() {
        let err = anyhow::anyhow!("No input file specified and stdin is a terminal.");
        assert_eq!(collect_hints(&err).len(), 1);

        let err = anyhow::anyhow!("something unrelated");
        assert!(collect_hints(&err).is_empty());
    }

    #[test]
    fn io_source_hints() {
        let io_err = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8");
        let err = Error::new(DecodeError::from(io_err));
        assert!(collect_hints(&err)[0].contains("plain text"));
    }
}
