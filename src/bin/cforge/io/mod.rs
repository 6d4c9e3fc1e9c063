use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

use cube_forge::io::is_cube_path;

pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

pub fn stdin_is_tty() -> bool {
    io::stdin().is_terminal()
}

pub fn stdout_is_tty() -> bool {
    io::stdout().is_terminal()
}

/// `None` and `-` both mean standard input or output.
pub fn resolve_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != "-")
}

/// A buffered input stream together with a name for messages.
pub struct InputSource {
    label: String,
    reader: Box<dyn BufRead>,
}

impl InputSource {
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Read for InputSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for InputSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

pub fn open_input(path: Option<&Path>) -> Result<InputSource> {
    let Some(p) = resolve_path(path) else {
        return Ok(InputSource {
            label: "<stdin>".to_string(),
            reader: Box::new(io::stdin().lock()),
        });
    };

    if !is_cube_path(p) {
        warn!("{} does not have a .cube extension", p.display());
    }
    let file =
        File::open(p).with_context(|| format!("Failed to open input file: {}", p.display()))?;
    Ok(InputSource {
        label: p.display().to_string(),
        reader: Box::new(BufReader::new(file)),
    })
}

pub type OutputTarget = BufWriter<Box<dyn Write>>;

pub fn create_output(path: Option<&Path>) -> Result<OutputTarget> {
    let Some(p) = resolve_path(path) else {
        return Ok(BufWriter::new(Box::new(io::stdout().lock())));
    };

    if !is_cube_path(p) {
        warn!("writing cube data to {} without a .cube extension", p.display());
    }
    let file = File::create(p)
        .with_context(|| format!("Failed to create output file: {}", p.display()))?;
    Ok(BufWriter::new(Box::new(file)))
}
