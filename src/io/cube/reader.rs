use std::io::{self, BufRead};
use std::str::FromStr;

use log::{debug, trace};

use crate::io::{ReadConfig, error::DecodeError, util};
use crate::model::system::System;

pub fn read<R: BufRead>(reader: R, config: &ReadConfig) -> Result<System, DecodeError> {
    let mut system = System::new();
    read_into(reader, &mut system, config)?;
    Ok(system)
}

/// Decodes a cube file into `system`, appending atoms and grids.
///
/// On error the system may already hold the atoms (and grids) decoded before
/// the failure; callers that reuse a system should discard it.
pub fn read_into<R: BufRead>(
    reader: R,
    system: &mut System,
    config: &ReadConfig,
) -> Result<(), DecodeError> {
    let mut cursor = LineCursor::new(reader);

    let (_, name) = cursor.read_line()?;
    system.set_data("name", name);
    let (_, _title) = cursor.read_line()?;

    let atom_count: i32 = cursor.parse_token()?;
    let mut min = [0.0; 3];
    for component in min.iter_mut() {
        *component = cursor.parse_token()?;
    }
    cursor.finish_line();

    let (dimensions, spacing) = read_axes(&mut cursor)?;
    debug!(
        "cube header: {} atoms, grid {}x{}x{}",
        atom_count, dimensions[0], dimensions[1], dimensions[2]
    );

    for _ in 0..atom_count.unsigned_abs() {
        read_atom(&mut cursor, system)?;
    }

    let orbitals = if atom_count < 0 {
        Some(read_orbital_list(&mut cursor)?)
    } else {
        None
    };
    let cube_count = orbitals.as_ref().map_or(1, Vec::len);

    system.perceive_bonds_simple_with(config.bond_tolerance, config.min_bond_distance);

    let min = util::to_internal(min);
    let spacing = util::to_internal(spacing);
    let point_count = dimensions.iter().product::<usize>();

    for index in 0..cube_count {
        trace!("reading grid {} of {}", index + 1, cube_count);
        let values = read_values(&mut cursor, point_count)?;
        cursor.finish_line();

        let cube = system.add_cube();
        cube.set_limits(min, dimensions, spacing);
        cube.set_orbital(orbitals.as_ref().map(|list| list[index]));
        cube.set_data(values).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    }

    debug!(
        "decoded {} atoms, {} bonds, {} grids",
        system.atom_count(),
        system.bond_count(),
        system.cube_count()
    );
    Ok(())
}

/// Reads the three axis lines. Only the diagonal component of each axis
/// vector is kept; the off-diagonal ones must still be numbers.
fn read_axes<R: BufRead>(
    cursor: &mut LineCursor<R>,
) -> Result<([usize; 3], [f64; 3]), DecodeError> {
    let mut dimensions = [0usize; 3];
    let mut spacing = [0.0; 3];
    let mut total = 1usize;

    for axis in 0..3 {
        let (line_no, line) = cursor.read_line()?;
        let fields: Vec<&str> = line.split_whitespace().collect();

        let count: i64 = parse_field(&fields, 0, line_no)?;
        let dimension = usize::try_from(count)
            .ok()
            .filter(|&d| d > 0)
            .ok_or(DecodeError::InvalidDimensions {
                line: line_no,
                dimension: count,
            })?;
        total = total
            .checked_mul(dimension)
            .ok_or(DecodeError::InvalidDimensions {
                line: line_no,
                dimension: count,
            })?;

        let mut vector = [0.0; 3];
        for (k, component) in vector.iter_mut().enumerate() {
            *component = parse_field(&fields, k + 1, line_no)?;
        }
        if vector.iter().enumerate().any(|(k, &c)| k != axis && c != 0.0) {
            debug!("line {line_no}: ignoring off-diagonal axis components {vector:?}");
        }

        dimensions[axis] = dimension;
        spacing[axis] = vector[axis];
    }

    Ok((dimensions, spacing))
}

fn read_atom<R: BufRead>(
    cursor: &mut LineCursor<R>,
    system: &mut System,
) -> Result<(), DecodeError> {
    let (line_no, line) = cursor.read_line()?;
    let fields: Vec<&str> = line.split_whitespace().collect();

    let number: i64 = parse_field(&fields, 0, line_no)?;
    let atomic_number = u8::try_from(number).map_err(|_| DecodeError::NumericOverflow {
        line: line_no,
        field: 0,
        value: number,
    })?;
    let _charge: f64 = parse_field(&fields, 1, line_no)?;

    let mut position = [0.0; 3];
    for (k, component) in position.iter_mut().enumerate() {
        *component = parse_field(&fields, k + 2, line_no)?;
    }

    system
        .add_atom(atomic_number)
        .set_position(util::to_internal(position));
    Ok(())
}

fn read_orbital_list<R: BufRead>(cursor: &mut LineCursor<R>) -> Result<Vec<u32>, DecodeError> {
    let count: u32 = cursor.parse_token()?;
    let mut orbitals = Vec::new();
    for _ in 0..count {
        orbitals.push(cursor.parse_token()?);
    }
    cursor.finish_line();
    debug!("multi-cube file with orbitals {orbitals:?}");
    Ok(orbitals)
}

fn read_values<R: BufRead>(
    cursor: &mut LineCursor<R>,
    point_count: usize,
) -> Result<Vec<f32>, DecodeError> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(point_count)
        .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
    for _ in 0..point_count {
        values.push(cursor.parse_token()?);
    }
    Ok(values)
}

fn parse_field<T: FromStr>(
    fields: &[&str],
    index: usize,
    line_no: usize,
) -> Result<T, DecodeError> {
    let token = fields
        .get(index)
        .ok_or_else(|| DecodeError::missing(line_no, index))?;
    token
        .parse()
        .map_err(|_| DecodeError::malformed(line_no, index, *token))
}

/// Reads a text stream both line by line and token by token.
///
/// Token reads continue across line breaks and leave the rest of their line
/// pending; [`finish_line`](Self::finish_line) drops that remainder so the
/// next read starts on a fresh line.
struct LineCursor<R> {
    reader: R,
    line_no: usize,
    current: Option<String>,
    offset: usize,
    field: usize,
}

impl<R: BufRead> LineCursor<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            current: None,
            offset: 0,
            field: 0,
        }
    }

    fn fetch(&mut self) -> Result<Option<String>, DecodeError> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        let trimmed_len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed_len);
        Ok(Some(buf))
    }

    /// Returns the unread rest of a partially consumed line, or else the next
    /// line, together with its line number.
    fn read_line(&mut self) -> Result<(usize, String), DecodeError> {
        if let Some(mut line) = self.current.take() {
            return Ok((self.line_no, line.split_off(self.offset)));
        }
        let line = self.fetch()?.ok_or(DecodeError::UnexpectedEof {
            line: self.line_no + 1,
        })?;
        Ok((self.line_no, line))
    }

    fn finish_line(&mut self) {
        self.current = None;
    }

    fn has_token(&self) -> bool {
        self.current
            .as_deref()
            .is_some_and(|line| !line[self.offset..].trim_start().is_empty())
    }

    fn next_token(&mut self) -> Result<(&str, usize, usize), DecodeError> {
        while !self.has_token() {
            let line = self.fetch()?.ok_or(DecodeError::UnexpectedEof {
                line: self.line_no + 1,
            })?;
            self.current = Some(line);
            self.offset = 0;
            self.field = 0;
        }

        let line = self.current.as_deref().unwrap_or_default();
        let rest = &line[self.offset..];
        let trimmed = rest.trim_start();
        let start = self.offset + (rest.len() - trimmed.len());
        let end = start + trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());

        let field = self.field;
        self.offset = end;
        self.field += 1;
        Ok((&line[start..end], self.line_no, field))
    }

    fn parse_token<T: FromStr>(&mut self) -> Result<T, DecodeError> {
        let (token, line, field) = self.next_token()?;
        token
            .parse()
            .map_err(|_| DecodeError::malformed(line, field, token))
    }
}
