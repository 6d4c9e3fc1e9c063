use thiserror::Error;

/// Failures while parsing a cube file.
///
/// Line numbers are 1-based; field numbers are 0-based positions of the
/// whitespace-separated token within that line.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("malformed number '{token}' at line {line}, field {field}")]
    MalformedNumber {
        line: usize,
        field: usize,
        token: String,
    },

    #[error("unexpected end of input at line {line}")]
    UnexpectedEof { line: usize },

    #[error("grid dimensions must be positive, got {dimension} at line {line}")]
    InvalidDimensions { line: usize, dimension: i64 },

    #[error("value {value} at line {line}, field {field} does not fit the expected type")]
    NumericOverflow {
        line: usize,
        field: usize,
        value: i64,
    },
}

impl DecodeError {
    pub fn malformed(line: usize, field: usize, token: impl Into<String>) -> Self {
        Self::MalformedNumber {
            line,
            field,
            token: token.into(),
        }
    }

    /// A numeric field that is absent altogether.
    pub fn missing(line: usize, field: usize) -> Self {
        Self::malformed(line, field, "")
    }
}

/// Failures while writing a cube file.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("system has no grid data to write")]
    NoGridData,

    #[error("grid of {dimensions:?} points holds {samples} samples")]
    IncompleteGrid {
        dimensions: [usize; 3],
        samples: usize,
    },

    #[error("{0} spans more than one line")]
    MultilineText(&'static str),

    #[error("atom {0} cannot be written: missing or non-finite position")]
    InvalidAtom(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_location() {
        let err = DecodeError::malformed(7, 0, "X");
        assert_eq!(err.to_string(), "malformed number 'X' at line 7, field 0");

        let err = DecodeError::UnexpectedEof { line: 12 };
        assert_eq!(err.to_string(), "unexpected end of input at line 12");

        let err = EncodeError::InvalidAtom(3);
        assert!(err.to_string().contains("atom 3"));

        let err = EncodeError::IncompleteGrid {
            dimensions: [2, 2, 2],
            samples: 0,
        };
        assert_eq!(err.to_string(), "grid of [2, 2, 2] points holds 0 samples");

        let err = EncodeError::MultilineText("banner");
        assert_eq!(err.to_string(), "banner spans more than one line");
    }

    #[test]
    fn missing_field_has_empty_token() {
        match DecodeError::missing(4, 2) {
            DecodeError::MalformedNumber { line, field, token } => {
                assert_eq!((line, field), (4, 2));
                assert!(token.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(matches!(EncodeError::from(io), EncodeError::Io { .. }));
    }
}
