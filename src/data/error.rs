use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Fatal load errors
// ---------------------------------------------------------------------------

/// Errors that stop a dataset from being loaded at all.
#[derive(Debug, Error)]
pub enum DataError {
    /// The source file is missing or cannot be read.
    #[error("movie data not available at {}: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header row lacks one or more required columns.
    #[error("{} is missing required column(s): {}", .path.display(), .missing.join(", "))]
    Malformed { path: PathBuf, missing: Vec<String> },

    /// The delimited text itself is broken (e.g. unterminated quote).
    #[error("failed to parse {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl DataError {
    /// Map a `csv::Error` onto the taxonomy: I/O problems mean the file is
    /// unavailable, everything else is a parse failure.
    pub(crate) fn from_csv(path: PathBuf, err: csv::Error) -> Self {
        if !err.is_io_error() {
            return DataError::Csv { path, source: err };
        }
        let source = match err.into_kind() {
            csv::ErrorKind::Io(io) => io,
            other => std::io::Error::new(std::io::ErrorKind::Other, format!("{other:?}")),
        };
        DataError::Unavailable { path, source }
    }
}

// ---------------------------------------------------------------------------
// Non-fatal per-row coercion failures
// ---------------------------------------------------------------------------

/// Why a single field of a row could not be turned into a record value.
///
/// These never abort a load: the row is dropped and counted.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    Missing { column: &'static str },
    Unparsable { column: &'static str, raw: String },
    OutOfRange { column: &'static str, raw: String },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Missing { column } => write!(f, "'{column}' is empty"),
            FieldError::Unparsable { column, raw } => {
                write!(f, "'{column}' value {raw:?} is not numeric")
            }
            FieldError::OutOfRange { column, raw } => {
                write!(f, "'{column}' value {raw:?} is out of range")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_lists_every_missing_column() {
        let err = DataError::Malformed {
            path: PathBuf::from("movies.csv"),
            missing: vec!["Gross".into(), "Genre".into()],
        };
        assert_eq!(
            err.to_string(),
            "movies.csv is missing required column(s): Gross, Genre"
        );
    }

    #[test]
    fn unavailable_points_at_the_path() {
        let err = DataError::Unavailable {
            path: PathBuf::from("/data/movies.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/data/movies.csv"));
    }

    #[test]
    fn field_error_display() {
        let e = FieldError::Unparsable {
            column: "IMDB_Rating",
            raw: "N/A".into(),
        };
        assert_eq!(e.to_string(), "'IMDB_Rating' value \"N/A\" is not numeric");
    }
}
