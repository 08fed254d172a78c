//! Errors shared by the OBJ and MTL decoders

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::attributes::AttributeKind;
use super::face::FaceFormat;

/// Where in a text source a record was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path or name of the text being decoded
    pub file: String,
    /// 1-based line number
    pub line: usize,
}

impl Location {
    /// Create a location
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self { file: file.into(), line }
    }
}

/// Borrowed position of the record currently being decoded
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineRef<'a> {
    pub file: &'a str,
    pub line: usize,
}

impl LineRef<'_> {
    pub fn locate(self) -> Location {
        Location::new(self.file, self.line)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Fatal decode failures
///
/// Every variant aborts the decode; no partial result is returned.
#[derive(Error, Debug)]
pub enum ObjError {
    /// A geometry or material file could not be opened or read
    #[error("IO error reading {path:?}: {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A numeric field is not a valid literal
    #[error("{at}: invalid number '{field}' in field {position}")]
    MalformedNumber {
        /// Record location
        at: Location,
        /// Offending text
        field: String,
        /// 0-based position of the field within its record or token
        position: usize,
    },

    /// A face token has no recognizable slash layout
    #[error("{at}: undefined face format '{token}'")]
    UndefinedFaceFormat {
        /// Record location
        at: Location,
        /// Offending token
        token: String,
    },

    /// The tokens of one face use different slash layouts
    #[error("{at}: inconsistent face format, expected {expected} but '{token}' does not match")]
    InconsistentFaceFormat {
        /// Record location
        at: Location,
        /// Format of the first token
        expected: FaceFormat,
        /// First token that disagrees
        token: String,
    },

    /// Fewer than three vertices on a face
    #[error("{at}: face has {count} vertices, at least 3 are required")]
    FaceTooShort {
        /// Record location
        at: Location,
        /// Number of face-vertex tokens found
        count: usize,
    },

    /// More than three vertices on a face
    #[error("{at}: face has {count} vertices, only triangles are supported")]
    UnsupportedFacePolygon {
        /// Record location
        at: Location,
        /// Number of face-vertex tokens found
        count: usize,
    },

    /// A known keyword carries the wrong number of fields
    #[error("{at}: '{keyword}' expects {expected} field(s), found {found}")]
    MalformedRecord {
        /// Record location
        at: Location,
        /// Record keyword
        keyword: String,
        /// Required field count
        expected: usize,
        /// Actual field count
        found: usize,
    },

    /// A material property appeared before any `newmtl`
    #[error("{at}: '{keyword}' appears before any newmtl")]
    NoActiveMaterial {
        /// Record location
        at: Location,
        /// Record keyword
        keyword: String,
    },

    /// A face references attribute data that does not exist
    #[error("{at}: {attribute} index {index} out of range (1..={len})")]
    IndexOutOfRange {
        /// Record location
        at: Location,
        /// Which attribute array was exceeded
        attribute: AttributeKind,
        /// 1-based index as written in the source
        index: i64,
        /// Array length when the face was read
        len: usize,
    },
}

impl ObjError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Location of the failing record, if the error came from a record
    pub const fn location(&self) -> Option<&Location> {
        match self {
            Self::Io { .. } => None,
            Self::MalformedNumber { at, .. }
            | Self::UndefinedFaceFormat { at, .. }
            | Self::InconsistentFaceFormat { at, .. }
            | Self::FaceTooShort { at, .. }
            | Self::UnsupportedFacePolygon { at, .. }
            | Self::MalformedRecord { at, .. }
            | Self::NoActiveMaterial { at, .. }
            | Self::IndexOutOfRange { at, .. } => Some(at),
        }
    }

    /// 1-based line of the failing record
    pub fn line(&self) -> Option<usize> {
        self.location().map(|at| at.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location() {
        let err = ObjError::FaceTooShort {
            at: Location::new("cube.obj", 12),
            count: 2,
        };
        let message = err.to_string();
        assert!(message.starts_with("cube.obj:12"));
        assert_eq!(err.line(), Some(12));
    }

    #[test]
    fn test_io_error_has_no_line() {
        let err = ObjError::io(
            "missing.obj",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.line(), None);
        assert!(std::error::Error::source(&err).is_some());
    }
}
