use thiserror::Error;

/// Result alias for `rock`.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad failure classes.
///
/// Every [`Error`] maps onto exactly one of these via [`Error::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad parameters, labels or metric names.
    Configuration,
    /// Attribute vectors of unequal length.
    Dimension,
    /// Values that cannot be read as binary attributes.
    DataFormat,
    /// Reading inputs or writing reports failed.
    Io,
}

/// Errors returned by the clustering pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Input had no records.
    #[error("empty input provided")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// Requested cluster count cannot be reached.
    #[error("cannot create {requested} clusters from {n_items} records")]
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of records.
        n_items: usize,
    },

    /// Similarity metric identifier is not recognized.
    #[error("unsupported similarity metric '{0}' (expected JC or SMC)")]
    UnsupportedMetric(String),

    /// Label list length disagrees with the matrix shape.
    #[error("{axis} labels: expected {expected}, found {found}")]
    LabelCountMismatch {
        /// `"row"` or `"column"`.
        axis: &'static str,
        /// Rows or columns in the matrix.
        expected: usize,
        /// Labels supplied.
        found: usize,
    },

    /// The same label appears twice on one axis.
    #[error("duplicate {axis} label '{label}'")]
    DuplicateLabel {
        /// `"row"` or `"column"`.
        axis: &'static str,
        /// Offending label.
        label: String,
    },

    /// A record label was looked up but is not part of the profile.
    #[error("unknown record label '{0}'")]
    UnknownLabel(String),

    /// Records have different attribute counts.
    #[error("dimension mismatch at record {row}: expected {expected} attributes, found {found}")]
    DimensionMismatch {
        /// Offending record.
        row: usize,
        /// Attribute count of the first record.
        expected: usize,
        /// Attribute count of the offending record.
        found: usize,
    },

    /// Two attribute vectors compared pairwise have different lengths.
    #[error("length mismatch: {left} attributes vs {right}")]
    LengthMismatch {
        /// Length of the first vector.
        left: usize,
        /// Length of the second vector.
        right: usize,
    },

    /// Attribute value is not `0` or `1`.
    #[error("non-binary value '{value}' at record {row}, attribute {col}")]
    NonBinaryValue {
        /// Record index.
        row: usize,
        /// Attribute index.
        col: usize,
        /// Raw token.
        value: String,
    },

    /// I/O failure while loading inputs or writing reports.
    #[error("{context}: {source}")]
    Io {
        /// What was being read or written.
        context: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput
            | Error::InvalidParameter { .. }
            | Error::InvalidClusterCount { .. }
            | Error::UnsupportedMetric(_)
            | Error::LabelCountMismatch { .. }
            | Error::DuplicateLabel { .. }
            | Error::UnknownLabel(_) => ErrorKind::Configuration,
            Error::DimensionMismatch { .. } | Error::LengthMismatch { .. } => {
                ErrorKind::Dimension
            }
            Error::NonBinaryValue { .. } => ErrorKind::DataFormat,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}
