use std::fmt;

/// Errors returned by goosempl functions
///
/// All errors are raised synchronously for invalid arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Unknown bin-edge mode string
    UnknownMode(String),
    /// Bin-edges were given together with the uniform-count mode,
    /// which only accepts a number of bins
    EdgesWithUniform,
    /// The minimum count per bin is not a non-negative integer
    NonIntegerMinCount(f64),
    /// The input data holds no (usable) value
    EmptyData,
    /// Data must be strictly positive (e.g. log-spaced bins, log axis limits)
    NonPositiveData,
    /// Two inputs that must have the same length do not
    LengthMismatch {
        /// Name of the argument with mismatching length
        what: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },
    /// Too few usable data points for the requested operation
    InsufficientData {
        /// Required number of points
        required: usize,
        /// Available number of points
        available: usize,
    },
    /// The data does not allow to determine the parameters (e.g. all x are identical)
    DegenerateData,
    /// A pinned parameter must be strictly positive
    NonPositiveParameter(&'static str),
    /// The operation requires logarithmic x and y axes
    NotLogLog,
    /// Bin-edges must hold at least two strictly increasing values
    InvalidEdges,
    /// Inconsistent combination of arguments
    InconsistentArgs(String),
    /// Unknown theme preset name
    UnknownPreset(String),
    /// Unknown colormap name
    UnknownColormap(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownMode(mode) => write!(f, "Unknown bin-edge mode: {:?}", mode),
            Error::EdgesWithUniform => {
                write!(f, "Only the number of bins can be specified in uniform mode")
            }
            Error::NonIntegerMinCount(val) => {
                write!(f, "Minimum count must be a non-negative integer, got {}", val)
            }
            Error::EmptyData => write!(f, "Empty data"),
            Error::NonPositiveData => write!(f, "Data must be strictly positive"),
            Error::LengthMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "Length mismatch for {}: expected {}, got {}",
                what, expected, actual
            ),
            Error::InsufficientData {
                required,
                available,
            } => write!(
                f,
                "Insufficient data: {} points required, {} available",
                required, available
            ),
            Error::DegenerateData => write!(f, "Degenerate data, cannot determine parameters"),
            Error::NonPositiveParameter(name) => {
                write!(f, "Parameter '{}' must be strictly positive", name)
            }
            Error::NotLogLog => write!(
                f,
                "Only works on a log-log scale, where a power-law is a straight line"
            ),
            Error::InvalidEdges => {
                write!(f, "Bin-edges must hold at least two increasing values")
            }
            Error::InconsistentArgs(reason) => write!(f, "Inconsistent arguments: {}", reason),
            Error::UnknownPreset(name) => write!(f, "Unknown theme preset: {:?}", name),
            Error::UnknownColormap(name) => write!(f, "Unknown colormap: {:?}", name),
        }
    }
}

impl std::error::Error for Error {}

/// Check that `actual` has the `expected` length
pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), Error> {
    if expected != actual {
        Err(Error::LengthMismatch {
            what,
            expected,
            actual,
        })
    } else {
        Ok(())
    }
}
