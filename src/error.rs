use csv::Error as CsvError;
use serde_json::Error as SerdeError;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// A caller-supplied value that cannot be turned into a capacity estimate.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInput {
    /// Percentile values must be strictly positive (the logarithm is undefined otherwise).
    NonPositive { value: f64 },
    /// `NaN` or an infinity where a finite number was expected.
    NotFinite { value: f64 },
    /// Text that does not parse as a number.
    NotANumber { input: String },
    /// The pessimistic (P90) value is not smaller than the optimistic (P10) value.
    Inverted { p90: f64, p10: f64 },
    /// Distinct values whose logarithms are equal in floating point, leaving no spread to fit.
    Indistinct { p90: f64, p10: f64 },
    /// A lognormal distribution whose values exceed the floating-point range.
    Overflow { log_mean: f64, log_std_dev: f64 },
    /// Batch input sequences of different lengths.
    LengthMismatch {
        area_p90: usize,
        area_p10: usize,
        power_density_p90: usize,
        power_density_p10: usize,
    },
    /// A cumulative probability outside `[0, 1)`.
    QuantileOutOfRange { q: f64 },
    /// A confidence label outside `1..=100`.
    ConfidenceOutOfRange { confidence: u8 },
    /// A chance of success outside `(0, 1]`.
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    /// One scenario of a batch failed; `index` is its position in the input sequences.
    Scenario {
        index: usize,
        key: String,
        reason: Box<InvalidInput>,
    },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::NonPositive { value } => {
                write!(f, "percentile value must be positive, got {}", value)
            }
            InvalidInput::NotFinite { value } => {
                write!(f, "expected a finite number, got {}", value)
            }
            InvalidInput::NotANumber { input } => write!(f, "not a number: {:?}", input),
            InvalidInput::Inverted { p90, p10 } => write!(
                f,
                "pessimistic P90 ({}) must be smaller than optimistic P10 ({})",
                p90, p10
            ),
            InvalidInput::Indistinct { p90, p10 } => write!(
                f,
                "P90 ({}) and P10 ({}) are too close to fit a spread",
                p90, p10
            ),
            InvalidInput::Overflow {
                log_mean,
                log_std_dev,
            } => write!(
                f,
                "capacity out of range (log mean {}, log standard deviation {})",
                log_mean, log_std_dev
            ),
            InvalidInput::LengthMismatch {
                area_p90,
                area_p10,
                power_density_p90,
                power_density_p10,
            } => write!(
                f,
                "scenario iterables must have equal length (area P90: {}, area P10: {}, \
                 power density P90: {}, power density P10: {})",
                area_p90, area_p10, power_density_p90, power_density_p10
            ),
            InvalidInput::QuantileOutOfRange { q } => {
                write!(f, "quantile must lie in [0, 1), got {}", q)
            }
            InvalidInput::ConfidenceOutOfRange { confidence } => {
                write!(f, "confidence must lie in 1..=100, got {}", confidence)
            }
            InvalidInput::ProbabilityOutOfRange { name, value } => {
                write!(f, "{} chance of success must lie in (0, 1], got {}", name, value)
            }
            InvalidInput::Scenario { index, key, reason } => {
                write!(f, "scenario #{} ({}): {}", index, key, reason)
            }
        }
    }
}

#[derive(Debug)]
pub enum Error {
    InvalidInput(InvalidInput),
    AccessError { path: PathBuf, inner: io::Error },
    SerdeError(SerdeError),
    CsvError(CsvError),
}

impl Error {
    /// Returns `true` if the failure was caused by the input values rather than by I/O.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// Returns the input fault, if this is one.
    pub fn invalid_input(&self) -> Option<&InvalidInput> {
        match self {
            Error::InvalidInput(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(inner) => write!(f, "Invalid input: {}", inner),
            Error::AccessError { path, inner } => {
                write!(f, "Failed to access file {:?}: {}", path, inner)
            }
            Error::SerdeError(inner) => write!(f, "Failed to serialize results: {}", inner),
            Error::CsvError(inner) => write!(f, "CSV error: {}", inner),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::InvalidInput(_) => None,
            Error::AccessError { inner, .. } => Some(inner),
            Error::SerdeError(inner) => Some(inner),
            Error::CsvError(inner) => Some(inner),
        }
    }
}

impl From<InvalidInput> for Error {
    fn from(inner: InvalidInput) -> Error {
        Error::InvalidInput(inner)
    }
}

impl From<SerdeError> for Error {
    fn from(inner: SerdeError) -> Error {
        Error::SerdeError(inner)
    }
}

impl From<CsvError> for Error {
    fn from(inner: CsvError) -> Error {
        Error::CsvError(inner)
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;

/// Checks that `value` is a finite number.
pub(crate) fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidInput::NotFinite { value }.into())
    }
}

/// Parses a decimal number typed by a user or read from a scenario file.
pub fn parse_value(input: &str) -> Result<f64> {
    let value = input
        .trim()
        .parse::<f64>()
        .map_err(|_| InvalidInput::NotANumber {
            input: input.to_owned(),
        })?;
    finite(value)
}
