use thiserror::Error;

/// Failures of the cycle decomposition core.
///
/// These are local to one computation: nothing is retried, the caller aborts
/// the analysis that produced them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },
    #[error("series '{a}' and '{b}' have no overlapping date range")]
    EmptyIntersection { a: String, b: String },
    #[error("cycle series '{a}' and '{b}' are not aligned on identical dates")]
    MisalignedSeries { a: String, b: String },
    #[error("division by zero: series '{0}' has zero variance")]
    DivisionByZero(String),
    #[error("smoothing parameter must be positive and finite, got {0}")]
    InvalidLambda(f64),
    #[error("series '{name}' dates must be strictly increasing (at {date})")]
    UnorderedDates { name: String, date: chrono::NaiveDate },
    #[error("series '{name}' has a non-finite value at {date}")]
    NonFiniteValue { name: String, date: chrono::NaiveDate },
    #[error("series '{name}' has a non-positive value at {date}; cannot take logs")]
    NonPositiveValue { name: String, date: chrono::NaiveDate },
    #[error("HP filter system could not be solved for {n} observations")]
    Solver { n: usize },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<CycleError> for AppError {
    fn from(err: CycleError) -> Self {
        AppError::new(3, format!("Analysis failed: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
