use thiserror::Error;

pub type TkResult<T> = Result<T, TkError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TkError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value for {what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },
}
