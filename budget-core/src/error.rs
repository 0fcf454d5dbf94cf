//! Errors raised by the record store and the edit sessions.
//!
//! - [`Validation`] when a required field is empty or an amount does not parse.
//! - [`NotFound`] when an update targets a record that no longer exists.
//!
//! Aggregation never fails; deletes are idempotent and never fail either.
//!
//!  [`Validation`]: BudgetError::Validation
//!  [`NotFound`]: BudgetError::NotFound
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BudgetError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
}

impl BudgetError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, BudgetError>;
