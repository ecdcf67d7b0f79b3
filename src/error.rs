//! Application Errors
//!
//! The tree/kanban algebras never fail; these cover the ambient layers
//! (configuration, logging) and invariant breaches caught while rendering.

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config is not valid JSON: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error(transparent)]
    Logger(#[from] console_logger::LoggerError),

    #[error("column `{column}` references unknown card `{card_id}`")]
    MissingCard { column: String, card_id: String },
}
