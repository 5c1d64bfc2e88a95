//! Error types for the Rigsmith domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Business-logic edge cases (an unaffordable category, a catalog without a
//! category, a missing socket attribute) are never errors. Only contract
//! violations and I/O failures surface here.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all Rigsmith operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Catalog errors ---
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // --- Snapshot store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Conversational errors ---
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    // --- Caller contract violations ---
    #[error("Invalid preferences: {0}")]
    InvalidPreferences(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Category '{category}' is missing required column '{column}'")]
    MissingColumn { category: String, column: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Snapshot could not be encoded: {0}")]
    Encoding(String),

    #[error("Invalid snapshot id: {0}")]
    InvalidId(String),
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Answerer unavailable: {0}")]
    Unavailable(String),

    #[error("Answer failed: {0}")]
    AnswerFailed(String),
}
