//! Diagnostic error types for the kitabu client.
//!
//! Errors carry miette `#[diagnostic]` derives with error codes and help
//! text. Application-level failures (the catalog answering `success: false`)
//! are not errors — the dispatcher folds those into user-facing notices.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for kitabu.
#[derive(Debug, Error, Diagnostic)]
pub enum KitabuError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(#[from] ClientError),
}

/// Errors from talking to the catalog service.
#[derive(Debug, Error, Diagnostic)]
pub enum ClientError {
    #[error("catalog request failed: {message}")]
    #[diagnostic(
        code(kitabu::client::request),
        help(
            "Is the catalog service reachable? Set KITABU_API_URL or pass \
             --api-url to point at a running instance."
        )
    )]
    Request { message: String },

    #[error("unexpected response from catalog: {message}")]
    #[diagnostic(
        code(kitabu::client::response),
        help("The catalog returned a body that is not the expected JSON envelope.")
    )]
    Response { message: String },
}

/// Convenience alias for catalog client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Convenience alias for functions returning kitabu results.
pub type KitabuResult<T> = Result<T, KitabuError>;
