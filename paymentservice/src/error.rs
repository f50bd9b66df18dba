//! Service-specific error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Gateway transport failure: {message}")]
    Transport { message: String },

    #[error("Gateway rejected request: {message}")]
    Gateway { message: String },

    #[error("Storage backend failure: {message}")]
    Storage { message: String },

    #[error("No payment calculation stored for claim {claim_id}")]
    ClaimNotFound { claim_id: String },

    #[error("Stored payment record is corrupt: {message}")]
    Deserialization { message: String },

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Shared component error")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PaymentError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { message: message.into() }
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway { message: message.into() }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage { message: message.into() }
    }

    pub fn not_found(claim_id: impl Into<String>) -> Self {
        Self::ClaimNotFound { claim_id: claim_id.into() }
    }

    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization { message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}

pub type PaymentResult<T> = Result<T, PaymentError>;
