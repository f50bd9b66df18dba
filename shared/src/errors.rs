//! Shared error types for the payment processing service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },

    #[error("Gateway protocol error: {message}")]
    ProtocolError { message: String },
}

impl SharedError {
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError { message: message.into() }
    }

    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::DeserializationError { message: message.into() }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::ProtocolError { message: message.into() }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
