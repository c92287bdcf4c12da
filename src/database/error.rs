/**
 * Database Error Types
 *
 * Errors produced while opening, verifying or closing the document-database
 * connection. None of these ever escape the connection lifecycle manager:
 * they are logged and reflected through the readiness flag instead.
 */

use thiserror::Error;

/// Errors raised by a `Connector` or an open `Connection`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    /// The endpoint URI could not be parsed into client options
    #[error("Invalid database URI: {message}")]
    InvalidUri {
        /// Human-readable error message
        message: String,
    },

    /// The client could not be created or the server could not be reached
    #[error("Failed to connect to database: {message}")]
    Connect {
        /// Human-readable error message
        message: String,
    },

    /// The server was reachable but did not answer the liveness ping
    #[error("Database ping failed: {message}")]
    Ping {
        /// Human-readable error message
        message: String,
    },

    /// Closing the connection failed
    #[error("Failed to close database connection: {message}")]
    Close {
        /// Human-readable error message
        message: String,
    },
}

impl DatabaseError {
    pub fn invalid_uri(message: impl Into<String>) -> Self {
        Self::InvalidUri {
            message: message.into(),
        }
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }

    pub fn ping(message: impl Into<String>) -> Self {
        Self::Ping {
            message: message.into(),
        }
    }

    pub fn close(message: impl Into<String>) -> Self {
        Self::Close {
            message: message.into(),
        }
    }
}
