use crate::transport::Channel;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum EngineError {
    MessageTooLong { length: usize, limit: usize },
    EmptyMessage,
    InvalidChannel(String),
    TransportNotFound(Channel),
    TransportFailure(String),
    InternalError(Box<dyn Error + Send + Sync>),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::MessageTooLong { length, limit } => {
                write!(f, "message length {length} exceeds the limit of {limit}")
            }
            EngineError::EmptyMessage => write!(f, "message must not be empty"),
            EngineError::InvalidChannel(method) => {
                write!(f, "unknown delivery method: {method}")
            }
            EngineError::TransportNotFound(channel) => {
                write!(f, "no transport registered for channel: {channel}")
            }
            EngineError::TransportFailure(error) => write!(f, "transport failure: {error}"),
            EngineError::InternalError(error) => write!(f, "{error}"),
        }
    }
}

impl Error for EngineError {}
