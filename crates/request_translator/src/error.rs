use crate::{
    codegen::Format,
    http::{parser::HttpParseError, proxy::ProxyParseError},
};

/// Everything that can stop a translation. None of them are retryable, the
/// same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error(transparent)]
    InvalidRequest(#[from] HttpParseError),
    #[error(transparent)]
    InvalidProxy(#[from] ProxyParseError),
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: &'static str },
    #[error("unsupported method {0:?}, only GET and POST requests can be translated")]
    UnsupportedMethod(String),
    #[error("no renderer registered for format {0}")]
    UnsupportedFormat(Format),
}

pub type TranslateResult<T> = Result<T, TranslateError>;
