//! Proxy override parsing
//!
//! Accepted forms are `host:port` and `scheme://host:port`, where the scheme
//! is `http` or `https` and the host is a name, an IPv4 address or a
//! bracketed IPv6 literal. The port is mandatory.

use std::fmt::Display;

use crate::http::uri::{Authority, MalformedUriError, scheme_prefix};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyErrorKind {
    MissingPort,
    InvalidPort,
    UnsupportedScheme,
    InvalidHost(MalformedUriError),
}

impl Display for ProxyErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPort => f.write_str("missing port"),
            Self::InvalidPort => f.write_str("port is not a number"),
            Self::UnsupportedScheme => f.write_str("scheme must be http or https"),
            Self::InvalidHost(err) => write!(f, "invalid host: {}", err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid proxy {input:?}: {kind}")]
pub struct ProxyParseError {
    pub kind: ProxyErrorKind,
    pub input: String,
}

/// A proxy to route generated requests through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proxy {
    /// Scheme-qualified host, e.g. `http://127.0.0.1`
    pub host: String,
    pub port: String,
}

impl Proxy {
    pub const DEFAULT_SCHEME: &'static str = "http://";

    pub fn parse(input: &str) -> Result<Self, ProxyParseError> {
        let err = |kind| ProxyParseError {
            kind,
            input: input.to_string(),
        };

        let (scheme, rest) = match scheme_prefix(input) {
            Some(scheme) => (scheme, &input[scheme.len()..]),
            None if input.contains("://") => return Err(err(ProxyErrorKind::UnsupportedScheme)),
            None => (Self::DEFAULT_SCHEME, input),
        };

        let authority =
            Authority::split(rest).map_err(|e| err(ProxyErrorKind::InvalidHost(e)))?;
        let port = match authority.port {
            None | Some("") => return Err(err(ProxyErrorKind::MissingPort)),
            Some(port) => port,
        };
        if !port.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err(ProxyErrorKind::InvalidPort));
        }
        let host = authority
            .host()
            .map_err(|e| err(ProxyErrorKind::InvalidHost(e)))?;
        log::trace!("proxy host {:?} port {}", host, port);
        Ok(Self {
            host: format!("{}{}", scheme, authority.host),
            port: port.to_string(),
        })
    }

    /// The host without its scheme prefix
    pub fn bare_host(&self) -> &str {
        scheme_prefix(&self.host).map_or(self.host.as_str(), |scheme| &self.host[scheme.len()..])
    }
}
