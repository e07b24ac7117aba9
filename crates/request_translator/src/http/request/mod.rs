use crate::http::{HttpVersion, method::Method, proxy::Proxy};

/// The structured form of a raw request
///
/// Produced once by [`RequestParser`](crate::http::parser::RequestParser) and
/// never mutated afterwards. The headers travel separately, as the raw lines
/// they were written as.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRequest {
    /// Verb as written; see [`ParsedRequest::method`] for dispatch
    pub method: String,
    /// `"HTTP"` and the text following `HTTP/`, or both empty
    pub version: HttpVersion,
    /// `"http://"` / `"https://"` when the target carried one
    pub pre_scheme: String,
    pub path: String,
    /// Value of the first `Host` header
    pub host: String,
    pub data: String,
    pub proxy: Option<Proxy>,
}

static_assertions::assert_impl_all!(ParsedRequest: Send, Sync);

impl ParsedRequest {
    pub fn method(&self) -> Method {
        Method::from(self.method.as_str())
    }

    pub fn protocol(&self) -> &str {
        &self.version.protocol
    }

    pub fn version(&self) -> &str {
        &self.version.version
    }

    /// The scheme the request should be replayed with, `http://` unless the target said otherwise
    pub fn scheme(&self) -> &str {
        if self.pre_scheme.is_empty() {
            "http://"
        } else {
            &self.pre_scheme
        }
    }

    /// `scheme + Host + path`, without any validation
    pub fn url(&self) -> String {
        format!("{}{}{}", self.scheme(), self.host, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_defaults_to_http() {
        let request = ParsedRequest {
            method: "GET".to_string(),
            host: "foo.bar".to_string(),
            ..Default::default()
        };
        assert_eq!(request.url(), "http://foo.bar");
        assert_eq!(request.method(), Method::GET);
    }

    #[test]
    fn url_keeps_scheme_and_path() {
        let request = ParsedRequest {
            method: "get".to_string(),
            pre_scheme: "https://".to_string(),
            host: "[::1]:31337".to_string(),
            path: "/robots.txt?x=1".to_string(),
            ..Default::default()
        };
        assert_eq!(request.url(), "https://[::1]:31337/robots.txt?x=1");
        assert_eq!(request.method(), Method::GET);
    }
}
