use smallvec::SmallVec;

use crate::http::{
    HttpVersion,
    parser::{HttpParseError, HttpParseResult, Line, Location, ParseErrorKind},
    uri::{authority_end, scheme_prefix},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: &'a str,
    pub target: Option<&'a str>,
    pub version: HttpVersion,
}

impl<'a> RequestLine<'a> {
    // OBNF: request-line = method SP request-target SP HTTP-version
    // Only the method is required, everything after it is best effort.
    pub fn parse(mut line: Line<'a>) -> HttpParseResult<Self> {
        let mut words = SmallVec::<[&str; 3]>::new();
        while let Some(word) = line.next_word() {
            words.push(word);
        }

        let method = *words.first().ok_or_else(|| {
            HttpParseError::new(
                ParseErrorKind::MissingMethod,
                Location::RequestLine,
                Some(line.number),
            )
        })?;
        let target = words.get(1).copied();
        let version = words
            .get(2)
            .and_then(|suffix| HttpVersion::from_suffix(suffix))
            .unwrap_or_default();
        if words.len() > 3 {
            log::debug!(
                "ignoring {} trailing request line tokens",
                words.len() - 3
            );
        }

        Ok(Self {
            method,
            target,
            version,
        })
    }

    /// Splits the target into its scheme prefix and path
    ///
    /// The target is only trusted when the line ends in an `HTTP/` token; a
    /// bare `GET /` yields an empty path.
    pub fn scheme_and_path(&self) -> (&'static str, &'a str) {
        match self.target {
            Some(target) if !self.version.is_empty() => split_target(target),
            _ => ("", ""),
        }
    }
}

/// Splits `target` into `(pre_scheme, path)`. The authority between the two is
/// dropped, the Host header is the authority that counts.
pub fn split_target(target: &str) -> (&'static str, &str) {
    let Some(scheme) = scheme_prefix(target) else {
        return ("", target);
    };
    let rest = &target[scheme.len()..];
    let end = authority_end(rest);
    log::trace!("target authority {:?}", &rest[..end]);
    (scheme, &rest[end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(s: &str) -> Line<'_> {
        Line::new(s, 1)
    }

    #[test]
    fn full_request_line() {
        let rl = RequestLine::parse(line("GET /robots.txt HTTP/1.1")).unwrap();
        assert_eq!(rl.method, "GET");
        assert_eq!(rl.target, Some("/robots.txt"));
        assert_eq!(rl.version.protocol, "HTTP");
        assert_eq!(rl.version.version, "1.1");
        assert_eq!(rl.scheme_and_path(), ("", "/robots.txt"));
    }

    #[test]
    fn missing_suffix_drops_path() {
        let rl = RequestLine::parse(line("GET /")).unwrap();
        assert_eq!(rl.target, Some("/"));
        assert!(rl.version.is_empty());
        assert_eq!(rl.scheme_and_path(), ("", ""));
    }

    #[test]
    fn method_only() {
        let rl = RequestLine::parse(line("GET")).unwrap();
        assert_eq!(rl.method, "GET");
        assert_eq!(rl.target, None);
        assert_eq!(rl.scheme_and_path(), ("", ""));
    }

    #[test]
    fn missing_method() {
        let err = RequestLine::parse(line("  \t ")).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingMethod);
        assert_eq!(err.location, Location::RequestLine);
    }

    #[test]
    fn non_http_suffix() {
        let rl = RequestLine::parse(line("GET / SPDY/3")).unwrap();
        assert!(rl.version.is_empty());
    }

    #[test]
    fn split_targets() {
        let cases: &[(&str, &str, &str)] = &[
            ("/robots.txt", "", "/robots.txt"),
            ("/;foo=bar", "", "/;foo=bar"),
            ("https://google.com/robots.txt", "https://", "/robots.txt"),
            ("https://google.com:31337/robots.txt", "https://", "/robots.txt"),
            ("http://127.0.0.1:31337/a?b#c", "http://", "/a?b#c"),
            ("https://[::1]/robots.txt", "https://", "/robots.txt"),
            ("https://[::1]:31337/robots.txt", "https://", "/robots.txt"),
            ("https://foo.bar", "https://", ""),
        ];
        for (target, scheme, path) in cases {
            assert_eq!(split_target(target), (*scheme, *path), "{target}");
        }
    }
}
