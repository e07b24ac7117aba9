use std::{
    net::{AddrParseError, Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

use memchr::memchr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedUriError {
    #[error("invalid IPv6 address")]
    InvalidAddress(#[from] AddrParseError),
    #[error("IP literal is missing its closing ']'")]
    UnterminatedIpLiteral,
    #[error("unexpected characters after IP literal")]
    TrailingIpLiteral,
    #[error("empty host")]
    EmptyHost,
}

/// Scheme prefixes recognised in front of a request target or proxy.
pub const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Returns the scheme prefix (`"http://"` or `"https://"`) `s` starts with.
pub fn scheme_prefix(s: &str) -> Option<&'static str> {
    SCHEMES.into_iter().find(|scheme| s.starts_with(scheme))
}

/// The kind of host found in an authority
/// Host forms from RFC 3986 3.2.2
/// ABNF: host = IP-literal / IPv4address / reg-name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriHost {
    IpLiteral(Ipv6Addr),
    Ipv4(Ipv4Addr),
    RegName(String),
}

impl FromStr for UriHost {
    type Err = MalformedUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(MalformedUriError::EmptyHost);
        }
        if let Some(inner) = s.strip_prefix('[') {
            let inner = inner
                .strip_suffix(']')
                .ok_or(MalformedUriError::UnterminatedIpLiteral)?;
            return Ok(Self::IpLiteral(inner.parse()?));
        }
        match Ipv4Addr::from_str(s) {
            Ok(ipv4) => Ok(Self::Ipv4(ipv4)),
            Err(_) => Ok(Self::RegName(s.to_string())),
        }
    }
}

/// A `host[:port]` pair, borrowed verbatim from the input.
///
/// A bracketed IPv6 literal is taken as a single unit, so the colons inside
/// it never split off a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authority<'a> {
    pub host: &'a str,
    pub port: Option<&'a str>,
}

impl<'a> Authority<'a> {
    pub fn split(s: &'a str) -> Result<Self, MalformedUriError> {
        let bytes = s.as_bytes();
        let (host, rest) = if bytes.first() == Some(&b'[') {
            let close = memchr(b']', bytes).ok_or(MalformedUriError::UnterminatedIpLiteral)?;
            s.split_at(close + 1)
        } else {
            match memchr(b':', bytes) {
                Some(colon) => s.split_at(colon),
                None => (s, ""),
            }
        };

        let port = match rest.strip_prefix(':') {
            Some(port) => Some(port),
            None if rest.is_empty() => None,
            None => return Err(MalformedUriError::TrailingIpLiteral),
        };

        Ok(Self { host, port })
    }

    pub fn host(&self) -> Result<UriHost, MalformedUriError> {
        self.host.parse()
    }
}

/// Byte offset of the end of the authority at the start of `s`, which is the
/// first `/` outside an IP literal or the end of the string.
pub fn authority_end(s: &str) -> usize {
    let bytes = s.as_bytes();
    let search_from = if bytes.first() == Some(&b'[') {
        memchr(b']', bytes).map_or(0, |close| close + 1)
    } else {
        0
    };
    memchr(b'/', &bytes[search_from..]).map_or(s.len(), |slash| search_from + slash)
}

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encodes everything outside the RFC 3986 unreserved set, so the
/// result is safe as a whole query component
pub fn url_encode(input: &[u8]) -> String {
    let mut encoded = String::with_capacity(input.len() * 3);
    for &byte in input {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => {
                encoded.push('%');
                encoded.push(HEX[usize::from(byte >> 4)] as char);
                encoded.push(HEX[usize::from(byte & 0x0F)] as char);
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_host_valid_ipv6() {
        let host: UriHost = "[::1]".parse().unwrap();
        assert_eq!(host, UriHost::IpLiteral(Ipv6Addr::LOCALHOST));
    }

    #[test]
    fn test_uri_host_invalid_ipv6() {
        let host: Result<UriHost, _> = "[1234::gggg]".parse();
        assert!(matches!(host, Err(MalformedUriError::InvalidAddress(_))))
    }

    #[test]
    fn test_uri_host_ipv4_and_name() {
        assert_eq!(
            "127.0.0.1".parse::<UriHost>().unwrap(),
            UriHost::Ipv4(Ipv4Addr::LOCALHOST)
        );
        assert_eq!(
            "foo.bar".parse::<UriHost>().unwrap(),
            UriHost::RegName("foo.bar".to_string())
        );
        assert_eq!("".parse::<UriHost>(), Err(MalformedUriError::EmptyHost));
    }

    #[test]
    fn test_authority_split() {
        let cases: &[(&str, &str, Option<&str>)] = &[
            ("foo.bar", "foo.bar", None),
            ("foo.bar:31337", "foo.bar", Some("31337")),
            ("127.0.0.1:8000", "127.0.0.1", Some("8000")),
            ("[::1]", "[::1]", None),
            ("[::1]:31337", "[::1]", Some("31337")),
            ("[2001:db8::7]:", "[2001:db8::7]", Some("")),
        ];
        for (input, host, port) in cases {
            let authority = Authority::split(input).unwrap();
            assert_eq!(authority.host, *host, "{input}");
            assert_eq!(authority.port, *port, "{input}");
        }
    }

    #[test]
    fn test_authority_split_bad_literal() {
        assert_eq!(
            Authority::split("[::1"),
            Err(MalformedUriError::UnterminatedIpLiteral)
        );
        assert_eq!(
            Authority::split("[::1]x"),
            Err(MalformedUriError::TrailingIpLiteral)
        );
    }

    #[test]
    fn test_authority_end() {
        assert_eq!(authority_end("foo.bar/robots.txt"), 7);
        assert_eq!(authority_end("foo.bar"), 7);
        assert_eq!(authority_end("[::1]:31337/robots.txt"), 11);
        assert_eq!(authority_end("[::1]"), 5);
    }

    #[test]
    fn test_scheme_prefix() {
        assert_eq!(scheme_prefix("https://foo"), Some("https://"));
        assert_eq!(scheme_prefix("http://foo"), Some("http://"));
        assert_eq!(scheme_prefix("ftp://foo"), None);
        assert_eq!(scheme_prefix("/robots.txt"), None);
    }

    #[test]
    fn query_encoding() {
        assert_eq!(url_encode(b"q=rust lang"), "q%3Drust%20lang");
        assert_eq!(url_encode(b"a/b?c"), "a%2Fb%3Fc");
        assert_eq!(url_encode(b"keep-these_.~09"), "keep-these_.~09");
        assert_eq!(url_encode(b""), "");
    }

    #[test]
    fn query_encoding_is_per_byte() {
        assert_eq!(url_encode("ü".as_bytes()), "%C3%BC");
        assert_eq!(url_encode(&[0x00, 0x7F, 0xFF]), "%00%7F%FF");
        assert_eq!(url_encode(b"{'x'}"), "%7B%27x%27%7D");
    }
}
