//! Raw request parsing
//!
//! The input is whatever a user pasted, so the grammar is loose: `\n` or
//! `\r\n` line endings, any header casing, optional scheme and host in the
//! target, optional `HTTP/` suffix. Only the method and a `Host` header are
//! required; everything else falls back to an empty string.

use memchr::{memchr, memchr2};
use unicase::UniCase;

use crate::{
    TranslateResult,
    http::{proxy::Proxy, request::ParsedRequest},
};

mod error;
mod line;
pub use error::*;
pub use line::{RequestLine, split_target};

pub const HOST_HEADER: &str = "Host";

struct Reader<'a> {
    buf: &'a str,
    cursor: usize,
    line_cnt: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a str) -> Self {
        Self {
            buf,
            cursor: 0,
            line_cnt: 0,
        }
    }

    /// Returns the next line without its `\n` or `\r\n` terminator
    fn get_line(&mut self) -> Option<Line<'a>> {
        if self.cursor >= self.buf.len() {
            return None;
        }

        let rest = &self.buf[self.cursor..];
        let (text, consumed) = match memchr(b'\n', rest.as_bytes()) {
            Some(nl) => (&rest[..nl], nl + 1),
            None => (rest, rest.len()),
        };
        self.cursor += consumed;
        self.line_cnt += 1;

        Some(Line::new(text.strip_suffix('\r').unwrap_or(text), self.line_cnt))
    }

    /// Everything not yet consumed by [`Reader::get_line`]
    fn rest(&self) -> &'a str {
        &self.buf[self.cursor.min(self.buf.len())..]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    text: &'a str,
    /// Start of the unconsumed part of `text`
    pos: usize,
    /// 1-based line number in the raw request
    pub number: usize,
}

impl<'a> Line<'a> {
    pub fn new(text: &'a str, number: usize) -> Self {
        Self {
            text,
            pos: 0,
            number,
        }
    }

    pub fn as_str(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Blank lines, including whitespace-only ones, separate headers from the body
    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }

    /// Returns the next word (everything up to the next space or tab), skipping
    /// any run of whitespace in front of it, and advances the line
    pub fn next_word(&mut self) -> Option<&'a str> {
        let rest = self.as_str();
        let skipped = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        self.pos += skipped;
        let rest = self.as_str();
        if rest.is_empty() {
            return None;
        }

        let end = memchr2(b' ', b'\t', rest.as_bytes()).unwrap_or(rest.len());
        self.pos += end;
        Some(&rest[..end])
    }

    /// Returns everything before the first `byte` and advances past it
    pub fn next(&mut self, byte: u8) -> Option<&'a str> {
        let rest = self.as_str();
        let split = memchr(byte, rest.as_bytes())?;
        self.pos += split + 1;
        Some(&rest[..split])
    }
}

/// Parses one raw request into its header lines and a [`ParsedRequest`]
///
/// ```
/// use request_translator::http::parser::RequestParser;
///
/// let (headers, request) = RequestParser::new("GET /robots.txt HTTP/1.1\nHost: foo.bar")
///     .parse()
///     .unwrap();
/// assert_eq!(headers, ["Host: foo.bar"]);
/// assert_eq!(request.path, "/robots.txt");
/// ```
pub struct RequestParser<'a> {
    reader: Reader<'a>,
    data: Option<&'a str>,
    proxy: Option<&'a str>,
}

impl<'a> RequestParser<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            reader: Reader::new(raw),
            data: None,
            proxy: None,
        }
    }

    /// Use `data` as the body instead of whatever follows the headers
    pub fn with_data(mut self, data: Option<&'a str>) -> Self {
        self.data = data;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<&'a str>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn parse(mut self) -> TranslateResult<(Vec<String>, ParsedRequest)> {
        let proxy = self.proxy.map(Proxy::parse).transpose()?;

        let request_line = loop {
            match self.reader.get_line() {
                Some(line) if line.as_str().is_empty() => continue,
                Some(line) => break RequestLine::parse(line)?,
                None => {
                    return Err(HttpParseError::new(
                        ParseErrorKind::EmptyRequest,
                        Location::RequestLine,
                        None,
                    )
                    .into());
                }
            }
        };

        let headers = self.parse_headers()?;
        let host = resolve_host(&headers)?.to_string();

        let data = match self.data {
            Some(data) => data.to_string(),
            None => extract_body(self.reader.rest()).to_string(),
        };

        let (pre_scheme, path) = request_line.scheme_and_path();
        let request = ParsedRequest {
            method: request_line.method.to_string(),
            version: request_line.version,
            pre_scheme: pre_scheme.to_string(),
            path: path.to_string(),
            host,
            data,
            proxy,
        };
        log::debug!("parsed request {:?} with {} headers", request, headers.len());

        Ok((headers, request))
    }

    // OBNF: field-line = field-name ":" OWS field-value OWS
    // Lines are kept verbatim, only the separator is checked.
    fn parse_headers(&mut self) -> HttpParseResult<Vec<String>> {
        let mut headers = Vec::new();
        while let Some(mut line) = self.reader.get_line() {
            if line.is_blank() {
                break;
            }
            let raw = line.as_str();
            if line.next(b':').is_none() {
                return Err(HttpParseError::new(
                    ParseErrorKind::MalformedHeaderLine,
                    Location::Headers,
                    Some(line.number),
                ));
            }
            log::trace!("header line {}: {:?}", line.number, raw);
            headers.push(raw.to_string());
        }
        Ok(headers)
    }
}

/// Finds the effective Host among raw header lines
///
/// Names compare case-insensitively and the first match wins. One space after
/// the colon is dropped; any other whitespace stays part of the value.
pub fn resolve_host(headers: &[String]) -> HttpParseResult<&str> {
    let mut hosts = headers.iter().filter_map(|header| {
        let (name, value) = header.split_once(':')?;
        (UniCase::ascii(name.trim()) == UniCase::ascii(HOST_HEADER))
            .then(|| value.strip_prefix(' ').unwrap_or(value))
    });

    let host = hosts.next().filter(|host| !host.is_empty()).ok_or_else(|| {
        HttpParseError::new(ParseErrorKind::MissingHost, Location::Headers, None)
    })?;
    let extra = hosts.count();
    if extra > 0 {
        log::debug!("{} more Host headers ignored, using {:?}", extra, host);
    }
    Ok(host)
}

/// The body is whatever follows the blank line after the headers, minus
/// leading blank lines and one trailing line terminator.
fn extract_body(rest: &str) -> &str {
    let mut body = rest;
    while let Some(stripped) = body.strip_prefix("\r\n").or_else(|| body.strip_prefix('\n')) {
        body = stripped;
    }
    body.strip_suffix("\r\n")
        .or_else(|| body.strip_suffix('\n'))
        .unwrap_or(body)
}

/// Parses `raw`, optionally overriding its body and routing it through `proxy`
pub fn parse(
    raw: &str,
    data: Option<&str>,
    proxy: Option<&str>,
) -> TranslateResult<(Vec<String>, ParsedRequest)> {
    RequestParser::new(raw)
        .with_data(data)
        .with_proxy(proxy)
        .parse()
}
