use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    RequestLine,
    Headers,
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::RequestLine => "request line",
            Self::Headers => "headers",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// Nothing but whitespace was supplied
    EmptyRequest,
    /// The request line has no method token
    MissingMethod,
    /// A header line without a `:` separator
    MalformedHeaderLine,
    /// No header named `Host` (in any casing), or its value is empty
    MissingHost,
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRequest => f.write_str("empty request"),
            Self::MissingMethod => f.write_str("missing method"),
            Self::MalformedHeaderLine => f.write_str("malformed header (no ':' separator)"),
            Self::MissingHost => f.write_str("missing Host header"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpParseError {
    pub kind: ParseErrorKind,
    pub location: Location,
    /// 1-based line of the raw text where the problem was noticed, if any.
    pub line: Option<usize>,
}

impl HttpParseError {
    pub(crate) fn new(kind: ParseErrorKind, location: Location, line: Option<usize>) -> Self {
        Self {
            kind,
            location,
            line,
        }
    }
}

impl Display for HttpParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid request: {} while parsing {}", self.kind, self.location)?;
        if let Some(line) = self.line {
            write!(f, " (line {})", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpParseError {}

pub type HttpParseResult<T> = Result<T, HttpParseError>;
