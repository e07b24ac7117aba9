/// Protocol and version read from the `HTTP/` suffix of a request line
///
/// Unlike a real protocol version this is never validated: whatever follows
/// `HTTP/` is kept, so `HTTP//1.b` yields the version `/1.b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpVersion {
    pub protocol: String,
    pub version: String,
}

impl HttpVersion {
    pub const PREFIX: &'static str = "HTTP/";
    pub const PROTOCOL: &'static str = "HTTP";

    /// Reads a request line suffix, returning `None` when it is not an `HTTP/` token.
    pub fn from_suffix(token: &str) -> Option<Self> {
        token.strip_prefix(Self::PREFIX).map(|version| Self {
            protocol: Self::PROTOCOL.to_string(),
            version: version.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.protocol.is_empty()
    }
}
