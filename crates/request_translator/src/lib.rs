//! Turns a raw, pasted HTTP request into code that replays it
//!
//! Parsing ([`http::parser`]) and rendering ([`codegen`]) are separate steps:
//! a request is parsed once and the resulting [`ParsedRequest`] is rendered
//! for every requested [`Format`]. Neither step does any I/O or keeps state
//! between calls.
//!
//! ```
//! use request_translator::{Format, Translator};
//!
//! let code = Translator::new("GET /\r\nHost: foo.bar").generate().unwrap();
//! assert_eq!(
//!     code[&Format::BASH],
//!     "#!/usr/bin/env bash\ncurl -v --request GET http://foo.bar  --header \"Host: foo.bar\"  --include"
//! );
//! ```

use std::collections::BTreeMap;

pub mod codegen;
pub mod http;

mod error;
pub use error::{TranslateError, TranslateResult};

pub use codegen::{CodeGenerator, Format, RenderContext, Renderer};
pub use http::{parser::RequestParser, proxy::Proxy, request::ParsedRequest};

/// One translation: the raw request plus everything that shapes its output
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    request: &'a str,
    data: Option<&'a str>,
    proxy: Option<&'a str>,
    search: Option<&'a str>,
    formats: Vec<Format>,
}

impl<'a> Translator<'a> {
    /// Renders to bash only, with no overrides and no search string
    pub fn new(request: &'a str) -> Self {
        Self {
            request,
            data: None,
            proxy: None,
            search: None,
            formats: vec![Format::default()],
        }
    }

    /// Sends `data` as the body instead of whatever follows the headers
    pub fn data(mut self, data: &'a str) -> Self {
        self.data = Some(data);
        self
    }

    /// Routes the request through `proxy`, given as `[scheme://]host:port`
    pub fn proxy(mut self, proxy: &'a str) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Checks the response body for `search` instead of printing it
    pub fn search(mut self, search: &'a str) -> Self {
        self.search = Some(search);
        self
    }

    pub fn formats(mut self, formats: impl IntoIterator<Item = Format>) -> Self {
        self.formats = formats.into_iter().collect();
        self
    }

    pub fn parse(&self) -> TranslateResult<(Vec<String>, ParsedRequest)> {
        http::parser::parse(self.request, self.data, self.proxy)
    }

    pub fn generate(&self) -> TranslateResult<BTreeMap<Format, String>> {
        self.generate_with(&CodeGenerator::new())
    }

    /// Like [`Translator::generate`], rendering with a custom registry
    pub fn generate_with(&self, generator: &CodeGenerator) -> TranslateResult<BTreeMap<Format, String>> {
        let (headers, request) = self.parse()?;
        generator.generate(&headers, &request, self.search, &self.formats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_bash() {
        let code = Translator::new("GET / HTTP/1.1\nHost: foo.bar").generate().unwrap();
        assert_eq!(code.keys().collect::<Vec<_>>(), [&Format::BASH]);
        assert!(code[&Format::BASH].contains("http://foo.bar/ "));
    }

    #[test]
    fn all_builtin_formats() {
        let code = Translator::new("POST /login HTTP/1.1\nHost: foo.bar\n\nuser=a")
            .formats(Format::BUILTIN)
            .search("Welcome")
            .generate()
            .unwrap();
        assert_eq!(code.len(), 4);
        for format in Format::BUILTIN {
            assert!(code[&format].contains("Welcome"), "{format}");
            assert!(code[&format].contains("user=a"), "{format}");
        }
    }

    #[test]
    fn parse_errors_surface_from_generate() {
        let err = Translator::new("GET / HTTP/1.1\nAccept: */*").generate().unwrap_err();
        assert!(matches!(err, TranslateError::InvalidRequest(_)));
        let err = Translator::new("GET / HTTP/1.1\nHost: a").proxy("a").generate().unwrap_err();
        assert!(matches!(err, TranslateError::InvalidProxy(_)));
    }
}
