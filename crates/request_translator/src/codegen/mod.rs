//! Renders a [`ParsedRequest`] into client code
//!
//! Validation and method dispatch happen once per call and produce a
//! [`RenderContext`]; every requested [`Format`] is then rendered from that
//! same context by the [`Renderer`] registered for it.

use std::collections::{BTreeMap, HashMap};

use memchr::memchr;

use crate::{
    TranslateError, TranslateResult,
    http::{method::Method, proxy::Proxy, request::ParsedRequest, uri::url_encode},
};

mod bash;
mod format;
mod php;
mod python;
pub mod quote;
mod ruby;

pub use bash::Bash;
pub use format::Format;
pub use php::Php;
pub use python::Python;
pub use ruby::Ruby;

/// Everything a renderer needs, already validated and escaped
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Used for dispatch only, renderers print [`RenderContext::verb`]
    pub method: Method,
    /// The method exactly as written in the request
    pub verb: &'a str,
    /// Full URL, including the encoded payload of GET-like requests
    pub url: String,
    /// Raw `Name: value` lines, in input order
    pub headers: &'a [String],
    /// POST payload escaped for a `'...'` literal, `None` when nothing is sent
    pub body: Option<String>,
    pub proxy: Option<&'a Proxy>,
    /// Search string escaped for a `'...'` literal
    pub search: Option<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        headers: &'a [String],
        request: &'a ParsedRequest,
        search: Option<&str>,
    ) -> TranslateResult<Self> {
        let mut url = request.url();
        validate_url(&url, &request.host)?;

        let method = request.method();
        let body = if method.is_query_only() {
            if !request.data.is_empty() {
                append_query(&mut url, &url_encode(request.data.as_bytes()));
            }
            None
        } else if method.carries_body() {
            (!request.data.is_empty()).then(|| quote::single_quoted(&request.data))
        } else {
            return Err(TranslateError::UnsupportedMethod(request.method.clone()));
        };

        Ok(Self {
            method,
            verb: &request.method,
            url,
            headers,
            body,
            proxy: request.proxy.as_ref(),
            search: search.map(quote::single_quoted),
        })
    }
}

fn validate_url(url: &str, host: &str) -> TranslateResult<()> {
    let reason = if host.is_empty() {
        "empty host"
    } else if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        "contains whitespace or control characters"
    } else {
        return Ok(());
    };
    Err(TranslateError::InvalidUrl {
        url: url.to_string(),
        reason,
    })
}

/// Appends `query` in front of any fragment, joining an existing query with `&`
fn append_query(url: &mut String, query: &str) {
    let fragment = memchr(b'#', url.as_bytes()).unwrap_or(url.len());
    let sep = if url[..fragment].contains('?') { '&' } else { '?' };
    url.insert_str(fragment, &format!("{}{}", sep, query));
}

/// Produces source text for one target from a [`RenderContext`]
///
/// Renderers are pure: the same context always gives the same text. Plain
/// functions and closures implement this trait too.
pub trait Renderer: Send + Sync {
    fn render(&self, ctx: &RenderContext<'_>) -> String;
}

impl<F> Renderer for F
where
    F: Fn(&RenderContext<'_>) -> String + Send + Sync,
{
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        self(ctx)
    }
}

/// A registry of renderers keyed by [`Format`]
pub struct CodeGenerator {
    renderers: HashMap<Format, Box<dyn Renderer>>,
}

static_assertions::assert_impl_all!(CodeGenerator: Send, Sync);

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator {
    /// A generator with every built-in renderer registered
    pub fn new() -> Self {
        let mut generator = Self::empty();
        generator
            .register(Format::BASH, Bash)
            .register(Format::PHP, Php)
            .register(Format::PYTHON, Python)
            .register(Format::RUBY, Ruby);
        generator
    }

    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Adds a renderer, replacing any previous one for `format`
    pub fn register(&mut self, format: Format, renderer: impl Renderer + 'static) -> &mut Self {
        self.renderers.insert(format, Box::new(renderer));
        self
    }

    /// Renders `request` once per entry of `formats`
    ///
    /// An empty `formats` always yields an empty map. Otherwise the request is
    /// validated first, so an unsupported method or a broken URL fails the
    /// whole call.
    pub fn generate(
        &self,
        headers: &[String],
        request: &ParsedRequest,
        search: Option<&str>,
        formats: &[Format],
    ) -> TranslateResult<BTreeMap<Format, String>> {
        let mut out = BTreeMap::new();
        if formats.is_empty() {
            return Ok(out);
        }

        let ctx = RenderContext::new(headers, request, search)?;
        for format in formats {
            let renderer = self
                .renderers
                .get(format)
                .ok_or_else(|| TranslateError::UnsupportedFormat(format.clone()))?;
            log::debug!("rendering {} for {} {}", format, ctx.verb, ctx.url);
            out.insert(format.clone(), renderer.render(&ctx));
        }
        Ok(out)
    }
}

/// Renders with the built-in renderers
pub fn generate(
    headers: &[String],
    request: &ParsedRequest,
    search: Option<&str>,
    formats: &[Format],
) -> TranslateResult<BTreeMap<Format, String>> {
    CodeGenerator::new().generate(headers, request, search, formats)
}
