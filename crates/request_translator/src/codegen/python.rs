use std::fmt::Write;

use crate::codegen::{
    RenderContext, Renderer,
    quote::{one_line, single_quoted, split_header},
};

/// A Python 3 script on top of `http.client`, which unlike `requests` keeps
/// duplicate headers
#[derive(Debug, Clone, Copy, Default)]
pub struct Python;

impl Renderer for Python {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut code = String::from(
            "#!/usr/bin/env python3\nimport http.client\nfrom urllib.parse import urlsplit\n\n",
        );
        writeln!(code, "url = urlsplit('{}')", single_quoted(&ctx.url)).unwrap();
        code.push_str(
            "connection_class = http.client.HTTPSConnection if url.scheme == 'https' else http.client.HTTPConnection\n",
        );
        match ctx.proxy {
            Some(proxy) => {
                writeln!(code, "conn = connection_class('{}', {})", single_quoted(proxy.bare_host()), proxy.port).unwrap();
                code.push_str("conn.set_tunnel(url.hostname, url.port)\n");
            }
            None => code.push_str("conn = connection_class(url.netloc)\n"),
        }

        code.push_str("path = url.path or '/'\nif url.query:\n    path += '?' + url.query\n");
        writeln!(
            code,
            "conn.putrequest('{}', path, skip_host=True, skip_accept_encoding=True)",
            single_quoted(ctx.verb)
        )
        .unwrap();
        for header in ctx.headers {
            let (name, value) = split_header(header);
            writeln!(code, "conn.putheader('{}', '{}')", single_quoted(name), single_quoted(value)).unwrap();
        }
        match &ctx.body {
            Some(body) => writeln!(code, "conn.endheaders('{}'.encode())", one_line(body)).unwrap(),
            None => code.push_str("conn.endheaders()\n"),
        }

        code.push_str("response = conn.getresponse()\nbody = response.read().decode(errors='replace')\n");
        match &ctx.search {
            Some(search) => {
                writeln!(code, "if '{}' in body:", one_line(search)).unwrap();
                code.push_str("    print('found')\nelse:\n    print('not found')");
            }
            None => code.push_str("print(body)"),
        }
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{proxy::Proxy, request::ParsedRequest};

    #[test]
    fn get_keeps_duplicate_headers() {
        let headers = vec!["Host: foo.bar".to_string(), "host:  foo.bar".to_string()];
        let request = ParsedRequest {
            method: "GET".to_string(),
            pre_scheme: "https://".to_string(),
            host: "foo.bar".to_string(),
            path: "/robots.txt".to_string(),
            ..Default::default()
        };
        let ctx = RenderContext::new(&headers, &request, None).unwrap();
        assert_eq!(
            Python.render(&ctx),
            "#!/usr/bin/env python3
import http.client
from urllib.parse import urlsplit

url = urlsplit('https://foo.bar/robots.txt')
connection_class = http.client.HTTPSConnection if url.scheme == 'https' else http.client.HTTPConnection
conn = connection_class(url.netloc)
path = url.path or '/'
if url.query:
    path += '?' + url.query
conn.putrequest('GET', path, skip_host=True, skip_accept_encoding=True)
conn.putheader('Host', 'foo.bar')
conn.putheader('host', 'foo.bar')
conn.endheaders()
response = conn.getresponse()
body = response.read().decode(errors='replace')
print(body)"
        );
    }

    #[test]
    fn multi_line_body_stays_on_one_line() {
        let request = ParsedRequest {
            method: "post".to_string(),
            host: "foo.bar".to_string(),
            data: "{\r\n  \"a\": \"x\\ny\"\r\n}\\".to_string(),
            ..Default::default()
        };
        let ctx = RenderContext::new(&[], &request, Some("a\nb\\")).unwrap();
        let code = Python.render(&ctx);
        assert!(code.contains("conn.putrequest('post', path, "));
        assert!(code.contains("conn.endheaders('{\\r\\n  \"a\": \"x\\\\ny\"\\r\\n}\\\\'.encode())\n"));
        assert!(code.ends_with("if 'a\\nb\\\\' in body:\n    print('found')\nelse:\n    print('not found')"));
    }

    #[test]
    fn post_through_proxy_with_search() {
        let request = ParsedRequest {
            method: "POST".to_string(),
            host: "foo.bar".to_string(),
            data: "{}".to_string(),
            proxy: Some(Proxy::parse("127.0.0.1:8000").unwrap()),
            ..Default::default()
        };
        let ctx = RenderContext::new(&[], &request, Some("it's")).unwrap();
        let code = Python.render(&ctx);
        assert!(code.contains("conn = connection_class('127.0.0.1', 8000)\nconn.set_tunnel(url.hostname, url.port)\n"));
        assert!(code.contains("conn.endheaders('{}'.encode())\n"));
        assert!(code.ends_with("if 'it\\'s' in body:\n    print('found')\nelse:\n    print('not found')"));
    }
}
