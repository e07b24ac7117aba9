use std::fmt::Write;

use crate::codegen::{
    RenderContext, Renderer,
    quote::{single_quoted, split_header},
};

/// A Ruby script using `net/http`
#[derive(Debug, Clone, Copy, Default)]
pub struct Ruby;

impl Renderer for Ruby {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut code = String::from("#!/usr/bin/env ruby\nrequire 'net/http'\nrequire 'uri'\n\n");
        writeln!(code, "uri = URI('{}')", single_quoted(&ctx.url)).unwrap();
        writeln!(
            code,
            "request = Net::HTTPGenericRequest.new('{}', {}, true, uri.request_uri)",
            single_quoted(ctx.verb),
            ctx.body.is_some()
        )
        .unwrap();
        // add_field appends, so repeated headers survive
        for header in ctx.headers {
            let (name, value) = split_header(header);
            writeln!(code, "request.add_field('{}', '{}')", single_quoted(name), single_quoted(value)).unwrap();
        }

        // uri.host keeps the brackets of an IPv6 literal, uri.hostname drops them
        match ctx.proxy {
            Some(proxy) => {
                writeln!(
                    code,
                    "http = Net::HTTP.new(uri.hostname, uri.port, '{}', {})",
                    single_quoted(proxy.bare_host()),
                    proxy.port
                )
                .unwrap();
            }
            None => code.push_str("http = Net::HTTP.new(uri.hostname, uri.port)\n"),
        }
        code.push_str("http.use_ssl = uri.scheme == 'https'\n");

        if let Some(body) = &ctx.body {
            writeln!(code, "request.body = '{}'", body).unwrap();
        }

        code.push_str("response = http.request(request)\n");
        match &ctx.search {
            Some(search) => {
                writeln!(code, "if response.body.include?('{}')", search).unwrap();
                code.push_str("  puts 'found'\nelse\n  puts 'not found'\nend");
            }
            None => code.push_str("puts response.body"),
        }
        code
    }
}
