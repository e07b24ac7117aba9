use std::fmt::Write;

use crate::codegen::{RenderContext, Renderer, quote::single_quoted};

/// A PHP script driving the cURL extension
#[derive(Debug, Clone, Copy, Default)]
pub struct Php;

impl Renderer for Php {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut code = String::from("<?php\n$curl = curl_init();\ncurl_setopt_array($curl, array(\n");
        writeln!(code, "    CURLOPT_RETURNTRANSFER => 1,").unwrap();
        writeln!(code, "    CURLOPT_URL => '{}',", single_quoted(&ctx.url)).unwrap();
        writeln!(code, "    CURLOPT_CUSTOMREQUEST => '{}',", single_quoted(ctx.verb)).unwrap();
        if !ctx.headers.is_empty() {
            code.push_str("    CURLOPT_HTTPHEADER => array(\n");
            for header in ctx.headers {
                writeln!(code, "        '{}',", single_quoted(header)).unwrap();
            }
            code.push_str("    ),\n");
        }
        code.push_str("));\n");

        if let Some(proxy) = ctx.proxy {
            writeln!(code, "curl_setopt($curl, CURLOPT_PROXY, '{}');", single_quoted(&proxy.host)).unwrap();
            writeln!(code, "curl_setopt($curl, CURLOPT_PROXYPORT, {});", proxy.port).unwrap();
        }

        if let Some(body) = &ctx.body {
            writeln!(code, "curl_setopt($curl, CURLOPT_POSTFIELDS, '{}');", body).unwrap();
        }

        code.push_str("$response = curl_exec($curl);\ncurl_close($curl);\n");
        match &ctx.search {
            Some(search) => {
                writeln!(code, "if (strpos($response, '{}') !== false) {{", search).unwrap();
                code.push_str("    echo \"found\\n\";\n} else {\n    echo \"not found\\n\";\n}\n");
            }
            None => code.push_str("echo $response;\n"),
        }
        code.push_str("?>");
        code
    }
}
