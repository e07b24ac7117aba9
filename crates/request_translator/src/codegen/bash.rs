use std::fmt::Write;

use crate::codegen::{
    RenderContext, Renderer,
    quote::{shell_double_quoted, shell_word},
};

/// A `curl` invocation in a bash script
///
/// Every option block is written as ` --opt value ` so that blocks can be
/// concatenated as-is; the double spaces that leaves are part of the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bash;

impl Renderer for Bash {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut headers = String::new();
        for header in ctx.headers {
            write!(headers, " --header \"{}\" ", shell_double_quoted(header)).unwrap();
        }

        let proxy = match ctx.proxy {
            Some(proxy) => format!(" --proxy {}:{} ", shell_word(&proxy.host), proxy.port),
            None => String::new(),
        };

        // ANSI-C quoting: only the \\ and \' escapes the context added are expanded
        let body = match &ctx.body {
            Some(body) => format!(" --data $'{}' ", body),
            None => String::new(),
        };

        let search = match &ctx.search {
            Some(search) => format!(" | grep --color=auto --fixed-strings $'{}'", search),
            None => String::new(),
        };

        format!(
            "#!/usr/bin/env bash\ncurl -v --request {} {} {}{}{} --include{}",
            ctx.verb,
            shell_word(&ctx.url),
            headers,
            proxy,
            body,
            search,
        )
    }
}
