//! String escaping for the generated sources

/// Contents of a `'...'` literal in PHP, Python, Ruby or bash `$'...'`
///
/// Backslashes are doubled before quotes are escaped, so a trailing `\`
/// can never swallow the closing quote.
pub fn single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '\'') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Writes line breaks of an already [`single_quoted`] string as escapes, for
/// literals that cannot span lines
pub fn one_line(s: &str) -> String {
    s.replace('\r', "\\r").replace('\n', "\\n")
}

/// Contents of a `"..."` word in a POSIX shell
pub fn shell_double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~' | ':' | '/' | '%' | '+' | ',' | '@' | '=')
}

/// A shell word, left bare when nothing in it needs quoting
pub fn shell_word(s: &str) -> String {
    if !s.is_empty() && s.chars().all(is_shell_safe) {
        s.to_string()
    } else {
        format!("\"{}\"", shell_double_quoted(s))
    }
}

/// Splits a raw `Name: value` line at its first colon, dropping the optional
/// whitespace in front of the value
pub fn split_header(raw: &str) -> (&str, &str) {
    match raw.split_once(':') {
        Some((name, value)) => (name, value.trim_start_matches([' ', '\t'])),
        None => (raw, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quote_escapes() {
        assert_eq!(single_quoted("it's"), "it\\'s");
        assert_eq!(single_quoted("it's a\\b"), "it\\'s a\\\\b");
        assert_eq!(single_quoted("dir\\"), "dir\\\\");
        assert_eq!(single_quoted("a\\n"), "a\\\\n");
    }

    #[test]
    fn line_breaks() {
        assert_eq!(one_line("{\r\n  \"a\": 1\n}"), "{\\r\\n  \"a\": 1\\n}");
        assert_eq!(one_line(&single_quoted("x\\\n")), "x\\\\\\n");
    }

    #[test]
    fn shell_quoting() {
        assert_eq!(shell_double_quoted("a \"b\" $c `d` \\"), "a \\\"b\\\" \\$c \\`d\\` \\\\");
        assert_eq!(shell_word("http://foo.bar"), "http://foo.bar");
        assert_eq!(shell_word("http://[::1]:80/"), "\"http://[::1]:80/\"");
        assert_eq!(shell_word("http://a/?x=1&y=2"), "\"http://a/?x=1&y=2\"");
    }

    #[test]
    fn header_split() {
        assert_eq!(split_header("Host: foo.bar"), ("Host", "foo.bar"));
        assert_eq!(split_header("X-Ip:\t[::1]:80"), ("X-Ip", "[::1]:80"));
        assert_eq!(split_header("HOST: foo.bar "), ("HOST", "foo.bar "));
    }
}
