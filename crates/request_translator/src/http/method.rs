use std::fmt::{Debug, Display};

/// An HTTP Method, as written in a raw request
///
/// Builtin methods are recognised case-insensitively, anything else is kept
/// verbatim as a custom method so error messages can name it.
#[derive(Clone, PartialEq, Eq)]
pub struct Method(Repr);

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<&str> for Method {
    fn from(value: &str) -> Self {
        match Builtin::try_from(value) {
            Ok(builtin) => Method(Repr::Builtin(builtin)),
            Err(_) => Method(Repr::Custom(value.to_string())),
        }
    }
}

impl Method {
    pub const GET: Self = Self(Repr::Builtin(Builtin::GET));
    pub const POST: Self = Self(Repr::Builtin(Builtin::POST));
    pub const HEAD: Self = Self(Repr::Builtin(Builtin::HEAD));
    pub const OPTIONS: Self = Self(Repr::Builtin(Builtin::OPTIONS));

    /// Methods whose payload, if any, is moved into the query string
    pub fn is_query_only(&self) -> bool {
        matches!(
            self.0,
            Repr::Builtin(Builtin::GET | Builtin::HEAD | Builtin::OPTIONS)
        )
    }

    /// Methods that send their payload as a request body
    pub fn carries_body(&self) -> bool {
        matches!(self.0, Repr::Builtin(Builtin::POST))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    Builtin(Builtin),
    Custom(String),
}

impl Display for Repr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin(builtin) => Display::fmt(builtin, f),
            Self::Custom(custom) => f.write_str(custom),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    GET,
    POST,
    HEAD,
    OPTIONS,
}

impl TryFrom<&str> for Builtin {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        const MAP: &[(&str, Builtin)] = &[
            ("GET", Builtin::GET),
            ("POST", Builtin::POST),
            ("HEAD", Builtin::HEAD),
            ("OPTIONS", Builtin::OPTIONS),
        ];
        MAP.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
            .map(|(_, builtin)| *builtin)
            .ok_or(())
    }
}

impl Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::GET => "GET",
            Self::POST => "POST",
            Self::HEAD => "HEAD",
            Self::OPTIONS => "OPTIONS",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_case_insensitive() {
        assert_eq!(Method::from("get"), Method::GET);
        assert_eq!(Method::from("Post"), Method::POST);
        assert_eq!(Method::from("OPTIONS"), Method::OPTIONS);
        assert_eq!(Method::from("post").to_string(), "POST");
    }

    #[test]
    fn custom_method_keeps_spelling() {
        let method = Method::from("PuT");
        assert_eq!(method.to_string(), "PuT");
        assert!(!method.is_query_only());
        assert!(!method.carries_body());
    }

    #[test]
    fn dispatch_classes() {
        assert!(Method::GET.is_query_only());
        assert!(Method::HEAD.is_query_only());
        assert!(Method::OPTIONS.is_query_only());
        assert!(!Method::POST.is_query_only());
        assert!(Method::POST.carries_body());
    }
}
