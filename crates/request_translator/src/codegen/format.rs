use std::{
    convert::Infallible,
    fmt::{Debug, Display},
    str::FromStr,
};

/// Identifies one code generation target
///
/// The built-in targets parse from their lowercase names; any other name
/// becomes a custom format, which only renders once a renderer has been
/// registered for it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Format(Repr);

impl Format {
    pub const BASH: Self = Self(Repr::Builtin(Builtin::Bash));
    pub const PHP: Self = Self(Repr::Builtin(Builtin::Php));
    pub const PYTHON: Self = Self(Repr::Builtin(Builtin::Python));
    pub const RUBY: Self = Self(Repr::Builtin(Builtin::Ruby));

    pub const BUILTIN: [Self; 4] = [Self::BASH, Self::PHP, Self::PYTHON, Self::RUBY];

    pub fn custom(name: impl Into<String>) -> Self {
        let name = name.into();
        match Builtin::from_name(&name) {
            Some(builtin) => Self(Repr::Builtin(builtin)),
            None => Self(Repr::Custom(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::Builtin(builtin) => builtin.as_str(),
            Repr::Custom(name) => name,
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::BASH
    }
}

impl FromStr for Format {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::custom(s))
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Debug for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Repr {
    Builtin(Builtin),
    Custom(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Builtin {
    Bash,
    Php,
    Python,
    Ruby,
}

impl Builtin {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_lowercase().as_str() {
            "bash" => Self::Bash,
            "php" => Self::Php,
            "python" => Self::Python,
            "ruby" => Self::Ruby,
            _ => return None,
        })
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Php => "php",
            Self::Python => "python",
            Self::Ruby => "ruby",
        }
    }
}
