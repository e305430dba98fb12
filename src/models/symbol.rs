use serde::Serialize;
use std::fmt;

/// Exchange-qualified ticker, e.g. `PETR4.SA`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Normalize one raw token: trim, upper-case and append `suffix` unless it
    /// is already there. Blank tokens yield `None`.
    pub fn normalize(raw: &str, suffix: &str) -> Option<Self> {
        let token = raw.trim().to_uppercase();
        if token.is_empty() {
            return None;
        }

        let suffix = suffix.to_uppercase();
        if suffix.is_empty() || token.ends_with(&suffix) {
            Some(Self(token))
        } else {
            Some(Self(format!("{}{}", token, suffix)))
        }
    }

    /// Wrap an identifier that is already in provider form (`^BVSP`).
    pub fn raw(id: &str) -> Self {
        Self(id.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ticker without its exchange suffix.
    pub fn ticker(&self, suffix: &str) -> &str {
        let suffix = suffix.to_uppercase();
        self.0.strip_suffix(suffix.as_str()).unwrap_or(&self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
