//! Atomic labels carried by term nodes.
//!
//! Role
//! - A [`Symbol`] is an immutable, cheaply clonable string (shared `Arc<str>`).
//! - Symbols are validated on construction: non-empty, no whitespace, no parentheses. These
//!   characters delimit symbols in the textual syntax.
//!
//! Ordering
//! - Comparison folds ASCII letters, so `Foo`, `foo` and `FOO` are the same symbol. Equality
//!   and hashing agree with the ordering.
//! - Folded bytes are compared lexicographically; a strict prefix sorts first.
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
    sync::Arc,
};

use crate::error::{Error, Result};

/// Marker opening every variable name.
pub const VARIABLE_MARKER: char = '\'';

/// Validated, case-folding symbol.
#[derive(Clone)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Validate and build a new symbol.
    ///
    /// ```
    /// use hyterm::symbol::Symbol;
    /// assert!(Symbol::new("f").is_ok());
    /// assert!(Symbol::new("->").is_ok());
    /// assert!(Symbol::new("").is_err());
    /// assert!(Symbol::new("f(x)").is_err());
    /// assert_eq!(Symbol::new("Zero").unwrap(), Symbol::new("zero").unwrap());
    /// ```
    pub fn new<S: AsRef<str>>(s: S) -> Result<Self> {
        let s = s.as_ref();
        if Self::is_valid(s) {
            Ok(Self(Arc::from(s)))
        } else {
            Err(Error::InvalidSymbol(s.to_owned()))
        }
    }

    /// Build a symbol from a keyword known to be valid.
    pub(crate) fn keyword(s: &'static str) -> Self {
        debug_assert!(Self::is_valid(s), "invalid keyword {s:?}");
        Self(Arc::from(s))
    }

    /// Check whether `s` may be used as a symbol.
    pub fn is_valid(s: &str) -> bool {
        !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || c == '(' || c == ')')
    }

    /// Raw text of the symbol, as it was written.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the symbol equals `text`, ignoring ASCII case.
    #[inline]
    pub fn is(&self, text: &str) -> bool {
        self.0.eq_ignore_ascii_case(text)
    }

    /// Whether the symbol has the variable form: the `'` marker followed by letters, `_`, or
    /// digits (digits only after the first identifier character).
    pub fn is_variable_name(&self) -> bool {
        let Some(ident) = self.0.strip_prefix(VARIABLE_MARKER) else {
            return false;
        };

        !ident.is_empty()
            && ident.bytes().enumerate().all(|(i, c)| {
                c.is_ascii_alphabetic() || c == b'_' || (i > 0 && c.is_ascii_digit())
            })
    }

    /// Interpret the symbol as a non-negative integer, if it only holds ASCII digits.
    pub fn as_integer(&self) -> Option<u64> {
        if self.0.bytes().all(|c| c.is_ascii_digit()) {
            self.0.parse().ok()
        } else {
            None
        }
    }

    #[inline]
    fn folded(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.bytes().map(|b| b.to_ascii_lowercase())
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.folded() {
            state.write_u8(b);
        }
        state.write_usize(self.0.len());
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Symbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Symbol::new(s)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Symbol::new(value)
    }
}

impl TryFrom<String> for Symbol {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Symbol::new(value)
    }
}
