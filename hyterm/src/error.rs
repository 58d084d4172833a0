use strum::EnumIs;
use thiserror::Error;

use crate::symbol::Symbol;

/// Errors reported when a caller violates the preconditions of a term operation.
///
/// None of these are recoverable mid-operation: the operation returns before any
/// caller-visible state is touched. A failed unification is *not* an error, see
/// [`Unification::Incompatible`](crate::unify::Unification::Incompatible).
#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum Error {
    /// A symbol was empty or contained whitespace or parentheses.
    #[error("Invalid symbol `{0}`: symbols must be non-empty and contain no whitespace nor parentheses.")]
    InvalidSymbol(String),

    /// A substitution was requested for a symbol that is not a variable name.
    #[error("`{0}` is not a variable: variables are written `'` followed by an identifier (e.g. `'X`, `'x1`).")]
    InvalidVariable(Symbol),

    /// An argument position lies outside of the admissible range.
    #[error("Argument position {position} is out of range for `{symbol}` (admissible range is 0..{bound}).")]
    PositionOutOfRange {
        symbol: Symbol,
        position: usize,
        bound: usize,
    },

    /// A node id that does not (or no longer) belong to the term.
    #[error("The node id does not refer to a live node of this term. It was either released or comes from another term.")]
    UnknownNode,

    /// The input of the unifier is not of the form `unify ( = ( L R ) ... )`.
    #[error("Malformed equality system: {0}")]
    MalformedEqualitySystem(String),

    /// The input of the rewriter is not of the form `rewrite ( [n] -> ( P R ) ... T )`.
    #[error("Malformed rule system: {0}")]
    MalformedRuleSystem(String),

    /// The repetition factor of a rule system must be a positive integer.
    #[error("Invalid repetition factor `{0}`: expected a positive integer.")]
    InvalidFactor(String),

    /// A `set` binding is not of the form `set ( 'X value body )`.
    #[error("Malformed binding: {0}")]
    MalformedBinding(String),

    /// Textual input could not be parsed into a term.
    #[error("Failed to parse term:\n{}", .0.join("\n"))]
    Parse(Vec<String>),
}

pub type Result<T> = std::result::Result<T, Error>;
