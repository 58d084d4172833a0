//! Hyterm: labelled terms, syntactic unification and rule-based rewriting.
//!
//! A term is a symbol with an ordered list of argument terms. Symbols compare ignoring ASCII
//! case; a zero-arity term whose symbol is `'` followed by an identifier is a pattern variable.
//! Terms carry a total order, so they can be kept in ordered sets and printed deterministically.
//!
//! Storage
//!  - Each [`Term`](term::Term) owns its nodes in a `slotmap` arena; sub-terms are addressed by
//!    [`NodeId`](term::NodeId) and viewed through the `Copy` handle [`TermRef`](term::TermRef).
//!  - Argument lists are `smallvec`s keeping up to four children inline.
//!
//! Engines
//!  - [`unify`](unify::unify) solves `unify ( = ( L R ) … )` into a most general substitution.
//!  - [`rewrite`](rewrite::rewrite) applies `rewrite ( [n] -> ( P R ) … T )` for `n` rounds and
//!    returns the ordered set of results.
//!  - [`valuate`](valuate::valuate) expands the scoped bindings `set ( 'X V B )`.
//!
//! Example
//! ```
//! use hyterm::prelude::*;
//!
//! let system: Term = "unify ( = ( g ( 'X b ) g ( a 'Y ) ) )".parse()?;
//! let solution = unify(&system)?;
//! assert_eq!(solution.to_term().to_string(), "solution ( val ( 'X a ) val ( 'Y b ) )");
//!
//! let system: Term = "rewrite ( -> ( s ( 'N ) 'N ) s ( s ( z ) ) )".parse()?;
//! let results = rewrite(&system)?;
//! assert_eq!(results.to_term().to_string(), "results ( s ( z ) )");
//! # Ok::<(), hyterm::Error>(())
//! ```

/// Error type shared by every fallible operation.
pub mod error;
/// Parser for the textual term syntax.
#[cfg(feature = "chumsky")]
pub mod parser;
/// Compact and width-aware rendering of terms.
pub mod pretty;
/// Rule-based rewriting in rounds.
pub mod rewrite;
/// Case-insensitive symbols.
pub mod symbol;
/// Arena-backed terms, views and the term order.
pub mod term;
/// Syntactic unification of equality systems.
pub mod unify;
/// Scoped `set` bindings.
pub mod valuate;
/// Pattern variables and substitutions.
pub mod variable;
/// Tree walker for traversing terms.
pub mod walker;

pub use error::{Error, Result};

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::error::{Error, Result};
    pub use crate::pretty::PrettyTerm;
    pub use crate::rewrite::{Candidates, ResultSet, Rule, RuleSystem, rewrite};
    pub use crate::symbol::Symbol;
    pub use crate::term::{NodeId, Term, TermRef};
    pub use crate::unify::{EqualitySystem, Unification, unify};
    pub use crate::valuate::{valuate, valuate_with};
    pub use crate::variable::Substitution;

    // Walker ergonomics
    pub use crate::walker::{WalkerHandle, walk, walk_no_input};

    // Parser entrypoint
    #[cfg(feature = "chumsky")]
    pub use crate::parser::parse;
}
