//! Syntactic unification of systems of term equalities.
//!
//! Role
//! - Solve a conjunction of equalities `L1 = R1, …, Ln = Rn` into the most general
//!   [`Substitution`] making every pair structurally identical, or prove that none exists.
//! - The algorithm follows Martelli–Montanari: equalities are consumed from a growing queue;
//!   compound equalities decompose into per-argument equalities; a variable binding is
//!   propagated eagerly into the pending equalities and into the solution built so far, so the
//!   final solution never mentions a bound variable.
//!
//! Textual form
//! - Input: `unify ( = ( L1 R1 ) = ( L2 R2 ) … )`.
//! - Output ([`Unification::to_term`]): `solution ( val ( 'X v ) … )` or
//!   `incompatible ( L R )`.
//!
//! Example
//! ```
//! use hyterm::{term::Term, unify::unify};
//!
//! let system: Term = "unify ( = ( f ( a b ) f ( 'X 'Y ) ) )".parse()?;
//! let result = unify(&system)?;
//! assert_eq!(result.to_term().to_string(), "solution ( val ( 'X a ) val ( 'Y b ) )");
//!
//! let system: Term = "unify ( = ( 'X f ( 'X ) ) )".parse()?;
//! assert!(unify(&system)?.is_incompatible());
//! # Ok::<(), hyterm::Error>(())
//! ```
use std::collections::VecDeque;

use log::{debug, trace};
use strum::EnumIs;

use crate::{
    error::{Error, Result},
    symbol::Symbol,
    term::{Term, TermRef},
    variable::Substitution,
};

pub(crate) const UNIFY: &str = "unify";
pub(crate) const EQUAL: &str = "=";
pub(crate) const SOLUTION: &str = "solution";
pub(crate) const VAL: &str = "val";
pub(crate) const INCOMPATIBLE: &str = "incompatible";

/// A single pending equality `left = right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equality {
    pub left: Term,
    pub right: Term,
}

impl Equality {
    pub fn new(left: Term, right: Term) -> Self {
        Self { left, right }
    }
}

/// Outcome of a unification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs)]
pub enum Unification {
    /// The most general unifier, bindings in the order they were found.
    Solution(Substitution),

    /// No unifier exists. Carries the two sub-terms (after substitution) that could not be
    /// reconciled.
    Incompatible { left: Term, right: Term },
}

impl Unification {
    /// The substitution, if unification succeeded.
    pub fn solution(&self) -> Option<&Substitution> {
        match self {
            Unification::Solution(solution) => Some(solution),
            Unification::Incompatible { .. } => None,
        }
    }

    /// Render as `solution ( val ( 'X v ) … )` or `incompatible ( L R )`.
    pub fn to_term(&self) -> Term {
        match self {
            Unification::Solution(solution) => solution.to_term(),
            Unification::Incompatible { left, right } => {
                let mut t = Term::leaf(Symbol::keyword(INCOMPATIBLE));
                t.push_argument(left.copy());
                t.push_argument(right.copy());
                t
            }
        }
    }
}

impl Substitution {
    /// Render as `solution ( val ( 'X v ) … )`, bindings in order.
    pub fn to_term(&self) -> Term {
        let mut t = Term::leaf(Symbol::keyword(SOLUTION));
        for (variable, value) in self.iter() {
            let mut val = Term::leaf(Symbol::keyword(VAL));
            val.push_argument(Term::leaf(variable.clone()));
            val.push_argument(value.copy());
            t.push_argument(val);
        }
        t
    }
}

/// Ordered queue of equalities awaiting unification.
#[derive(Debug, Clone, Default)]
pub struct EqualitySystem {
    pending: VecDeque<Equality>,
}

impl EqualitySystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the equality `left = right`.
    pub fn push(&mut self, left: Term, right: Term) {
        self.pending.push_back(Equality::new(left, right));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Read an equality system from its textual form `unify ( = ( L R ) … )`.
    ///
    /// The input is copied; it is never modified.
    pub fn from_term(system: TermRef<'_>) -> Result<Self> {
        if !system.symbol().is(UNIFY) {
            return Err(Error::MalformedEqualitySystem(format!(
                "expected `{UNIFY}` as root symbol, found `{}`",
                system.symbol()
            )));
        }
        if system.arity() == 0 {
            return Err(Error::MalformedEqualitySystem(format!(
                "`{UNIFY}` requires at least one equality"
            )));
        }

        let mut out = Self::new();
        for (i, equality) in system.arguments().enumerate() {
            if !equality.symbol().is(EQUAL) || equality.arity() != 2 {
                return Err(Error::MalformedEqualitySystem(format!(
                    "argument {i} must be an equality `{EQUAL} ( L R )`, found `{equality}`"
                )));
            }
            let mut sides = equality.arguments();
            if let (Some(left), Some(right)) = (sides.next(), sides.next()) {
                out.push(left.to_term(), right.to_term());
            }
        }
        Ok(out)
    }

    /// Run the unification to completion.
    pub fn solve(mut self) -> Unification {
        let mut solution = Substitution::new();

        while let Some(Equality { left, right }) = self.pending.pop_front() {
            trace!("unify: {left} = {right} ({} pending)", self.pending.len());
            if left == right {
                continue;
            }

            let (l, r) = (left.as_ref(), right.as_ref());
            if l.is_variable() || r.is_variable() {
                // Occurs check
                if l.contains_symbol(r.symbol()) || r.contains_symbol(l.symbol()) {
                    debug!("unify: occurs check failed on {left} = {right}");
                    return Unification::Incompatible { left, right };
                }

                let (variable, value) = if l.is_variable() {
                    (left, right)
                } else {
                    (right, left)
                };
                let name = variable.symbol().clone();
                trace!("unify: bind {name} -> {value}");

                for equality in self.pending.iter_mut() {
                    equality.left.substitute(&name, value.as_ref());
                    equality.right.substitute(&name, value.as_ref());
                }
                solution.propagate(&name, value.as_ref());
                solution.bind_unchecked(name, value);
            } else if l.symbol() != r.symbol() || l.arity() != r.arity() {
                debug!("unify: symbol clash on {left} = {right}");
                return Unification::Incompatible { left, right };
            } else {
                for (a, b) in l.arguments().zip(r.arguments()) {
                    self.pending
                        .push_back(Equality::new(a.to_term(), b.to_term()));
                }
            }
        }

        debug!("unify: solved with {} binding(s)", solution.len());
        Unification::Solution(solution)
    }
}

impl FromIterator<(Term, Term)> for EqualitySystem {
    fn from_iter<T: IntoIterator<Item = (Term, Term)>>(iter: T) -> Self {
        Self {
            pending: iter
                .into_iter()
                .map(|(left, right)| Equality::new(left, right))
                .collect(),
        }
    }
}

/// Unify the equality system written as `unify ( = ( L R ) … )`.
pub fn unify(system: &Term) -> Result<Unification> {
    Ok(EqualitySystem::from_term(system.as_ref())?.solve())
}
