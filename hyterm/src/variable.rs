//! Pattern variables and substitutions.
//!
//! Role
//! - A variable is a zero-arity term whose symbol is `'` followed by an identifier
//!   (see [`Symbol::is_variable_name`]).
//! - [`Term::replace_variable`] replaces, in place, every node carrying a given symbol by a deep
//!   copy of a value.
//! - [`Substitution`] is an ordered, duplicate-free set of bindings applied one after the other.
//!
//! Example
//! ```
//! use hyterm::{symbol::Symbol, term::Term, variable::Substitution};
//!
//! let mut subst = Substitution::new();
//! subst.bind(Symbol::new("'X")?, "g ( a )".parse()?)?;
//! let pattern: Term = "f ( 'X 'Y 'X )".parse()?;
//! assert_eq!(subst.instantiate(pattern.as_ref()).to_string(), "f ( g ( a ) 'Y g ( a ) )");
//! # Ok::<(), hyterm::Error>(())
//! ```
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::{
    error::{Error, Result},
    symbol::Symbol,
    term::{NodeId, Term, TermRef},
    walker::walk_no_input,
};

impl TermRef<'_> {
    /// Whether this node is a pattern variable.
    #[inline]
    pub fn is_variable(&self) -> bool {
        self.arity() == 0 && self.symbol().is_variable_name()
    }

    /// Whether any node of the subtree is a pattern variable.
    pub fn contains_variable(&self) -> bool {
        self.pre_order().any(|node| node.is_variable())
    }
}

impl Term {
    /// Whether the root is a pattern variable.
    #[inline]
    pub fn is_variable(&self) -> bool {
        self.as_ref().is_variable()
    }

    /// Replace every node (the root included) whose symbol is `name` by a deep copy of `value`.
    ///
    /// Occurrences are located before anything is replaced, so occurrences of `name` inside
    /// `value` are left as they are. Returns the number of replaced nodes.
    ///
    /// ```
    /// use hyterm::{symbol::Symbol, term::Term};
    ///
    /// let mut t: Term = "f ( 'X g ( 'X ) )".parse()?;
    /// let value: Term = "h ( 'X )".parse()?;
    /// let n = t.replace_variable(&Symbol::new("'X")?, value.as_ref())?;
    /// assert_eq!(n, 2);
    /// assert_eq!(t.to_string(), "f ( h ( 'X ) g ( h ( 'X ) ) )");
    /// # Ok::<(), hyterm::Error>(())
    /// ```
    pub fn replace_variable(&mut self, name: &Symbol, value: TermRef<'_>) -> Result<usize> {
        if !name.is_variable_name() {
            return Err(Error::InvalidVariable(name.clone()));
        }
        Ok(self.substitute(name, value))
    }

    pub(crate) fn substitute(&mut self, name: &Symbol, value: TermRef<'_>) -> usize {
        let targets = self.occurrences(name);
        for &id in &targets {
            // Occurrences are disjoint subtrees, each id is still live here.
            let replaced = self.replace_copy(id, value);
            debug_assert!(replaced.is_ok(), "stale occurrence of {name}: {replaced:?}");
        }
        targets.len()
    }

    /// Outermost nodes carrying `name`, in pre-order.
    fn occurrences(&self, name: &Symbol) -> SmallVec<[NodeId; 8]> {
        let mut found = SmallVec::new();
        walk_no_input(self.as_ref(), |node| {
            if node.symbol() == name {
                found.push(node.id());
            } else {
                node.schedule_arguments(());
            }
        });
        found
    }
}

/// Ordered collection of `variable -> value` bindings with unique variables.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: IndexMap<Symbol, Term>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `variable` to `value`, returning the previous value if the variable was bound.
    /// A rebound variable keeps its original position.
    pub fn bind(&mut self, variable: Symbol, value: Term) -> Result<Option<Term>> {
        if !variable.is_variable_name() {
            return Err(Error::InvalidVariable(variable));
        }
        Ok(self.bindings.insert(variable, value))
    }

    /// Insert a binding whose variable is known to be valid.
    pub(crate) fn bind_unchecked(&mut self, variable: Symbol, value: Term) {
        debug_assert!(variable.is_variable_name());
        self.bindings.insert(variable, value);
    }

    /// Bind `variable` for an inner scope, returning the binding it hides.
    pub(crate) fn shadow(&mut self, variable: Symbol, value: Term) -> Option<Term> {
        debug_assert!(variable.is_variable_name());
        self.bindings.insert(variable, value)
    }

    /// Leave the scope opened by [`Self::shadow`], bringing `hidden` back.
    pub(crate) fn unshadow(&mut self, variable: &Symbol, hidden: Option<Term>) {
        match hidden {
            Some(value) => {
                if let Some(bound) = self.bindings.get_mut(variable) {
                    *bound = value;
                }
            }
            None => {
                self.bindings.shift_remove(variable);
            }
        }
    }

    #[inline]
    pub fn get(&self, variable: &Symbol) -> Option<&Term> {
        self.bindings.get(variable)
    }

    #[inline]
    pub fn contains(&self, variable: &Symbol) -> bool {
        self.bindings.contains_key(variable)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Symbol, &Term)> + '_ {
        self.bindings.iter()
    }

    /// Apply every binding, in order, to `term`.
    pub fn apply(&self, term: &mut Term) {
        for (variable, value) in &self.bindings {
            term.substitute(variable, value.as_ref());
        }
    }

    /// Apply the substitution to a copy of `term`.
    pub fn instantiate(&self, term: TermRef<'_>) -> Term {
        let mut term = term.to_term();
        self.apply(&mut term);
        term
    }

    /// Substitute `variable` by `value` inside every bound value.
    pub(crate) fn propagate(&mut self, variable: &Symbol, value: TermRef<'_>) {
        for bound in self.bindings.values_mut() {
            bound.substitute(variable, value);
        }
    }
}

impl IntoIterator for Substitution {
    type Item = (Symbol, Term);
    type IntoIter = indexmap::map::IntoIter<Symbol, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}

impl<'s> IntoIterator for &'s Substitution {
    type Item = (&'s Symbol, &'s Term);
    type IntoIter = indexmap::map::Iter<'s, Symbol, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

impl std::fmt::Debug for Substitution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.bindings.iter().map(|(k, v)| (k.as_str(), v)))
            .finish()
    }
}
