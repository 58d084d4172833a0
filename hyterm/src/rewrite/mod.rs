//! Rule-based rewriting of terms.
//!
//! Role
//! - A [`RuleSystem`] holds rules `pattern -> replacement`, a target term and a repetition
//!   factor `n`.
//! - A round maps a set of carried terms to the set of their one-step rewrites: every rule is
//!   tried at every position of every carried term, each success producing one whole candidate.
//!   The next set holds the candidates only; terms that nothing rewrites are dropped, unless no
//!   carried term has a candidate at all, in which case the round is a fixpoint and the carried
//!   set is kept as is.
//! - The result is the [`ResultSet`] of the `n`-th round, ordered by the term total order and
//!   free of duplicates.
//!
//! Textual form
//! - Input: `rewrite ( [n] -> ( P1 R1 ) … -> ( Pk Rk ) T )`; `n` defaults to 1.
//! - Output ([`ResultSet::to_term`]): `results ( t1 t2 … )`.
//!
//! Example
//! ```
//! use hyterm::{rewrite::rewrite, term::Term};
//!
//! let system: Term = "rewrite ( -> ( a b ) f ( a a ) )".parse()?;
//! assert_eq!(rewrite(&system)?.to_term().to_string(), "results ( f ( a b ) f ( b a ) )");
//!
//! let system: Term = "rewrite ( 2 -> ( a b ) f ( a a ) )".parse()?;
//! assert_eq!(rewrite(&system)?.to_term().to_string(), "results ( f ( b b ) )");
//! # Ok::<(), hyterm::Error>(())
//! ```
use std::collections::{BTreeSet, btree_set};
use std::num::NonZeroUsize;

use log::{debug, trace};

use crate::{
    error::{Error, Result},
    symbol::Symbol,
    term::{NodeId, Term, TermRef},
};

mod candidates;
mod matching;

pub use candidates::Candidates;
pub use matching::match_pattern;

pub(crate) const REWRITE: &str = "rewrite";
pub(crate) const RULE: &str = "->";
pub(crate) const RESULTS: &str = "results";

/// A rewrite rule `pattern -> replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pattern: Term,
    replacement: Term,
}

impl Rule {
    pub fn new(pattern: Term, replacement: Term) -> Self {
        Self {
            pattern,
            replacement,
        }
    }

    #[inline]
    pub fn pattern(&self) -> &Term {
        &self.pattern
    }

    #[inline]
    pub fn replacement(&self) -> &Term {
        &self.replacement
    }

    /// Rewrite `term` at node `at`, if the pattern matches there.
    ///
    /// The result is a new whole term; `term` itself is left untouched.
    pub fn apply_at(&self, term: &Term, at: NodeId) -> Result<Option<Term>> {
        let position = term.get(at)?;
        Ok(self.rewrite_at(term, position))
    }

    /// All one-step rewrites of `term` by this rule, one per matching position.
    pub fn rewrites<'a>(&'a self, term: &'a Term) -> Candidates<'a> {
        Candidates::new(term, std::slice::from_ref(self))
    }

    pub(crate) fn rewrite_at(&self, term: &Term, position: TermRef<'_>) -> Option<Term> {
        let bindings = match_pattern(self.pattern.as_ref(), position)?;
        let replacement = bindings.instantiate(self.replacement.as_ref());
        trace!(
            "rewrite: {} matches {position} with {bindings:?}, producing {replacement}",
            self.pattern
        );

        // The clone keeps node ids, so `position` designates the same node in it.
        let mut candidate = term.clone();
        candidate.replace_with(position.id(), replacement).ok()?;
        Some(candidate)
    }
}

/// Rules, target and repetition factor of a rewriting problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSystem {
    factor: NonZeroUsize,
    rules: Vec<Rule>,
    target: Term,
}

impl RuleSystem {
    /// Build a rule system from its parts. `factor` must be positive and `rules` non-empty.
    pub fn new(factor: usize, rules: Vec<Rule>, target: Term) -> Result<Self> {
        let factor =
            NonZeroUsize::new(factor).ok_or_else(|| Error::InvalidFactor(factor.to_string()))?;
        if rules.is_empty() {
            return Err(Error::MalformedRuleSystem(
                "at least one rule is required".to_string(),
            ));
        }
        Ok(Self {
            factor,
            rules,
            target,
        })
    }

    /// Read a rule system from its textual form `rewrite ( [n] -> ( P R ) … T )`.
    ///
    /// The input is copied; it is never modified.
    pub fn from_term(system: TermRef<'_>) -> Result<Self> {
        if !system.symbol().is(REWRITE) {
            return Err(Error::MalformedRuleSystem(format!(
                "expected `{REWRITE}` as root symbol, found `{}`",
                system.symbol()
            )));
        }

        let arguments: Vec<TermRef<'_>> = system.arguments().collect();
        let Some((target, mut rules)) = arguments.split_last() else {
            return Err(Error::MalformedRuleSystem(format!(
                "`{REWRITE}` requires at least one rule and a target"
            )));
        };
        if target.symbol().is(RULE) {
            return Err(Error::MalformedRuleSystem(format!(
                "the last argument must be the target term, found the rule `{target}`"
            )));
        }

        let mut factor = 1;
        if let Some((first, rest)) = rules.split_first() {
            if first.arity() == 0 && !first.is_variable() {
                factor = parse_factor(first.symbol())?;
                rules = rest;
            }
        }

        let rules = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                let mut sides = rule.arguments();
                match (sides.next(), sides.next()) {
                    (Some(pattern), Some(replacement))
                        if rule.symbol().is(RULE) && rule.arity() == 2 =>
                    {
                        Ok(Rule::new(pattern.to_term(), replacement.to_term()))
                    }
                    _ => Err(Error::MalformedRuleSystem(format!(
                        "rule {i} must be of the form `{RULE} ( P R )`, found `{rule}`"
                    ))),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(factor, rules, target.to_term())
    }

    #[inline]
    pub fn factor(&self) -> usize {
        self.factor.get()
    }

    #[inline]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[inline]
    pub fn target(&self) -> &Term {
        &self.target
    }

    /// The one-step rewrites of `term` under every rule, rules in declared order.
    pub fn candidates<'a>(&'a self, term: &'a Term) -> Candidates<'a> {
        Candidates::new(term, &self.rules)
    }

    /// One round: the union of the candidates of every carried term.
    ///
    /// When that union is empty nothing applies anywhere and `carried` is returned unchanged.
    pub fn step(&self, carried: &ResultSet) -> ResultSet {
        let next: ResultSet = carried
            .iter()
            .flat_map(|term| self.candidates(term))
            .collect();
        if next.is_empty() {
            trace!("rewrite: no rule applies to the {} carried term(s)", carried.len());
            carried.clone()
        } else {
            next
        }
    }

    /// Successive rounds starting from the target. The iterator never ends on its own; rounds
    /// past a fixpoint repeat the same set.
    pub fn rounds(&self) -> Rounds<'_> {
        Rounds {
            system: self,
            carried: ResultSet::from_iter([self.target.clone()]),
            round: 0,
        }
    }

    /// The result set of round `factor`.
    pub fn run(&self) -> ResultSet {
        let seed = ResultSet::from_iter([self.target.clone()]);
        (0..self.factor.get()).fold(seed, |carried, round| {
            let next = self.step(&carried);
            debug!("rewrite: round {} produced {} term(s)", round + 1, next.len());
            next
        })
    }
}

fn parse_factor(symbol: &Symbol) -> Result<usize> {
    symbol
        .as_integer()
        .and_then(|n| usize::try_from(n).ok())
        .filter(|&n| n > 0)
        .ok_or_else(|| Error::InvalidFactor(symbol.to_string()))
}

/// Lazy sequence of the result sets of rounds 1, 2, … of a [`RuleSystem`].
#[derive(Clone)]
pub struct Rounds<'a> {
    system: &'a RuleSystem,
    carried: ResultSet,
    round: usize,
}

impl Rounds<'_> {
    /// Number of rounds produced so far.
    pub fn round(&self) -> usize {
        self.round
    }
}

impl Iterator for Rounds<'_> {
    type Item = ResultSet;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.system.step(&self.carried);
        self.round += 1;
        debug!("rewrite: round {} produced {} term(s)", self.round, next.len());
        self.carried = next.clone();
        Some(next)
    }
}

/// Ordered, duplicate-free set of terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    terms: BTreeSet<Term>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `term`, returning whether it was absent.
    pub fn insert(&mut self, term: Term) -> bool {
        self.terms.insert(term)
    }

    #[inline]
    pub fn contains(&self, term: &Term) -> bool {
        self.terms.contains(term)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, Term> {
        self.terms.iter()
    }

    /// Render as `results ( t1 t2 … )`.
    pub fn to_term(&self) -> Term {
        let mut out = Term::leaf(Symbol::keyword(RESULTS));
        for term in &self.terms {
            out.push_argument(term.copy());
        }
        out
    }
}

impl FromIterator<Term> for ResultSet {
    fn from_iter<T: IntoIterator<Item = Term>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl Extend<Term> for ResultSet {
    fn extend<T: IntoIterator<Item = Term>>(&mut self, iter: T) {
        self.terms.extend(iter);
    }
}

impl IntoIterator for ResultSet {
    type Item = Term;
    type IntoIter = btree_set::IntoIter<Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl<'s> IntoIterator for &'s ResultSet {
    type Item = &'s Term;
    type IntoIter = btree_set::Iter<'s, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// Rewrite the rule system written as `rewrite ( [n] -> ( P R ) … T )`.
pub fn rewrite(system: &Term) -> Result<ResultSet> {
    Ok(RuleSystem::from_term(system.as_ref())?.run())
}
