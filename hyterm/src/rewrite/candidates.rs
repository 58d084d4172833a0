use std::iter::FusedIterator;

use crate::{rewrite::Rule, term::Term, walker::PreOrder};

/// Lazy sequence of the one-step rewrites of a term.
///
/// Rules are tried in order; for each rule every position of the term is tried in pre-order.
/// Each matching (rule, position) pair yields one whole candidate term, in which exactly that
/// position was rewritten. Duplicates are not filtered here.
///
/// The sequence is finite. It can be restarted from any point by cloning it, and exploration can
/// be capped with the usual iterator adaptors.
///
/// ```
/// use hyterm::{rewrite::{Candidates, Rule}, term::Term};
///
/// let rules = [Rule::new("a".parse()?, "b".parse()?)];
/// let term: Term = "f ( a a )".parse()?;
/// let out: Vec<String> = Candidates::new(&term, &rules).map(|t| t.to_string()).collect();
/// assert_eq!(out, ["f ( b a )", "f ( a b )"]);
/// # Ok::<(), hyterm::Error>(())
/// ```
#[derive(Clone)]
pub struct Candidates<'a> {
    term: &'a Term,
    rules: &'a [Rule],
    rule: usize,
    positions: PreOrder<'a>,
}

impl<'a> Candidates<'a> {
    pub fn new(term: &'a Term, rules: &'a [Rule]) -> Self {
        Self {
            term,
            rules,
            rule: 0,
            positions: term.as_ref().pre_order(),
        }
    }
}

impl Iterator for Candidates<'_> {
    type Item = Term;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rule = self.rules.get(self.rule)?;
            match self.positions.next() {
                Some(position) => {
                    if let Some(candidate) = rule.rewrite_at(self.term, position) {
                        return Some(candidate);
                    }
                }
                None => {
                    self.rule += 1;
                    self.positions = self.term.as_ref().pre_order();
                }
            }
        }
    }
}

impl FusedIterator for Candidates<'_> {}
