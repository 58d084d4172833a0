use std::cmp::Ordering;

use crate::term::{Term, TermRef};

/// Total order over terms: symbol first, then arity, then arguments pairwise, left to right.
///
/// This is the canonical order used for sorting and deduplicating result sets. Two terms
/// compare `Equal` exactly when they are structurally identical (up to the ASCII case folding
/// of [`Symbol`](crate::symbol::Symbol)).
///
/// ```
/// use std::cmp::Ordering;
/// use hyterm::term::{Term, compare};
///
/// let a: Term = "f ( a b )".parse()?;
/// let b: Term = "f ( a c )".parse()?;
/// let c: Term = "f ( a )".parse()?;
/// assert_eq!(compare(a.as_ref(), b.as_ref()), Ordering::Less);
/// assert_eq!(compare(c.as_ref(), a.as_ref()), Ordering::Less);
/// assert_eq!(compare(a.as_ref(), a.copy().as_ref()), Ordering::Equal);
/// # Ok::<(), hyterm::Error>(())
/// ```
pub fn compare(a: TermRef<'_>, b: TermRef<'_>) -> Ordering {
    if std::ptr::eq(a.term(), b.term()) && a.id() == b.id() {
        return Ordering::Equal;
    }

    a.symbol()
        .cmp(b.symbol())
        .then_with(|| a.arity().cmp(&b.arity()))
        .then_with(|| {
            a.arguments()
                .zip(b.arguments())
                .map(|(x, y)| compare(x, y))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        })
}

impl PartialEq for TermRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        compare(*self, *other).is_eq()
    }
}

impl Eq for TermRef<'_> {}

impl PartialOrd for TermRef<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TermRef<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(*self, *other)
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        compare(self.as_ref(), other.as_ref()).is_eq()
    }
}

impl Eq for Term {}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self.as_ref(), other.as_ref())
    }
}

impl<'a> PartialEq<TermRef<'a>> for Term {
    fn eq(&self, other: &TermRef<'a>) -> bool {
        compare(self.as_ref(), *other).is_eq()
    }
}

impl<'a> PartialEq<Term> for TermRef<'a> {
    fn eq(&self, other: &Term) -> bool {
        compare(*self, other.as_ref()).is_eq()
    }
}
