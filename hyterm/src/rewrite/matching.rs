use crate::{term::TermRef, variable::Substitution};

/// One-directional matching of `pattern` against `subject`: only variables of the pattern get
/// bound.
///
/// Returns the bindings on success. A pattern that contains variables but matches without
/// binding any of them (e.g. it is literally equal to the subject) does not match: this keeps
/// variables written inside the subject from being taken for an always-matching pattern.
///
/// ```
/// use hyterm::{rewrite::match_pattern, symbol::Symbol, term::Term};
///
/// let pattern: Term = "f ( 'X 'X )".parse()?;
/// let subject: Term = "f ( g ( a ) g ( a ) )".parse()?;
/// let bindings = match_pattern(pattern.as_ref(), subject.as_ref()).unwrap();
/// assert_eq!(bindings.get(&Symbol::new("'X")?).unwrap().to_string(), "g ( a )");
///
/// let subject: Term = "f ( a b )".parse()?;
/// assert!(match_pattern(pattern.as_ref(), subject.as_ref()).is_none());
/// # Ok::<(), hyterm::Error>(())
/// ```
pub fn match_pattern(pattern: TermRef<'_>, subject: TermRef<'_>) -> Option<Substitution> {
    let bindings = match_into(pattern, subject, Substitution::new())?;
    if bindings.is_empty() && pattern.contains_variable() {
        return None;
    }
    Some(bindings)
}

fn match_into(
    pattern: TermRef<'_>,
    subject: TermRef<'_>,
    mut bindings: Substitution,
) -> Option<Substitution> {
    if pattern.is_variable() {
        return match bindings.get(pattern.symbol()) {
            Some(bound) if *bound != subject => None,
            Some(_) => Some(bindings),
            None => {
                bindings.bind_unchecked(pattern.symbol().clone(), subject.to_term());
                Some(bindings)
            }
        };
    }

    if pattern.arity() != subject.arity() {
        return None;
    }
    if pattern == subject {
        return Some(bindings);
    }
    if pattern.symbol() != subject.symbol() {
        return None;
    }

    pattern
        .arguments()
        .zip(subject.arguments())
        .try_fold(bindings, |bindings, (p, s)| match_into(p, s, bindings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{symbol::Symbol, term::Term};

    fn term(s: &str) -> Term {
        s.parse().unwrap()
    }

    fn matches(pattern: &str, subject: &str) -> Option<Substitution> {
        match_pattern(term(pattern).as_ref(), term(subject).as_ref())
    }

    #[test]
    fn variable_pattern_matches_anything() {
        let b = matches("'X", "f ( a b )").unwrap();
        assert_eq!(b.get(&Symbol::new("'X").unwrap()), Some(&term("f ( a b )")));
    }

    #[test]
    fn ground_pattern_matches_itself_only() {
        assert!(matches("a", "a").unwrap().is_empty());
        assert!(matches("a", "b").is_none());
        assert!(matches("f ( a )", "f ( a a )").is_none());
    }

    #[test]
    fn repeated_variable_must_agree() {
        assert!(matches("f ( 'X 'X )", "f ( a a )").is_some());
        assert!(matches("f ( 'X 'X )", "f ( a b )").is_none());
    }

    #[test]
    fn identical_pattern_with_variables_does_not_match() {
        assert!(matches("f ( 'X )", "f ( 'X )").is_none());
        // The subject's own variable is an ordinary leaf for the pattern.
        let b = matches("f ( 'Y )", "f ( 'X )").unwrap();
        assert_eq!(b.get(&Symbol::new("'Y").unwrap()), Some(&term("'X")));
    }

    #[test]
    fn symbols_must_agree_below_root() {
        assert!(matches("f ( g ( 'X ) )", "f ( h ( a ) )").is_none());
        let b = matches("f ( g ( 'X ) 'Y )", "f ( g ( a ) b )").unwrap();
        assert_eq!(b.len(), 2);
    }
}
