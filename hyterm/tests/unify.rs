use hyterm::prelude::*;

fn term(s: &str) -> Term {
    s.parse().expect("parse should succeed")
}

fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

fn solve(src: &str) -> Unification {
    unify(&term(src)).expect("well-formed system")
}

#[test]
fn repeated_equality_is_consistent() {
    let result = solve("unify ( = ( 'X a ) = ( 'X a ) )");
    let solution = result.solution().unwrap();
    assert_eq!(solution.len(), 1);
    assert_eq!(solution.get(&sym("'X")), Some(&term("a")));
}

#[test]
fn conflicting_bindings_are_incompatible() {
    let result = solve("unify ( = ( 'X a ) = ( 'X b ) )");
    assert_eq!(
        result,
        Unification::Incompatible {
            left: term("a"),
            right: term("b"),
        }
    );
    assert_eq!(result.to_term(), term("incompatible ( a b )"));
}

#[test]
fn occurs_check() {
    assert!(solve("unify ( = ( 'X f ( 'X ) ) )").is_incompatible());
    assert!(solve("unify ( = ( g ( 'Y ) 'Y ) )").is_incompatible());
    assert!(solve("unify ( = ( 'X 'Y ) = ( 'Y f ( 'X ) ) )").is_incompatible());
}

#[test]
fn decomposition() {
    let result = solve("unify ( = ( f ( a b ) f ( 'X 'Y ) ) )");
    assert_eq!(
        result.to_term().to_string(),
        "solution ( val ( 'X a ) val ( 'Y b ) )"
    );
}

#[test]
fn symbol_clash_reports_the_subterms() {
    let result = solve("unify ( = ( f ( g ( a ) 'X ) f ( h ( a ) b ) ) )");
    assert_eq!(
        result,
        Unification::Incompatible {
            left: term("g ( a )"),
            right: term("h ( a )"),
        }
    );
}

#[test]
fn clash_is_reported_after_substitution() {
    let result = solve("unify ( = ( 'X a ) = ( f ( 'X ) f ( b ) ) )");
    assert_eq!(
        result,
        Unification::Incompatible {
            left: term("a"),
            right: term("b"),
        }
    );
}

#[test]
fn solution_never_mentions_bound_variables() {
    let result = solve("unify ( = ( 'X f ( 'Y ) ) = ( 'Y g ( 'Z ) ) = ( 'Z c ) )");
    let solution = result.solution().unwrap();
    assert_eq!(solution.get(&sym("'X")), Some(&term("f ( g ( c ) )")));
    assert_eq!(solution.get(&sym("'Y")), Some(&term("g ( c )")));
    assert_eq!(solution.get(&sym("'Z")), Some(&term("c")));

    for (_, value) in solution {
        for (bound, _) in solution {
            assert!(!value.as_ref().contains_symbol(bound));
        }
    }
}

#[test]
fn solution_unifies_every_equality() {
    let src = "unify ( = ( p ( 'X h ( 'Y ) ) p ( k ( 'Z ) 'W ) ) = ( 'Z a ) = ( 'W h ( b ) ) )";
    let system = term(src);
    let result = unify(&system).unwrap();
    let solution = result.solution().unwrap();

    for equality in system.as_ref().arguments() {
        let left = solution.instantiate(equality.argument(0).unwrap());
        let right = solution.instantiate(equality.argument(1).unwrap());
        assert_eq!(left, right, "{equality}");
    }
}

#[test]
fn variables_compare_ignoring_case() {
    let result = solve("unify ( = ( 'x a ) = ( 'X a ) )");
    assert_eq!(result.solution().unwrap().len(), 1);
}

#[test]
fn keywords_ignore_case() {
    assert!(solve("UNIFY ( = ( a a ) )").is_solution());
}

#[test]
fn trivial_system_has_empty_solution() {
    let result = solve("unify ( = ( f ( a ) f ( a ) ) )");
    assert!(result.solution().unwrap().is_empty());
    assert_eq!(result.to_term(), term("solution"));
}

#[test]
fn typed_systems() {
    let mut system = EqualitySystem::new();
    assert!(system.is_empty());
    system.push(term("'X"), term("f ( 'Y )"));
    system.push(term("'Y"), term("a"));
    let result = system.solve();
    assert_eq!(
        result.solution().unwrap().get(&sym("'X")),
        Some(&term("f ( a )"))
    );
}
