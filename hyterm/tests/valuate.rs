use hyterm::prelude::*;

fn term(s: &str) -> Term {
    s.parse().expect("parse should succeed")
}

fn valuated(s: &str) -> String {
    valuate(&term(s)).expect("well-formed bindings").to_string()
}

fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

#[test]
fn nested_bindings() {
    assert_eq!(
        valuated("set ( 'X a set ( 'Y b f ( 'X 'Y ) ) )"),
        "f ( a b )"
    );
    assert_eq!(
        valuated("set ( 'X a set ( 'Y g ( 'X ) set ( 'Z h ( 'Y 'X ) k ( 'Z ) ) ) )"),
        "k ( h ( g ( a ) a ) )"
    );
}

#[test]
fn inner_binding_shadows_outer() {
    assert_eq!(valuated("set ( 'X a set ( 'X b 'X ) )"), "b");
    // The shadow ends with the inner body.
    assert_eq!(
        valuated("set ( 'X a f ( set ( 'X b 'X ) 'X ) )"),
        "f ( b a )"
    );
    // The inner value still sees the outer binding.
    assert_eq!(
        valuated("set ( 'X a set ( 'X f ( 'X ) g ( 'X ) ) )"),
        "g ( f ( a ) )"
    );
}

#[test]
fn sibling_scopes_are_independent() {
    assert_eq!(
        valuated("p ( set ( 'X a 'X ) set ( 'Y b 'X ) 'Y )"),
        "p ( a 'X 'Y )"
    );
}

#[test]
fn bindings_do_not_rewrite_each_other() {
    // 'Y is free where 'X is bound, so it stays free in the value of 'X.
    assert_eq!(
        valuated("set ( 'X f ( 'Y ) set ( 'Y b g ( 'X 'Y ) ) )"),
        "g ( f ( 'Y ) b )"
    );
}

#[test]
fn works_inside_other_systems() {
    let system = valuate(&term(
        "set ( 'R -> ( a b ) rewrite ( 2 'R 'R f ( a a ) ) )",
    ))
    .unwrap();
    assert_eq!(system, term("rewrite ( 2 -> ( a b ) -> ( a b ) f ( a a ) )"));
    assert_eq!(rewrite(&system).unwrap().to_term(), term("results ( f ( b b ) )"));
}

#[test]
fn starts_from_a_scope() {
    let mut scope = Substitution::new();
    scope.bind(sym("'X"), term("a")).unwrap();
    scope.bind(sym("'Y"), term("b")).unwrap();
    let t = term("set ( 'X c f ( 'X 'Y ) )");
    assert_eq!(valuate_with(t.as_ref(), &scope).unwrap(), term("f ( c b )"));
    assert_eq!(scope.get(&sym("'X")), Some(&term("a")));
}

#[test]
fn input_is_untouched() {
    let t = term("set ( 'X a set ( 'X b h ( 'X ) ) )");
    let before = t.copy();
    valuate(&t).unwrap();
    assert_eq!(t, before);
}

#[test]
fn malformed_bindings() {
    for src in [
        "set ( 'X a )",
        "set ( a b c )",
        "set ( 'X ( a ) b c )",
        "f ( set ( 'X a b c ) )",
    ] {
        let err = valuate(&term(src)).unwrap_err();
        assert!(err.is_malformed_binding(), "{src}: {err}");
    }
}
