use hyterm::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn term(s: &str) -> Term {
    s.parse().expect("parse should succeed")
}

fn results(src: &str) -> Vec<String> {
    rewrite(&term(src))
        .expect("well-formed system")
        .iter()
        .map(|t| t.to_string())
        .collect()
}

fn random_term(budget: usize, rng: &mut impl Rng) -> Term {
    const SYMBOLS: [&str; 4] = ["f", "g", "a", "b"];
    let mut t = Term::new(SYMBOLS[rng.random_range(0..SYMBOLS.len())]).unwrap();
    if budget == 0 || rng.random_bool(0.4) {
        return t;
    }
    for _ in 0..rng.random_range(1..=2) {
        t.push_argument(random_term(budget - 1, rng));
    }
    t
}

#[test]
fn one_candidate_per_position() {
    assert_eq!(
        results("rewrite ( -> ( a b ) f ( a a ) )"),
        ["f ( a b )", "f ( b a )"]
    );
    assert_eq!(
        rewrite(&term("rewrite ( -> ( a b ) f ( a a ) )"))
            .unwrap()
            .to_term(),
        term("results ( f ( a b ) f ( b a ) )")
    );
}

#[test]
fn rules_apply_in_the_same_round() {
    assert_eq!(
        results("rewrite ( -> ( a b ) -> ( f ( 'X ) 'X ) f ( a ) )"),
        ["a", "f ( b )"]
    );
}

#[test]
fn factor_is_repeated_rounds() {
    let rules = "-> ( a b ) -> ( f ( 'X 'Y ) g ( 'Y ) )";
    let target = "f ( a g ( a ) )";
    let system = RuleSystem::from_term(term(&format!("rewrite ( {rules} {target} )")).as_ref())
        .unwrap();

    let mut carried = ResultSet::from_iter([term(target)]);
    for k in 1..=4 {
        carried = system.step(&carried);
        let repeated = rewrite(&term(&format!("rewrite ( {k} {rules} {target} )"))).unwrap();
        assert_eq!(repeated, carried, "factor {k}");
    }
}

#[test]
fn terms_left_behind_leave_the_set() {
    assert_eq!(
        results("rewrite ( 2 -> ( a b ) -> ( a c ) -> ( b d ) a )"),
        ["d"]
    );

    let src = "rewrite ( 4 -> ( a b ) -> ( b c ) -> ( c e ) -> ( h ( a ) d ) h ( a ) )";
    let system = RuleSystem::from_term(term(src).as_ref()).unwrap();
    let rounds: Vec<Vec<String>> = system
        .rounds()
        .take(4)
        .map(|set| set.iter().map(|t| t.to_string()).collect())
        .collect();
    assert_eq!(
        rounds,
        [
            vec!["d", "h ( b )"],
            vec!["h ( c )"],
            vec!["h ( e )"],
            vec!["h ( e )"],
        ]
    );
    assert_eq!(results(src), ["h ( e )"]);
}

#[test]
fn rounds_iterate_lazily() {
    let system = RuleSystem::from_term(term("rewrite ( 3 -> ( a b ) f ( a a a ) )").as_ref())
        .unwrap();
    let sizes: Vec<usize> = system.rounds().take(4).map(|set| set.len()).collect();
    assert_eq!(sizes, [3, 3, 1, 1]);
    assert_eq!(system.rounds().nth(2).unwrap(), system.run());
}

#[test]
fn fixpoint_when_nothing_applies() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xf1);
    let rule = Rule::new(term("z"), term("y"));
    for _ in 0..20 {
        let target = random_term(4, &mut rng);
        let system = RuleSystem::new(1, vec![rule.clone()], target.clone()).unwrap();
        let once = system.run();
        assert_eq!(once.iter().collect::<Vec<_>>(), [&target]);
        assert_eq!(system.step(&once), once);
    }
}

#[test]
fn results_are_sorted_and_unique() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x50);
    let rules = vec![
        Rule::new(term("a"), term("b")),
        Rule::new(term("g ( 'X )"), term("'X")),
        Rule::new(term("f ( 'X 'Y )"), term("f ( 'Y 'X )")),
    ];
    for _ in 0..20 {
        let system = RuleSystem::new(2, rules.clone(), random_term(4, &mut rng)).unwrap();
        let out: Vec<Term> = system.run().into_iter().collect();
        assert!(!out.is_empty());
        assert!(out.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn candidates_can_be_capped_and_restarted() {
    let target = term("f ( a a a a )");
    let rules = [Rule::new(term("a"), term("b"))];
    let mut candidates = Candidates::new(&target, &rules);
    let first = candidates.next().unwrap();
    assert_eq!(first, term("f ( b a a a )"));

    let restart = candidates.clone();
    let rest: Vec<Term> = candidates.collect();
    assert_eq!(rest.len(), 3);
    assert_eq!(restart.take(1).next().unwrap(), term("f ( a b a a )"));
}

#[test]
fn candidates_keep_duplicates() {
    let target = term("f ( a a )");
    let rules = [
        Rule::new(term("f ( 'X 'X )"), term("'X")),
        Rule::new(term("f ( a 'Y )"), term("a")),
    ];
    let all: Vec<Term> = Candidates::new(&target, &rules).collect();
    assert_eq!(all, [term("a"), term("a")]);
}

#[test]
fn matching_respects_repeated_variables() {
    assert_eq!(
        results("rewrite ( -> ( f ( 'X 'X ) 'X ) h ( f ( a a ) f ( a b ) ) )"),
        ["h ( a f ( a b ) )"]
    );
}

#[test]
fn variables_of_the_target_are_not_wildcards() {
    assert_eq!(results("rewrite ( -> ( g ( 'X ) c ) g ( 'X ) )"), ["g ( 'X )"]);
    assert_eq!(results("rewrite ( -> ( g ( 'Y ) c ) g ( 'X ) )"), ["c"]);
}

#[test]
fn input_is_untouched() {
    let system = term("rewrite ( 2 -> ( a b ) f ( a g ( a ) ) )");
    let before = system.copy();
    rewrite(&system).unwrap();
    assert_eq!(system, before);
}

#[test]
fn malformed_systems() {
    assert!(
        rewrite(&term("rewrite ( f ( a ) )"))
            .unwrap_err()
            .is_malformed_rule_system()
    );
    assert!(
        rewrite(&term("rewrite ( 0 -> ( a b ) a )"))
            .unwrap_err()
            .is_invalid_factor()
    );
    assert!(
        RuleSystem::new(1, Vec::new(), term("a"))
            .unwrap_err()
            .is_malformed_rule_system()
    );
}
