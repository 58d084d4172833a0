use criterion::{Criterion, black_box, criterion_group, criterion_main};

use hyterm::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const SYMBOLS: [&str; 6] = ["f", "g", "h", "a", "b", "c"];

// Random ground term; `budget` bounds the depth.
fn random_term(budget: usize, rng: &mut impl Rng) -> Term {
    let symbol = Symbol::new(SYMBOLS[rng.random_range(0..SYMBOLS.len())]).unwrap();
    let mut term = Term::leaf(symbol);
    if budget == 0 || rng.random_bool(0.3) {
        return term;
    }
    for _ in 0..rng.random_range(1..=3) {
        term.push_argument(random_term(budget - 1, rng));
    }
    term
}

fn bench_terms(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    let terms: Vec<Term> = (0..64).map(|_| random_term(8, &mut rng)).collect();
    let texts: Vec<String> = terms.iter().map(|t| t.to_string()).collect();

    c.bench_function("parse_random", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(text.parse::<Term>().unwrap());
            }
        })
    });

    c.bench_function("sort_random", |b| {
        b.iter(|| {
            let mut sorted = terms.clone();
            sorted.sort();
            black_box(sorted);
        })
    });

    c.bench_function("copy_random", |b| {
        b.iter(|| {
            for term in &terms {
                black_box(term.copy());
            }
        })
    });
}

fn bench_unify(c: &mut Criterion) {
    // Chain 'X0 = f ( 'X1 'X1 ), 'X1 = f ( 'X2 'X2 ), ...
    let mut src = String::from("unify (");
    for i in 0..12 {
        src.push_str(&format!(" = ( 'X{i} f ( 'X{n} 'X{n} ) )", n = i + 1));
    }
    src.push_str(" = ( 'X12 a ) )");
    let system: Term = src.parse().unwrap();

    c.bench_function("unify_chain", |b| {
        b.iter(|| black_box(unify(&system).unwrap()))
    });
}

fn bench_rewrite(c: &mut Criterion) {
    let system: Term = "rewrite ( 3 -> ( a b ) -> ( f ( 'X 'Y ) f ( 'Y 'X ) ) f ( a g ( a a ) a ) )"
        .parse()
        .unwrap();

    c.bench_function("rewrite_three_rounds", |b| {
        b.iter(|| black_box(rewrite(&system).unwrap()))
    });

    let system = RuleSystem::from_term(system.as_ref()).unwrap();
    let target = system.target().clone();
    c.bench_function("candidates_first", |b| {
        b.iter(|| black_box(system.candidates(&target).next()))
    });
}

criterion_group!(benches, bench_terms, bench_unify, bench_rewrite);
criterion_main!(benches);
