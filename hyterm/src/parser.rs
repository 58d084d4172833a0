//! Parser for the textual term syntax using chumsky.
//!
//! The syntax is `symbol` or `symbol ( argument … )`. Symbols are maximal runs of characters
//! other than whitespace and parentheses; whitespace is only needed to separate two adjacent
//! symbols. An empty argument list is accepted: `f ( )` reads as the leaf `f`.
//!
//! The compact form produced by `Display` parses back to an equal term.
use std::str::FromStr;

use chumsky::prelude::*;

use crate::{error::Error, symbol::Symbol, term::Term};

fn symbol_parser<'src>()
-> impl Parser<'src, &'src str, Symbol, extra::Err<Rich<'src, char>>> + Clone {
    any()
        .filter(|c: &char| !c.is_whitespace() && *c != '(' && *c != ')')
        .repeated()
        .at_least(1)
        .to_slice()
        .try_map(|s: &str, span| {
            Symbol::new(s).map_err(|e| Rich::custom(span, format!("invalid symbol: {e}")))
        })
        .labelled("symbol")
}

/// Parser for a single term, surrounding whitespace not included.
pub fn term_parser<'src>()
-> impl Parser<'src, &'src str, Term, extra::Err<Rich<'src, char>>> + Clone {
    recursive(|term| {
        let arguments = just('(')
            .padded()
            .ignore_then(term.padded().repeated().collect::<Vec<Term>>())
            .then_ignore(just(')'))
            .labelled("argument list");

        symbol_parser()
            .then(arguments.or_not())
            .map(|(symbol, arguments)| {
                let mut term = Term::leaf(symbol);
                for argument in arguments.into_iter().flatten() {
                    term.push_argument(argument);
                }
                term
            })
    })
}

/// Parse a whole input as one term.
///
/// Errors are returned as human-readable messages.
///
/// ```
/// use hyterm::parser::parse;
///
/// let t = parse("f ( a g(b) )").unwrap();
/// assert_eq!(t.to_string(), "f ( a g ( b ) )");
/// assert!(parse("f ( a").is_err());
/// ```
pub fn parse(src: &str) -> Result<Term, Vec<String>> {
    let (term, errs) = term_parser()
        .padded()
        .then_ignore(end())
        .parse(src)
        .into_output_errors();

    let errors: Vec<String> = errs
        .into_iter()
        .map(|e| format!("parse error: {e}"))
        .collect();
    match term {
        Some(term) if errors.is_empty() => Ok(term),
        _ => Err(errors),
    }
}

impl FromStr for Term {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s).map_err(Error::Parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_and_nesting() {
        let t = parse("  f ( a  g ( b c ) 'X )\n").unwrap();
        assert_eq!(t.symbol().as_str(), "f");
        assert_eq!(t.arity(), 3);
        assert_eq!(t.size(), 6);
        assert!(t.as_ref().argument(2).unwrap().is_variable());
    }

    #[test]
    fn spacing_is_optional_around_parentheses() {
        assert_eq!(parse("f(a g(b))").unwrap(), parse("f ( a g ( b ) )").unwrap());
    }

    #[test]
    fn empty_argument_list() {
        assert_eq!(parse("f ( )").unwrap(), parse("f").unwrap());
    }

    #[test]
    fn operator_symbols() {
        let t = parse("-> ( = ( a b ) 12 )").unwrap();
        assert_eq!(t.symbol().as_str(), "->");
        assert_eq!(t.as_ref().argument(1).unwrap().symbol().as_integer(), Some(12));
    }

    #[test]
    fn rejects_malformed_input() {
        for src in ["", "   ", "( a )", "f ( a", "f ) a", "a b", "f ( a ) )"] {
            assert!(parse(src).is_err(), "{src:?}");
        }
        let err = "f (".parse::<Term>().unwrap_err();
        assert!(err.is_parse());
    }
}
