//! Scoped variable bindings.
//!
//! Role
//! - `set ( 'X V B )` binds `'X` to `V` inside `B` and stands for `B` with every free
//!   occurrence of `'X` replaced by `V`.
//! - Scoping is lexical: `V` is valuated in the enclosing scope, and an inner `set` of the
//!   same variable hides the outer one inside its own body only.
//! - Variables bound by no enclosing `set` are left as they are. The input is never modified.
//!
//! Example
//! ```
//! use hyterm::{term::Term, valuate::valuate};
//!
//! let t: Term = "set ( 'X a set ( 'Y f ( 'X ) g ( 'X 'Y 'Z ) ) )".parse()?;
//! assert_eq!(valuate(&t)?.to_string(), "g ( a f ( a ) 'Z )");
//! # Ok::<(), hyterm::Error>(())
//! ```
use log::trace;

use crate::{
    error::{Error, Result},
    term::{Term, TermRef},
    variable::Substitution,
};

pub(crate) const SET: &str = "set";

/// Valuate every `set ( 'X V B )` of `term`, innermost bindings first.
pub fn valuate(term: &Term) -> Result<Term> {
    valuate_in(term.as_ref(), &mut Substitution::new())
}

/// Valuate `term` as if it were enclosed by the bindings of `scope`.
///
/// ```
/// use hyterm::{symbol::Symbol, term::Term, valuate::valuate_with, variable::Substitution};
///
/// let mut scope = Substitution::new();
/// scope.bind(Symbol::new("'N")?, "z".parse()?)?;
/// let t: Term = "set ( 'M s ( 'N ) p ( 'M 'N ) )".parse()?;
/// assert_eq!(valuate_with(t.as_ref(), &scope)?.to_string(), "p ( s ( z ) z )");
/// # Ok::<(), hyterm::Error>(())
/// ```
pub fn valuate_with(term: TermRef<'_>, scope: &Substitution) -> Result<Term> {
    valuate_in(term, &mut scope.clone())
}

fn valuate_in(term: TermRef<'_>, scope: &mut Substitution) -> Result<Term> {
    if term.symbol().is(SET) {
        let (variable, value, body) = binding_parts(term)?;
        let value = valuate_in(value, scope)?;
        trace!("valuate: bind {} -> {value}", variable.symbol());

        let name = variable.symbol().clone();
        let hidden = scope.shadow(name.clone(), value);
        let body = valuate_in(body, scope);
        scope.unshadow(&name, hidden);
        return body;
    }

    if term.is_variable() {
        if let Some(value) = scope.get(term.symbol()) {
            return Ok(value.clone());
        }
    }

    let mut out = Term::leaf(term.symbol().clone());
    for argument in term.arguments() {
        out.push_argument(valuate_in(argument, scope)?);
    }
    Ok(out)
}

fn binding_parts(term: TermRef<'_>) -> Result<(TermRef<'_>, TermRef<'_>, TermRef<'_>)> {
    let mut parts = term.arguments();
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(variable), Some(value), Some(body), None) if variable.is_variable() => {
            Ok((variable, value, body))
        }
        (Some(variable), Some(_), Some(_), None) => Err(Error::MalformedBinding(format!(
            "`{variable}` is not a variable in `{term}`"
        ))),
        _ => Err(Error::MalformedBinding(format!(
            "expected `{SET} ( 'X value body )`, found `{term}`"
        ))),
    }
}
