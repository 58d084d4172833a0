//! Rendering of terms: compact `Display` and an RcDoc-based pretty-printer with termcolor
//! annotations.
//!
//! Role
//! - `Display` writes the compact single-line form `f ( a g ( b ) )`, which parses back to an
//!   equal term.
//! - [`PrettyTerm`] lays terms out within a width: a term that does not fit on the line has its
//!   arguments broken over indented lines. Parentheses are colored by depth, keywords of the
//!   unifier and rewriter, variables and integers have their own style.

use std::fmt::{self, Write as _};
use std::io::{self, Write};

use pretty::{RcDoc, RenderAnnotated};
use smallvec::SmallVec;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{
    rewrite::{RESULTS, REWRITE, RULE},
    symbol::Symbol,
    term::{Term, TermRef},
    unify::{EQUAL, INCOMPATIBLE, SOLUTION, UNIFY, VAL},
    valuate::SET,
};

const INDENT: isize = 2;
const DEFAULT_WIDTH: usize = 80;
const KEYWORDS: [&str; 9] = [
    UNIFY,
    EQUAL,
    SOLUTION,
    VAL,
    INCOMPATIBLE,
    REWRITE,
    RULE,
    RESULTS,
    SET,
];

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Keyword,  // unify, =, rewrite, ->, ...
    Variable, // 'X
    Number,   // all-digit symbols
    Symbol,
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Paren(depth) => {
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    _ => Color::Magenta,
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Keyword => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Variable => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Number => {
                s.set_fg(Some(Color::Magenta));
            }
            Style::Symbol => {}
        }
        s
    }

    fn of(symbol: &Symbol) -> Self {
        if symbol.is_variable_name() {
            Style::Variable
        } else if KEYWORDS.iter().any(|k| symbol.is(k)) {
            Style::Keyword
        } else if symbol.as_integer().is_some() {
            Style::Number
        } else {
            Style::Symbol
        }
    }
}

fn to_doc_with_depth(node: TermRef<'_>, depth: u8) -> RcDoc<'static, Style> {
    let symbol = node.symbol();
    let head = RcDoc::as_string(symbol.as_str()).annotate(Style::of(symbol));
    if node.arity() == 0 {
        return head;
    }

    let arguments = RcDoc::intersperse(
        node.arguments()
            .map(|argument| to_doc_with_depth(argument, depth.wrapping_add(1))),
        RcDoc::line(),
    );
    head.append(RcDoc::space())
        .append(RcDoc::as_string("(").annotate(Style::Paren(depth)))
        .append(RcDoc::line().append(arguments).nest(INDENT))
        .append(RcDoc::line())
        .append(RcDoc::as_string(")").annotate(Style::Paren(depth)))
        .group()
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'_, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<W: WriteColor + Write> pretty::Render for ColorWriter<'_, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// The width of the terminal, or 80 if it cannot be determined.
fn terminal_width() -> usize {
    term_size::dimensions()
        .map(|(w, _)| w)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Pretty-printing conveniences for terms.
pub trait PrettyTerm {
    /// Build an RcDoc representation of this term with style annotations.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(), width, out)
    }

    /// Print to stdout with colors (TTY-aware), at the terminal width.
    fn pretty_print(&self) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        self.pretty_render_to(terminal_width(), &mut stdout)?;
        writeln!(stdout)
    }

    /// Format into a plain string (no colors) at width 80.
    fn pretty_string(&self) -> String {
        let mut buf = String::new();
        let _ = self.pretty_doc().render_fmt(DEFAULT_WIDTH, &mut buf);
        buf
    }
}

impl PrettyTerm for TermRef<'_> {
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc_with_depth(*self, 0)
    }
}

impl PrettyTerm for Term {
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc_with_depth(self.as_ref(), 0)
    }
}

enum Step<'a> {
    Open(TermRef<'a>),
    Close,
}

fn write_compact(root: TermRef<'_>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut stack: SmallVec<[Step<'_>; 16]> = SmallVec::new();
    stack.push(Step::Open(root));
    let mut first = true;
    while let Some(step) = stack.pop() {
        if !first {
            f.write_char(' ')?;
        }
        first = false;
        match step {
            Step::Open(node) => {
                f.write_str(node.symbol().as_str())?;
                if node.arity() > 0 {
                    f.write_str(" (")?;
                    stack.push(Step::Close);
                    stack.extend(node.arguments().rev().map(Step::Open));
                }
            }
            Step::Close => f.write_char(')')?,
        }
    }
    Ok(())
}

impl fmt::Display for TermRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_compact(*self, f)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_compact(self.as_ref(), f)
    }
}
