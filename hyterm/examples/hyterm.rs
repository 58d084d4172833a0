use std::io::Write;

use clap::Parser;
use hyterm::prelude::*;
use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Read a term and evaluate it: `unify ( … )` systems are unified, `rewrite ( … )` systems are
/// rewritten, `set ( … )` bindings are expanded, anything else is echoed back.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// File to read
    #[arg(short, long)]
    pub file: Option<String>,

    /// Whether to read stdin (if set, file is ignored)
    #[arg(short, long, default_value_t = false)]
    pub stdin: bool,

    /// Specify the term in the command line (overrides file and stdin)
    #[arg(short, long)]
    pub code: Option<String>,

    /// Lay the output out within the terminal width instead of the compact form
    #[arg(short, long, default_value_t = false)]
    pub expanded: bool,

    /// For rewrite systems, print the result set of every round
    #[arg(short, long, default_value_t = false)]
    pub rounds: bool,
}

fn evaluate(term: &Term, args: &Args) -> hyterm::Result<Vec<Term>> {
    let symbol = term.symbol();
    if symbol.is("unify") {
        Ok(vec![unify(term)?.to_term()])
    } else if symbol.is("rewrite") && args.rounds {
        let system = RuleSystem::from_term(term.as_ref())?;
        Ok(system
            .rounds()
            .take(system.factor())
            .map(|set| set.to_term())
            .collect())
    } else if symbol.is("rewrite") {
        Ok(vec![rewrite(term)?.to_term()])
    } else if symbol.is("set") {
        Ok(vec![valuate(term)?])
    } else {
        Ok(vec![term.copy()])
    }
}

fn main() {
    let args = Args::parse();

    let src = if let Some(code) = args.code.clone() {
        code
    } else if args.stdin {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .expect("Failed to read from stdin");
        buffer
    } else if let Some(file) = args.file.as_ref() {
        std::fs::read_to_string(file).expect("Failed to read file")
    } else {
        eprintln!("No input provided. Use --file <FILE>, --stdin or --code <TERM>.");
        std::process::exit(1);
    };

    let mut error_color = ColorSpec::new();
    error_color.set_fg(Some(termcolor::Color::Red));
    error_color.set_intense(true);

    let stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut stdout = stdout.lock();

    let outcome = src
        .parse::<Term>()
        .and_then(|term| evaluate(&term, &args));
    match outcome {
        Ok(outputs) => {
            for output in outputs {
                if args.expanded {
                    output.pretty_print().unwrap();
                } else {
                    writeln!(stdout, "{output}").unwrap();
                }
            }
        }
        Err(e) => {
            stdout.set_color(&error_color).unwrap();
            writeln!(stdout, "{e}").unwrap();
            stdout.reset().unwrap();
            stdout.flush().unwrap();
            std::process::exit(2);
        }
    }
    stdout.flush().unwrap();
}
