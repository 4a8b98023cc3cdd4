use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use log::LevelFilter;
use trtbl::{
    batch::{ExpressionLines, run_batch},
    interpreter::{context::Context, registry::Juxtaposition},
    listing::write_listing,
    table::format::TableFormat,
};

/// trtbl prints the truth table of boolean expressions.
///
/// Expressions are read from the command line and, when stdin is not a
/// terminal, one per line from stdin.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expressions to tabulate.
    #[arg(value_name = "EXPR")]
    expressions: Vec<String>,

    /// Adds an expression; may be repeated. Keeps its place among the
    /// positional expressions.
    #[arg(short = 'x', long = "expr", value_name = "EXPR")]
    extra_expressions: Vec<String>,

    /// Symbol printed for true.
    #[arg(short, long, env = "TRTBL_TSUB", default_value = "1")]
    tsub: String,

    /// Symbol printed for false.
    #[arg(short, long, env = "TRTBL_FSUB", default_value = "0")]
    fsub: String,

    /// Separator between input columns.
    #[arg(short = 's', long, env = "TRTBL_ISEP", default_value = " ")]
    isep: String,

    /// Separator between the inputs and the result.
    #[arg(short = 'S', long, env = "TRTBL_OSEP", default_value = " = ")]
    osep: String,

    /// Juxtaposition precedence relative to '&': negative binds looser,
    /// positive tighter, 0 disables it.
    #[arg(short, long, env = "TRTBL_JUXTA", default_value_t = -1, allow_negative_numbers = true)]
    juxta: i64,

    /// Lists operators, functions and constants matching REGEX.
    #[arg(short, long, value_name = "REGEX", num_args = 0..=1, default_missing_value = ".*")]
    list: Option<String>,

    /// Prints debug output to stderr.
    #[arg(short, long)]
    verbose: bool,
}

/// Positional and `-x` expressions in the order they were written.
fn ordered_expressions(matches: &ArgMatches) -> Vec<String> {
    let mut indexed: Vec<(usize, String)> = Vec::new();
    for id in ["expressions", "extra_expressions"] {
        if let (Some(values), Some(indices)) =
            (matches.get_many::<String>(id), matches.indices_of(id))
        {
            indexed.extend(indices.zip(values.cloned()));
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, expression)| expression).collect()
}

fn main() -> ExitCode {
    let matches = Args::command().get_matches();
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    env_logger::Builder::from_default_env().filter_level(if args.verbose {
                                                             LevelFilter::Debug
                                                         } else {
                                                             LevelFilter::Warn
                                                         })
                                           .init();

    let mut context = Context::new();
    context.set_juxtaposition(Juxtaposition::from_sign(args.juxta));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(pattern) = &args.list {
        return match write_listing(&context, pattern, &mut out) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            },
        };
    }

    let format = TableFormat { true_symbol:      args.tsub,
                               false_symbol:     args.fsub,
                               input_separator:  args.isep,
                               output_separator: args.osep, };

    let stdin = io::stdin();
    let piped = (!stdin.is_terminal()).then(|| ExpressionLines::new(stdin.lock()));
    let expressions = piped.into_iter()
                           .flatten()
                           .chain(ordered_expressions(&matches).into_iter().map(Ok));

    let stderr = io::stderr();
    let mut err = stderr.lock();
    let summary = run_batch(&mut context, expressions, &format, &mut out, &mut err);

    if summary.processed == 0 {
        eprintln!("*** Error: No expression specified");
        return ExitCode::FAILURE;
    }

    if summary.succeeded() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expressions(argv: &[&str]) -> Vec<String> {
        ordered_expressions(&Args::command().get_matches_from(argv.iter().copied()))
    }

    #[test]
    fn expressions_keep_command_line_order() {
        assert_eq!(expressions(&["trtbl", "a", "-x", "b", "c"]), ["a", "b", "c"]);
        assert_eq!(expressions(&["trtbl", "--expr", "p", "q", "-x", "r"]), ["p", "q", "r"]);
        assert!(expressions(&["trtbl", "-j", "-2"]).is_empty());
    }
}
