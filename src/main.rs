use clap::Parser;
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};
use symfrac::{ast, Token};

/// Reduce a restricted LaTeX arithmetic expression to canonical form.
#[derive(Debug, Parser)]
#[command(name = "symfrac", version)]
struct Args {
    /// The expression, given inline.
    #[arg(short = 's', value_name = "EXPR")]
    string: Option<String>,

    /// Read the expression from a file instead (takes priority over -s).
    #[arg(short = 'f', value_name = "FILE")]
    file: Option<PathBuf>,

    /// Dump the token stream and syntax tree before the result.
    #[arg(long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

#[derive(Debug, PartialEq)]
enum Source<'a> {
    File(&'a Path),
    Inline(&'a str),
}

/// A file argument wins over an inline expression when both are given.
fn select_source<'a>(
    file: Option<&'a Path>,
    inline: Option<&'a str>,
) -> Option<Source<'a>> {
    match (file, inline) {
        (Some(path), _) => Some(Source::File(path)),
        (None, Some(expr)) => Some(Source::Inline(expr)),
        (None, None) => None,
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let source = match select_source(args.file.as_deref(), args.string.as_deref())
    {
        Some(Source::File(path)) => fs::read_to_string(path)?,
        Some(Source::Inline(expr)) => expr.to_string(),
        None => {
            return Err("pass an expression with -s or a file with -f".into())
        },
    };

    let tokens = symfrac::tokenize(&source)?;
    if args.debug {
        print_tokens(&tokens);
    }

    let ast = symfrac::parse(&tokens)?;
    if args.debug {
        print_ast(&ast);
    }

    let value = symfrac::evaluate(&ast)?;
    println!("$ {} $", symfrac::render(&value));
    Ok(())
}

// the dumps are prefixed with '%' so they read as LaTeX comments next to
// the result line
fn print_tokens(tokens: &[Token]) {
    println!("% total {} tokens:", tokens.len());
    for token in tokens {
        println!("%  {}", token);
    }
}

fn print_ast(expr: &ast::Expr) {
    for line in expr.dump().lines() {
        println!("% {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_takes_priority_over_inline() {
        let path = Path::new("expr.tex");
        assert_eq!(
            select_source(Some(path), Some("a + b")),
            Some(Source::File(path))
        );
    }

    #[test]
    fn inline_is_used_when_no_file_is_given() {
        assert_eq!(
            select_source(None, Some("a + b")),
            Some(Source::Inline("a + b"))
        );
    }

    #[test]
    fn file_alone_is_enough() {
        let path = Path::new("expr.tex");
        assert_eq!(select_source(Some(path), None), Some(Source::File(path)));
    }

    #[test]
    fn missing_both_inputs_is_rejected() {
        assert_eq!(select_source(None, None), None);
    }
}
