use std::path::PathBuf;

use abaco::{Context, Error, Response};
use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::debug;
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Command>,

  /// History file for the interactive shell
  #[arg(long, value_name = "PATH")]
  history_file: Option<PathBuf>,

  /// Do not load or save shell history
  #[arg(long)]
  no_history: bool,

  /// Skip the startup banner
  #[arg(short, long)]
  quiet: bool,
}

#[derive(Subcommand)]
enum Command {
  /// Evaluate a single statement and print the result
  Eval { statement: String },
  /// Print the token stream for a piece of source text
  Tokens { text: String },
  /// Print the syntax tree for a piece of source text
  Ast { text: String },
}

fn main() -> Result<()> {
  env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
    .init();
  let cli = Cli::parse();
  match cli.command {
    Some(Command::Eval { statement }) => eval_once(&statement),
    Some(Command::Tokens { text }) => dump_tokens(&text),
    Some(Command::Ast { text }) => dump_ast(&text),
    None => repl(&cli),
  }
}

fn eval_once(statement: &str) -> Result<()> {
  let mut ctx = Context::new();
  match abaco::interpret(&mut ctx, statement) {
    Ok(Response::Value(result)) => println!("{result}"),
    Ok(Response::Output(text)) => {
      if !text.is_empty() {
        println!("{text}");
      }
    }
    Ok(Response::ClearScreen) => {}
    Ok(Response::Incomplete) => {
      eprintln!("error: unexpected end of input");
      std::process::exit(1);
    }
    Err(error) => {
      print_error(&error);
      std::process::exit(1);
    }
  }
  Ok(())
}

fn dump_tokens(text: &str) -> Result<()> {
  match abaco::tokenize(text) {
    Ok(tokens) => {
      for token in tokens {
        println!(
          "{}:{}\t{:?}\t{}",
          token.line, token.column, token.kind, token.text
        );
      }
      Ok(())
    }
    Err(error) => {
      eprintln!("{error}");
      std::process::exit(1);
    }
  }
}

fn dump_ast(text: &str) -> Result<()> {
  match abaco::parse(text) {
    abaco::ParseOutcome::Complete(ast) => {
      println!("{ast:#?}");
      println!("{}", abaco::render(&ast));
      Ok(())
    }
    abaco::ParseOutcome::Incomplete => {
      eprintln!("error: unexpected end of input");
      std::process::exit(1);
    }
    abaco::ParseOutcome::Error(error) => {
      eprintln!("{error}");
      std::process::exit(1);
    }
  }
}

fn repl(cli: &Cli) -> Result<()> {
  let mut ctx = Context::new();
  let mut rl: Editor<SymbolCompleter, FileHistory> =
    Editor::new().context("failed to initialize the line editor")?;
  rl.set_helper(Some(SymbolCompleter {
    symbols: ctx.get_all_symbol_names(),
  }));

  let history_path = if cli.no_history {
    None
  } else {
    cli.history_file.clone().or_else(default_history_path)
  };
  if let Some(path) = &history_path {
    if rl.load_history(path).is_err() {
      debug!("no history loaded from {}", path.display());
    }
  }

  if !cli.quiet {
    println!("abaco v{}", env!("CARGO_PKG_VERSION"));
    println!("Type %help for available commands, Ctrl-D to exit.");
  }

  let mut buffer = String::new();
  loop {
    let prompt = if buffer.is_empty() { "> " } else { "... " };
    match rl.readline(prompt) {
      Ok(line) => {
        if line.is_empty() {
          continue;
        }
        let _ = rl.add_history_entry(&line);
        buffer.push_str(&line);
        buffer.push('\n');
        match abaco::interpret(&mut ctx, &buffer) {
          Ok(Response::Incomplete) => continue,
          Ok(Response::Value(result)) => println!("{result}"),
          Ok(Response::Output(text)) => {
            if !text.is_empty() {
              println!("{text}");
            }
          }
          Ok(Response::ClearScreen) => {
            let _ = rl.clear_screen();
          }
          Err(error) => print_error(&error),
        }
        buffer.clear();
        if let Some(helper) = rl.helper_mut() {
          helper.symbols = ctx.get_all_symbol_names();
        }
      }
      Err(ReadlineError::Interrupted) => {
        buffer.clear();
      }
      Err(ReadlineError::Eof) => break,
      Err(error) => return Err(error).context("reading input"),
    }
  }

  if let Some(path) = &history_path {
    rl.save_history(path).context("saving shell history")?;
  }
  Ok(())
}

fn print_error(error: &Error) {
  match error {
    Error::Semantic(diagnostics) => {
      for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
      }
    }
    other => eprintln!("{other}"),
  }
}

fn default_history_path() -> Option<PathBuf> {
  std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".abaco_history"))
}

/// Tab completion over every name the session knows.
struct SymbolCompleter {
  symbols: Vec<String>,
}

impl Completer for SymbolCompleter {
  type Candidate = String;

  fn complete(
    &self,
    line: &str,
    pos: usize,
    _ctx: &rustyline::Context<'_>,
  ) -> rustyline::Result<(usize, Vec<String>)> {
    let start = line[..pos]
      .rfind(|c: char| !c.is_ascii_alphabetic())
      .map(|i| i + 1)
      .unwrap_or(0);
    let prefix = line[start..pos].to_lowercase();
    let matches = self
      .symbols
      .iter()
      .filter(|symbol| symbol.starts_with(&prefix))
      .cloned()
      .collect();
    Ok((start, matches))
  }
}

impl Hinter for SymbolCompleter {
  type Hint = String;
}

impl Highlighter for SymbolCompleter {}
impl Validator for SymbolCompleter {}
impl Helper for SymbolCompleter {}
