use log::debug;
use pest::Parser as _;
use pest_derive::Parser;

pub mod analyzer;
pub mod commands;
pub mod context;
pub mod dependencies;
pub mod dtype;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod render;
pub mod syntax;

pub use commands::CommandAction;
pub use context::Context;
pub use error::{Diagnostic, DiagnosticKind, Error, EvalError, SyntaxError};
pub use lexer::{tokenize, Token, TokenKind};
pub use render::render;
pub use syntax::Ast;

#[derive(Parser)]
#[grammar = "algebra.pest"]
pub struct AlgebraParser;

/// What a parse attempt yielded. Incomplete input is a first-class
/// outcome, not an error: the interactive shell responds to it by reading
/// a continuation line into the same buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
  Complete(Ast),
  Incomplete,
  Error(SyntaxError),
}

/// Parses one statement. Blank input (including comment-only input)
/// counts as incomplete.
pub fn parse(input: &str) -> ParseOutcome {
  let tokens = match lexer::lex(input) {
    Ok(tokens) => tokens,
    Err(e) => return ParseOutcome::Error(e),
  };
  match AlgebraParser::parse(Rule::Program, input) {
    Ok(pairs) => match syntax::statement_from_program(pairs) {
      Some(ast) => ParseOutcome::Complete(ast),
      None => ParseOutcome::Incomplete,
    },
    Err(e) => {
      let offset = match e.location {
        pest::error::InputLocation::Pos(p) => p,
        pest::error::InputLocation::Span((start, _)) => start,
      };
      // A failure past the last token, or a token stream that is a proper
      // prefix of a statement, means the statement continues on the next
      // line.
      match tokens.iter().find(|t| offset < t.end) {
        None => ParseOutcome::Incomplete,
        Some(_) if looks_incomplete(&tokens) => ParseOutcome::Incomplete,
        Some(t) => ParseOutcome::Error(SyntaxError::UnexpectedToken {
          token: t.token.text.clone(),
          line: t.token.line,
        }),
      }
    }
  }
}

/// The token stream can only be a statement prefix if it ends on an
/// operator or separator, or still has open parentheses or brackets.
fn looks_incomplete(tokens: &[lexer::LexedToken]) -> bool {
  use lexer::TokenKind::*;
  let Some(last) = tokens.last() else {
    return true;
  };
  let trailing = matches!(
    last.token.kind,
    Add | Sub | Mul | Div | Mod | Pow | MatMul | Equals | Comma | Semicolon
      | LParen | LBracket
  );
  let mut open = 0i64;
  for t in tokens {
    match t.token.kind {
      LParen | LBracket => open += 1,
      RParen | RBracket => open -= 1,
      _ => {}
    }
  }
  trailing || open > 0
}

/// What the shell should do with a finished statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
  /// Rendered result of an expression, assignment, or solve.
  Value(String),
  /// Output of a system command (may be empty).
  Output(String),
  /// A `%clear` request; the terminal belongs to the shell.
  ClearScreen,
  /// The statement is not finished; feed another line into the buffer.
  Incomplete,
}

/// Runs the full pipeline over one submission: parse, semantic check,
/// evaluate, render.
pub fn interpret(ctx: &mut Context, input: &str) -> Result<Response, Error> {
  let ast = match parse(input) {
    ParseOutcome::Incomplete => return Ok(Response::Incomplete),
    ParseOutcome::Error(e) => return Err(e.into()),
    ParseOutcome::Complete(ast) => ast,
  };
  debug!("parsed: {ast:?}");
  analyzer::check(ctx, &ast).map_err(Error::Semantic)?;
  match evaluator::evaluate(ctx, ast)? {
    evaluator::Output::Value(result) => Ok(Response::Value(render(&result))),
    evaluator::Output::Command(CommandAction::Print(text)) => {
      Ok(Response::Output(text))
    }
    evaluator::Output::Command(CommandAction::ClearScreen) => {
      Ok(Response::ClearScreen)
    }
  }
}
