use pest::Parser as _;

use crate::error::SyntaxError;
use crate::{AlgebraParser, Rule};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
  Add,
  Sub,
  Mul,
  Div,
  Mod,
  Pow,
  MatMul,
  Equals,
  Comma,
  LParen,
  RParen,
  LBracket,
  RBracket,
  Semicolon,
  QuestionMark,
  Float,
  Int,
  Identifier,
}

/// One lexeme with its source position (1-based line and column).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub text: String,
  pub line: usize,
  pub column: usize,
}

/// A token plus its byte range, used internally to attribute parse errors.
#[derive(Clone, Debug)]
pub(crate) struct LexedToken {
  pub token: Token,
  pub start: usize,
  pub end: usize,
}

/// Splits source text into tokens. Comments (`#` to end of line) and
/// whitespace are skipped; any other unrecognized character is a lexical
/// error carrying its line number.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
  Ok(lex(input)?.into_iter().map(|t| t.token).collect())
}

pub(crate) fn lex(input: &str) -> Result<Vec<LexedToken>, SyntaxError> {
  let pairs = AlgebraParser::parse(Rule::TokenStream, input)
    .map_err(|e| illegal_character(input, &e))?;
  let mut tokens = Vec::new();
  for pair in pairs.flatten() {
    let Some(kind) = token_kind(pair.as_rule()) else { continue };
    let span = pair.as_span();
    let (line, column) = span.start_pos().line_col();
    tokens.push(LexedToken {
      token: Token {
        kind,
        text: span.as_str().to_string(),
        line,
        column,
      },
      start: span.start(),
      end: span.end(),
    });
  }
  Ok(tokens)
}

fn token_kind(rule: Rule) -> Option<TokenKind> {
  match rule {
    Rule::Add => Some(TokenKind::Add),
    Rule::Sub => Some(TokenKind::Sub),
    Rule::Mul => Some(TokenKind::Mul),
    Rule::Div => Some(TokenKind::Div),
    Rule::Mod => Some(TokenKind::Mod),
    Rule::Pow => Some(TokenKind::Pow),
    Rule::MatMul => Some(TokenKind::MatMul),
    Rule::Equals => Some(TokenKind::Equals),
    Rule::Comma => Some(TokenKind::Comma),
    Rule::LParen => Some(TokenKind::LParen),
    Rule::RParen => Some(TokenKind::RParen),
    Rule::LBracket => Some(TokenKind::LBracket),
    Rule::RBracket => Some(TokenKind::RBracket),
    Rule::Semicolon => Some(TokenKind::Semicolon),
    Rule::Question => Some(TokenKind::QuestionMark),
    Rule::Float => Some(TokenKind::Float),
    Rule::Int => Some(TokenKind::Int),
    Rule::Identifier => Some(TokenKind::Identifier),
    _ => None,
  }
}

fn illegal_character(
  input: &str,
  error: &pest::error::Error<Rule>,
) -> SyntaxError {
  let offset = match error.location {
    pest::error::InputLocation::Pos(p) => p,
    pest::error::InputLocation::Span((start, _)) => start,
  };
  let ch = input[offset..].chars().next().unwrap_or('\0');
  let line = input[..offset].matches('\n').count() + 1;
  SyntaxError::IllegalCharacter { ch, line }
}
