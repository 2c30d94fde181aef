use pest::iterators::{Pair, Pairs};

use crate::Rule;
use crate::dtype::{Scalar, Value};

/// A statement or expression tree. Every node owns its children; passes
/// that rewrite a tree rebuild it instead of sharing substructure.
#[derive(Clone, Debug, PartialEq)]
pub enum Ast {
  Constant(Value),
  Identifier(String),
  BinaryOp {
    op: BinaryOperator,
    left: Box<Ast>,
    right: Box<Ast>,
  },
  UnaryOp {
    op: UnaryOperator,
    operand: Box<Ast>,
  },
  MatDecl(Vec<Vec<Ast>>),
  FunCall {
    name: String,
    args: Vec<Ast>,
  },
  Assign {
    target: Box<Ast>,
    value: Box<Ast>,
  },
  Solve(Box<Ast>),
  Command(Vec<String>),
}

impl Ast {
  pub fn binary(op: BinaryOperator, left: Ast, right: Ast) -> Ast {
    Ast::BinaryOp { op, left: Box::new(left), right: Box::new(right) }
  }

  pub fn unary(op: UnaryOperator, operand: Ast) -> Ast {
    Ast::UnaryOp { op, operand: Box::new(operand) }
  }

  pub fn constant(value: impl Into<Value>) -> Ast {
    Ast::Constant(value.into())
  }

  pub fn is_constant(&self) -> bool {
    matches!(self, Ast::Constant(_))
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
  Add,
  Sub,
  Mul,
  Div,
  Mod,
  Pow,
  MatMul,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOperator {
  Plus,
  Minus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
  Left,
  Right,
}

impl BinaryOperator {
  pub fn symbol(self) -> &'static str {
    match self {
      Self::Add => "+",
      Self::Sub => "-",
      Self::Mul => "*",
      Self::Div => "/",
      Self::Mod => "%",
      Self::Pow => "^",
      Self::MatMul => "**",
    }
  }

  pub fn precedence(self) -> u8 {
    match self {
      Self::Add | Self::Sub => 1,
      Self::Mul | Self::Div | Self::Mod | Self::MatMul => 2,
      Self::Pow => 3,
    }
  }

  pub fn associativity(self) -> Associativity {
    match self {
      Self::Pow => Associativity::Right,
      _ => Associativity::Left,
    }
  }
}

impl UnaryOperator {
  // Unary sign binds tighter than every binary operator, `^` included.
  pub const PRECEDENCE: u8 = 4;

  pub fn symbol(self) -> &'static str {
    match self {
      Self::Plus => "+",
      Self::Minus => "-",
    }
  }
}

/// Extracts the statement from a parsed `Program`, if the input held one.
pub(crate) fn statement_from_program(mut pairs: Pairs<Rule>) -> Option<Ast> {
  let program = pairs.next()?;
  program
    .into_inner()
    .find(|p| p.as_rule() == Rule::Statement)
    .map(build_statement)
}

fn build_statement(pair: Pair<Rule>) -> Ast {
  let inner = pair.into_inner().next().expect("statement has one child");
  match inner.as_rule() {
    Rule::Command => {
      let words = inner
        .into_inner()
        .filter(|p| p.as_rule() == Rule::Identifier)
        .map(|p| p.as_str().to_lowercase())
        .collect();
      Ast::Command(words)
    }
    Rule::Equation => build_equation(inner),
    rule => unreachable!("unexpected statement child: {rule:?}"),
  }
}

fn build_equation(pair: Pair<Rule>) -> Ast {
  let mut target = None;
  let mut value = None;
  let mut solve = false;
  for p in pair.into_inner() {
    match p.as_rule() {
      Rule::Expr if target.is_none() => target = Some(build_expr(p)),
      Rule::Expr => value = Some(build_expr(p)),
      Rule::Question => solve = true,
      _ => {}
    }
  }
  let target = target.expect("equation has an expression");
  match value {
    None => target,
    Some(value) => {
      let assign =
        Ast::Assign { target: Box::new(target), value: Box::new(value) };
      if solve { Ast::Solve(Box::new(assign)) } else { assign }
    }
  }
}

fn build_expr(pair: Pair<Rule>) -> Ast {
  fold_left(pair.into_inner(), build_term)
}

fn build_term(pair: Pair<Rule>) -> Ast {
  fold_left(pair.into_inner(), build_factor)
}

/// Folds `operand (op operand)*` left-associatively, mapping operand pairs
/// through `build`.
fn fold_left(pairs: Pairs<Rule>, build: fn(Pair<Rule>) -> Ast) -> Ast {
  let mut acc = None;
  let mut pending = None;
  for p in pairs {
    match binary_operator(p.as_rule()) {
      Some(op) => pending = Some(op),
      None => {
        let node = build(p);
        acc = Some(match (acc, pending.take()) {
          (None, _) => node,
          (Some(left), Some(op)) => Ast::binary(op, left, node),
          (Some(_), None) => unreachable!("operand without operator"),
        });
      }
    }
  }
  acc.expect("expression has at least one operand")
}

fn binary_operator(rule: Rule) -> Option<BinaryOperator> {
  match rule {
    Rule::Add => Some(BinaryOperator::Add),
    Rule::Sub => Some(BinaryOperator::Sub),
    Rule::Mul => Some(BinaryOperator::Mul),
    Rule::Div => Some(BinaryOperator::Div),
    Rule::Mod => Some(BinaryOperator::Mod),
    Rule::Pow => Some(BinaryOperator::Pow),
    Rule::MatMul => Some(BinaryOperator::MatMul),
    _ => None,
  }
}

// `^` chains fold right-associatively.
fn build_factor(pair: Pair<Rule>) -> Ast {
  let operands: Vec<Ast> = pair
    .into_inner()
    .filter(|p| p.as_rule() != Rule::Pow)
    .map(build_unary)
    .collect();
  fold_pow(operands)
}

fn fold_pow(operands: Vec<Ast>) -> Ast {
  operands
    .into_iter()
    .rev()
    .reduce(|right, left| Ast::binary(BinaryOperator::Pow, left, right))
    .expect("power chain has at least one operand")
}

fn build_unary(pair: Pair<Rule>) -> Ast {
  let mut signs = Vec::new();
  let mut operand = None;
  for p in pair.into_inner() {
    match p.as_rule() {
      Rule::Sign => signs.push(match p.as_str() {
        "-" => UnaryOperator::Minus,
        _ => UnaryOperator::Plus,
      }),
      Rule::Primary => operand = Some(build_primary(p)),
      rule => unreachable!("unexpected unary child: {rule:?}"),
    }
  }
  let mut node = operand.expect("unary has an operand");
  for sign in signs.into_iter().rev() {
    node = Ast::unary(sign, node);
  }
  node
}

fn build_primary(pair: Pair<Rule>) -> Ast {
  let inner = pair.into_inner().next().expect("primary has one child");
  match inner.as_rule() {
    Rule::ImplicitMul => build_implicit_mul(inner),
    Rule::FunCall => build_funcall(inner),
    Rule::Matrix => build_matrix(inner),
    Rule::Float => Ast::constant(parse_float(inner.as_str())),
    Rule::Int => Ast::constant(parse_int(inner.as_str())),
    Rule::Identifier => Ast::Identifier(inner.as_str().to_lowercase()),
    Rule::Paren => {
      let expr = inner
        .into_inner()
        .find(|p| p.as_rule() == Rule::Expr)
        .expect("parenthesized expression");
      build_expr(expr)
    }
    rule => unreachable!("unexpected primary child: {rule:?}"),
  }
}

// `2x` and `[[1]]x` desugar to multiplication; the identifier keeps its
// own power chain, so `2x^2` means `2 * (x ^ 2)`.
fn build_implicit_mul(pair: Pair<Rule>) -> Ast {
  let mut left = None;
  let mut right = None;
  for p in pair.into_inner() {
    match p.as_rule() {
      Rule::Float => left = Some(Ast::constant(parse_float(p.as_str()))),
      Rule::Int => left = Some(Ast::constant(parse_int(p.as_str()))),
      Rule::Matrix => left = Some(build_matrix(p)),
      Rule::IdentPow => right = Some(build_ident_pow(p)),
      _ => {}
    }
  }
  Ast::binary(
    BinaryOperator::Mul,
    left.expect("implicit multiplication has a literal"),
    right.expect("implicit multiplication has an identifier"),
  )
}

fn build_ident_pow(pair: Pair<Rule>) -> Ast {
  let mut operands = Vec::new();
  for p in pair.into_inner() {
    match p.as_rule() {
      Rule::Identifier => {
        operands.push(Ast::Identifier(p.as_str().to_lowercase()))
      }
      Rule::Unary => operands.push(build_unary(p)),
      _ => {}
    }
  }
  fold_pow(operands)
}

fn build_funcall(pair: Pair<Rule>) -> Ast {
  let mut name = String::new();
  let mut args = Vec::new();
  for p in pair.into_inner() {
    match p.as_rule() {
      Rule::Identifier => name = p.as_str().to_lowercase(),
      Rule::Expr => args.push(build_expr(p)),
      _ => {}
    }
  }
  Ast::FunCall { name, args }
}

fn build_matrix(pair: Pair<Rule>) -> Ast {
  let rows = pair
    .into_inner()
    .filter(|p| p.as_rule() == Rule::MatrixRow)
    .map(|row| {
      row
        .into_inner()
        .filter(|p| p.as_rule() == Rule::Expr)
        .map(build_expr)
        .collect()
    })
    .collect();
  Ast::MatDecl(rows)
}

fn parse_float(text: &str) -> Value {
  Value::Scalar(Scalar::Float(text.parse().unwrap_or(f64::INFINITY)))
}

// Integer literals too large for i64 fall back to floats.
fn parse_int(text: &str) -> Value {
  text
    .parse::<i64>()
    .map(|i| Value::Scalar(Scalar::Int(i)))
    .unwrap_or_else(|_| {
      Value::Scalar(Scalar::Float(text.parse().unwrap_or(f64::INFINITY)))
    })
}
