use thiserror::Error;

use crate::dtype::TypeError;

/// Lexical or syntactic failure, attributed to a source line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
  #[error("illegal character '{ch}' on line {line}")]
  IllegalCharacter { ch: char, line: usize },
  #[error("syntax error near unexpected token '{token}' on line {line}")]
  UnexpectedToken { token: String, line: usize },
}

/// A single semantic finding. The analyzer collects these instead of
/// stopping at the first problem; `scope` names the function being
/// analyzed when the finding was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  pub scope: Option<String>,
  pub kind: DiagnosticKind,
}

impl Diagnostic {
  pub fn new(scope: Option<String>, kind: DiagnosticKind) -> Self {
    Diagnostic { scope, kind }
  }
}

impl std::fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match &self.scope {
      Some(id) => write!(f, "function {}: {}.", id, self.kind),
      None => write!(f, "{}.", self.kind),
    }
  }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
  #[error("cannot assign to an expression")]
  AssignToExpression,
  #[error("{0} is a built-in constant")]
  BuiltInConstant(String),
  #[error("{0} is a built-in function")]
  BuiltInFunction(String),
  #[error("call results in an infinite loop")]
  CyclicDependency,
  #[error("expected {expected} argument{}, got {got}", plural(.expected))]
  InvalidArgumentsLength { expected: usize, got: usize },
  #[error("multiple declarations of parameter {0}")]
  MultipleDeclaration(String),
  #[error("function {id} has been removed due to an invalid function call to {dep}")]
  RemovedFunction { id: String, dep: String },
  #[error("expects an identifier for parameter {0}")]
  RequireIdentifier(usize),
  #[error("expected {expected} equation variable{}, got {got}", plural(.expected))]
  TooManyEquationVariables { expected: usize, got: usize },
  #[error("function {0} is not defined")]
  UndefinedFunction(String),
  #[error("variable {0} is not defined")]
  UndefinedVariable(String),
  #[error("unused parameter {0}")]
  UnusedParameter(String),
}

/// Failure while evaluating a statement. These abort the statement and
/// roll the context's scope stack back, unlike the collected diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
  #[error(transparent)]
  Type(#[from] TypeError),
  #[error("math domain error")]
  MathDomain,
  #[error("{function}() argument must be a real number, not '{operand}'")]
  InvalidArgument {
    function: &'static str,
    operand: &'static str,
  },
  #[error("invalid polynomial expression.")]
  InvalidPolynomial,
  #[error("cannot solve polynomial of degree {0}.")]
  InvalidPolynomialDegree(u32),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
  #[error("{cmd}: {message}.")]
  Failed { cmd: String, message: String },
  #[error("{0}: invalid command.")]
  Unknown(String),
}

impl CommandError {
  pub fn failed(cmd: &str, message: impl Into<String>) -> Self {
    CommandError::Failed { cmd: cmd.to_string(), message: message.into() }
  }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
  #[error(transparent)]
  Syntax(#[from] SyntaxError),
  #[error("{}", format_diagnostics(.0))]
  Semantic(Vec<Diagnostic>),
  #[error(transparent)]
  Eval(#[from] EvalError),
  #[error(transparent)]
  Command(#[from] CommandError),
}

impl From<TypeError> for Error {
  fn from(e: TypeError) -> Self {
    Error::Eval(EvalError::Type(e))
  }
}

impl From<Diagnostic> for Error {
  fn from(d: Diagnostic) -> Self {
    Error::Semantic(vec![d])
  }
}

fn plural(n: &usize) -> &'static str {
  if *n > 1 { "s" } else { "" }
}

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
  diagnostics
    .iter()
    .map(|d| d.to_string())
    .collect::<Vec<_>>()
    .join("\n")
}
