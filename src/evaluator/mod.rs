//! Partial evaluation of statements. A subtree collapses to a `Constant`
//! exactly when all of its free symbols are bound; anything else comes
//! back as a simplified residual tree that still names the unresolved
//! symbols.

use log::debug;

use crate::commands::{self, CommandAction};
use crate::context::Context;
use crate::dtype::Value;
use crate::error::{Diagnostic, DiagnosticKind, Error};
use crate::syntax::{Ast, BinaryOperator, UnaryOperator};

mod assignment;
mod simplify;
mod solve;

/// What a statement produced: an expression tree for the REPL to echo, or
/// the effect of a system command.
#[derive(Debug, PartialEq)]
pub enum Output {
  Value(Ast),
  Command(CommandAction),
}

/// Evaluates one statement against the context. On any failure the scope
/// stack is rolled back to the global frame before the error propagates,
/// so a long-lived session never sees a half-popped stack.
pub fn evaluate(ctx: &mut Context, ast: Ast) -> Result<Output, Error> {
  let mut evaluator = Evaluator { ctx: &mut *ctx, expand_calls: true };
  let result = evaluator.eval_statement(ast);
  if result.is_err() {
    debug!("statement failed, resetting scope stack");
    ctx.reset_stack();
  }
  result
}

pub(crate) struct Evaluator<'a> {
  pub(crate) ctx: &'a mut Context,
  /// Cleared while a function body is evaluated for its declaration:
  /// calls that do not fold to a constant are kept as calls instead of
  /// being inlined into the stored template.
  expand_calls: bool,
}

impl Evaluator<'_> {
  fn eval_statement(&mut self, ast: Ast) -> Result<Output, Error> {
    match ast {
      Ast::Command(args) => {
        commands::execute(self.ctx, &args).map(Output::Command)
      }
      other => self.eval(other).map(Output::Value),
    }
  }

  pub(crate) fn eval(&mut self, ast: Ast) -> Result<Ast, Error> {
    match ast {
      Ast::Constant(_) | Ast::Command(_) => Ok(ast),
      Ast::Identifier(name) => Ok(
        self
          .ctx
          .get_variable(&name)
          .unwrap_or(Ast::Identifier(name)),
      ),
      Ast::BinaryOp { op, left, right } => {
        let left = self.eval(*left)?;
        let right = self.eval(*right)?;
        match (&left, &right) {
          (Ast::Constant(a), Ast::Constant(b)) => {
            Ok(Ast::Constant(apply_binary(op, a, b)?))
          }
          _ => simplify::binary_node(op, left, right),
        }
      }
      Ast::UnaryOp { op, operand } => {
        let operand = self.eval(*operand)?;
        Ok(match operand {
          Ast::Constant(value) => match op {
            UnaryOperator::Minus => Ast::Constant(value.negate()),
            UnaryOperator::Plus => Ast::Constant(value),
          },
          other if op == UnaryOperator::Plus => other,
          Ast::UnaryOp { operand: inner, .. } => *inner,
          other => Ast::unary(op, other),
        })
      }
      Ast::MatDecl(rows) => self.eval_matrix(rows),
      Ast::FunCall { name, args } => self.eval_funcall(name, args),
      Ast::Assign { target, value } => self.eval_assign(*target, *value),
      Ast::Solve(assign) => solve::eval_solve(self, *assign),
    }
  }

  fn eval_matrix(&mut self, rows: Vec<Vec<Ast>>) -> Result<Ast, Error> {
    let rows = rows
      .into_iter()
      .map(|row| {
        row.into_iter().map(|cell| self.eval(cell)).collect()
      })
      .collect::<Result<Vec<Vec<Ast>>, Error>>()?;
    if rows.iter().flatten().all(Ast::is_constant) {
      let cells = rows
        .into_iter()
        .map(|row| {
          row
            .into_iter()
            .map(|cell| match cell {
              Ast::Constant(value) => value,
              _ => unreachable!("all cells checked constant"),
            })
            .collect()
        })
        .collect();
      let matrix = crate::dtype::Matrix::new(cells)?;
      Ok(Ast::Constant(Value::Matrix(matrix)))
    } else {
      Ok(Ast::MatDecl(rows))
    }
  }

  fn eval_funcall(
    &mut self,
    name: String,
    args: Vec<Ast>,
  ) -> Result<Ast, Error> {
    let args = args
      .into_iter()
      .map(|arg| self.eval(arg))
      .collect::<Result<Vec<Ast>, Error>>()?;
    if let Some(storage) = self.ctx.user_function(&name) {
      let params = storage.args.clone();
      let body = storage.body.clone();
      if params.len() != args.len() {
        return Err(
          Diagnostic::new(
            Some(name),
            DiagnosticKind::InvalidArgumentsLength {
              expected: params.len(),
              got: args.len(),
            },
          )
          .into(),
        );
      }
      self.ctx.push_scope(Some(name.clone()));
      for (param, arg) in params.iter().zip(args.iter()) {
        self.ctx.set_variable(param, arg.clone());
      }
      // The stored body is a template; each call evaluates its own copy.
      let result = self.eval(body)?;
      self.ctx.pop_scope();
      if !self.expand_calls && !result.is_constant() {
        return Ok(Ast::FunCall { name, args });
      }
      return Ok(result);
    }
    match Context::native(&name) {
      Some(native) => {
        if args.len() != 1 {
          return Err(
            Diagnostic::new(
              self.ctx.scope_id(),
              DiagnosticKind::InvalidArgumentsLength {
                expected: 1,
                got: args.len(),
              },
            )
            .into(),
          );
        }
        match &args[0] {
          Ast::Constant(value) => Ok(Ast::Constant(native(value)?)),
          _ => Ok(Ast::FunCall { name, args }),
        }
      }
      None => Ok(Ast::FunCall { name, args }),
    }
  }
}

pub(crate) fn apply_binary(
  op: BinaryOperator,
  lhs: &Value,
  rhs: &Value,
) -> Result<Value, crate::dtype::TypeError> {
  match op {
    BinaryOperator::Add => lhs.add(rhs),
    BinaryOperator::Sub => lhs.sub(rhs),
    BinaryOperator::Mul => lhs.mul(rhs),
    BinaryOperator::Div => lhs.div(rhs),
    BinaryOperator::Mod => lhs.rem(rhs),
    BinaryOperator::Pow => lhs.pow(rhs),
    BinaryOperator::MatMul => lhs.matmul(rhs),
  }
}
