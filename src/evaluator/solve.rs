//! Equation solving: both sides of `lhs = rhs ?` are partially evaluated,
//! reduced to a single canonical polynomial, and dispatched to a solver
//! by degree. Only degrees 0 through 2 are supported.

use std::collections::BTreeSet;

use super::Evaluator;
use crate::dependencies::Dependencies;
use crate::dtype::{Complex, Matrix, Polynomial, Scalar, Value};
use crate::error::{Diagnostic, DiagnosticKind, Error, EvalError};
use crate::syntax::{Ast, BinaryOperator, UnaryOperator};

pub(crate) fn eval_solve(
  evaluator: &mut Evaluator,
  assign: Ast,
) -> Result<Ast, Error> {
  let Ast::Assign { target, value } = assign else {
    return Err(EvalError::InvalidPolynomial.into());
  };
  let target = evaluator.eval(*target)?;
  let value = evaluator.eval(*value)?;

  // After evaluation any identifier left in either side is unresolved;
  // more than one distinct name means the equation is not solvable here.
  let mut free: BTreeSet<String> = Dependencies::collect(&target).variables;
  free.extend(Dependencies::collect(&value).variables);
  if free.len() > 1 {
    return Err(
      Diagnostic::new(
        evaluator.ctx.scope_id(),
        DiagnosticKind::TooManyEquationVariables {
          expected: 1,
          got: free.len(),
        },
      )
      .into(),
    );
  }

  let polynomial = polynomial_of(&target)?.sub(&polynomial_of(&value)?);
  let roots = solve_polynomial(&polynomial)?;
  Ok(Ast::Constant(roots))
}

fn solve_polynomial(p: &Polynomial) -> Result<Value, Error> {
  match p.degree() {
    0 => Ok(solve_constant(p)),
    1 => Ok(solve_linear(p)),
    2 => solve_quadratic(p),
    degree => Err(EvalError::InvalidPolynomialDegree(degree).into()),
  }
}

/// `c = 0` either holds for every value (`inf`) or none (`nan`).
fn solve_constant(p: &Polynomial) -> Value {
  if p.coefficient(0).is_zero() {
    Value::from(f64::INFINITY)
  } else {
    Value::from(f64::NAN)
  }
}

fn solve_linear(p: &Polynomial) -> Value {
  let a = p.coefficient(1).as_f64();
  let b = p.coefficient(0).as_f64();
  collapsed(-b / a)
}

fn solve_quadratic(p: &Polynomial) -> Result<Value, Error> {
  let a = p.coefficient(2).as_f64();
  let b = p.coefficient(1).as_f64();
  let c = p.coefficient(0).as_f64();
  let discriminant = b * b - 4.0 * a * c;
  if discriminant == 0.0 {
    return Ok(collapsed(-b / (2.0 * a)));
  }
  let sqrt_d = discriminant.abs().sqrt();
  let roots = if discriminant > 0.0 {
    vec![
      collapsed((-b - sqrt_d) / (2.0 * a)),
      collapsed((-b + sqrt_d) / (2.0 * a)),
    ]
  } else {
    let re = -b / (2.0 * a);
    let im = sqrt_d / (2.0 * a);
    vec![
      Value::Complex(Complex::new(re, -im)),
      Value::Complex(Complex::new(re, im)),
    ]
  };
  Ok(Value::Matrix(Matrix::new(vec![roots])?))
}

/// Roots that land on an integer print as one.
fn collapsed(x: f64) -> Value {
  Value::Scalar(Scalar::Float(x).collapsed())
}

/// Converts one side of an equation into a polynomial. The accepted shape
/// is a strict linear combination of one variable: constants, `x`,
/// `c * x`, `x^k`, and `c * x^k` with a non-negative integer `k`,
/// combined with `+`, `-` and unary `-`. Anything else is rejected.
fn polynomial_of(ast: &Ast) -> Result<Polynomial, Error> {
  let mut builder = PolynomialBuilder::default();
  builder.visit(ast)?;
  builder.flush_term()?;
  Ok(builder.polynomial)
}

/// Accumulates one `coefficient * x^degree` term at a time.
#[derive(Default)]
struct PolynomialBuilder {
  coefficient: Option<Scalar>,
  degree: Option<u32>,
  polynomial: Polynomial,
}

impl PolynomialBuilder {
  fn flush_term(&mut self) -> Result<(), Error> {
    let coefficient = self
      .coefficient
      .take()
      .ok_or(EvalError::InvalidPolynomial)?;
    let degree = self.degree.take().unwrap_or(0);
    self.polynomial.add_coefficient(coefficient, degree);
    Ok(())
  }

  fn visit(&mut self, ast: &Ast) -> Result<(), Error> {
    match ast {
      Ast::Constant(Value::Scalar(s)) if self.coefficient.is_none() => {
        self.coefficient = Some(*s);
        Ok(())
      }
      Ast::Identifier(_) if self.degree.is_none() => {
        self.coefficient.get_or_insert(Scalar::Int(1));
        self.degree = Some(1);
        Ok(())
      }
      Ast::BinaryOp { op, left, right } => self.visit_binary(*op, left, right),
      Ast::UnaryOp { op, operand } => {
        self.visit(operand)?;
        if *op == UnaryOperator::Minus {
          self.negate_coefficient()?;
        }
        Ok(())
      }
      _ => Err(EvalError::InvalidPolynomial.into()),
    }
  }

  fn visit_binary(
    &mut self,
    op: BinaryOperator,
    left: &Ast,
    right: &Ast,
  ) -> Result<(), Error> {
    match op {
      BinaryOperator::Mul if left.is_constant() => {
        self.visit(left)?;
        match right {
          Ast::Identifier(_) => self.visit(right),
          Ast::BinaryOp { op: BinaryOperator::Pow, .. } => self.visit(right),
          _ => Err(EvalError::InvalidPolynomial.into()),
        }
      }
      BinaryOperator::Pow => {
        let (Ast::Identifier(_), Ast::Constant(Value::Scalar(exp))) =
          (left, right)
        else {
          return Err(EvalError::InvalidPolynomial.into());
        };
        let exponent = exp
          .as_exponent()
          .filter(|e| *e >= 0)
          .and_then(|e| u32::try_from(e).ok())
          .ok_or(EvalError::InvalidPolynomial)?;
        if self.degree.is_some() {
          return Err(EvalError::InvalidPolynomial.into());
        }
        self.coefficient.get_or_insert(Scalar::Int(1));
        self.degree = Some(exponent);
        Ok(())
      }
      BinaryOperator::Add | BinaryOperator::Sub => {
        self.visit(left)?;
        self.flush_term()?;
        self.visit(right)?;
        if op == BinaryOperator::Sub {
          self.negate_coefficient()?;
        }
        Ok(())
      }
      _ => Err(EvalError::InvalidPolynomial.into()),
    }
  }

  fn negate_coefficient(&mut self) -> Result<(), Error> {
    match self.coefficient.as_mut() {
      Some(c) => {
        *c = -*c;
        Ok(())
      }
      None => Err(EvalError::InvalidPolynomial.into()),
    }
  }
}
