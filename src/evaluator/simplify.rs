//! Rewrite rules applied to binary nodes that stay residual. Constants
//! keep folding through the rules, so chains like `(x + 1) + 2` come out
//! as `x + 3`.

use super::apply_binary;
use crate::dtype::Value;
use crate::error::Error;
use crate::syntax::{Ast, BinaryOperator, UnaryOperator};

pub(crate) fn binary_node(
  op: BinaryOperator,
  left: Ast,
  right: Ast,
) -> Result<Ast, Error> {
  use BinaryOperator::*;

  let (op, left, right) = flip_negative_constant(op, left, right);

  // Rules below can surface freshly adjacent constants; fold them.
  if let (Ast::Constant(a), Ast::Constant(b)) = (&left, &right) {
    return Ok(Ast::Constant(apply_binary(op, a, b)?));
  }

  // Re-associate constants over a chain of the same commutative operator:
  // (E op c1) op c2  →  E op (c1 op c2).
  if matches!(op, Add | Mul) && constant(&right).is_some() {
    if let Ast::BinaryOp { op: chain_op, left: ll, right: lr } = &left {
      if *chain_op == op
        && (constant(ll).is_some() || constant(lr).is_some())
      {
        let Ast::BinaryOp { left: mut ll, right: mut lr, .. } = left else {
          unreachable!("matched above");
        };
        if constant(&ll).is_some() {
          std::mem::swap(&mut ll, &mut lr);
        }
        let folded = binary_node(op, *lr, right)?;
        return binary_node(op, *ll, folded);
      }
    }
  }

  match op {
    Add => {
      if is_zero(&right) {
        return Ok(left);
      }
      if is_zero(&left) {
        return Ok(right);
      }
      // Normal form keeps the constant on the right of `+`.
      if constant(&left).is_some() && constant(&right).is_none() {
        return Ok(Ast::binary(Add, right, left));
      }
    }
    Sub => {
      if is_zero(&right) {
        return Ok(left);
      }
      if is_zero(&left) {
        return Ok(Ast::unary(UnaryOperator::Minus, right));
      }
    }
    Mul => {
      if is_zero(&left) || is_zero(&right) {
        return Ok(Ast::constant(0i64));
      }
      if is_one(&left) {
        return Ok(right);
      }
      if is_one(&right) {
        return Ok(left);
      }
      // Normal form keeps the constant on the left of `*`.
      if constant(&right).is_some() && constant(&left).is_none() {
        return Ok(Ast::binary(Mul, right, left));
      }
    }
    Div => {
      if is_one(&right) {
        return Ok(left);
      }
    }
    Pow => {
      if is_zero(&right) {
        return Ok(Ast::constant(1i64));
      }
      if is_one(&right) {
        return Ok(left);
      }
    }
    Mod | MatMul => {}
  }
  Ok(Ast::binary(op, left, right))
}

/// `E + (-c)` reads better as `E - c` (and `E - (-c)` as `E + c`).
fn flip_negative_constant(
  op: BinaryOperator,
  left: Ast,
  right: Ast,
) -> (BinaryOperator, Ast, Ast) {
  use BinaryOperator::*;
  if let (Add | Sub, Ast::Constant(Value::Scalar(s))) = (op, &right) {
    if s.as_f64() < 0.0 {
      let flipped = if op == Add { Sub } else { Add };
      return (flipped, left, Ast::Constant(Value::Scalar(-*s)));
    }
  }
  (op, left, right)
}

fn constant(ast: &Ast) -> Option<&Value> {
  match ast {
    Ast::Constant(value) => Some(value),
    _ => None,
  }
}

// Zero/one tests only ever match scalar or complex constants; a matrix
// constant never triggers a rewrite.
fn is_zero(ast: &Ast) -> bool {
  constant(ast).is_some_and(Value::is_zero)
}

fn is_one(ast: &Ast) -> bool {
  constant(ast).is_some_and(Value::is_one)
}
