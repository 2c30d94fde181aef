//! Numeric value model: exact-int/float scalars, complex numbers,
//! rectangular matrices, and the sparse polynomials backing equation
//! solving. Every operator the language exposes maps to one method here.

use thiserror::Error;

mod complex;
mod matrix;
mod polynomial;
mod scalar;

pub use complex::{Complex, I};
pub use matrix::Matrix;
pub use polynomial::Polynomial;
pub use scalar::Scalar;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
  #[error("unsupported operand type(s) for {op}: '{lhs}' and '{rhs}'")]
  UnsupportedOperands {
    op: &'static str,
    lhs: &'static str,
    rhs: &'static str,
  },
  #[error("division by zero")]
  DivisionByZero,
  #[error("invalid matrix shape.")]
  InvalidShape,
  #[error("all elements in the matrix must be literals.")]
  InvalidCell,
  #[error("matrix is not square.")]
  NotSquare,
  #[error("matrix is not invertible.")]
  NotInvertible,
  #[error("exponent must be an integer.")]
  NonIntegerExponent,
  #[error("exponent must be non-negative.")]
  NegativeExponent,
}

/// Any value a statement can evaluate to.
#[derive(Clone, Debug)]
pub enum Value {
  Scalar(Scalar),
  Complex(Complex),
  Matrix(Matrix),
}

impl Value {
  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Scalar(Scalar::Int(_)) => "int",
      Value::Scalar(Scalar::Float(_)) => "float",
      Value::Complex(_) => "complex",
      Value::Matrix(_) => "matrix",
    }
  }

  pub fn add(&self, rhs: &Value) -> Result<Value, TypeError> {
    use Value::*;
    match (self, rhs) {
      (Scalar(a), Scalar(b)) => Ok(Scalar(*a + *b)),
      (Complex(a), Complex(b)) => Ok(Complex(*a + *b)),
      (Complex(a), Scalar(b)) => Ok(Complex(*a + (*b).into())),
      (Scalar(a), Complex(b)) => Ok(Complex(complex::Complex::from(*a) + *b)),
      (Matrix(a), Matrix(b)) => Ok(Matrix(a.zip_with(b, |x, y| x.add(y))?)),
      (Matrix(m), s @ (Scalar(_) | Complex(_))) => {
        Ok(Matrix(m.map_cells(|c| c.add(s))?))
      }
      (s @ (Scalar(_) | Complex(_)), Matrix(m)) => {
        Ok(Matrix(m.map_cells(|c| s.add(c))?))
      }
    }
  }

  pub fn sub(&self, rhs: &Value) -> Result<Value, TypeError> {
    use Value::*;
    match (self, rhs) {
      (Scalar(a), Scalar(b)) => Ok(Scalar(*a - *b)),
      (Complex(a), Complex(b)) => Ok(Complex(*a - *b)),
      (Complex(a), Scalar(b)) => Ok(Complex(*a - (*b).into())),
      (Scalar(a), Complex(b)) => Ok(Complex(complex::Complex::from(*a) - *b)),
      (Matrix(a), Matrix(b)) => Ok(Matrix(a.zip_with(b, |x, y| x.sub(y))?)),
      (Matrix(m), s @ (Scalar(_) | Complex(_))) => {
        Ok(Matrix(m.map_cells(|c| c.sub(s))?))
      }
      (s @ (Scalar(_) | Complex(_)), Matrix(m)) => {
        Ok(Matrix(m.map_cells(|c| s.sub(c))?))
      }
    }
  }

  pub fn mul(&self, rhs: &Value) -> Result<Value, TypeError> {
    use Value::*;
    match (self, rhs) {
      (Scalar(a), Scalar(b)) => Ok(Scalar(*a * *b)),
      (Complex(a), Complex(b)) => Ok(Complex(*a * *b)),
      (Complex(a), Scalar(b)) => Ok(Complex(*a * (*b).into())),
      (Scalar(a), Complex(b)) => Ok(Complex(complex::Complex::from(*a) * *b)),
      (Matrix(a), Matrix(b)) => Ok(Matrix(a.zip_with(b, |x, y| x.mul(y))?)),
      (Matrix(m), s @ (Scalar(_) | Complex(_))) => {
        Ok(Matrix(m.map_cells(|c| c.mul(s))?))
      }
      (s @ (Scalar(_) | Complex(_)), Matrix(m)) => {
        Ok(Matrix(m.map_cells(|c| s.mul(c))?))
      }
    }
  }

  pub fn div(&self, rhs: &Value) -> Result<Value, TypeError> {
    use Value::*;
    match (self, rhs) {
      (Scalar(a), Scalar(b)) => Ok(Scalar(a.div(*b)?)),
      (Complex(a), Complex(b)) => Ok(Complex(a.div(*b)?)),
      (Complex(a), Scalar(b)) => Ok(Complex(a.div((*b).into())?)),
      (Scalar(a), Complex(b)) => {
        Ok(Complex(complex::Complex::from(*a).div(*b)?))
      }
      (Matrix(a), Matrix(b)) => Ok(Matrix(a.zip_with(b, |x, y| x.div(y))?)),
      (Matrix(m), s @ (Scalar(_) | Complex(_))) => {
        Ok(Matrix(m.map_cells(|c| c.div(s))?))
      }
      _ => Err(self.unsupported("/", rhs)),
    }
  }

  pub fn rem(&self, rhs: &Value) -> Result<Value, TypeError> {
    use Value::*;
    match (self, rhs) {
      (Scalar(a), Scalar(b)) => Ok(Scalar(a.rem(*b)?)),
      (Matrix(a), Matrix(b)) => Ok(Matrix(a.zip_with(b, |x, y| x.rem(y))?)),
      (Matrix(m), s @ Scalar(_)) => Ok(Matrix(m.map_cells(|c| c.rem(s))?)),
      _ => Err(self.unsupported("%", rhs)),
    }
  }

  pub fn pow(&self, rhs: &Value) -> Result<Value, TypeError> {
    use Value::*;
    match (self, rhs) {
      (Scalar(a), Scalar(b)) => Ok(Scalar(a.pow(*b))),
      (Matrix(m), exp) => Ok(Matrix(m.pow(exp)?)),
      _ => Err(self.unsupported("^", rhs)),
    }
  }

  /// Strict matrix multiplication; anything but two matrices is an error.
  pub fn matmul(&self, rhs: &Value) -> Result<Value, TypeError> {
    match (self, rhs) {
      (Value::Matrix(a), Value::Matrix(b)) => Ok(Value::Matrix(a.matmul(b)?)),
      _ => Err(self.unsupported("**", rhs)),
    }
  }

  pub fn negate(&self) -> Value {
    match self {
      Value::Scalar(s) => Value::Scalar(-*s),
      Value::Complex(c) => Value::Complex(-*c),
      Value::Matrix(m) => Value::Matrix(m.negate()),
    }
  }

  pub fn is_zero(&self) -> bool {
    match self {
      Value::Scalar(s) => s.is_zero(),
      Value::Complex(c) => c.is_zero(),
      Value::Matrix(_) => false,
    }
  }

  pub fn is_one(&self) -> bool {
    match self {
      Value::Scalar(s) => *s == Scalar::Int(1),
      Value::Complex(c) => c.eq_scalar(Scalar::Int(1)),
      Value::Matrix(_) => false,
    }
  }

  pub fn approx_eq(&self, other: &Value) -> bool {
    match (self, other) {
      (Value::Scalar(a), Value::Scalar(b)) => {
        is_close(a.as_f64(), b.as_f64())
      }
      (Value::Matrix(a), Value::Matrix(b)) => a.approx_eq(b),
      (Value::Matrix(_), _) | (_, Value::Matrix(_)) => false,
      (a, b) => {
        let (a, b) = (as_complex(a), as_complex(b));
        (a - b).abs() < 1e-9
      }
    }
  }

  fn unsupported(&self, op: &'static str, rhs: &Value) -> TypeError {
    TypeError::UnsupportedOperands {
      op,
      lhs: self.type_name(),
      rhs: rhs.type_name(),
    }
  }
}

impl PartialEq for Value {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Value::Scalar(a), Value::Scalar(b)) => a == b,
      (Value::Complex(a), Value::Complex(b)) => a == b,
      (Value::Complex(c), Value::Scalar(s))
      | (Value::Scalar(s), Value::Complex(c)) => c.eq_scalar(*s),
      (Value::Matrix(a), Value::Matrix(b)) => a == b,
      _ => false,
    }
  }
}

impl std::fmt::Display for Value {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Value::Scalar(s) => s.fmt(f),
      Value::Complex(c) => c.fmt(f),
      Value::Matrix(m) => m.fmt(f),
    }
  }
}

impl From<Scalar> for Value {
  fn from(s: Scalar) -> Self {
    Value::Scalar(s)
  }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self {
    Value::Scalar(Scalar::Int(i))
  }
}

impl From<f64> for Value {
  fn from(f: f64) -> Self {
    Value::Scalar(Scalar::Float(f))
  }
}

impl From<Complex> for Value {
  fn from(c: Complex) -> Self {
    Value::Complex(c)
  }
}

impl From<Matrix> for Value {
  fn from(m: Matrix) -> Self {
    Value::Matrix(m)
  }
}

fn as_complex(v: &Value) -> Complex {
  match v {
    Value::Scalar(s) => Complex::from(*s),
    Value::Complex(c) => *c,
    Value::Matrix(_) => unreachable!("matrix handled before promotion"),
  }
}

fn is_close(x: f64, y: f64) -> bool {
  if x == y {
    return true;
  }
  (x - y).abs() <= f64::max(1e-9 * f64::max(x.abs(), y.abs()), 1e-9)
}
