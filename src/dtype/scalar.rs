use super::TypeError;

/// A real scalar that keeps exact integers apart from floats. Mixed
/// operands promote to `Float`; division and modulo stay in integer
/// arithmetic only when both sides are `Int`.
#[derive(Clone, Copy, Debug)]
pub enum Scalar {
  Int(i64),
  Float(f64),
}

impl std::ops::Add for Scalar {
  type Output = Self;

  fn add(self, rhs: Self) -> Self {
    match (self, rhs) {
      (Self::Int(a), Self::Int(b)) => a
        .checked_add(b)
        .map(Self::Int)
        .unwrap_or(Self::Float(a as f64 + b as f64)),
      (a, b) => Self::Float(a.as_f64() + b.as_f64()),
    }
  }
}

impl std::ops::Sub for Scalar {
  type Output = Self;

  fn sub(self, rhs: Self) -> Self {
    match (self, rhs) {
      (Self::Int(a), Self::Int(b)) => a
        .checked_sub(b)
        .map(Self::Int)
        .unwrap_or(Self::Float(a as f64 - b as f64)),
      (a, b) => Self::Float(a.as_f64() - b.as_f64()),
    }
  }
}

impl std::ops::Mul for Scalar {
  type Output = Self;

  fn mul(self, rhs: Self) -> Self {
    match (self, rhs) {
      (Self::Int(a), Self::Int(b)) => a
        .checked_mul(b)
        .map(Self::Int)
        .unwrap_or(Self::Float(a as f64 * b as f64)),
      (a, b) => Self::Float(a.as_f64() * b.as_f64()),
    }
  }
}

impl std::ops::Neg for Scalar {
  type Output = Self;

  fn neg(self) -> Self {
    match self {
      Self::Int(i) => i
        .checked_neg()
        .map(Self::Int)
        .unwrap_or(Self::Float(-(i as f64))),
      Self::Float(f) => Self::Float(-f),
    }
  }
}

impl Scalar {
  pub fn as_f64(self) -> f64 {
    match self {
      Self::Int(i) => i as f64,
      Self::Float(f) => f,
    }
  }

  pub fn is_zero(self) -> bool {
    match self {
      Self::Int(i) => i == 0,
      Self::Float(f) => f == 0.0,
    }
  }

  /// Integer division truncates only when both operands are integers.
  pub fn div(self, rhs: Self) -> Result<Self, TypeError> {
    if rhs.is_zero() {
      return Err(TypeError::DivisionByZero);
    }
    match (self, rhs) {
      (Self::Int(a), Self::Int(b)) => Ok(a
        .checked_div(b)
        .map(Self::Int)
        .unwrap_or(Self::Float(a as f64 / b as f64))),
      (a, b) => Ok(Self::Float(a.as_f64() / b.as_f64())),
    }
  }

  pub fn rem(self, rhs: Self) -> Result<Self, TypeError> {
    if rhs.is_zero() {
      return Err(TypeError::DivisionByZero);
    }
    match (self, rhs) {
      (Self::Int(a), Self::Int(b)) => Ok(a
        .checked_rem(b)
        .map(Self::Int)
        .unwrap_or(Self::Float(a as f64 % b as f64))),
      (a, b) => Ok(Self::Float(a.as_f64() % b.as_f64())),
    }
  }

  /// An integer base with a non-negative integer exponent stays exact;
  /// everything else evaluates in floating point.
  pub fn pow(self, rhs: Self) -> Self {
    match (self, rhs) {
      (Self::Int(a), Self::Int(b)) if b >= 0 => u32::try_from(b)
        .ok()
        .and_then(|e| a.checked_pow(e))
        .map(Self::Int)
        .unwrap_or(Self::Float((a as f64).powf(b as f64))),
      (a, b) => Self::Float(a.as_f64().powf(b.as_f64())),
    }
  }

  /// Collapses a float that holds an exact integer back to `Int`.
  pub fn collapsed(self) -> Self {
    match self {
      Self::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
        Self::Int(f as i64)
      }
      other => other,
    }
  }

  pub fn as_exponent(self) -> Option<i64> {
    match self {
      Self::Int(i) => Some(i),
      Self::Float(_) => None,
    }
  }
}

impl PartialEq for Scalar {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Self::Int(a), Self::Int(b)) => a == b,
      (a, b) => a.as_f64() == b.as_f64(),
    }
  }
}

impl std::fmt::Display for Scalar {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Self::Int(i) => write!(f, "{i}"),
      Self::Float(x) if x.is_nan() => write!(f, "nan"),
      Self::Float(x) => write!(f, "{x}"),
    }
  }
}
