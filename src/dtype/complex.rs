use super::{Scalar, TypeError};

/// A complex number over `f64` components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex {
  pub re: f64,
  pub im: f64,
}

pub const I: Complex = Complex { re: 0.0, im: 1.0 };

impl Complex {
  pub fn new(re: f64, im: f64) -> Self {
    Complex { re, im }
  }

  /// Modulus.
  pub fn abs(self) -> f64 {
    (self.re * self.re + self.im * self.im).sqrt()
  }

  pub fn is_zero(self) -> bool {
    self.re == 0.0 && self.im == 0.0
  }

  pub fn div(self, rhs: Self) -> Result<Self, TypeError> {
    let denom = rhs.re * rhs.re + rhs.im * rhs.im;
    if denom == 0.0 {
      return Err(TypeError::DivisionByZero);
    }
    Ok(Complex {
      re: (self.re * rhs.re + self.im * rhs.im) / denom,
      im: (self.im * rhs.re - self.re * rhs.im) / denom,
    })
  }

  pub fn eq_scalar(self, s: Scalar) -> bool {
    self.im == 0.0 && self.re == s.as_f64()
  }
}

impl From<Scalar> for Complex {
  fn from(s: Scalar) -> Self {
    Complex { re: s.as_f64(), im: 0.0 }
  }
}

impl std::ops::Add for Complex {
  type Output = Self;

  fn add(self, rhs: Self) -> Self {
    Complex { re: self.re + rhs.re, im: self.im + rhs.im }
  }
}

impl std::ops::Sub for Complex {
  type Output = Self;

  fn sub(self, rhs: Self) -> Self {
    Complex { re: self.re - rhs.re, im: self.im - rhs.im }
  }
}

impl std::ops::Mul for Complex {
  type Output = Self;

  fn mul(self, rhs: Self) -> Self {
    Complex {
      re: self.re * rhs.re - self.im * rhs.im,
      im: self.re * rhs.im + self.im * rhs.re,
    }
  }
}

impl std::ops::Neg for Complex {
  type Output = Self;

  fn neg(self) -> Self {
    Complex { re: -self.re, im: -self.im }
  }
}

// Prints `a + bi` with integral components collapsed: `2 + i`, `3 - 2i`,
// a bare `i` or `-i`, `0i` for zero.
impl std::fmt::Display for Complex {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let part = |x: f64| Scalar::Float(x).collapsed().to_string();
    if self.re != 0.0 {
      let sign = if self.im >= 0.0 { "+" } else { "-" };
      let im = self.im.abs();
      if im == 1.0 {
        write!(f, "{} {} i", part(self.re), sign)
      } else {
        write!(f, "{} {} {}i", part(self.re), sign, part(im))
      }
    } else {
      let sign = if self.im >= 0.0 { "" } else { "-" };
      let im = self.im.abs();
      if im == 1.0 {
        write!(f, "{sign}i")
      } else {
        write!(f, "{}{}i", sign, part(im))
      }
    }
  }
}
