use std::collections::BTreeMap;

use super::Scalar;

/// A sparse single-variable polynomial: degree → coefficient. A zero
/// coefficient is never stored, so the zero polynomial has no terms and
/// reports degree 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polynomial {
  terms: BTreeMap<u32, Scalar>,
}

impl Polynomial {
  pub fn new() -> Self {
    Polynomial::default()
  }

  pub fn add_coefficient(&mut self, coeff: Scalar, degree: u32) {
    let sum = match self.terms.get(&degree) {
      Some(existing) => *existing + coeff,
      None => coeff,
    };
    if sum.is_zero() {
      self.terms.remove(&degree);
    } else {
      self.terms.insert(degree, sum);
    }
  }

  pub fn coefficient(&self, degree: u32) -> Scalar {
    self.terms.get(&degree).copied().unwrap_or(Scalar::Int(0))
  }

  pub fn degree(&self) -> u32 {
    self.terms.keys().next_back().copied().unwrap_or(0)
  }

  pub fn negated(&self) -> Polynomial {
    Polynomial {
      terms: self.terms.iter().map(|(d, c)| (*d, -*c)).collect(),
    }
  }

  pub fn sub(&self, other: &Polynomial) -> Polynomial {
    let mut result = self.clone();
    for (degree, coeff) in &other.terms {
      result.add_coefficient(-*coeff, *degree);
    }
    result
  }
}
