use super::{Complex, Scalar, TypeError, Value};

/// A rectangular matrix of scalar or complex cells. Construction promotes
/// the cell dtype: any float cell promotes integers to floats, any complex
/// cell promotes the whole matrix to complex.
#[derive(Clone, Debug)]
pub struct Matrix {
  rows: usize,
  cols: usize,
  cells: Vec<Vec<Value>>,
}

#[derive(Clone, Copy, PartialEq)]
enum CellKind {
  Int,
  Float,
  Complex,
}

impl Matrix {
  pub fn new(cells: Vec<Vec<Value>>) -> Result<Self, TypeError> {
    if cells.is_empty() || cells[0].is_empty() {
      return Err(TypeError::InvalidShape);
    }
    let cols = cells[0].len();
    if cells.iter().any(|row| row.len() != cols) {
      return Err(TypeError::InvalidShape);
    }
    if cells.iter().flatten().any(|c| matches!(c, Value::Matrix(_))) {
      return Err(TypeError::InvalidCell);
    }
    let kind = cells
      .iter()
      .flatten()
      .map(cell_kind)
      .fold(CellKind::Int, promote);
    let cells = cells
      .into_iter()
      .map(|row| row.into_iter().map(|c| cast_cell(kind, c)).collect())
      .collect::<Vec<Vec<Value>>>();
    Ok(Matrix { rows: cells.len(), cols, cells })
  }

  pub fn identity(n: usize) -> Self {
    Self::fill_with(n, n, |i, j| {
      Value::Scalar(Scalar::Float(if i == j { 1.0 } else { 0.0 }))
    })
  }

  pub fn zeros(rows: usize, cols: usize) -> Self {
    Self::fill_with(rows, cols, |_, _| Value::Scalar(Scalar::Float(0.0)))
  }

  pub fn ones(rows: usize, cols: usize) -> Self {
    Self::fill_with(rows, cols, |_, _| Value::Scalar(Scalar::Float(1.0)))
  }

  fn fill_with(
    rows: usize,
    cols: usize,
    f: impl Fn(usize, usize) -> Value,
  ) -> Self {
    let cells = (0..rows)
      .map(|i| (0..cols).map(|j| f(i, j)).collect())
      .collect();
    Matrix { rows, cols, cells }
  }

  fn identity_like(&self) -> Self {
    let kind = cell_kind(&self.cells[0][0]);
    Self::fill_with(self.rows, self.rows, |i, j| {
      cast_cell(kind, Value::Scalar(Scalar::Int(i64::from(i == j))))
    })
  }

  pub fn rows(&self) -> usize {
    self.rows
  }

  pub fn cols(&self) -> usize {
    self.cols
  }

  pub fn cells(&self) -> &Vec<Vec<Value>> {
    &self.cells
  }

  pub fn row_major(&self) -> impl Iterator<Item = &Value> {
    self.cells.iter().flatten()
  }

  /// Applies `op` cell by cell against another matrix of the same shape.
  pub fn zip_with(
    &self,
    other: &Matrix,
    op: impl Fn(&Value, &Value) -> Result<Value, TypeError>,
  ) -> Result<Matrix, TypeError> {
    if self.rows != other.rows || self.cols != other.cols {
      return Err(TypeError::InvalidShape);
    }
    let cells = self
      .cells
      .iter()
      .zip(&other.cells)
      .map(|(r1, r2)| {
        r1.iter().zip(r2).map(|(a, b)| op(a, b)).collect::<Result<_, _>>()
      })
      .collect::<Result<Vec<Vec<Value>>, _>>()?;
    Matrix::new(cells)
  }

  /// Applies `op` to every cell, threading in a scalar operand.
  pub fn map_cells(
    &self,
    op: impl Fn(&Value) -> Result<Value, TypeError>,
  ) -> Result<Matrix, TypeError> {
    let cells = self
      .cells
      .iter()
      .map(|row| row.iter().map(&op).collect::<Result<_, _>>())
      .collect::<Result<Vec<Vec<Value>>, _>>()?;
    Matrix::new(cells)
  }

  pub fn matmul(&self, other: &Matrix) -> Result<Matrix, TypeError> {
    if self.cols != other.rows {
      return Err(TypeError::InvalidShape);
    }
    let mut cells = Vec::with_capacity(self.rows);
    for i in 0..self.rows {
      let mut row = Vec::with_capacity(other.cols);
      for j in 0..other.cols {
        let mut acc = Value::Scalar(Scalar::Int(0));
        for k in 0..self.cols {
          let prod = self.cells[i][k].mul(&other.cells[k][j])?;
          acc = acc.add(&prod)?;
        }
        row.push(acc);
      }
      cells.push(row);
    }
    Matrix::new(cells)
  }

  pub fn transpose(&self) -> Matrix {
    Self::fill_with(self.cols, self.rows, |i, j| self.cells[j][i].clone())
  }

  pub fn pow(&self, exponent: &Value) -> Result<Matrix, TypeError> {
    if self.rows != self.cols {
      return Err(TypeError::NotSquare);
    }
    let exp = match exponent {
      Value::Scalar(s) => {
        s.as_exponent().ok_or(TypeError::NonIntegerExponent)?
      }
      _ => return Err(TypeError::NonIntegerExponent),
    };
    if exp < 0 {
      return Err(TypeError::NegativeExponent);
    }
    if exp == 0 {
      return Ok(self.identity_like());
    }
    let mut acc = self.clone();
    for _ in 1..exp {
      acc = acc.matmul(self)?;
    }
    Ok(acc)
  }

  /// Gauss-Jordan inversion over an identity-augmented copy; the product
  /// check rejects singular matrices that survive elimination numerically.
  /// Integer matrices invert in floating point, since elimination divides.
  pub fn inverse(&self) -> Result<Matrix, TypeError> {
    if self.rows != self.cols {
      return Err(TypeError::NotSquare);
    }
    let base = match cell_kind(&self.cells[0][0]) {
      CellKind::Int => self.map_cells(|c| Ok(cast_cell(CellKind::Float, c.clone())))?,
      _ => self.clone(),
    };
    let identity = base.identity_like();
    let mut m: Vec<Vec<Value>> = base
      .cells
      .iter()
      .zip(&identity.cells)
      .map(|(a, b)| a.iter().chain(b).cloned().collect())
      .collect();
    let width = 2 * self.cols;
    for i in 0..self.rows {
      for j in 0..width {
        if m[i][j].is_zero() {
          continue;
        }
        let pivot = m[i][j].clone();
        for x in &mut m[i] {
          *x = x.div(&pivot)?;
        }
        for k in 0..self.rows {
          if k == i {
            continue;
          }
          let factor = m[k][j].clone();
          for c in 0..width {
            let scaled = m[i][c].mul(&factor)?;
            m[k][c] = m[k][c].sub(&scaled)?;
          }
        }
        break;
      }
    }
    let inverse = Matrix::new(
      m.into_iter().map(|row| row[self.cols..].to_vec()).collect(),
    )?;
    if self.matmul(&inverse)?.approx_eq(&identity) {
      Ok(inverse)
    } else {
      Err(TypeError::NotInvertible)
    }
  }

  pub fn negate(&self) -> Matrix {
    Self::fill_with(self.rows, self.cols, |i, j| self.cells[i][j].negate())
  }

  pub fn approx_eq(&self, other: &Matrix) -> bool {
    self.rows == other.rows
      && self.cols == other.cols
      && self
        .row_major()
        .zip(other.row_major())
        .all(|(a, b)| a.approx_eq(b))
  }
}

impl PartialEq for Matrix {
  fn eq(&self, other: &Self) -> bool {
    self.approx_eq(other)
  }
}

impl std::fmt::Display for Matrix {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let rows = self
      .cells
      .iter()
      .map(|row| {
        let cells = row
          .iter()
          .map(|c| c.to_string())
          .collect::<Vec<_>>()
          .join(", ");
        format!("[{cells}]")
      })
      .collect::<Vec<_>>()
      .join("; ");
    write!(f, "[{rows}]")
  }
}

fn cell_kind(v: &Value) -> CellKind {
  match v {
    Value::Scalar(Scalar::Int(_)) => CellKind::Int,
    Value::Scalar(Scalar::Float(_)) => CellKind::Float,
    _ => CellKind::Complex,
  }
}

fn promote(a: CellKind, b: CellKind) -> CellKind {
  match (a, b) {
    (CellKind::Complex, _) | (_, CellKind::Complex) => CellKind::Complex,
    (CellKind::Float, _) | (_, CellKind::Float) => CellKind::Float,
    _ => CellKind::Int,
  }
}

fn cast_cell(kind: CellKind, v: Value) -> Value {
  match (kind, v) {
    (CellKind::Float, Value::Scalar(s)) => {
      Value::Scalar(Scalar::Float(s.as_f64()))
    }
    (CellKind::Complex, Value::Scalar(s)) => Value::Complex(Complex::from(s)),
    (_, v) => v,
  }
}
