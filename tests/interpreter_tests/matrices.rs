use super::*;

mod matrices {
  use super::*;

  #[test]
  fn literals_echo_back() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "[[1, 2]; [3, 4]]"), "[[1, 2]; [3, 4]]");
    assert_eq!(eval(ctx, "[[1 + 1, 2 * 3]]"), "[[2, 6]]");
  }

  #[test]
  fn cells_promote_to_a_common_dtype() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "[[1, 2.5]]"), "[[1, 2.5]]");
    assert_eq!(eval(ctx, "[[1.5, 2]]"), "[[1.5, 2]]");
    assert_eq!(eval(ctx, "[[1, i]]"), "[[1 + 0i, i]]");
  }

  #[test]
  fn elementwise_arithmetic() {
    let ctx = &mut Context::new();
    assert_eq!(
      eval(ctx, "[[1, 2]; [3, 4]] + [[10, 20]; [30, 40]]"),
      "[[11, 22]; [33, 44]]"
    );
    assert_eq!(eval(ctx, "[[1, 2]] * [[3, 4]]"), "[[3, 8]]");
    assert_eq!(eval(ctx, "[[9, 8]] % [[5, 3]]"), "[[4, 2]]");
  }

  #[test]
  fn scalars_broadcast() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "[[1, 2]] + 1"), "[[2, 3]]");
    assert_eq!(eval(ctx, "2 * [[1, 2]]"), "[[2, 4]]");
    assert_eq!(eval(ctx, "1 - [[1, 2]]"), "[[0, -1]]");
    assert_eq!(eval(ctx, "[[4, 6]] / 2"), "[[2, 3]]");
  }

  #[test]
  fn shape_mismatches_are_errors() {
    let ctx = &mut Context::new();
    assert_eq!(
      eval_err(ctx, "[[1, 2]] + [[1]; [2]]"),
      "invalid matrix shape."
    );
    assert_eq!(eval_err(ctx, "[[1, 2]; [3]]"), "invalid matrix shape.");
  }

  #[test]
  fn strict_matrix_multiplication() {
    let ctx = &mut Context::new();
    assert_eq!(
      eval(ctx, "[[1, 2]; [3, 4]] ** [[1]; [1]]"),
      "[[3]; [7]]"
    );
    assert_eq!(
      eval_err(ctx, "[[1]] ** 2"),
      "unsupported operand type(s) for **: 'matrix' and 'int'"
    );
  }

  #[test]
  fn matrix_powers() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "[[1, 1]; [0, 1]] ^ 2"), "[[1, 2]; [0, 1]]");
    assert_eq!(eval(ctx, "[[5, 3]; [1, 2]] ^ 0"), "[[1, 0]; [0, 1]]");
    assert_eq!(eval_err(ctx, "[[1, 2]] ^ 2"), "matrix is not square.");
    assert_eq!(
      eval_err(ctx, "[[1, 0]; [0, 1]] ^ 1.5"),
      "exponent must be an integer."
    );
  }

  #[test]
  fn matrices_do_not_nest() {
    let ctx = &mut Context::new();
    assert_eq!(
      eval_err(ctx, "[[[[1]], 2]]"),
      "all elements in the matrix must be literals."
    );
  }
}
