use super::*;

mod solve {
  use super::*;

  mod linear {
    use super::*;

    #[test]
    fn simple_offset() {
      let ctx = &mut Context::new();
      assert_eq!(eval(ctx, "x + 1 = 8 ?"), "7");
    }

    #[test]
    fn coefficient_and_constant() {
      let ctx = &mut Context::new();
      assert_eq!(eval(ctx, "2x + 4 = 0 ?"), "-2");
      assert_eq!(eval(ctx, "2 * x = 1 ?"), "0.5");
    }

    #[test]
    fn bound_variables_fold_before_solving() {
      let ctx = &mut Context::new();
      eval(ctx, "a = 4");
      assert_eq!(eval(ctx, "2x + a = 0 ?"), "-2");
    }

    #[test]
    fn variable_on_both_sides() {
      let ctx = &mut Context::new();
      assert_eq!(eval(ctx, "3x = x + 4 ?"), "2");
    }
  }

  mod quadratic {
    use super::*;

    #[test]
    fn two_real_roots() {
      let ctx = &mut Context::new();
      assert_eq!(eval(ctx, "x ^ 2 + 3x - 4 = 0 ?"), "[[-4, 1]]");
    }

    #[test]
    fn double_root() {
      let ctx = &mut Context::new();
      assert_eq!(eval(ctx, "x ^ 2 - 4x + 4 = 0 ?"), "2");
    }

    #[test]
    fn complex_conjugate_roots() {
      let ctx = &mut Context::new();
      assert_eq!(eval(ctx, "x ^ 2 + 4x + 5 = 0 ?"), "[[-2 - i, -2 + i]]");
    }

    #[test]
    fn fractional_roots_stay_floats() {
      let ctx = &mut Context::new();
      assert_eq!(eval(ctx, "4 * x ^ 2 = 1 ?"), "[[-0.5, 0.5]]");
    }
  }

  mod degenerate {
    use super::*;

    // Degree-0 equations use `inf` for "every value" and `nan` for
    // "no value".
    #[test]
    fn tautology() {
      let ctx = &mut Context::new();
      assert_eq!(eval(ctx, "x = x ?"), "inf");
      assert_eq!(eval(ctx, "0 = 0 ?"), "inf");
    }

    #[test]
    fn contradiction() {
      let ctx = &mut Context::new();
      assert_eq!(eval(ctx, "0 = 1 ?"), "nan");
      assert_eq!(eval(ctx, "x + 1 = x ?"), "nan");
    }
  }

  mod rejections {
    use super::*;

    #[test]
    fn more_than_one_free_variable() {
      let ctx = &mut Context::new();
      assert_eq!(
        eval_err(ctx, "x + y = 0 ?"),
        "expected 1 equation variable, got 2."
      );
    }

    #[test]
    fn non_polynomial_shapes() {
      let ctx = &mut Context::new();
      assert_eq!(
        eval_err(ctx, "x * x = 0 ?"),
        "invalid polynomial expression."
      );
      assert_eq!(
        eval_err(ctx, "1 / x = 0 ?"),
        "invalid polynomial expression."
      );
    }

    #[test]
    fn degrees_above_two() {
      let ctx = &mut Context::new();
      assert_eq!(
        eval_err(ctx, "x ^ 3 - 1 = 0 ?"),
        "cannot solve polynomial of degree 3."
      );
    }
  }
}
