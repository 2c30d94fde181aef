use super::*;

mod complex_numbers {
  use super::*;

  #[test]
  fn i_squares_to_minus_one() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "i * i"), "-1 + 0i");
  }

  #[test]
  fn mixed_scalar_complex_arithmetic() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "2 + 3 * i"), "2 + 3i");
    assert_eq!(eval(ctx, "2 - i"), "2 - i");
    assert_eq!(eval(ctx, "2i"), "2i");
    assert_eq!(eval(ctx, "(2 + i) * (2 - i)"), "5 + 0i");
  }

  #[test]
  fn division() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "(4 + 2 * i) / 2"), "2 + i");
    assert_eq!(eval(ctx, "1 / i"), "-i");
  }

  #[test]
  fn power_is_not_defined_on_complexes() {
    let ctx = &mut Context::new();
    assert_eq!(
      eval_err(ctx, "i ^ 2"),
      "unsupported operand type(s) for ^: 'complex' and 'int'"
    );
    assert_eq!(
      eval_err(ctx, "i % 2"),
      "unsupported operand type(s) for %: 'complex' and 'int'"
    );
  }

  #[test]
  fn fractional_components_render_as_floats() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "(1 + i) / 2"), "0.5 + 0.5i");
  }
}
