use super::*;

mod simplify {
  use super::*;

  // Residual trees keep simplifying: declaring a function shows the
  // rewritten body.
  #[test]
  fn additive_identities() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "f(x) = x + 0"), "x");
    assert_eq!(eval(ctx, "f(x) = 0 + x"), "x");
    assert_eq!(eval(ctx, "f(x) = x - 0"), "x");
    assert_eq!(eval(ctx, "f(x) = 0 - x"), "-x");
  }

  #[test]
  fn multiplicative_identities() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "f(x) = 1 * x"), "x");
    assert_eq!(eval(ctx, "f(x) = x * 1"), "x");
    assert_eq!(eval(ctx, "f(x) = x * 0"), "0");
    assert_eq!(eval(ctx, "f(x) = x / 1"), "x");
  }

  #[test]
  fn power_identities() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "f(x) = x ^ 1"), "x");
    assert_eq!(eval(ctx, "f(x) = x ^ 0"), "1");
  }

  #[test]
  fn unary_signs_collapse() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "f(x) = +x"), "x");
    assert_eq!(eval(ctx, "f(x) = --x"), "x");
    assert_eq!(eval(ctx, "f(x) = -(-x)"), "x");
    assert_eq!(eval(ctx, "f(x) = ---x"), "-x");
  }

  #[test]
  fn negative_constants_fold_into_the_operator() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "f(x) = x + (0 - 3)"), "x - 3");
    assert_eq!(eval(ctx, "f(x) = x - (0 - 3)"), "x + 3");
  }

  #[test]
  fn constants_reassociate_across_a_chain() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "f(x) = (x + 1) + 2"), "x + 3");
    assert_eq!(eval(ctx, "f(x) = (1 + x) + 2"), "x + 3");
    assert_eq!(eval(ctx, "f(x) = 2 * x * 3"), "6x");
  }

  #[test]
  fn constants_normalize_to_one_side() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "f(x) = 3 + x"), "x + 3");
    assert_eq!(eval(ctx, "f(x) = x * 3"), "3x");
  }

  // Mixed-operator chains never reassociate: pulling a constant through
  // `-` or `/` would change the value.
  #[test]
  fn mixed_chains_do_not_reassociate() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "f(x) = (x - 1) + 2"), "x - 1 + 2");
    assert_eq!(eval(ctx, "f(x) = (x / 2) * 3"), "3 * (x / 2)");
  }
}
