use super::*;

mod functions {
  use super::*;

  #[test]
  fn declaration_echoes_the_simplified_body() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "f(x) = x ^ 2"), "x ^ 2");
    assert_eq!(eval(ctx, "g(x) = x + 0"), "x");
  }

  #[test]
  fn calls_with_constants_fold() {
    let ctx = &mut Context::new();
    eval(ctx, "f(x) = x ^ 2");
    assert_eq!(eval(ctx, "f(3)"), "9");
    assert_eq!(eval(ctx, "f(3) + f(4)"), "25");
    assert_eq!(eval(ctx, "f(f(2))"), "16");
  }

  // The body is a template: every call evaluates a copy, and a call with
  // an unbound argument comes back as a residual expression.
  #[test]
  fn calls_with_unbound_arguments_stay_symbolic() {
    let ctx = &mut Context::new();
    eval(ctx, "f(x) = x ^ 2");
    assert_eq!(eval(ctx, "f(y)"), "y ^ 2");
    assert_eq!(eval(ctx, "f(3)"), "9");
    assert_eq!(eval(ctx, "f(y)"), "y ^ 2");
  }

  #[test]
  fn parameters_shadow_globals() {
    let ctx = &mut Context::new();
    eval(ctx, "x = 10");
    eval(ctx, "f(x) = x ^ 2");
    assert_eq!(eval(ctx, "f(2)"), "4");
    assert_eq!(eval(ctx, "x"), "10");
  }

  #[test]
  fn bodies_capture_globals_at_declaration_time() {
    let ctx = &mut Context::new();
    eval(ctx, "a = 3");
    assert_eq!(eval(ctx, "f(x) = a * x"), "3x");
    eval(ctx, "a = 5");
    assert_eq!(eval(ctx, "f(2)"), "6");
  }

  #[test]
  fn declarations_keep_calls_to_other_functions() {
    let ctx = &mut Context::new();
    eval(ctx, "f(x) = x + 1");
    assert_eq!(eval(ctx, "g(x) = 2 * f(x)"), "2 * f(x)");
    assert_eq!(eval(ctx, "g(3)"), "8");
  }

  #[test]
  fn builtin_calls_stay_residual_until_constant() {
    let ctx = &mut Context::new();
    assert_eq!(eval(ctx, "f(x) = sin(x)"), "sin(x)");
    assert_eq!(eval(ctx, "f(0)"), "0");
  }

  #[test]
  fn arity_is_checked() {
    let ctx = &mut Context::new();
    eval(ctx, "f(x) = x + 1");
    assert_eq!(
      eval_err(ctx, "f(1, 2)"),
      "function f: expected 1 argument, got 2."
    );
    eval(ctx, "g(a, b) = a + b");
    assert_eq!(
      eval_err(ctx, "g(1)"),
      "function g: expected 2 arguments, got 1."
    );
    assert_eq!(
      eval_err(ctx, "sin(1, 2)"),
      "function sin: expected 1 argument, got 2."
    );
  }

  #[test]
  fn duplicate_parameters_report_once() {
    let ctx = &mut Context::new();
    assert_eq!(
      eval_err(ctx, "f(x, x) = x"),
      "function f: multiple declarations of parameter x."
    );
  }

  #[test]
  fn parameters_must_be_identifiers() {
    let ctx = &mut Context::new();
    let message = eval_err(ctx, "f(2) = 2");
    assert!(message.contains("function f: expects an identifier for parameter 1."));
  }

  #[test]
  fn unused_parameters_are_reported() {
    let ctx = &mut Context::new();
    assert_eq!(
      eval_err(ctx, "f(a, b) = a"),
      "function f: unused parameter b."
    );
  }

  #[test]
  fn builtins_cannot_be_redeclared() {
    let ctx = &mut Context::new();
    assert_eq!(eval_err(ctx, "sin(x) = x"), "sin is a built-in function.");
  }

  #[test]
  fn direct_self_reference_is_rejected() {
    let ctx = &mut Context::new();
    assert_eq!(
      eval_err(ctx, "f(x) = f(x)"),
      "function f: call results in an infinite loop."
    );
  }

  #[test]
  fn indirect_self_reference_is_rejected() {
    let ctx = &mut Context::new();
    eval(ctx, "f(x) = x");
    eval(ctx, "g(x) = f(x)");
    assert_eq!(
      eval_err(ctx, "f(x) = g(x)"),
      "function g: call results in an infinite loop."
    );
  }

  #[test]
  fn arity_change_invalidates_dependents() {
    let ctx = &mut Context::new();
    eval(ctx, "f(x) = x");
    eval(ctx, "g(x) = f(x)");
    assert_eq!(
      eval_err(ctx, "f(a, b) = a + b"),
      "function g has been removed due to an invalid function call to f."
    );
    // The new definition stuck; the dependent is gone.
    assert_eq!(eval(ctx, "f(1, 2)"), "3");
    assert_eq!(eval_err(ctx, "y = g(1)"), "function g is not defined.");
  }

  #[test]
  fn arity_change_cascades_transitively() {
    let ctx = &mut Context::new();
    eval(ctx, "f(x) = x");
    eval(ctx, "g(x) = f(x)");
    eval(ctx, "h(x) = g(x)");
    let message = eval_err(ctx, "f(a, b) = a + b");
    assert!(message
      .contains("function h has been removed due to an invalid function call to g."));
    assert!(message
      .contains("function g has been removed due to an invalid function call to f."));
  }

  #[test]
  fn same_arity_redefinition_keeps_dependents() {
    let ctx = &mut Context::new();
    eval(ctx, "f(x) = x");
    eval(ctx, "g(x) = f(x)");
    assert_eq!(eval(ctx, "f(x) = x * 2"), "2x");
    assert_eq!(eval(ctx, "g(3)"), "6");
  }
}
