use super::*;

mod analysis {
  use super::*;

  // One submission surfaces every finding, not just the first.
  #[test]
  fn errors_are_collected_per_statement() {
    let ctx = &mut Context::new();
    let message = eval_err(ctx, "f(2, x, x) = x + q");
    assert!(message.contains("function f: expects an identifier for parameter 1."));
    assert!(message.contains("function f: multiple declarations of parameter x."));
    assert!(message.contains("function f: variable q is not defined."));
    assert_eq!(message.lines().count(), 3);
  }

  #[test]
  fn failed_declarations_store_nothing() {
    let ctx = &mut Context::new();
    eval_err(ctx, "f(a, b) = a");
    assert_eq!(eval_err(ctx, "y = f(1, 2)"), "function f is not defined.");
  }

  // Any evaluation failure rolls the scope stack back to the global
  // frame, so the session keeps working.
  #[test]
  fn failures_restore_the_global_scope() {
    let ctx = &mut Context::new();
    eval(ctx, "f(x) = x / 0");
    assert_eq!(eval_err(ctx, "f(1)"), "division by zero");
    assert_eq!(ctx.depth(), 0);
    assert_eq!(ctx.scope_id(), None);
    assert_eq!(eval(ctx, "1 + 1"), "2");
  }

  // Declaration-time evaluation substitutes bound globals into the body,
  // so a stored template only ever references its own parameters and
  // other functions.
  #[test]
  fn declarations_fold_globals_into_the_body() {
    let ctx = &mut Context::new();
    eval(ctx, "b = 1");
    assert_eq!(eval(ctx, "f(x) = x + b"), "x + 1");
    eval(ctx, "%delete variable b");
    assert_eq!(eval(ctx, "f(2)"), "3");
  }

  #[test]
  fn calls_inside_assignments_need_matching_arity() {
    let ctx = &mut Context::new();
    eval(ctx, "f(x) = x");
    assert_eq!(
      eval_err(ctx, "y = f(1, 2)"),
      "function f: expected 1 argument, got 2."
    );
  }
}
