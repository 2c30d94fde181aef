use super::*;
use abaco::Response;

mod commands {
  use super::*;

  #[test]
  fn unknown_commands_are_rejected() {
    let ctx = &mut Context::new();
    assert_eq!(eval_err(ctx, "%frobnicate"), "frobnicate: invalid command.");
  }

  #[test]
  fn clear_is_a_shell_action() {
    let ctx = &mut Context::new();
    assert_eq!(
      interpret(ctx, "%clear").unwrap(),
      Response::ClearScreen
    );
  }

  mod show {
    use super::*;

    #[test]
    fn empty_session() {
      let ctx = &mut Context::new();
      assert_eq!(
        eval(ctx, "%show"),
        "No functions stored.\nNo variables stored."
      );
    }

    #[test]
    fn lists_functions_and_variables() {
      let ctx = &mut Context::new();
      eval(ctx, "b = 2");
      eval(ctx, "a = 1");
      eval(ctx, "f(x) = 2 * x");
      assert_eq!(eval(ctx, "%show functions"), "f(x) = 2x");
      assert_eq!(eval(ctx, "%show variables"), "a = 1\nb = 2");
      assert_eq!(
        eval(ctx, "%show all"),
        "f(x) = 2x\na = 1\nb = 2"
      );
    }

    #[test]
    fn rejects_bad_arguments() {
      let ctx = &mut Context::new();
      assert_eq!(eval_err(ctx, "%show nonsense"), "show: invalid argument.");
      assert_eq!(
        eval_err(ctx, "%show functions variables"),
        "show: invalid number of arguments."
      );
    }
  }

  mod delete {
    use super::*;

    #[test]
    fn removes_variables() {
      let ctx = &mut Context::new();
      eval(ctx, "x = 2");
      assert_eq!(eval(ctx, "%delete variable x"), "");
      assert_eq!(eval(ctx, "x"), "x");
    }

    #[test]
    fn removes_functions() {
      let ctx = &mut Context::new();
      eval(ctx, "f(x) = x");
      assert_eq!(eval(ctx, "%delete function f"), "");
      assert_eq!(eval_err(ctx, "y = f(1)"), "function f is not defined.");
    }

    #[test]
    fn cascades_through_dependents() {
      let ctx = &mut Context::new();
      eval(ctx, "f(x) = x");
      eval(ctx, "g(x) = f(x)");
      assert_eq!(
        eval_err(ctx, "%delete function f"),
        "function g has been removed due to an invalid function call to f."
      );
      assert_eq!(
        eval(ctx, "%show functions"),
        "No functions stored."
      );
    }

    #[test]
    fn protects_builtins() {
      let ctx = &mut Context::new();
      assert_eq!(
        eval_err(ctx, "%delete function sin"),
        "delete: cannot delete built-in function: sin."
      );
      assert_eq!(
        eval_err(ctx, "%delete variable pi"),
        "delete: cannot delete built-in variable: pi."
      );
    }

    #[test]
    fn rejects_unknown_names_and_kinds() {
      let ctx = &mut Context::new();
      assert_eq!(
        eval_err(ctx, "%delete function f"),
        "delete: undefined function: f."
      );
      assert_eq!(
        eval_err(ctx, "%delete variable x"),
        "delete: undefined variable: x."
      );
      assert_eq!(
        eval_err(ctx, "%delete constant pi"),
        "delete: invalid identifier type: constant."
      );
      assert_eq!(
        eval_err(ctx, "%delete function"),
        "delete: invalid number of arguments."
      );
    }
  }

  mod help {
    use super::*;

    #[test]
    fn lists_all_commands() {
      let ctx = &mut Context::new();
      let text = eval(ctx, "%help");
      assert!(text.starts_with("Available commands:"));
      for name in ["clear", "delete", "help", "show"] {
        assert!(text.contains(name), "missing {name} in {text}");
      }
    }

    #[test]
    fn shows_usage_for_one_command() {
      let ctx = &mut Context::new();
      assert_eq!(
        eval(ctx, "%help delete"),
        "delete: Delete a function or a variable.\nUsage: delete <function|variable> <name>"
      );
      assert_eq!(eval(ctx, "%help clear"), "clear: Clear the screen.");
    }

    #[test]
    fn rejects_unknown_topics() {
      let ctx = &mut Context::new();
      assert_eq!(
        eval_err(ctx, "%help wat"),
        "help: unknown command: wat."
      );
    }
  }
}
