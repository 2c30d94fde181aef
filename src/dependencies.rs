use std::collections::BTreeSet;

use crate::context::Context;
use crate::syntax::Ast;

/// The symbols an expression references: every identifier read and every
/// function called. Computed once per function declaration to record the
/// new function's dependency set, and per solve request to count free
/// variables.
#[derive(Clone, Debug, Default)]
pub struct Dependencies {
  pub functions: BTreeSet<String>,
  pub variables: BTreeSet<String>,
}

impl Dependencies {
  pub fn collect(ast: &Ast) -> Self {
    let mut deps = Dependencies::default();
    deps.visit(ast);
    deps
  }

  /// The called functions that are not builtins. Names that are not
  /// defined (yet) count too; invalidation works by name.
  pub fn user_functions(&self) -> BTreeSet<String> {
    self
      .functions
      .iter()
      .filter(|name| !Context::is_builtin(name))
      .cloned()
      .collect()
  }

  fn visit(&mut self, ast: &Ast) {
    match ast {
      Ast::Constant(_) | Ast::Command(_) => {}
      Ast::Identifier(name) => {
        self.variables.insert(name.clone());
      }
      Ast::BinaryOp { left, right, .. } => {
        self.visit(left);
        self.visit(right);
      }
      Ast::UnaryOp { operand, .. } => self.visit(operand),
      Ast::MatDecl(rows) => {
        for cell in rows.iter().flatten() {
          self.visit(cell);
        }
      }
      Ast::FunCall { name, args } => {
        self.functions.insert(name.clone());
        for arg in args {
          self.visit(arg);
        }
      }
      Ast::Assign { value, .. } => self.visit(value),
      Ast::Solve(assign) => self.visit(assign),
    }
  }
}
