use std::collections::HashSet;

use crate::context::Context;
use crate::error::{Diagnostic, DiagnosticKind};
use crate::syntax::Ast;

/// Semantic analysis of one statement prior to evaluation. All findings
/// are collected and returned together so one submission surfaces every
/// problem at once; the context's scope stack is balanced on return.
pub fn check(ctx: &mut Context, ast: &Ast) -> Result<(), Vec<Diagnostic>> {
  let mut analyzer = Analyzer {
    ctx,
    assign_target: None,
    detect_unknown: false,
    unused: Vec::new(),
    errors: Vec::new(),
  };
  analyzer.visit(ast);
  if analyzer.errors.is_empty() {
    Ok(())
  } else {
    Err(analyzer.errors)
  }
}

struct Analyzer<'a> {
  ctx: &'a mut Context,
  /// Name of the function currently being declared, if any. A call to it
  /// from inside the declaration is a cycle.
  assign_target: Option<String>,
  /// Inside an assignment every identifier must resolve; elsewhere an
  /// unbound identifier is a legitimate symbolic residue.
  detect_unknown: bool,
  unused: Vec<String>,
  errors: Vec<Diagnostic>,
}

enum Resolved {
  User { params: Vec<String>, body: Ast },
  Native,
  Undefined,
}

impl Analyzer<'_> {
  fn push_error(&mut self, kind: DiagnosticKind) {
    self.errors.push(Diagnostic::new(self.ctx.scope_id(), kind));
  }

  fn visit(&mut self, ast: &Ast) {
    match ast {
      Ast::Constant(_) | Ast::Command(_) => {}
      Ast::Identifier(name) => self.visit_identifier(name),
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
      Ast::FunCall { name, args } => self.visit_funcall(name, args),
      Ast::Assign { target, value } => self.visit_assign(target, value),
      Ast::Solve(assign) => {
        if let Ast::Assign { target, value } = assign.as_ref() {
          self.visit(target);
          self.visit(value);
        }
      }
    }
  }

  fn visit_identifier(&mut self, name: &str) {
    if self.ctx.get_variable(name).is_none() && self.detect_unknown {
      self.push_error(DiagnosticKind::UndefinedVariable(name.to_string()));
    }
    // Parameter usage only counts inside the declared function's own frame.
    if self.ctx.scope_id() == self.assign_target {
      if let Some(pos) = self.unused.iter().position(|p| p == name) {
        self.unused.remove(pos);
      }
    }
  }

  fn visit_assign(&mut self, target: &Ast, value: &Ast) {
    let old_detect = self.detect_unknown;
    self.detect_unknown = true;
    match target {
      Ast::Identifier(name) => {
        self.visit(value);
        if Context::is_constant(name) {
          self.push_error(DiagnosticKind::BuiltInConstant(name.to_string()));
        }
        if self.ctx.depth() > 0 {
          self.ctx.set_variable(name, value.clone());
        }
      }
      Ast::FunCall { name, args } => {
        self.assign_target = Some(name.clone());
        self.ctx.push_scope(Some(name.clone()));
        let params = self.check_signature(args);
        self.bind_parameters(&params);
        self.visit(value);
        let leftover: Vec<String> = self.unused.clone();
        for param in leftover {
          self.push_error(DiagnosticKind::UnusedParameter(param));
        }
        self.ctx.pop_scope();
        if Context::is_builtin(name) {
          self.push_error(DiagnosticKind::BuiltInFunction(name.to_string()));
        }
        self.assign_target = None;
        self.unused.clear();
      }
      _ => self.push_error(DiagnosticKind::AssignToExpression),
    }
    self.detect_unknown = old_detect;
  }

  /// Validates a declaration's parameter list: every position must be a
  /// bare identifier and no name may repeat (the first occurrence wins).
  fn check_signature(&mut self, args: &[Ast]) -> Vec<String> {
    let mut params = Vec::new();
    let mut duplicates = HashSet::new();
    for (i, arg) in args.iter().enumerate() {
      match arg {
        Ast::Identifier(name) => {
          if !self.unused.contains(name) {
            params.push(name.clone());
            self.unused.push(name.clone());
          } else if duplicates.insert(name.clone()) {
            self
              .push_error(DiagnosticKind::MultipleDeclaration(name.clone()));
          }
        }
        _ => self.push_error(DiagnosticKind::RequireIdentifier(i + 1)),
      }
    }
    params
  }

  /// Binds parameters symbolically in the current frame so the body
  /// analysis can resolve them.
  fn bind_parameters(&mut self, params: &[String]) {
    for param in params {
      if Context::is_constant(param) {
        self.push_error(DiagnosticKind::BuiltInConstant(param.clone()));
      } else {
        self.ctx.set_variable(param, Ast::Identifier(param.clone()));
      }
    }
  }

  fn visit_funcall(&mut self, name: &str, args: &[Ast]) {
    if self.assign_target.as_deref() == Some(name) {
      self.push_error(DiagnosticKind::CyclicDependency);
      for arg in args {
        self.visit(arg);
      }
      return;
    }
    let resolved = match self.ctx.user_function(name) {
      Some(storage) => Resolved::User {
        params: storage.args.clone(),
        body: storage.body.clone(),
      },
      None if Context::is_builtin(name) => Resolved::Native,
      None => Resolved::Undefined,
    };
    if matches!(resolved, Resolved::Undefined) {
      self.push_error(DiagnosticKind::UndefinedFunction(name.to_string()));
    }
    for arg in args {
      self.visit(arg);
    }
    self.ctx.push_scope(Some(name.to_string()));
    match resolved {
      Resolved::User { params, body } => {
        if params.len() != args.len() {
          self.push_error(DiagnosticKind::InvalidArgumentsLength {
            expected: params.len(),
            got: args.len(),
          });
        }
        self.bind_parameters(&params);
        self.visit(&body);
      }
      Resolved::Native if args.len() > 1 => {
        self.push_error(DiagnosticKind::InvalidArgumentsLength {
          expected: 1,
          got: args.len(),
        });
      }
      Resolved::Native | Resolved::Undefined => {}
    }
    self.ctx.pop_scope();
  }
}
