use log::debug;

use super::Evaluator;
use crate::context::FunctionStorage;
use crate::dependencies::Dependencies;
use crate::error::{Diagnostic, DiagnosticKind, Error};
use crate::syntax::Ast;

impl Evaluator<'_> {
  pub(crate) fn eval_assign(
    &mut self,
    target: Ast,
    value: Ast,
  ) -> Result<Ast, Error> {
    match target {
      Ast::Identifier(name) => {
        let value = self.eval(value)?;
        self.ctx.set_variable(&name, value.clone());
        Ok(value)
      }
      Ast::FunCall { name, args } => self.declare_function(name, args, value),
      _ => Err(
        Diagnostic::new(
          self.ctx.scope_id(),
          DiagnosticKind::AssignToExpression,
        )
        .into(),
      ),
    }
  }

  /// Declares (or redeclares) a user function. The body is evaluated with
  /// the parameters bound to themselves, which simplifies it and proves it
  /// executes, without expanding calls to other functions. Redeclaring
  /// with a different arity invalidates every dependent function; the
  /// removals are reported after the new definition is stored.
  fn declare_function(
    &mut self,
    name: String,
    args: Vec<Ast>,
    body: Ast,
  ) -> Result<Ast, Error> {
    let mut params = Vec::with_capacity(args.len());
    for (i, arg) in args.iter().enumerate() {
      match arg {
        Ast::Identifier(param) => params.push(param.clone()),
        _ => {
          return Err(
            Diagnostic::new(
              Some(name),
              DiagnosticKind::RequireIdentifier(i + 1),
            )
            .into(),
          );
        }
      }
    }
    let was_expanding = self.expand_calls;
    self.expand_calls = false;
    self.ctx.push_scope(Some(name.clone()));
    for param in &params {
      self.ctx.set_variable(param, Ast::Identifier(param.clone()));
    }
    let body = self.eval(body)?;
    self.ctx.pop_scope();
    self.expand_calls = was_expanding;

    let dependencies = Dependencies::collect(&body).user_functions();
    let removed = match self.ctx.user_function(&name) {
      Some(old) if old.args.len() != params.len() => {
        debug!("arity of {name} changed, invalidating dependents");
        self.ctx.remove_function_cascade(&name)
      }
      _ => Vec::new(),
    };
    self.ctx.set_function(
      &name,
      FunctionStorage { args: params, body: body.clone(), dependencies },
    );
    if removed.is_empty() {
      Ok(body)
    } else {
      Err(Error::Semantic(
        removed
          .into_iter()
          .map(|(id, dep)| {
            Diagnostic::new(None, DiagnosticKind::RemovedFunction { id, dep })
          })
          .collect(),
      ))
    }
  }
}
