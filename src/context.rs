use std::collections::{BTreeSet, HashMap};

use crate::dtype::{Scalar, Value, I};
use crate::error::EvalError;
use crate::syntax::Ast;

/// A built-in operation; all natives take exactly one argument.
pub type NativeFn = fn(&Value) -> Result<Value, EvalError>;

/// A stored user function: its parameter names, the simplified body
/// template, and the user functions the body references. The body is a
/// template — every call evaluates its own copy.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionStorage {
  pub args: Vec<String>,
  pub body: Ast,
  pub dependencies: BTreeSet<String>,
}

#[derive(Clone, Debug, Default)]
struct Scope {
  id: Option<String>,
  variables: HashMap<String, Ast>,
}

/// Session-wide store of user functions and the scope stack of variable
/// bindings. The stack always keeps its global frame; `reset_stack`
/// truncates back to it after a failed statement.
#[derive(Clone, Debug)]
pub struct Context {
  functions: HashMap<String, FunctionStorage>,
  scopes: Vec<Scope>,
}

impl Default for Context {
  fn default() -> Self {
    Context::new()
  }
}

impl Context {
  pub fn new() -> Self {
    Context { functions: HashMap::new(), scopes: vec![Scope::default()] }
  }

  pub fn is_builtin(name: &str) -> bool {
    Self::native(name).is_some()
  }

  pub fn is_constant(name: &str) -> bool {
    Self::constant(name).is_some()
  }

  pub fn native(name: &str) -> Option<NativeFn> {
    match name {
      "abs" => Some(native_abs),
      "cos" => Some(native_cos),
      "exp" => Some(native_exp),
      "log" => Some(native_log),
      "sin" => Some(native_sin),
      "sqrt" => Some(native_sqrt),
      "tan" => Some(native_tan),
      _ => None,
    }
  }

  pub fn constant(name: &str) -> Option<Value> {
    match name {
      "e" => Some(Value::from(std::f64::consts::E)),
      "i" => Some(Value::Complex(I)),
      "inf" => Some(Value::from(f64::INFINITY)),
      "nan" => Some(Value::from(f64::NAN)),
      "pi" => Some(Value::from(std::f64::consts::PI)),
      "tau" => Some(Value::from(std::f64::consts::TAU)),
      _ => None,
    }
  }

  pub fn user_function(&self, name: &str) -> Option<&FunctionStorage> {
    self.functions.get(name)
  }

  pub fn set_function(&mut self, name: &str, storage: FunctionStorage) {
    self.functions.insert(name.to_string(), storage);
  }

  pub fn unset_function(&mut self, name: &str) {
    self.functions.remove(name);
  }

  /// Looks a variable up through the scope stack, innermost first, then
  /// falls back to the constant table. Absence is a valid outcome — an
  /// unbound identifier stays symbolic.
  pub fn get_variable(&self, name: &str) -> Option<Ast> {
    for scope in self.scopes.iter().rev() {
      if let Some(value) = scope.variables.get(name) {
        return Some(value.clone());
      }
    }
    Self::constant(name).map(Ast::Constant)
  }

  /// Binds a variable in the innermost frame only.
  pub fn set_variable(&mut self, name: &str, value: Ast) {
    let scope = self.scopes.last_mut().expect("scope stack is never empty");
    scope.variables.insert(name.to_string(), value);
  }

  pub fn unset_variable(&mut self, name: &str) {
    let scope = self.scopes.last_mut().expect("scope stack is never empty");
    scope.variables.remove(name);
  }

  pub fn push_scope(&mut self, id: Option<String>) {
    self.scopes.push(Scope { id, variables: HashMap::new() });
  }

  pub fn pop_scope(&mut self) {
    assert!(self.scopes.len() > 1, "cannot pop the global scope");
    self.scopes.pop();
  }

  /// Name of the function owning the innermost frame; `None` at the top
  /// level. Used for error attribution and self-reference detection.
  pub fn scope_id(&self) -> Option<String> {
    self.scopes.last().and_then(|s| s.id.clone())
  }

  pub fn depth(&self) -> usize {
    self.scopes.len() - 1
  }

  /// Drops every frame above the global one. Called whenever a statement
  /// fails mid-evaluation so no half-built scopes leak into the next one.
  pub fn reset_stack(&mut self) {
    self.scopes.truncate(1);
  }

  /// Names of the stored functions whose dependency set contains `name`.
  pub fn get_functions_using_dependency(&self, name: &str) -> Vec<String> {
    let mut users: Vec<String> = self
      .functions
      .iter()
      .filter(|(_, fs)| fs.dependencies.contains(name))
      .map(|(id, _)| id.clone())
      .collect();
    users.sort();
    users
  }

  /// Removes every function that transitively depends on `name`, leaving
  /// `name` itself stored. Returns `(removed, dependency)` pairs in
  /// removal order, for reporting.
  pub fn remove_function_cascade(&mut self, name: &str) -> Vec<(String, String)> {
    let mut removed = Vec::new();
    for id in self.get_functions_using_dependency(name) {
      removed.extend(self.remove_function_cascade(&id));
      self.unset_function(&id);
      removed.push((id, name.to_string()));
    }
    removed
  }

  pub fn functions(&self) -> impl Iterator<Item = (&String, &FunctionStorage)> {
    self.functions.iter()
  }

  pub fn global_variables(&self) -> impl Iterator<Item = (&String, &Ast)> {
    self.scopes[0].variables.iter()
  }

  /// Every name the session knows: builtins, constants, user functions,
  /// and global variables. Feeds interactive completion.
  pub fn get_all_symbol_names(&self) -> Vec<String> {
    let mut names: Vec<String> =
      ["abs", "cos", "exp", "log", "sin", "sqrt", "tan"]
        .into_iter()
        .chain(["e", "i", "inf", "nan", "pi", "tau"])
        .map(str::to_string)
        .chain(self.functions.keys().cloned())
        .chain(self.scopes[0].variables.keys().cloned())
        .collect();
    names.sort();
    names.dedup();
    names
  }
}

fn real_argument(function: &'static str, v: &Value) -> Result<f64, EvalError> {
  match v {
    Value::Scalar(s) => Ok(s.as_f64()),
    other => Err(EvalError::InvalidArgument {
      function,
      operand: other.type_name(),
    }),
  }
}

fn native_abs(v: &Value) -> Result<Value, EvalError> {
  match v {
    Value::Scalar(Scalar::Int(i)) => Ok(i
      .checked_abs()
      .map(Value::from)
      .unwrap_or_else(|| Value::from((*i as f64).abs()))),
    Value::Scalar(Scalar::Float(f)) => Ok(Value::from(f.abs())),
    Value::Complex(c) => Ok(Value::from(c.abs())),
    other @ Value::Matrix(_) => Err(EvalError::InvalidArgument {
      function: "abs",
      operand: other.type_name(),
    }),
  }
}

fn native_cos(v: &Value) -> Result<Value, EvalError> {
  Ok(Value::from(real_argument("cos", v)?.cos()))
}

fn native_exp(v: &Value) -> Result<Value, EvalError> {
  Ok(Value::from(real_argument("exp", v)?.exp()))
}

fn native_log(v: &Value) -> Result<Value, EvalError> {
  let x = real_argument("log", v)?;
  if x <= 0.0 {
    return Err(EvalError::MathDomain);
  }
  Ok(Value::from(x.ln()))
}

fn native_sin(v: &Value) -> Result<Value, EvalError> {
  Ok(Value::from(real_argument("sin", v)?.sin()))
}

fn native_sqrt(v: &Value) -> Result<Value, EvalError> {
  let x = real_argument("sqrt", v)?;
  if x < 0.0 {
    return Err(EvalError::MathDomain);
  }
  Ok(Value::from(x.sqrt()))
}

fn native_tan(v: &Value) -> Result<Value, EvalError> {
  Ok(Value::from(real_argument("tan", v)?.tan()))
}
