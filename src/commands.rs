//! System commands (`%clear`, `%show`, `%delete`, `%help`). These act on
//! the context directly and never produce a value to echo; the shell owns
//! the terminal, so `clear` comes back as an action instead of output.

use crate::context::Context;
use crate::error::{CommandError, Diagnostic, DiagnosticKind, Error};
use crate::render::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
  ClearScreen,
  Print(String),
}

const COMMAND_HELP: [(&str, &str, &str); 4] = [
  ("clear", "Clear the screen.", ""),
  ("delete", "Delete a function or a variable.", "<function|variable> <name>"),
  ("help", "Show a help message.", "[command]"),
  ("show", "Show stored functions and/or variables.", "[all|functions|variables]"),
];

pub fn execute(
  ctx: &mut Context,
  args: &[String],
) -> Result<CommandAction, Error> {
  let Some((name, rest)) = args.split_first() else {
    return Err(CommandError::Unknown(String::new()).into());
  };
  match name.as_str() {
    "clear" => Ok(CommandAction::ClearScreen),
    "delete" => delete(ctx, rest),
    "help" => help(rest).map(CommandAction::Print),
    "show" => show(ctx, rest).map(CommandAction::Print),
    _ => Err(CommandError::Unknown(name.clone()).into()),
  }
}

/// Deleting a function removes every function that transitively depends
/// on it; each removal is reported like the redefinition cascade does.
fn delete(ctx: &mut Context, args: &[String]) -> Result<CommandAction, Error> {
  let [kind, name] = args else {
    return Err(
      CommandError::failed("delete", "invalid number of arguments").into(),
    );
  };
  match kind.as_str() {
    "function" => {
      if Context::is_builtin(name) {
        return Err(
          CommandError::failed(
            "delete",
            format!("cannot delete built-in function: {name}"),
          )
          .into(),
        );
      }
      if ctx.user_function(name).is_none() {
        return Err(
          CommandError::failed("delete", format!("undefined function: {name}"))
            .into(),
        );
      }
      let removed = ctx.remove_function_cascade(name);
      ctx.unset_function(name);
      if removed.is_empty() {
        Ok(CommandAction::Print(String::new()))
      } else {
        Err(Error::Semantic(
          removed
            .into_iter()
            .map(|(id, dep)| {
              Diagnostic::new(
                None,
                DiagnosticKind::RemovedFunction { id, dep },
              )
            })
            .collect(),
        ))
      }
    }
    "variable" => {
      if Context::is_constant(name) {
        return Err(
          CommandError::failed(
            "delete",
            format!("cannot delete built-in variable: {name}"),
          )
          .into(),
        );
      }
      if ctx.get_variable(name).is_none() {
        return Err(
          CommandError::failed("delete", format!("undefined variable: {name}"))
            .into(),
        );
      }
      ctx.unset_variable(name);
      Ok(CommandAction::Print(String::new()))
    }
    other => Err(
      CommandError::failed("delete", format!("invalid identifier type: {other}"))
        .into(),
    ),
  }
}

fn show(ctx: &Context, args: &[String]) -> Result<String, Error> {
  match args {
    [] => Ok(format!("{}\n{}", show_functions(ctx), show_variables(ctx))),
    [what] => match what.as_str() {
      "all" => Ok(format!("{}\n{}", show_functions(ctx), show_variables(ctx))),
      "functions" => Ok(show_functions(ctx)),
      "variables" => Ok(show_variables(ctx)),
      _ => Err(CommandError::failed("show", "invalid argument").into()),
    },
    _ => {
      Err(CommandError::failed("show", "invalid number of arguments").into())
    }
  }
}

fn show_functions(ctx: &Context) -> String {
  let mut entries: Vec<(&String, String)> = ctx
    .functions()
    .map(|(name, storage)| {
      let args = storage.args.join(", ");
      (name, format!("{name}({args}) = {}", render(&storage.body)))
    })
    .collect();
  if entries.is_empty() {
    return "No functions stored.".to_string();
  }
  entries.sort();
  entries
    .into_iter()
    .map(|(_, line)| line)
    .collect::<Vec<_>>()
    .join("\n")
}

fn show_variables(ctx: &Context) -> String {
  let mut entries: Vec<(&String, String)> = ctx
    .global_variables()
    .map(|(name, value)| (name, format!("{name} = {}", render(value))))
    .collect();
  if entries.is_empty() {
    return "No variables stored.".to_string();
  }
  entries.sort();
  entries
    .into_iter()
    .map(|(_, line)| line)
    .collect::<Vec<_>>()
    .join("\n")
}

fn help(args: &[String]) -> Result<String, Error> {
  match args {
    [] => {
      let mut lines = vec!["Available commands:".to_string()];
      for (name, description, _) in COMMAND_HELP {
        lines.push(format!("- {name}: {description}"));
      }
      Ok(lines.join("\n"))
    }
    [topic] => {
      let Some((name, description, usage)) =
        COMMAND_HELP.iter().find(|(name, _, _)| name == topic)
      else {
        return Err(
          CommandError::failed("help", format!("unknown command: {topic}"))
            .into(),
        );
      };
      if usage.is_empty() {
        Ok(format!("{name}: {description}"))
      } else {
        Ok(format!("{name}: {description}\nUsage: {name} {usage}"))
      }
    }
    _ => {
      Err(CommandError::failed("help", "invalid number of arguments").into())
    }
  }
}
