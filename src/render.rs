use crate::syntax::{Associativity, Ast, BinaryOperator, UnaryOperator};

/// Renders a tree back to source text with the minimum parenthesization
/// needed to reparse to the same tree.
pub fn render(ast: &Ast) -> String {
  let mut out = String::new();
  write_node(&mut out, ast);
  out
}

fn write_node(out: &mut String, ast: &Ast) {
  match ast {
    Ast::Constant(value) => out.push_str(&value.to_string()),
    Ast::Identifier(name) => out.push_str(name),
    Ast::BinaryOp { op, left, right } => write_binary(out, *op, left, right),
    Ast::UnaryOp { op, operand } => write_unary(out, *op, operand),
    Ast::MatDecl(rows) => write_matrix(out, rows),
    Ast::FunCall { name, args } => {
      out.push_str(name);
      out.push('(');
      for (i, arg) in args.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        write_node(out, arg);
      }
      out.push(')');
    }
    Ast::Assign { target, value } => {
      write_node(out, target);
      out.push_str(" = ");
      write_node(out, value);
    }
    Ast::Solve(assign) => {
      write_node(out, assign);
      out.push_str(" ?");
    }
    Ast::Command(words) => {
      out.push('%');
      out.push_str(&words.join(" "));
    }
  }
}

fn write_binary(out: &mut String, op: BinaryOperator, left: &Ast, right: &Ast) {
  let left_parens = needs_parens(op, left, Associativity::Right);
  let right_parens = needs_parens(op, right, Associativity::Left);
  write_grouped(out, left, left_parens);
  // A constant directly multiplying an identifier prints in its implicit
  // form: `2x` instead of `2 * x`.
  let implicit = op == BinaryOperator::Mul
    && left.is_constant()
    && matches!(right, Ast::Identifier(_));
  if !implicit {
    out.push(' ');
    out.push_str(op.symbol());
    out.push(' ');
  }
  write_grouped(out, right, right_parens);
}

fn write_unary(out: &mut String, op: UnaryOperator, operand: &Ast) {
  let parens = operator_precedence(operand)
    .is_some_and(|p| UnaryOperator::PRECEDENCE > p);
  if op == UnaryOperator::Minus {
    out.push('-');
  }
  write_grouped(out, operand, parens);
}

fn write_matrix(out: &mut String, rows: &[Vec<Ast>]) {
  out.push('[');
  for (i, row) in rows.iter().enumerate() {
    if i > 0 {
      out.push_str("; ");
    }
    out.push('[');
    for (j, cell) in row.iter().enumerate() {
      if j > 0 {
        out.push_str(", ");
      }
      write_node(out, cell);
    }
    out.push(']');
  }
  out.push(']');
}

fn write_grouped(out: &mut String, node: &Ast, parens: bool) {
  if parens {
    out.push('(');
  }
  write_node(out, node);
  if parens {
    out.push(')');
  }
}

/// A child needs parentheses when it binds no tighter than the parent
/// requires: strictly looser always, equally tight on the side the parent
/// does not associate towards.
fn needs_parens(parent: BinaryOperator, child: &Ast, side: Associativity) -> bool {
  match operator_precedence(child) {
    None => false,
    Some(child_prec) => {
      parent.precedence() > child_prec
        || (parent.precedence() == child_prec
          && parent.associativity() == side)
    }
  }
}

fn operator_precedence(ast: &Ast) -> Option<u8> {
  match ast {
    Ast::BinaryOp { op, .. } => Some(op.precedence()),
    Ast::UnaryOp { .. } => Some(UnaryOperator::PRECEDENCE),
    _ => None,
  }
}
