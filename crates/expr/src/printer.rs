//! Tree printing and query rendering
//!
//! `lines` and `formatted` produce the depth-first pretty print used in
//! debug logs: one line per node, two spaces of indent per level.
//! `render` rebuilds a query string from the tree.

use crate::arena::ExprArena;
use crate::node::{NodeId, NodeKind};

const PREFIX: &str = "  ";

/// One line per node, depth-first, indented by depth
pub fn lines(arena: &ExprArena, root: NodeId) -> Vec<String> {
    let mut out = Vec::with_capacity(32);
    arena.walk(root, |id, depth| {
        out.push(format!("{}{}", PREFIX.repeat(depth), arena.kind(id).label()));
    });
    out
}

/// The pretty print as a single string, starting with a newline
pub fn formatted(arena: &ExprArena, root: NodeId) -> String {
    let mut out = String::from("\n");
    for line in lines(arena, root) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Rebuild a query string, e.g. `FOO == 'bar' && (A == '1' || B == '2')`
pub fn render(arena: &ExprArena, root: NodeId) -> String {
    let mut out = String::new();
    render_into(arena, root, &mut out);
    out
}

fn render_into(arena: &ExprArena, id: NodeId, out: &mut String) {
    let children = arena.children(id);
    match arena.kind(id) {
        NodeKind::Script | NodeKind::Reference => {
            for &child in children {
                render_into(arena, child, out);
            }
        }
        NodeKind::ReferenceExpression => {
            out.push('(');
            for &child in children {
                render_into(arena, child, out);
            }
            out.push(')');
        }
        NodeKind::And | NodeKind::Or => {
            let op = if matches!(arena.kind(id), NodeKind::And) {
                " && "
            } else {
                " || "
            };
            for (i, &child) in children.iter().enumerate() {
                if i > 0 {
                    out.push_str(op);
                }
                // a nested junction of the other kind needs parens to keep precedence
                let nested = arena.kind(child).is_junction() && arena.kind(child) != arena.kind(id);
                if nested {
                    out.push('(');
                }
                render_into(arena, child, out);
                if nested {
                    out.push(')');
                }
            }
        }
        NodeKind::Not => {
            out.push('!');
            for &child in children {
                render_into(arena, child, out);
            }
        }
        NodeKind::Identifier(name) => out.push_str(name),
        NodeKind::StringLiteral(value) => {
            out.push('\'');
            out.push_str(&value.replace('\'', "\\'"));
            out.push('\'');
        }
        NodeKind::NumberLiteral(value) => out.push_str(&value.to_string()),
        NodeKind::Function { namespace, name } => {
            out.push_str(namespace);
            out.push(':');
            out.push_str(name);
            out.push('(');
            for (i, &child) in children.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_into(arena, child, out);
            }
            out.push(')');
        }
        kind => {
            // binary comparisons
            let op = kind.operator().unwrap_or("?");
            for (i, &child) in children.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                    out.push_str(op);
                    out.push(' ');
                }
                render_into(arena, child, out);
            }
        }
    }
}
