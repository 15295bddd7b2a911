// src/print.rs
//
// Renders a parsed tree as an indented branch diagram for the CLI. Not a
// serializer: the output is a structural dump, not JSON text.

use crate::value::Value;

const INDENT: &str = "   ";

// Conservative 8/16-color palette for broad terminal compatibility.
const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_NULL: &str = "39";

/// Format the tree, one node per line, children connected with `├─`/`└─`.
/// With `use_color` off the output contains no escape sequences.
pub fn format_tree(root: &Value, use_color: bool) -> String {
    let mut out = String::new();
    write_node(root, None, 0, true, use_color, &mut out);
    out
}

fn write_node(
    node: &Value,
    key: Option<&str>,
    depth: usize,
    last: bool,
    use_color: bool,
    out: &mut String,
) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(if last { "└─ " } else { "├─ " });
    out.push_str(label(node));

    if let Some(key) = key {
        out.push_str(" key=");
        push_colored(&format!("\"{key}\""), COLOR_KEY, use_color, out);
    }

    match node {
        Value::String(s) => {
            out.push_str(" : ");
            push_colored(&format!("\"{s}\""), COLOR_STRING, use_color, out);
        }
        Value::Number(n) => {
            out.push_str(" : ");
            push_colored(&n.to_string(), COLOR_NUMBER, use_color, out);
        }
        Value::Boolean(b) => {
            out.push_str(" : ");
            push_colored(if *b { "true" } else { "false" }, COLOR_BOOL, use_color, out);
        }
        Value::Null => {
            out.push_str(" : ");
            push_colored("null", COLOR_NULL, use_color, out);
        }
        Value::Array(_) | Value::Object(_) => {}
    }
    out.push('\n');

    match node {
        Value::Array(elements) => {
            let len = elements.len();
            for (idx, child) in elements.iter().enumerate() {
                write_node(child, None, depth + 1, idx + 1 == len, use_color, out);
            }
        }
        Value::Object(members) => {
            let len = members.len();
            for (idx, (name, child)) in members.iter().enumerate() {
                write_node(child, Some(name), depth + 1, idx + 1 == len, use_color, out);
            }
        }
        _ => {}
    }
}

fn label(node: &Value) -> &'static str {
    match node {
        Value::Null => "NULL",
        Value::Boolean(_) => "BOOL",
        Value::Number(_) => "NUMBER",
        Value::String(_) => "STRING",
        Value::Array(_) => "ARRAY",
        Value::Object(_) => "OBJECT",
    }
}

fn push_colored(text: &str, color: &str, use_color: bool, out: &mut String) {
    if !use_color {
        out.push_str(text);
        return;
    }
    out.push_str("\u{1b}[");
    out.push_str(color);
    out.push('m');
    out.push_str(text);
    out.push_str("\u{1b}[0m");
}
