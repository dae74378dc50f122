use super::{balanced_end, generic_end};
use crate::types::{StateKind, StateVar};
use once_cell::sync::Lazy;
use regex::Regex;

static STATE_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"const\s+\[\s*(\w+)\s*,\s*(\w+)\s*\]\s*=\s*(?:React\.)?(useState|useReducer)\b")
        .unwrap()
});

static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").unwrap());

/// Extract `useState`/`useReducer` declarations in source order
#[must_use]
pub fn extract_state(code: &str) -> Vec<StateVar> {
    let mut vars = Vec::new();

    for caps in STATE_DECLARATION.captures_iter(code) {
        let (Some(whole), Some(name), Some(setter), Some(call)) =
            (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
        else {
            continue;
        };
        let kind = if call.as_str() == "useReducer" {
            StateKind::UseReducer
        } else {
            StateKind::UseState
        };

        let (explicit, arguments) = call_parts(code, whole.end());
        let (ty, initial) = match kind {
            StateKind::UseState => {
                let initial = single_line(arguments);
                let ty = match explicit {
                    Some(ty) => single_line(ty),
                    None => infer_type(&initial),
                };
                (ty, initial)
            }
            StateKind::UseReducer => {
                ("Reducer".to_string(), single_line(&first_argument(arguments)))
            }
        };

        vars.push(StateVar {
            name: name.as_str().to_string(),
            setter: setter.as_str().to_string(),
            ty,
            initial,
            kind,
        });
    }

    vars
}

/// Explicit generic annotation and raw argument text of the call starting at `from`
fn call_parts(code: &str, from: usize) -> (Option<&str>, &str) {
    let mut pos = skip_whitespace(code, from);
    let mut explicit = None;

    if code[pos..].starts_with('<') {
        if let Some(end) = generic_end(code, pos) {
            explicit = Some(code[pos + 1..end - 1].trim()).filter(|t| !t.is_empty());
            pos = skip_whitespace(code, end);
        }
    }

    if !code[pos..].starts_with('(') {
        return (explicit, "");
    }
    // Unclosed call: no initializer rather than the rest of the file
    let arguments = balanced_end(code, pos).map_or("", |end| &code[pos + 1..end - 1]);
    (explicit, arguments)
}

/// Collapse runs of whitespace, newlines included, to single spaces
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn skip_whitespace(code: &str, from: usize) -> usize {
    code[from..]
        .find(|c: char| !c.is_whitespace())
        .map_or(code.len(), |offset| from + offset)
}

/// Text of the first top-level argument
fn first_argument(arguments: &str) -> String {
    let mut depth = 0i32;
    for (i, c) in arguments.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => return arguments[..i].trim().to_string(),
            _ => {}
        }
    }
    arguments.trim().to_string()
}

/// Infer a type name from the literal shape of an initializer expression
#[must_use]
pub fn infer_type(initial: &str) -> String {
    let initial = initial.trim();
    let ty = match initial {
        "" => "unknown",
        "true" | "false" => "boolean",
        "null" | "undefined" => "nullable",
        "[]" => "Array",
        "{}" => "Object",
        s if s.starts_with('\'') || s.starts_with('"') || s.starts_with('`') => "string",
        s if NUMERIC_LITERAL.is_match(s) => "number",
        s if s.starts_with('{') => "Object",
        s if s.starts_with('[') => "Array",
        s if s.starts_with("new Date") => "Date",
        s => s,
    };
    ty.to_string()
}
