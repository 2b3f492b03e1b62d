//! # Document — The Line-Oriented Key/Value Text Form
//!
//! Scenes persist as an indentation-significant text format:
//!
//! ```text
//! Scene: Untitled
//! Entities:
//!   - Entity: 5502923938386923709
//!     TagComponent:
//!       Tag: Ace
//!     TransformComponent:
//!       Position: [-206.5, 23, 0]
//! ```
//!
//! This module is the generic half of the codec: it translates between that
//! text and a [`serde_json::Value`] tree, without knowing anything about
//! entities or components. The typed half lives in [`crate::registry`] and
//! [`crate::scene`], which dispatch sub-trees through serde.
//!
//! ## Shape of the tree
//!
//! - `Key: value` — scalar entry (bool, integer, float, or opaque string).
//! - `Key:` followed by deeper-indented lines — nested map, or a sequence if
//!   the deeper lines start with `- `.
//! - `[a, b, c]` — inline list of scalars (vectors).
//!
//! Strings are never reinterpreted: a texture path keeps whatever directory
//! separator it was written with. Blank lines and `#` comments are skipped.
//!
//! ## Numeric formatting
//!
//! On write, floats print with just enough digits to round-trip to the
//! nearest representable 32-bit float; integers print without a decimal
//! point; booleans as literal `true`/`false`. Byte-for-byte stability across
//! a round trip is not promised — only semantic equality of the tree.

use serde_json::{Map, Number, Value};

use crate::error::SceneError;

// ── Parsing ──────────────────────────────────────────────────────────────

/// One significant source line: 1-based number, indentation column, trimmed
/// content.
#[derive(Clone, Copy)]
struct Line<'a> {
    number: usize,
    indent: usize,
    text: &'a str,
}

struct Parser<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
}

/// Parse a document into its top-level map.
///
/// Fails with [`SceneError::MalformedDocument`] on bad indentation, a line
/// without a `key:` separator, a duplicate key, or a tab in indentation.
pub fn parse(source: &str) -> Result<Value, SceneError> {
    let mut lines = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let number = idx + 1;
        let trimmed_end = raw.trim_end();
        let text = trimmed_end.trim_start();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let leading = &trimmed_end[..trimmed_end.len() - text.len()];
        if leading.contains('\t') {
            return Err(malformed(number, "tab character in indentation"));
        }
        lines.push(Line {
            number,
            indent: leading.len(),
            text,
        });
    }

    let mut parser = Parser { lines, pos: 0 };
    if let Some(first) = parser.peek() {
        if first.indent != 0 {
            return Err(malformed(first.number, "unexpected indentation at top level"));
        }
    }
    let map = parser.parse_map(0)?;
    Ok(Value::Object(map))
}

fn malformed(line: usize, detail: impl Into<String>) -> SceneError {
    SceneError::MalformedDocument {
        line,
        detail: detail.into(),
    }
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Line<'a>> {
        self.lines.get(self.pos).copied()
    }

    /// Parse consecutive `key: value` entries at exactly `indent` columns.
    fn parse_map(&mut self, indent: usize) -> Result<Map<String, Value>, SceneError> {
        let mut map = Map::new();
        while let Some(line) = self.peek() {
            if line.indent < indent {
                break;
            }
            if line.indent > indent {
                return Err(malformed(line.number, "unexpected indentation"));
            }
            if is_sequence_item(line.text) {
                return Err(malformed(line.number, "unexpected sequence item"));
            }

            let Some((raw_key, rest)) = line.text.split_once(':') else {
                return Err(malformed(line.number, "expected `key: value`"));
            };
            let key = raw_key.trim_end();
            if key.is_empty() {
                return Err(malformed(line.number, "empty key"));
            }
            if map.contains_key(key) {
                return Err(malformed(line.number, format!("duplicate key `{key}`")));
            }
            self.pos += 1;

            let rest = rest.trim();
            let value = if !rest.is_empty() {
                parse_scalar(rest, line.number)?
            } else {
                match self.peek() {
                    Some(next) if next.indent > indent => {
                        if is_sequence_item(next.text) {
                            Value::Array(self.parse_sequence(next.indent)?)
                        } else {
                            Value::Object(self.parse_map(next.indent)?)
                        }
                    }
                    _ => Value::Null,
                }
            };
            map.insert(key.to_string(), value);
        }
        Ok(map)
    }

    /// Parse consecutive `- ...` items at exactly `indent` columns.
    ///
    /// An item like `- Entity: 42` opens a map whose remaining entries sit on
    /// the following lines, indented to the column just past the dash.
    fn parse_sequence(&mut self, indent: usize) -> Result<Vec<Value>, SceneError> {
        let mut items = Vec::new();
        while let Some(line) = self.peek() {
            if line.indent < indent || !is_sequence_item(line.text) {
                break;
            }
            if line.indent > indent {
                return Err(malformed(line.number, "inconsistent sequence indentation"));
            }

            let inner = line.text[1..].trim_start();
            if inner.is_empty() {
                return Err(malformed(line.number, "empty sequence item"));
            }
            let inner_indent = line.indent + (line.text.len() - inner.len());

            if inner.contains(':') {
                // Rewrite the item head as an ordinary map entry at the inner
                // column, then let parse_map consume it and its siblings.
                self.lines[self.pos] = Line {
                    number: line.number,
                    indent: inner_indent,
                    text: inner,
                };
                items.push(Value::Object(self.parse_map(inner_indent)?));
            } else {
                self.pos += 1;
                items.push(parse_scalar(inner, line.number)?);
            }
        }
        Ok(items)
    }
}

fn is_sequence_item(text: &str) -> bool {
    text == "-" || text.starts_with("- ")
}

/// Parse a scalar token: bool, integer, float, inline list, or opaque string.
fn parse_scalar(token: &str, line: usize) -> Result<Value, SceneError> {
    if token == "true" {
        return Ok(Value::Bool(true));
    }
    if token == "false" {
        return Ok(Value::Bool(false));
    }

    if let Some(inner) = token.strip_prefix('[') {
        let Some(inner) = inner.strip_suffix(']') else {
            return Err(malformed(line, "unterminated `[` list"));
        };
        if inner.trim().is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        let mut items = Vec::new();
        for element in inner.split(',') {
            items.push(parse_scalar(element.trim(), line)?);
        }
        return Ok(Value::Array(items));
    }

    if let Ok(unsigned) = token.parse::<u64>() {
        return Ok(Value::Number(Number::from(unsigned)));
    }
    if let Ok(signed) = token.parse::<i64>() {
        return Ok(Value::Number(Number::from(signed)));
    }
    // Only attempt float parsing on number-shaped tokens, so strings like
    // `nan` or `Seven` stay opaque.
    if token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')
    {
        if let Ok(float) = token.parse::<f64>() {
            if let Some(number) = Number::from_f64(float) {
                return Ok(Value::Number(number));
            }
        }
    }

    Ok(Value::String(token.to_string()))
}

// ── Writing ──────────────────────────────────────────────────────────────

/// Emit a document from its top-level map, with two-space indentation.
pub fn write(root: &Value) -> String {
    let mut out = String::new();
    if let Value::Object(map) = root {
        write_map(&mut out, map, 0);
    }
    out
}

fn write_map(out: &mut String, map: &Map<String, Value>, indent: usize) {
    let pad = " ".repeat(indent);
    for (key, value) in map {
        write_entry(out, &pad, key, value, indent + 2);
    }
}

fn write_seq_item(out: &mut String, map: &Map<String, Value>, indent: usize) {
    let dash = format!("{}- ", " ".repeat(indent));
    let cont = " ".repeat(indent + 2);
    let mut first = true;
    for (key, value) in map {
        let lead = if first { dash.as_str() } else { cont.as_str() };
        first = false;
        write_entry(out, lead, key, value, indent + 4);
    }
}

fn write_entry(out: &mut String, lead: &str, key: &str, value: &Value, child_indent: usize) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            out.push_str(&format!("{lead}{key}:\n"));
            write_map(out, map, child_indent);
        }
        Value::Object(_) | Value::Null => {
            out.push_str(&format!("{lead}{key}:\n"));
        }
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            out.push_str(&format!("{lead}{key}:\n"));
            for item in items {
                if let Value::Object(map) = item {
                    write_seq_item(out, map, child_indent);
                }
            }
        }
        Value::Array(items) => {
            let joined: Vec<String> = items.iter().map(format_scalar).collect();
            out.push_str(&format!("{lead}{key}: [{}]\n", joined.join(", ")));
        }
        scalar => {
            out.push_str(&format!("{lead}{key}: {}\n", format_scalar(scalar)));
        }
    }
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Integers print as integers. Floats that survive an f32 round trip print
/// with f32 precision (the engine stores 32-bit floats); anything else keeps
/// full f64 digits.
fn format_number(number: &Number) -> String {
    if let Some(u) = number.as_u64() {
        return u.to_string();
    }
    if let Some(i) = number.as_i64() {
        return i.to_string();
    }
    let float = number.as_f64().unwrap_or(0.0);
    let narrowed = float as f32;
    if f64::from(narrowed) == float {
        narrowed.to_string()
    } else {
        float.to_string()
    }
}
