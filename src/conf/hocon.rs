//! Reader and writer for the HOCON subset the bootstrap round-trips.
//!
//! The writer emits `key = value` lines and `key { ... }` blocks with
//! two-space indentation, strings quoted, booleans as bare `yes`/`no`,
//! and keys in sorted order. The parser additionally accepts `key: value`,
//! dotted keys (`a.b.c = v`), `#` and `//` comments, and `true`/`false`
//! for booleans. Unquoted values run to end of line, so values containing
//! `//` must be quoted — the writer always quotes.

use super::error::ConfError;
use super::value::{Tree, Value};

/// Render a tree to configuration text with deterministic key order.
pub fn render(tree: &Tree) -> String {
    let mut out = String::new();
    render_tree(tree, 0, &mut out);
    out
}

fn render_tree(tree: &Tree, depth: usize, out: &mut String) {
    for (key, value) in tree.iter() {
        push_indent(depth, out);
        push_key(key, out);
        match value {
            Value::Object(sub) => {
                out.push_str(" {\n");
                render_tree(sub, depth + 1, out);
                push_indent(depth, out);
                out.push_str("}\n");
            }
            Value::Str(s) => {
                out.push_str(" = ");
                push_quoted(s, out);
                out.push('\n');
            }
            Value::Bool(b) => {
                out.push_str(" = ");
                out.push_str(if *b { "yes" } else { "no" });
                out.push('\n');
            }
            Value::List(items) => {
                out.push_str(" = [");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    push_quoted(item, out);
                }
                out.push_str("]\n");
            }
        }
    }
}

fn push_key(key: &str, out: &mut String) {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if bare {
        out.push_str(key);
    } else {
        push_quoted(key, out);
    }
}

fn push_quoted(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Parse configuration text into a tree.
pub fn parse(input: &str) -> Result<Tree, ConfError> {
    Parser::new(input).parse_tree(true)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn err(&self, message: impl Into<String>) -> ConfError {
        ConfError::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    fn at_comment(&self) -> bool {
        self.peek() == Some('#') || (self.peek() == Some('/') && self.peek_at(1) == Some('/'))
    }

    fn skip_to_eol(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_blank(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                _ if self.at_comment() => self.skip_to_eol(),
                _ => break,
            }
        }
    }

    fn skip_inline_ws(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.bump();
        }
    }

    fn parse_tree(&mut self, root: bool) -> Result<Tree, ConfError> {
        let mut tree = Tree::new();
        loop {
            self.skip_blank();
            match self.peek() {
                None if root => return Ok(tree),
                None => return Err(self.err("unexpected end of input, expected '}'")),
                Some('}') if !root => {
                    self.bump();
                    return Ok(tree);
                }
                Some('}') => return Err(self.err("unexpected '}'")),
                Some(',') => {
                    self.bump();
                }
                _ => self.parse_entry(&mut tree)?,
            }
        }
    }

    fn parse_entry(&mut self, tree: &mut Tree) -> Result<(), ConfError> {
        let path = self.parse_key_path()?;
        self.skip_inline_ws();
        let value = match self.peek() {
            Some('{') => {
                self.bump();
                Value::Object(self.parse_tree(false)?)
            }
            Some('=') | Some(':') => {
                self.bump();
                self.skip_inline_ws();
                self.parse_value()?
            }
            _ => {
                return Err(
                    self.err(format!("expected '=', ':' or '{{' after key {:?}", path.join(".")))
                );
            }
        };
        tree.set(&path, value)
    }

    fn parse_key_path(&mut self) -> Result<Vec<String>, ConfError> {
        let mut parts = vec![self.parse_key()?];
        while self.peek() == Some('.') {
            self.bump();
            parts.push(self.parse_key()?);
        }
        Ok(parts)
    }

    fn parse_key(&mut self) -> Result<String, ConfError> {
        if self.peek() == Some('"') {
            return self.parse_quoted();
        }
        let mut key = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                key.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if key.is_empty() {
            return Err(self.err("expected a key"));
        }
        Ok(key)
    }

    fn parse_quoted(&mut self) -> Result<String, ConfError> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.err("unterminated string")),
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(other) => return Err(self.err(format!("unsupported escape \\{other}"))),
                    None => return Err(self.err("unterminated string")),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, ConfError> {
        match self.peek() {
            Some('[') => self.parse_list(),
            Some('"') => Ok(Value::Str(self.parse_quoted()?)),
            _ => self.parse_bare_scalar(),
        }
    }

    fn parse_list(&mut self) -> Result<Value, ConfError> {
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_blank();
            match self.peek() {
                None => return Err(self.err("unterminated list")),
                Some(']') => {
                    self.bump();
                    return Ok(Value::List(items));
                }
                Some(',') => {
                    self.bump();
                }
                Some('"') => items.push(self.parse_quoted()?),
                Some(_) => {
                    let mut item = String::new();
                    while let Some(c) = self.peek() {
                        if c == ',' || c == ']' || c == '\n' {
                            break;
                        }
                        item.push(c);
                        self.bump();
                    }
                    let trimmed = item.trim();
                    if trimmed.is_empty() {
                        return Err(self.err("empty list item"));
                    }
                    items.push(trimmed.to_string());
                }
            }
        }
    }

    fn parse_bare_scalar(&mut self) -> Result<Value, ConfError> {
        let mut raw = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' || c == ',' || c == '}' || self.at_comment() {
                break;
            }
            raw.push(c);
            self.bump();
        }
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(self.err("expected a value"));
        }
        Ok(match trimmed {
            "yes" | "true" => Value::Bool(true),
            "no" | "false" => Value::Bool(false),
            other => Value::Str(other.to_string()),
        })
    }
}
