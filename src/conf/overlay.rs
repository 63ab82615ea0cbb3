use super::error::ConfError;
use super::path::KeyPath;
use super::value::{Tree, Value};
use crate::env::EnvSnapshot;

/// Fold every eligible environment variable into `tree`.
///
/// A variable is eligible when its name contains a `__` separator; the
/// decoded path and coerced value are written through the nested setter.
/// Each applied override is logged for audit visibility.
pub fn apply_overlay(tree: &mut Tree, env: &EnvSnapshot) -> Result<(), ConfError> {
    for (name, raw) in env.iter() {
        let Some(path) = KeyPath::decode(name)? else {
            continue;
        };
        tracing::info!(name, value = raw, "environment override");
        tree.set(path.segments(), coerce(raw))?;
    }
    Ok(())
}

/// Scalar coercion: `true`/`false` become boolean tokens, a bracketed
/// value becomes a literal list of strings, anything else stays raw.
fn coerce(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Some(items) = parse_list_literal(raw) {
        return Value::List(items);
    }
    Value::Str(raw.to_string())
}

fn parse_list_literal(raw: &str) -> Option<Vec<String>> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return Some(Vec::new());
    }
    Some(
        trimmed
            .split(',')
            .map(|item| strip_quotes(item.trim()).to_string())
            .collect(),
    )
}

fn strip_quotes(item: &str) -> &str {
    let bytes = item.as_bytes();
    if bytes.len() >= 2
        && ((bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\''))
    {
        &item[1..item.len() - 1]
    } else {
        item
    }
}
