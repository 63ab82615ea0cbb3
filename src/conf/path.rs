use super::error::ConfError;

/// Separator between nested key segments in an overlay variable name.
pub const SEPARATOR: &str = "__";

/// An ordered sequence of normalized key segments decoded from a
/// `__`-delimited environment variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Decode a variable name into nested key segments.
    ///
    /// Returns `Ok(None)` for names without a `__` separator — those are
    /// not eligible for nested decoding and are skipped by the overlay
    /// builder. Segments are lowercased with underscores replaced by
    /// hyphens. An empty segment (consecutive, leading, or trailing
    /// separators) is rejected outright: a misspelt variable should fail
    /// the run, not write a key the node then chokes on.
    pub fn decode(name: &str) -> Result<Option<Self>, ConfError> {
        if !name.contains(SEPARATOR) {
            return Ok(None);
        }
        let mut segments = Vec::new();
        for part in name.split(SEPARATOR) {
            if part.is_empty() {
                return Err(ConfError::InvalidKeyPath(name.to_string()));
            }
            segments.push(part.to_ascii_lowercase().replace('_', "-"));
        }
        Ok(Some(KeyPath(segments)))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}
