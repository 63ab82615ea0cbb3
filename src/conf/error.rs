#[derive(thiserror::Error, Debug)]
/// An error occurred building or parsing a configuration tree.
pub enum ConfError {
    /// An overlay variable name decoded to an empty key segment
    #[error("invalid key path {0:?}: empty segment")]
    InvalidKeyPath(String),
    /// A path descends through a key that already holds a scalar
    #[error("type conflict at {0:?}: cannot descend into a non-object value")]
    TypeConflict(String),
    /// The configuration text could not be parsed
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}
