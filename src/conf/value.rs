use std::collections::BTreeMap;
use std::collections::btree_map;

use super::error::ConfError;

/// A single configuration value: a scalar or a nested subtree.
///
/// Booleans render as the HOCON tokens `yes`/`no`, matching what the node
/// itself writes into its configuration files.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Bool(bool),
    List(Vec<String>),
    Object(Tree),
}

/// An arbitrarily nested configuration tree with sorted keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree(BTreeMap<String, Value>);

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` at `path`, creating empty subtrees for missing
    /// intermediate segments. The final segment is overwritten
    /// unconditionally, whether it held a scalar or a whole subtree.
    ///
    /// Fails with `TypeConflict` when an intermediate segment already
    /// holds a scalar.
    pub fn set<S: AsRef<str>>(&mut self, path: &[S], value: Value) -> Result<(), ConfError> {
        let Some((last, parents)) = path.split_last() else {
            return Err(ConfError::InvalidKeyPath(String::new()));
        };
        let mut node = &mut self.0;
        for (i, seg) in parents.iter().enumerate() {
            let entry = node
                .entry(seg.as_ref().to_string())
                .or_insert_with(|| Value::Object(Tree::new()));
            node = match entry {
                Value::Object(sub) => &mut sub.0,
                _ => return Err(ConfError::TypeConflict(dotted(&path[..=i]))),
            };
        }
        node.insert(last.as_ref().to_string(), value);
        Ok(())
    }

    /// Point read at `path`. Returns `None` when any segment is missing
    /// or an intermediate segment holds a scalar.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut node = &self.0;
        for seg in parents {
            match node.get(seg.as_ref())? {
                Value::Object(sub) => node = &sub.0,
                _ => return None,
            }
        }
        node.get(last.as_ref())
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

fn dotted<S: AsRef<str>>(path: &[S]) -> String {
    let parts: Vec<&str> = path.iter().map(|s| s.as_ref()).collect();
    parts.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_creates_intermediate_subtrees() {
        let mut tree = Tree::new();
        tree.set(&["a", "b", "c"], Value::Str("v".into())).unwrap();
        assert_eq!(tree.get(&["a", "b", "c"]), Some(&Value::Str("v".into())));
    }

    #[test]
    fn set_is_idempotent() {
        let mut once = Tree::new();
        once.set(&["a", "b"], Value::Str("v".into())).unwrap();

        let mut twice = Tree::new();
        twice.set(&["a", "b"], Value::Str("v".into())).unwrap();
        twice.set(&["a", "b"], Value::Str("v".into())).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn set_overwrites_scalar_at_final_segment() {
        let mut tree = Tree::new();
        tree.set(&["a"], Value::Str("old".into())).unwrap();
        tree.set(&["a"], Value::Bool(true)).unwrap();
        assert_eq!(tree.get(&["a"]), Some(&Value::Bool(true)));
    }

    #[test]
    fn set_overwrites_subtree_at_final_segment() {
        let mut tree = Tree::new();
        tree.set(&["a", "b"], Value::Str("v".into())).unwrap();
        tree.set(&["a"], Value::Str("flat".into())).unwrap();
        assert_eq!(tree.get(&["a"]), Some(&Value::Str("flat".into())));
        assert_eq!(tree.get(&["a", "b"]), None);
    }

    #[test]
    fn set_rejects_descending_through_scalar() {
        let mut tree = Tree::new();
        tree.set(&["a"], Value::Str("v".into())).unwrap();
        let err = tree.set(&["a", "b"], Value::Str("x".into())).unwrap_err();
        assert!(matches!(err, ConfError::TypeConflict(ref p) if p == "a"));
    }

    #[test]
    fn get_missing_path_is_none() {
        let mut tree = Tree::new();
        tree.set(&["a", "b"], Value::Str("v".into())).unwrap();
        assert_eq!(tree.get(&["a", "x"]), None);
        assert_eq!(tree.get(&["z"]), None);
        assert_eq!(tree.get(&["a", "b", "deeper"]), None);
    }
}
