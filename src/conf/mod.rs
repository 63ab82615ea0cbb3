/// Nested configuration document model behind the node's `local.conf`.
///
/// Layer order (later wins):
/// 1. Wallet fields carried forward from the previous run's file
/// 2. `FOO__BAR`-shaped environment variable overlay
/// 3. Forced values — directories, resolved wallet, declared address
///
/// Trees are keyed by `BTreeMap`, so rendering is deterministic: two runs
/// with identical inputs produce byte-identical files.
mod error;
mod hocon;
mod overlay;
mod path;
mod value;

pub use error::ConfError;
pub use hocon::{parse, render};
pub use overlay::apply_overlay;
pub use path::KeyPath;
pub use value::{Tree, Value};
