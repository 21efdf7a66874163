//! Block library: definitions, registry and socket compatibility
//!
//! Everything here is authored/validated before a generation run starts and
//! is read-only while the generator runs.

mod block;
mod compat;
mod registry;

pub use block::{BlockDefinition, Direction, SocketLabel, SocketSet};
pub use compat::SocketCompatibilityTable;
pub use registry::BlockCatalog;
