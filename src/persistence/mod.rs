//! Persistence
//!
//! Converts the session to and from its serialized form and manages the
//! state file on disk.

pub mod codec;
pub mod store;

pub use codec::{NodeRecord, StateRecord, deserialize, serialize};
pub use store::StateStore;
