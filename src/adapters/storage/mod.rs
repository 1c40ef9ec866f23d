//! Storage adapters - SessionStore implementations.
//!
//! - `InMemorySessionStore` - the process-lifetime registry

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
