//! Storage backends implementing the document store trait

pub mod in_memory;

pub use in_memory::InMemoryStore;
