//! Out-of-store message ingestion handlers

pub mod memory;

pub use memory::{AppMessage, MemoryEventIngestor};
