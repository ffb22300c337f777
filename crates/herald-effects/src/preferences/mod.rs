//! Preference lookup handlers

pub mod memory;

pub use memory::MemoryPreferenceStore;
