//! Configuration traits and the push receiver configuration

pub mod receiver;
pub mod traits;

pub use receiver::{ReceiverConfig, MAX_TIMEOUT_MS};
pub use traits::HeraldConfig;
