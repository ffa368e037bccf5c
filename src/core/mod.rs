pub mod blocking;
pub mod buildcore;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod log;
pub(crate) mod queue;
