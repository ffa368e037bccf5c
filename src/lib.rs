pub mod core;

pub use crate::core::blocking::{BlockingQueue, SharedQueue};
pub use crate::core::buildcore::QueueBuilder;
pub use crate::core::error::{
    ConfigError, PopError, PopTimeoutError, PushError, PushTimeoutError, TryPopError, TryPushError,
};
