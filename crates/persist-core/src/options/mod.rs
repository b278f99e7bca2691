//! Options objects the host passes to providers

mod host;
mod retry;
mod session_options;

pub use host::{DatabaseConfigurationOptions, LockingBehavior};
pub use retry::RetryPolicy;
pub use session_options::{SessionOptions, SessionOptionsBuilder};
