//! Provider and session traits (ports)
//!
//! The host depends on these traits only; backend crates provide the
//! implementations.

mod provider;
mod session;

pub use provider::DatabaseProvider;
pub use session::{Connector, Session, SessionFactory};
