//! `warden-core` — identifier and error primitives shared by the engine and
//! the fact providers that feed it.
//!
//! This crate contains **no** authorization logic and no I/O.

pub mod clock;
pub mod error;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{InvalidId, ProviderError};
pub use id::{ProjectId, SsoProviderId, UserId, WorkspaceId};
