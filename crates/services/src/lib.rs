#![forbid(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod remote;
pub mod tracker;

pub use progress_core::Clock;

pub use auth::{AuthResolver, SessionService};
pub use config::ProgressApiConfig;
pub use error::{ConfigError, RemoteError, SessionError, TrackerError};
pub use remote::{HttpProgressApi, ProgressBlobs, RemoteProgress, RemoteProgressApi};
pub use tracker::ProgressTracker;
