#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

//! Request orchestration for an interactive code playground.
//!
//! A session owns one code buffer, one active language and one assistant chat
//! transcript. Code runs are submitted to a remote compile service and AI
//! help requests to a text generation backend. Each kind of request is
//! single-flight, and the two never block each other.

pub mod configuration;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use domain::models::Action;
pub use domain::models::Event;
pub use domain::models::Language;
pub use domain::models::SessionError;
pub use domain::models::SessionState;
pub use domain::services::actions::ActionsService;
