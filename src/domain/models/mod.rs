mod action;
mod backend;
mod compiler;
mod error;
mod event;
mod language;
mod lifecycle;
mod message;
mod role;
mod session;
mod store;

pub use action::*;
pub use backend::*;
pub use compiler::*;
pub use error::*;
pub use event::*;
pub use language::*;
pub use lifecycle::*;
pub use message::*;
pub use role::*;
pub use session::*;
pub use store::*;
