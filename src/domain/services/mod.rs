pub mod actions;
mod assist;
mod execution;
#[cfg(test)]
mod fakes;

pub use assist::*;
pub use execution::*;
