//! Command handlers for the deskline CLI

mod departments;
#[cfg(feature = "api")]
mod serve;

pub use departments::handle_departments;
#[cfg(feature = "api")]
pub use serve::handle_serve;
