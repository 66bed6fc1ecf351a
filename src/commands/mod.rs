pub mod action;
pub mod args;
pub mod status;

pub use action::*;
pub use args::*;
pub use status::*;
