pub mod compose;
pub mod serve;

pub use compose::{ComposeOptions, compose};
pub use serve::serve;
