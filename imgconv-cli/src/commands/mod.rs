//! CLI command implementations

mod batch;
mod convert;
mod info;

pub use batch::batch;
pub use convert::convert;
pub use info::info;
