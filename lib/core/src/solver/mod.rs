pub use api::*;
pub use types::*;

mod api;
pub mod mock;
mod types;
