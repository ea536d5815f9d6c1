//! Commands Layer
//!
//! Data access operations used by the route handlers.

mod category_cmd;
mod item_cmd;

pub use category_cmd::*;
pub use item_cmd::*;
