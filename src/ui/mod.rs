pub mod tree;
pub mod viewport;

pub use tree::{flatten, Row};
pub use viewport::Viewport;
