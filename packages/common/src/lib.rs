pub mod error;
pub mod filesystem;
pub mod presentation;
pub mod result;
pub mod visitor;

pub use error::*;
pub use filesystem::*;
pub use result::*;
pub use visitor::*;
