//! Model module - the scoring artifact and the scorer around it

pub mod artifact;
pub mod error;
pub mod scorer;

pub use artifact::*;
pub use error::*;
pub use scorer::*;
