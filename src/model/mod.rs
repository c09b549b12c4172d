//! Pure data structures (DTOs) flowing through the generation pipeline.

pub mod batch;
pub mod content;
pub mod product;

pub use batch::*;
pub use content::*;
pub use product::*;
