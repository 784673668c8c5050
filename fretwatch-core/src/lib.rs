pub mod error;
pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod types;

pub use error::*;
pub use matcher::*;
pub use normalize::*;
pub use pipeline::*;
pub use types::*;
