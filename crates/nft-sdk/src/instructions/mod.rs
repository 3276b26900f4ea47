pub mod builder;
/// Instruction builders for the metadata program and the mint transaction
pub mod metadata;
pub mod mint;

pub use builder::*;
pub use metadata::*;
pub use mint::*;
