pub mod cast;
pub mod roster;
pub mod seasons;

pub use cast::*;
pub use roster::*;
pub use seasons::*;
