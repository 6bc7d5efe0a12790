pub mod classify;
pub mod episode;
pub mod segment;

pub use classify::*;
pub use episode::*;
pub use segment::*;
