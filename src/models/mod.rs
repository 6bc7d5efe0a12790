pub mod format;
pub mod transcript;
pub mod utterance;

pub use format::*;
pub use transcript::*;
pub use utterance::*;
