pub mod aggregate;
pub mod error;
pub mod io;
pub mod models;
pub mod names;
pub mod parser;

pub use aggregate::{CastConfig, CharacterProfile, CharacterRoster, episodes_per_season};
pub use error::{AmbiguousCue, ConfigError, ParseError};
pub use io::{
    EpisodeReport, EpisodeSummary, FailedEpisode, FormatTable, RunReport, read_script, script_path,
};
pub use models::{
    CharacterFormat, EpisodeId, EpisodeParse, EpisodeTranscript, FormatConfig, Scene, SceneFormat,
    Utterance,
};
pub use names::{NameConfig, NameNormalizer};
pub use parser::{classify, is_scene_boundary, parse_episode, parse_script};
