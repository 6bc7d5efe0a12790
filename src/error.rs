use thiserror::Error;

/// Errors raised while reading the per-episode format vocabulary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The character format tag is not one of the known dialogue grammars
    #[error(
        "unrecognised character format {0:?} (expected one of \"CHARACTER_NAME:\", \"**CHARACTER_NAME:**\", \"NONE\")"
    )]
    UnknownCharacterFormat(String),

    /// The scene format tag is not one of the known boundary grammars
    #[error(
        "unrecognised scene format {0:?} (expected one of \"SCENE\", \"DASHES\", \"STARS\", \"INT/EXT\", \"CUT\", \"INT/EXT/CUT\", \"ONE_SCENE\", \"NONE\")"
    )]
    UnknownSceneFormat(String),
}

/// A single line matched the speaker-cue grammar more than once
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{cues} speaker cues on a single line")]
pub struct AmbiguousCue {
    /// Number of cue matches found on the line
    pub cues: usize,
}

/// Errors raised while parsing an episode's lines
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The speaker of a line cannot be attributed
    #[error("line {line_number} cannot be attributed: {line:?}")]
    AmbiguousCue {
        /// 1-based line number in the episode source
        line_number: usize,
        /// The offending line, untrimmed
        line: String,
        #[source]
        source: AmbiguousCue,
    },
}
