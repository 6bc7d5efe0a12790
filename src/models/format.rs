use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a speaker cue is written in an episode's script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CharacterFormat {
    /// `NAME: spoken text`, with the name entirely upper case
    ColonCaps,
    /// `**Name:** spoken text`, colon inside or outside the bold markers
    BoldColon,
    /// No usable script for this episode
    None,
}

impl CharacterFormat {
    /// The tag used in format tables
    pub fn as_tag(&self) -> &'static str {
        match self {
            CharacterFormat::ColonCaps => "CHARACTER_NAME:",
            CharacterFormat::BoldColon => "**CHARACTER_NAME:**",
            CharacterFormat::None => "NONE",
        }
    }
}

impl FromStr for CharacterFormat {
    type Err = ConfigError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim() {
            "CHARACTER_NAME:" => Ok(CharacterFormat::ColonCaps),
            "**CHARACTER_NAME:**" => Ok(CharacterFormat::BoldColon),
            "NONE" => Ok(CharacterFormat::None),
            other => Err(ConfigError::UnknownCharacterFormat(other.to_string())),
        }
    }
}

/// How scene changes are marked in an episode's script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SceneFormat {
    /// "Scene shift", "Blackout" or any mention of "scene"
    SceneKeyword,
    /// A row of dashes
    DashRun,
    /// A row of asterisks
    StarRun,
    /// Slug lines: INT / EXT / Interior / Exterior
    IntExt,
    /// "CUT TO" transitions
    CutTo,
    /// Slug lines or "CUT TO" transitions
    IntExtOrCut,
    /// The whole episode is a single scene
    OneScene,
    /// No scene markers
    None,
}

impl SceneFormat {
    /// The tag used in format tables
    pub fn as_tag(&self) -> &'static str {
        match self {
            SceneFormat::SceneKeyword => "SCENE",
            SceneFormat::DashRun => "DASHES",
            SceneFormat::StarRun => "STARS",
            SceneFormat::IntExt => "INT/EXT",
            SceneFormat::CutTo => "CUT",
            SceneFormat::IntExtOrCut => "INT/EXT/CUT",
            SceneFormat::OneScene => "ONE_SCENE",
            SceneFormat::None => "NONE",
        }
    }
}

impl FromStr for SceneFormat {
    type Err = ConfigError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim() {
            "SCENE" => Ok(SceneFormat::SceneKeyword),
            "DASHES" => Ok(SceneFormat::DashRun),
            "STARS" => Ok(SceneFormat::StarRun),
            "INT/EXT" => Ok(SceneFormat::IntExt),
            "CUT" => Ok(SceneFormat::CutTo),
            "INT/EXT/CUT" => Ok(SceneFormat::IntExtOrCut),
            "ONE_SCENE" => Ok(SceneFormat::OneScene),
            "NONE" => Ok(SceneFormat::None),
            other => Err(ConfigError::UnknownSceneFormat(other.to_string())),
        }
    }
}

macro_rules! tag_conversions {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_tag())
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ConfigError;

            fn try_from(tag: String) -> Result<Self, Self::Error> {
                tag.parse()
            }
        }

        impl From<$ty> for String {
            fn from(format: $ty) -> Self {
                format.as_tag().to_string()
            }
        }
    };
}

tag_conversions!(CharacterFormat);
tag_conversions!(SceneFormat);

/// The pair of grammars that applies to one episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    pub character_format: CharacterFormat,
    pub scene_format: SceneFormat,
}

impl FormatConfig {
    pub fn new(character_format: CharacterFormat, scene_format: SceneFormat) -> Self {
        Self {
            character_format,
            scene_format,
        }
    }

    /// Validate a pair of tags against the closed vocabulary
    pub fn from_tags(character_format: &str, scene_format: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            character_format: character_format.parse()?,
            scene_format: scene_format.parse()?,
        })
    }

    /// Whether the episode has no script to parse
    pub fn has_script(&self) -> bool {
        self.character_format != CharacterFormat::None
    }
}
