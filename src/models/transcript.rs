use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Scene, Utterance};

/// Season and episode number of one episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EpisodeId {
    pub season_num: u32,
    pub episode_num: u32,
}

impl EpisodeId {
    pub fn new(season_num: u32, episode_num: u32) -> Self {
        Self {
            season_num,
            episode_num,
        }
    }

    /// Key of the form `sNNeNN`
    pub fn key(&self) -> String {
        format!("s{:02}e{:02}", self.season_num, self.episode_num)
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{:02}e{:02}", self.season_num, self.episode_num)
    }
}

/// Parsed dialogue of a single episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeTranscript {
    pub id: EpisodeId,
    /// `sNNeNN`
    pub key: String,
    /// Lines spoken by each character, in source order
    pub character_lines: BTreeMap<String, Vec<Utterance>>,
    /// Scenes in source order
    pub scenes: Vec<Scene>,
}

impl EpisodeTranscript {
    /// A transcript with no dialogue
    pub fn empty(id: EpisodeId) -> Self {
        Self {
            id,
            key: id.key(),
            character_lines: BTreeMap::new(),
            scenes: Vec::new(),
        }
    }

    pub fn season_num(&self) -> u32 {
        self.id.season_num
    }

    pub fn episode_num(&self) -> u32 {
        self.id.episode_num
    }

    /// Get the lines of a character, if they speak in this episode
    pub fn lines_of(&self, character_name: &str) -> Option<&[Utterance]> {
        self.character_lines.get(character_name).map(Vec::as_slice)
    }

    /// Names of every character that speaks, sorted
    pub fn character_names(&self) -> impl Iterator<Item = &str> {
        self.character_lines.keys().map(String::as_str)
    }

    /// All utterances in source order
    pub fn utterances(&self) -> impl Iterator<Item = &Utterance> {
        self.scenes.iter().flat_map(|s| s.utterances.iter())
    }

    /// Total number of attributed lines
    pub fn total_lines(&self) -> usize {
        self.character_lines.values().map(Vec::len).sum()
    }

    pub fn num_scenes(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.character_lines.is_empty()
    }
}

/// Outcome of parsing one episode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeParse {
    /// The script was parsed
    Complete(EpisodeTranscript),
    /// The episode is flagged as having no script; the transcript is empty
    NoScript(EpisodeTranscript),
}

impl EpisodeParse {
    pub fn transcript(&self) -> &EpisodeTranscript {
        match self {
            EpisodeParse::Complete(t) | EpisodeParse::NoScript(t) => t,
        }
    }

    pub fn into_transcript(self) -> EpisodeTranscript {
        match self {
            EpisodeParse::Complete(t) | EpisodeParse::NoScript(t) => t,
        }
    }

    /// Whether the episode was skipped for lack of a script
    pub fn is_skipped(&self) -> bool {
        matches!(self, EpisodeParse::NoScript(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_key_is_zero_padded() {
        assert_eq!(EpisodeId::new(1, 2).key(), "s01e02");
        assert_eq!(EpisodeId::new(8, 10).to_string(), "s08e10");
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = EpisodeTranscript::empty(EpisodeId::new(3, 9));

        assert_eq!(transcript.key, "s03e09");
        assert!(transcript.is_empty());
        assert_eq!(transcript.total_lines(), 0);
        assert_eq!(transcript.num_scenes(), 0);
        assert!(transcript.lines_of("Robb").is_none());
    }
}
