use serde::{Deserialize, Serialize};

/// One line of dialogue attributed to a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// Canonical speaker name
    pub character_name: String,
    /// The spoken text, trimmed
    pub text: String,
    pub season_num: u32,
    pub episode_num: u32,
}

impl Utterance {
    /// Number of whitespace-separated words in the spoken text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// A contiguous run of utterances between two scene boundaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub season_num: u32,
    pub episode_num: u32,
    /// Utterances in source order, never empty once the scene is finalized
    pub utterances: Vec<Utterance>,
}

impl Scene {
    pub fn new(season_num: u32, episode_num: u32) -> Self {
        Self {
            season_num,
            episode_num,
            utterances: Vec::new(),
        }
    }

    /// Speakers of this scene, de-duplicated, in order of first appearance
    pub fn characters(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for utterance in &self.utterances {
            if !names.contains(&utterance.character_name.as_str()) {
                names.push(&utterance.character_name);
            }
        }
        names
    }

    /// Whether the given character speaks in this scene
    pub fn has_speaker(&self, character_name: &str) -> bool {
        self.utterances
            .iter()
            .any(|u| u.character_name == character_name)
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }
}
