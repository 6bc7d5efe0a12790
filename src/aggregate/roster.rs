use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::CastConfig;
use crate::models::{EpisodeTranscript, Utterance};

/// Everything known about one character across the parsed episodes
#[derive(Debug, Clone, Default, Serialize)]
pub struct CharacterProfile {
    pub name: String,
    /// Lines per episode key; episodes where the character is silent are absent
    pub episode_lines: BTreeMap<String, Vec<Utterance>>,
    /// Number of scenes the character speaks in
    pub num_scenes: usize,
    /// Shared scenes with every other character
    pub scene_appearances: BTreeMap<String, usize>,
    /// Lower-cased word frequencies over all lines
    pub word_counts: BTreeMap<String, usize>,
    /// Episode key the character dies in; `None` while alive
    pub episode_death: Option<String>,
}

impl CharacterProfile {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Lines spoken in one episode
    pub fn line_count(&self, episode_key: &str) -> usize {
        self.episode_lines.get(episode_key).map_or(0, Vec::len)
    }

    /// Lines spoken across all episodes
    pub fn total_lines(&self) -> usize {
        self.episode_lines.values().map(Vec::len).sum()
    }

    /// Number of distinct words used
    pub fn unique_words(&self) -> usize {
        self.word_counts.len()
    }

    /// Death episode key, or "alive"
    pub fn status(&self) -> &str {
        self.episode_death.as_deref().unwrap_or("alive")
    }
}

/// Characters merged across episodes by canonical name
#[derive(Debug, Clone, Default, Serialize)]
pub struct CharacterRoster {
    pub characters: BTreeMap<String, CharacterProfile>,
}

impl CharacterRoster {
    /// Merge the transcripts of many episodes
    pub fn from_transcripts<'a, I>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = &'a EpisodeTranscript>,
        I::IntoIter: Clone,
    {
        let transcripts = transcripts.into_iter();
        let mut roster = Self::default();

        for transcript in transcripts.clone() {
            roster.add_episode_lines(transcript);
        }
        for transcript in transcripts {
            roster.add_scene_interactions(transcript);
        }

        roster
    }

    fn add_episode_lines(&mut self, transcript: &EpisodeTranscript) {
        for (name, lines) in &transcript.character_lines {
            let profile = self
                .characters
                .entry(name.clone())
                .or_insert_with(|| CharacterProfile::new(name));

            for line in lines {
                for word in line.text.split_whitespace() {
                    *profile.word_counts.entry(word.to_lowercase()).or_insert(0) += 1;
                }
            }
            profile
                .episode_lines
                .entry(transcript.key.clone())
                .or_default()
                .extend(lines.iter().cloned());
        }
    }

    fn add_scene_interactions(&mut self, transcript: &EpisodeTranscript) {
        for scene in &transcript.scenes {
            let present: BTreeSet<&str> = scene.characters().into_iter().collect();

            for name in &present {
                let Some(profile) = self.characters.get_mut(*name) else {
                    continue;
                };
                profile.num_scenes += 1;

                for other in present.iter().filter(|other| *other != name) {
                    *profile
                        .scene_appearances
                        .entry(other.to_string())
                        .or_insert(0) += 1;
                }
            }
        }
    }

    /// Record the death episode of every character listed in `cast`
    pub fn with_deaths(mut self, cast: &CastConfig) -> Self {
        for (name, profile) in &mut self.characters {
            profile.episode_death = cast.death_of(name).map(str::to_string);
        }
        self
    }

    /// Main characters present in the roster, in cast-list order
    pub fn main_characters(&self, cast: &CastConfig) -> Vec<&CharacterProfile> {
        self.select(&cast.main_characters)
    }

    /// Minor characters present in the roster, in cast-list order
    pub fn minor_characters(&self, cast: &CastConfig) -> Vec<&CharacterProfile> {
        self.select(&cast.minor_characters)
    }

    fn select(&self, names: &[String]) -> Vec<&CharacterProfile> {
        names.iter().filter_map(|name| self.characters.get(name)).collect()
    }

    pub fn get(&self, name: &str) -> Option<&CharacterProfile> {
        self.characters.get(name)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Characters ordered by total lines, most talkative first
    pub fn by_line_count(&self) -> Vec<&CharacterProfile> {
        let mut profiles: Vec<&CharacterProfile> = self.characters.values().collect();
        profiles.sort_by(|a, b| {
            b.total_lines()
                .cmp(&a.total_lines())
                .then_with(|| a.name.cmp(&b.name))
        });
        profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EpisodeId, FormatConfig};
    use crate::names::NameNormalizer;
    use crate::parser::parse_script;

    fn transcript(season: u32, episode: u32, script: &str) -> EpisodeTranscript {
        let format = FormatConfig::from_tags("CHARACTER_NAME:", "CUT").unwrap();
        parse_script(
            script,
            &format,
            &NameNormalizer::default(),
            EpisodeId::new(season, episode),
        )
        .unwrap()
        .into_transcript()
    }

    fn sample() -> Vec<EpisodeTranscript> {
        vec![
            transcript(
                1,
                1,
                "JON: Winter is coming.\nNED: Winter is coming, Jon.\nCUT TO:\nARYA: Stick them.\nJON: With the pointy end.\n",
            ),
            transcript(
                1,
                2,
                "TYRION: I drink.\nJON LANNISTER: Who?\nCUT TO:\nCUT TO:\nTYRION: And I know things.\n",
            ),
        ]
    }

    #[test]
    fn test_lines_are_grouped_by_episode() {
        let transcripts = sample();
        let roster = CharacterRoster::from_transcripts(&transcripts);

        let jon = roster.get("Jon").unwrap();
        assert_eq!(jon.line_count("s01e01"), 2);
        assert_eq!(jon.line_count("s01e02"), 1);
        assert_eq!(jon.total_lines(), 3);
        assert!(roster.get("Tyrion").unwrap().episode_lines.get("s01e01").is_none());
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn test_scene_interactions() {
        let transcripts = sample();
        let roster = CharacterRoster::from_transcripts(&transcripts);

        let jon = roster.get("Jon").unwrap();
        assert_eq!(jon.num_scenes, 3);
        assert_eq!(jon.scene_appearances.get("Ned"), Some(&1));
        assert_eq!(jon.scene_appearances.get("Arya"), Some(&1));
        assert_eq!(jon.scene_appearances.get("Tyrion"), Some(&1));
        assert!(jon.scene_appearances.get("Jon").is_none());

        let tyrion = roster.get("Tyrion").unwrap();
        assert_eq!(tyrion.num_scenes, 2);
        assert_eq!(tyrion.scene_appearances.get("Jon"), Some(&1));
    }

    #[test]
    fn test_word_counts() {
        let transcripts = sample();
        let roster = CharacterRoster::from_transcripts(&transcripts);

        let ned = roster.get("Ned").unwrap();
        assert_eq!(ned.word_counts.get("winter"), Some(&1));
        assert_eq!(ned.word_counts.get("jon."), Some(&1));
        assert_eq!(ned.unique_words(), 4);
    }

    #[test]
    fn test_by_line_count_orders_by_talkativeness() {
        let transcripts = sample();
        let roster = CharacterRoster::from_transcripts(&transcripts);

        let ranked = roster.by_line_count();
        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Jon", "Tyrion", "Arya", "Ned"]);
    }

    #[test]
    fn test_deaths_default_to_alive() {
        let transcripts = sample();
        let roster = CharacterRoster::from_transcripts(&transcripts).with_deaths(&CastConfig::default());

        assert_eq!(roster.get("Ned").unwrap().episode_death.as_deref(), Some("s01e10"));
        assert_eq!(roster.get("Ned").unwrap().status(), "s01e10");
        assert_eq!(roster.get("Arya").unwrap().episode_death, None);
        assert_eq!(roster.get("Arya").unwrap().status(), "alive");
    }

    #[test]
    fn test_main_and_minor_characters() {
        let transcripts = vec![transcript(
            2,
            1,
            "TYRION: Where is Podrick?\nPODRICK: Here.\nJON: North.\nHOT PIE: Bread.\n",
        )];
        let roster = CharacterRoster::from_transcripts(&transcripts);
        let cast = CastConfig::default();

        let main = roster.main_characters(&cast);
        let names: Vec<&str> = main.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Jon", "Tyrion"]);

        let minor = roster.minor_characters(&cast);
        let names: Vec<&str> = minor.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Podrick"]);

        assert!(roster.get("Hot Pie").is_some());
    }

    #[test]
    fn test_empty_roster() {
        let roster = CharacterRoster::from_transcripts(&Vec::<EpisodeTranscript>::new());
        assert!(roster.is_empty());
    }
}
