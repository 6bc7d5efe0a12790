use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::aggregate::{CastConfig, CharacterRoster};
use crate::models::{EpisodeTranscript, FormatConfig};

/// Machine-readable output of a parsing run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Parsed episodes, in episode order
    pub episodes: Vec<EpisodeReport>,
    /// Characters merged across all parsed episodes
    pub roster: CharacterRoster,
    /// Metadata about the run
    pub metadata: RunMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct EpisodeReport {
    pub key: String,
    pub format: FormatConfig,
    pub total_lines: usize,
    pub num_scenes: usize,
    pub transcript: EpisodeTranscript,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunMetadata {
    /// RFC 3339 timestamp of when the report was produced
    pub generated_at: String,
    pub episodes_parsed: usize,
    pub total_lines: usize,
    pub total_scenes: usize,
    /// Episodes flagged as having no script
    pub skipped: Vec<String>,
    /// Episodes that could not be parsed, with the reason
    pub failed: Vec<FailedEpisode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedEpisode {
    pub key: String,
    pub reason: String,
}

impl EpisodeReport {
    pub fn new(transcript: EpisodeTranscript, format: FormatConfig) -> Self {
        Self {
            key: transcript.key.clone(),
            format,
            total_lines: transcript.total_lines(),
            num_scenes: transcript.num_scenes(),
            transcript,
        }
    }
}

impl RunReport {
    /// Build a report, computing the roster and totals from the episodes
    pub fn new(
        episodes: Vec<EpisodeReport>,
        skipped: Vec<String>,
        failed: Vec<FailedEpisode>,
        cast: &CastConfig,
    ) -> Self {
        let roster = CharacterRoster::from_transcripts(episodes.iter().map(|e| &e.transcript))
            .with_deaths(cast);
        let metadata = RunMetadata {
            generated_at: chrono::Utc::now().to_rfc3339(),
            episodes_parsed: episodes.len(),
            total_lines: episodes.iter().map(|e| e.total_lines).sum(),
            total_scenes: episodes.iter().map(|e| e.num_scenes).sum(),
            skipped,
            failed,
        };

        Self {
            episodes,
            roster,
            metadata,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable summary of one episode
pub struct EpisodeSummary<'a> {
    transcript: &'a EpisodeTranscript,
}

impl<'a> EpisodeSummary<'a> {
    pub fn new(transcript: &'a EpisodeTranscript) -> Self {
        Self { transcript }
    }

    /// Lines spoken per character; with `verbose`, every line as well
    pub fn format(&self, verbose: bool) -> String {
        let id = self.transcript.id;
        let mut output = String::new();

        output.push_str("==============================\n");
        output.push_str(&format!(
            "Summarizing Season {} Episode {}\n",
            id.season_num, id.episode_num
        ));
        output.push_str("==============================\n");

        for (name, lines) in &self.transcript.character_lines {
            output.push_str(&format!("{} spoke {} lines\n", name, lines.len()));
            if verbose {
                for line in lines {
                    output.push_str(&format!("    {}\n", line.text));
                }
            }
        }
        output.push_str(&format!(
            "A total of {} lines were spoken.\n",
            self.transcript.total_lines()
        ));

        output
    }

    /// Speakers and line counts of each scene
    pub fn format_scenes(&self) -> String {
        let mut output = String::new();

        for (index, scene) in self.transcript.scenes.iter().enumerate() {
            output.push_str(&format!(
                "{} scene {}: {} ({} lines)\n",
                self.transcript.key,
                index + 1,
                scene.characters().join(", "),
                scene.len()
            ));
        }

        output
    }
}

/// Summary of the characters across a run, most talkative first
pub fn format_roster(roster: &CharacterRoster, limit: usize) -> String {
    let mut output = String::new();

    for profile in roster.by_line_count().into_iter().take(limit) {
        output.push_str(&format!(
            "{:<24} {:>5} lines {:>4} episodes {:>4} scenes {:>5} distinct words {}\n",
            profile.name,
            profile.total_lines(),
            profile.episode_lines.len(),
            profile.num_scenes,
            profile.unique_words(),
            profile.status()
        ));
    }

    output
}
