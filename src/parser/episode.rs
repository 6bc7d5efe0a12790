use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::ParseError;
use crate::models::{EpisodeId, EpisodeParse, EpisodeTranscript, FormatConfig, Utterance};
use crate::names::NameNormalizer;

use super::classify::classify;
use super::segment::SceneState;

/// Fold state of an episode parse
#[derive(Debug, Clone)]
pub struct ParseState {
    id: EpisodeId,
    character_lines: BTreeMap<String, Vec<Utterance>>,
    scenes: SceneState,
}

impl ParseState {
    pub fn new(id: EpisodeId) -> Self {
        Self {
            id,
            character_lines: BTreeMap::new(),
            scenes: SceneState::new(id),
        }
    }

    /// Advance the state by one source line
    pub fn step(
        self,
        line_number: usize,
        line: &str,
        format: &FormatConfig,
        names: &NameNormalizer,
    ) -> Result<Self, ParseError> {
        if line.trim().is_empty() {
            return Ok(self);
        }

        let spoken = classify(line, format.character_format).map_err(|source| {
            ParseError::AmbiguousCue {
                line_number,
                line: line.to_string(),
                source,
            }
        })?;

        match spoken {
            Some(spoken) => {
                let utterance = Utterance {
                    character_name: names.normalize(&spoken.name),
                    text: spoken.text,
                    season_num: self.id.season_num,
                    episode_num: self.id.episode_num,
                };
                debug!(
                    "{} line {}: {} -> {:?}",
                    self.id, line_number, spoken.name, utterance.character_name
                );
                Ok(self.record(utterance))
            }
            None => {
                let mut state = self;
                state.scenes = state.scenes.on_non_dialogue_line(line, format.scene_format);
                Ok(state)
            }
        }
    }

    fn record(mut self, utterance: Utterance) -> Self {
        self.character_lines
            .entry(utterance.character_name.clone())
            .or_default()
            .push(utterance.clone());
        self.scenes = self.scenes.push(utterance);
        self
    }

    /// Flush the open scene and build the transcript
    pub fn finish(self) -> EpisodeTranscript {
        EpisodeTranscript {
            id: self.id,
            key: self.id.key(),
            character_lines: self.character_lines,
            scenes: self.scenes.finish(),
        }
    }
}

/// Parse the lines of one episode
///
/// Episodes whose character format is `NONE` have no script yet; they come
/// back as [`EpisodeParse::NoScript`] with an empty transcript rather than
/// as an error.
pub fn parse_episode<I, S>(
    lines: I,
    format: &FormatConfig,
    names: &NameNormalizer,
    id: EpisodeId,
) -> Result<EpisodeParse, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if !format.has_script() {
        info!("Script has been flagged as not existing for {}. Skipping.", id);
        return Ok(EpisodeParse::NoScript(EpisodeTranscript::empty(id)));
    }

    let state = lines
        .into_iter()
        .enumerate()
        .try_fold(ParseState::new(id), |state, (index, line)| {
            state.step(index + 1, line.as_ref(), format, names)
        })?;

    let transcript = state.finish();
    info!(
        "{}: {} lines from {} characters in {} scenes",
        id,
        transcript.total_lines(),
        transcript.character_lines.len(),
        transcript.num_scenes()
    );

    Ok(EpisodeParse::Complete(transcript))
}

/// Parse a whole script held in memory
pub fn parse_script(
    text: &str,
    format: &FormatConfig,
    names: &NameNormalizer,
    id: EpisodeId,
) -> Result<EpisodeParse, ParseError> {
    parse_episode(text.lines(), format, names, id)
}
