use tracing::debug;

use crate::models::{EpisodeId, Scene, SceneFormat, Utterance};

/// Whether a non-dialogue line marks a scene change under `format`
pub fn is_scene_boundary(line: &str, format: SceneFormat) -> bool {
    match format {
        SceneFormat::SceneKeyword => {
            // "Scene shift" is covered by the case-insensitive "scene" check
            line.contains("Blackout") || line.to_lowercase().contains("scene")
        }
        SceneFormat::DashRun => line.contains("- - -") || line.contains("----"),
        SceneFormat::StarRun => line.contains("* * *") || line.contains("***"),
        SceneFormat::IntExt => is_slug_line(line),
        SceneFormat::CutTo => is_cut(line),
        SceneFormat::IntExtOrCut => is_slug_line(line) || is_cut(line),
        SceneFormat::OneScene | SceneFormat::None => false,
    }
}

fn is_slug_line(line: &str) -> bool {
    ["INT", "EXT", "Interior", "Exterior"]
        .iter()
        .any(|marker| line.contains(marker))
}

fn is_cut(line: &str) -> bool {
    line.contains("CUT TO")
}

/// Scene accumulation state for one episode
///
/// The state is threaded by value through the parse: every operation takes
/// `self` and returns the next state.
#[derive(Debug, Clone)]
pub struct SceneState {
    id: EpisodeId,
    open: Vec<Utterance>,
    finished: Vec<Scene>,
}

impl SceneState {
    pub fn new(id: EpisodeId) -> Self {
        Self {
            id,
            open: Vec::new(),
            finished: Vec::new(),
        }
    }

    /// Add an utterance to the open scene
    pub fn push(mut self, utterance: Utterance) -> Self {
        self.open.push(utterance);
        self
    }

    /// Feed a non-dialogue line; closes the open scene on a boundary
    pub fn on_non_dialogue_line(self, line: &str, format: SceneFormat) -> Self {
        if is_scene_boundary(line, format) {
            debug!("{}: scene boundary {:?}", self.id, line.trim());
            self.close_open_scene()
        } else {
            self
        }
    }

    /// Close the open scene; an empty one is dropped
    fn close_open_scene(mut self) -> Self {
        if !self.open.is_empty() {
            let utterances = std::mem::take(&mut self.open);
            self.finished.push(Scene {
                season_num: self.id.season_num,
                episode_num: self.id.episode_num,
                utterances,
            });
        }
        self
    }

    /// Number of utterances in the open scene
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Scenes closed so far
    pub fn finished(&self) -> &[Scene] {
        &self.finished
    }

    /// Flush the open scene and return every scene in order
    pub fn finish(self) -> Vec<Scene> {
        self.close_open_scene().finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(name: &str, text: &str) -> Utterance {
        Utterance {
            character_name: name.to_string(),
            text: text.to_string(),
            season_num: 2,
            episode_num: 9,
        }
    }

    #[test]
    fn test_boundary_triggers_per_format() {
        let cases = [
            (SceneFormat::SceneKeyword, "Scene shifts to the Wall.", true),
            (SceneFormat::SceneKeyword, "## TITLE SEQUENCE / NEW SCENE", true),
            (SceneFormat::SceneKeyword, "Blackout.", true),
            (SceneFormat::SceneKeyword, "The bells ring.", false),
            (SceneFormat::DashRun, "\\- - - - -", true),
            (SceneFormat::DashRun, "\\----", true),
            (SceneFormat::DashRun, "well - he said", false),
            (SceneFormat::StarRun, "* * *", true),
            (SceneFormat::StarRun, "*****", true),
            (SceneFormat::StarRun, "*shrugs*", false),
            (SceneFormat::IntExt, "INT. SMALL COUNCIL CHAMBER", true),
            (SceneFormat::IntExt, "Exterior, the Twins", true),
            (SceneFormat::IntExt, "Interior of the sept", true),
            (SceneFormat::IntExt, "exterior of the sept", false),
            (SceneFormat::CutTo, "CUT TO:", true),
            (SceneFormat::CutTo, "Cut to black", false),
            (SceneFormat::IntExtOrCut, "CUT TO: Dragonstone", true),
            (SceneFormat::IntExtOrCut, "EXT. BLACKWATER BAY", true),
            (SceneFormat::IntExtOrCut, "Exterior, Blackwater", true),
            (SceneFormat::IntExtOrCut, "Wildfire explodes.", false),
            (SceneFormat::OneScene, "CUT TO: INT. scene * * * ----", false),
            (SceneFormat::None, "CUT TO: INT. scene * * * ----", false),
        ];

        for (format, line, expected) in cases {
            assert_eq!(
                is_scene_boundary(line, format),
                expected,
                "{format} / {line:?}"
            );
        }
    }

    #[test]
    fn test_boundary_closes_non_empty_scene() {
        let id = EpisodeId::new(2, 9);
        let state = SceneState::new(id)
            .push(utterance("Davos", "The fleet is ready."))
            .push(utterance("Stannis", "Then we sail."))
            .on_non_dialogue_line("CUT TO:", SceneFormat::CutTo)
            .push(utterance("Tyrion", "Now."));

        assert_eq!(state.finished().len(), 1);
        assert_eq!(state.finished()[0].len(), 2);
        assert_eq!(state.open_len(), 1);

        let scenes = state.finish();
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[1].utterances[0].character_name, "Tyrion");
        assert_eq!(scenes[1].season_num, 2);
        assert_eq!(scenes[1].episode_num, 9);
    }

    #[test]
    fn test_consecutive_boundaries_do_not_emit_empty_scenes() {
        let scenes = SceneState::new(EpisodeId::new(2, 9))
            .on_non_dialogue_line("CUT TO:", SceneFormat::CutTo)
            .push(utterance("Bronn", "Ready."))
            .on_non_dialogue_line("CUT TO:", SceneFormat::CutTo)
            .on_non_dialogue_line("CUT TO:", SceneFormat::CutTo)
            .on_non_dialogue_line("CUT TO:", SceneFormat::CutTo)
            .finish();

        assert_eq!(scenes.len(), 1);
        assert!(scenes.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_finish_without_utterances_is_empty() {
        let scenes = SceneState::new(EpisodeId::new(1, 1))
            .on_non_dialogue_line("Blackout.", SceneFormat::SceneKeyword)
            .finish();

        assert!(scenes.is_empty());
    }
}
