use std::sync::LazyLock;

use regex::Regex;

use crate::error::AmbiguousCue;
use crate::models::CharacterFormat;

/// `NAME: text`, from the first upper-case letter (or digits leading into
/// one, as in `2ND GUARD`) up to the first colon
static CAPS_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^:]*?([0-9]*[A-Z][^:]*):(.*)$").expect("Invalid caps cue regex")
});

/// `**Name:**`, `**Name**:` or `**Name** :`, tried in that order.
/// The name must start with a letter, which skips stray runs such as
/// `**********Catelyn Stark:**`, and never spans a `*`, so each cue on a
/// line is its own match.
static BOLD_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*([A-Z][^*]*?):\*\*|\*\*([A-Z][^*]*?)\*\*:|\*\*([A-Z][^*]*?)\*\* :")
        .expect("Invalid bold cue regex")
});

/// Markers of stage directions and slug lines in bold-cue scripts
const BOLD_DIRECTION_MARKERS: [&str; 4] = ["CUT TO", "_CUT", "INT", "EXT"];

/// A line recognized as dialogue, before name normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenLine {
    /// Speaker name as written in the script, trimmed
    pub name: String,
    /// Spoken text, trimmed
    pub text: String,
}

impl SpokenLine {
    fn new(name: &str, text: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            text: text.trim().to_string(),
        }
    }
}

/// Decide whether `line` is dialogue under `format` and split it into
/// speaker and text
///
/// Returns `Ok(None)` for narration, stage directions and anything else the
/// grammar does not recognize. A line carrying more than one speaker cue
/// cannot be attributed and is reported as [`AmbiguousCue`].
pub fn classify(line: &str, format: CharacterFormat) -> Result<Option<SpokenLine>, AmbiguousCue> {
    if line.starts_with('[') {
        return Ok(None);
    }

    match format {
        CharacterFormat::ColonCaps => Ok(classify_colon_caps(line)),
        CharacterFormat::BoldColon => classify_bold_colon(line),
        CharacterFormat::None => Ok(None),
    }
}

fn classify_colon_caps(line: &str) -> Option<SpokenLine> {
    let line = line.trim_end_matches(['\r', '\n']);
    let caps = CAPS_CUE.captures(line)?;

    let name = caps.get(1)?.as_str().trim();
    // Narration rarely has an all-caps run before a colon; character cues always do.
    if name != name.to_uppercase() {
        return None;
    }

    let spoken = SpokenLine::new(name, caps.get(2)?.as_str());
    // Navigation letters on scraped pages look like cues but carry no text.
    if spoken.text.is_empty() {
        return None;
    }
    Some(spoken)
}

fn classify_bold_colon(line: &str) -> Result<Option<SpokenLine>, AmbiguousCue> {
    if line.starts_with('_') || BOLD_DIRECTION_MARKERS.iter().any(|m| line.contains(m)) {
        return Ok(None);
    }

    let line = line.trim_end_matches(['\r', '\n']);
    let mut cues = BOLD_CUE.captures_iter(line);
    let Some(caps) = cues.next() else {
        return Ok(None);
    };
    let extra = cues.count();
    if extra > 0 {
        return Err(AmbiguousCue { cues: extra + 1 });
    }

    let Some(name) = (1..=3)
        .filter_map(|i| caps.get(i))
        .map(|m| m.as_str())
        .find(|n| !n.trim().is_empty())
    else {
        return Ok(None);
    };

    let Some(cue) = caps.get(0) else {
        return Ok(None);
    };
    let spoken = SpokenLine::new(name, &line[cue.end()..]);
    if spoken.text.is_empty() {
        return Ok(None);
    }
    Ok(Some(spoken))
}
