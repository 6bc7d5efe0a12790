use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};

use crate::error::ConfigError;
use crate::models::{EpisodeId, FormatConfig};

const COLUMNS: [&str; 4] = [
    "season_num",
    "episode_num",
    "character_format",
    "scene_format",
];

/// Raw format tags of one row, validated only when looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEntry {
    pub character_format: String,
    pub scene_format: String,
}

impl FormatEntry {
    pub fn validate(&self) -> Result<FormatConfig, ConfigError> {
        FormatConfig::from_tags(&self.character_format, &self.scene_format)
    }
}

/// Per-episode format lookup table
///
/// Whitespace-separated columns with a header row; `#` starts a comment:
///
/// ```text
/// # season_num episode_num character_format scene_format
/// season_num episode_num character_format scene_format
/// 1 1 CHARACTER_NAME: NONE
/// 1 2 **CHARACTER_NAME:** DASHES
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormatTable {
    entries: BTreeMap<EpisodeId, FormatEntry>,
}

impl FormatTable {
    /// Read a format table from a file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read format table: {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Invalid format table: {:?}", path))
    }

    /// Parse a format table from text
    pub fn parse(content: &str) -> Result<Self> {
        let mut rows = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, strip_comment(line)))
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((header_line, header)) = rows.next() else {
            bail!("missing header row");
        };
        let header: Vec<&str> = header.split_whitespace().collect();
        let mut positions = [0usize; 4];
        for (slot, column) in positions.iter_mut().zip(COLUMNS) {
            *slot = header
                .iter()
                .position(|h| *h == column)
                .ok_or_else(|| anyhow!("header on line {} has no {:?} column", header_line, column))?;
        }

        let mut entries = BTreeMap::new();
        for (line_number, row) in rows {
            let fields: Vec<&str> = row.split_whitespace().collect();
            if fields.len() != header.len() {
                bail!(
                    "line {} has {} fields, expected {}",
                    line_number,
                    fields.len(),
                    header.len()
                );
            }

            let [season, episode, character_format, scene_format] = positions.map(|p| fields[p]);
            let id = EpisodeId::new(
                parse_number(season, "season_num", line_number)?,
                parse_number(episode, "episode_num", line_number)?,
            );
            entries.insert(
                id,
                FormatEntry {
                    character_format: character_format.to_string(),
                    scene_format: scene_format.to_string(),
                },
            );
        }

        Ok(Self { entries })
    }

    /// Format of an episode; `None` if the table has no row for it
    pub fn lookup(&self, id: EpisodeId) -> Option<Result<FormatConfig, ConfigError>> {
        self.entries.get(&id).map(FormatEntry::validate)
    }

    /// Every episode listed in the table, in order
    pub fn episodes(&self) -> impl Iterator<Item = EpisodeId> + '_ {
        self.entries.keys().copied()
    }

    pub fn insert(&mut self, id: EpisodeId, entry: FormatEntry) {
        self.entries.insert(id, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(index) => &line[..index],
        None => line,
    }
}

fn parse_number(field: &str, column: &str, line_number: usize) -> Result<u32> {
    field
        .parse()
        .with_context(|| format!("line {}: {} {:?} is not a number", line_number, column, field))
}

/// Location of an episode's script within a scripts directory
pub fn script_path(dir: &Path, id: EpisodeId) -> PathBuf {
    dir.join(format!("{}.txt", id.key()))
}

/// Read the lines of a script file
pub fn read_script(path: &Path) -> Result<Vec<String>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read script: {:?}", path))?;
    Ok(content.lines().map(str::to_string).collect())
}
