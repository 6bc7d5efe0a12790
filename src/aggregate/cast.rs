use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Fixed cast lists and deaths, keyed by canonical character name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CastConfig {
    /// Main characters, in display order
    pub main_characters: Vec<String>,
    /// Recurring minor characters, in display order
    pub minor_characters: Vec<String>,
    /// Episode key (`sNNeNN`) each character dies in
    pub deaths: BTreeMap<String, String>,
}

impl CastConfig {
    /// Load cast tables from a JSON file; omitted fields keep the built-in tables
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read cast tables: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse cast tables: {:?}", path))
    }

    /// Episode key a character dies in, if they die at all
    pub fn death_of(&self, name: &str) -> Option<&str> {
        self.deaths.get(name).map(String::as_str)
    }
}

impl Default for CastConfig {
    fn default() -> Self {
        Self {
            main_characters: to_strings(&[
                "Daenerys",
                "Jon",
                "Arya",
                "Sansa",
                "Tyrion",
                "Bran",
                "Cersei",
                "Melisandre",
                "The Hound",
                "Joffrey",
                "Brienne",
                "Theon",
                "Jaime",
                "Bronn",
                "Ramsay",
                "Littlefinger",
                "Varys",
                "Jorah",
                "Margaery",
                "Sam",
                "Missandei",
                "Davos",
                "Ned",
                "Catelyn",
                "Tywin",
                "Robb",
                "Stannis",
                "Tormund",
            ]),
            minor_characters: to_strings(&[
                "Qyburn",
                "Grey Worm",
                "Pycelle",
                "Gilly",
                "Ygritte",
                "Gendry",
                "High Sparrow",
                "Oberyn",
                "Alliser",
                "Khal Drogo",
                "Renly",
                "Aemon",
                "Podrick",
            ]),
            deaths: [
                ("Daenerys", "s08e06"),
                ("The Mountain", "s08e05"),
                ("Cersei", "s08e05"),
                ("Melisandre", "s08e03"),
                ("The Hound", "s08e05"),
                ("Khal Drogo", "s01e10"),
                ("Joffrey", "s04e02"),
                ("Theon", "s08e03"),
                ("Jaime", "s08e05"),
                ("Ramsay", "s06e08"),
                ("Littlefinger", "s07e07"),
                ("Varys", "s08e05"),
                ("Jorah", "s08e03"),
                ("Margaery", "s06e10"),
                ("Missandei", "s08e04"),
                ("Ned", "s01e10"),
                ("Catelyn", "s03e09"),
                ("Tywin", "s04e09"),
                ("Robb", "s03e09"),
                ("Stannis", "s05e10"),
                ("Qyburn", "s08e05"),
                ("Pycelle", "s06e10"),
                ("Ygritte", "s04e09"),
                ("High Sparrow", "s06e10"),
                ("Oberyn", "s04e08"),
                ("Alliser", "s06e03"),
                ("Renly", "s02e05"),
                ("Aemon", "s05e07"),
            ]
            .into_iter()
            .map(|(name, key)| (name.to_string(), key.to_string()))
            .collect(),
        }
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
