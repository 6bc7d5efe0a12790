use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name tables consulted by the normalizer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NameConfig {
    /// Characters that legitimately keep more than one word of their name
    pub double_names: Vec<String>,
    /// Houses and groups combined with `roles` into extra multi-word names
    pub houses: Vec<String>,
    /// Roles combined with `houses`, e.g. "Guard" in "Lannister Guard"
    pub roles: Vec<String>,
    /// Variant spellings, epithets and titles mapped to one identity
    pub aliases: BTreeMap<String, String>,
}

impl NameConfig {
    /// Load name tables from a JSON file; omitted fields keep the built-in tables
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read name tables: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse name tables: {:?}", path))
    }

    /// Every `<house> <role>` combination
    pub fn house_roles(&self) -> impl Iterator<Item = String> + '_ {
        self.houses
            .iter()
            .flat_map(|house| self.roles.iter().map(move |role| format!("{house} {role}")))
    }
}

impl Default for NameConfig {
    fn default() -> Self {
        Self {
            double_names: to_strings(&[
                "The Hound",
                "Khal Drogo",
                "Maester Luwin",
                "Septa Mordane",
                "Waymar",
                "Grand Maester Pycelle",
                "Maester Pycelle",
                "Street Urchin",
                "King's Landing Baker",
                "Hot Pie",
                "Ser Alliser",
                "Maryn Trant",
                "King Joffrey",
                "King's Landing Page",
                "Wine Merchant",
                "Stable Boy",
                "Old Nan",
                "Little Bird",
                "The Group",
                "The Others At The Table",
                "Gold Cloak",
                "Crowd",
                "Black Lorren",
                "The Mountain",
                "Pyatt Pree",
                "Eddison Tollett",
                "Kraznys Mo Nakloz",
                "Grey Worm",
                "Ser Dontos",
                "Dying Man",
                "Old Man",
                "Blonde Prostitute",
                "Black Haired Prostitute",
                "Sand Snakes",
                "High Sparrow",
                "Slave Owner",
                "Night's Watchman",
                "Khal Moro",
                "Young Rodrik",
                "Young Ned",
                "Three-Eyed Raven",
                "Young Lyanna",
                "Young Hodor",
                "Lady Walda",
                "Lady Crane",
                "Maester Aemon",
                "Ser Vardis",
                "Maester Walkan",
                "High Septon",
                "Black Walder",
            ]),
            houses: to_strings(&[
                "Lannister",
                "Stark",
                "Tyrell",
                "Baratheon",
                "Kings",
                "Nights Watch",
                "Kings Landing",
                "Wounded",
                "Frey",
            ]),
            roles: to_strings(&[
                "Soldier",
                "Scout",
                "Warrior",
                "Guards",
                "Bannerman",
                "Bannermen",
                "Guard",
                "Boy",
            ]),
            aliases: [
                ("Three-eyed", "Three-Eyed Raven"),
                ("Three-Eyed", "Three-Eyed Raven"),
                ("Three", "Three-Eyed Raven"),
                ("Eddard", "Ned"),
                ("Samwell", "Sam"),
                ("Maester Aemon", "Aemon"),
                ("Royce", "Waymar"),
                ("Sandor", "The Hound"),
                ("Hound", "The Hound"),
                ("Luwin", "Maester Luwin"),
                ("Drogo", "Khal Drogo"),
                ("Grand Maester Pycelle", "Pycelle"),
                ("Maester Pycelle", "Pycelle"),
                ("King Joffrey", "Joffrey"),
                ("Ser Alliser", "Alliser"),
                ("Baelish", "Littlefinger"),
                ("Petyr", "Littlefinger"),
                ("Mountain", "The Mountain"),
                ("Gregor", "The Mountain"),
                ("Sparrow", "High Sparrow"),
                ("Blackfish", "Brynden"),
                ("Twyin", "Tywin"),
                ("Rodrick", "Rodrik"),
                ("Oberyon", "Oberyn"),
            ]
            .into_iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect(),
        }
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
