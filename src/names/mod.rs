pub mod tables;

pub use tables::*;

use std::collections::{HashMap, HashSet};

/// Canonicalizes speaker names so a character keeps one identity across
/// episodes whose scripts spell or title them differently.
///
/// The allow-list (double names plus every house × role combination) and the
/// alias map are built once here and only read afterwards, so a single
/// normalizer can be shared between concurrent episode parses.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    allowed_multi_word: HashSet<String>,
    aliases: HashMap<String, String>,
}

impl NameNormalizer {
    pub fn new(config: &NameConfig) -> Self {
        let allowed_multi_word = config
            .double_names
            .iter()
            .cloned()
            .chain(config.house_roles())
            .collect();
        let aliases = config
            .aliases
            .iter()
            .map(|(from, to)| (from.clone(), to.clone()))
            .collect();

        Self {
            allowed_multi_word,
            aliases,
        }
    }

    /// Normalize a raw speaker name
    ///
    /// 1. Capitalize each word (`JAIME LANNISTER` → `Jaime Lannister`,
    ///    `KING'S` → `King's`)
    /// 2. Keep only the first word unless the name is allow-listed
    /// 3. Apply the alias map to what remains
    pub fn normalize(&self, raw_name: &str) -> String {
        let capitalized = capitalize_words(raw_name);

        let name = if self.allowed_multi_word.contains(&capitalized) {
            capitalized
        } else {
            match capitalized.split_whitespace().next() {
                Some(first) => first.to_string(),
                None => return String::new(),
            }
        };

        match self.aliases.get(&name) {
            Some(canonical) => canonical.clone(),
            None => name,
        }
    }

    /// Whether a capitalized name may keep more than one word
    pub fn is_multi_word_allowed(&self, name: &str) -> bool {
        self.allowed_multi_word.contains(name)
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(&NameConfig::default())
    }
}

/// Upper-case the first character of each whitespace-separated word and
/// lower-case the rest; words are re-joined with single spaces
pub fn capitalize_words(name: &str) -> String {
    name.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(word.len());
    // Only take the upper-case form when it is a single character, otherwise
    // a second pass would lower-case the tail of the expansion ("ß" -> "SS").
    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => out.push(u),
        _ => out.push(first),
    }
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_words_leaves_apostrophes_alone() {
        assert_eq!(capitalize_words("KING'S LANDING PAGE"), "King's Landing Page");
        assert_eq!(capitalize_words("jaime   lannister"), "Jaime Lannister");
        assert_eq!(capitalize_words("THREE-EYED RAVEN"), "Three-eyed Raven");
        assert_eq!(capitalize_words("   "), "");
    }

    #[test]
    fn test_single_names_are_capitalized() {
        let normalizer = NameNormalizer::default();

        assert_eq!(normalizer.normalize("JON"), "Jon");
        assert_eq!(normalizer.normalize("tyrion"), "Tyrion");
    }

    #[test]
    fn test_unlisted_double_names_are_truncated() {
        let normalizer = NameNormalizer::default();

        assert_eq!(normalizer.normalize("Cersei Lannister"), "Cersei");
        assert_eq!(normalizer.normalize("JAIME LANNISTER"), "Jaime");
        assert_eq!(normalizer.normalize("Catelyn Stark"), "Catelyn");
    }

    #[test]
    fn test_allowed_double_names_are_kept() {
        let normalizer = NameNormalizer::default();

        assert_eq!(normalizer.normalize("HOT PIE"), "Hot Pie");
        assert_eq!(normalizer.normalize("old nan"), "Old Nan");
        assert_eq!(normalizer.normalize("LANNISTER GUARD"), "Lannister Guard");
        assert_eq!(normalizer.normalize("Stark Soldier"), "Stark Soldier");
        assert_eq!(normalizer.normalize("KING'S LANDING BAKER"), "King's Landing Baker");
        assert!(normalizer.is_multi_word_allowed("Frey Bannermen"));
    }

    #[test]
    fn test_aliases_apply_after_truncation() {
        let normalizer = NameNormalizer::default();

        assert_eq!(normalizer.normalize("SANDOR"), "The Hound");
        assert_eq!(normalizer.normalize("Sandor Clegane"), "The Hound");
        assert_eq!(normalizer.normalize("Grand Maester Pycelle"), "Pycelle");
        assert_eq!(normalizer.normalize("EDDARD STARK"), "Ned");
        assert_eq!(normalizer.normalize("Petyr Baelish"), "Littlefinger");
        assert_eq!(normalizer.normalize("THREE-EYED RAVEN"), "Three-Eyed Raven");
        assert_eq!(normalizer.normalize("Twyin"), "Tywin");
    }

    #[test]
    fn test_empty_name_is_total() {
        let normalizer = NameNormalizer::default();

        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize(" \t "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = NameNormalizer::default();
        let config = NameConfig::default();

        let mut samples: Vec<String> = vec![
            "JON", "Cersei Lannister", "SANDOR CLEGANE", "the hound", "KING'S LANDING PAGE",
            "THREE-EYED RAVEN", "three", "GRAND MAESTER PYCELLE", "MAESTER AEMON", "ser alliser",
            "Gregor Clegane", "Blackfish", "ßeta", "ǆemal", "İstanbul", "", "  ", "O'NEILL",
            "GUARD #2", "Kraznys mo Nakloz",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();
        samples.extend(config.double_names.iter().cloned());
        samples.extend(config.house_roles());
        samples.extend(config.aliases.keys().cloned());
        samples.extend(config.aliases.values().cloned());

        for raw in &samples {
            let once = normalizer.normalize(raw);
            let twice = normalizer.normalize(&once);
            assert_eq!(once, twice, "normalize is not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_custom_tables() {
        let mut config = NameConfig::default();
        config.double_names.push("Grey Wind".to_string());
        config
            .aliases
            .insert("Dany".to_string(), "Daenerys".to_string());
        let normalizer = NameNormalizer::new(&config);

        assert_eq!(normalizer.normalize("GREY WIND"), "Grey Wind");
        assert_eq!(normalizer.normalize("DANY"), "Daenerys");
    }
}
