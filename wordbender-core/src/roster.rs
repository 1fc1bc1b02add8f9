use image::Rgb;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wordbender_scanner::OTHER_BUCKET;

pub const DEFAULT_CHARACTERS: [&str; 10] = [
    "aang", "katara", "sokka", "suki", "toph", "zuko", "iroh", "mai", "ty lee", "azula",
];

/// The characters whose dialogue gets its own column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    characters: Vec<String>,
}

impl Roster {
    /// Names are lower-cased and trimmed; empty names and repeats are dropped.
    pub fn new<I, S>(characters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = Vec::new();
        for name in characters {
            let name = name.as_ref().trim().to_lowercase();
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
        Self { characters: names }
    }

    /// Parses a comma separated list such as `"aang, Katara,ty lee"`.
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Dialogue buckets in column order, with the other bucket last when enabled.
    pub fn buckets(&self, other: bool) -> Vec<String> {
        let mut buckets = self.characters.clone();
        if other && !buckets.iter().any(|c| c == OTHER_BUCKET) {
            buckets.push(OTHER_BUCKET.to_string());
        }
        buckets
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(DEFAULT_CHARACTERS)
    }
}

/// Display colour per character, used for titles and terminal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: BTreeMap<String, Rgb<u8>>,
    fallback: Rgb<u8>,
}

impl Palette {
    pub fn empty(fallback: Rgb<u8>) -> Self {
        Self {
            colors: BTreeMap::new(),
            fallback,
        }
    }

    pub fn with_color(mut self, character: &str, color: Rgb<u8>) -> Self {
        self.colors.insert(character.to_lowercase(), color);
        self
    }

    pub fn color_for(&self, character: &str) -> Rgb<u8> {
        self.colors
            .get(&character.to_lowercase())
            .copied()
            .unwrap_or(self.fallback)
    }
}

impl Default for Palette {
    fn default() -> Self {
        let grey = Rgb([128, 128, 128]);
        Self::empty(grey)
            .with_color("aang", Rgb([218, 165, 32])) // goldenrod
            .with_color("katara", Rgb([0, 191, 255])) // deepskyblue
            .with_color("sokka", Rgb([30, 144, 255])) // dodgerblue
            .with_color("suki", Rgb([144, 238, 144])) // lightgreen
            .with_color("toph", Rgb([0, 128, 0]))
            .with_color("zuko", Rgb([255, 0, 0]))
            .with_color("iroh", Rgb([128, 0, 0])) // maroon
            .with_color("mai", Rgb([0, 0, 0]))
            .with_color("ty lee", Rgb([255, 105, 180])) // hotpink
            .with_color("azula", Rgb([255, 69, 0])) // orangered
            .with_color(OTHER_BUCKET, grey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_normalizes_names() {
        let roster = Roster::parse_list(" Aang, katara ,,AANG, Ty Lee");
        assert_eq!(roster.characters(), ["aang", "katara", "ty lee"]);
    }

    #[test]
    fn test_buckets_append_other_once() {
        let roster = Roster::new(["aang", "katara"]);
        assert_eq!(roster.buckets(false), ["aang", "katara"]);
        assert_eq!(roster.buckets(true), ["aang", "katara", "other"]);

        let with_other = Roster::new(["aang", "other"]);
        assert_eq!(with_other.buckets(true), ["aang", "other"]);
    }

    #[test]
    fn test_default_roster() {
        let roster = Roster::default();
        assert_eq!(roster.characters().len(), DEFAULT_CHARACTERS.len());
        assert!(roster.characters().contains(&"ty lee".to_string()));
    }

    #[test]
    fn test_palette_lookup_and_fallback() {
        let palette = Palette::default();
        assert_eq!(palette.color_for("Zuko"), Rgb([255, 0, 0]));
        assert_eq!(palette.color_for("appa"), Rgb([128, 128, 128]));
    }
}
