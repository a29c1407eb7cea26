use crate::catalog::{self, ImageEntry, ImageKey};

/// Fires when every keyword of any one group appears in the haystack.
struct Rule {
    groups: &'static [&'static [&'static str]],
    key: ImageKey,
}

impl Rule {
    fn matches(&self, haystack: &str) -> bool {
        self.groups
            .iter()
            .any(|group| group.iter().all(|keyword| haystack.contains(keyword)))
    }
}

// Order matters: the Dicksee rule must win over the bare "juliet" rule.
const QUERY_RULES: &[Rule] = &[
    Rule {
        groups: &[&["dicksee"], &["romeo", "juliet"]],
        key: ImageKey::RomeoJulietDicksee,
    },
    Rule {
        groups: &[&["juliet"]],
        key: ImageKey::RomeoJulietWaterhouse,
    },
    Rule {
        groups: &[&["shakespeare"]],
        key: ImageKey::ShakespearePortrait,
    },
    Rule {
        groups: &[&["solar"], &["planet"]],
        key: ImageKey::SolarSystem,
    },
    Rule {
        groups: &[&["dna"], &["genetic"]],
        key: ImageKey::DnaStructure,
    },
];

const SUBJECT_RULES: &[Rule] = &[
    Rule {
        groups: &[&["english"], &["literature"]],
        key: ImageKey::ShakespearePortrait,
    },
    Rule {
        groups: &[&["science"], &["biology"]],
        key: ImageKey::DnaStructure,
    },
    Rule {
        groups: &[&["astronomy"], &["physics"]],
        key: ImageKey::SolarSystem,
    },
];

const FALLBACK: ImageKey = ImageKey::ShakespearePortrait;

fn first_match(rules: &[Rule], haystack: &str) -> Option<ImageKey> {
    rules
        .iter()
        .find(|rule| rule.matches(haystack))
        .map(|rule| rule.key)
}

/// Resolves a free-text query and optional subject hint to catalog entries.
///
/// Query rules are tried first, then subject rules, then the Shakespeare
/// portrait. Matching is case-insensitive and the result is never empty.
pub fn resolve(query: &str, subject: Option<&str>) -> Vec<&'static ImageEntry> {
    let key = first_match(QUERY_RULES, &query.to_lowercase())
        .or_else(|| subject.and_then(|s| first_match(SUBJECT_RULES, &s.to_lowercase())))
        .unwrap_or(FALLBACK);

    vec![catalog::lookup(key)]
}
