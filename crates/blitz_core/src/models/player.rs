//! Player records loaded from the data file.
//!
//! A record keeps its stats table exactly as the data file spells it: level
//! keys are strings (`"1"`, `"2"`, ...) next to a `"start"` marker whose
//! `level` field names the character's initial stat line.

use crate::error::{BlitzError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Key of the stats entry that points at the starting level
pub const START_KEY: &str = "start";

/// Field inside the `"start"` entry naming the starting level
pub const START_LEVEL_FIELD: &str = "level";

/// Ability tier available from the first level
pub const BASE_TIER: &str = "0";

/// One level's stats, in data-file order (`HP`, `SP`, `EN`, ...)
pub type StatLine = serde_json::Map<String, Value>;

/// Level-keyed stats table, including the `"start"` marker
pub type StatsTable = BTreeMap<String, StatLine>;

/// Ability tier → technique names unlocked at that tier
pub type AbilityTiers = BTreeMap<String, Vec<String>>;

/// A blitzball player as described by the data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub location: String,
    pub stats: StatsTable,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub key_techniques: Vec<String>,
    pub learnable_abilities: AbilityTiers,
}

/// Record body as stored in the data file, where the name is the map key
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerFields {
    pub location: String,
    pub stats: StatsTable,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub key_techniques: Vec<String>,
    pub learnable_abilities: AbilityTiers,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a numeric level key. `"start"` and other labels yield `None`.
pub fn parse_level(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

/// Render a stat value the way it reads in the data file, without JSON quotes.
pub fn format_stat_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `key: value` lines for a stat line, in data-file order
pub fn format_stat_line(line: &StatLine) -> String {
    line.iter()
        .map(|(key, value)| format!("{}: {}", key, format_stat_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

impl PlayerRecord {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        stats: StatsTable,
        key_techniques: Vec<String>,
        learnable_abilities: AbilityTiers,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            stats,
            key_techniques,
            learnable_abilities,
        }
    }

    pub fn from_fields(name: impl Into<String>, fields: PlayerFields) -> Self {
        Self::new(
            name,
            fields.location,
            fields.stats,
            fields.key_techniques,
            fields.learnable_abilities,
        )
    }

    /// Stats at `level`, falling back to the closest lower level.
    ///
    /// Stats carry forward from the last level-up, so when there is no exact
    /// entry the highest numbered level not exceeding `level` is used and a
    /// warning is logged. Fails with `StatsUnavailable` when `level` is below
    /// every numbered entry.
    pub fn stats_at(&self, level: u32) -> Result<&StatLine> {
        if let Some(line) = self.stats.get(&level.to_string()) {
            return Ok(line);
        }

        let closest = self
            .stats
            .iter()
            .filter_map(|(key, line)| parse_level(key).map(|lvl| (lvl, line)))
            .filter(|(lvl, _)| *lvl <= level)
            .max_by_key(|(lvl, _)| *lvl);

        match closest {
            Some((found, line)) => {
                log::warn!(
                    "Stats for level {} not found for {}; returning stats for level {}",
                    level,
                    self.name,
                    found
                );
                Ok(line)
            }
            None => {
                log::error!(
                    "Error: No stats at or below level {} for {}. Check the data file.",
                    level,
                    self.name
                );
                Err(BlitzError::StatsUnavailable { name: self.name.clone(), level })
            }
        }
    }

    /// Numbered levels present in the stats table, ascending
    pub fn levels(&self) -> Vec<u32> {
        let mut levels: Vec<u32> = self.stats.keys().filter_map(|k| parse_level(k)).collect();
        levels.sort_unstable();
        levels
    }

    /// Stats key named by `stats["start"]["level"]`.
    ///
    /// Both `"2"` and `2` resolve to the key `"2"`.
    pub fn start_level(&self) -> Option<String> {
        self.stats
            .get(START_KEY)
            .and_then(|start| start.get(START_LEVEL_FIELD))
            .map(format_stat_value)
    }

    /// The stat line for the starting level, when the indirection resolves
    pub fn starting_stats(&self) -> Option<&StatLine> {
        self.start_level().and_then(|level| self.stats.get(&level))
    }

    /// Techniques learnable at `tier`, empty when the tier is absent
    pub fn abilities_at_tier(&self, tier: &str) -> &[String] {
        self.learnable_abilities.get(tier).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_log::{capture, logged};
    use log::Level;
    use proptest::prelude::*;
    use serde_json::json;

    fn line(value: Value) -> StatLine {
        match value {
            Value::Object(map) => map,
            _ => panic!("stat line must be an object"),
        }
    }

    fn tidus() -> PlayerRecord {
        let mut stats = StatsTable::new();
        stats.insert("2".into(), line(json!({"HP": "130", "SH": "18"})));
        stats.insert(START_KEY.into(), line(json!({"level": "2"})));
        let mut abilities = AbilityTiers::new();
        abilities.insert("0".into(), vec!["Wither Shot".into()]);
        PlayerRecord::new(
            "Tidus",
            "N/A",
            stats,
            vec!["Venom Tackle".into(), "Drain Tackle 2".into()],
            abilities,
        )
    }

    #[test]
    fn stats_at_exact_level() {
        let player = tidus();
        let stats = player.stats_at(2).unwrap();
        assert_eq!(Value::Object(stats.clone()), json!({"HP": "130", "SH": "18"}));
    }

    #[test]
    fn stats_at_falls_back_to_closest_lower_level() {
        let player = tidus();
        let stats = player.stats_at(3).unwrap();
        assert_eq!(Value::Object(stats.clone()), json!({"HP": "130", "SH": "18"}));
    }

    #[test]
    fn stats_at_below_every_level_is_unavailable() {
        let player = tidus();
        let (result, lines) = capture(|| player.stats_at(1).map(|_| ()));
        assert!(matches!(result, Err(BlitzError::StatsUnavailable { level: 1, .. })));
        assert!(logged(&lines, Level::Error, "No stats at or below level 1 for Tidus"));
    }

    #[test]
    fn stats_at_fallback_is_warned() {
        let player = tidus();
        let (result, lines) = capture(|| player.stats_at(5).map(|_| ()));
        assert!(result.is_ok());
        assert!(logged(&lines, Level::Warn, "returning stats for level 2"));
    }

    #[test]
    fn stats_at_prefers_highest_candidate() {
        let mut player = tidus();
        player.stats.insert("1".into(), line(json!({"SH": 20, "EN": 15})));
        player.stats.insert("5".into(), line(json!({"SH": 25, "EN": 19})));
        player.stats.insert("9".into(), line(json!({"SH": 30, "EN": 22})));

        let stats = player.stats_at(7).unwrap();
        assert_eq!(stats.get("SH"), Some(&json!(25)));
        assert_eq!(player.stats_at(1).unwrap().get("SH"), Some(&json!(20)));
    }

    #[test]
    fn start_level_accepts_string_or_number() {
        let mut player = tidus();
        assert_eq!(player.start_level().as_deref(), Some("2"));
        player.stats.insert(START_KEY.into(), line(json!({"level": 2})));
        assert_eq!(player.start_level().as_deref(), Some("2"));
        assert!(player.starting_stats().is_some());
    }

    #[test]
    fn parse_level_ignores_labels() {
        assert_eq!(parse_level("12"), Some(12));
        assert_eq!(parse_level("start"), None);
        assert_eq!(parse_level(""), None);
        assert_eq!(parse_level("-1"), None);
        assert_eq!(tidus().levels(), vec![2]);
    }

    #[test]
    fn fields_accept_null_key_techniques() {
        let fields: PlayerFields = serde_json::from_value(json!({
            "location": "Luca",
            "stats": {"1": {"SH": 3}, "start": {"level": 1}},
            "key_techniques": null,
            "learnable_abilities": {"0": []}
        }))
        .unwrap();
        let player = PlayerRecord::from_fields("Kyou", fields);
        assert!(player.key_techniques.is_empty());
        assert!(player.abilities_at_tier(BASE_TIER).is_empty());
    }

    proptest! {
        #[test]
        fn stats_at_matches_closest_level_rule(
            levels in proptest::collection::btree_set(1u32..60, 1..8),
            requested in 0u32..80,
        ) {
            let mut player = tidus();
            player.stats.clear();
            for lvl in &levels {
                player.stats.insert(lvl.to_string(), line(json!({"LV": lvl})));
            }
            player.stats.insert(START_KEY.into(), line(json!({"level": 1})));

            let expected = levels.iter().copied().filter(|l| *l <= requested).max();
            match (player.stats_at(requested), expected) {
                (Ok(stats), Some(lvl)) => prop_assert_eq!(stats.get("LV"), Some(&json!(lvl))),
                (Err(BlitzError::StatsUnavailable { .. }), None) => {}
                (other, expected) => prop_assert!(false, "got {:?}, expected {:?}", other, expected),
            }
        }
    }
}
