pub mod card;
pub mod player;

pub use card::DisplayError;
pub use player::{
    format_stat_line, parse_level, AbilityTiers, PlayerFields, PlayerRecord, StatLine,
    StatsTable, BASE_TIER, START_KEY,
};
