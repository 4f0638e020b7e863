use serde::{Deserialize, Serialize};

use crate::FeatureError;

pub const FEATURE_COUNT: usize = 15;
pub const TOPIC_COUNT: usize = 5;

/// Column order the regression model was fit against.
///
/// The model sees positions only, so [`FeatureRow::to_vector`] must emit
/// values in exactly this order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "type",
    "is_adapted",
    "air_time",
    "is_exclusive",
    "origin",
    "episode_count",
    "likes",
    "coins",
    "collects",
    "shares",
    "topic_0",
    "topic_1",
    "topic_2",
    "topic_3",
    "topic_4",
];

// ---------------------------------------------------------------------------
// Categorical codes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimeType {
    ChildrenEducation,
    FantasyAdventure,
    RomanceLife,
    SuspenseThriller,
    LiteraryHistorical,
}

impl AnimeType {
    pub const ALL: [AnimeType; 5] = [
        AnimeType::ChildrenEducation,
        AnimeType::FantasyAdventure,
        AnimeType::RomanceLife,
        AnimeType::SuspenseThriller,
        AnimeType::LiteraryHistorical,
    ];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            AnimeType::ChildrenEducation => 1,
            AnimeType::FantasyAdventure => 2,
            AnimeType::RomanceLife => 3,
            AnimeType::SuspenseThriller => 4,
            AnimeType::LiteraryHistorical => 5,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AnimeType::ChildrenEducation => "Children / education",
            AnimeType::FantasyAdventure => "Fantasy / adventure",
            AnimeType::RomanceLife => "Romance / slice of life",
            AnimeType::SuspenseThriller => "Suspense / thriller",
            AnimeType::LiteraryHistorical => "Literary / historical",
        }
    }

    /// # Errors
    ///
    /// Returns [`FeatureError::InvalidChoice`] for codes outside 1..=5.
    pub fn from_code(code: i64) -> Result<Self, FeatureError> {
        Self::ALL
            .into_iter()
            .find(|t| i64::from(t.code()) == code)
            .ok_or(FeatureError::InvalidChoice {
                field: "type",
                value: code,
                allowed: "1, 2, 3, 4, 5",
            })
    }
}

/// Premiere season. Holiday months are January, February, July and August.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirTime {
    Regular,
    Holiday,
}

impl AirTime {
    pub const ALL: [AirTime; 2] = [AirTime::Regular, AirTime::Holiday];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            AirTime::Regular => 0,
            AirTime::Holiday => 1,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AirTime::Regular => "Regular season (other months)",
            AirTime::Holiday => "Holiday season (Jan, Feb, Jul, Aug)",
        }
    }

    /// # Errors
    ///
    /// Returns [`FeatureError::InvalidChoice`] for codes other than 0 and 1.
    pub fn from_code(code: i64) -> Result<Self, FeatureError> {
        match code {
            0 => Ok(AirTime::Regular),
            1 => Ok(AirTime::Holiday),
            _ => Err(FeatureError::InvalidChoice {
                field: "air_time",
                value: code,
                allowed: "0, 1",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Japan,
    UnitedStates,
    China,
}

impl Origin {
    pub const ALL: [Origin; 3] = [Origin::Japan, Origin::UnitedStates, Origin::China];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Origin::Japan => 1,
            Origin::UnitedStates => 2,
            Origin::China => 3,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Origin::Japan => "Japan",
            Origin::UnitedStates => "United States",
            Origin::China => "China",
        }
    }

    /// # Errors
    ///
    /// Returns [`FeatureError::InvalidChoice`] for codes outside 1..=3.
    pub fn from_code(code: i64) -> Result<Self, FeatureError> {
        Self::ALL
            .into_iter()
            .find(|o| i64::from(o.code()) == code)
            .ok_or(FeatureError::InvalidChoice {
                field: "origin",
                value: code,
                allowed: "1, 2, 3",
            })
    }
}

fn flag_from_code(field: &'static str, code: i64) -> Result<bool, FeatureError> {
    match code {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(FeatureError::InvalidChoice {
            field,
            value: code,
            allowed: "0, 1",
        }),
    }
}

// ---------------------------------------------------------------------------
// Bounded numerics
// ---------------------------------------------------------------------------

/// Episode count in `[1, 500]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EpisodeCount(u16);

impl EpisodeCount {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 500;

    /// # Errors
    ///
    /// Returns [`FeatureError::OutOfRange`] when `value` is outside `[1, 500]`.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(value: i64) -> Result<Self, FeatureError> {
        u16::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(EpisodeCount)
            .ok_or(FeatureError::OutOfRange {
                field: "episode_count",
                value: value as f64,
                min: f64::from(Self::MIN),
                max: f64::from(Self::MAX),
            })
    }

    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }
}

/// Topic-model affinity in `[0.0, 1.0]`. NaN is rejected.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TopicWeight(f64);

impl TopicWeight {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;

    /// # Errors
    ///
    /// Returns [`FeatureError::OutOfRange`] when `value` is NaN or outside
    /// `[0.0, 1.0]`.
    pub fn new(field: &'static str, value: f64) -> Result<Self, FeatureError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(TopicWeight(value))
        } else {
            Err(FeatureError::OutOfRange {
                field,
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, FeatureError> {
    u64::try_from(value).map_err(|_| FeatureError::Negative { field, value })
}

// ---------------------------------------------------------------------------
// FeatureRow
// ---------------------------------------------------------------------------

/// One fully-validated model input. Every field is in its domain by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    pub anime_type: AnimeType,
    pub is_adapted: bool,
    pub air_time: AirTime,
    pub is_exclusive: bool,
    pub origin: Origin,
    pub episode_count: EpisodeCount,
    pub likes: u64,
    pub coins: u64,
    pub collects: u64,
    pub shares: u64,
    pub topics: [TopicWeight; TOPIC_COUNT],
}

impl FeatureRow {
    /// Positional model input, laid out in [`FEATURE_NAMES`] order.
    #[must_use]
    // Engagement counts far beyond 2^53 are not meaningful inputs.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        let [t0, t1, t2, t3, t4] = self.topics.map(TopicWeight::get);
        [
            f64::from(self.anime_type.code()),
            f64::from(u8::from(self.is_adapted)),
            f64::from(self.air_time.code()),
            f64::from(u8::from(self.is_exclusive)),
            f64::from(self.origin.code()),
            f64::from(self.episode_count.get()),
            self.likes as f64,
            self.coins as f64,
            self.collects as f64,
            self.shares as f64,
            t0,
            t1,
            t2,
            t3,
            t4,
        ]
    }
}

// ---------------------------------------------------------------------------
// FeatureInput
// ---------------------------------------------------------------------------

/// Raw values as submitted by a front end, before domain checks.
///
/// Missing fields take the form's pre-filled defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureInput {
    #[serde(rename = "type")]
    pub anime_type: i64,
    pub is_adapted: i64,
    pub air_time: i64,
    pub is_exclusive: i64,
    pub origin: i64,
    pub episode_count: i64,
    pub likes: i64,
    pub coins: i64,
    pub collects: i64,
    pub shares: i64,
    pub topic_0: f64,
    pub topic_1: f64,
    pub topic_2: f64,
    pub topic_3: f64,
    pub topic_4: f64,
}

impl Default for FeatureInput {
    fn default() -> Self {
        Self {
            anime_type: 1,
            is_adapted: 0,
            air_time: 0,
            is_exclusive: 0,
            origin: 1,
            episode_count: 12,
            likes: 50_000,
            coins: 20_000,
            collects: 10_000,
            shares: 5_000,
            topic_0: 0.1,
            topic_1: 0.1,
            topic_2: 0.1,
            topic_3: 0.1,
            topic_4: 0.1,
        }
    }
}

impl FeatureInput {
    #[must_use]
    pub fn topics(&self) -> [f64; TOPIC_COUNT] {
        [
            self.topic_0,
            self.topic_1,
            self.topic_2,
            self.topic_3,
            self.topic_4,
        ]
    }

    /// Overwrite the five topic weights in order.
    pub fn set_topics(&mut self, topics: [f64; TOPIC_COUNT]) {
        [
            self.topic_0,
            self.topic_1,
            self.topic_2,
            self.topic_3,
            self.topic_4,
        ] = topics;
    }
}

impl TryFrom<&FeatureInput> for FeatureRow {
    type Error = FeatureError;

    fn try_from(input: &FeatureInput) -> Result<Self, Self::Error> {
        Ok(FeatureRow {
            anime_type: AnimeType::from_code(input.anime_type)?,
            is_adapted: flag_from_code("is_adapted", input.is_adapted)?,
            air_time: AirTime::from_code(input.air_time)?,
            is_exclusive: flag_from_code("is_exclusive", input.is_exclusive)?,
            origin: Origin::from_code(input.origin)?,
            episode_count: EpisodeCount::new(input.episode_count)?,
            likes: non_negative("likes", input.likes)?,
            coins: non_negative("coins", input.coins)?,
            collects: non_negative("collects", input.collects)?,
            shares: non_negative("shares", input.shares)?,
            topics: [
                TopicWeight::new("topic_0", input.topic_0)?,
                TopicWeight::new("topic_1", input.topic_1)?,
                TopicWeight::new("topic_2", input.topic_2)?,
                TopicWeight::new("topic_3", input.topic_3)?,
                TopicWeight::new("topic_4", input.topic_4)?,
            ],
        })
    }
}

impl TryFrom<FeatureInput> for FeatureRow {
    type Error = FeatureError;

    fn try_from(input: FeatureInput) -> Result<Self, Self::Error> {
        FeatureRow::try_from(&input)
    }
}

#[cfg(test)]
#[path = "features_test.rs"]
mod tests;
