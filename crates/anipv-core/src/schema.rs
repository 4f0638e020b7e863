//! Front-end description of each feature column: label, help text, domain
//! and pre-filled default. Listed in model column order.

use serde::Serialize;

use crate::features::FEATURE_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Choice {
    pub value: i64,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureDomain {
    /// Closed set of integer codes, rendered as a select.
    Choice {
        options: &'static [Choice],
        default: i64,
    },
    /// Integer with an inclusive lower bound and optional upper bound.
    Integer {
        min: i64,
        max: Option<i64>,
        default: i64,
    },
    /// Float weight, rendered as a slider.
    Weight {
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    pub group: &'static str,
    pub domain: FeatureDomain,
}

const TYPE_OPTIONS: &[Choice] = &[
    Choice {
        value: 1,
        label: "Children / education",
    },
    Choice {
        value: 2,
        label: "Fantasy / adventure",
    },
    Choice {
        value: 3,
        label: "Romance / slice of life",
    },
    Choice {
        value: 4,
        label: "Suspense / thriller",
    },
    Choice {
        value: 5,
        label: "Literary / historical",
    },
];

const YES_NO_OPTIONS: &[Choice] = &[
    Choice {
        value: 0,
        label: "No",
    },
    Choice {
        value: 1,
        label: "Yes",
    },
];

const AIR_TIME_OPTIONS: &[Choice] = &[
    Choice {
        value: 0,
        label: "Regular season (other months)",
    },
    Choice {
        value: 1,
        label: "Holiday season (Jan, Feb, Jul, Aug)",
    },
];

const ORIGIN_OPTIONS: &[Choice] = &[
    Choice {
        value: 1,
        label: "Japan",
    },
    Choice {
        value: 2,
        label: "United States",
    },
    Choice {
        value: 3,
        label: "China",
    },
];

pub const GROUP_BASIC: &str = "Basic info";
pub const GROUP_ENGAGEMENT: &str = "Engagement";
pub const GROUP_TOPICS: &str = "Topic weights (0-1)";

const fn count(
    name: &'static str,
    label: &'static str,
    help: &'static str,
    default: i64,
) -> FeatureSpec {
    FeatureSpec {
        name,
        label,
        help,
        group: GROUP_ENGAGEMENT,
        domain: FeatureDomain::Integer {
            min: 0,
            max: None,
            default,
        },
    }
}

const fn topic(name: &'static str, label: &'static str, help: &'static str) -> FeatureSpec {
    FeatureSpec {
        name,
        label,
        help,
        group: GROUP_TOPICS,
        domain: FeatureDomain::Weight {
            min: 0.0,
            max: 1.0,
            step: 0.01,
            default: 0.1,
        },
    }
}

pub static FEATURE_SPECS: [FeatureSpec; FEATURE_COUNT] = [
    FeatureSpec {
        name: "type",
        label: "Genre",
        help: "Primary genre of the title",
        group: GROUP_BASIC,
        domain: FeatureDomain::Choice {
            options: TYPE_OPTIONS,
            default: 1,
        },
    },
    FeatureSpec {
        name: "is_adapted",
        label: "Adapted",
        help: "Whether the title is adapted from a manga, novel or other source",
        group: GROUP_BASIC,
        domain: FeatureDomain::Choice {
            options: YES_NO_OPTIONS,
            default: 0,
        },
    },
    FeatureSpec {
        name: "air_time",
        label: "Premiere window",
        help: "Whether the title premiered in the holiday months (Jan, Feb, Jul, Aug)",
        group: GROUP_BASIC,
        domain: FeatureDomain::Choice {
            options: AIR_TIME_OPTIONS,
            default: 0,
        },
    },
    FeatureSpec {
        name: "is_exclusive",
        label: "Platform exclusive",
        help: "Whether the title streams exclusively on the platform",
        group: GROUP_BASIC,
        domain: FeatureDomain::Choice {
            options: YES_NO_OPTIONS,
            default: 0,
        },
    },
    FeatureSpec {
        name: "origin",
        label: "Origin",
        help: "Main producing country or region",
        group: GROUP_BASIC,
        domain: FeatureDomain::Choice {
            options: ORIGIN_OPTIONS,
            default: 1,
        },
    },
    FeatureSpec {
        name: "episode_count",
        label: "Episodes",
        help: "Total number of episodes",
        group: GROUP_ENGAGEMENT,
        domain: FeatureDomain::Integer {
            min: 1,
            max: Some(500),
            default: 12,
        },
    },
    count("likes", "Likes", "Like count on the platform (PV)", 50_000),
    count("coins", "Coins", "Coin count on the platform (PV)", 20_000),
    count("collects", "Collects", "Collect count on the platform (PV)", 10_000),
    count("shares", "Shares", "Share count on the platform (PV)", 5_000),
    topic("topic_0", "Topic 0", "Weight of the title on topic 0"),
    topic("topic_1", "Topic 1", "Weight of the title on topic 1"),
    topic("topic_2", "Topic 2", "Weight of the title on topic 2"),
    topic("topic_3", "Topic 3", "Weight of the title on topic 3"),
    topic("topic_4", "Topic 4", "Weight of the title on topic 4"),
];
