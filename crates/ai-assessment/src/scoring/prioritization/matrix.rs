use serde::{Deserialize, Serialize};

use crate::assessment::report::{Level, PriorityLevel};

/// Cut-offs for the value/effort quadrant rule and the heatmap axes.
///
/// | value            | effort          | priority          |
/// |------------------|-----------------|-------------------|
/// | `>= high_value`  | `<= low_effort` | `high`            |
/// | `>= high_value`  | `> low_effort`  | `medium`          |
/// | `< viable_value` | any             | `not_recommended` |
/// | otherwise        |                 | `low`             |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityThresholds {
    pub high_value: u8,
    pub low_effort: u8,
    pub viable_value: u8,
    pub effort_low_level: u8,
    pub effort_medium_level: u8,
}

impl PriorityThresholds {
    pub const DEFAULT: Self = Self {
        high_value: 60,
        low_effort: 50,
        viable_value: 40,
        effort_low_level: 40,
        effort_medium_level: 60,
    };

    pub fn bucket(&self, value_score: u8, effort_score: u8) -> PriorityLevel {
        if value_score >= self.high_value {
            if effort_score <= self.low_effort {
                PriorityLevel::High
            } else {
                PriorityLevel::Medium
            }
        } else if value_score < self.viable_value {
            PriorityLevel::NotRecommended
        } else {
            PriorityLevel::Low
        }
    }

    pub fn value_level(&self, value_score: u8) -> Level {
        if value_score >= self.high_value {
            Level::High
        } else if value_score >= self.viable_value {
            Level::Medium
        } else {
            Level::Low
        }
    }

    pub fn effort_level(&self, effort_score: u8) -> Level {
        if effort_score <= self.effort_low_level {
            Level::Low
        } else if effort_score <= self.effort_medium_level {
            Level::Medium
        } else {
            Level::High
        }
    }
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_value_and_effort_is_high_priority() {
        let thresholds = PriorityThresholds::DEFAULT;
        assert_eq!(thresholds.bucket(60, 50), PriorityLevel::High);
        assert_eq!(thresholds.bucket(60, 51), PriorityLevel::Medium);
        assert_eq!(thresholds.bucket(59, 50), PriorityLevel::Low);
    }

    #[test]
    fn rule_table() {
        let thresholds = PriorityThresholds::DEFAULT;
        let cases = [
            (100, 0, PriorityLevel::High),
            (80, 80, PriorityLevel::Medium),
            (40, 0, PriorityLevel::Low),
            (40, 100, PriorityLevel::Low),
            (39, 0, PriorityLevel::NotRecommended),
            (20, 80, PriorityLevel::NotRecommended),
        ];
        for (value, effort, expected) in cases {
            assert_eq!(thresholds.bucket(value, effort), expected, "({value}, {effort})");
        }
    }

    #[test]
    fn levels_follow_thresholds() {
        let thresholds = PriorityThresholds::DEFAULT;
        assert_eq!(thresholds.value_level(60), Level::High);
        assert_eq!(thresholds.value_level(40), Level::Medium);
        assert_eq!(thresholds.value_level(39), Level::Low);
        assert_eq!(thresholds.effort_level(40), Level::Low);
        assert_eq!(thresholds.effort_level(60), Level::Medium);
        assert_eq!(thresholds.effort_level(61), Level::High);
    }
}
