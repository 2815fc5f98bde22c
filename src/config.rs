//! Term layout configuration.
//!
//! A [`ScheduleConfig`] is always passed into the allocator explicitly. The
//! defaults mirror a common secondary-school term: twenty weeks of five
//! lessons with two mid-term breaks.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SchemeError;
use crate::metadata::SchemeMetadata;

pub const DEFAULT_TOTAL_WEEKS: u32 = 20;
pub const DEFAULT_LESSONS_PER_WEEK: u32 = 5;
pub const DEFAULT_BREAK_TITLE: &str = "Mid-Term Break";
/// Upper bound on `total_weeks * lessons_per_week`.
pub const MAX_LESSON_SLOTS: usize = 100_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] SchemeError),
}

/// A week with no teaching, shown as a single marker row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakSpec {
    /// 1-based week number.
    pub week: u32,
    pub title: String,
}

impl BreakSpec {
    pub fn new(week: u32, title: impl Into<String>) -> Self {
        Self {
            week,
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_total_weeks")]
    pub total_weeks: u32,
    #[serde(default = "default_lessons_per_week")]
    pub lessons_per_week: u32,
    #[serde(default = "default_breaks")]
    pub breaks: Vec<BreakSpec>,
}

fn default_total_weeks() -> u32 {
    DEFAULT_TOTAL_WEEKS
}

fn default_lessons_per_week() -> u32 {
    DEFAULT_LESSONS_PER_WEEK
}

fn default_breaks() -> Vec<BreakSpec> {
    vec![
        BreakSpec::new(2, DEFAULT_BREAK_TITLE),
        BreakSpec::new(4, DEFAULT_BREAK_TITLE),
    ]
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            total_weeks: DEFAULT_TOTAL_WEEKS,
            lessons_per_week: DEFAULT_LESSONS_PER_WEEK,
            breaks: default_breaks(),
        }
    }
}

impl ScheduleConfig {
    pub fn new(total_weeks: u32, lessons_per_week: u32) -> Self {
        Self {
            total_weeks,
            lessons_per_week,
            breaks: Vec::new(),
        }
    }

    pub fn with_break(mut self, week: u32, title: impl Into<String>) -> Self {
        self.breaks.push(BreakSpec::new(week, title));
        self
    }

    pub fn validate(&self) -> Result<(), SchemeError> {
        if self.total_weeks == 0 {
            return Err(SchemeError::InvalidConfig(
                "total_weeks must be at least 1".into(),
            ));
        }
        if self.lessons_per_week == 0 {
            return Err(SchemeError::InvalidConfig(
                "lessons_per_week must be at least 1".into(),
            ));
        }
        if self.total_lesson_slots() > MAX_LESSON_SLOTS {
            return Err(SchemeError::InvalidConfig(format!(
                "total_weeks * lessons_per_week must not exceed {MAX_LESSON_SLOTS} (got {} x {})",
                self.total_weeks, self.lessons_per_week
            )));
        }
        Ok(())
    }

    /// Every lesson slot in the term, break weeks included.
    pub fn total_lesson_slots(&self) -> usize {
        (self.total_weeks as usize).saturating_mul(self.lessons_per_week as usize)
    }

    /// Lesson slots left once in-range break weeks are taken out.
    pub fn teaching_slots(&self) -> usize {
        let break_weeks: BTreeSet<u32> = self
            .breaks
            .iter()
            .map(|b| b.week)
            .filter(|week| (1..=self.total_weeks).contains(week))
            .collect();
        let teaching_weeks = self.total_weeks as usize - break_weeks.len();
        teaching_weeks.saturating_mul(self.lessons_per_week as usize)
    }

    /// First break declared for `week`. Weeks outside the term never match.
    pub fn break_for(&self, week: u32) -> Option<&BreakSpec> {
        if week == 0 || week > self.total_weeks {
            return None;
        }
        self.breaks.iter().find(|b| b.week == week)
    }

    /// Adds or retitles the break for `week`.
    pub fn set_break(&mut self, week: u32, title: impl Into<String>) {
        let title = title.into();
        match self.breaks.iter_mut().find(|b| b.week == week) {
            Some(existing) => existing.title = title,
            None => {
                self.breaks.push(BreakSpec::new(week, title));
                self.breaks.sort_by_key(|b| b.week);
            }
        }
    }

    /// Removes every break declared for `week`, returning whether any existed.
    pub fn remove_break(&mut self, week: u32) -> bool {
        let before = self.breaks.len();
        self.breaks.retain(|b| b.week != week);
        self.breaks.len() != before
    }
}

/// Contents of a settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeSettings {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub metadata: SchemeMetadata,
}

impl SchemeSettings {
    /// Loads and validates settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(s)?;
        settings.schedule.validate()?;
        Ok(settings)
    }
}
