use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Title block printed ahead of the scheme table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeMetadata {
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default = "default_term")]
    pub term: String,
    #[serde(default)]
    pub school: String,
    /// Monday of week 1, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_start: Option<NaiveDate>,
}

fn default_subject() -> String {
    "New Subject".to_string()
}

fn default_term() -> String {
    "Term 1".to_string()
}

impl Default for SchemeMetadata {
    fn default() -> Self {
        Self {
            subject: default_subject(),
            term: default_term(),
            school: String::new(),
            term_start: None,
        }
    }
}

impl SchemeMetadata {
    pub fn week_commencing(&self, week: u32) -> Option<NaiveDate> {
        let start = self.term_start?;
        let offset = i64::from(week.checked_sub(1)?) * 7;
        start.checked_add_signed(Duration::days(offset))
    }

    /// Non-empty title lines in display order.
    pub fn title_lines(&self) -> Vec<&str> {
        [self.subject.as_str(), self.term.as_str(), self.school.as_str()]
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect()
    }
}
