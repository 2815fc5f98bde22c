use serde::{Deserialize, Serialize};

use crate::topic::Topic;

/// Column names handed to renderers, in display order.
pub const HEADER: [&str; 8] = [
    "Week",
    "Lesson",
    "Topic",
    "Sub-Topic",
    "Objectives",
    "T/L Activities",
    "T/L Aids",
    "Reference",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Row {
    /// Spans the whole table width.
    Break { week: u32, title: String },
    Lesson { week: u32, lesson: u32, topic: Topic },
}

impl Row {
    pub fn week(&self) -> u32 {
        match self {
            Row::Break { week, .. } | Row::Lesson { week, .. } => *week,
        }
    }

    pub fn lesson(&self) -> Option<u32> {
        match self {
            Row::Break { .. } => None,
            Row::Lesson { lesson, .. } => Some(*lesson),
        }
    }

    pub fn topic(&self) -> Option<&Topic> {
        match self {
            Row::Break { .. } => None,
            Row::Lesson { topic, .. } => Some(topic),
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Row::Break { .. })
    }

    /// Label shown in the full-width cell of a break row.
    pub fn break_label(&self) -> Option<String> {
        match self {
            Row::Break { week, title } => Some(format!("Week {week}: {title}")),
            Row::Lesson { .. } => None,
        }
    }

    /// Display cells: one spanning label for a break, eight cells otherwise.
    pub fn cells(&self) -> Vec<String> {
        match self {
            Row::Break { .. } => self.break_label().into_iter().collect(),
            Row::Lesson {
                week,
                lesson,
                topic,
            } => {
                let mut cells = Vec::with_capacity(HEADER.len());
                cells.push(format!("Week {week}"));
                cells.push(format!("Lesson {lesson}"));
                cells.extend(topic.fields().iter().map(|f| f.to_string()));
                cells
            }
        }
    }
}
