//! Topic-to-calendar allocation.
//!
//! Allocation runs in two phases. [`build_lesson_plan`] turns the topic list
//! into one [`LessonPlanUnit`] per lesson slot of the whole term, either
//! merging several topics into a unit or stretching a topic over several
//! units. [`map_to_calendar`] then walks the weeks, emitting a marker for
//! each break week and laying the units onto the remaining lesson slots.
//!
//! Break weeks are only applied in the second phase, so a term with breaks
//! always has fewer usable slots than planned units. Trailing units that do
//! not fit are never built, and any topic that loses every unit is reported
//! as [`AllocationWarning::TopicOverflow`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ScheduleConfig;
use crate::error::SchemeResult;
use crate::row::Row;
use crate::topic::Topic;

/// Topics sharing one lesson slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPlanUnit<'a> {
    topics: Vec<(usize, &'a Topic)>,
}

impl<'a> LessonPlanUnit<'a> {
    /// Indices into the original topic list, in order.
    pub fn topic_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.topics.iter().map(|(idx, _)| *idx)
    }

    pub fn topics(&self) -> impl Iterator<Item = &'a Topic> + '_ {
        self.topics.iter().map(|(_, topic)| *topic)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationWarning {
    /// Trailing topics had no teaching slot left and were not placed.
    TopicOverflow { placed: usize, dropped: usize },
}

impl std::fmt::Display for AllocationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationWarning::TopicOverflow { placed, dropped } => write!(
                f,
                "{dropped} topic(s) did not fit in the available lessons ({placed} placed)"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub rows: Vec<Row>,
    pub warnings: Vec<AllocationWarning>,
    pub units_planned: usize,
    pub units_placed: usize,
    pub topics_placed: usize,
}

impl Allocation {
    pub fn dropped_topics(&self) -> usize {
        self.warnings
            .iter()
            .map(|w| match w {
                AllocationWarning::TopicOverflow { dropped, .. } => *dropped,
            })
            .sum()
    }

    pub fn has_overflow(&self) -> bool {
        self.dropped_topics() > 0
    }
}

/// Allocates `topics` across the term described by `config`.
pub fn allocate(topics: &[Topic], config: &ScheduleConfig) -> SchemeResult<Allocation> {
    config.validate()?;

    let total_slots = config.total_lesson_slots();
    // Units past the last teaching slot would be dropped, so they are never built.
    let plan = build_lesson_plan(topics, total_slots, config.teaching_slots());
    let units_planned = planned_unit_count(topics.len(), total_slots);
    let (rows, units_placed) = map_to_calendar(&plan, config);

    // Units are ordered, so the placed topics are always a prefix.
    let topics_placed = plan[..units_placed]
        .last()
        .and_then(|unit| unit.topic_indices().last())
        .map_or(0, |idx| idx + 1);

    let mut warnings = Vec::new();
    if topics_placed < topics.len() {
        let dropped = topics.len() - topics_placed;
        warn!(
            topics = topics.len(),
            placed = topics_placed,
            dropped,
            teaching_slots = config.teaching_slots(),
            "topics exceed available lesson slots"
        );
        warnings.push(AllocationWarning::TopicOverflow {
            placed: topics_placed,
            dropped,
        });
    }

    debug!(
        units_planned,
        units_placed,
        rows = rows.len(),
        "allocation complete"
    );

    Ok(Allocation {
        rows,
        warnings,
        units_planned,
        units_placed,
        topics_placed,
    })
}

/// Units phase one produces for `total_topics` over `total_slots`, whether
/// or not they are all built.
pub fn planned_unit_count(total_topics: usize, total_slots: usize) -> usize {
    if total_topics == 0 || total_slots == 0 {
        0
    } else if total_topics > total_slots {
        total_topics.div_ceil(total_topics.div_ceil(total_slots))
    } else {
        total_slots
    }
}

/// Phase one: one unit per lesson slot, at most `total_slots` units. Only the
/// first `limit` units are built.
pub fn build_lesson_plan(
    topics: &[Topic],
    total_slots: usize,
    limit: usize,
) -> Vec<LessonPlanUnit<'_>> {
    let total_topics = topics.len();
    if total_topics == 0 || total_slots == 0 || limit == 0 {
        return Vec::new();
    }

    let indexed: Vec<(usize, &Topic)> = topics.iter().enumerate().collect();

    if total_topics > total_slots {
        let per_lesson = total_topics.div_ceil(total_slots);
        indexed
            .chunks(per_lesson)
            .take(limit)
            .map(|chunk| LessonPlanUnit {
                topics: chunk.to_vec(),
            })
            .collect()
    } else {
        let per_topic = total_slots / total_topics;
        let extra = total_slots % total_topics;
        indexed
            .into_iter()
            .enumerate()
            .flat_map(|(position, entry)| {
                let stretch = per_topic + usize::from(position < extra);
                std::iter::repeat_n(entry, stretch)
            })
            .take(limit)
            .map(|entry| LessonPlanUnit {
                topics: vec![entry],
            })
            .collect()
    }
}

/// Phase two: lay units onto weeks and lessons. Returns the rows and the
/// number of units consumed.
pub fn map_to_calendar(plan: &[LessonPlanUnit<'_>], config: &ScheduleConfig) -> (Vec<Row>, usize) {
    let mut rows = Vec::new();
    let mut units = plan.iter();
    let mut consumed = 0;

    for week in 1..=config.total_weeks {
        if let Some(spec) = config.break_for(week) {
            rows.push(Row::Break {
                week,
                title: spec.title.clone(),
            });
            continue;
        }

        for lesson in 1..=config.lessons_per_week {
            let Some(unit) = units.next() else {
                break;
            };
            consumed += 1;
            rows.extend(unit.topics().map(|topic| Row::Lesson {
                week,
                lesson,
                topic: topic.clone(),
            }));
        }
    }

    (rows, consumed)
}
