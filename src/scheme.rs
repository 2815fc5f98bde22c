use chrono::NaiveDate;
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::allocator::{self, Allocation};
use crate::config::{ScheduleConfig, SchemeSettings};
use crate::error::SchemeResult;
use crate::metadata::SchemeMetadata;
use crate::row::Row;
use crate::topic::Topic;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub topic_count: usize,
    pub unit_count: usize,
    pub teaching_slots: usize,
    pub row_count: usize,
    pub break_rows: usize,
    pub dropped_topics: usize,
}

impl GenerationSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("topics={}", self.topic_count));
        parts.push(format!("units={}", self.unit_count));
        parts.push(format!("slots={}", self.teaching_slots));
        parts.push(format!("rows={}", self.row_count));
        if self.break_rows > 0 {
            parts.push(format!("breaks={}", self.break_rows));
        }
        if self.dropped_topics > 0 {
            parts.push(format!("dropped={}", self.dropped_topics));
        }
        parts.join(", ")
    }
}

/// A term's inputs together with the most recent allocation.
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    metadata: SchemeMetadata,
    config: ScheduleConfig,
    topics: Vec<Topic>,
    allocation: Option<Allocation>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(metadata: SchemeMetadata, config: ScheduleConfig, topics: Vec<Topic>) -> Self {
        Self {
            metadata,
            config,
            topics,
            allocation: None,
        }
    }

    pub fn from_settings(settings: SchemeSettings) -> Self {
        Self::from_parts(settings.metadata, settings.schedule, Vec::new())
    }

    pub fn metadata(&self) -> &SchemeMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn allocation(&self) -> Option<&Allocation> {
        self.allocation.as_ref()
    }

    /// Rows of the last generation, empty until [`Scheme::generate`] runs.
    pub fn rows(&self) -> &[Row] {
        self.allocation
            .as_ref()
            .map(|a| a.rows.as_slice())
            .unwrap_or_default()
    }

    pub fn set_metadata(&mut self, metadata: SchemeMetadata) {
        self.metadata = metadata;
        self.allocation = None;
    }

    /// Replaces the layout. The config is validated before it is accepted.
    pub fn set_config(&mut self, config: ScheduleConfig) -> SchemeResult<()> {
        config.validate()?;
        self.config = config;
        self.allocation = None;
        Ok(())
    }

    pub fn update_config<F>(&mut self, update: F) -> SchemeResult<()>
    where
        F: FnOnce(&mut ScheduleConfig),
    {
        let mut config = self.config.clone();
        update(&mut config);
        self.set_config(config)
    }

    pub fn set_topics(&mut self, topics: Vec<Topic>) {
        self.topics = topics;
        self.allocation = None;
    }

    pub fn generate(&mut self) -> SchemeResult<GenerationSummary> {
        let allocation = allocator::allocate(&self.topics, &self.config)?;
        let summary = GenerationSummary {
            topic_count: self.topics.len(),
            unit_count: allocation.units_planned,
            teaching_slots: self.config.teaching_slots(),
            row_count: allocation.rows.len(),
            break_rows: allocation.rows.iter().filter(|r| r.is_break()).count(),
            dropped_topics: allocation.dropped_topics(),
        };
        info!(
            subject = %self.metadata.subject,
            total_weeks = self.config.total_weeks,
            lessons_per_week = self.config.lessons_per_week,
            summary = %summary.to_cli_summary(),
            "scheme generated"
        );
        self.allocation = Some(allocation);
        Ok(summary)
    }

    /// Tabular view of the generated rows, one record per row.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let rows = self.rows();
        let mut columns: Vec<Column> = Vec::with_capacity(10);

        let weeks: Vec<i32> = rows.iter().map(|r| r.week() as i32).collect();
        columns.push(Series::new(PlSmallStr::from_static("week"), weeks).into_column());

        let commencing: Vec<Option<i32>> = rows
            .iter()
            .map(|r| self.metadata.week_commencing(r.week()).map(date_to_i32))
            .collect();
        columns.push(
            Series::new(PlSmallStr::from_static("week_commencing"), commencing)
                .cast(&DataType::Date)?
                .into_column(),
        );

        let lessons: Vec<Option<i32>> = rows.iter().map(|r| r.lesson().map(|l| l as i32)).collect();
        columns.push(Series::new(PlSmallStr::from_static("lesson"), lessons).into_column());

        let field_names = [
            "topic",
            "sub_topic",
            "objectives",
            "activities",
            "aids",
            "reference",
        ];
        for (field_idx, name) in field_names.into_iter().enumerate() {
            let values: Vec<Option<&str>> = rows
                .iter()
                .map(|r| r.topic().map(|t| t.fields()[field_idx]))
                .collect();
            columns.push(Series::new(name.into(), values).into_column());
        }

        let titles: Vec<Option<&str>> = rows
            .iter()
            .map(|r| match r {
                Row::Break { title, .. } => Some(title.as_str()),
                Row::Lesson { .. } => None,
            })
            .collect();
        columns.push(Series::new(PlSmallStr::from_static("break_title"), titles).into_column());

        DataFrame::new(columns)
    }
}

fn date_to_i32(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    (date - epoch).num_days() as i32
}
