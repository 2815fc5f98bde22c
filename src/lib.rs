pub mod allocator;
pub mod config;
pub mod error;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod metadata;
pub mod render;
pub mod row;
pub mod scheme;
pub mod source;
pub mod topic;

pub use allocator::{Allocation, AllocationWarning, LessonPlanUnit, allocate};
pub use config::{BreakSpec, ConfigError, ScheduleConfig, SchemeSettings};
pub use error::{SchemeError, SchemeResult};
pub use metadata::SchemeMetadata;
pub use render::{RenderError, render_dataframe, render_preview, save_rows_to_csv, write_rows_csv};
pub use row::{HEADER, Row};
pub use scheme::{GenerationSummary, Scheme};
pub use source::{
    CsvTopicFile, JsonTopicFile, SourceError, TopicSource, load_topics_from_csv,
    load_topics_from_json, parse_topics_json,
};
#[cfg(feature = "remote")]
pub use source::HttpTopicSource;
pub use topic::Topic;
