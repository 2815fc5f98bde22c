use super::{SourceError, SourceResult, TopicSource};
use crate::Topic;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The topic API wraps its list as `{ "data": [...] }`; plain arrays are
/// accepted too.
pub fn parse_topics_json(input: &str) -> SourceResult<Vec<Topic>> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    match value {
        serde_json::Value::Object(mut map) => match map.remove("data") {
            Some(data) => Ok(serde_json::from_value(data)?),
            None => Err(SourceError::InvalidData(
                "expected a topic array or an object with a `data` array".into(),
            )),
        },
        other => Ok(serde_json::from_value(other)?),
    }
}

pub fn load_topics_from_json<P: AsRef<Path>>(path: P) -> SourceResult<Vec<Topic>> {
    let mut contents = String::new();
    File::open(path.as_ref())?.read_to_string(&mut contents)?;
    let topics = parse_topics_json(&contents)?;
    debug!(path = %path.as_ref().display(), count = topics.len(), "loaded topics from json");
    Ok(topics)
}

/// Columns accepted in a topic CSV. Values are taken verbatim.
#[derive(Deserialize)]
struct TopicCsvRecord {
    #[serde(default, alias = "Topic")]
    topic: String,
    #[serde(default, alias = "subTopic", alias = "Sub-Topic")]
    sub_topic: String,
    #[serde(default, alias = "Objectives")]
    objectives: String,
    #[serde(default, alias = "T/L Activities")]
    activities: String,
    #[serde(default, alias = "T/L Aids")]
    aids: String,
    #[serde(default, alias = "Reference")]
    reference: String,
}

impl From<TopicCsvRecord> for Topic {
    fn from(record: TopicCsvRecord) -> Self {
        Topic {
            topic: record.topic,
            sub_topic: record.sub_topic,
            objectives: record.objectives,
            activities: record.activities,
            aids: record.aids,
            reference: record.reference,
        }
    }
}

pub fn load_topics_from_csv<P: AsRef<Path>>(path: P) -> SourceResult<Vec<Topic>> {
    let file = File::open(path.as_ref())?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();
    if !headers
        .iter()
        .any(|h| matches!(h.trim(), "topic" | "Topic"))
    {
        return Err(SourceError::InvalidData(
            "CSV file is missing a `topic` column".into(),
        ));
    }

    let mut topics = Vec::new();
    for record in reader.deserialize::<TopicCsvRecord>() {
        topics.push(Topic::from(record?));
    }
    debug!(path = %path.as_ref().display(), count = topics.len(), "loaded topics from csv");
    Ok(topics)
}

#[derive(Debug, Clone)]
pub struct JsonTopicFile {
    path: PathBuf,
}

impl JsonTopicFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TopicSource for JsonTopicFile {
    fn load_topics(&self) -> SourceResult<Vec<Topic>> {
        load_topics_from_json(&self.path)
    }
}

#[derive(Debug, Clone)]
pub struct CsvTopicFile {
    path: PathBuf,
}

impl CsvTopicFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TopicSource for CsvTopicFile {
    fn load_topics(&self) -> SourceResult<Vec<Topic>> {
        load_topics_from_csv(&self.path)
    }
}
