use chrono::NaiveDate;
use scheme_tool::{BreakSpec, ConfigError, ScheduleConfig, SchemeSettings};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn default_config_matches_standard_term() {
    let config = ScheduleConfig::default();
    assert_eq!(config.total_weeks, 20);
    assert_eq!(config.lessons_per_week, 5);
    assert_eq!(
        config.breaks,
        vec![
            BreakSpec::new(2, "Mid-Term Break"),
            BreakSpec::new(4, "Mid-Term Break"),
        ]
    );
    assert_eq!(config.total_lesson_slots(), 100);
    assert_eq!(config.teaching_slots(), 90);
}

#[test]
fn teaching_slots_ignore_duplicate_and_out_of_range_breaks() {
    let config = ScheduleConfig::new(3, 2)
        .with_break(2, "A")
        .with_break(2, "B")
        .with_break(9, "Later");
    assert_eq!(config.teaching_slots(), 4);
    assert_eq!(config.break_for(2).map(|b| b.title.as_str()), Some("A"));
    assert!(config.break_for(9).is_none());
}

#[test]
fn set_break_retitles_existing_week() {
    let mut config = ScheduleConfig::new(5, 1).with_break(3, "Holiday");
    config.set_break(3, "Exams");
    config.set_break(1, "Orientation");
    assert_eq!(
        config.breaks,
        vec![BreakSpec::new(1, "Orientation"), BreakSpec::new(3, "Exams")]
    );
    assert!(config.remove_break(1));
    assert!(!config.remove_break(1));
}

#[test]
fn settings_parse_from_toml() {
    let settings = SchemeSettings::from_toml_str(
        r#"
        [schedule]
        total_weeks = 12
        lessons_per_week = 4

        [[schedule.breaks]]
        week = 6
        title = "Half Term"

        [metadata]
        subject = "Chemistry"
        term = "Term 2"
        school = "Riverside Secondary"
        term_start = "2025-04-28"
        "#,
    )
    .unwrap();

    assert_eq!(settings.schedule.total_weeks, 12);
    assert_eq!(settings.schedule.lessons_per_week, 4);
    assert_eq!(settings.schedule.breaks, vec![BreakSpec::new(6, "Half Term")]);
    assert_eq!(settings.metadata.subject, "Chemistry");
    assert_eq!(
        settings.metadata.term_start,
        NaiveDate::from_ymd_opt(2025, 4, 28)
    );
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let settings = SchemeSettings::from_toml_str("[schedule]\ntotal_weeks = 8\n").unwrap();
    assert_eq!(settings.schedule.total_weeks, 8);
    assert_eq!(settings.schedule.lessons_per_week, 5);
    assert_eq!(settings.schedule.breaks.len(), 2);
    assert_eq!(settings.metadata.term, "Term 1");
}

#[test]
fn zero_lessons_in_settings_is_invalid() {
    let err = SchemeSettings::from_toml_str("[schedule]\nlessons_per_week = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn negative_weeks_fail_to_parse() {
    let err = SchemeSettings::from_toml_str("[schedule]\ntotal_weeks = -2\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn settings_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[schedule]\ntotal_weeks = 3\nlessons_per_week = 2\nbreaks = []").unwrap();
    let settings = SchemeSettings::load(file.path()).unwrap();
    assert_eq!(settings.schedule, ScheduleConfig::new(3, 2));
}

#[test]
fn missing_settings_file_is_io_error() {
    let err = SchemeSettings::load("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn slot_count_is_bounded() {
    assert!(ScheduleConfig::new(1_000, 100).validate().is_ok());
    assert!(ScheduleConfig::new(1_001, 100).validate().is_err());

    let huge = ScheduleConfig::new(u32::MAX, u32::MAX).with_break(3, "Break");
    assert!(huge.validate().is_err());
    assert_eq!(
        huge.teaching_slots(),
        (u32::MAX as usize - 1).saturating_mul(u32::MAX as usize)
    );
}
