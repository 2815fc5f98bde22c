use scheme_tool::{AllocationWarning, Row, ScheduleConfig, SchemeError, Topic, allocate};

fn topics(n: usize) -> Vec<Topic> {
    (1..=n)
        .map(|i| Topic::new(format!("t{i}"), format!("sub{i}")))
        .collect()
}

fn lesson_rows(rows: &[Row]) -> Vec<(u32, u32, String)> {
    rows.iter()
        .filter_map(|r| match r {
            Row::Lesson {
                week,
                lesson,
                topic,
            } => Some((*week, *lesson, topic.topic.clone())),
            Row::Break { .. } => None,
        })
        .collect()
}

#[test]
fn equal_topics_and_slots_fill_one_topic_per_lesson() {
    let topics = topics(10);
    let allocation = allocate(&topics, &ScheduleConfig::new(2, 5)).unwrap();

    let expected: Vec<(u32, u32, String)> = (0..10)
        .map(|i| (i / 5 + 1, i % 5 + 1, format!("t{}", i + 1)))
        .collect();
    assert_eq!(lesson_rows(&allocation.rows), expected);
    assert!(allocation.warnings.is_empty());
    assert_eq!(allocation.units_planned, 10);
    assert_eq!(allocation.units_placed, 10);
}

#[test]
fn surplus_topics_are_merged_into_lessons() {
    let topics = topics(3);
    let allocation = allocate(&topics, &ScheduleConfig::new(1, 2)).unwrap();

    assert_eq!(
        lesson_rows(&allocation.rows),
        vec![
            (1, 1, "t1".to_string()),
            (1, 1, "t2".to_string()),
            (1, 2, "t3".to_string()),
        ]
    );
    assert_eq!(allocation.units_planned, 2);
    assert!(allocation.warnings.is_empty());
}

#[test]
fn only_slot_in_break_week_drops_the_topic() {
    let topics = topics(1);
    let config = ScheduleConfig::new(1, 1).with_break(1, "Holiday");
    let allocation = allocate(&topics, &config).unwrap();

    assert_eq!(
        allocation.rows,
        vec![Row::Break {
            week: 1,
            title: "Holiday".into()
        }]
    );
    assert_eq!(
        allocation.warnings,
        vec![AllocationWarning::TopicOverflow {
            placed: 0,
            dropped: 1
        }]
    );
    assert!(allocation.has_overflow());
}

#[test]
fn no_topics_emit_only_break_rows() {
    let config = ScheduleConfig::new(2, 1).with_break(1, "Holiday");
    let allocation = allocate(&[], &config).unwrap();

    assert_eq!(
        allocation.rows,
        vec![Row::Break {
            week: 1,
            title: "Holiday".into()
        }]
    );
    assert!(allocation.warnings.is_empty());
}

#[test]
fn no_topics_and_no_breaks_emit_nothing() {
    let allocation = allocate(&[], &ScheduleConfig::new(3, 4)).unwrap();
    assert!(allocation.rows.is_empty());
}

#[test]
fn stretched_topics_cover_every_slot_in_order() {
    let topics = topics(3);
    let allocation = allocate(&topics, &ScheduleConfig::new(2, 4)).unwrap();

    let names: Vec<String> = lesson_rows(&allocation.rows)
        .into_iter()
        .map(|(_, _, name)| name)
        .collect();
    assert_eq!(names, vec!["t1", "t1", "t1", "t2", "t2", "t2", "t3", "t3"]);
}

#[test]
fn zero_weeks_or_lessons_are_rejected() {
    let err = allocate(&topics(2), &ScheduleConfig::new(0, 5)).unwrap_err();
    assert!(matches!(err, SchemeError::InvalidConfig(_)));

    let err = allocate(&topics(2), &ScheduleConfig::new(4, 0)).unwrap_err();
    assert!(matches!(err, SchemeError::InvalidConfig(_)));
}

#[test]
fn break_weeks_never_receive_content() {
    let topics = topics(37);
    let config = ScheduleConfig::new(6, 3)
        .with_break(2, "Mid-Term Break")
        .with_break(5, "Exams");
    let allocation = allocate(&topics, &config).unwrap();

    let break_weeks: Vec<u32> = allocation
        .rows
        .iter()
        .filter(|r| r.is_break())
        .map(Row::week)
        .collect();
    assert_eq!(break_weeks, vec![2, 5]);
    assert!(
        lesson_rows(&allocation.rows)
            .iter()
            .all(|(week, _, _)| *week != 2 && *week != 5)
    );

    // ceil(37 / 18) = 3 topics per unit gives 13 units for 12 teaching slots;
    // the thirteenth unit holds only t37.
    assert_eq!(allocation.units_planned, 13);
    assert_eq!(allocation.units_placed, 12);
    assert_eq!(
        allocation.warnings,
        vec![AllocationWarning::TopicOverflow {
            placed: 36,
            dropped: 1
        }]
    );
}

#[test]
fn oversized_term_is_rejected_without_allocating() {
    let err = allocate(&topics(1), &ScheduleConfig::new(u32::MAX, u32::MAX)).unwrap_err();
    assert!(matches!(err, SchemeError::InvalidConfig(_)));

    let err = allocate(&topics(1), &ScheduleConfig::new(100_001, 1)).unwrap_err();
    assert!(matches!(err, SchemeError::InvalidConfig(_)));
}

#[test]
fn largest_term_stretches_one_topic_across_teaching_slots() {
    let topics = topics(1);
    let config = ScheduleConfig::new(1_000, 100).with_break(1, "Opening");
    let allocation = allocate(&topics, &config).unwrap();

    assert_eq!(allocation.units_planned, 100_000);
    assert_eq!(allocation.units_placed, 99_900);
    assert_eq!(allocation.rows.len(), 99_901);
    assert!(allocation.warnings.is_empty());
}

#[test]
fn breaks_outside_the_term_are_ignored() {
    let topics = topics(4);
    let config = ScheduleConfig::new(2, 2)
        .with_break(0, "Before")
        .with_break(3, "After");
    let allocation = allocate(&topics, &config).unwrap();

    assert!(allocation.rows.iter().all(|r| !r.is_break()));
    assert_eq!(lesson_rows(&allocation.rows).len(), 4);
}

#[test]
fn placed_topics_appear_once_each_in_order() {
    for (count, weeks, lessons) in [(1, 1, 1), (7, 3, 3), (9, 2, 5), (25, 2, 3), (100, 4, 5)] {
        let topics = topics(count);
        let allocation = allocate(&topics, &ScheduleConfig::new(weeks, lessons)).unwrap();

        let mut seen: Vec<String> = lesson_rows(&allocation.rows)
            .into_iter()
            .map(|(_, _, name)| name)
            .collect();
        seen.dedup();
        let expected: Vec<String> = topics.iter().map(|t| t.topic.clone()).collect();
        assert_eq!(seen, expected, "topics={count} weeks={weeks} lessons={lessons}");
    }
}

#[test]
fn breaks_push_trailing_stretched_topics_out() {
    // Ten planned units, five usable slots: t1..t5 fill week 1, t6..t10 drop.
    let topics = topics(10);
    let config = ScheduleConfig::new(2, 5).with_break(2, "Mid-Term Break");
    let allocation = allocate(&topics, &config).unwrap();

    assert_eq!(allocation.topics_placed, 5);
    assert_eq!(allocation.units_placed, 5);
    assert_eq!(
        allocation.warnings,
        vec![AllocationWarning::TopicOverflow {
            placed: 5,
            dropped: 5
        }]
    );
}

#[test]
fn repeated_allocation_is_identical() {
    let topics = topics(13);
    let config = ScheduleConfig::default();
    let first = allocate(&topics, &config).unwrap();
    let second = allocate(&topics, &config).unwrap();
    assert_eq!(first, second);
}
