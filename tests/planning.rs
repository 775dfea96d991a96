use std::collections::HashMap;

use chrono::NaiveDate;
use u_timetable::config::OrderingFamily;
use u_timetable::models::{
    BreakKind, Lesson, LessonKind, Student, SweepDirection, WeekVariant, Weekday,
};
use u_timetable::{
    plan_week, PlannerConfig, PlanningError, PlanningInput, ScheduleResult, WeekPlanner,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn input(json: &str) -> PlanningInput {
    serde_json::from_str(json).unwrap()
}

fn plan(input: &PlanningInput) -> ScheduleResult {
    init_logger();
    plan_week(input, &PlannerConfig::default()).unwrap()
}

fn spans(lessons: &[&Lesson]) -> Vec<(i64, i64)> {
    lessons.iter().map(|l| (l.start, l.end)).collect()
}

fn busy_week() -> PlanningInput {
    input(
        r#"{
        "instructor": {
            "availability": {
                "monday": ["09:00", "17:00"],
                "tuesday": ["09:00", "17:00"],
                "wednesday": ["09:00", "13:00"],
                "thursday": ["09:00", "17:00"],
                "friday": ["12:00", "17:00"],
                "saturday": []
            },
            "minPauseMinutes": 10,
            "longBreakMinutes": 20,
            "blockBufferMinutes": 15,
            "blockHours": true,
            "dates": ["2025-01-06", "2025-01-07", "2025-01-08", "2025-01-09", "2025-01-10"]
        },
        "students": [
            { "id": "s1", "name": "Anna", "lessonsPerWeek": 3,
              "availability": { "monday": ["09:00", "12:00"], "wednesday": ["09:00", "12:00"],
                                "friday": ["14:00", "17:00"] } },
            { "id": "s2", "name": "Bram", "lessonsPerWeek": 2, "lessonMinutes": 45,
              "availability": { "monday": ["09:00", "17:00"], "tuesday": ["09:00", "17:00"] } },
            { "id": "s3", "name": "Cato", "lessonsPerWeek": 4,
              "availability": { "monday": ["13:00", "17:00"], "tuesday": ["13:00", "17:00"],
                                "wednesday": ["09:00", "13:00"], "thursday": ["13:00", "17:00"],
                                "friday": ["13:00", "17:00"] } },
            { "id": "s4", "name": "Dana", "lessonsPerWeek": 1, "lessonMinutes": 90,
              "availability": { "thursday": ["09:00", "11:00"] } },
            { "id": "s5", "name": "Eli", "lessonsPerWeek": 2, "lessonMinutes": 30,
              "availability": { "tuesday": ["12:00", "13:00"] }, "notes": "exam in March" },
            { "id": "s6", "name": "Fay", "availability": { "saturday": ["09:00", "12:00"] } },
            { "id": "s7", "name": "Gus", "lessonsPerWeek": 5,
              "availability": { "monday": ["09:00", "17:00"], "tuesday": ["09:00", "17:00"],
                                "thursday": ["09:00", "17:00"] } }
        ]
    }"#,
    )
}

fn assert_invariants(input: &PlanningInput, result: &ScheduleResult) {
    let pause = input.instructor.min_pause_minutes;
    let by_id: HashMap<&str, &Student> =
        input.students.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut by_date: HashMap<NaiveDate, Vec<&Lesson>> = HashMap::new();
    for lesson in &result.lessons {
        by_date.entry(lesson.date).or_default().push(lesson);
    }

    for entries in by_date.values() {
        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                // No-overlap, breaks included
                assert!(!a.overlaps(b.start, b.end), "{a:?} overlaps {b:?}");

                if a.is_break() || b.is_break() {
                    continue;
                }
                let same_pair = a.kind == LessonKind::BlockMember
                    && b.kind == LessonKind::BlockMember
                    && a.student_id == b.student_id;
                if same_pair {
                    assert!(a.end == b.start || b.end == a.start, "pair not back-to-back");
                } else if a.kind == LessonKind::Normal && b.kind == LessonKind::Normal {
                    // Pause law (all fixtures use lessons below the block threshold);
                    // the second lesson of a pair carries no pause requirement
                    let gap = (b.start - a.end).max(a.start - b.end);
                    assert!(gap >= pause, "gap {gap} between {a:?} and {b:?}");
                }
            }
        }
    }

    for lesson in result.booked_lessons() {
        let id = lesson.student_id.as_deref().unwrap();
        let student = by_id[id];
        let day = lesson.weekday;
        assert_eq!(lesson.duration(), student.lesson_minutes);
        assert!(input.instructor.window(day).unwrap().contains_span(lesson.start, lesson.end));
        assert!(student.window(day).unwrap().contains_span(lesson.start, lesson.end));
    }

    for student in &input.students {
        let lessons = result.lessons_for(&student.id);
        // Quota ceiling
        assert!(lessons.len() as u32 <= student.lessons_per_week);

        // Daily session law
        let mut per_date: HashMap<NaiveDate, Vec<&Lesson>> = HashMap::new();
        for lesson in lessons {
            per_date.entry(lesson.date).or_default().push(lesson);
        }
        for day_lessons in per_date.values() {
            match day_lessons.as_slice() {
                [single] => assert_eq!(single.kind, LessonKind::Normal),
                [first, second] => {
                    assert!(input.instructor.block_hours);
                    assert_eq!(first.kind, LessonKind::BlockMember);
                    assert_eq!(second.kind, LessonKind::BlockMember);
                }
                other => panic!("{} has {} lessons on one day", student.id, other.len()),
            }
        }

        let missing = student
            .lessons_per_week
            .saturating_sub(result.lessons_for(&student.id).len() as u32);
        assert_eq!(result.shortfall.get(&student.id).copied().unwrap_or(0), missing);
    }

    assert_eq!(result.scheduled_lessons, result.booked_lessons().count());
}

#[test]
fn test_scenario_single_normal_session_per_day() {
    let input = input(
        r#"{
        "instructor": { "availability": { "monday": ["09:00", "11:00"] }, "minPauseMinutes": 5,
                        "blockHours": false, "dates": ["2025-01-06"] },
        "students": [ { "id": "s1", "name": "Anna", "lessonsPerWeek": 2, "lessonMinutes": 60,
                        "availability": { "monday": ["09:00", "11:00"] } } ]
    }"#,
    );
    let result = plan(&input);

    assert_eq!(spans(&result.booked_lessons().collect::<Vec<_>>()), vec![(540, 600)]);
    assert_eq!(result.shortfall.get("s1"), Some(&1));
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("Anna is 1 lesson(s) short"));
    assert_invariants(&input, &result);
}

#[test]
fn test_scenario_block_pair_without_buffer() {
    let input = input(
        r#"{
        "instructor": { "availability": { "monday": ["09:00", "11:00"] }, "minPauseMinutes": 5,
                        "blockBufferMinutes": 15, "blockHours": true, "dates": ["2025-01-06"] },
        "students": [ { "id": "s1", "name": "Anna", "lessonsPerWeek": 2, "lessonMinutes": 60,
                        "availability": { "monday": ["09:00", "11:00"] } } ]
    }"#,
    );
    let result = plan(&input);

    // The buffer would end at 11:15, after the instructor leaves
    assert_eq!(result.lessons.len(), 2);
    assert_eq!(spans(&result.lessons.iter().collect::<Vec<_>>()), vec![(540, 600), (600, 660)]);
    assert!(result.warnings.is_empty());
    assert!(result.is_complete());
    assert_invariants(&input, &result);
}

#[test]
fn test_scenario_two_students_keep_pause() {
    let input = input(
        r#"{
        "instructor": { "availability": { "monday": ["09:00", "13:00"] }, "minPauseMinutes": 5,
                        "dates": ["2025-01-06"] },
        "students": [
            { "id": "s2", "name": "Bram", "lessonsPerWeek": 1,
              "availability": { "monday": ["09:00", "13:00"] } },
            { "id": "s1", "name": "Anna", "lessonsPerWeek": 1,
              "availability": { "monday": ["09:00", "13:00"] } }
        ]
    }"#,
    );
    let result = plan(&input);

    assert_eq!(result.scheduled_lessons, 2);
    assert_eq!(spans(&result.lessons_for("s1")), vec![(540, 600)]);
    assert_eq!(spans(&result.lessons_for("s2")), vec![(605, 665)]);
    assert_eq!(result.idle_minutes, 5);
    assert!(result.warnings.is_empty());
    assert_invariants(&input, &result);
}

#[test]
fn test_scenario_long_break_inserted() {
    let input = input(
        r#"{
        "instructor": { "availability": { "monday": ["09:00", "15:00"] }, "minPauseMinutes": 5,
                        "longBreakMinutes": 20, "blockBufferMinutes": 0, "blockHours": true,
                        "dates": ["2025-01-06"] },
        "students": [
            { "id": "a", "name": "Anna", "lessonsPerWeek": 2,
              "availability": { "monday": ["09:00", "11:00"] } },
            { "id": "b", "name": "Bram", "lessonsPerWeek": 1,
              "availability": { "monday": ["11:00", "15:00"] } }
        ]
    }"#,
    );
    let result = plan(&input);

    assert_eq!(spans(&result.lessons_for("a")), vec![(540, 600), (600, 660)]);
    // Wanted 11:00; moved by 5 + 20 + 5
    assert_eq!(spans(&result.lessons_for("b")), vec![(690, 750)]);

    let rest: Vec<&Lesson> = result.lessons.iter().filter(|l| l.is_break()).collect();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].kind, LessonKind::Break(BreakKind::Long));
    assert_eq!((rest[0].start, rest[0].end), (665, 685));

    assert!(result.is_complete());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("long break"));
    assert_invariants(&input, &result);
}

#[test]
fn test_scenario_long_break_after_default_buffer() {
    let input = input(
        r#"{
        "instructor": { "availability": { "monday": ["09:00", "15:00"] }, "minPauseMinutes": 5,
                        "longBreakMinutes": 20, "blockHours": true, "dates": ["2025-01-06"] },
        "students": [
            { "id": "a", "name": "Anna", "lessonsPerWeek": 2,
              "availability": { "monday": ["09:00", "11:00"] } },
            { "id": "b", "name": "Bram", "lessonsPerWeek": 1,
              "availability": { "monday": ["11:00", "15:00"] } }
        ]
    }"#,
    );
    let result = plan(&input);

    assert_eq!(spans(&result.lessons_for("a")), vec![(540, 600), (600, 660)]);
    assert_eq!(spans(&result.lessons_for("b")), vec![(690, 750)]);

    // The 15-minute buffer holds the start of the planned long break
    let rest: Vec<(LessonKind, i64, i64)> = result
        .lessons
        .iter()
        .filter(|l| l.is_break())
        .map(|l| (l.kind, l.start, l.end))
        .collect();
    assert_eq!(
        rest,
        vec![
            (LessonKind::Break(BreakKind::Buffer), 660, 675),
            (LessonKind::Break(BreakKind::Long), 675, 690),
        ]
    );

    // The warning names the break that was actually recorded
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("15-minute long break"));
    assert!(result.warnings[0].contains("(11:15-11:30)"));
    assert_invariants(&input, &result);
}

#[test]
fn test_busy_week_invariants() {
    let input = busy_week();
    let result = plan(&input);
    assert_invariants(&input, &result);

    // Fay is only free on Saturday, when the instructor is not
    assert_eq!(result.shortfall.get("s6"), Some(&2));
    assert!(result.warnings.iter().any(|w| w.contains("Fay is 2 lesson(s) short")));
    let planned = format!("Planned {}/19 lessons", result.scheduled_lessons);
    assert!(result.summary.starts_with(&planned));
    assert!(result.summary.ends_with("2025-01-06"));
}

#[test]
fn test_busy_week_without_blocks() {
    let mut input = busy_week();
    input.instructor.block_hours = false;
    let result = plan(&input);
    assert_invariants(&input, &result);
    assert!(result.lessons.iter().all(|l| l.kind == LessonKind::Normal));
}

#[test]
fn test_idempotent_under_fixed_variant() {
    init_logger();
    let input = busy_week();
    let planner = WeekPlanner::new(PlannerConfig::default());

    for direction in [SweepDirection::Forward, SweepDirection::Backward] {
        let variant = WeekVariant::new(
            vec![
                Weekday::Thursday,
                Weekday::Friday,
                Weekday::Saturday,
                Weekday::Sunday,
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
            ],
            direction,
        );
        let first = planner.run_variant(&input, &variant);
        let second = planner.run_variant(&input, &variant);
        assert_eq!(first.lessons, second.lessons);
        assert_eq!(first.adjustments, second.adjustments);
    }

    let a = plan(&input);
    let b = plan(&input);
    assert_eq!(a.lessons, b.lessons);
    assert_eq!(a.variant, b.variant);
}

#[test]
fn test_monotonic_improvement() {
    init_logger();
    let input = busy_week();
    let config = PlannerConfig::default()
        .with_orderings(OrderingFamily::RotationsAndReversed)
        .with_random_orderings(6, 11);
    let planner = WeekPlanner::new(config.clone());
    let variants = config.variants();

    let mut previous = 0;
    for k in 1..=variants.len() {
        let result = planner.plan_variants(&input, &variants[..k]).unwrap();
        assert!(result.scheduled_lessons >= previous);
        previous = result.scheduled_lessons;
    }

    // Exploring more can only help
    let canonical = WeekPlanner::new(config.clone())
        .plan_variants(&input, &[WeekVariant::canonical()])
        .unwrap();
    assert!(planner.plan(&input).unwrap().scheduled_lessons >= canonical.scheduled_lessons);
}

#[test]
fn test_malformed_range_falls_back_to_default_day() {
    let input = input(
        r#"{
        "instructor": { "availability": { "monday": ["09:00", "17:00"] },
                        "dates": ["2025-01-06"] },
        "students": [ { "id": "s1", "lessonsPerWeek": 1,
                        "availability": { "monday": ["nine", "noon"] } } ]
    }"#,
    );
    let result = plan(&input);
    assert_eq!(spans(&result.lessons_for("s1")), vec![(540, 600)]);
}

#[test]
fn test_degenerate_range_is_unavailable() {
    let input = input(
        r#"{
        "instructor": { "availability": { "monday": ["09:00", "17:00"] },
                        "dates": ["2025-01-06"] },
        "students": [ { "id": "s1", "lessonsPerWeek": 1, "availability": { "monday": ["09:00"] } } ]
    }"#,
    );
    let result = plan(&input);
    assert_eq!(result.scheduled_lessons, 0);
    assert_eq!(result.shortfall.get("s1"), Some(&1));
    // Falls back to the id when no name is given
    assert!(result.warnings[0].contains("Student s1"));
}

#[test]
fn test_dates_extrapolated_past_list() {
    let input = input(
        r#"{
        "instructor": { "availability": { "wednesday": ["09:00", "12:00"] },
                        "dates": ["2025-01-06"] },
        "students": [ { "id": "s1", "lessonsPerWeek": 1,
                        "availability": { "wednesday": ["10:00", "12:00"] } } ]
    }"#,
    );
    let result = plan(&input);
    let lesson = result.lessons_for("s1")[0];
    assert_eq!(lesson.date, NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
    assert_eq!(lesson.start, 600);
}

#[test]
fn test_records_for_writer() {
    let input = busy_week();
    let result = plan(&input);

    let rows = result.records(&input.students, false);
    assert_eq!(rows.len(), result.scheduled_lessons);
    assert!(rows.iter().all(|r| r.student_id.is_some() && r.student_name.is_some()));
    assert!(rows
        .windows(2)
        .all(|w| (&w[0].date, &w[0].start_time) <= (&w[1].date, &w[1].start_time)));
    if let Some(eli) = rows.iter().find(|r| r.student_id.as_deref() == Some("s5")) {
        assert_eq!(eli.notes.as_deref(), Some("exam in March"));
        assert_eq!(eli.student_name.as_deref(), Some("Eli"));
    }

    let with_breaks = result.records(&input.students, true);
    assert_eq!(with_breaks.len(), result.lessons.len());

    let json = serde_json::to_value(&rows).unwrap();
    assert!(json[0].get("startTime").is_some());
    assert!(json[0].get("studentName").is_some());
}

#[test]
fn test_rejects_structurally_invalid_input() {
    init_logger();
    let duplicate = input(
        r#"{
        "instructor": { "availability": { "monday": ["09:00", "17:00"] }, "dates": [] },
        "students": [ { "id": "s1" }, { "id": "s1", "lessonMinutes": 0 } ]
    }"#,
    );
    match plan_week(&duplicate, &PlannerConfig::default()) {
        Err(PlanningError::InvalidInput(errors)) => assert_eq!(errors.len(), 3),
        other => panic!("expected invalid input, got {other:?}"),
    }

    // Availability must be a list of bounds
    let not_a_list = r#"{
        "instructor": { "availability": { "monday": "09:00-17:00" }, "dates": ["2025-01-06"] },
        "students": []
    }"#;
    assert!(serde_json::from_str::<PlanningInput>(not_a_list).is_err());

    // A student without an id
    let no_id = r#"{
        "instructor": { "dates": ["2025-01-06"] },
        "students": [ { "name": "Anna" } ]
    }"#;
    assert!(serde_json::from_str::<PlanningInput>(no_id).is_err());
}

#[test]
fn test_rejects_lesson_longer_than_a_day() {
    init_logger();
    let input = input(
        r#"{
        "instructor": { "availability": { "monday": ["09:00", "17:00"] },
                        "dates": ["2025-01-06"] },
        "students": [ { "id": "s1", "lessonMinutes": 9223372036854775807,
                        "availability": { "monday": ["09:00", "17:00"] } } ]
    }"#,
    );
    match plan_week(&input, &PlannerConfig::default()) {
        Err(PlanningError::InvalidInput(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].message.contains("s1"));
        }
        other => panic!("expected invalid input, got {other:?}"),
    }

    // Planning below the validation layer does not overflow either
    let planner = WeekPlanner::new(PlannerConfig::default());
    let run = planner.run_variant(&input, &WeekVariant::canonical());
    assert!(run.lessons.is_empty());
}

#[test]
fn test_rejects_bad_config() {
    let input = busy_week();
    let config = PlannerConfig::default().with_slot_step(0);
    assert!(matches!(
        plan_week(&input, &config),
        Err(PlanningError::InvalidConfig(_))
    ));
}

#[test]
fn test_result_serializes() {
    let result = plan(&busy_week());
    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("scheduledLessons").is_some());
    assert!(json.get("idleMinutes").is_some());
    assert_eq!(json["shortfall"]["s6"], 2);
    let direction = json["variant"]["direction"].as_str();
    assert!(matches!(direction, Some("forward" | "backward")));
}
