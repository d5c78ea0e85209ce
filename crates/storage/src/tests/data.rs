use chrono::NaiveDate;
use vigor_domain as domain;

pub static EXERCISES: std::sync::LazyLock<Vec<domain::Exercise>> =
    std::sync::LazyLock::new(|| vec![EXERCISE.clone(), EXERCISE_2.clone()]);

pub static EXERCISE: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        id: 1.into(),
        name: domain::Name::new("Bench Press").unwrap(),
        mode: domain::ExerciseMode::Reps,
        image_key: "uploads/bench-press.jpg".to_string(),
        notes: None,
    });

pub static EXERCISE_2: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        id: 2.into(),
        name: domain::Name::new("Plank").unwrap(),
        mode: domain::ExerciseMode::Time,
        image_key: "uploads/plank.jpg".to_string(),
        notes: Some("Elbows under shoulders".to_string()),
    });

pub static SESSION: std::sync::LazyLock<domain::Session> =
    std::sync::LazyLock::new(|| domain::Session {
        id: 1.into(),
        name: domain::Name::new("Push Day").unwrap(),
        items: vec![
            domain::SessionItem {
                exercise_id: EXERCISE.id,
                order: 0,
                sets: Some(domain::Sets::new(3).unwrap()),
                reps: Some(domain::Reps::new(10).unwrap()),
                duration: None,
                rest: domain::Rest::new(90).unwrap(),
                notes: None,
            },
            domain::SessionItem {
                exercise_id: EXERCISE_2.id,
                order: 1,
                sets: None,
                reps: None,
                duration: Some(domain::Duration::new(60).unwrap()),
                rest: domain::Rest::new(0).unwrap(),
                notes: Some("Hold steady".to_string()),
            },
        ],
    });

pub static PROGRAM: std::sync::LazyLock<domain::Program> =
    std::sync::LazyLock::new(|| domain::Program {
        id: 1.into(),
        name: domain::Name::new("Strength Block").unwrap(),
        goal: Some("Add 10 kg to the squat".to_string()),
        weeks: domain::Weeks::new(4).unwrap(),
        sessions_per_week: domain::Slot::new(3).unwrap(),
        schedule: vec![domain::ScheduleEntry {
            id: 1.into(),
            week: 1,
            slot: 1,
            session_id: SESSION.id,
        }],
    });

pub static EXERCISE_WEIGHT: std::sync::LazyLock<domain::ExerciseWeight> =
    std::sync::LazyLock::new(|| domain::ExerciseWeight {
        id: 1.into(),
        exercise_id: EXERCISE.id,
        session_id: SESSION.id,
        set_number: 1,
        weight: domain::Load::new(60.0).unwrap(),
        reps: domain::Reps::new(10).unwrap(),
        unit: domain::WeightUnit::Kg,
        date: NaiveDate::from_ymd_opt(2020, 2, 2).unwrap(),
    });

pub static WEIGHT_ENTRY: std::sync::LazyLock<domain::WeightEntry> =
    std::sync::LazyLock::new(|| domain::WeightEntry {
        id: 1.into(),
        date: NaiveDate::from_ymd_opt(2020, 2, 2).unwrap(),
        weight: domain::BodyWeight::new(80.0).unwrap(),
        unit: domain::WeightUnit::Kg,
        notes: None,
    });
