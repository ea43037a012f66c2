use chrono::Duration;
use mentorize_core::db::open_db_in_memory;
use mentorize_core::{
    current_timestamp, RepoError, ServiceError, SqliteTaskRepository, TaskCategory, TaskInput,
    TaskPriority, TaskRepository, TaskService, TaskStats,
};
use rusqlite::Connection;

fn task_input(title: &str) -> TaskInput {
    TaskInput {
        title: Some(title.to_string()),
        ..TaskInput::default()
    }
}

fn service(conn: &Connection) -> TaskService<SqliteTaskRepository<'_>> {
    TaskService::new(SqliteTaskRepository::try_new(conn).unwrap())
}

#[test]
fn create_applies_defaults_and_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let task = service.create_task(task_input("Write report")).unwrap();
    assert!(task.id > 0);
    assert!(!task.is_completed());
    assert_eq!(task.completed_at(), None);
    assert_eq!(task.priority, TaskPriority::Low);
    assert_eq!(task.category, TaskCategory::Study);
    assert_eq!(service.get_task(task.id).unwrap(), task);
}

#[test]
fn completion_timestamp_follows_transition_edges() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let task = service.create_task(task_input("Laundry")).unwrap();

    let done = service.complete_task(task.id).unwrap();
    assert!(done.is_completed());
    let stamped = done.completed_at().expect("completion should stamp completed_at");

    let again = service.complete_task(task.id).unwrap();
    assert_eq!(again.completed_at(), Some(stamped));

    let reopened = service.reopen_task(task.id).unwrap();
    assert!(!reopened.is_completed());
    assert_eq!(reopened.completed_at(), None);
}

#[test]
fn partial_update_keeps_absent_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let task = service
        .create_task(TaskInput {
            description: Some("quarterly numbers".to_string()),
            priority: Some(TaskPriority::High),
            category: Some(TaskCategory::Work),
            ..task_input("Budget")
        })
        .unwrap();

    let updated = service
        .update_task(
            task.id,
            TaskInput {
                completed: Some(true),
                ..TaskInput::default()
            },
        )
        .unwrap();
    assert!(updated.is_completed());
    assert!(updated.completed_at().is_some());
    assert_eq!(updated.title, "Budget");
    assert_eq!(updated.description.as_deref(), Some("quarterly numbers"));
    assert_eq!(updated.priority, TaskPriority::High);
    assert_eq!(updated.category, TaskCategory::Work);
    assert_eq!(updated.created_at, task.created_at);
    assert!(updated.updated_at >= task.updated_at);
}

#[test]
fn accented_medium_priority_is_stored_and_filtered_separately() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let accented = service
        .create_task(TaskInput {
            priority: Some("média".parse().unwrap()),
            ..task_input("accented")
        })
        .unwrap();
    service
        .create_task(TaskInput {
            priority: Some("media".parse().unwrap()),
            ..task_input("plain")
        })
        .unwrap();

    assert_eq!(accented.priority, TaskPriority::MediumAccented);
    let hits = service
        .tasks_by_priority(TaskPriority::MediumAccented)
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, accented.id);
}

#[test]
fn category_filter_matches_exactly() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service
        .create_task(TaskInput {
            category: Some(TaskCategory::Personal),
            ..task_input("Dentist")
        })
        .unwrap();
    service.create_task(task_input("Homework")).unwrap();

    let personal = service.tasks_by_category(TaskCategory::Personal).unwrap();
    assert_eq!(personal.len(), 1);
    assert_eq!(personal[0].title, "Dentist");
}

#[test]
fn due_date_listings_skip_completed_and_sort_by_deadline() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let today = current_timestamp().date();

    let later = service
        .create_task(TaskInput {
            due_date: Some(today + Duration::days(5)),
            ..task_input("later")
        })
        .unwrap();
    let late = service
        .create_task(TaskInput {
            due_date: Some(today - Duration::days(2)),
            ..task_input("late")
        })
        .unwrap();
    service
        .create_task(TaskInput {
            due_date: Some(today - Duration::days(9)),
            completed: Some(true),
            ..task_input("late but done")
        })
        .unwrap();
    service
        .create_task(TaskInput {
            due_date: Some(today),
            ..task_input("due today")
        })
        .unwrap();
    service.create_task(task_input("undated")).unwrap();

    let with_due: Vec<String> = service
        .tasks_with_due_date()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(with_due, vec!["late", "due today", "later"]);

    let overdue = service.overdue_tasks().unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].id, late.id);
    assert!(overdue[0].is_overdue(today));
    assert_eq!(overdue[0].days_until_due(today), Some(0));
    assert_eq!(later.days_until_due(today), Some(5));
}

#[test]
fn search_matches_title_or_description() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service.create_task(task_input("Buy groceries")).unwrap();
    service
        .create_task(TaskInput {
            description: Some("pick up GROCERIES list".to_string()),
            ..task_input("Errands")
        })
        .unwrap();
    service.create_task(task_input("Gym")).unwrap();

    let hits = service.search_tasks("groceries").unwrap();
    let mut titles: Vec<String> = hits.into_iter().map(|task| task.title).collect();
    titles.sort();
    assert_eq!(titles, vec!["Buy groceries", "Errands"]);
}

#[test]
fn search_folds_case_of_accented_letters() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service
        .create_task(task_input("Estudar programação avançada"))
        .unwrap();
    service
        .create_task(TaskInput {
            description: Some("Ler capítulo de ÉTICA".to_string()),
            ..task_input("Filosofia")
        })
        .unwrap();
    service.create_task(task_input("Academia")).unwrap();

    let hits = service.search_tasks("AVANÇADA").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Estudar programação avançada");

    let hits = service.search_tasks("ética").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Filosofia");
}

#[test]
fn stats_count_completed_and_pending() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    assert_eq!(
        service.task_stats().unwrap(),
        TaskStats {
            completed: 0,
            pending: 0
        }
    );

    let first = service.create_task(task_input("a")).unwrap();
    service.create_task(task_input("b")).unwrap();
    service.create_task(task_input("c")).unwrap();
    service.complete_task(first.id).unwrap();

    assert_eq!(
        service.task_stats().unwrap(),
        TaskStats {
            completed: 1,
            pending: 2
        }
    );
    assert_eq!(service.pending_tasks().unwrap().len(), 2);
}

#[test]
fn missing_ids_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    assert!(matches!(
        service.delete_task(5),
        Err(ServiceError::NotFound { entity: "task", id: 5 })
    ));
    assert!(matches!(
        service.complete_task(5),
        Err(ServiceError::NotFound { .. })
    ));
    assert!(matches!(
        service.reopen_task(5),
        Err(ServiceError::NotFound { .. })
    ));
}

#[test]
fn corrupt_priority_row_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (title, priority, created_at, updated_at)
         VALUES ('broken', 'URGENTE', '2024-01-01 00:00:00', '2024-01-01 00:00:00');",
        [],
    )
    .unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let err = repo.get_task(conn.last_insert_rowid()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
