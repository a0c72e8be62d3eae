use super::*;
use crate::project::ProjectField;
use crate::session::login;
use crate::store::LoadStatus;
use crate::user::{RegisterUserOptions, UserRegistry};
use crate::validation::ValidationError;
use chrono::NaiveDate;
use tempfile::TempDir;

struct Fixture {
    temp_dir: TempDir,
    alice: Session,
    bob: Session,
    projects: ProjectRepository,
}

fn fixture() -> Fixture {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::in_dir(temp_dir.path());
    let mut users = UserRegistry::load(store.clone());
    for email in ["alice@example.com", "bob@example.com"] {
        users
            .register(RegisterUserOptions {
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                email: email.to_string(),
                password: "secret1".to_string(),
                mobile_phone: "01012345678".to_string(),
            })
            .unwrap();
    }
    let alice = login(&users, "alice@example.com", "secret1").unwrap();
    let bob = login(&users, "bob@example.com", "secret1").unwrap();
    Fixture {
        projects: ProjectRepository::load(store),
        temp_dir,
        alice,
        bob,
    }
}

fn new_project(title: &str, start: &str, end: &str) -> NewProject {
    NewProject {
        title: title.to_string(),
        details: format!("{title} details"),
        total_target: 10_000.0,
        start_date: start.to_string(),
        end_date: end.to_string(),
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_create_sets_owner_and_persists() {
    let mut f = fixture();

    let project = f
        .projects
        .create(&f.alice, new_project("Wells", "2024-01-10", "2024-02-10"))
        .unwrap();

    assert_eq!(project.owner_email, "alice@example.com");
    assert_eq!(project.start_date, date("2024-01-10"));
    let reloaded = ProjectRepository::load(f.projects.store().clone());
    assert_eq!(reloaded.list_all(), f.projects.list_all());
}

#[test]
fn test_create_requires_end_after_start() {
    let mut f = fixture();

    let before = f
        .projects
        .create(&f.alice, new_project("A", "2024-01-10", "2024-01-05"))
        .unwrap_err();
    assert!(matches!(
        before,
        ProjectError::Validation(ValidationError::EndNotAfterStart { .. })
    ));

    let equal = f
        .projects
        .create(&f.alice, new_project("B", "2024-01-10", "2024-01-10"))
        .unwrap_err();
    assert!(matches!(
        equal,
        ProjectError::Validation(ValidationError::EndNotAfterStart { .. })
    ));

    assert!(f
        .projects
        .create(&f.alice, new_project("C", "2024-01-10", "2024-01-11"))
        .is_ok());
    assert_eq!(f.projects.len(), 1);
}

#[test]
fn test_create_rejects_bad_target_and_dates() {
    let mut f = fixture();

    let mut zero = new_project("Zero", "2024-01-01", "2024-02-01");
    zero.total_target = 0.0;
    assert!(matches!(
        f.projects.create(&f.alice, zero).unwrap_err(),
        ProjectError::Validation(ValidationError::NonPositiveTarget(_))
    ));

    assert!(matches!(
        f.projects
            .create(&f.alice, new_project("Bad", "2024-02-30", "2024-03-01"))
            .unwrap_err(),
        ProjectError::Validation(ValidationError::InvalidDate(_))
    ));
    assert!(f.projects.is_empty());
}

#[test]
fn test_list_by_owner_preserves_order() {
    let mut f = fixture();
    f.projects
        .create(&f.alice, new_project("A1", "2024-01-01", "2024-01-31"))
        .unwrap();
    f.projects
        .create(&f.bob, new_project("B1", "2024-01-01", "2024-01-31"))
        .unwrap();
    f.projects
        .create(&f.alice, new_project("A2", "2024-01-01", "2024-01-31"))
        .unwrap();

    let titles: Vec<&str> = f
        .projects
        .list_by_owner("alice@example.com")
        .iter()
        .map(|p| p.title.as_str())
        .collect();
    assert_eq!(titles, ["A1", "A2"]);

    let all: Vec<&str> = f.projects.list_all().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(all, ["A1", "B1", "A2"]);
}

#[test]
fn test_select_owned_is_scoped_to_session() {
    let mut f = fixture();
    f.projects
        .create(&f.bob, new_project("B1", "2024-01-01", "2024-01-31"))
        .unwrap();
    let a1 = f
        .projects
        .create(&f.alice, new_project("A1", "2024-01-01", "2024-01-31"))
        .unwrap();

    // Position 0 is Alice's first project even though Bob's comes first globally
    let handle = f.projects.select_owned(&f.alice, 0).unwrap();
    assert_eq!(handle.id(), a1.id);
    assert_eq!(handle.owner_email(), "alice@example.com");

    let err = f.projects.select_owned(&f.alice, 1).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::PositionOutOfRange { position: 1, len: 1 }
    ));
}

#[test]
fn test_update_only_target() {
    let mut f = fixture();
    let original = f
        .projects
        .create(&f.alice, new_project("Wells", "2024-01-10", "2024-02-10"))
        .unwrap();
    let handle = f.projects.select_owned(&f.alice, 0).unwrap();

    let updated = f
        .projects
        .update(
            &handle,
            ProjectPatch {
                total_target: Some(99_000.0),
                ..Default::default()
            },
        )
        .unwrap()
        .project;

    assert!((updated.total_target - 99_000.0).abs() < f64::EPSILON);
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.details, original.details);
    assert_eq!(updated.start_date, original.start_date);
    assert_eq!(updated.end_date, original.end_date);
    assert_eq!(updated.created_at, original.created_at);
}

#[test]
fn test_update_blank_fields_are_kept() {
    let mut f = fixture();
    f.projects
        .create(&f.alice, new_project("Wells", "2024-01-10", "2024-02-10"))
        .unwrap();
    let handle = f.projects.select_owned(&f.alice, 0).unwrap();

    let updated = f
        .projects
        .update(
            &handle,
            ProjectPatch {
                title: Some(String::new()),
                details: Some("  ".to_string()),
                end_date: Some(String::new()),
                ..Default::default()
            },
        )
        .unwrap();

    assert!(updated.is_complete());
    let updated = updated.project;
    assert_eq!(updated.title, "Wells");
    assert_eq!(updated.details, "Wells details");
    assert_eq!(updated.end_date, date("2024-02-10"));
}

#[test]
fn test_update_checks_new_start_against_kept_end() {
    let mut f = fixture();
    f.projects
        .create(&f.alice, new_project("Wells", "2024-01-10", "2024-02-10"))
        .unwrap();
    let handle = f.projects.select_owned(&f.alice, 0).unwrap();

    let outcome = f
        .projects
        .update(
            &handle,
            ProjectPatch {
                title: Some("Renamed".to_string()),
                start_date: Some("2024-02-10".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(outcome.rejected.len(), 1);
    assert!(matches!(
        outcome.rejected[0],
        (
            ProjectField::StartDate,
            ValidationError::EndNotAfterStart { .. }
        )
    ));
    // The title passed and was applied; the start date kept its value
    assert_eq!(outcome.project.title, "Renamed");
    assert_eq!(outcome.project.start_date, date("2024-01-10"));
    assert_eq!(f.projects.get(&handle).unwrap(), &outcome.project);
}

#[test]
fn test_update_checks_new_end_against_kept_start() {
    let mut f = fixture();
    f.projects
        .create(&f.alice, new_project("Wells", "2024-01-10", "2024-02-10"))
        .unwrap();
    let handle = f.projects.select_owned(&f.alice, 0).unwrap();

    let outcome = f
        .projects
        .update(
            &handle,
            ProjectPatch {
                end_date: Some("2024-01-09".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(matches!(
        outcome.rejected.as_slice(),
        [(ProjectField::EndDate, ValidationError::EndNotAfterStart { .. })]
    ));
    assert_eq!(outcome.project.end_date, date("2024-02-10"));

    let updated = f
        .projects
        .update(
            &handle,
            ProjectPatch {
                start_date: Some("2024-03-01".to_string()),
                end_date: Some("2024-04-01".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(updated.is_complete());
    assert_eq!(updated.project.start_date, date("2024-03-01"));
    assert_eq!(updated.project.end_date, date("2024-04-01"));
}

#[test]
fn test_update_rejected_end_keeps_valid_new_start() {
    let mut f = fixture();
    f.projects
        .create(&f.alice, new_project("Wells", "2024-01-10", "2024-02-10"))
        .unwrap();
    let handle = f.projects.select_owned(&f.alice, 0).unwrap();

    // The new end is not after the new start, but the new start still fits
    // before the kept end
    let outcome = f
        .projects
        .update(
            &handle,
            ProjectPatch {
                start_date: Some("2024-01-20".to_string()),
                end_date: Some("2024-01-15".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    assert!(matches!(
        outcome.rejected.as_slice(),
        [(ProjectField::EndDate, ValidationError::EndNotAfterStart { .. })]
    ));
    assert_eq!(outcome.project.start_date, date("2024-01-20"));
    assert_eq!(outcome.project.end_date, date("2024-02-10"));
}

#[test]
fn test_update_rejects_non_positive_target() {
    let mut f = fixture();
    f.projects
        .create(&f.alice, new_project("Wells", "2024-01-10", "2024-02-10"))
        .unwrap();
    let handle = f.projects.select_owned(&f.alice, 0).unwrap();

    let outcome = f
        .projects
        .update(
            &handle,
            ProjectPatch {
                total_target: Some(-5.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(matches!(
        outcome.rejected.as_slice(),
        [(ProjectField::TotalTarget, ValidationError::NonPositiveTarget(_))]
    ));
    assert!((outcome.project.total_target - 10_000.0).abs() < f64::EPSILON);
}

#[test]
fn test_update_applies_valid_fields_alongside_rejected_ones() {
    let mut f = fixture();
    f.projects
        .create(&f.alice, new_project("Wells", "2024-01-10", "2024-02-10"))
        .unwrap();
    let handle = f.projects.select_owned(&f.alice, 0).unwrap();

    let outcome = f
        .projects
        .update(
            &handle,
            ProjectPatch {
                title: Some("Schools".to_string()),
                total_target: Some(-5.0),
                end_date: Some("2024-02-31".to_string()),
                details: Some("New classrooms".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let fields: Vec<ProjectField> = outcome.rejected.iter().map(|(field, _)| *field).collect();
    assert_eq!(fields, [ProjectField::TotalTarget, ProjectField::EndDate]);
    assert_eq!(outcome.project.title, "Schools");
    assert_eq!(outcome.project.details, "New classrooms");
    assert!((outcome.project.total_target - 10_000.0).abs() < f64::EPSILON);
    assert_eq!(outcome.project.end_date, date("2024-02-10"));

    // The applied fields were persisted
    let reloaded = ProjectRepository::load(f.projects.store().clone());
    assert_eq!(reloaded.list_all(), f.projects.list_all());
    assert_eq!(reloaded.list_all()[0].title, "Schools");
}

#[test]
fn test_delete_removes_exactly_one() {
    let mut f = fixture();
    f.projects
        .create(&f.alice, new_project("Same", "2024-01-01", "2024-01-31"))
        .unwrap();
    f.projects
        .create(&f.bob, new_project("Same", "2024-01-01", "2024-01-31"))
        .unwrap();
    let second = f
        .projects
        .create(&f.alice, new_project("Same", "2024-01-01", "2024-01-31"))
        .unwrap();

    let handle = f.projects.select_owned(&f.alice, 1).unwrap();
    let removed = f.projects.delete(&handle).unwrap();

    assert_eq!(removed.id, second.id);
    assert_eq!(f.projects.len(), 2);
    assert_eq!(f.projects.list_by_owner("bob@example.com").len(), 1);
    assert_eq!(f.projects.list_by_owner("alice@example.com").len(), 1);
}

#[test]
fn test_stale_handle_is_not_found() {
    let mut f = fixture();
    f.projects
        .create(&f.alice, new_project("Wells", "2024-01-10", "2024-02-10"))
        .unwrap();
    let handle = f.projects.select_owned(&f.alice, 0).unwrap();
    f.projects.delete(&handle).unwrap();

    assert!(matches!(
        f.projects.delete(&handle).unwrap_err(),
        ProjectError::NotFound(_)
    ));
}

#[test]
fn test_search_by_date_inclusive() {
    let mut f = fixture();
    f.projects
        .create(&f.alice, new_project("Ends", "2024-01-01", "2024-01-15"))
        .unwrap();
    f.projects
        .create(&f.bob, new_project("Starts", "2024-01-15", "2024-02-01"))
        .unwrap();
    f.projects
        .create(&f.alice, new_project("Spans", "2024-01-10", "2024-01-20"))
        .unwrap();
    f.projects
        .create(&f.bob, new_project("Before", "2023-12-01", "2024-01-14"))
        .unwrap();
    f.projects
        .create(&f.bob, new_project("After", "2024-01-16", "2024-03-01"))
        .unwrap();

    let titles: Vec<&str> = f
        .projects
        .search_by_date("2024-01-15")
        .unwrap()
        .iter()
        .map(|p| p.title.as_str())
        .collect();
    assert_eq!(titles, ["Ends", "Starts", "Spans"]);
}

#[test]
fn test_search_by_date_rejects_invalid_date() {
    let f = fixture();
    assert!(matches!(
        f.projects.search_by_date("2024-1-15").unwrap_err(),
        ProjectError::Validation(ValidationError::InvalidDate(_))
    ));
}

#[test]
fn test_create_rolls_back_when_save_fails() {
    let f = fixture();
    let blocker = f.temp_dir.path().join("blocker");
    std::fs::write(&blocker, "file in the way").unwrap();
    let mut projects = ProjectRepository::new(Store::in_dir(&blocker), Vec::new());

    let err = projects
        .create(&f.alice, new_project("Wells", "2024-01-10", "2024-02-10"))
        .unwrap_err();
    assert!(matches!(err, ProjectError::Store(_)));
    assert!(projects.is_empty());
}

#[test]
fn test_update_rolls_back_when_save_fails() {
    let mut f = fixture();
    let original = f
        .projects
        .create(&f.alice, new_project("Wells", "2024-01-10", "2024-02-10"))
        .unwrap();
    let blocker = f.temp_dir.path().join("blocker");
    std::fs::write(&blocker, "file in the way").unwrap();
    let mut projects =
        ProjectRepository::new(Store::in_dir(&blocker), f.projects.list_all().to_vec());
    let handle = projects.select_owned(&f.alice, 0).unwrap();

    let err = projects
        .update(
            &handle,
            ProjectPatch {
                title: Some("Schools".to_string()),
                total_target: Some(20_000.0),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, ProjectError::Store(_)));
    assert_eq!(projects.get(&handle).unwrap(), &original);
}

#[test]
fn test_delete_rolls_back_when_save_fails() {
    let mut f = fixture();
    for (session, title) in [(&f.alice, "A1"), (&f.bob, "B1"), (&f.alice, "A2")] {
        f.projects
            .create(session, new_project(title, "2024-01-01", "2024-01-31"))
            .unwrap();
    }
    let blocker = f.temp_dir.path().join("blocker");
    std::fs::write(&blocker, "file in the way").unwrap();
    let mut projects =
        ProjectRepository::new(Store::in_dir(&blocker), f.projects.list_all().to_vec());
    let handle = projects.select_owned(&f.alice, 0).unwrap();

    let err = projects.delete(&handle).unwrap_err();

    assert!(matches!(err, ProjectError::Store(_)));
    assert_eq!(projects.list_all(), f.projects.list_all());
    assert_eq!(projects.list_all()[0].id, handle.id());
}

#[test]
fn test_from_loaded_rekeys_duplicate_ids() {
    let mut f = fixture();
    for title in ["First", "Second"] {
        f.projects
            .create(&f.alice, new_project(title, "2024-01-01", "2024-01-31"))
            .unwrap();
    }
    let mut records = f.projects.list_all().to_vec();
    records[1].id = records[0].id;
    let first_id = records[0].id;

    let mut projects = ProjectRepository::from_loaded(
        f.projects.store().clone(),
        LoadResult {
            records,
            status: LoadStatus::Loaded,
        },
    );

    let ids: Vec<Uuid> = projects.list_all().iter().map(|p| p.id).collect();
    assert_eq!(ids[0], first_id);
    assert_ne!(ids[1], first_id);

    let handle = projects.select_owned(&f.alice, 1).unwrap();
    let removed = projects.delete(&handle).unwrap();
    assert_eq!(removed.title, "Second");
    let left: Vec<&str> = projects.list_all().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(left, ["First"]);
}
