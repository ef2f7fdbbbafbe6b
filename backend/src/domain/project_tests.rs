//! Tests for project invariants and bookmark mutators.

use chrono::{Duration, TimeZone};
use rstest::{fixture, rstest};

use super::*;

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0)
        .single()
        .expect("valid fixture instant")
        + Duration::minutes(minutes)
}

#[fixture]
fn draft() -> ProjectDraft {
    ProjectDraft {
        title: "testTitle".to_owned(),
        start_date: at(0),
        end_date: at(60 * 24 * 30),
        thumbnail_url: None,
        tech_stacks: vec!["Rust".to_owned(), "MongoDB".to_owned()],
        recruitments: vec![Recruitment {
            job_name: "Backend".to_owned(),
            number_of_recruitment: 2,
        }],
        description: "build it".to_owned(),
    }
}

#[fixture]
fn project(draft: ProjectDraft) -> Project {
    Project::create(ProjectId::random(), UserId::random(), draft, at(0)).expect("valid draft")
}

#[rstest]
fn create_starts_open_without_bookmarks(project: Project) {
    assert!(!project.is_completed());
    assert!(project.bookmarks().is_empty());
    assert_eq!(project.created_at(), project.updated_at());
}

#[rstest]
#[case::blank_title(|d: &mut ProjectDraft| d.title = "   ".to_owned(), ProjectValidationError::EmptyTitle)]
#[case::end_before_start(|d: &mut ProjectDraft| d.end_date = d.start_date - Duration::days(1), ProjectValidationError::InvalidDateRange)]
#[case::same_instant(|d: &mut ProjectDraft| d.end_date = d.start_date, ProjectValidationError::InvalidDateRange)]
#[case::no_recruitments(|d: &mut ProjectDraft| d.recruitments.clear(), ProjectValidationError::NoRecruitments)]
#[case::zero_members(
    |d: &mut ProjectDraft| d.recruitments[0].number_of_recruitment = 0,
    ProjectValidationError::ZeroRecruitment { job_name: "Backend".to_owned() }
)]
fn create_rejects_invalid_drafts(
    mut draft: ProjectDraft,
    #[case] mutate: fn(&mut ProjectDraft),
    #[case] expected: ProjectValidationError,
) {
    mutate(&mut draft);
    let result = Project::create(ProjectId::random(), UserId::random(), draft, at(0));
    assert_eq!(result, Err(expected));
}

#[rstest]
fn add_bookmark_twice_keeps_one_entry_with_latest_timestamp(mut project: Project) {
    let user = UserId::random();
    project.add_bookmark(user, at(1));
    project.add_bookmark(user, at(5));

    assert_eq!(project.bookmarks().len(), 1);
    assert_eq!(
        project.bookmarks().first().map(|b| b.added_at),
        Some(at(5))
    );
}

#[rstest]
fn re_bookmark_keeps_position(mut project: Project) {
    let first = UserId::random();
    let second = UserId::random();
    project.add_bookmark(first, at(1));
    project.add_bookmark(second, at(2));
    project.add_bookmark(first, at(3));

    let users: Vec<UserId> = project.bookmarks().iter().map(|b| b.user_id).collect();
    assert_eq!(users, vec![first, second]);
}

#[rstest]
fn delete_missing_bookmark_is_a_no_op(mut project: Project) {
    let keeper = UserId::random();
    project.add_bookmark(keeper, at(1));
    let before = project.bookmarks().to_vec();

    project.delete_bookmark(&UserId::random(), at(2));

    assert_eq!(project.bookmarks(), before.as_slice());
}

#[rstest]
fn delete_bookmark_removes_entry(mut project: Project) {
    let user = UserId::random();
    project.add_bookmark(user, at(1));
    project.delete_bookmark(&user, at(2));
    assert!(!project.is_bookmarked_by(&user));
}

#[rstest]
fn update_refreshes_timestamp(mut project: Project, mut draft: ProjectDraft) {
    draft.title = "renamed".to_owned();
    project.update(draft, at(10)).expect("valid update");
    assert_eq!(project.title(), "renamed");
    assert_eq!(project.updated_at(), at(10));
}

#[rstest]
fn complete_sets_flag(mut project: Project) {
    project.complete(at(3));
    assert!(project.is_completed());
    assert_eq!(project.updated_at(), at(3));
}
