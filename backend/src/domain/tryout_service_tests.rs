//! Tests for the tryout service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockMemberRepository, MockNotificationPublisher, MockNotificationRepository,
    MockProjectRepository, MockResumeRepository, MockTryoutRepository,
};
use crate::domain::{ErrorCode, Resume, TryoutStatus};
use crate::test_support::{fixture_clock, fixture_timestamp, sample_applicant, sample_project, sample_resume};

type Service = TryoutService<
    MockTryoutRepository,
    MockMemberRepository,
    MockProjectRepository,
    MockResumeRepository,
>;

struct Mocks {
    tryouts: MockTryoutRepository,
    members: MockMemberRepository,
    projects: MockProjectRepository,
    resumes: MockResumeRepository,
    notifications: usize,
}

impl Mocks {
    fn build(self) -> Service {
        let mut repo = MockNotificationRepository::new();
        repo.expect_save()
            .times(self.notifications)
            .returning(|_| Ok(()));
        let mut publisher = MockNotificationPublisher::new();
        publisher
            .expect_publish()
            .times(self.notifications)
            .return_const(());
        TryoutService::new(
            Arc::new(self.tryouts),
            Arc::new(self.members),
            Arc::new(self.projects),
            Arc::new(self.resumes),
            Notifier::new(Arc::new(repo), Arc::new(publisher), fixture_clock()),
            fixture_clock(),
        )
    }
}

#[fixture]
fn mocks() -> Mocks {
    Mocks {
        tryouts: MockTryoutRepository::new(),
        members: MockMemberRepository::new(),
        projects: MockProjectRepository::new(),
        resumes: MockResumeRepository::new(),
        notifications: 0,
    }
}

fn with_project(mocks: &mut Mocks, project: Project) {
    mocks
        .projects
        .expect_find_by_id()
        .returning(move |_| Ok(Some(project.clone())));
}

fn with_resume(mocks: &mut Mocks, resume: Resume) {
    mocks
        .resumes
        .expect_find_by_id()
        .returning(move |_| Ok(Some(resume.clone())));
}

fn in_review(project_id: ProjectId, applicant: UserId) -> ProjectTryout {
    ProjectTryout::apply(
        TryoutId::random(),
        ResumeId::random(),
        sample_applicant(applicant),
        project_id,
        "Backend".to_owned(),
        fixture_timestamp(),
    )
}

#[rstest]
#[tokio::test]
async fn apply_notifies_project_owner(mocks: Mocks) {
    let mut mocks = mocks;
    let applicant = UserId::random();
    let project = sample_project(UserId::random());
    let project_id = project.id();
    let resume = sample_resume(applicant);
    let resume_id = resume.id();
    with_project(&mut mocks, project);
    with_resume(&mut mocks, resume);
    mocks.tryouts.expect_exists_for().returning(|_, _| Ok(false));
    mocks.tryouts.expect_save().times(1).returning(|_| Ok(()));
    mocks.notifications = 1;

    let tryout = mocks
        .build()
        .apply(&applicant, &project_id, &resume_id, "Backend".to_owned())
        .await
        .expect("applied");
    assert_eq!(tryout.status(), TryoutStatus::InReview);
    assert_eq!(tryout.applicant().nickname, "writer");
}

#[rstest]
#[tokio::test]
async fn second_application_conflicts(mocks: Mocks) {
    let mut mocks = mocks;
    let applicant = UserId::random();
    let project = sample_project(UserId::random());
    let project_id = project.id();
    let resume = sample_resume(applicant);
    let resume_id = resume.id();
    with_project(&mut mocks, project);
    with_resume(&mut mocks, resume);
    mocks.tryouts.expect_exists_for().returning(|_, _| Ok(true));
    mocks.tryouts.expect_save().times(0);

    let err = mocks
        .build()
        .apply(&applicant, &project_id, &resume_id, "Backend".to_owned())
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[case::own_project(true, "Backend", ErrorCode::InvalidRequest)]
#[case::unknown_position(false, "Designer", ErrorCode::InvalidRequest)]
#[tokio::test]
async fn apply_rejects_invalid_targets(
    mocks: Mocks,
    #[case] own_project: bool,
    #[case] position: &str,
    #[case] expected: ErrorCode,
) {
    let mut mocks = mocks;
    let applicant = UserId::random();
    let owner = if own_project { applicant } else { UserId::random() };
    let project = sample_project(owner);
    let project_id = project.id();
    with_project(&mut mocks, project);

    let err = mocks
        .build()
        .apply(&applicant, &project_id, &ResumeId::random(), position.to_owned())
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn apply_with_someone_elses_resume_is_forbidden(mocks: Mocks) {
    let mut mocks = mocks;
    let project = sample_project(UserId::random());
    let project_id = project.id();
    let resume = sample_resume(UserId::random());
    let resume_id = resume.id();
    with_project(&mut mocks, project);
    with_resume(&mut mocks, resume);

    let err = mocks
        .build()
        .apply(&UserId::random(), &project_id, &resume_id, "Backend".to_owned())
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn accept_saves_member_and_notifies_applicant(mocks: Mocks) {
    let mut mocks = mocks;
    let owner = UserId::random();
    let applicant = UserId::random();
    let project = sample_project(owner);
    let tryout = in_review(project.id(), applicant);
    let tryout_id = tryout.id();
    with_project(&mut mocks, project);
    mocks
        .tryouts
        .expect_find_by_id()
        .returning(move |_| Ok(Some(tryout.clone())));
    mocks
        .tryouts
        .expect_save()
        .withf(|t| t.status() == TryoutStatus::Accepted)
        .times(1)
        .returning(|_| Ok(()));
    mocks.members.expect_save().times(1).returning(|_| Ok(()));
    mocks.notifications = 1;

    let member = mocks
        .build()
        .accept(&owner, &tryout_id)
        .await
        .expect("accepted");
    assert_eq!(member.member().user_id, applicant);
    assert_eq!(member.tryout_id(), Some(tryout_id));
    assert_eq!(member.id(), MemberId::from_uuid(*tryout_id.as_uuid()));
}

#[rstest]
#[tokio::test]
async fn failed_member_write_leaves_tryout_in_review(mocks: Mocks) {
    let mut mocks = mocks;
    let owner = UserId::random();
    let project = sample_project(owner);
    let tryout = in_review(project.id(), UserId::random());
    let tryout_id = tryout.id();
    with_project(&mut mocks, project);
    mocks
        .tryouts
        .expect_find_by_id()
        .returning(move |_| Ok(Some(tryout.clone())));
    mocks
        .members
        .expect_save()
        .times(1)
        .returning(|_| Err(RepositoryError::connection("down")));
    mocks.tryouts.expect_save().times(0);

    let err = mocks
        .build()
        .accept(&owner, &tryout_id)
        .await
        .expect_err("member write failed");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn retried_acceptance_rewrites_the_same_member(mocks: Mocks) {
    let mut mocks = mocks;
    let owner = UserId::random();
    let project = sample_project(owner);
    let tryout = in_review(project.id(), UserId::random());
    let tryout_id = tryout.id();
    with_project(&mut mocks, project);
    mocks
        .tryouts
        .expect_find_by_id()
        .returning(move |_| Ok(Some(tryout.clone())));
    let expected = MemberId::from_uuid(*tryout_id.as_uuid());
    mocks
        .members
        .expect_save()
        .withf(move |member| member.id() == expected)
        .times(2)
        .returning(|_| Ok(()));
    let mut attempts = 0;
    mocks.tryouts.expect_save().times(2).returning(move |_| {
        attempts += 1;
        if attempts == 1 {
            Err(RepositoryError::connection("down"))
        } else {
            Ok(())
        }
    });
    mocks.notifications = 1;

    let service = mocks.build();
    let first = service.accept(&owner, &tryout_id).await;
    assert!(first.is_err());
    let member = service.accept(&owner, &tryout_id).await.expect("retry accepted");
    assert_eq!(member.id(), expected);
}

#[rstest]
#[tokio::test]
async fn decided_tryout_conflicts(mocks: Mocks) {
    let mut mocks = mocks;
    let owner = UserId::random();
    let project = sample_project(owner);
    let mut tryout = in_review(project.id(), UserId::random());
    tryout.reject().expect("first decision");
    let tryout_id = tryout.id();
    with_project(&mut mocks, project);
    mocks
        .tryouts
        .expect_find_by_id()
        .returning(move |_| Ok(Some(tryout.clone())));
    mocks.tryouts.expect_save().times(0);

    let err = mocks
        .build()
        .accept(&owner, &tryout_id)
        .await
        .expect_err("already decided");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn only_owner_lists_project_tryouts(mocks: Mocks) {
    let mut mocks = mocks;
    let project = sample_project(UserId::random());
    let project_id = project.id();
    with_project(&mut mocks, project);
    mocks.tryouts.expect_find_by_project().times(0);

    let err = mocks
        .build()
        .list_project_tryouts(&UserId::random(), &project_id)
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}
