//! Resume domain service.
//!
//! Resumes carry a snapshot of their owner's display fields, refreshed on
//! every write. Bookmarks live on the bookmarking user's record.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{PageRequest, Slice};
use tracing::info;

use crate::domain::ports::{
    RepositoryError, ResumeCommand, ResumeQuery, ResumeRepository, ResumeSearch, ResumeView,
    UserRepository, map_repository_error,
};
use crate::domain::{
    Error, KeywordFilter, Resume, ResumeDraft, ResumeFilterType, ResumeId, ResumeOwner,
    ResumeSortKey, SortOrder, User, UserId,
};

fn store_error(err: RepositoryError) -> Error {
    map_repository_error("resume", err)
}

fn invalid(err: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("invalid resume: {err}"))
}

fn owner_snapshot(user: &User) -> ResumeOwner {
    let profile = user.profile();
    ResumeOwner {
        user_id: *user.id(),
        nickname: user.nickname().to_string(),
        email: user.email().to_owned(),
        profile_image_url: profile.profile_image_url.clone(),
        gender: profile.gender.clone(),
        birth_date: profile.birth_date.clone(),
        phone_number: profile.phone_number.clone(),
    }
}

/// Resume service implementing [`ResumeCommand`] and [`ResumeQuery`].
#[derive(Clone)]
pub struct ResumeService<R, U> {
    resumes: Arc<R>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, U> ResumeService<R, U> {
    pub fn new(resumes: Arc<R>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            resumes,
            users,
            clock,
        }
    }
}

impl<R, U> ResumeService<R, U>
where
    R: ResumeRepository,
    U: UserRepository,
{
    async fn load_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(|err| map_repository_error("user", err))?
            .filter(|user| !user.is_deleted())
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }

    async fn load(&self, resume_id: &ResumeId) -> Result<Resume, Error> {
        self.resumes
            .find_by_id(resume_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| Error::not_found(format!("resume {resume_id} not found")))
    }

    async fn load_own(&self, requester: &UserId, resume_id: &ResumeId) -> Result<Resume, Error> {
        let resume = self.load(resume_id).await?;
        if !resume.is_owned_by(requester) {
            return Err(Error::forbidden("only the owner may change this resume"));
        }
        Ok(resume)
    }

    async fn save(&self, resume: &Resume) -> Result<(), Error> {
        self.resumes.save(resume).await.map_err(store_error)
    }

    async fn save_user(&self, user: &User) -> Result<(), Error> {
        self.users
            .save(user)
            .await
            .map_err(|err| map_repository_error("user", err))
    }
}

#[async_trait]
impl<R, U> ResumeCommand for ResumeService<R, U>
where
    R: ResumeRepository,
    U: UserRepository,
{
    async fn create_resume(&self, owner: &UserId, draft: ResumeDraft) -> Result<Resume, Error> {
        let user = self.load_user(owner).await?;
        let resume = Resume::create(
            ResumeId::random(),
            owner_snapshot(&user),
            draft,
            self.clock.utc(),
        )
        .map_err(invalid)?;
        self.save(&resume).await?;
        info!(resume_id = %resume.id(), owner = %owner, "resume created");
        Ok(resume)
    }

    async fn update_resume(
        &self,
        requester: &UserId,
        resume_id: &ResumeId,
        draft: ResumeDraft,
    ) -> Result<Resume, Error> {
        let mut resume = self.load_own(requester, resume_id).await?;
        let user = self.load_user(requester).await?;
        resume.update(draft, self.clock.utc()).map_err(invalid)?;
        resume.refresh_owner(owner_snapshot(&user));
        self.save(&resume).await?;
        Ok(resume)
    }

    async fn delete_resume(&self, requester: &UserId, resume_id: &ResumeId) -> Result<(), Error> {
        self.load_own(requester, resume_id).await?;
        self.resumes.delete(resume_id).await.map_err(store_error)
    }

    async fn activate_resume(
        &self,
        requester: &UserId,
        resume_id: &ResumeId,
    ) -> Result<Resume, Error> {
        let mut resume = self.load_own(requester, resume_id).await?;
        let now = self.clock.utc();
        let others = self
            .resumes
            .find_by_owner(requester)
            .await
            .map_err(store_error)?;
        for mut other in others
            .into_iter()
            .filter(|other| other.id() != *resume_id && other.is_active())
        {
            other.deactivate(now);
            self.save(&other).await?;
        }
        resume.activate(now);
        self.save(&resume).await?;
        Ok(resume)
    }

    async fn deactivate_resume(
        &self,
        requester: &UserId,
        resume_id: &ResumeId,
    ) -> Result<Resume, Error> {
        let mut resume = self.load_own(requester, resume_id).await?;
        resume.deactivate(self.clock.utc());
        self.save(&resume).await?;
        Ok(resume)
    }

    async fn copy_resume(
        &self,
        requester: &UserId,
        resume_id: &ResumeId,
    ) -> Result<Resume, Error> {
        let original = self.load_own(requester, resume_id).await?;
        let copy = original.copy_as(ResumeId::random(), self.clock.utc());
        self.save(&copy).await?;
        Ok(copy)
    }

    async fn add_bookmark(&self, requester: &UserId, resume_id: &ResumeId) -> Result<(), Error> {
        let resume = self.load(resume_id).await?;
        if resume.is_owned_by(requester) {
            return Err(Error::invalid_request("cannot bookmark your own resume"));
        }
        let mut user = self.load_user(requester).await?;
        user.add_resume_bookmark(*resume_id, self.clock.utc());
        self.save_user(&user).await
    }

    async fn remove_bookmark(
        &self,
        requester: &UserId,
        resume_id: &ResumeId,
    ) -> Result<(), Error> {
        let mut user = self.load_user(requester).await?;
        if !user.has_bookmarked(resume_id) {
            return Ok(());
        }
        user.delete_resume_bookmark(resume_id);
        self.save_user(&user).await
    }
}

#[async_trait]
impl<R, U> ResumeQuery for ResumeService<R, U>
where
    R: ResumeRepository,
    U: UserRepository,
{
    async fn get_resume(
        &self,
        requester: &UserId,
        resume_id: &ResumeId,
    ) -> Result<ResumeView, Error> {
        let resume = self.load(resume_id).await?;
        if !resume.is_owned_by(requester) && !resume.is_active() {
            return Err(Error::not_found(format!("resume {resume_id} not found")));
        }
        let user = self.load_user(requester).await?;
        Ok(ResumeView {
            is_bookmarked: user.has_bookmarked(resume_id),
            resume,
        })
    }

    async fn list_own_resumes(&self, requester: &UserId) -> Result<Vec<Resume>, Error> {
        let mut resumes = self
            .resumes
            .find_by_owner(requester)
            .await
            .map_err(store_error)?;
        resumes.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        Ok(resumes)
    }

    async fn search_resumes(
        &self,
        requester: &UserId,
        filter: KeywordFilter<ResumeFilterType>,
        sort: SortOrder<ResumeSortKey>,
        page: PageRequest,
    ) -> Result<Slice<ResumeView>, Error> {
        let user = self.load_user(requester).await?;
        let search = ResumeSearch {
            filter,
            requester: *requester,
            sort,
        };
        let peeked = self
            .resumes
            .search(&search, page)
            .await
            .map_err(store_error)?;
        Ok(Slice::from_peeked(peeked, page).map(|resume| ResumeView {
            is_bookmarked: user.has_bookmarked(&resume.id()),
            resume,
        }))
    }

    async fn list_bookmarked_resumes(&self, requester: &UserId) -> Result<Vec<ResumeView>, Error> {
        let user = self.load_user(requester).await?;
        let mut bookmarks = user.resume_bookmarks().to_vec();
        bookmarks.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        let ids: Vec<ResumeId> = bookmarks.iter().map(|b| b.resume_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found = self
            .resumes
            .find_by_ids(&ids)
            .await
            .map_err(store_error)?;
        Ok(ids
            .iter()
            .filter_map(|id| found.iter().find(|resume| resume.id() == *id))
            .map(|resume| ResumeView {
                resume: resume.clone(),
                is_bookmarked: true,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeDelta;
    use pagination::SortDirection;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockResumeRepository, MockUserRepository};
    use crate::test_support::{fixture_clock, fixture_timestamp, sample_resume, sample_user};

    fn users_with(user: User) -> MockUserRepository {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo
    }

    fn resumes_with(resume: Resume) -> MockResumeRepository {
        let mut repo = MockResumeRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(resume.clone())));
        repo
    }

    #[rstest]
    #[tokio::test]
    async fn create_copies_owner_snapshot() {
        let owner = UserId::random();
        let mut resumes = MockResumeRepository::new();
        resumes
            .expect_save()
            .withf(move |r| r.owner().user_id == owner && r.owner().nickname == "minji")
            .times(1)
            .returning(|_| Ok(()));
        let svc = ResumeService::new(
            Arc::new(resumes),
            Arc::new(users_with(sample_user(owner, "minji"))),
            fixture_clock(),
        );

        let resume = svc
            .create_resume(
                &owner,
                ResumeDraft {
                    title: "Rust developer".to_owned(),
                    ..ResumeDraft::default()
                },
            )
            .await
            .expect("created");
        assert!(!resume.is_active());
    }

    #[rstest]
    #[tokio::test]
    async fn activate_deactivates_other_active_resumes() {
        let owner = UserId::random();
        let target = sample_resume(owner);
        let target_id = target.id();
        let mut active = sample_resume(owner);
        active.activate(fixture_timestamp());
        let active_id = active.id();
        let listed = vec![target.clone(), active];

        let mut resumes = resumes_with(target);
        resumes
            .expect_find_by_owner()
            .returning(move |_| Ok(listed.clone()));
        resumes
            .expect_save()
            .withf(move |r| r.id() == active_id && !r.is_active())
            .times(1)
            .returning(|_| Ok(()));
        resumes
            .expect_save()
            .withf(move |r| r.id() == target_id && r.is_active())
            .times(1)
            .returning(|_| Ok(()));

        let svc = ResumeService::new(
            Arc::new(resumes),
            Arc::new(MockUserRepository::new()),
            fixture_clock(),
        );
        let resume = svc
            .activate_resume(&owner, &target_id)
            .await
            .expect("activated");
        assert!(resume.is_active());
    }

    #[rstest]
    #[tokio::test]
    async fn bookmarking_own_resume_is_invalid() {
        let owner = UserId::random();
        let resume = sample_resume(owner);
        let id = resume.id();
        let svc = ResumeService::new(
            Arc::new(resumes_with(resume)),
            Arc::new(MockUserRepository::new()),
            fixture_clock(),
        );
        let err = svc.add_bookmark(&owner, &id).await.expect_err("own resume");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn inactive_resume_is_hidden_from_others() {
        let resume = sample_resume(UserId::random());
        let id = resume.id();
        let svc = ResumeService::new(
            Arc::new(resumes_with(resume)),
            Arc::new(MockUserRepository::new()),
            fixture_clock(),
        );
        let err = svc
            .get_resume(&UserId::random(), &id)
            .await
            .expect_err("hidden");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn bookmarked_resumes_follow_bookmark_recency() {
        let reader_id = UserId::random();
        let older = sample_resume(UserId::random());
        let newer = sample_resume(UserId::random());
        let mut reader = sample_user(reader_id, "reader");
        reader.add_resume_bookmark(older.id(), fixture_timestamp());
        reader.add_resume_bookmark(newer.id(), fixture_timestamp() + TimeDelta::minutes(5));
        let expected = vec![newer.id(), older.id()];
        let stored = vec![older, newer];

        let mut resumes = MockResumeRepository::new();
        resumes
            .expect_find_by_ids()
            .returning(move |_| Ok(stored.clone()));
        let svc = ResumeService::new(
            Arc::new(resumes),
            Arc::new(users_with(reader)),
            fixture_clock(),
        );

        let views = svc
            .list_bookmarked_resumes(&reader_id)
            .await
            .expect("listed");
        let ids: Vec<ResumeId> = views.iter().map(|v| v.resume.id()).collect();
        assert_eq!(ids, expected);
        assert!(views.iter().all(|v| v.is_bookmarked));
    }

    #[rstest]
    #[tokio::test]
    async fn search_marks_requester_bookmarks() {
        let reader_id = UserId::random();
        let marked = sample_resume(UserId::random());
        let plain = sample_resume(UserId::random());
        let mut reader = sample_user(reader_id, "reader");
        reader.add_resume_bookmark(marked.id(), fixture_timestamp());
        let marked_id = marked.id();
        let page_items = vec![marked, plain];

        let mut resumes = MockResumeRepository::new();
        resumes
            .expect_search()
            .withf(move |search, _| search.requester == reader_id)
            .returning(move |_, _| Ok(page_items.clone()));
        let svc = ResumeService::new(
            Arc::new(resumes),
            Arc::new(users_with(reader)),
            fixture_clock(),
        );

        let slice = svc
            .search_resumes(
                &reader_id,
                KeywordFilter::new(None, None),
                SortOrder::new(ResumeSortKey::UpdatedAt, SortDirection::Desc),
                PageRequest::new(0, 10).expect("valid page"),
            )
            .await
            .expect("searched");
        assert!(!slice.has_next());
        let flags: Vec<bool> = slice
            .content()
            .iter()
            .map(|v| v.is_bookmarked == (v.resume.id() == marked_id))
            .collect();
        assert_eq!(flags, vec![true, true]);
    }
}
