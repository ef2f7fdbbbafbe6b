//! Applications to join a project and the resulting memberships.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{MemberId, ProjectId, ResumeId, TryoutId, UserId};

/// Review state of a tryout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TryoutStatus {
    /// Awaiting the owner's decision.
    InReview,
    /// Accepted; the applicant became a member.
    Accepted,
    /// Declined by the owner.
    Rejected,
}

impl TryoutStatus {
    /// Stable stored representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InReview => "INREVIEW",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Parse the stored representation.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "INREVIEW" => Some(Self::InReview),
            "ACCEPTED" => Some(Self::Accepted),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Raised when a decision targets a tryout that is no longer in review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("tryout was already decided: {current:?}")]
pub struct TryoutTransitionError {
    /// Status at the time of the attempt.
    pub current: TryoutStatus,
}

/// Display fields copied from the applicant at application time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantProfile {
    pub user_id: UserId,
    pub nickname: String,
    pub self_description: Option<String>,
    pub profile_image_url: Option<String>,
}

/// An application to a project position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTryout {
    pub(crate) id: TryoutId,
    pub(crate) resume_id: ResumeId,
    pub(crate) applicant: ApplicantProfile,
    pub(crate) project_id: ProjectId,
    pub(crate) position_name: String,
    pub(crate) status: TryoutStatus,
    pub(crate) created_at: DateTime<Utc>,
}

impl ProjectTryout {
    /// Submit an application; starts in review.
    pub fn apply(
        id: TryoutId,
        resume_id: ResumeId,
        applicant: ApplicantProfile,
        project_id: ProjectId,
        position_name: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            resume_id,
            applicant,
            project_id,
            position_name,
            status: TryoutStatus::InReview,
            created_at: now,
        }
    }

    /// Accept the applicant and produce their membership.
    pub fn accept(
        &mut self,
        member_id: MemberId,
        now: DateTime<Utc>,
    ) -> Result<ProjectMember, TryoutTransitionError> {
        self.decide(TryoutStatus::Accepted)?;
        Ok(ProjectMember {
            id: member_id,
            resume_id: self.resume_id,
            tryout_id: Some(self.id),
            member: self.applicant.clone(),
            position_name: self.position_name.clone(),
            project_id: self.project_id,
            created_at: now,
        })
    }

    /// Decline the applicant.
    pub fn reject(&mut self) -> Result<(), TryoutTransitionError> {
        self.decide(TryoutStatus::Rejected)
    }

    fn decide(&mut self, next: TryoutStatus) -> Result<(), TryoutTransitionError> {
        if self.status != TryoutStatus::InReview {
            return Err(TryoutTransitionError {
                current: self.status,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Tryout identifier.
    pub fn id(&self) -> TryoutId {
        self.id
    }

    /// Resume submitted with the application.
    pub fn resume_id(&self) -> ResumeId {
        self.resume_id
    }

    /// Applicant display fields.
    pub fn applicant(&self) -> &ApplicantProfile {
        &self.applicant
    }

    /// Project applied to.
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Recruited position applied for.
    pub fn position_name(&self) -> &str {
        &self.position_name
    }

    /// Review status.
    pub fn status(&self) -> TryoutStatus {
        self.status
    }

    /// When the application was submitted.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A confirmed project member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMember {
    pub(crate) id: MemberId,
    pub(crate) resume_id: ResumeId,
    pub(crate) tryout_id: Option<TryoutId>,
    pub(crate) member: ApplicantProfile,
    pub(crate) position_name: String,
    pub(crate) project_id: ProjectId,
    pub(crate) created_at: DateTime<Utc>,
}

impl ProjectMember {
    /// Member identifier; accepted tryouts share their tryout's UUID.
    pub fn id(&self) -> MemberId {
        self.id
    }

    /// Resume the member joined with.
    pub fn resume_id(&self) -> ResumeId {
        self.resume_id
    }

    /// Tryout that produced the membership, if any.
    pub fn tryout_id(&self) -> Option<TryoutId> {
        self.tryout_id
    }

    /// Member display fields.
    pub fn member(&self) -> &ApplicantProfile {
        &self.member
    }

    /// Position the member fills.
    pub fn position_name(&self) -> &str {
        &self.position_name
    }

    /// Project joined.
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// When the member joined.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn tryout() -> ProjectTryout {
        ProjectTryout::apply(
            TryoutId::random(),
            ResumeId::random(),
            ApplicantProfile {
                user_id: UserId::random(),
                nickname: "applicant".to_owned(),
                self_description: None,
                profile_image_url: None,
            },
            ProjectId::random(),
            "Backend".to_owned(),
            Utc::now(),
        )
    }

    #[rstest]
    fn starts_in_review(tryout: ProjectTryout) {
        assert_eq!(tryout.status(), TryoutStatus::InReview);
    }

    #[rstest]
    fn accept_creates_member_for_position(mut tryout: ProjectTryout) {
        let member = tryout
            .accept(MemberId::random(), Utc::now())
            .expect("in review");
        assert_eq!(tryout.status(), TryoutStatus::Accepted);
        assert_eq!(member.tryout_id(), Some(tryout.id()));
        assert_eq!(member.position_name(), "Backend");
        assert_eq!(member.member().user_id, tryout.applicant().user_id);
    }

    #[rstest]
    fn decided_tryouts_cannot_transition(mut tryout: ProjectTryout) {
        tryout.reject().expect("in review");
        let err = tryout
            .accept(MemberId::random(), Utc::now())
            .expect_err("already rejected");
        assert_eq!(err.current, TryoutStatus::Rejected);
        assert_eq!(tryout.reject(), Err(TryoutTransitionError { current: TryoutStatus::Rejected }));
    }

    #[rstest]
    #[case(TryoutStatus::InReview)]
    #[case(TryoutStatus::Accepted)]
    #[case(TryoutStatus::Rejected)]
    fn stored_form_parses_back(#[case] status: TryoutStatus) {
        assert_eq!(TryoutStatus::parse(status.as_str()), Some(status));
    }
}
