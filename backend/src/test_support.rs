//! Shared fixtures for unit tests inside the crate.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    ApplicantProfile, Nickname, Project, ProjectDraft, ProjectId, Recruitment, Resume,
    ResumeDraft, ResumeId, ResumeOwner, User, UserId,
};

/// Instant every fixture clock starts at.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 24, 10, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock that reports a settable instant.
#[derive(Debug)]
pub struct FixtureClock(Mutex<DateTime<Utc>>);

impl FixtureClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(Mutex::new(instant))
    }

    pub fn advance_minutes(&self, minutes: i64) {
        let mut now = self.0.lock().expect("clock mutex");
        *now += TimeDelta::minutes(minutes);
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock mutex")
    }
}

pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock::at(fixture_timestamp()))
}

pub fn sample_draft(title: &str) -> ProjectDraft {
    let start = fixture_timestamp();
    ProjectDraft {
        title: title.to_owned(),
        start_date: start,
        end_date: start + TimeDelta::days(30),
        thumbnail_url: None,
        tech_stacks: vec!["Rust".to_owned()],
        recruitments: vec![Recruitment {
            job_name: "Backend".to_owned(),
            number_of_recruitment: 2,
        }],
        description: "sample".to_owned(),
    }
}

pub fn sample_project(owner: UserId) -> Project {
    Project::create(
        ProjectId::random(),
        owner,
        sample_draft("testTitle"),
        fixture_timestamp(),
    )
    .expect("valid sample project")
}

pub fn sample_user(id: UserId, nickname: &str) -> User {
    User::register(
        id,
        Some("google".to_owned()),
        format!("{nickname}@example.com"),
        nickname.to_owned(),
        Nickname::new(nickname).expect("valid nickname"),
        fixture_timestamp(),
    )
}

pub fn sample_owner(user_id: UserId) -> ResumeOwner {
    ResumeOwner {
        user_id,
        nickname: "writer".to_owned(),
        email: "writer@example.com".to_owned(),
        profile_image_url: None,
        gender: None,
        birth_date: None,
        phone_number: None,
    }
}

pub fn sample_resume(owner: UserId) -> Resume {
    Resume::create(
        ResumeId::random(),
        sample_owner(owner),
        ResumeDraft {
            title: "Backend engineer".to_owned(),
            desired_jobs: vec!["Backend".to_owned()],
            ..ResumeDraft::default()
        },
        fixture_timestamp(),
    )
    .expect("valid sample resume")
}

pub fn sample_applicant(user_id: UserId) -> ApplicantProfile {
    ApplicantProfile {
        user_id,
        nickname: "applicant".to_owned(),
        self_description: None,
        profile_image_url: None,
    }
}
