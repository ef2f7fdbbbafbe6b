//! Tests for the domain user model.

use super::*;
use chrono::{Duration, TimeZone};
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0)
        .single()
        .expect("valid fixture instant")
        + Duration::minutes(minutes)
}

#[fixture]
fn user() -> User {
    User::register(
        UserId::random(),
        Some("google".to_owned()),
        "ada@example.com".to_owned(),
        "Ada".to_owned(),
        Nickname::new("ada").expect("valid nickname"),
        at(0),
    )
}

#[rstest]
fn accepts_boundary_lengths() {
    assert!(Nickname::new("a".repeat(NICKNAME_MIN)).is_ok());
    assert!(Nickname::new("a".repeat(NICKNAME_MAX)).is_ok());
}

#[rstest]
#[case("   ", UserValidationError::EmptyNickname)]
#[case("a", UserValidationError::NicknameTooShort { min: NICKNAME_MIN })]
#[case("bad$char", UserValidationError::NicknameInvalidCharacters)]
#[case("with space", UserValidationError::NicknameInvalidCharacters)]
fn rejects_invalid_nicknames(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Nickname::new(raw), Err(expected));
}

#[rstest]
fn rejects_overlong_nickname() {
    let result = Nickname::new("a".repeat(NICKNAME_MAX + 1));
    assert!(matches!(
        result,
        Err(UserValidationError::NicknameTooLong { max }) if max == NICKNAME_MAX
    ));
}

#[rstest]
fn accepts_hangul_nicknames() {
    assert!(Nickname::new("개발자_01").is_ok());
}

#[rstest]
#[case("ada.lovelace", 12, "adalovelace12")]
#[case("", 3, "user3")]
#[case("abcdefghijklmnopqrstuvwxyz", 1234, "abcdefghijklmnop1234")]
fn generated_nicknames_fit_the_limit(
    #[case] base: &str,
    #[case] sequence: u64,
    #[case] expected: &str,
) {
    let nickname = Nickname::generated(base, sequence).expect("valid generated nickname");
    assert_eq!(nickname.as_ref(), expected);
}

#[given("a user without resume bookmarks")]
fn given_user(user: User) -> User {
    user
}

#[when("they bookmark the same resume twice")]
fn when_bookmark_twice(user: User, resume: ResumeId) -> User {
    let mut user = user;
    user.add_resume_bookmark(resume, at(1));
    user.add_resume_bookmark(resume, at(9));
    user
}

#[then("exactly one bookmark remains with the latest timestamp")]
fn then_single_latest(user: User, resume: ResumeId) {
    assert_eq!(
        user.resume_bookmarks(),
        &[ResumeBookmark {
            resume_id: resume,
            added_at: at(9),
        }]
    );
}

#[rstest]
fn bookmarking_twice_refreshes_in_place(user: User) {
    let resume = ResumeId::random();
    let user = given_user(user);
    let user = when_bookmark_twice(user, resume);
    then_single_latest(user, resume);
}

#[rstest]
fn removing_unknown_bookmark_is_a_no_op(mut user: User) {
    let kept = ResumeId::random();
    user.add_resume_bookmark(kept, at(1));
    user.delete_resume_bookmark(&ResumeId::random());
    assert!(user.has_bookmarked(&kept));
    assert_eq!(user.resume_bookmarks().len(), 1);
}

#[rstest]
fn soft_delete_keeps_data(mut user: User) {
    user.soft_delete();
    assert!(user.is_deleted());
    assert_eq!(user.email(), "ada@example.com");
}
