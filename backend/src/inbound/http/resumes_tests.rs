//! Tests for resume handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use pagination::SortDirection;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::UserId;
use crate::inbound::http::test_utils::{MockPorts, with_token};
use crate::test_support::sample_resume;

async fn call(ports: MockPorts, request: actix_test::TestRequest) -> actix_web::dev::ServiceResponse {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await;
    actix_test::call_service(&app, with_token(request).to_request()).await
}

#[rstest]
#[actix_web::test]
async fn create_maps_the_body_onto_a_draft() {
    let me = UserId::random();
    let mut ports = MockPorts::signed_in(me);
    ports
        .resumes
        .expect_create_resume()
        .withf(move |owner, draft| {
            *owner == me
                && draft.title == "Backend engineer"
                && draft.job_experiences.len() == 1
                && draft.job_experiences[0].end_date.is_none()
        })
        .times(1)
        .returning(|owner, _| Ok(sample_resume(*owner)));

    let response = call(
        ports,
        actix_test::TestRequest::post().uri("/api/v1/resumes").set_json(json!({
            "title": "Backend engineer",
            "desiredJobs": ["Backend"],
            "jobExperiences": [{
                "companyName": "pmeet",
                "jobName": "Backend",
                "startDate": "2025-01-01T00:00:00Z"
            }]
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("isActive"), Some(&json!(false)));
    assert!(body.get("isBookmarked").is_none());
}

#[rstest]
#[actix_web::test]
async fn search_forwards_filter_sort_and_page() {
    let me = UserId::random();
    let mut ports = MockPorts::signed_in(me);
    ports
        .resumes_query
        .expect_search_resumes()
        .withf(move |requester, filter, sort, page| {
            *requester == me
                && filter.active() == Some((ResumeFilterType::Nickname, "min"))
                && sort.key == ResumeSortKey::Title
                && sort.direction == SortDirection::Asc
                && page.number() == 0
                && page.size() == 5
        })
        .returning(|_, _, _, page| {
            let view = ResumeView {
                resume: sample_resume(UserId::random()),
                is_bookmarked: true,
            };
            Ok(Slice::from_peeked(vec![view], page))
        });

    let response = call(
        ports,
        actix_test::TestRequest::get().uri(
            "/api/v1/resumes/search?filterType=nickname&filterValue=min&sortBy=title&direction=asc&size=5",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.pointer("/content/0/isBookmarked"), Some(&json!(true)));
    assert_eq!(body.get("last"), Some(&json!(true)));
}

#[rstest]
#[case("/api/v1/resumes/search?filterType=COMPANY")]
#[case("/api/v1/resumes/search?sortBy=bookmarkCount")]
#[case("/api/v1/resumes/search?size=0")]
#[actix_web::test]
async fn bad_search_parameters_never_reach_the_service(#[case] uri: &str) {
    let response = call(
        MockPorts::signed_in(UserId::random()),
        actix_test::TestRequest::get().uri(uri),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn get_reports_bookmark_state() {
    let mut ports = MockPorts::signed_in(UserId::random());
    let resume = sample_resume(UserId::random());
    let id = resume.id();
    ports
        .resumes_query
        .expect_get_resume()
        .withf(move |_, resume_id| *resume_id == id)
        .returning(move |_, _| {
            Ok(ResumeView {
                resume: resume.clone(),
                is_bookmarked: false,
            })
        });
    let response = call(
        ports,
        actix_test::TestRequest::get().uri(&format!("/api/v1/resumes/{id}")),
    )
    .await;
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("isBookmarked"), Some(&json!(false)));
    assert_eq!(body.get("id"), Some(&json!(id.to_string())));
}

#[rstest]
#[actix_web::test]
async fn bookmark_routes_are_idempotent_no_content() {
    let mut ports = MockPorts::signed_in(UserId::random());
    ports.resumes.expect_add_bookmark().returning(|_, _| Ok(()));
    ports.resumes.expect_remove_bookmark().returning(|_, _| Ok(()));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await;
    let uri = format!("/api/v1/resumes/{}/bookmark", ResumeId::random());
    for request in [
        actix_test::TestRequest::put().uri(&uri),
        actix_test::TestRequest::put().uri(&uri),
        actix_test::TestRequest::delete().uri(&uri),
    ] {
        let response = actix_test::call_service(&app, with_token(request).to_request()).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

#[rstest]
#[actix_web::test]
async fn copy_returns_created() {
    let mut ports = MockPorts::signed_in(UserId::random());
    ports
        .resumes
        .expect_copy_resume()
        .returning(|requester, _| Ok(sample_resume(*requester)));
    let response = call(
        ports,
        actix_test::TestRequest::post().uri(&format!("/api/v1/resumes/{}/copy", ResumeId::random())),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
