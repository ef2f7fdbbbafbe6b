//! Tests for project handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use pagination::SortDirection;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::{MemberId, ProjectTryout, ResumeId, SortOrder, TryoutId, UserId};
use crate::inbound::http::test_utils::{MockPorts, with_token};
use crate::test_support::{fixture_timestamp, sample_applicant, sample_project};

#[fixture]
fn me() -> UserId {
    UserId::random()
}

async fn call(ports: MockPorts, request: actix_test::TestRequest) -> actix_web::dev::ServiceResponse {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await;
    actix_test::call_service(&app, with_token(request).to_request()).await
}

fn project_body(title: &str) -> Value {
    json!({
        "title": title,
        "startDate": "2026-03-01T00:00:00Z",
        "endDate": "2026-06-01T00:00:00Z",
        "techStacks": ["Rust"],
        "recruitments": [{ "jobName": "Backend", "numberOfRecruitment": 2 }],
        "description": "matching service"
    })
}

#[rstest]
#[actix_web::test]
async fn search_defaults_to_open_projects_newest_first(me: UserId) {
    let mut ports = MockPorts::signed_in(me);
    ports
        .projects_query
        .expect_search_projects()
        .withf(|_, search, page| {
            !search.is_completed
                && search.filter.active().is_none()
                && search.sort == SortOrder::default()
                && page.number() == 0
                && page.size() == 10
        })
        .returning(move |requester, _, page| {
            let views = (0..11)
                .map(|_| ProjectView::for_requester(sample_project(UserId::random()), requester))
                .collect();
            Ok(Slice::from_peeked(views, page))
        });

    let response = call(ports, actix_test::TestRequest::get().uri("/api/v1/projects")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("content").and_then(Value::as_array).map(Vec::len), Some(10));
    assert_eq!(body.get("hasNext"), Some(&json!(true)));
    assert_eq!(body.pointer("/content/0/isBookmarked"), Some(&json!(false)));
}

#[rstest]
#[actix_web::test]
async fn search_accepts_completed_and_bookmark_sort(me: UserId) {
    let mut ports = MockPorts::signed_in(me);
    ports
        .projects_query
        .expect_search_projects()
        .withf(|_, search, _| {
            search.is_completed
                && search.filter.active() == Some((ProjectFilterType::TechStack, "rust"))
                && search.sort.key == ProjectSortKey::BookmarkCount
                && search.sort.direction == SortDirection::Desc
        })
        .returning(|_, _, page| Ok(Slice::empty(page)));
    let response = call(
        ports,
        actix_test::TestRequest::get().uri(
            "/api/v1/projects?filterType=TECH_STACK&filterValue=rust&isCompleted=true&sortBy=bookmarkCount",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn create_maps_recruitments(me: UserId) {
    let mut ports = MockPorts::signed_in(me);
    ports
        .projects
        .expect_create_project()
        .withf(move |owner, draft| {
            *owner == me
                && draft.recruitments.len() == 1
                && draft.recruitments[0].number_of_recruitment == 2
        })
        .times(1)
        .returning(|owner, _| Ok(sample_project(*owner)));
    let response = call(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/projects")
            .set_json(project_body("pmeet")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("userId"), Some(&json!(me.to_string())));
    assert_eq!(body.get("bookmarkCount"), Some(&json!(0)));
}

#[rstest]
#[actix_web::test]
async fn validation_failures_surface_as_bad_request(me: UserId) {
    let mut ports = MockPorts::signed_in(me);
    ports
        .projects
        .expect_create_project()
        .returning(|_, _| Err(Error::invalid_request("project title must not be empty")));
    let response = call(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/projects")
            .set_json(project_body(" ")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn non_owner_update_is_forbidden(me: UserId) {
    let mut ports = MockPorts::signed_in(me);
    ports
        .projects
        .expect_update_project()
        .returning(|_, _, _| Err(Error::forbidden("only the project owner may do this")));
    let response = call(
        ports,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/projects/{}", ProjectId::random()))
            .set_json(project_body("renamed")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn fixed_routes_win_over_the_id_segment(me: UserId) {
    let mut ports = MockPorts::signed_in(me);
    ports
        .projects_query
        .expect_list_own_projects()
        .times(1)
        .returning(|_| Ok(Vec::new()));
    let response = call(ports, actix_test::TestRequest::get().uri("/api/v1/projects/mine")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn members_are_listed(me: UserId) {
    let project = ProjectId::random();
    let mut ports = MockPorts::signed_in(me);
    ports
        .projects_query
        .expect_list_members()
        .withf(move |id| *id == project)
        .returning(move |_| {
            let mut tryout = ProjectTryout::apply(
                TryoutId::random(),
                ResumeId::random(),
                sample_applicant(UserId::random()),
                project,
                "Backend".to_owned(),
                fixture_timestamp(),
            );
            let member = tryout
                .accept(MemberId::random(), fixture_timestamp())
                .expect("in-review tryout accepts");
            Ok(vec![member])
        });
    let response = call(
        ports,
        actix_test::TestRequest::get().uri(&format!("/api/v1/projects/{project}/members")),
    )
    .await;
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.pointer("/0/positionName"), Some(&json!("Backend")));
    assert_eq!(body.pointer("/0/nickname"), Some(&json!("applicant")));
}

#[rstest]
#[actix_web::test]
async fn missing_project_is_not_found(me: UserId) {
    let mut ports = MockPorts::signed_in(me);
    ports
        .projects_query
        .expect_get_project()
        .returning(|_, _| Err(Error::not_found("project not found")));
    let response = call(
        ports,
        actix_test::TestRequest::get().uri(&format!("/api/v1/projects/{}", ProjectId::random())),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
