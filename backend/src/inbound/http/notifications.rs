//! Notification handlers, including the server-sent event stream.
//!
//! ```text
//! GET   /api/v1/notifications
//! GET   /api/v1/notifications/unread-count
//! PATCH /api/v1/notifications/{id}/read
//! GET   /api/v1/notifications/subscribe      (text/event-stream)
//! ```
//!
//! The stream opens with a `connected` event, sends a comment line every
//! heartbeat period to keep proxies from closing it and writes one
//! `notification` event per live notification.

use std::convert::Infallible;
use std::time::Duration;

use actix_web::http::header;
use actix_web::web::Bytes;
use actix_web::{HttpResponse, get, patch, web};
use async_stream::stream;
use futures_util::Stream;
use serde::{Deserialize, Serialize};
use tokio::time::{Instant, interval_at};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::domain::{Error, Notification, NotificationId, Subscription};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Interval between keep-alive comments on an idle stream.
pub const HEARTBEAT_PERIOD: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UnreadCountResponse {
    pub count: u64,
}

fn sse_event(name: &str, data: &str) -> Bytes {
    Bytes::from(format!("event: {name}\ndata: {data}\n\n"))
}

enum Frame {
    Notification(Notification),
    Heartbeat,
    Closed,
}

/// Render a subscription as SSE frames.
///
/// The stream ends once the hub closes the subscription. A notification that
/// fails to serialise is logged and skipped.
pub(crate) fn event_stream(
    mut subscription: Subscription,
    heartbeat: Duration,
) -> impl Stream<Item = Result<Bytes, Infallible>> + 'static {
    stream! {
        let user_id = subscription.user_id().to_string();
        let connected = serde_json::Value::String(user_id.clone()).to_string();
        yield Ok::<_, Infallible>(sse_event("connected", &connected));
        let mut ticker = interval_at(Instant::now() + heartbeat, heartbeat);
        loop {
            let frame = tokio::select! {
                next = subscription.recv() => next.map_or(Frame::Closed, Frame::Notification),
                _ = ticker.tick() => Frame::Heartbeat,
            };
            match frame {
                Frame::Notification(notification) => match serde_json::to_string(&notification) {
                    Ok(payload) => yield Ok(sse_event("notification", &payload)),
                    Err(error) => warn!(%error, user_id, "skipping unserialisable notification"),
                },
                Frame::Heartbeat => yield Ok(Bytes::from_static(b": heartbeat\n\n")),
                Frame::Closed => break,
            }
        }
        debug!(user_id, "notification stream closed");
    }
}

/// List the caller's notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses((status = 200, description = "Notifications", body = [Notification])),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<Notification>>> {
    let notifications = state
        .notifications_query
        .list_notifications(user.user_id())
        .await?;
    Ok(web::Json(notifications))
}

/// Count the caller's unread notifications.
#[utoipa::path(
    get,
    path = "/api/v1/notifications/unread-count",
    responses((status = 200, description = "Unread count", body = UnreadCountResponse)),
    tags = ["notifications"],
    operation_id = "unreadNotificationCount"
)]
#[get("/notifications/unread-count")]
pub async fn unread_count(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<UnreadCountResponse>> {
    let count = state
        .notifications_query
        .unread_count(user.user_id())
        .await?;
    Ok(web::Json(UnreadCountResponse { count }))
}

/// Mark one of the caller's notifications as read.
#[utoipa::path(
    patch,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Marked read", body = Notification),
        (status = 404, description = "Missing or addressed to someone else", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[patch("/notifications/{id}/read")]
pub async fn mark_read(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Notification>> {
    let id: NotificationId = parse_id(&path, FieldName::new("id"))?;
    let notification = state.notifications.mark_read(user.user_id(), &id).await?;
    Ok(web::Json(notification))
}

/// Open a live notification stream for the caller.
#[utoipa::path(
    get,
    path = "/api/v1/notifications/subscribe",
    responses(
        (status = 200, description = "Server-sent event stream", content_type = "text/event-stream", body = String),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "subscribeNotifications"
)]
#[get("/notifications/subscribe")]
pub async fn subscribe(state: web::Data<HttpState>, user: AuthenticatedUser) -> HttpResponse {
    let subscription = state.notifications_query.subscribe(user.into_inner());
    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .insert_header(("X-Accel-Buffering", "no"))
        .streaming(event_stream(subscription, HEARTBEAT_PERIOD))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_notifications)
        .service(unread_count)
        .service(subscribe)
        .service(mark_read);
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use futures::StreamExt;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{NotificationHub, NotificationType, ProjectId, UserId};
    use crate::inbound::http::test_utils::{MockPorts, with_token};
    use crate::test_support::fixture_timestamp;

    fn note(target: UserId) -> Notification {
        Notification::new(
            NotificationId::random(),
            NotificationType::CommentAdded,
            target,
            Some(ProjectId::random()),
            fixture_timestamp(),
        )
    }

    fn frame(chunk: Option<Result<Bytes, Infallible>>) -> String {
        let Some(Ok(bytes)) = chunk else {
            panic!("stream ended early");
        };
        String::from_utf8(bytes.to_vec()).expect("utf-8 frame")
    }

    #[rstest]
    #[tokio::test]
    async fn stream_starts_connected_then_forwards_notifications() {
        let hub = NotificationHub::new(8);
        let user = UserId::random();
        let stream = event_stream(hub.subscribe(user), Duration::from_secs(3600));
        futures::pin_mut!(stream);

        let connected = frame(stream.next().await);
        assert_eq!(connected, format!("event: connected\ndata: \"{user}\"\n\n"));

        let sent = note(user);
        assert_eq!(hub.emit(&sent), 1);
        let event = frame(stream.next().await);
        assert!(event.starts_with("event: notification\ndata: "));
        let data: Value = serde_json::from_str(
            event
                .trim_start_matches("event: notification\ndata: ")
                .trim_end(),
        )
        .expect("json data");
        assert_eq!(data.get("type"), Some(&json!("COMMENT_ADDED")));
        assert_eq!(data.get("targetUserId"), Some(&json!(user.to_string())));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn idle_stream_sends_heartbeats() {
        let hub = NotificationHub::new(8);
        let stream = event_stream(hub.subscribe(UserId::random()), Duration::from_secs(30));
        futures::pin_mut!(stream);
        let _connected = frame(stream.next().await);
        assert_eq!(frame(stream.next().await), ": heartbeat\n\n");
    }

    #[rstest]
    #[tokio::test]
    async fn stream_ends_when_the_hub_shuts_down() {
        let hub = NotificationHub::new(8);
        let user = UserId::random();
        let stream = event_stream(hub.subscribe(user), Duration::from_secs(3600));
        futures::pin_mut!(stream);
        let _connected = frame(stream.next().await);

        hub.shutdown();
        assert!(stream.next().await.is_none());
        assert!(!hub.is_subscribed(&user));
    }

    #[rstest]
    #[tokio::test]
    async fn dropping_the_stream_releases_the_channel() {
        let hub = NotificationHub::new(8);
        let user = UserId::random();
        let stream = Box::pin(event_stream(hub.subscribe(user), HEARTBEAT_PERIOD));
        assert!(hub.is_subscribed(&user));
        drop(stream);
        assert!(!hub.is_subscribed(&user));
    }

    #[rstest]
    #[actix_web::test]
    async fn subscribe_answers_with_an_event_stream() {
        let me = UserId::random();
        let hub = NotificationHub::new(8);
        let mut ports = MockPorts::signed_in(me);
        let registry = hub.clone();
        ports
            .notifications_query
            .expect_subscribe()
            .withf(move |user| *user == me)
            .returning(move |user| registry.subscribe(user));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;
        let request =
            with_token(test::TestRequest::get().uri("/api/v1/notifications/subscribe")).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/event-stream")
        );
        assert!(hub.is_subscribed(&me));
    }

    #[rstest]
    #[actix_web::test]
    async fn unread_count_is_wrapped() {
        let mut ports = MockPorts::signed_in(UserId::random());
        ports
            .notifications_query
            .expect_unread_count()
            .returning(|_| Ok(3));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;
        let request = with_token(test::TestRequest::get().uri("/api/v1/notifications/unread-count"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body, json!({ "count": 3 }));
    }

    #[rstest]
    #[actix_web::test]
    async fn marking_someone_elses_notification_is_not_found() {
        let mut ports = MockPorts::signed_in(UserId::random());
        ports
            .notifications
            .expect_mark_read()
            .returning(|_, _| Err(Error::not_found("notification not found")));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;
        let request = with_token(
            test::TestRequest::patch()
                .uri(&format!("/api/v1/notifications/{}/read", NotificationId::random())),
        )
        .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
