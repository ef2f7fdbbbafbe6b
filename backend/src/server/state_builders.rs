//! Builders wiring MongoDB repositories into the domain services behind
//! [`HttpState`].

use std::sync::Arc;

use mockable::Clock;

use pmeet::domain::ports::{OAuthClient, TokenService};
use pmeet::domain::{
    CatalogService, CommentService, NotificationHub, NotificationService, Notifier,
    OAuthLoginService, ProjectService, ResumeService, TryoutService, UserService,
};
use pmeet::inbound::http::state::{AccountPorts, HttpState, MatchingPorts};
use pmeet::outbound::persistence::{
    MongoCommentRepository, MongoJobRepository, MongoMemberRepository,
    MongoNotificationRepository, MongoProjectRepository, MongoResumeRepository, MongoStore,
    MongoTechStackRepository, MongoTryoutRepository, MongoUserRepository,
};

/// Adapters shared by every service.
pub struct Infrastructure {
    pub store: MongoStore,
    pub hub: NotificationHub,
    pub tokens: Arc<dyn TokenService>,
    pub oauth: Arc<dyn OAuthClient>,
    pub clock: Arc<dyn Clock>,
}

/// Build every driving port from the shared adapters.
pub fn build_http_state(infra: Infrastructure) -> HttpState {
    let Infrastructure {
        store,
        hub,
        tokens,
        oauth,
        clock,
    } = infra;

    let users = Arc::new(MongoUserRepository::new(&store));
    let projects = Arc::new(MongoProjectRepository::new(&store));
    let comments = Arc::new(MongoCommentRepository::new(&store));
    let tryouts = Arc::new(MongoTryoutRepository::new(&store));
    let members = Arc::new(MongoMemberRepository::new(&store));
    let resumes = Arc::new(MongoResumeRepository::new(&store));
    let notifications = Arc::new(MongoNotificationRepository::new(&store));

    let notifier = Notifier::new(notifications.clone(), Arc::new(hub.clone()), clock.clone());

    let login = Arc::new(OAuthLoginService::new(
        users.clone(),
        oauth,
        tokens.clone(),
        clock.clone(),
    ));
    let user_service = Arc::new(UserService::new(users.clone()));
    let catalog = Arc::new(CatalogService::new(
        Arc::new(MongoJobRepository::new(&store)),
        Arc::new(MongoTechStackRepository::new(&store)),
    ));
    let resume_service = Arc::new(ResumeService::new(resumes.clone(), users, clock.clone()));
    let project_service = Arc::new(ProjectService::new(
        projects.clone(),
        comments.clone(),
        tryouts.clone(),
        members.clone(),
        clock.clone(),
    ));
    let comment_service = Arc::new(CommentService::new(
        comments,
        projects.clone(),
        notifier.clone(),
        clock.clone(),
    ));
    let tryout_service = Arc::new(TryoutService::new(
        tryouts, members, projects, resumes, notifier, clock,
    ));
    let notification_service = Arc::new(NotificationService::new(notifications, hub));

    HttpState::new(
        AccountPorts {
            login,
            tokens,
            users: user_service.clone(),
            users_query: user_service,
        },
        MatchingPorts {
            catalog: catalog.clone(),
            catalog_query: catalog,
            resumes: resume_service.clone(),
            resumes_query: resume_service,
            projects: project_service.clone(),
            projects_query: project_service,
            comments: comment_service.clone(),
            comments_query: comment_service,
            tryouts: tryout_service.clone(),
            tryouts_query: tryout_service,
            notifications: notification_service.clone(),
            notifications_query: notification_service,
        },
    )
}
