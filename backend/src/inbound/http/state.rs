//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CatalogCommand, CatalogQuery, CommentCommand, CommentQuery, LoginService,
    NotificationCommand, NotificationQuery, ProjectCommand, ProjectQuery, ResumeCommand,
    ResumeQuery, TokenService, TryoutCommand, TryoutQuery, UserCommand, UserQuery,
};

/// Account and authentication ports.
#[derive(Clone)]
pub struct AccountPorts {
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenService>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
}

/// Matching workflow ports: dictionaries, resumes, projects, comments,
/// tryouts and notifications.
#[derive(Clone)]
pub struct MatchingPorts {
    pub catalog: Arc<dyn CatalogCommand>,
    pub catalog_query: Arc<dyn CatalogQuery>,
    pub resumes: Arc<dyn ResumeCommand>,
    pub resumes_query: Arc<dyn ResumeQuery>,
    pub projects: Arc<dyn ProjectCommand>,
    pub projects_query: Arc<dyn ProjectQuery>,
    pub comments: Arc<dyn CommentCommand>,
    pub comments_query: Arc<dyn CommentQuery>,
    pub tryouts: Arc<dyn TryoutCommand>,
    pub tryouts_query: Arc<dyn TryoutQuery>,
    pub notifications: Arc<dyn NotificationCommand>,
    pub notifications_query: Arc<dyn NotificationQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenService>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub catalog: Arc<dyn CatalogCommand>,
    pub catalog_query: Arc<dyn CatalogQuery>,
    pub resumes: Arc<dyn ResumeCommand>,
    pub resumes_query: Arc<dyn ResumeQuery>,
    pub projects: Arc<dyn ProjectCommand>,
    pub projects_query: Arc<dyn ProjectQuery>,
    pub comments: Arc<dyn CommentCommand>,
    pub comments_query: Arc<dyn CommentQuery>,
    pub tryouts: Arc<dyn TryoutCommand>,
    pub tryouts_query: Arc<dyn TryoutQuery>,
    pub notifications: Arc<dyn NotificationCommand>,
    pub notifications_query: Arc<dyn NotificationQuery>,
}

impl HttpState {
    /// Flatten the two port bundles into handler state.
    pub fn new(accounts: AccountPorts, matching: MatchingPorts) -> Self {
        let AccountPorts {
            login,
            tokens,
            users,
            users_query,
        } = accounts;
        let MatchingPorts {
            catalog,
            catalog_query,
            resumes,
            resumes_query,
            projects,
            projects_query,
            comments,
            comments_query,
            tryouts,
            tryouts_query,
            notifications,
            notifications_query,
        } = matching;
        Self {
            login,
            tokens,
            users,
            users_query,
            catalog,
            catalog_query,
            resumes,
            resumes_query,
            projects,
            projects_query,
            comments,
            comments_query,
            tryouts,
            tryouts_query,
            notifications,
            notifications_query,
        }
    }
}
