//! Project comments and reply threads.

use chrono::{DateTime, Utc};

use super::{CommentId, ProjectId, UserId};

/// Content shown in place of a deleted comment.
pub const DELETED_COMMENT_CONTENT: &str = "삭제된 댓글입니다.";

/// A comment on a project. Replies reference their root by `parent_id`.
///
/// ## Invariants
/// - Once deleted, `content` is [`DELETED_COMMENT_CONTENT`] and the comment
///   cannot be edited or restored.
/// - `likers` holds each user at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectComment {
    pub(crate) id: CommentId,
    pub(crate) parent_id: Option<CommentId>,
    pub(crate) project_id: ProjectId,
    pub(crate) user_id: UserId,
    pub(crate) content: String,
    pub(crate) likers: Vec<UserId>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) is_deleted: bool,
}

impl ProjectComment {
    /// Write a new top-level comment or reply.
    pub fn new(
        id: CommentId,
        project_id: ProjectId,
        parent_id: Option<CommentId>,
        author: UserId,
        content: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            parent_id,
            project_id,
            user_id: author,
            content,
            likers: Vec::new(),
            created_at: now,
            is_deleted: false,
        }
    }

    /// Replace the content of a live comment. Returns `false` when the
    /// comment is deleted and nothing changed.
    pub fn edit(&mut self, content: String) -> bool {
        if self.is_deleted {
            return false;
        }
        self.content = content;
        true
    }

    /// Soft delete: flag the comment and overwrite its content.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use pmeet::domain::{CommentId, DELETED_COMMENT_CONTENT, ProjectComment, ProjectId, UserId};
    ///
    /// let mut comment = ProjectComment::new(
    ///     CommentId::random(), ProjectId::random(), None, UserId::random(),
    ///     "hello".to_owned(), Utc::now(),
    /// );
    /// comment.delete();
    /// assert!(comment.is_deleted());
    /// assert_eq!(comment.content(), DELETED_COMMENT_CONTENT);
    /// ```
    pub fn delete(&mut self) {
        self.is_deleted = true;
        DELETED_COMMENT_CONTENT.clone_into(&mut self.content);
    }

    /// Record a like; repeated likes are ignored.
    pub fn like(&mut self, user_id: UserId) {
        if !self.likers.contains(&user_id) {
            self.likers.push(user_id);
        }
    }

    /// Withdraw a like; missing likes are ignored.
    pub fn unlike(&mut self, user_id: &UserId) {
        self.likers.retain(|liker| liker != user_id);
    }

    /// Comment identifier.
    pub fn id(&self) -> CommentId {
        self.id
    }

    /// Root comment this one replies to, if any.
    pub fn parent_id(&self) -> Option<CommentId> {
        self.parent_id
    }

    /// Whether this comment is a reply.
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Project the comment belongs to.
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Author.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Text, or the placeholder once deleted.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Users who liked the comment, each once.
    pub fn likers(&self) -> &[UserId] {
        &self.likers
    }

    /// When the comment was written.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the comment was soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

/// A top-level comment with its surviving replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    /// The root comment, possibly deleted.
    pub comment: ProjectComment,
    /// Live replies, oldest first.
    pub replies: Vec<ProjectComment>,
}

impl CommentThread {
    /// Whether the thread should be shown: a live root, or a deleted root
    /// that still has live replies.
    pub fn is_visible(&self) -> bool {
        !self.comment.is_deleted || !self.replies.is_empty()
    }
}

/// Build visible threads from a flat comment list, newest root first.
///
/// In-memory form of the thread visibility rule, used to build expected
/// threads in tests.
#[cfg(test)]
pub(crate) fn assemble_threads(comments: Vec<ProjectComment>) -> Vec<CommentThread> {
    let (roots, replies): (Vec<_>, Vec<_>) =
        comments.into_iter().partition(|comment| !comment.is_reply());

    let mut threads: Vec<CommentThread> = roots
        .into_iter()
        .map(|root| {
            let mut live: Vec<ProjectComment> = replies
                .iter()
                .filter(|reply| reply.parent_id == Some(root.id) && !reply.is_deleted)
                .cloned()
                .collect();
            live.sort_by_key(ProjectComment::created_at);
            CommentThread {
                comment: root,
                replies: live,
            }
        })
        .filter(CommentThread::is_visible)
        .collect();
    threads.sort_by(|a, b| b.comment.created_at.cmp(&a.comment.created_at));
    threads
}

#[cfg(test)]
mod tests {
    //! Comment soft-delete and thread visibility rules.

    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    use super::*;

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0)
            .single()
            .expect("valid fixture instant")
            + Duration::minutes(minutes)
    }

    fn comment(
        project_id: ProjectId,
        parent: Option<CommentId>,
        minutes: i64,
        deleted: bool,
    ) -> ProjectComment {
        let mut comment = ProjectComment::new(
            CommentId::random(),
            project_id,
            parent,
            UserId::random(),
            format!("comment at {minutes}"),
            at(minutes),
        );
        if deleted {
            comment.delete();
        }
        comment
    }

    #[rstest]
    #[case("")]
    #[case("some long original content")]
    fn delete_overwrites_any_content(#[case] original: &str) {
        let mut c = comment(ProjectId::random(), None, 0, false);
        c.content = original.to_owned();
        c.delete();
        assert!(c.is_deleted());
        assert_eq!(c.content(), DELETED_COMMENT_CONTENT);
    }

    #[rstest]
    fn deleted_comment_cannot_be_edited() {
        let mut c = comment(ProjectId::random(), None, 0, true);
        assert!(!c.edit("revived".to_owned()));
        assert_eq!(c.content(), DELETED_COMMENT_CONTENT);
    }

    #[rstest]
    fn likes_are_idempotent() {
        let mut c = comment(ProjectId::random(), None, 0, false);
        let fan = UserId::random();
        c.like(fan);
        c.like(fan);
        assert_eq!(c.likers(), &[fan]);
        c.unlike(&fan);
        c.unlike(&fan);
        assert!(c.likers().is_empty());
    }

    #[rstest]
    fn threads_keep_deleted_roots_with_live_replies_only() {
        let project = ProjectId::random();
        let r1 = comment(project, None, 0, true);
        let r1_dead = comment(project, Some(r1.id()), 1, true);
        let r1_live = comment(project, Some(r1.id()), 2, false);
        let r2 = comment(project, None, 3, false);
        let r3 = comment(project, None, 4, true);

        let threads = assemble_threads(vec![
            r1.clone(),
            r1_dead,
            r1_live.clone(),
            r2.clone(),
            r3,
        ]);

        let roots: Vec<CommentId> = threads.iter().map(|t| t.comment.id()).collect();
        assert_eq!(roots, vec![r2.id(), r1.id()]);
        let r1_thread = threads.get(1).expect("r1 thread present");
        assert_eq!(r1_thread.comment.content(), DELETED_COMMENT_CONTENT);
        assert_eq!(r1_thread.replies, vec![r1_live]);
    }
}
