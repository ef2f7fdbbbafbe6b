//! Comment thread assembly against MongoDB.

use chrono::Duration;
use pmeet::domain::ports::CommentRepository;
use pmeet::domain::{CommentId, DELETED_COMMENT_CONTENT, ProjectComment, ProjectId, UserId};
use pmeet::outbound::persistence::MongoCommentRepository;
use rstest::rstest;

mod support;

use support::{TestDatabase, base_time};

fn comment(
    project: ProjectId,
    parent: Option<CommentId>,
    content: &str,
    offset_secs: i64,
) -> ProjectComment {
    ProjectComment::new(
        CommentId::random(),
        project,
        parent,
        UserId::random(),
        content.to_owned(),
        base_time() + Duration::seconds(offset_secs),
    )
}

#[rstest]
#[tokio::test]
async fn deleted_roots_survive_only_with_live_replies() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let repo = MongoCommentRepository::new(&db.store);
    let project = ProjectId::random();

    let mut r1 = comment(project, None, "first root", 1);
    let r2 = comment(project, None, "second root", 2);
    let mut r3 = comment(project, None, "third root", 3);
    let mut dead_reply = comment(project, Some(r1.id()), "withdrawn", 4);
    let live_reply = comment(project, Some(r1.id()), "still here", 5);
    r1.delete();
    r3.delete();
    dead_reply.delete();
    for c in [&r1, &r2, &r3, &dead_reply, &live_reply] {
        repo.save(c).await.expect("comment saved");
    }
    let elsewhere = comment(ProjectId::random(), None, "other project", 6);
    repo.save(&elsewhere).await.expect("comment saved");

    let threads = repo.find_threads(&project).await.expect("threads load");
    let roots: Vec<CommentId> = threads.iter().map(|t| t.comment.id()).collect();
    assert_eq!(roots, vec![r2.id(), r1.id()]);

    let first = threads.get(1).expect("r1 thread");
    assert_eq!(first.comment.content(), DELETED_COMMENT_CONTENT);
    let replies: Vec<CommentId> = first.replies.iter().map(ProjectComment::id).collect();
    assert_eq!(replies, vec![live_reply.id()]);
    assert!(threads.first().is_some_and(|t| t.replies.is_empty()));

    db.drop_database().await;
}

#[rstest]
#[tokio::test]
async fn replies_are_ordered_oldest_first() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let repo = MongoCommentRepository::new(&db.store);
    let project = ProjectId::random();
    let root = comment(project, None, "root", 1);
    let later = comment(project, Some(root.id()), "later", 30);
    let earlier = comment(project, Some(root.id()), "earlier", 10);
    for c in [&root, &later, &earlier] {
        repo.save(c).await.expect("comment saved");
    }

    let threads = repo.find_threads(&project).await.expect("threads load");
    let contents: Vec<&str> = threads
        .iter()
        .flat_map(|t| t.replies.iter().map(ProjectComment::content))
        .collect();
    assert_eq!(contents, vec!["earlier", "later"]);

    repo.delete_by_project(&project).await.expect("cascade delete");
    assert!(repo.find_threads(&project).await.expect("threads load").is_empty());

    db.drop_database().await;
}
