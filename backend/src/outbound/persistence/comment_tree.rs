//! Store-side assembly of comment threads.
//!
//! One aggregation returns every root comment of a project together with its
//! live replies. Deleted roots survive only while they still have a live
//! reply, so the thread keeps its context with placeholder content.

use bson::{Bson, Document, doc};

use crate::domain::ports::RepositoryError;
use crate::domain::{CommentThread, ProjectComment, ProjectId};

use super::documents::CommentDocument;
use super::error_mapping::map_decode_error;
use super::store::COMMENT_COLLECTION;

const REPLIES_FIELD: &str = "replies";

/// Pipeline yielding one document per visible thread, newest root first.
pub(crate) fn pipeline(project_id: &ProjectId) -> Vec<Document> {
    vec![
        doc! { "$match": { "projectId": project_id.to_string(), "parentId": Bson::Null } },
        doc! { "$lookup": {
            "from": COMMENT_COLLECTION,
            "localField": "_id",
            "foreignField": "parentId",
            "as": REPLIES_FIELD
        } },
        doc! { "$addFields": {
            "replies": { "$filter": {
                "input": "$replies",
                "as": "reply",
                "cond": { "$eq": ["$$reply.isDeleted", false] }
            } }
        } },
        doc! { "$match": { "$or": [
            { "isDeleted": false },
            { "replies.0": { "$exists": true } }
        ] } },
        doc! { "$sort": { "createdAt": -1, "_id": -1 } },
    ]
}

fn decode_comment(document: Document) -> Result<ProjectComment, RepositoryError> {
    let stored: CommentDocument = bson::from_document(document).map_err(map_decode_error)?;
    ProjectComment::try_from(stored)
}

/// Decode one pipeline result into a thread with replies oldest first.
pub(crate) fn decode_thread(mut document: Document) -> Result<CommentThread, RepositoryError> {
    let raw_replies = match document.remove(REPLIES_FIELD) {
        Some(Bson::Array(items)) => items,
        Some(Bson::Null) | None => Vec::new(),
        Some(other) => {
            return Err(RepositoryError::corrupt(format!(
                "replies must be an array, found {:?}",
                other.element_type()
            )));
        }
    };

    let comment = decode_comment(document)?;
    let mut replies = raw_replies
        .into_iter()
        .map(|item| match item {
            Bson::Document(reply) => decode_comment(reply),
            other => Err(RepositoryError::corrupt(format!(
                "reply must be a document, found {:?}",
                other.element_type()
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    replies.sort_by_key(ProjectComment::created_at);

    Ok(CommentThread { comment, replies })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rstest::rstest;

    use super::*;
    use crate::domain::{CommentId, UserId};
    use crate::test_support::fixture_timestamp;

    fn stored(comment: &ProjectComment) -> Document {
        bson::to_document(&CommentDocument::from(comment)).expect("encodes")
    }

    fn comment(project_id: ProjectId, parent: Option<CommentId>, minutes: i64) -> ProjectComment {
        ProjectComment::new(
            CommentId::random(),
            project_id,
            parent,
            UserId::random(),
            format!("written at +{minutes}m"),
            fixture_timestamp() + Duration::minutes(minutes),
        )
    }

    #[rstest]
    fn pipeline_starts_from_project_roots() {
        let project_id = ProjectId::random();
        let stages = pipeline(&project_id);
        assert_eq!(
            stages[0],
            doc! { "$match": { "projectId": project_id.to_string(), "parentId": Bson::Null } }
        );
        assert_eq!(stages.len(), 5);
        assert!(stages[1].contains_key("$lookup"));
    }

    #[rstest]
    fn pipeline_keeps_live_replies_and_drops_empty_deleted_roots() {
        let stages = pipeline(&ProjectId::random());
        assert_eq!(
            stages[1],
            doc! { "$lookup": {
                "from": COMMENT_COLLECTION,
                "localField": "_id",
                "foreignField": "parentId",
                "as": REPLIES_FIELD
            } }
        );
        assert_eq!(
            stages[2],
            doc! { "$addFields": {
                "replies": { "$filter": {
                    "input": "$replies",
                    "as": "reply",
                    "cond": { "$eq": ["$$reply.isDeleted", false] }
                } }
            } }
        );
        assert_eq!(
            stages[3],
            doc! { "$match": { "$or": [
                { "isDeleted": false },
                { "replies.0": { "$exists": true } }
            ] } }
        );
        assert_eq!(stages[4], doc! { "$sort": { "createdAt": -1, "_id": -1 } });
    }

    #[rstest]
    fn replies_are_ordered_oldest_first() {
        let project_id = ProjectId::random();
        let root = comment(project_id, None, 0);
        let late = comment(project_id, Some(root.id()), 10);
        let early = comment(project_id, Some(root.id()), 5);

        let mut document = stored(&root);
        document.insert(
            REPLIES_FIELD,
            vec![Bson::Document(stored(&late)), Bson::Document(stored(&early))],
        );

        let thread = decode_thread(document).expect("decodes");
        assert_eq!(thread.comment.id(), root.id());
        let order: Vec<CommentId> = thread.replies.iter().map(ProjectComment::id).collect();
        assert_eq!(order, vec![early.id(), late.id()]);
    }

    #[rstest]
    fn missing_replies_decode_as_empty() {
        let root = comment(ProjectId::random(), None, 0);
        let thread = decode_thread(stored(&root)).expect("decodes");
        assert!(thread.replies.is_empty());
    }

    #[rstest]
    fn non_array_replies_are_corrupt() {
        let root = comment(ProjectId::random(), None, 0);
        let mut document = stored(&root);
        document.insert(REPLIES_FIELD, "oops");
        let err = decode_thread(document).expect_err("corrupt");
        assert!(matches!(err, RepositoryError::Corrupt { .. }));
    }
}
