//! Opinion and comment records.
//!
//! Opinions are top-level documents; comments live in a sub-collection of
//! their parent opinion and have no independent existence. Both carry two
//! relational foreign keys (validated by the service before any write) plus
//! a free-form payload persisted verbatim.
//!
//! Draft types are the caller-supplied shape; the full types add the
//! document-store-assigned identifier. When a stored document already
//! carries an `id` field, the assigned identifier wins on read-back.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::documents::JsonObject;

/// Caller-supplied opinion payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OpinionDraft {
    /// Relational foreign key into `users`.
    pub user_id: Uuid,
    /// Relational foreign key into `teams`.
    pub team_id: Uuid,
    /// Free-form opinion fields, persisted verbatim and never interpreted.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: JsonObject,
}

/// An opinion as stored, with its assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Opinion {
    /// Document-store-assigned identifier, immutable once created.
    pub id: String,
    pub user_id: Uuid,
    pub team_id: Uuid,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: JsonObject,
}

/// Caller-supplied comment payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CommentDraft {
    /// Relational foreign key into `users`.
    pub user_id: Uuid,
    /// Team context the comment is made under. May differ from the parent
    /// opinion's own `team_id`.
    pub opinion_team_id: Uuid,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: JsonObject,
}

/// A comment as stored, scoped to its parent opinion.
///
/// The identifier is unique only within the parent opinion's sub-collection;
/// lookups always require both the opinion and comment identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: String,
    pub user_id: Uuid,
    pub opinion_team_id: Uuid,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: JsonObject,
}

fn into_object(value: Value) -> Result<JsonObject, serde_json::Error> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "record serialized to {other:?} instead of an object"
        ))),
    }
}

impl OpinionDraft {
    /// Serialize to the plain structural form the document store receives.
    pub(crate) fn to_document(&self) -> Result<JsonObject, serde_json::Error> {
        into_object(serde_json::to_value(self)?)
    }
}

impl CommentDraft {
    pub(crate) fn to_document(&self) -> Result<JsonObject, serde_json::Error> {
        into_object(serde_json::to_value(self)?)
    }
}

impl Opinion {
    /// Rebuild an opinion from a stored document, merging in the assigned
    /// identifier. The assigned identifier overwrites any `id` field the
    /// payload carried.
    pub(crate) fn from_document(
        id: impl Into<String>,
        mut document: JsonObject,
    ) -> Result<Self, serde_json::Error> {
        document.insert("id".to_owned(), Value::String(id.into()));
        serde_json::from_value(Value::Object(document))
    }
}

impl Comment {
    pub(crate) fn from_document(
        id: impl Into<String>,
        mut document: JsonObject,
    ) -> Result<Self, serde_json::Error> {
        document.insert("id".to_owned(), Value::String(id.into()));
        serde_json::from_value(Value::Object(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn extra(pairs: Value) -> JsonObject {
        match pairs {
            Value::Object(map) => map,
            _ => unreachable!("test payloads are objects"),
        }
    }

    #[rstest]
    fn draft_serializes_flattened() {
        let draft = OpinionDraft {
            user_id: Uuid::nil(),
            team_id: Uuid::nil(),
            extra: extra(json!({ "body": "great season" })),
        };

        let document = draft.to_document().expect("object form");
        assert_eq!(
            document.get("user_id"),
            Some(&json!("00000000-0000-0000-0000-000000000000"))
        );
        assert_eq!(document.get("body"), Some(&json!("great season")));
    }

    #[rstest]
    fn assigned_identifier_wins_over_payload_id() {
        let draft = OpinionDraft {
            user_id: Uuid::nil(),
            team_id: Uuid::nil(),
            extra: extra(json!({ "id": "smuggled", "body": "x" })),
        };

        let document = draft.to_document().expect("object form");
        let opinion = Opinion::from_document("assigned", document).expect("decode");
        assert_eq!(opinion.id, "assigned");
        assert_eq!(opinion.extra.get("body"), Some(&json!("x")));
        assert!(!opinion.extra.contains_key("id"));
    }

    #[rstest]
    fn comment_round_trips_free_form_fields() {
        let draft = CommentDraft {
            user_id: Uuid::nil(),
            opinion_team_id: Uuid::nil(),
            extra: extra(json!({ "text": "agreed", "stars": 5 })),
        };

        let document = draft.to_document().expect("object form");
        let comment = Comment::from_document("c1", document).expect("decode");
        assert_eq!(comment.id, "c1");
        assert_eq!(comment.extra.get("stars"), Some(&json!(5)));
    }

    #[rstest]
    fn decoding_rejects_documents_missing_foreign_keys() {
        let document = extra(json!({ "body": "no keys here" }));
        assert!(Opinion::from_document("o1", document).is_err());
    }
}
