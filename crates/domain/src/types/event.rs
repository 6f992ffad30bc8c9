//! Change-event envelope delivered by the backend's push channel

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::report_unmapped;

/// Operation carried by a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

/// A single push-delivered change on a backend table.
///
/// `new` carries the row after the change (possibly partial on update);
/// `old` carries the prior state, which for deletes may be the only place
/// the id survives. The operation tag is kept raw so an unknown tag can be
/// reported and ignored instead of failing the whole stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Raw operation tag as delivered (`INSERT`, `UPDATE`, `DELETE`).
    pub operation: String,
    #[serde(default)]
    pub old: Option<Value>,
    #[serde(default)]
    pub new: Option<Value>,
}

impl ChangeEvent {
    /// Build an insert event from a serializable record.
    pub fn insert(record: Value) -> Self {
        Self { operation: "INSERT".to_string(), old: None, new: Some(record) }
    }

    /// Build an update event from a (possibly partial) row object.
    pub fn update(row: Value) -> Self {
        Self { operation: "UPDATE".to_string(), old: None, new: Some(row) }
    }

    /// Build a delete event from the prior row state.
    pub fn delete(prior: Value) -> Self {
        Self { operation: "DELETE".to_string(), old: Some(prior), new: None }
    }

    /// Parse the raw tag; `None` for an unknown operation, which the caller
    /// treats as a reported no-op.
    pub fn op(&self) -> Option<ChangeOp> {
        match self.operation.as_str() {
            "INSERT" => Some(ChangeOp::Insert),
            "UPDATE" => Some(ChangeOp::Update),
            "DELETE" => Some(ChangeOp::Delete),
            _ => {
                report_unmapped("change_op", &self.operation, "ignored");
                None
            }
        }
    }

    /// Id of the affected record, preferring the new row and falling back to
    /// the prior state.
    pub fn record_id(&self) -> Option<Uuid> {
        id_of(self.new.as_ref()).or_else(|| id_of(self.old.as_ref()))
    }
}

fn id_of(row: Option<&Value>) -> Option<Uuid> {
    row.and_then(|value| value.get("id"))
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_parse() {
        assert_eq!(ChangeEvent::insert(Value::Null).op(), Some(ChangeOp::Insert));
        assert_eq!(ChangeEvent::update(Value::Null).op(), Some(ChangeOp::Update));
        assert_eq!(ChangeEvent::delete(Value::Null).op(), Some(ChangeOp::Delete));
    }

    #[test]
    fn unknown_tag_is_none() {
        let event =
            ChangeEvent { operation: "TRUNCATE".to_string(), old: None, new: None };
        assert_eq!(event.op(), None);
    }

    #[test]
    fn record_id_prefers_new_then_old() {
        let new_id = Uuid::new_v4();
        let old_id = Uuid::new_v4();
        let event = ChangeEvent {
            operation: "UPDATE".to_string(),
            old: Some(serde_json::json!({ "id": old_id })),
            new: Some(serde_json::json!({ "id": new_id })),
        };
        assert_eq!(event.record_id(), Some(new_id));

        let delete = ChangeEvent {
            operation: "DELETE".to_string(),
            old: Some(serde_json::json!({ "id": old_id })),
            new: None,
        };
        assert_eq!(delete.record_id(), Some(old_id));
    }
}
