use std::collections::HashSet;

use thiserror::Error;

use super::data::TodoList;

/// Errors raised while converting a todo list to or from its stored form
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("todo list is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("todo item {id:?} has empty text")]
    EmptyText { id: String },

    #[error("todo id {0:?} appears more than once")]
    DuplicateId(String),
}

/// Serialize the list as a JSON array of `{id, text, completed}` objects
pub fn encode(list: &TodoList) -> Result<String, CodecError> {
    Ok(serde_json::to_string(list)?)
}

/// Parse a stored list, rejecting values that break the list invariants
pub fn decode(raw: &str) -> Result<TodoList, CodecError> {
    let list: TodoList = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(list.len());
    for item in list.items() {
        if item.text.trim().is_empty() {
            return Err(CodecError::EmptyText {
                id: item.id.clone(),
            });
        }
        if !seen.insert(item.id.as_str()) {
            return Err(CodecError::DuplicateId(item.id.clone()));
        }
    }

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::todos::data::TodoItem;

    fn item(id: &str, text: &str, completed: bool) -> TodoItem {
        TodoItem {
            id: id.to_string(),
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn test_encode_wire_shape() {
        let list = TodoList::from_items(vec![
            item("2", "Pay rent", true),
            item("1", "Buy milk", false),
        ]);
        let encoded = encode(&list).unwrap();

        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["id"], "2");
        assert_eq!(array[0]["text"], "Pay rent");
        assert_eq!(array[0]["completed"], true);
        assert_eq!(array[1]["completed"], false);
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let list = TodoList::from_items(vec![
            item("30", "third", false),
            item("10", "first", true),
            item("20", "「日本語」 with \"quotes\"", false),
        ]);

        let encoded = encode(&list).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, list);
        assert_eq!(encode(&decoded).unwrap(), encoded);
    }

    #[test]
    fn test_empty_list_round_trip() {
        let encoded = encode(&TodoList::new()).unwrap();
        assert_eq!(encoded, "[]");
        assert!(decode(&encoded).unwrap().is_empty());
    }

    #[test]
    fn test_decode_accepts_foreign_ids() {
        let decoded = decode(r#"[{"id":"abc-123","text":"x","completed":false}]"#).unwrap();
        assert_eq!(decoded.items()[0].id, "abc-123");
    }

    #[test]
    fn test_decode_rejects_corrupted_text() {
        assert!(matches!(decode("not json"), Err(CodecError::Json(_))));
        assert!(matches!(decode("[{\"id\":"), Err(CodecError::Json(_))));
        assert!(matches!(decode("{\"id\":\"1\"}"), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        let raw = r#"[{"id":"1","text":"no flag"}]"#;
        assert!(matches!(decode(raw), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_decode_rejects_blank_text() {
        let raw = r#"[{"id":"1","text":"  ","completed":false}]"#;
        match decode(raw) {
            Err(CodecError::EmptyText { id }) => assert_eq!(id, "1"),
            other => panic!("expected EmptyText, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let raw = r#"[
            {"id":"1","text":"a","completed":false},
            {"id":"1","text":"b","completed":true}
        ]"#;
        match decode(raw) {
            Err(CodecError::DuplicateId(id)) => assert_eq!(id, "1"),
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }
}
