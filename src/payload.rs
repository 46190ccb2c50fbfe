//! Validation of resolved payload templates.

use crate::error::Failure;
use serde_json::{Map, Value};
use tracing::error;

/// Parse a resolved payload into the fields merged into the outgoing
/// request body.
///
/// Anything that isn't a JSON object is rejected, arrays and scalars
/// included: only an object has fields to merge. The offending string is
/// logged before failing so that the template author can see what the
/// substitution actually produced.
pub fn parse(resolved: &str) -> Result<Map<String, Value>, Failure> {
    match serde_json::from_str(resolved) {
        Ok(Value::Object(fields)) => Ok(fields),
        _ => {
            error!("Payload was not valid JSON: {}", resolved);
            Err(Failure::InvalidPayload(resolved.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object() {
        let fields = parse(r#"{"text": ":rocket:", "blocks": []}"#).unwrap();

        assert_eq!(fields.get("text"), Some(&Value::String(":rocket:".into())));
        assert_eq!(fields.get("blocks"), Some(&Value::Array(vec![])));
    }

    #[test]
    fn test_trailing_comma() {
        let res = parse(r#"{"text": "hi",}"#);

        match res {
            Err(Failure::InvalidPayload(raw)) => assert_eq!(raw, r#"{"text": "hi",}"#),
            _ => panic!("a trailing comma should not parse"),
        }
    }

    #[test]
    fn test_plain_text() {
        assert!(matches!(
            parse("not json at all"),
            Err(Failure::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_non_object_shapes() {
        assert!(matches!(parse("[1, 2]"), Err(Failure::InvalidPayload(_))));
        assert!(matches!(parse("42"), Err(Failure::InvalidPayload(_))));
        assert!(matches!(parse(r#""hi""#), Err(Failure::InvalidPayload(_))));
    }
}
