//! Structured-output schema and decoder for the critique operation.

use crate::llm::LlmError;
use crate::service::types::CritiqueResult;

/// Response schema for the translate-and-critique request, in the
/// provider's schema dialect.
///
/// Everything the UI renders is a required field; the model is not given
/// room to omit parts of the contract.
pub fn critique_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "translatedText": {
                "type": "STRING",
                "description": "The primary English translation"
            },
            "backTranslation": {
                "type": "STRING",
                "description": "Japanese literal translation of the English result"
            },
            "isAppropriate": {
                "type": "BOOLEAN",
                "description": "True if appropriate"
            },
            "critique": {
                "type": "STRING",
                "description": "Explanation in Japanese"
            },
            "suggestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": {
                            "type": "STRING",
                            "description": "The alternative English text"
                        },
                        "label": {
                            "type": "STRING",
                            "description": "Japanese label for the context, e.g. 'より丁寧'"
                        },
                        "backTranslation": {
                            "type": "STRING",
                            "description": "Japanese literal translation of this specific suggestion"
                        }
                    },
                    "required": ["text", "label", "backTranslation"]
                }
            }
        },
        "required": [
            "translatedText",
            "backTranslation",
            "isAppropriate",
            "critique",
            "suggestions"
        ]
    })
}

/// Decode a structured critique response.
///
/// Strict: an unparseable body or a missing required field is an error, and
/// no partial result is produced. `original_text` is overwritten with the
/// local input regardless of what the model returned.
pub fn decode_critique(raw: &str, original_text: &str) -> Result<CritiqueResult, LlmError> {
    let mut result: CritiqueResult = serde_json::from_str(raw).map_err(|e| {
        LlmError::DecodeError(format!(
            "critique response did not match the expected schema: {e}"
        ))
    })?;
    result.original_text = original_text.to_owned();
    Ok(result)
}
