use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A health question submitted to `/ask`.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct HealthQuery {
    /// The user's question in free text.
    #[validate(length(min = 5, max = 1000))]
    pub question: String,
    /// Adds a CBT exercise recommendation to the answer.
    #[serde(default)]
    pub include_cbt: bool,
    /// Adds prayer, remedy and lifestyle guidance to the answer.
    #[serde(default)]
    pub include_shifa: bool,
    /// Self-reported mood, 1 (very low) to 5 (excellent).
    #[validate(range(min = 1, max = 5))]
    pub mood_level: Option<u8>,
    /// Opaque caller identifier, echoed back in the response metadata.
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct CbtRequest {
    #[validate(length(min = 3, max = 500))]
    pub query: String,
    #[validate(range(min = 1, max = 5))]
    pub mood_level: Option<u8>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ShifaRequest {
    #[validate(length(min = 3, max = 500))]
    pub query: String,
    /// Overrides the classified category for the du'a lookup.
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ThoughtRequest {
    #[validate(length(min = 1, max = 1000))]
    pub thought: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ComplianceRequest {
    #[validate(length(min = 1, max = 200))]
    pub item: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExerciseQuery {
    pub exercise_type: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DuaQuery {
    pub category: Option<String>,
    pub condition: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemedyQuery {
    pub condition: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchQuery {
    pub q: String,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

/// Envelope wrapping every HTTP response body.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
            request_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            timestamp: Utc::now(),
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_query_defaults() {
        let query: HealthQuery =
            serde_json::from_str(r#"{"question": "Why do I get headaches?"}"#).unwrap();
        assert!(!query.include_cbt);
        assert!(!query.include_shifa);
        assert_eq!(query.mood_level, None);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_health_query_bounds() {
        let short = HealthQuery {
            question: "hey".to_string(),
            include_cbt: false,
            include_shifa: false,
            mood_level: None,
            user_id: None,
        };
        assert!(short.validate().is_err());

        let bad_mood = HealthQuery {
            question: "I feel tired all day".to_string(),
            mood_level: Some(6),
            ..short.clone()
        };
        assert!(bad_mood.validate().is_err());

        let ok = HealthQuery {
            mood_level: Some(1),
            ..bad_mood
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_cbt_request_bounds() {
        let req = CbtRequest {
            query: "ok".to_string(),
            mood_level: None,
        };
        assert!(req.validate().is_err());
        let req = CbtRequest {
            query: "x".repeat(501),
            mood_level: Some(3),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_envelope_shapes() {
        let ok = serde_json::to_value(ApiResponse::ok(42)).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["data"], 42);
        assert!(ok.get("error").is_none());
        assert!(Uuid::parse_str(ok["request_id"].as_str().unwrap()).is_ok());

        let err = serde_json::to_value(ApiResponse::<()>::err("Endpoint not found")).unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["error"], "Endpoint not found");
        assert!(err.get("data").is_none());
    }
}
