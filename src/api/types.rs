use serde::{Deserialize, Serialize};

/// A job position as published by the careers API.
///
/// Contract fields are optional so a partial payload still deserializes;
/// presence and literal values are enforced by the checks, not by serde.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobPosition {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub suitable_for_students: Option<bool>,
    #[serde(default)]
    pub locations: Vec<Location>,
    pub team: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: Option<String>,
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_position() {
        let position: JobPosition = serde_json::from_str(
            r#"{
                "id": 1024,
                "name": "Backend Engineer",
                "description": "Build services",
                "suitableForStudents": true,
                "locations": [{ "city": "Amsterdam", "country": "NL" }],
                "team": "Platform",
                "publishedAt": "2024-05-01T00:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(position.id, Some(1024));
        assert_eq!(position.name.as_deref(), Some("Backend Engineer"));
        assert_eq!(position.suitable_for_students, Some(true));
        assert_eq!(position.locations.len(), 1);
        assert_eq!(position.locations[0].city.as_deref(), Some("Amsterdam"));
    }

    #[test]
    fn test_deserialize_partial_position() {
        let position: JobPosition =
            serde_json::from_str(r#"{"description":"x","suitableForStudents":true}"#).unwrap();

        assert_eq!(position.id, None);
        assert_eq!(position.description.as_deref(), Some("x"));
        assert_eq!(position.suitable_for_students, Some(true));
        assert!(position.locations.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let position: JobPosition =
            serde_json::from_str(r#"{"description":"x","salaryRange":"n/a"}"#).unwrap();
        assert_eq!(position.description.as_deref(), Some("x"));
    }
}
