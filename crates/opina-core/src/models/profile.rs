use serde::{Deserialize, Serialize};

/// Age as it arrives from upstream forms: sometimes numeric, sometimes a
/// free-text string. No further validation is applied here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeField {
    Number(f64),
    Text(String),
}

/// The minimal slice of a user profile the completeness gate looks at.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinimalProfile {
    #[serde(default)]
    pub age: Option<AgeField>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub commune: Option<String>,
}

/// A profile is complete iff age, gender, and commune are all present.
pub fn is_profile_complete(profile: Option<&MinimalProfile>) -> bool {
    match profile {
        Some(p) => p.age.is_some() && p.gender.is_some() && p.commune.is_some(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_profile_is_incomplete() {
        assert!(!is_profile_complete(None));
    }

    #[test]
    fn test_all_fields_present_is_complete() {
        let profile = MinimalProfile {
            age: Some(AgeField::Number(34.0)),
            gender: Some("F".to_string()),
            commune: Some("Providencia".to_string()),
        };
        assert!(is_profile_complete(Some(&profile)));
    }

    #[test]
    fn test_string_age_counts_as_present() {
        let profile = MinimalProfile {
            age: Some(AgeField::Text("34".to_string())),
            gender: Some("M".to_string()),
            commune: Some("Ñuñoa".to_string()),
        };
        assert!(is_profile_complete(Some(&profile)));
    }

    #[test]
    fn test_any_missing_field_is_incomplete() {
        let profile = MinimalProfile {
            age: Some(AgeField::Number(28.0)),
            gender: None,
            commune: Some("Santiago".to_string()),
        };
        assert!(!is_profile_complete(Some(&profile)));

        let profile = MinimalProfile {
            age: None,
            gender: Some("F".to_string()),
            commune: Some("Santiago".to_string()),
        };
        assert!(!is_profile_complete(Some(&profile)));
    }

    #[test]
    fn test_loose_age_deserializes_from_number_or_string() {
        let p: MinimalProfile =
            serde_json::from_str(r#"{"age": 31, "gender": "F", "commune": "Macul"}"#).unwrap();
        assert!(matches!(p.age, Some(AgeField::Number(_))));

        let p: MinimalProfile =
            serde_json::from_str(r#"{"age": "31", "gender": "F", "commune": "Macul"}"#).unwrap();
        assert!(matches!(p.age, Some(AgeField::Text(_))));

        let p: MinimalProfile =
            serde_json::from_str(r#"{"age": null, "gender": null, "commune": null}"#).unwrap();
        assert!(!is_profile_complete(Some(&p)));
    }
}
