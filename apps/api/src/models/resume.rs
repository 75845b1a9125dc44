use serde::{Deserialize, Serialize};

/// The single persisted aggregate describing one person's resume.
///
/// Every field is always present: an empty string or empty list is the
/// "no data" state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub year: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_data_uses_camel_case_keys() {
        let data = ResumeData {
            full_name: "Ada Lovelace".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["fullName"], "Ada Lovelace");
        assert!(json["experience"].as_array().unwrap().is_empty());
        assert!(json["skills"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_resume_data_requires_every_field() {
        let partial = r#"{"fullName": "Ada"}"#;
        assert!(serde_json::from_str::<ResumeData>(partial).is_err());
    }

    #[test]
    fn test_resume_data_full_deserializes_correctly() {
        let json = r#"{
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+44 20 0000 0000",
            "location": "London",
            "summary": "Analyst.",
            "experience": [
                {"company": "Analytical Engines", "position": "Programmer", "duration": "1842 - 1843", "description": "Notes\nOn the engine"}
            ],
            "education": [
                {"school": "Home", "degree": "Mathematics", "year": "1835"}
            ],
            "skills": ["Mathematics", "Poetry"]
        }"#;

        let data: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(data.full_name, "Ada Lovelace");
        assert_eq!(data.experience[0].description, "Notes\nOn the engine");
        assert_eq!(data.education[0].year, "1835");
        assert_eq!(data.skills, vec!["Mathematics", "Poetry"]);
    }
}
