use serde::{Deserialize, Deserializer, Serialize};

/// One job opportunity returned by the AI search call. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    /// Contact address; when present the listing is applied to by email.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub email: Option<String>,
}

impl JobListing {
    pub fn contact_email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_with_null_email() {
        let json = r#"{
            "id": "1", "title": "Rust Engineer", "company": "Acme",
            "location": "Remote", "description": "Build things",
            "url": "https://acme.example/jobs/1", "email": null
        }"#;
        let listing: JobListing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.contact_email(), None);
    }

    #[test]
    fn test_listing_with_missing_email() {
        let json = r#"{
            "id": "1", "title": "Rust Engineer", "company": "Acme",
            "location": "Remote", "description": "Build things",
            "url": "https://acme.example/jobs/1"
        }"#;
        let listing: JobListing = serde_json::from_str(json).unwrap();
        assert!(listing.email.is_none());
    }

    #[test]
    fn test_blank_email_is_treated_as_absent() {
        let json = r#"{
            "id": "1", "title": "Rust Engineer", "company": "Acme",
            "location": "Remote", "description": "Build things",
            "url": "https://acme.example/jobs/1", "email": "   "
        }"#;
        let listing: JobListing = serde_json::from_str(json).unwrap();
        assert!(listing.email.is_none());
    }

    #[test]
    fn test_listing_missing_required_field_is_rejected() {
        let json = r#"{"id": "1", "title": "Rust Engineer", "company": "Acme"}"#;
        assert!(serde_json::from_str::<JobListing>(json).is_err());
    }
}
