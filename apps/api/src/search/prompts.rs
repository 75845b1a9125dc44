// Prompt text and the structured-output schema for job search.

use serde_json::{json, Value};

/// System instruction for job search.
pub const JOB_SEARCH_SYSTEM: &str = "You are a job search assistant. \
    Use web search to find real, currently open positions. \
    Only return listings you actually found: never invent URLs or contact emails. \
    Respond with a JSON array only.";

/// Location searched when the resume has none.
pub const DEFAULT_LOCATION: &str = "remote";

/// Builds the search request from resume details.
pub fn job_search_prompt(name: &str, skills: &str, summary: &str, location: &str) -> String {
    format!(
        "Based on this resume:
Name: {name}
Skills: {skills}
Summary: {summary}

Find 5 current job listings that match this profile.
Return them as a JSON array of objects with: id, title, company, location, description, email (if found), and url.
Search for jobs in {location}.
If you can't find a direct email, leave it null."
    )
}

/// Response schema: array of listing objects. `email` is the only optional,
/// nullable property.
pub fn listing_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "title": { "type": "STRING" },
                "company": { "type": "STRING" },
                "location": { "type": "STRING" },
                "description": { "type": "STRING" },
                "email": { "type": "STRING", "nullable": true },
                "url": { "type": "STRING" }
            },
            "required": ["id", "title", "company", "location", "description", "url"]
        }
    })
}
