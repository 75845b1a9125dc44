// Job Search Client — turns the current resume into one search-grounded
// generation call and validates the answer into at most five `JobListing`s.

pub mod board;
pub mod handlers;
pub mod prompts;

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::gemini_client::{GeminiClient, GeminiError, GenerateOptions};
use crate::models::job::JobListing;
use crate::models::resume::ResumeData;
use crate::search::prompts::{
    job_search_prompt, listing_schema, DEFAULT_LOCATION, JOB_SEARCH_SYSTEM,
};

/// Upper bound on listings returned from one search.
pub const MAX_LISTINGS: usize = 5;

/// Shown to the user for any search failure. The cause is only logged.
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search for jobs. Please try again.";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("AI provider error: {0}")]
    Provider(#[from] GeminiError),

    #[error("Duplicate listing id '{0}' in search results")]
    DuplicateId(String),

    #[error("Search task aborted: {0}")]
    Aborted(String),
}

/// Carried in `AppState` as `Arc<dyn JobSearcher>`.
#[async_trait]
pub trait JobSearcher: Send + Sync {
    async fn search(&self, resume: &ResumeData) -> Result<Vec<JobListing>, SearchError>;
}

pub struct GeminiJobSearcher {
    gemini: GeminiClient,
}

impl GeminiJobSearcher {
    pub fn new(gemini: GeminiClient) -> Self {
        Self { gemini }
    }
}

#[async_trait]
impl JobSearcher for GeminiJobSearcher {
    async fn search(&self, resume: &ResumeData) -> Result<Vec<JobListing>, SearchError> {
        let prompt = build_search_prompt(resume);
        let options = GenerateOptions {
            system: Some(JOB_SEARCH_SYSTEM.to_string()),
            google_search: true,
            response_schema: Some(listing_schema()),
        };

        let listings: Vec<JobListing> = self.gemini.generate_json(&prompt, &options).await?;
        let listings = validate_listings(listings)?;
        info!("Job search returned {} listings", listings.len());
        Ok(listings)
    }
}

pub fn build_search_prompt(resume: &ResumeData) -> String {
    let location = if resume.location.trim().is_empty() {
        DEFAULT_LOCATION
    } else {
        resume.location.as_str()
    };

    job_search_prompt(
        &resume.full_name,
        &resume.skills.join(", "),
        &resume.summary,
        location,
    )
}

/// Caps the batch at [`MAX_LISTINGS`] and rejects repeated ids.
pub fn validate_listings(mut listings: Vec<JobListing>) -> Result<Vec<JobListing>, SearchError> {
    if listings.len() > MAX_LISTINGS {
        warn!(
            "Provider returned {} listings, keeping the first {MAX_LISTINGS}",
            listings.len()
        );
        listings.truncate(MAX_LISTINGS);
    }

    let mut seen = HashSet::new();
    for listing in &listings {
        if !seen.insert(listing.id.as_str()) {
            return Err(SearchError::DuplicateId(listing.id.clone()));
        }
    }

    Ok(listings)
}
