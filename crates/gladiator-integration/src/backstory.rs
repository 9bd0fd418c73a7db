//! Character backstory generation

use tracing::warn;

use crate::client::NarrativeClient;
use crate::error::IntegrationError;

/// Returned when no API key is configured
pub const FALLBACK_NO_API_KEY: &str =
    "The void of space is silent about this one's past... (API key not configured)";
/// Returned when the service fails for any other reason
pub const FALLBACK_ERROR: &str = "The chronicles of this warrior are lost in cosmic static...";

/// Who the backstory is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackstoryRequest {
    pub name: String,
    pub gender: String,
    pub race: String,
    pub class: String,
}

impl BackstoryRequest {
    pub fn new(name: &str, gender: &str, race: &str, class: &str) -> Self {
        Self {
            name: name.to_string(),
            gender: gender.to_string(),
            race: race.to_string(),
            class: class.to_string(),
        }
    }

    pub fn prompt(&self) -> String {
        format!(
            "Create a short, one-paragraph backstory for a futuristic space gladiator character in a game.\n\n\
             Name: {}\nGender: {}\nRace: {}\nClass: {}\n\n\
             The tone should be gritty, concise, and fit a sci-fi universe. \
             Focus on what led them to the gladiator arena.",
            self.name, self.gender, self.race, self.class
        )
    }
}

/// The text to show for a finished request
pub fn backstory_or_fallback(result: Result<String, IntegrationError>) -> String {
    match result {
        Ok(text) => text,
        Err(IntegrationError::MissingApiKey) => FALLBACK_NO_API_KEY.to_string(),
        Err(err) => {
            warn!(error = %err, "Backstory generation failed");
            FALLBACK_ERROR.to_string()
        }
    }
}

/// Generate a backstory, blocking until done. Never fails.
pub fn generate_backstory_or_fallback(client: &NarrativeClient, request: &BackstoryRequest) -> String {
    backstory_or_fallback(client.generate_backstory(request).wait())
}
