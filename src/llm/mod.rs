pub mod prompts;

#[cfg(feature = "gemini")]
pub mod client;

#[cfg(feature = "gemini")]
pub use client::GeminiClient;

use crate::error::Result;
use log::warn;

/// Message returned when no generator is configured. Mirrors the fixed
/// placeholder the API layer serves instead of failing the request.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Insight generation is not configured. Set GOOGLE_API_KEY to enable it.";

/// The external text-generation collaborator, seen by the pipeline as an
/// opaque `text -> text` function. Implemented by [`GeminiClient`] behind
/// the `gemini` feature and by test doubles everywhere else.
pub trait InsightGenerator {
    fn summarize(&self, prompt: &str) -> Result<String>;
}

/// Runs a prompt through the generator and absorbs every failure mode into
/// explanatory text: an unconfigured generator yields the fixed
/// placeholder, a failed call yields an error note. Successful output is
/// blockquoted so it stands apart from the structured summary.
pub fn commentary(generator: Option<&dyn InsightGenerator>, prompt: &str) -> String {
    let Some(generator) = generator else {
        return NOT_CONFIGURED_MESSAGE.to_string();
    };
    match generator.summarize(prompt) {
        Ok(text) => blockquote(text.trim()),
        Err(e) => {
            warn!("Insight generator failed: {}", e);
            format!("Insight generation failed: {}", e)
        }
    }
}

fn blockquote(text: &str) -> String {
    text.lines()
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SalesInsightsError;

    struct Canned(&'static str);

    impl InsightGenerator for Canned {
        fn summarize(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl InsightGenerator for Failing {
        fn summarize(&self, _prompt: &str) -> Result<String> {
            Err(SalesInsightsError::Collaborator("timeout".to_string()))
        }
    }

    #[test]
    fn test_unconfigured_generator_yields_placeholder() {
        assert_eq!(commentary(None, "anything"), NOT_CONFIGURED_MESSAGE);
    }

    #[test]
    fn test_success_is_blockquoted() {
        let canned = Canned("### Strengths\n- closes fast");
        assert_eq!(
            commentary(Some(&canned), "prompt"),
            "> ### Strengths\n> - closes fast"
        );
    }

    #[test]
    fn test_failure_becomes_error_note_not_panic() {
        let out = commentary(Some(&Failing), "prompt");
        assert!(out.contains("timeout"));
        assert!(out.starts_with("Insight generation failed"));
    }
}
