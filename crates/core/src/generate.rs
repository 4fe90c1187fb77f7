//! Generator trait — the abstraction over text-generation backends.
//!
//! A Generator turns a resolved prompt template into assistant-facing text.
//! The pipeline calls `generate()` without knowing which backend is wired
//! in; swapping in a real model backend touches construction, not pipeline
//! logic.

/// Greeting returned for empty or whitespace-only prompts.
const DEFAULT_GREETING: &str = "Hi! How can I help you today?";

/// The text-generation seam.
///
/// Implementations must be deterministic from the pipeline's point of view:
/// `generate` is total, synchronous, and never fails. A backend with its own
/// failure modes is expected to degrade to usable text internally.
pub trait Generator: Send + Sync {
    /// A human-readable name for this backend (e.g. "rule-based").
    fn name(&self) -> &str;

    /// Produce response text for the given prompt.
    fn generate(&self, prompt: &str) -> String;
}

/// The deterministic default backend: pass-through with a fixed greeting
/// for empty input.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedGenerator;

impl Generator for RuleBasedGenerator {
    fn name(&self) -> &str {
        "rule-based"
    }

    fn generate(&self, prompt: &str) -> String {
        if prompt.trim().is_empty() {
            DEFAULT_GREETING.to_string()
        } else {
            prompt.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_prompt_through_unchanged() {
        let generator = RuleBasedGenerator;
        assert_eq!(generator.generate("I can help you reset your password."), "I can help you reset your password.");
    }

    #[test]
    fn greets_on_empty_input() {
        let generator = RuleBasedGenerator;
        assert_eq!(generator.generate(""), DEFAULT_GREETING);
        assert_eq!(generator.generate("   \n\t"), DEFAULT_GREETING);
    }
}
