// src/replies.rs

use crate::constants::WARNING_GLYPH;
use crate::errors::ChatError;
use rand::Rng;

const BILLING_KEYWORDS: [&str; 2] = ["quota", "billing"];
const DEFAULT_FAILURE: &str = "Failed to connect to the AI service";

/// Turns a request failure into the text shown to the user.
pub fn failure_detail(err: &ChatError) -> String {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if BILLING_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return billing_guidance();
    }

    if message.trim().is_empty() {
        DEFAULT_FAILURE.to_string()
    } else {
        message
    }
}

fn billing_guidance() -> String {
    format!(
        "{} The AI service has run out of quota.\n\
         \n\
         To fix this:\n\
         1. Check the billing status of your provider account\n\
         2. Make sure a valid payment method is on file\n\
         3. Or wait for your usage limit to reset and try again",
        WARNING_GLYPH
    )
}

/// Wraps a failure detail in one of the fallback replies.
pub fn error_reply<R: Rng + ?Sized>(detail: &str, rng: &mut R) -> String {
    match rng.random_range(0..3) {
        0 => format!("Sorry, I couldn't get a response right now.\n\n{}", detail),
        1 => format!("Something went wrong while reaching the assistant.\n\n{}", detail),
        _ => format!("I ran into a problem answering that.\n\n{}", detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_quota_rewritten_to_guidance() {
        let detail = failure_detail(&ChatError::http(429, "You exceeded your current quota"));
        assert!(detail.starts_with(WARNING_GLYPH));
        assert!(detail.contains("billing status"));
        assert!(detail.contains("payment method"));
    }

    #[test]
    fn test_billing_match_ignores_case() {
        let detail = failure_detail(&ChatError::transport("Billing hard limit reached"));
        assert!(detail.contains("billing status"));
    }

    #[test]
    fn test_other_messages_kept() {
        let detail = failure_detail(&ChatError::transport("network down"));
        assert_eq!(detail, "network down");
    }

    #[test]
    fn test_empty_message_gets_default() {
        let detail = failure_detail(&ChatError::transport(""));
        assert_eq!(detail, DEFAULT_FAILURE);
    }

    #[test]
    fn test_every_template_embeds_detail() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..30 {
            let reply = error_reply("network down", &mut rng);
            assert!(reply.contains("network down"));
        }
    }
}
