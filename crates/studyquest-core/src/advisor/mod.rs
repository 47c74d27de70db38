//! Advisory collaborator: motivational text and the "daily boss" pick.
//!
//! The advisor is strictly display-only. Nothing in the state machine
//! waits on it, and no advisor failure may ever reach the user as an
//! error - the fallback helpers at the bottom are the only surface the
//! rest of the system calls.

pub mod gemini;

pub use gemini::GeminiAdvisor;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assignments::Assignment;
use crate::error::AdvisorError;

/// Shown when the advisor is unreachable or misbehaving.
pub const FALLBACK_MOTIVATION: &str =
    "The journey of a thousand levels begins with a single quest.";

/// The advisor's pick for today's highest-priority assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossSuggestion {
    pub title: String,
    pub reason: String,
    pub strategy: String,
}

/// External text-generation collaborator.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// A one-sentence motivational message for the player.
    async fn motivational_message(&self, name: &str, level: u32) -> Result<String, AdvisorError>;

    /// Which assignment should be today's "daily boss", if any.
    async fn daily_boss(
        &self,
        assignments: &[Assignment],
    ) -> Result<Option<BossSuggestion>, AdvisorError>;
}

/// Motivational message, or the static fallback on any failure.
pub async fn motivation_or_fallback(advisor: &dyn Advisor, name: &str, level: u32) -> String {
    match advisor.motivational_message(name, level).await {
        Ok(message) => message,
        Err(e) => {
            debug!(error = %e, "advisor motivation failed, using fallback");
            FALLBACK_MOTIVATION.to_string()
        }
    }
}

/// Daily boss suggestion, or `None` on any failure.
pub async fn daily_boss_or_none(
    advisor: &dyn Advisor,
    assignments: &[Assignment],
) -> Option<BossSuggestion> {
    match advisor.daily_boss(assignments).await {
        Ok(suggestion) => suggestion,
        Err(e) => {
            debug!(error = %e, "advisor boss analysis failed, skipping suggestion");
            None
        }
    }
}

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "studyquest";

    pub fn get(key: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Advisor credential: keyring entry `gemini_api_key`, falling back to the
/// GEMINI_API_KEY environment variable.
pub fn api_key() -> Option<String> {
    keyring_store::get("gemini_api_key")
        .ok()
        .flatten()
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingAdvisor;

    #[async_trait]
    impl Advisor for FailingAdvisor {
        async fn motivational_message(
            &self,
            _name: &str,
            _level: u32,
        ) -> Result<String, AdvisorError> {
            Err(AdvisorError::MissingCredentials)
        }

        async fn daily_boss(
            &self,
            _assignments: &[Assignment],
        ) -> Result<Option<BossSuggestion>, AdvisorError> {
            Err(AdvisorError::Api {
                status: 429,
                message: "quota exceeded".into(),
            })
        }
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn motivation_falls_back_on_failure() {
        let message = block_on(motivation_or_fallback(&FailingAdvisor, "Hero", 3));
        assert_eq!(message, FALLBACK_MOTIVATION);
    }

    #[test]
    fn boss_suggestion_is_none_on_failure() {
        let suggestion = block_on(daily_boss_or_none(&FailingAdvisor, &[]));
        assert!(suggestion.is_none());
    }
}
