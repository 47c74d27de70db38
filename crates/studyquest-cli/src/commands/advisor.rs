use clap::Subcommand;
use studyquest_core::advisor::{
    daily_boss_or_none, keyring_store, motivation_or_fallback, FALLBACK_MOTIVATION,
};
use studyquest_core::GeminiAdvisor;

#[derive(Subcommand)]
pub enum AdvisorAction {
    /// One-sentence motivational message
    Motivate,
    /// Daily boss recommendation
    Boss,
    /// Store the advisor API key in the OS keyring
    SetKey { key: String },
}

pub fn run(action: AdvisorAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AdvisorAction::SetKey { key } => {
            keyring_store::set("gemini_api_key", &key)?;
            println!("Advisor credential stored.");
        }
        AdvisorAction::Motivate => {
            let (store, config) = super::open_store()?;
            // Advisor failures (including a missing key) degrade to the
            // static message, never to an error.
            let message = match (config.advisor.enabled, GeminiAdvisor::from_config(&config)) {
                (true, Ok(advisor)) => block_on(motivation_or_fallback(
                    &advisor,
                    &config.player.name,
                    store.state().stats.level,
                ))?,
                _ => FALLBACK_MOTIVATION.to_string(),
            };
            println!("{message}");
        }
        AdvisorAction::Boss => {
            let (store, config) = super::open_store()?;
            let suggestion = match (config.advisor.enabled, GeminiAdvisor::from_config(&config)) {
                (true, Ok(advisor)) => {
                    block_on(daily_boss_or_none(&advisor, &store.state().assignments))?
                }
                _ => None,
            };
            match suggestion {
                Some(boss) => println!("{}", serde_json::to_string_pretty(&boss)?),
                None => println!("No suggestion available."),
            }
        }
    }
    Ok(())
}

fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
