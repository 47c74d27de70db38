use clap::Subcommand;

#[derive(Subcommand)]
pub enum TopicAction {
    /// Log one topic for the session in progress
    Log,
    /// Show the pending topic counter
    Show,
}

pub fn run(action: TopicAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut store, _config) = super::open_store()?;

    match action {
        TopicAction::Log => {
            super::print_events(&store.log_topic())?;
        }
        TopicAction::Show => {
            println!("{}", store.pending_topics());
        }
    }
    Ok(())
}
