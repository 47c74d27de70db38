pub mod advisor;
pub mod config;
pub mod day;
pub mod stats;
pub mod status;
pub mod task;
pub mod timetable;
pub mod topic;

use studyquest_core::{Config, Event, StateStore};

/// Open the store with the configured timetable overlay applied.
pub fn open_store() -> Result<(StateStore, Config), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut store = StateStore::open()?;
    store.apply_config(&config);
    Ok((store, config))
}

/// Print events as pretty JSON, one object per event.
pub fn print_events(events: &[Event]) -> Result<(), Box<dyn std::error::Error>> {
    for event in events {
        println!("{}", serde_json::to_string_pretty(event)?);
    }
    Ok(())
}
