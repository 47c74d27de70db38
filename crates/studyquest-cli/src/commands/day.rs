use std::io::Write;
use std::time::Duration;

use chrono::Datelike;
use clap::Subcommand;
use studyquest_core::{BellTimer, DayOfWeek, StateStore};

#[derive(Subcommand)]
pub enum DayAction {
    /// Activate school mode (records attendance once per day)
    Start,
    /// Deactivate school mode
    Stop,
    /// Run the one-second bell loop until interrupted
    Watch {
        /// Stop after this many ticks (mainly for scripting)
        #[arg(long)]
        ticks: Option<u64>,
    },
}

pub fn run(action: DayAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut store, _config) = super::open_store()?;

    match action {
        DayAction::Start => {
            if store.state().school_mode_active {
                println!("School mode already active.");
            } else {
                super::print_events(&store.toggle_school_mode())?;
            }
        }
        DayAction::Stop => {
            if !store.state().school_mode_active {
                println!("School mode is not active.");
            } else {
                super::print_events(&store.toggle_school_mode())?;
            }
        }
        DayAction::Watch { ticks } => watch(store, ticks)?,
    }
    Ok(())
}

/// Cooperative one-second loop: countdown display, bell at session end.
fn watch(mut store: StateStore, max_ticks: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    if !store.state().school_mode_active {
        super::print_events(&store.toggle_school_mode())?;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut timer = BellTimer::new();
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        let mut ticked: u64 = 0;

        loop {
            interval.tick().await;
            let now = chrono::Local::now();
            let day = DayOfWeek::from(now.weekday());
            let sessions = store.state().timetable.sessions_for(day).to_vec();
            let school_mode = store.state().school_mode_active;

            if let Some(ended) = timer.tick(now.time(), &sessions, school_mode) {
                println!();
                println!("Bell! {} ended.", ended.name);
                for event in store.handle_bell(&ended) {
                    println!("{}", serde_json::to_string(&event)?);
                }
            }

            match timer.current_session() {
                Some(session) => {
                    let remaining = timer.remaining_display(now.time()).unwrap_or_default();
                    print!("\r{} - {} until the bell   ", session.name, remaining);
                }
                None => print!("\ridle - no session in progress   "),
            }
            std::io::stdout().flush().ok();

            if !school_mode {
                println!();
                break;
            }
            ticked += 1;
            if max_ticks.is_some_and(|max| ticked >= max) {
                println!();
                break;
            }
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
