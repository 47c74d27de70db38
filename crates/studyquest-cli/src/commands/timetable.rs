use chrono::{Datelike, Timelike};
use clap::Subcommand;
use studyquest_core::timetable::active_session;
use studyquest_core::DayOfWeek;

#[derive(Subcommand)]
pub enum TimetableAction {
    /// Print the weekly timetable
    Show {
        /// Single day (e.g. monday); defaults to all scheduled days
        #[arg(long)]
        day: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TimetableAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, _config) = super::open_store()?;

    match action {
        TimetableAction::Show { day, json } => {
            let timetable = &store.state().timetable;
            let days: Vec<DayOfWeek> = match day {
                Some(name) => {
                    let day = DayOfWeek::parse(&name)
                        .ok_or_else(|| format!("unknown weekday: {name}"))?;
                    vec![day]
                }
                None => timetable.scheduled_days().collect(),
            };

            if json {
                let mut out = serde_json::Map::new();
                for day in days {
                    out.insert(
                        day.name().to_string(),
                        serde_json::to_value(timetable.sessions_for(day))?,
                    );
                }
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            let now = chrono::Local::now();
            let today = DayOfWeek::from(now.weekday());
            let now_min = (now.time().num_seconds_from_midnight() / 60) as u16;

            for day in days {
                let sessions = timetable.sessions_for(day);
                let today_marker = if day == today { " (today)" } else { "" };
                println!("{day}{today_marker}");
                if sessions.is_empty() {
                    println!("  no sessions");
                    continue;
                }
                let active = if day == today {
                    active_session(sessions, now_min).map(|s| s.id.clone())
                } else {
                    None
                };
                for session in sessions {
                    let mut tags = String::new();
                    if session.is_break {
                        tags.push_str("  [break]");
                    }
                    if let Some(room) = &session.room {
                        tags.push_str(&format!("  ({room})"));
                    }
                    if active.as_deref() == Some(session.id.as_str()) {
                        tags.push_str("  <- now");
                    }
                    println!(
                        "  {}-{}  {}{}",
                        session.start_display(),
                        session.end_display(),
                        session.name,
                        tags
                    );
                }
            }
        }
    }
    Ok(())
}
