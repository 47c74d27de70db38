use clap::Subcommand;
use serde_json::json;
use studyquest_core::progression::{badge_catalog, progress_fraction, xp_to_next_level};

#[derive(Subcommand)]
pub enum StatsAction {
    /// XP, level, streak, attendance, study totals
    Summary,
    /// Recent topic history
    History {
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// Badge catalog with unlock state
    Badges,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, _config) = super::open_store()?;
    let stats = &store.state().stats;

    match action {
        StatsAction::Summary => {
            let summary = json!({
                "xp": stats.xp,
                "level": stats.level,
                "progress": progress_fraction(stats.xp),
                "xp_to_next_level": xp_to_next_level(stats.xp),
                "streak": stats.streak,
                "attendance_days": stats.attendance.len(),
                "total_topics": stats.total_topics(),
                "total_study_minutes": stats.total_study_minutes(),
                "last_active": stats.last_active,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::History { limit } => {
            let recent: Vec<_> = stats.topic_history.iter().rev().take(limit).collect();
            println!("{}", serde_json::to_string_pretty(&recent)?);
        }
        StatsAction::Badges => {
            let unlocked: Vec<&str> = stats.badges.iter().map(|b| b.id.as_str()).collect();
            for badge in badge_catalog() {
                let marker = if unlocked.contains(&badge.id.as_str()) {
                    "x"
                } else {
                    " "
                };
                println!("[{marker}] {} {} - {}", badge.icon, badge.name, badge.description);
            }
        }
    }
    Ok(())
}
