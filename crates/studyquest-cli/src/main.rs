use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studyquest", version, about = "StudyQuest CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboard snapshot
    Status,
    /// School-day control (attendance, bell loop)
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Assignment management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Topic logging for the session in progress
    Topic {
        #[command(subcommand)]
        action: commands::topic::TopicAction,
    },
    /// Weekly timetable
    Timetable {
        #[command(subcommand)]
        action: commands::timetable::TimetableAction,
    },
    /// Progression statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// AI advisor
    Advisor {
        #[command(subcommand)]
        action: commands::advisor::AdvisorAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status => commands::status::run(),
        Commands::Day { action } => commands::day::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Topic { action } => commands::topic::run(action),
        Commands::Timetable { action } => commands::timetable::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Advisor { action } => commands::advisor::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
