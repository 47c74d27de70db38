use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use studyquest_core::{urgent_assignments, Assignment, DueLabel, Priority};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List all assignments
    List {
        #[arg(long)]
        json: bool,
    },
    /// List urgent assignments (due within 2 days, or overdue)
    Urgent {
        #[arg(long)]
        json: bool,
    },
    /// Create an assignment
    Add {
        title: String,
        #[arg(long)]
        subject: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,
        /// XP reward for completing it
        #[arg(long, default_value = "100")]
        xp: u64,
        #[arg(long, value_enum, default_value = "medium")]
        priority: PriorityArg,
    },
    /// Mark an assignment completed and claim its XP
    Complete { id: String },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(p: PriorityArg) -> Self {
        match p {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut store, _config) = super::open_store()?;

    match action {
        TaskAction::List { json } => {
            let assignments = &store.state().assignments;
            if json {
                println!("{}", serde_json::to_string_pretty(assignments)?);
            } else {
                let now = chrono::Local::now().naive_local();
                for a in assignments {
                    print_assignment(a, now);
                }
            }
        }
        TaskAction::Urgent { json } => {
            let now = chrono::Local::now().naive_local();
            let urgent = urgent_assignments(&store.state().assignments, now);
            if json {
                println!("{}", serde_json::to_string_pretty(&urgent)?);
            } else if urgent.is_empty() {
                println!("Nothing urgent.");
            } else {
                for a in urgent {
                    print_assignment(a, now);
                }
            }
        }
        TaskAction::Add {
            title,
            subject,
            due,
            xp,
            priority,
        } => {
            let events = store.add_assignment(title, subject, due, xp, priority.into());
            super::print_events(&events)?;
        }
        TaskAction::Complete { id } => {
            let events = store.complete_task(&id);
            if events.is_empty() {
                println!("No incomplete assignment with id '{id}'.");
            } else {
                super::print_events(&events)?;
            }
        }
    }
    Ok(())
}

fn print_assignment(a: &Assignment, now: chrono::NaiveDateTime) {
    let marker = if a.completed { "x" } else { " " };
    let label = DueLabel::for_date(a.due_date, now);
    println!(
        "[{marker}] {}  {} ({})  due {} ({})  +{} XP  {:?}",
        a.id, a.title, a.subject, a.due_date, label, a.xp_reward, a.priority
    );
}
