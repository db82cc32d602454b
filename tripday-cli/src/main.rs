mod commands;
mod render;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tripday_core::config::TripdayConfig;
use tripday_core::plan::Category;
use tripday_core::schedule::ScheduleOptions;
use tripday_core::store::PlanDir;
use tripday_core::time::parse_time;

#[derive(Parser)]
#[command(name = "tripday")]
#[command(about = "Plan vacation days: spot clashes, find free slots, auto-schedule and export")]
struct Cli {
    /// Log scheduling decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List plans in the plan directory
    Plans,
    /// Create a new plan with one empty day per date
    New {
        name: String,

        /// First day of the trip (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,

        /// Last day of the trip (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,

        #[arg(long)]
        destination: Option<String>,

        /// IANA timezone for exports (defaults to the local zone)
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Add an activity to a day
    Add {
        /// Plan slug or path to a plan file
        plan: String,

        title: String,

        #[arg(long)]
        day: NaiveDate,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// Duration, e.g. "90", "90m" or "1h 30m"
        #[arg(short, long)]
        duration: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long, value_enum, default_value_t = CategoryArg::Other)]
        category: CategoryArg,

        #[arg(long)]
        cost: Option<f64>,
    },
    /// Show the itinerary, day by day
    Show {
        plan: String,

        #[arg(long)]
        day: Option<NaiveDate>,
    },
    /// List overlapping activities
    Conflicts {
        plan: String,

        #[arg(long)]
        day: Option<NaiveDate>,

        /// Print conflicts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest free start times for an activity of the given duration
    Suggest {
        plan: String,

        #[arg(long)]
        day: NaiveDate,

        /// Duration, e.g. "90", "90m" or "1h 30m"
        #[arg(short, long)]
        duration: String,

        #[command(flatten)]
        window: WindowArgs,
    },
    /// Assign non-overlapping times to every activity of a day
    Schedule {
        plan: String,

        #[arg(long)]
        day: NaiveDate,

        /// Save the new times back to the plan file
        #[arg(long)]
        write: bool,

        /// Print assignments as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        window: WindowArgs,
    },
    /// Export a plan as JSON or iCalendar
    Export {
        plan: String,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Ics)]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
}

/// Day window overrides on top of the config file.
#[derive(clap::Args)]
struct WindowArgs {
    /// Start of the day (HH:MM)
    #[arg(long)]
    day_start: Option<String>,

    /// End of the day (HH:MM)
    #[arg(long)]
    day_end: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Json,
    Ics,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Sightseeing,
    Food,
    Transport,
    Accommodation,
    Activity,
    Shopping,
    Other,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Sightseeing => Category::Sightseeing,
            CategoryArg::Food => Category::Food,
            CategoryArg::Transport => Category::Transport,
            CategoryArg::Accommodation => Category::Accommodation,
            CategoryArg::Activity => Category::Activity,
            CategoryArg::Shopping => Category::Shopping,
            CategoryArg::Other => Category::Other,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = TripdayConfig::load()?;
    let plan_dir = PlanDir::new(config.plan_path());

    match cli.command {
        Commands::Plans => commands::plans::run(&plan_dir),
        Commands::New {
            name,
            from,
            to,
            destination,
            timezone,
        } => commands::new::run(&plan_dir, name, from, to, destination, timezone),
        Commands::Add {
            plan,
            title,
            day,
            start,
            duration,
            location,
            category,
            cost,
        } => {
            let plan = plan_dir.resolve(&plan)?;
            let activity = commands::add::NewActivity {
                title,
                start,
                duration,
                location,
                category: category.into(),
                cost,
            };
            commands::add::run(plan, day, activity, &config.schedule_options()?)
        }
        Commands::Show { plan, day } => {
            let plan = plan_dir.resolve(&plan)?;
            commands::show::run(&plan.plan, day)
        }
        Commands::Conflicts { plan, day, json } => {
            let plan = plan_dir.resolve(&plan)?;
            commands::conflicts::run(&plan.plan, day, json)
        }
        Commands::Suggest {
            plan,
            day,
            duration,
            window,
        } => {
            let plan = plan_dir.resolve(&plan)?;
            let options = resolve_options(&config, &window)?;
            commands::suggest::run(&plan.plan, day, &duration, &options)
        }
        Commands::Schedule {
            plan,
            day,
            write,
            json,
            window,
        } => {
            let plan = plan_dir.resolve(&plan)?;
            let options = resolve_options(&config, &window)?;
            commands::schedule::run(plan, day, write, json, &options)
        }
        Commands::Export {
            plan,
            format,
            output,
        } => {
            let plan = plan_dir.resolve(&plan)?;
            commands::export::run(&plan.plan, format, output.as_deref())
        }
    }
}

/// Logs go to stderr so JSON/ICS output on stdout stays clean.
fn init_logging(verbose: bool) {
    let default = if verbose { "tripday_core=debug,tripday=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn resolve_options(config: &TripdayConfig, window: &WindowArgs) -> Result<ScheduleOptions> {
    let mut options = config.schedule_options()?;

    if let Some(ref s) = window.day_start {
        options.day_start =
            parse_time(s).ok_or_else(|| anyhow::anyhow!("--day-start '{}' is not HH:MM", s))?;
    }
    if let Some(ref s) = window.day_end {
        options.day_end =
            parse_time(s).ok_or_else(|| anyhow::anyhow!("--day-end '{}' is not HH:MM", s))?;
    }
    if options.day_end <= options.day_start {
        anyhow::bail!(
            "Day window is empty: {} to {}",
            options.day_start,
            options.day_end
        );
    }

    Ok(options)
}
