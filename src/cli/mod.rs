pub mod edit;
pub mod output;
pub mod week;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use edit::{Day, HabitCommand, MetaCommand, MetricsCommand, ReflectCommand, SectionCommand};
use output::{
    render_week,
    summary::{render_summary, summarize_recent},
};
use tracing::{info, level_filters::LevelFilter};
use week::{ActiveWeekPointer, DateStyle, WeekCommand, parse_week_date};

use crate::{
    fs::operations::read_locked,
    tracker::{
        model::WeekUpdate,
        storage::file_storage::FileWeekStorage,
        store::WeekStore,
        transfer::{export_json, export_to_dir},
    },
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_default_path, ensure_dir},
        logging::{CLI_PREFIX, enable_logging},
    },
};

#[derive(Parser, Debug)]
#[command(name = "inner-tracker", version, long_about = None)]
#[command(about = "Weekly habit and inner/outer balance tracker", long_about = None)]
pub(crate) struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(
        long,
        short,
        global = true,
        help = "Work on the week containing this date instead of the active one. Examples are \"today\", \"last monday\", \"2025-03-10\", \"15/03/2025\""
    )]
    week: Option<String>,
    #[arg(long, global = true, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
    #[arg(long, global = true, help = "Print logs to stderr")]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Display the week: habit grid, metrics, sections and reflections")]
    Show {
        #[arg(long, help = "Print the raw week document instead")]
        json: bool,
    },
    #[command(about = "Navigate between weeks")]
    Week {
        #[command(subcommand)]
        command: WeekCommand,
    },
    #[command(about = "Manage tracked habits")]
    Habit {
        #[command(subcommand)]
        command: HabitCommand,
    },
    #[command(about = "Mark a habit as done on a day")]
    Tick {
        habit: String,
        day: Day,
        #[arg(long, help = "Clear the mark instead")]
        off: bool,
    },
    #[command(about = "Manage custom sections")]
    Section {
        #[command(subcommand)]
        command: SectionCommand,
    },
    #[command(about = "Record metrics of the week")]
    Metrics {
        #[command(subcommand)]
        command: MetricsCommand,
    },
    #[command(about = "Fill in reflections and wins")]
    Reflect {
        #[command(subcommand)]
        command: ReflectCommand,
    },
    #[command(about = "Theme and logo of the week")]
    Meta {
        #[command(subcommand)]
        command: MetaCommand,
    },
    #[command(about = "Save the week as inner-<monday>.json")]
    Export {
        #[arg(long, help = "Directory to export into. Defaults to the current directory")]
        out: Option<PathBuf>,
    },
    #[command(about = "Replace the week with an exported document")]
    Import { file: PathBuf },
    #[command(about = "Clear every field of the week")]
    Reset {
        #[arg(long, help = "Confirm the reset")]
        yes: bool,
    },
    #[command(about = "Scores of the most recent stored weeks")]
    Summary {
        #[arg(long, default_value_t = 8)]
        weeks: usize,
        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, ensure_dir)?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir.join("logs"), logging_level, args.log)?;

    let clock = DefaultClock;
    let pointer = ActiveWeekPointer::new(app_dir.join("active-week"));
    let date = match &args.week {
        Some(week) => parse_week_date(week, args.date_style)?,
        None => pointer.load().await.unwrap_or_else(|| clock.today()),
    };

    let storage = FileWeekStorage::new(app_dir.join("weeks"))?;
    let mut store = WeekStore::open(storage, Box::new(clock), date).await;

    match args.commands {
        Commands::Show { json } => {
            if json {
                println!("{}", export_json(store.state())?);
            } else {
                print!("{}", render_week(store.active_week(), store.state()));
            }
            Ok(())
        }
        Commands::Week { command } => {
            let week = match command {
                WeekCommand::Next => store.shift_week(1).await?,
                WeekCommand::Prev => store.shift_week(-1).await?,
                WeekCommand::Shift { weeks } => store.shift_week(weeks).await?,
                WeekCommand::Today => store.switch_to(DefaultClock.today()).await,
                WeekCommand::Goto { date } => {
                    store.switch_to(parse_week_date(&date, args.date_style)?).await
                }
            };
            pointer.save(week).await?;
            print!("{}", render_week(store.active_week(), store.state()));
            Ok(())
        }
        Commands::Habit { command } => apply(&mut store, command.into()).await,
        Commands::Tick { habit, day, off } => {
            let update = WeekUpdate::SetTick {
                id: habit,
                day: day.into(),
                done: !off,
            };
            apply(&mut store, update).await
        }
        Commands::Section { command } => apply(&mut store, command.into()).await,
        Commands::Metrics { command } => apply(&mut store, command.into()).await,
        Commands::Reflect { command } => apply(&mut store, command.into()).await,
        Commands::Meta { command } => apply(&mut store, command.into()).await,
        Commands::Export { out } => {
            let dir = match out {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let path = export_to_dir(store.state(), store.active_week(), &dir).await?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Import { file } => {
            let content = read_locked(&file)
                .await?
                .with_context(|| format!("File {} doesn't exist", file.display()))?;
            store
                .import_document(&content)
                .await
                .context("Import rejected, week left unchanged")?;
            println!("Imported {} into week {}", file.display(), store.active_week());
            Ok(())
        }
        Commands::Reset { yes } => {
            if store.reset(yes).await {
                println!("Week {} was reset", store.active_week());
            } else {
                println!(
                    "This clears every field of week {}. Run again with --yes to confirm",
                    store.active_week()
                );
            }
            Ok(())
        }
        Commands::Summary { weeks, json } => {
            let summaries = summarize_recent(store.storage(), weeks).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                println!("{}", render_summary(&summaries));
            }
            Ok(())
        }
    }
}

async fn apply(store: &mut WeekStore<FileWeekStorage>, update: WeekUpdate) -> Result<()> {
    let description = format!("{update:?}");
    if !store.mutate(update).await {
        bail!(
            "Nothing in week {} matched, the week is unchanged. Check ids with `inner-tracker show`",
            store.active_week()
        );
    }
    info!("Applied {description}");
    print!("{}", render_week(store.active_week(), store.state()));
    Ok(())
}
