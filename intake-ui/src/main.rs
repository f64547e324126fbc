use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use intake_core::{CatalogConfig, DocumentKind, Event, LostItemField};
use tracing::{debug, info, warn};

use intake_ui::{Settings, app, logging, utils, views};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Lost-and-found reports and patient registration from the terminal.
///
/// Each subcommand walks one session through its screens, printing every
/// screen as it is shown.
#[derive(Debug, Parser)]
#[command(name = "intake", version)]
struct Cli {
    /// Settings file (TOML). Every key is optional.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Found-items CSV file; selects the `csv` catalog backend.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Complete simulated requests immediately.
    #[arg(long, global = true)]
    instant: bool,

    /// Seed for the identifier lookup.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log filter, e.g. `debug` or `info,intake_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// File a lost item report.
    Report {
        #[arg(long)]
        description: String,

        /// Date of loss, YYYY-MM-DD.
        #[arg(long)]
        date: String,

        /// Station name, e.g. Пушкинская.
        #[arg(long)]
        station: String,

        /// Photo to attach; may be repeated.
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,

        /// Tick "I have read the service rules".
        #[arg(long)]
        accept_rules: bool,
    },

    /// Search the found-items catalog by description or station.
    Search {
        #[arg(default_value = "")]
        query: String,
    },

    /// Register a patient at the kiosk.
    Register {
        #[arg(long)]
        fio: Option<String>,

        /// male or female.
        #[arg(long)]
        gender: Option<String>,

        /// YYYY-MM-DD.
        #[arg(long)]
        birth_date: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Continue without a name.
        #[arg(long)]
        manual: bool,

        /// Documents to scan: passport, oms, snils.
        #[arg(long = "scan", value_delimiter = ',')]
        scans: Vec<String>,

        /// Register as an unidentified patient.
        #[arg(long, conflicts_with_all = ["fio", "gender", "birth_date", "manual", "scans"])]
        unknown: bool,
    },
}

// ─── settings ────────────────────────────────────────────────────────────────

fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if let Some(path) = &cli.catalog {
        settings.catalog = CatalogConfig {
            backend: "csv".to_string(),
            location: path.display().to_string(),
        };
    }
    if cli.seed.is_some() {
        settings.rng_seed = cli.seed;
    }
    if let Some(level) = &cli.log_level {
        settings.log.level = level.clone();
    }
    Ok(settings)
}

// ─── commands ────────────────────────────────────────────────────────────────

async fn run_report(
    settings: &Settings,
    instant: bool,
    description: String,
    date: &str,
    station: &str,
    photos: &[PathBuf],
    accept_rules: bool,
) -> anyhow::Result<()> {
    let session = app::lost_found_session(settings, instant).await?;
    session.start(Event::ApplyNow);

    session.set_field(LostItemField::Description(description));
    session.set_field_by_name("date", date)?;
    session.set_field_by_name("location", station)?;
    session.set_field(LostItemField::AcceptedRules(accept_rules));

    let handles = photos
        .iter()
        .map(|path| utils::photo_handle(path))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let rejected = session.add_photos(handles);
    if !rejected.is_empty() {
        warn!(count = rejected.len(), "some photos were not attached");
    }

    print!("{}", views::LostFoundView(&session.snapshot()));

    let submitting = tokio::spawn({
        let session = session.clone();
        async move { session.submit_report().await }
    });
    tokio::task::yield_now().await;
    if session.is_submitting() {
        print!("{}", views::LostFoundView(&session.snapshot()));
    }

    let report = submitting.await.context("submit task panicked")??;
    info!(station = %report.location, "report accepted");
    print!("{}", views::LostFoundView(&session.snapshot()));
    Ok(())
}

async fn run_search(settings: &Settings, instant: bool, query: String) -> anyhow::Result<()> {
    let session = app::lost_found_session(settings, instant).await?;
    session.start(Event::OpenSearch);
    session.set_search_query(query);
    print!("{}", views::LostFoundView(&session.snapshot()));

    let hits = session.perform_search().await?;
    debug!(hits = hits.len(), "search returned");
    print!("{}", views::LostFoundView(&session.snapshot()));
    Ok(())
}

struct Registration {
    fio: Option<String>,
    gender: Option<String>,
    birth_date: Option<String>,
    phone: Option<String>,
    manual: bool,
    scans: Vec<String>,
    unknown: bool,
}

async fn run_register(
    settings: &Settings,
    instant: bool,
    input: Registration,
) -> anyhow::Result<()> {
    let session = app::registration_session(settings, instant);
    let show = |session: &intake_ui::RegistrationSession| {
        print!("{}", views::RegistrationView(&session.snapshot()));
    };

    if let Some(phone) = &input.phone {
        session.set_field_by_name("phone", phone)?;
    }

    if input.unknown {
        session.register_unknown()?;
        show(&session);
        session.complete_unknown()?;
        show(&session);
        return Ok(());
    }

    for (name, value) in [
        ("fio", &input.fio),
        ("gender", &input.gender),
        ("birth_date", &input.birth_date),
    ] {
        if let Some(value) = value {
            session.set_field_by_name(name, value)?;
        }
    }
    if input.manual {
        session.set_field_by_name("manual_entry", "true")?;
    }
    show(&session);

    session.next()?;
    for name in &input.scans {
        let kind = DocumentKind::parse(name).with_context(|| {
            format!("unknown document '{name}'; expected passport, oms or snils")
        })?;
        session.scan_document(kind)?;
    }
    show(&session);

    session.next()?;
    show(&session);

    let uip = session.confirm().await?;
    info!(%uip, "registration complete");
    show(&session);
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_default_logging(cli.log_level.as_deref().unwrap_or("info"));
    let settings = resolve_settings(&cli)?;
    if cli.log_level.is_none() && std::env::var_os("RUST_LOG").is_none() {
        logging::set_log_level(&settings.log.level)?;
    }
    if let Some(path) = &settings.log.file {
        logging::enable_file_logging(path)?;
    }
    debug!(?settings, "settings resolved");

    match cli.command {
        Command::Report {
            description,
            date,
            station,
            photos,
            accept_rules,
        } => {
            run_report(
                &settings,
                cli.instant,
                description,
                &date,
                &station,
                &photos,
                accept_rules,
            )
            .await
        }
        Command::Search { query } => run_search(&settings, cli.instant, query).await,
        Command::Register {
            fio,
            gender,
            birth_date,
            phone,
            manual,
            scans,
            unknown,
        } => {
            let input = Registration {
                fio,
                gender,
                birth_date,
                phone,
                manual,
                scans,
                unknown,
            };
            run_register(&settings, cli.instant, input).await
        }
    }
}
