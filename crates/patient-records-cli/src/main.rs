use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use patient_records_core::stats::{
    disease_frequency_chart, gender_distribution_chart, yearly_registration_chart,
};
use patient_records_core::{
    group_by_disease, group_by_registration_year, group_by_sex, AppConfig, DiseaseVocabulary,
    IntakeForm, RecordStore,
};

mod messages;
mod render;

/// Environment variable overriding the database path.
const DB_ENV: &str = "PATIENT_RECORDS_DB";
/// Environment variable overriding the disease list path.
const DISEASES_ENV: &str = "PATIENT_RECORDS_DISEASES";

#[derive(Parser)]
#[command(name = "patient-records")]
#[command(about = "Patient records and registration statistics")]
struct Cli {
    /// Database file (default: $PATIENT_RECORDS_DB or patientDatabase.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Disease list file (default: $PATIENT_RECORDS_DISEASES or disease.txt)
    #[arg(long, global = true)]
    diseases: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and its table
    Init,
    /// Add a patient
    Add {
        /// Attending doctor's ID
        #[arg(long, default_value = "")]
        doctors_id: String,
        /// Full name
        #[arg(long, default_value = "")]
        full_name: String,
        /// PESEL (11 characters)
        #[arg(long, default_value = "")]
        pesel: String,
        /// Age
        #[arg(long, default_value = "")]
        age: String,
        /// Male, Female or Other
        #[arg(long, default_value = "")]
        sex: String,
        /// Disease from the disease list
        #[arg(long, default_value = "")]
        disease: String,
        /// Medication
        #[arg(long, default_value = "")]
        medication: String,
    },
    /// Search a patient by PESEL
    Find {
        pesel: String,
        /// Print the row as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all patients
    List {
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a statistic
    Stats {
        #[arg(value_enum)]
        statistic: Statistic,
        /// Print the chart description as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the diseases patients can be registered with
    Diseases,
}

#[derive(Copy, Clone, ValueEnum)]
enum Statistic {
    /// Yearly submitted patients
    Yearly,
    /// Sex distribution
    Sex,
    /// Disease frequency
    Disease,
}

/// Flags first, then environment (including `.env`), then defaults.
fn resolve_config(cli: &Cli) -> AppConfig {
    resolve_config_with(cli, |name| std::env::var_os(name))
}

fn resolve_config_with(cli: &Cli, env: impl Fn(&str) -> Option<OsString>) -> AppConfig {
    let mut config = AppConfig::default();
    if let Some(path) = cli.db.clone().or_else(|| env(DB_ENV).map(PathBuf::from)) {
        config = config.with_database_path(path);
    }
    if let Some(path) = cli
        .diseases
        .clone()
        .or_else(|| env(DISEASES_ENV).map(PathBuf::from))
    {
        config = config.with_disease_list_path(path);
    }
    config
}

fn load_vocabulary(config: &AppConfig) -> DiseaseVocabulary {
    match DiseaseVocabulary::load(config.disease_list_path()) {
        Ok(vocabulary) => vocabulary,
        Err(e) => {
            tracing::warn!("{}; only patients without a disease can be added", e);
            DiseaseVocabulary::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patient_records_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli);

    let Some(command) = cli.command else {
        println!("Use 'patient-records --help' for commands");
        return Ok(());
    };

    run(command, &config)
}

fn open_store(config: &AppConfig) -> anyhow::Result<RecordStore> {
    RecordStore::from_config(config).map_err(|e| anyhow!(messages::store(&e)))
}

fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Init => {
            let store = open_store(config)?;
            println!("Database ready at {}", store.path().display());
        }
        Commands::Add {
            doctors_id,
            full_name,
            pesel,
            age,
            sex,
            disease,
            medication,
        } => {
            let form = IntakeForm {
                doctors_id,
                full_name,
                pesel,
                age,
                sex,
                disease,
                medication,
            };
            let vocabulary = load_vocabulary(config);
            let record = form
                .validate(&vocabulary)
                .map_err(|e| anyhow!(messages::intake(&e)))?;
            open_store(config)?
                .insert(&record)
                .map_err(|e| anyhow!(messages::store(&e)))?;
            println!("{}", messages::INSERTED);
        }
        Commands::Find { pesel, json } => {
            match open_store(config)?
                .find_by_key(&pesel)
                .map_err(|e| anyhow!(messages::store(&e)))?
            {
                Some(row) if json => println!("{}", serde_json::to_string_pretty(&row)?),
                Some(row) => println!("Patient found:\n{}", render::row(&row)),
                None => println!("{}", messages::NOT_FOUND),
            }
        }
        Commands::List { json } => {
            let rows = open_store(config)?
                .fetch_all()
                .map_err(|e| anyhow!(messages::store(&e)))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("No patients found.");
            } else {
                for row in &rows {
                    println!("{}\n", render::row(row));
                }
            }
        }
        Commands::Stats { statistic, json } => {
            let rows = open_store(config)?
                .fetch_all()
                .map_err(|e| anyhow!(messages::store(&e)))?;
            let chart = match statistic {
                Statistic::Yearly => yearly_registration_chart(&group_by_registration_year(&rows)),
                Statistic::Sex => gender_distribution_chart(&group_by_sex(&rows)),
                Statistic::Disease => disease_frequency_chart(&group_by_disease(&rows)),
            };
            if json {
                println!("{}", chart.to_json()?);
            } else {
                print!("{}", render::chart(&chart));
            }
        }
        Commands::Diseases => {
            let vocabulary = DiseaseVocabulary::load(config.disease_list_path())
                .context("disease list unavailable")?;
            for term in vocabulary.terms() {
                println!("{}", term);
            }
        }
    }

    Ok(())
}
