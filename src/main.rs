use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use model_registrar::config::{ConfigFile, ENV_FILE_VAR, ISSUE_BODY_VAR};
use model_registrar::{registrar, RegistrarConfig};

#[derive(Parser)]
#[command(name = "model-registrar")]
#[command(about = "Register a model requested in an issue into the JSON model registries")]
struct Cli {
    /// Raw markdown body of the model request issue
    #[arg(long, env = ISSUE_BODY_VAR, hide_env_values = true)]
    issue_body: Option<String>,

    /// Environment file to append MODEL_ID and MODEL_NAME to
    #[arg(long, env = ENV_FILE_VAR)]
    env_file: Option<String>,

    /// Registry file to update (repeatable). Defaults to public/models.json
    #[arg(short, long = "target", value_name = "PATH")]
    targets: Vec<PathBuf>,

    /// JSON file with `targets` and `labels` overrides
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<RegistrarConfig> {
        let mut config = RegistrarConfig::default();

        if let Some(path) = &self.config {
            config = config.with_file(ConfigFile::load(path)?);
        }
        if !self.targets.is_empty() {
            config = config.with_targets(self.targets);
        }

        // Runners may export these as empty strings; treat that as unset.
        config.issue_body = self.issue_body.filter(|body| !body.is_empty());
        config.env_file = self
            .env_file
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        Ok(config)
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "model_registrar=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match registrar::run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
