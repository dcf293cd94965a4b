use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use weather_forecast::config::{DEFAULT_DATASET_PATH, DEFAULT_SEED};
use weather_forecast::{
    predict_weather, DataLoader, ForecastError, ModelContext, PredictorConfig, QueryError,
    Response,
};

const PROGRAM: &str = "weather-predict";

// Help and version flags are off so every other argument shape gets the usage JSON
/// Predict the weather for a Sri Lankan city on a given date
#[derive(Debug, Parser)]
#[command(
    name = PROGRAM,
    about,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// City name as it appears in the dataset
    city: String,

    /// Date in YYYY-MM-DD form
    date: String,

    /// Historical weather dataset (CSV)
    #[arg(long, env = "WEATHER_DATASET", default_value = DEFAULT_DATASET_PATH)]
    dataset: PathBuf,

    /// Number of trees in the random forest
    #[arg(long, env = "WEATHER_TREES", default_value_t = 100)]
    trees: usize,

    /// Seed for the train/test split and the forest
    #[arg(long, env = "WEATHER_SEED", default_value_t = DEFAULT_SEED)]
    seed: u64,
}

impl Cli {
    fn config(&self) -> PredictorConfig {
        PredictorConfig::new(&self.dataset)
            .with_trees(self.trees)
            .with_seed(self.seed)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match parse(std::env::args_os()) {
        Ok(cli) => cli,
        Err(usage) => return emit(&usage),
    };

    match run(&cli) {
        Ok(response) => emit(&response),
        Err(err) => {
            error!(error = %err, "weather prediction failed");
            ExitCode::FAILURE
        }
    }
}

/// Parse the command line, mapping every rejection to the usage response
fn parse<I, T>(args: I) -> Result<Cli, Response>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|_| Response::usage(PROGRAM))
}

fn run(cli: &Cli) -> Result<Response, ForecastError> {
    let config = cli.config();
    config.validate()?;

    let data = DataLoader::from_csv(&config.dataset_path)?;
    let context = ModelContext::build(&data, &config)?;

    match predict_weather(&context, &cli.city, &cli.date) {
        Ok(prediction) => Ok(Response::from(prediction)),
        Err(QueryError::Model(err)) => Err(err),
        Err(err) => Ok(Response::error(err.to_string())),
    }
}

fn emit(response: &Response) -> ExitCode {
    match response.to_json() {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "failed to serialize response");
            ExitCode::FAILURE
        }
    }
}
