use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use color_eyre::eyre::eyre;
use sitescore::report::{
    render_exploration, render_filter_options, render_score, render_site, to_json,
};
use sitescore::{SessionConfig, init_logging, load_dataset};
use sitescore_core::{
    ColumnMapping, Dataset, ExplorationRequest, FACTOR_COUNT, Factor, FactorVector,
    ManualScoringRequest, PercentWeights, Selection, SiteFilter, SiteScoringRequest, explore,
    manual_score, site_score,
};

const CONFIG_FILE: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(name = "sitescore")]
#[command(about = "Weighted viability scoring and Monte Carlo exploration of candidate sites")]
struct Args {
    /// Path to the data directory (default: ~/.sitescore/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Session config file (default: {data_dir}/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Dataset file (.xlsx, .xlsm, .json, .yaml or .yml)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Percent weight per factor, X1..X5 (e.g. 30,30,20,10,10)
    #[arg(short, long, value_delimiter = ',', global = true)]
    weights: Option<Vec<u32>>,

    /// Assign a dataset column to a factor (e.g. X2=PIPE_MILES); repeatable
    #[arg(long = "column", value_parser = parse_column, global = true)]
    columns: Vec<(Factor, String)>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score hand-entered factor values on the fixed scale
    Score {
        /// Factor values X1..X5 (e.g. 5,5,5,5,1)
        #[arg(long, value_delimiter = ',')]
        factors: Option<Vec<f64>>,
    },
    /// Score one site against the dataset's observed ranges
    Site {
        #[command(flatten)]
        filter: FilterArgs,

        /// Replace one factor value (e.g. X1=4); repeatable
        #[arg(long = "set", value_parser = parse_override)]
        overrides: Vec<(Factor, f64)>,

        /// Number of sites to list
        #[arg(long)]
        top: Option<usize>,
    },
    /// Monte Carlo resampling of the selected rows
    Simulate {
        #[command(flatten)]
        explore: ExploreArgs,
    },
    /// Monte Carlo plus a one-factor-at-a-time sensitivity sweep
    Sensitivity {
        #[command(flatten)]
        explore: ExploreArgs,
    },
    /// List the state, county and plant choices for a filter
    Options {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print the effective session config as YAML
    Config {
        /// Also write it to the config file
        #[arg(long)]
        save: bool,
    },
}

#[derive(ClapArgs, Debug, Clone, Default)]
struct FilterArgs {
    /// State code, or "All"
    #[arg(long)]
    state: Option<String>,
    /// County name, or "All"
    #[arg(long)]
    county: Option<String>,
    /// Plant name, or "All"
    #[arg(long)]
    plant: Option<String>,
}

impl FilterArgs {
    fn apply(&self, filter: &mut SiteFilter) {
        if let Some(state) = &self.state {
            filter.state = Selection::from(state.as_str());
        }
        if let Some(county) = &self.county {
            filter.county = Selection::from(county.as_str());
        }
        if let Some(plant) = &self.plant {
            filter.plant = Selection::from(plant.as_str());
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
struct ExploreArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Number of Monte Carlo samples (100-10000)
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Number of sites to list
    #[arg(long)]
    top: Option<usize>,
}

impl ExploreArgs {
    fn apply(&self, session: &mut SessionConfig) {
        self.filter.apply(&mut session.filter);
        if let Some(iterations) = self.iterations {
            session.iterations = iterations;
        }
        if self.seed.is_some() {
            session.seed = self.seed;
        }
        if let Some(top) = self.top {
            session.top_n = top;
        }
    }
}

fn parse_factor(label: &str) -> Result<Factor, String> {
    Factor::ALL
        .into_iter()
        .find(|f| f.label().eq_ignore_ascii_case(label.trim()))
        .ok_or_else(|| format!("unknown factor '{label}' (expected X1..X5)"))
}

fn parse_column(raw: &str) -> Result<(Factor, String), String> {
    let (label, column) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FACTOR=COLUMN, got '{raw}'"))?;
    Ok((parse_factor(label)?, column.to_string()))
}

fn parse_override(raw: &str) -> Result<(Factor, f64), String> {
    let (label, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FACTOR=VALUE, got '{raw}'"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    Ok((parse_factor(label)?, value))
}

fn five<T: Copy>(values: &[T], what: &str) -> color_eyre::Result<[T; FACTOR_COUNT]> {
    values
        .try_into()
        .map_err(|_| eyre!("expected {FACTOR_COUNT} {what}, got {}", values.len()))
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sitescore")
}

/// Fold the global flags into the session config
fn apply_globals(args: &Args, session: &mut SessionConfig) -> color_eyre::Result<()> {
    if let Some(weights) = &args.weights {
        session.weights = PercentWeights(five(weights, "weights")?);
    }
    for (factor, column) in &args.columns {
        let slot = match factor {
            Factor::Generation => &mut session.columns.x1,
            Factor::Pipeline => &mut session.columns.x2,
            Factor::Market => &mut session.columns.x3,
            Factor::Incentives => &mut session.columns.x4,
            Factor::Water => &mut session.columns.x5,
        };
        *slot = Some(column.clone());
    }
    Ok(())
}

/// Dataset and resolved mapping, or `None` when no file was given
fn load_inputs(
    path: Option<&Path>,
    session: &SessionConfig,
) -> color_eyre::Result<Option<(Dataset, ColumnMapping)>> {
    let Some(path) = path else {
        tracing::info!("no dataset provided, nothing to do");
        return Ok(None);
    };
    let dataset = load_dataset(path)?;
    let mapping = ColumnMapping::resolve(&dataset, &session.defaults, &session.columns)?;
    Ok(Some((dataset, mapping)))
}

fn print<T: serde::Serialize>(
    json: bool,
    report: &T,
    text: impl FnOnce(&T) -> String,
) -> color_eyre::Result<()> {
    if json {
        println!("{}", to_json(report)?);
    } else {
        println!("{}", text(report));
    }
    Ok(())
}

fn run(args: &Args, mut session: SessionConfig, config_path: &Path) -> color_eyre::Result<()> {
    let data = args.data.as_deref();

    match &args.command {
        Command::Score { factors } => {
            if let Some(factors) = factors {
                session.factors = FactorVector::new(five(factors, "factor values")?);
            }
            let request = ManualScoringRequest {
                weights: session.weights,
                factors: session.factors,
            };
            let report = manual_score(&request)?;
            print(args.json, &report, render_score)
        }
        Command::Site {
            filter,
            overrides,
            top,
        } => {
            filter.apply(&mut session.filter);
            for (factor, value) in overrides {
                session.overrides[factor.index()] = Some(*value);
            }
            if let Some(top) = top {
                session.top_n = *top;
            }
            let Some((dataset, mapping)) = load_inputs(data, &session)? else {
                return Ok(());
            };
            let request = SiteScoringRequest {
                filter: session.filter.clone(),
                weights: session.weights,
                overrides: session.overrides,
                top_n: session.top_n,
            };
            let report = site_score(&dataset, &mapping, &request)?;
            print(args.json, &report, render_site)
        }
        Command::Simulate { explore: opts } | Command::Sensitivity { explore: opts } => {
            opts.apply(&mut session);
            let Some((dataset, mapping)) = load_inputs(data, &session)? else {
                return Ok(());
            };
            let sweep = matches!(args.command, Command::Sensitivity { .. })
                .then(|| session.sweep.clone());
            let request = ExplorationRequest {
                filter: session.filter.clone(),
                weights: session.weights,
                monte_carlo: session.monte_carlo(),
                top_n: session.top_n,
                sweep,
            };
            let report = explore(&dataset, &mapping, &request)?;
            print(args.json, &report, render_exploration)
        }
        Command::Options { filter } => {
            filter.apply(&mut session.filter);
            let Some(path) = data else {
                tracing::info!("no dataset provided, nothing to do");
                return Ok(());
            };
            let dataset = load_dataset(path)?;
            let options = session.filter.options(&dataset)?;
            print(args.json, &options, |o| render_filter_options(o, &session.filter))
        }
        Command::Config { save } => {
            print!("{}", session.to_yaml()?);
            if *save {
                session.save(config_path)?;
                tracing::info!(path = %config_path.display(), "saved session config");
            }
            Ok(())
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| data_dir.join(CONFIG_FILE));
    let mut session = SessionConfig::load(&config_path)?;
    apply_globals(&args, &mut session)?;

    let result = run(&args, session, &config_path);
    if let Err(err) = &result {
        tracing::error!("{err}");
    }
    result
}
