use clap::{Parser, Subcommand};
use rg_catalog::{
    Catalog, CatalogError, GasDef, MixtureSpec, ModelDef, ModelKindDef, RequestDef, SessionConfig,
};
use rg_eos::{CalculationSession, EosError, ModelKind, ModelState, PathResult, run_path};
use rg_results::{JsonLinesSink, ResultSink, ResultsError, Snapshot};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Results(#[from] ResultsError),

    #[error(transparent)]
    Eos(#[from] EosError),

    #[error("{0}")]
    Usage(String),
}

#[derive(Parser)]
#[command(name = "rg-cli")]
#[command(about = "Real-gas state calculator with cubic equations of state", long_about = None)]
struct Cli {
    /// Extra component file (YAML or JSON) merged over the built-in catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known components
    Components,
    /// Build a session from a config file and report its candidates
    Validate {
        /// Path to the session config (YAML or JSON)
        config_path: PathBuf,
    },
    /// Run every request of a session config
    Run {
        /// Path to the session config (YAML or JSON)
        config_path: PathBuf,
        /// Write one JSON snapshot per evaluated point
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate states without a config file
    State {
        /// Component id, or a mixture like `methane=0.9,ethane=0.1`
        #[arg(long)]
        gas: String,
        /// Candidate model as `kind` or `kind:priority`; repeatable
        #[arg(long = "model", required = true)]
        models: Vec<String>,
        /// Point as `pressure_pa,temperature_k`; repeatable, evaluated in order
        #[arg(long = "at", required = true)]
        points: Vec<String>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Commands::Components => cmd_components(&catalog),
        Commands::Validate { config_path } => cmd_validate(&catalog, &config_path),
        Commands::Run {
            config_path,
            output,
        } => {
            let config = rg_catalog::load_config(&config_path)?;
            cmd_run(&catalog, &config, output.as_deref())
        }
        Commands::State {
            gas,
            models,
            points,
        } => {
            let config = config_from_flags(&gas, &models, &points)?;
            cmd_run(&catalog, &config, None)
        }
    }
}

fn load_catalog(extra: Option<&Path>) -> CliResult<Catalog> {
    let mut catalog = Catalog::builtin();
    if let Some(path) = extra {
        let loaded = rg_catalog::load_components(path)?;
        info!(path = %path.display(), "merged component file");
        catalog.extend(loaded);
    }
    Ok(catalog)
}

fn cmd_components(catalog: &Catalog) -> CliResult<()> {
    println!(
        "{:<18} {:>12} {:>10} {:>12} {:>9}",
        "id", "Pc [Pa]", "Tc [K]", "R", "omega"
    );
    for id in catalog.ids() {
        let c = catalog.get(id)?;
        let omega = c
            .acentric
            .map(|w| format!("{w:.4}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<18} {:>12.4e} {:>10.3} {:>12.4} {:>9}",
            c.id, c.pc_pa, c.tc_k, c.r, omega
        );
    }
    Ok(())
}

fn cmd_validate(catalog: &Catalog, config_path: &Path) -> CliResult<()> {
    println!("Validating session config: {}", config_path.display());
    let config = rg_catalog::load_config(config_path)?;
    let session = config.build_session(catalog)?;
    print_candidates(&session);
    println!("✓ Session '{}' is ready", config.name);
    Ok(())
}

fn cmd_run(catalog: &Catalog, config: &SessionConfig, output: Option<&Path>) -> CliResult<()> {
    let mut session = config.build_session(catalog)?;
    print_candidates(&session);

    let requests = config.state_requests();
    let result = run_path(&mut session, &requests);
    print_path(&result);

    if let Some(path) = output {
        let snapshots = Snapshot::from_path(&session, &config.name, &result);
        let mut sink = JsonLinesSink::create(path)?;
        sink.accept_all(&snapshots)?;
        sink.flush()?;
        println!("✓ Wrote {} snapshots to {}", snapshots.len(), path.display());
    }

    if result.halted {
        warn!("no applicable model remained; path halted");
    }
    println!(
        "  Points: {} ok, {} failed{}",
        result.num_successful,
        result.num_failed,
        if result.halted { " (halted)" } else { "" }
    );
    Ok(())
}

fn print_candidates(session: &CalculationSession) {
    println!("Gas: {}", session.gas().name());
    for model in session.models() {
        let status = match model.state() {
            ModelState::Uninitialized => "uninitialized",
            ModelState::Valid(_) => "valid",
            ModelState::Invalid { .. } => "invalid",
        };
        let marker = if model.kind() == session.active_kind() {
            "*"
        } else {
            " "
        };
        println!(
            "  {marker} {:<20} priority {:>4}  {status}",
            model.kind(),
            model.priority()
        );
    }
    for (kind, err) in session.excluded() {
        println!("  - {kind:<20} excluded: {err}");
    }
}

fn print_path(result: &PathResult) {
    println!(
        "{:<20} {:>12} {:>9} {:>13} {:>13} {:>10} {:>10} {:>7}",
        "model", "P [Pa]", "T [K]", "V", "U", "Cv", "Cp", "k"
    );
    for point in &result.points {
        match &point.outcome {
            Ok(outcome) => {
                let st = &outcome.state;
                println!(
                    "{:<20} {:>12.5e} {:>9.3} {:>13.6e} {:>13.6e} {:>10.3} {:>10.3} {:>7.4}",
                    outcome.model,
                    st.point().p_pa(),
                    st.point().t_k(),
                    st.point().volume(),
                    st.internal_energy(),
                    st.heat_capacity_v(),
                    st.heat_capacity_p(),
                    st.adiabatic_index()
                );
            }
            Err(err) => println!("{:<20} {}: {err}", "-", point.request),
        }
    }
}

fn config_from_flags(gas: &str, models: &[String], points: &[String]) -> CliResult<SessionConfig> {
    Ok(SessionConfig {
        name: "cli".to_string(),
        gas: parse_gas(gas)?,
        initial: None,
        models: models
            .iter()
            .map(|m| parse_model(m))
            .collect::<CliResult<_>>()?,
        requests: points
            .iter()
            .map(|p| parse_point(p))
            .collect::<CliResult<_>>()?,
    })
}

fn parse_number(text: &str, what: &str) -> CliResult<f64> {
    text.trim()
        .parse()
        .map_err(|_| CliError::Usage(format!("invalid {what}: '{text}'")))
}

fn parse_gas(text: &str) -> CliResult<GasDef> {
    if !text.contains('=') {
        return Ok(GasDef::Pure {
            component: text.trim().to_string(),
        });
    }
    let pairs = text
        .split(',')
        .map(|part| {
            let (id, x) = part
                .split_once('=')
                .ok_or_else(|| CliError::Usage(format!("expected id=fraction, got '{part}'")))?;
            Ok((id.trim().to_string(), parse_number(x, "fraction")?))
        })
        .collect::<CliResult<Vec<_>>>()?;
    Ok(GasDef::Mixture(MixtureSpec::from_pairs(pairs)))
}

fn parse_model(text: &str) -> CliResult<ModelDef> {
    let (kind, priority) = match text.split_once(':') {
        Some((kind, p)) => {
            let p = p
                .trim()
                .parse::<i8>()
                .map_err(|_| CliError::Usage(format!("invalid priority in '{text}'")))?;
            (kind, Some(p))
        }
        None => (text, None),
    };
    let kind: ModelKind = kind.parse().map_err(CliError::Usage)?;
    Ok(ModelDef {
        kind: ModelKindDef::from(kind),
        priority,
    })
}

fn parse_point(text: &str) -> CliResult<RequestDef> {
    let (p, t) = text
        .split_once(',')
        .ok_or_else(|| CliError::Usage(format!("expected pressure,temperature, got '{text}'")))?;
    Ok(RequestDef::Pt {
        p_pa: parse_number(p, "pressure")?,
        t_k: parse_number(t, "temperature")?,
    })
}
