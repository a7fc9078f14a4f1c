//! Command-line front end: prints confidence curves, summaries and exploration risk.

use std::error::Error;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::result;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::LevelFilter;

use geocap::{csv_report, format, parse_value};
use geocap::{CapacityEstimator, ExplorationRisk, PercentileEstimate};
use geocap::{DEFAULT_AREA, DEFAULT_POWER_DENSITY};

type Result<T> = result::Result<T, Box<dyn Error>>;

#[derive(Clone, Copy, Debug, PartialEq)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    fn from_args(matches: &ArgMatches<'_>) -> OutputFormat {
        match matches.value_of("format") {
            Some("csv") => OutputFormat::Csv,
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

fn prospect_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name("area-p90")
            .long("area-p90")
            .takes_value(true)
            .allow_hyphen_values(true)
            .value_name("KM2")
            .help("Pessimistic (P90) productive area [default: 1]"),
        Arg::with_name("area-p10")
            .long("area-p10")
            .takes_value(true)
            .allow_hyphen_values(true)
            .value_name("KM2")
            .help("Optimistic (P10) productive area [default: 10]"),
        Arg::with_name("pd-p90")
            .long("pd-p90")
            .takes_value(true)
            .allow_hyphen_values(true)
            .value_name("MWE_PER_KM2")
            .help("Pessimistic (P90) power density [default: 10]"),
        Arg::with_name("pd-p10")
            .long("pd-p10")
            .takes_value(true)
            .allow_hyphen_values(true)
            .value_name("MWE_PER_KM2")
            .help("Optimistic (P10) power density [default: 24]"),
    ]
}

fn chance_arg(name: &'static str, help: &'static str) -> Arg<'static, 'static> {
    Arg::with_name(name)
        .long(name)
        .takes_value(true)
        .allow_hyphen_values(true)
        .value_name("PERCENT")
        .help(help)
}

fn app() -> App<'static, 'static> {
    App::new("geocap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Power-density capacity estimation for geothermal prospects")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("format")
                .long("format")
                .takes_value(true)
                .possible_values(&["table", "csv", "json"])
                .default_value("table")
                .global(true)
                .help("Output format"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("FILE")
                .global(true)
                .help("Write to FILE instead of stdout"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .global(true)
                .help("Print more log output (repeat for more)"),
        )
        .subcommand(
            SubCommand::with_name("curve")
                .about("Cumulative confidence curve of one prospect")
                .args(&prospect_args())
                .arg(
                    Arg::with_name("deciles")
                        .long("deciles")
                        .help("Print every tenth point only (confidence 100, 90, ..., 10)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("summary")
                .about("P90/P50/P10 table of area, power density and capacity")
                .args(&prospect_args()),
        )
        .subcommand(
            SubCommand::with_name("batch")
                .about("Confidence curves of every scenario in a CSV file")
                .arg(
                    Arg::with_name("FILE")
                        .required(true)
                        .help("CSV with the columns area_p90,area_p10,pd_p90,pd_p10"),
                )
                .arg(
                    Arg::with_name("sequential")
                        .long("sequential")
                        .help("Evaluate scenarios on the current thread only"),
                ),
        )
        .subcommand(
            SubCommand::with_name("pos")
                .about("Probability of exploration success")
                .arg(chance_arg("temperature", "Chance of adequate temperature [default: 65]"))
                .arg(chance_arg("permeability", "Chance of adequate permeability [default: 65]"))
                .arg(chance_arg("chemistry", "Chance of benign chemistry [default: 95]")),
        )
}

fn init_logger(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn value_or(matches: &ArgMatches<'_>, name: &str, default: f64) -> Result<f64> {
    match matches.value_of(name) {
        Some(text) => Ok(parse_value(text)?),
        None => Ok(default),
    }
}

fn prospect(matches: &ArgMatches<'_>) -> Result<(PercentileEstimate, PercentileEstimate)> {
    let area = PercentileEstimate::new(
        value_or(matches, "area-p90", DEFAULT_AREA.p90())?,
        value_or(matches, "area-p10", DEFAULT_AREA.p10())?,
    );
    let power_density = PercentileEstimate::new(
        value_or(matches, "pd-p90", DEFAULT_POWER_DENSITY.p90())?,
        value_or(matches, "pd-p10", DEFAULT_POWER_DENSITY.p10())?,
    );

    Ok((area, power_density))
}

fn output(matches: &ArgMatches<'_>) -> Result<Box<dyn Write>> {
    match matches.value_of("output") {
        Some(path) => Ok(Box::new(csv_report::create(Path::new(path))?)),
        None => Ok(Box::new(io::stdout())),
    }
}

fn run(name: &str, matches: &ArgMatches<'_>) -> Result<()> {
    let fmt = OutputFormat::from_args(matches);
    let estimator = CapacityEstimator::default();

    match name {
        "curve" => {
            let (area, power_density) = prospect(matches)?;
            let curve = estimator.estimate(&area, &power_density)?;
            let deciles;
            let points = if matches.is_present("deciles") {
                deciles = curve.deciles();
                &deciles[..]
            } else {
                curve.points()
            };
            let mut out = output(matches)?;

            match fmt {
                OutputFormat::Table => write!(out, "{}", format::CurveTable(points))?,
                OutputFormat::Csv => csv_report::write_curve(&mut out, points)?,
                OutputFormat::Json => serde_json::to_writer_pretty(&mut out, points)?,
            }
            out.flush()?;
        }
        "summary" => {
            let (area, power_density) = prospect(matches)?;
            let summary = estimator.summarize(&area, &power_density)?;
            let mut out = output(matches)?;

            match fmt {
                OutputFormat::Table => write!(out, "{}", format::SummaryTable(&summary))?,
                OutputFormat::Csv => csv_report::write_summary(&mut out, &summary)?,
                OutputFormat::Json => serde_json::to_writer_pretty(&mut out, &summary)?,
            }
            out.flush()?;
        }
        "batch" => {
            let path = Path::new(matches.value_of("FILE").unwrap_or_default());
            let inputs = csv_report::read_scenarios(csv_report::open(path)?)?;
            let batch = estimator
                .parallel(!matches.is_present("sequential"))
                .estimate_scenarios(
                    &inputs.area_p90s,
                    &inputs.area_p10s,
                    &inputs.power_density_p90s,
                    &inputs.power_density_p10s,
                )?;
            let mut out = output(matches)?;

            match fmt {
                OutputFormat::Table => write!(out, "{}", format::BatchTable(&batch))?,
                OutputFormat::Csv => csv_report::write_batch(&mut out, &batch)?,
                OutputFormat::Json => serde_json::to_writer_pretty(&mut out, &batch)?,
            }
            out.flush()?;
        }
        "pos" => {
            let defaults = ExplorationRisk::default();
            let risk = ExplorationRisk::new(
                value_or(matches, "temperature", defaults.temperature() * 1e2)? / 1e2,
                value_or(matches, "permeability", defaults.permeability() * 1e2)? / 1e2,
                value_or(matches, "chemistry", defaults.chemistry() * 1e2)? / 1e2,
            )?;
            let mut out = output(matches)?;

            match fmt {
                OutputFormat::Json => serde_json::to_writer_pretty(&mut out, &risk)?,
                _ => writeln!(
                    out,
                    "{} temperature * {} permeability * {} chemistry = {} probability of exploration success",
                    format::percent(risk.temperature()),
                    format::percent(risk.permeability()),
                    format::percent(risk.chemistry()),
                    format::percent(risk.probability_of_success())
                )?,
            }
            out.flush()?;
        }
        other => return Err(format!("unknown command: {}", other).into()),
    }

    Ok(())
}

fn main() {
    let matches = app().get_matches();
    let (name, sub) = matches.subcommand();
    let sub = match sub {
        Some(sub) => sub,
        None => process::exit(2),
    };

    init_logger(sub.occurrences_of("verbose"));

    if let Err(err) = run(name, sub) {
        eprintln!("error: {}", err);
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("caused by: {}", cause);
            source = cause.source();
        }

        let invalid = err
            .downcast_ref::<geocap::Error>()
            .map_or(false, geocap::Error::is_invalid_input);
        process::exit(if invalid { 2 } else { 1 });
    }
}
