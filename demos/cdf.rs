/// Reads numbers from stdin, one per line, and writes summary statistics of the resulting
/// histogram to stdout.
use std::io;
use std::io::{BufRead, Write};

use clap::{App, Arg, SubCommand};
use serde::Serialize;

use hdrhist::{Bracket, CreationError, Histogram, RecordError};

fn main() {
    let default_max = format!("{}", u64::max_value());
    let matches = App::new("hdrhist cdf")
        .arg(
            Arg::with_name("min")
                .long("min")
                .help("Minimum discernible value")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::with_name("max")
                .long("max")
                .help("Maximum trackable value")
                .takes_value(true)
                .default_value(default_max.as_str()),
        )
        .arg(
            Arg::with_name("sigfig")
                .long("sigfig")
                .help("Number of significant digits")
                .takes_value(true)
                .default_value("3"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log histogram construction and dropped samples to stderr"),
        )
        .subcommand(
            SubCommand::with_name("json")
                .about("Write statistics and the cumulative distribution as JSON"),
        )
        .subcommand(
            SubCommand::with_name("percentiles")
                .about("Write a percentile distribution table")
                .arg(
                    Arg::with_name("ticks")
                        .short("t")
                        .long("ticks-per-half")
                        .takes_value(true)
                        .default_value("5")
                        .help("Ticks per half distance"),
                ),
        )
        .get_matches();

    let level = if matches.is_present("verbose") {
        tracing::Level::TRACE
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let min = matches.value_of("min").unwrap().parse().expect("--min must be a u64");
    let max = matches.value_of("max").unwrap().parse().expect("--max must be a u64");
    let sigfig = matches.value_of("sigfig").unwrap().parse().expect("--sigfig must be a u8");

    let stdin = io::stdin();
    let stdin = stdin.lock();

    let stdout = io::stdout();
    let stdout = stdout.lock();

    let result = load(stdin, min, max, sigfig).and_then(|h| match matches.subcommand() {
        ("percentiles", Some(sub_matches)) => {
            let ticks = sub_matches
                .value_of("ticks")
                .unwrap()
                .parse()
                .expect("--ticks-per-half must be a u32");
            percentiles(stdout, &h, ticks)
        }
        _ => json(stdout, &h),
    });

    result.expect("cdf failed")
}

/// Read numbers, one from each line, into a new histogram.
fn load<R: BufRead>(reader: R, min: u64, max: u64, sigfig: u8) -> Result<Histogram<u64>, CliError> {
    let mut h = Histogram::new_with_bounds(min, max, sigfig)?;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let num = line.parse().map_err(|_| CliError::Parse(line.to_string()))?;
        h.record(num)?;
    }
    Ok(h)
}

#[derive(Serialize)]
struct Report {
    count: u64,
    min: u64,
    max: u64,
    mean: f64,
    stdev: f64,
    p50: u64,
    p99: u64,
    p999: u64,
    byte_size: usize,
    distribution: Vec<Bracket>,
}

fn json<W: Write>(mut writer: W, h: &Histogram<u64>) -> Result<(), CliError> {
    let report = Report {
        count: h.count(),
        min: h.min(),
        max: h.max(),
        // NaN has no JSON form
        mean: if h.is_empty() { 0.0 } else { h.mean() },
        stdev: if h.is_empty() { 0.0 } else { h.stdev() },
        p50: h.value_at_percentile(50.0),
        p99: h.value_at_percentile(99.0),
        p999: h.value_at_percentile(99.9),
        byte_size: h.byte_size(),
        distribution: h.cumulative_distribution(),
    };

    serde_json::to_writer_pretty(&mut writer, &report)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Output histogram data in the layout of HdrHistogram's percentile distribution report.
fn percentiles<W: Write>(mut writer: W, h: &Histogram<u64>, ticks: u32) -> Result<(), CliError> {
    writeln!(
        writer,
        "{:>12} {:>12} {:>10} {:>14}\n",
        "Value", "Percentile", "TotalCount", "1/(1-Percentile)"
    )?;

    for v in h.iter_percentiles(ticks) {
        let quantile = v.percentile() / 100.0;
        if quantile < 1.0 {
            writeln!(
                writer,
                "{:12} {:12.6} {:10} {:14.2}",
                v.value_iterated_to(),
                quantile,
                v.count_to_value(),
                1_f64 / (1_f64 - quantile)
            )?;
        } else {
            writeln!(
                writer,
                "{:12} {:12.6} {:10} {:>14}",
                v.value_iterated_to(),
                quantile,
                v.count_to_value(),
                "∞"
            )?;
        }
    }

    writeln!(
        writer,
        "#[{:10} = {:12.2}, {:14} = {:12.2}]",
        "Mean",
        h.mean(),
        "StdDeviation",
        h.stdev()
    )?;
    writeln!(
        writer,
        "#[{:10} = {:12}, {:14} = {:12}]",
        "Max",
        h.max(),
        "Total count",
        h.count()
    )?;
    writeln!(
        writer,
        "#[{:10} = {:12}, {:14} = {:12}]",
        "Buckets",
        h.bucket_count(),
        "SubBuckets",
        h.sub_bucket_count()
    )?;

    Ok(())
}

// A handy way to enable ? use by mapping common errors.
#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Json(serde_json::Error),
    Parse(String),
    HistogramCreation(CreationError),
    HistogramRecord(RecordError),
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<CreationError> for CliError {
    fn from(e: CreationError) -> Self {
        CliError::HistogramCreation(e)
    }
}

impl From<RecordError> for CliError {
    fn from(e: RecordError) -> Self {
        CliError::HistogramRecord(e)
    }
}
