mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use median_maintenance::{LineSource, MedianSession, StreamError};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::num::NonZeroU64;
use tracing::{error, info};

/// Sums the running medians of integer streams, one integer per line.
#[derive(Debug, Parser)]
#[command(name = "median-maintenance", version, about)]
struct Args {
	/// Path to the TOML config. Defaults to ./config.toml when present.
	#[arg(short, long)]
	config: Option<String>,

	/// Overrides `checksum.modulus` from the config.
	#[arg(short, long)]
	modulus: Option<u64>,

	/// Print every running median before the checksum.
	#[arg(long)]
	print_medians: bool,

	/// Input files; `-` reads stdin.
	#[arg(required = true)]
	inputs: Vec<String>,
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_writer(io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.init();

	let args = Args::parse();

	let mut config = Config::resolve(args.config.as_deref()).context("Failed to load configuration")?;
	if let Some(modulus) = args.modulus {
		config.checksum.modulus = modulus;
	}
	config.output.print_medians |= args.print_medians;

	let modulus = config.modulus()?;
	info!("✅ Configuration loaded (modulus {})", modulus);

	let mut stdout = io::stdout().lock();
	let labelled = args.inputs.len() > 1;

	for input in &args.inputs {
		let checksum = match process_input(input, modulus, config.output.print_medians, &mut stdout) {
			Ok(checksum) => checksum,
			Err(e) => {
				error!("Failed to process {}: {:#}", input, e);
				return Err(e);
			},
		};

		if labelled {
			writeln!(stdout, "{input}\t{checksum}")?;
		} else {
			writeln!(stdout, "{checksum}")?;
		}
	}

	Ok(())
}

fn open_input(input: &str) -> Result<Box<dyn BufRead>> {
	if input == "-" {
		return Ok(Box::new(io::stdin().lock()));
	}

	let file = File::open(input).with_context(|| format!("Failed to open input file: {input}"))?;
	Ok(Box::new(BufReader::new(file)))
}

fn process_input(input: &str, modulus: NonZeroU64, print_medians: bool, out: &mut impl Write) -> Result<u64> {
	let reader = open_input(input)?;

	if !print_medians {
		let checksum = median_maintenance::checksum_from_reader(reader, modulus).map_err(|e| describe(input, e))?;
		info!("Processed {}", input);
		return Ok(checksum);
	}

	let mut session = MedianSession::with_modulus(modulus);
	for value in LineSource::new(reader) {
		let median = session.insert(value.map_err(|e| describe(input, e))?);
		writeln!(out, "{median}")?;
	}

	info!("Processed {} values from {}", session.len(), input);
	Ok(session.finalize())
}

fn describe(input: &str, e: StreamError) -> anyhow::Error {
	anyhow::Error::new(e).context(format!("Invalid input in {input}"))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn write_input(contents: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(contents.as_bytes()).unwrap();
		file
	}

	#[test]
	fn checksum_only() {
		let file = write_input("1\n2\n3\n");
		let mut out = Vec::new();

		let checksum = process_input(file.path().to_str().unwrap(), median_maintenance::DEFAULT_MODULUS, false, &mut out)
			.unwrap();
		assert_eq!(checksum, 4);
		assert!(out.is_empty());
	}

	#[test]
	fn prints_running_medians() {
		let file = write_input("5\n1\n3\n2\n4\n");
		let mut out = Vec::new();

		let checksum = process_input(file.path().to_str().unwrap(), median_maintenance::DEFAULT_MODULUS, true, &mut out)
			.unwrap();
		assert_eq!(checksum, 14);
		assert_eq!(String::from_utf8(out).unwrap(), "5\n1\n3\n2\n3\n");
	}

	#[test]
	fn malformed_input_names_the_token() {
		let file = write_input("1\nabc\n");
		let mut out = Vec::new();

		let err = process_input(file.path().to_str().unwrap(), median_maintenance::DEFAULT_MODULUS, false, &mut out)
			.unwrap_err();
		let stream_err = err.downcast_ref::<StreamError>().unwrap();
		assert_eq!(stream_err.token(), Some("abc"));
	}

	#[test]
	fn missing_input_is_an_error() {
		let mut out = Vec::new();
		assert!(process_input("/nonexistent/input.txt", median_maintenance::DEFAULT_MODULUS, false, &mut out).is_err());
	}

	#[test]
	fn parses_arguments() {
		let args = Args::try_parse_from(["median-maintenance", "--modulus", "1000", "a.txt", "-"]).unwrap();
		assert_eq!(args.modulus, Some(1000));
		assert_eq!(args.inputs, vec!["a.txt", "-"]);
		assert!(Args::try_parse_from(["median-maintenance"]).is_err());
	}
}
