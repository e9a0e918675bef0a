//! `chairside` command line.
//!
//! Validates payment drafts with the same rules the forms use, and replays the
//! payment submit workflow against an in-memory store, printing the
//! notifications, navigation and cache state it produces.

mod settings;
mod simulate;
mod validate;

use std::path::PathBuf;
use std::process::ExitCode;

use chairside_config::Config;
use chairside_primitives::Role;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "chairside")]
#[command(about = "Clinic client core: form validation and mutation workflow")]
struct Args {
	/// Configuration file (TOML)
	#[arg(short, long, value_name = "PATH", global = true)]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Validate a draft without submitting it
	Validate {
		#[command(subcommand)]
		draft: validate::Draft,
	},
	/// Submit a payment against an in-memory store
	Simulate {
		/// Make the server reject the submission with this message
		#[arg(long, value_name = "MESSAGE")]
		fail: Option<String>,

		/// Role of the signed-in user
		#[arg(long, default_value = "Staff")]
		role: Role,
	},
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
	let args = Args::parse();
	setup_tracing(args.verbose);

	let config = match &args.config {
		Some(path) => Config::load(path)?,
		None => Config::default(),
	};
	tracing::debug!(?config, "cli.config");

	match args.command {
		Command::Validate { draft } => Ok(validate::run(&draft)),
		Command::Simulate { fail, role } => simulate::run(&config, fail, role).await,
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("debug")
		} else {
			EnvFilter::new("info")
		}
	});
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
