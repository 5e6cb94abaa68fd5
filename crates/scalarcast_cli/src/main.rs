#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "scalarcast", about = "Scalar coercion and packed-array inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Coerce one scalar to a destination type.
	Coerce(cmd::coerce::Args),
	/// Decode a packed hex string into integers.
	Unpack(cmd::unpack::Args),
}

fn main() {
	env_logger::init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> scalarcast::coerce::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Coerce(args) => cmd::coerce::run(args),
		Commands::Unpack(args) => cmd::unpack::run(args),
	}
}
