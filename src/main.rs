#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "gltfkit", about = "glTF 2.0 / GLB container and storage-mode tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Info(cmd::info::Args),
	Pack(cmd::pack::Args),
	Unpack(cmd::pack::Args),
	Buffers(cmd::buffers::Args),
	Images(cmd::images::Args),
	RemoveView(cmd::remove_view::Args),
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(std::io::stderr)
		.init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> gltfkit::gltf::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Pack(args) => cmd::pack::run(args),
		Commands::Unpack(args) => cmd::unpack::run(args),
		Commands::Buffers(args) => cmd::buffers::run(args),
		Commands::Images(args) => cmd::images::run(args),
		Commands::RemoveView(args) => cmd::remove_view::run(args),
	}
}
