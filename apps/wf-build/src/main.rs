// crates.io
use clap::Parser;
// self
use wf_build::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	wf_build::run(args).await
}
