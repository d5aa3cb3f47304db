use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = parfum_api::Args::parse();

	parfum_api::run(args).await
}
