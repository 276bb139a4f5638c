use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = notarium_api::Args::parse();
	notarium_api::run(args).await
}
