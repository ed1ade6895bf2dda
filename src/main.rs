use clap::Parser;

fn main() -> anyhow::Result<()> {
    cruise_scraper_lib::run(cruise_scraper_lib::cli::Cli::parse())
}
