use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "scholar-scrape")]
#[command(about = "Harvests scholarship names and links from a listing page")]
#[command(version)]
pub struct Args {
    /// Force dynamic (WebDriver) extraction even when the static pass
    /// yields results
    #[arg(long)]
    pub selenium: bool,
}
