use clap::Parser;
use scholar_scrape::Pipeline;
use scholar_scrape::config::ScraperConfig;
use scholar_scrape::output;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = ScraperConfig::default().with_env_overrides();

    ::log::info!("Starting harvest of: {}", config.start_url);

    if args.selenium {
        println!("Note: dynamic extraction requires a WebDriver server (e.g., ChromeDriver).");
        println!(
            "Set WEBDRIVER_URL environment variable if not using the default {}",
            config.webdriver_url
        );
    }

    let pipeline = Pipeline::new(config.clone()).with_forced_dynamic(args.selenium);

    let start_time = std::time::Instant::now();
    let results = match pipeline.run().await {
        Ok(results) => results,
        Err(e) => {
            ::log::error!("Harvest failed: {}", e);
            std::process::exit(1);
        }
    };

    // Zero records is a valid outcome; the output file is still produced.
    if let Err(e) = output::write_csv(&config.output_path, &results) {
        ::log::error!("{}", e);
        std::process::exit(1);
    }

    ::log::info!(
        "Harvest complete - {} records written to {} in {:.2} seconds",
        results.len(),
        config.output_path,
        start_time.elapsed().as_secs_f64()
    );
}
