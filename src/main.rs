use std::process;

use log::{error, info};

use admin_ui_tester::browser::{BrowserConfig, BrowserFactory, WebDriverPage};
use admin_ui_tester::config::Config;
use admin_ui_tester::harness::AdminPageHarness;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "Usage: {} <base-url> <app-label> <model-name> [browser]",
            args[0]
        );
        process::exit(2);
    }

    let config = Config::load();
    let factory = BrowserFactory::new(BrowserConfig::from_settings(&config));

    let driver = match factory.create(args.get(4).map(String::as_str)).await {
        Ok(driver) => driver,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    let page = WebDriverPage::new(driver.clone());
    let harness = AdminPageHarness::new(page, &config, &args[1], &args[2], &args[3]);
    let result = harness.run().await;

    if let Err(err) = driver.quit().await {
        log::warn!("Failed to close browser session: {}", err);
    }

    match result {
        Ok(outcomes) => {
            info!("Run finished with {} checks", outcomes.len());
            println!("✓ admin page checks passed for {}/{}", args[2], args[3]);
        }
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}
