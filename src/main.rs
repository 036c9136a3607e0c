//! feedcache - fetch an image feed and manage its local cache

use clap::Parser;

use feedcache::app::App;
use feedcache::cli::{Cli, Command, RunConfig};
use feedcache::feed::FeedImage;

/// Prints one line per image, or a notice when there are none
fn print_feed(feed: &[FeedImage]) {
    if feed.is_empty() {
        println!("No cached feed items");
        return;
    }

    for image in feed {
        println!(
            "{}\t{}\t{}\t{}",
            image.id,
            image.description.as_deref().unwrap_or("-"),
            image.location.as_deref().unwrap_or("-"),
            image.url
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = RunConfig::from_cli(&cli)?;
    let app = App::new(&config.feed);

    match config.command {
        Command::Load => print_feed(&app.load().await?),
        Command::Refresh { url } => print_feed(&app.refresh(url).await?),
        Command::Validate => {
            app.validate().await;
            println!("Feed cache validated");
        }
        Command::Clear => {
            app.clear().await?;
            println!("Feed cache cleared");
        }
    }

    Ok(())
}
