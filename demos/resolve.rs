//! Resolve a title from the command line and print what comes back.
//!
//! `cargo run --example resolve -- "Great Wall of China"`
//! Settings come from `WIKI_*` variables, or a `.env` file next to the manifest.

use std::{env, error::Error};

use dotenv::dotenv;
use wiki_resolver::{Config, Resolution, ResolutionRequest, Wiki, WikiError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    dotenv().ok();

    let title = env::args().skip(1).collect::<Vec<_>>().join(" ");
    if title.is_empty() {
        eprintln!("usage: resolve <title>");
        return Ok(());
    }

    let config = Config::from_env()?;
    let wiki = Wiki::new(&config)?;
    let request = ResolutionRequest::title(title.as_str()).preload(true);

    match wiki.resolve(&request).await {
        Ok(Resolution::Page(page)) => {
            println!("{}", page);
            if let Some(url) = page.url() {
                println!("{}", url);
            }
            println!("\n{}", page.summary().await?.trim_end());
            println!("\nSections: {}", page.sections().await?.join(", "));
            if let Some(coordinates) = page.coordinates().await? {
                println!("Located at {}", coordinates);
            }
        }
        Ok(Resolution::Disambiguation(result)) => {
            println!("{:?} may refer to:", result.title);
            for candidate in result.candidates {
                println!("  {}", candidate);
            }
        }
        Err(WikiError::NotFound(target)) => {
            match wiki.search(&title, 5).await?.titles.as_slice() {
                [] => println!("Nothing found for {}", target),
                titles => println!("No page {}. Did you mean: {}", target, titles.join(", ")),
            }
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
