// src/bin/populate.rs
// Seeds a running service with a catalogue of songs through POST /recommendations
use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::env;
use std::time::{Duration, Instant};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationPayload<'a> {
    name: &'a str,
    youtube_link: &'a str,
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Created,
    Duplicate,
    Failed(String),
}

fn catalogue() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Falamansa - Xote dos Milagres", "https://www.youtube.com/watch?v=chwyjJbcs1Y"),
        ("Chitãozinho E Xororó - Evidências", "https://www.youtube.com/watch?v=ePjtnSPFWK8"),
        ("Queen - Bohemian Rhapsody", "https://www.youtube.com/watch?v=fJ9rUzIMcZQ"),
        ("a-ha - Take On Me", "https://www.youtube.com/watch?v=djV11Xbc914"),
        ("Daft Punk - One More Time", "https://www.youtube.com/watch?v=FGBhQbmPwH8"),
        ("Nirvana - Smells Like Teen Spirit", "https://www.youtube.com/watch?v=hTWKbfoikeg"),
        ("Tim Maia - Descobridor dos Sete Mares", "https://www.youtube.com/watch?v=QCfaKE8jNVE"),
        ("Radiohead - Karma Police", "https://www.youtube.com/watch?v=1uYWYWPc9HU"),
        ("Fleetwood Mac - Dreams", "https://www.youtube.com/watch?v=mrZRURcb1cM"),
        ("Stevie Wonder - Superstition", "https://www.youtube.com/watch?v=0CFuCYNx-1g"),
    ]
}

struct Seeder {
    base_url: String,
    client: Client,
}

impl Seeder {
    fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { base_url, client })
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn create(&self, name: &str, youtube_link: &str) -> Outcome {
        let payload = RecommendationPayload { name, youtube_link };
        let response = match self
            .client
            .post(format!("{}/recommendations", self.base_url))
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Outcome::Failed(e.to_string()),
        };

        match response.status() {
            StatusCode::CREATED => Outcome::Created,
            StatusCode::CONFLICT => Outcome::Duplicate,
            status => {
                let body = response.text().await.unwrap_or_default();
                Outcome::Failed(format!("HTTP {} - {}", status, body))
            }
        }
    }

    async fn run(&self) -> Result<()> {
        println!("\n{}Checking service status...{}", CYAN, RESET);
        if !self.check_service_health().await {
            bail!("service unavailable at {}", self.base_url);
        }
        println!("{}Service available{}\n", GREEN, RESET);

        let songs = catalogue();
        let started = Instant::now();
        let (mut created, mut duplicates, mut failed) = (0, 0, 0);

        for (i, (name, link)) in songs.iter().enumerate() {
            let outcome = self.create(name, link).await;
            let label = match &outcome {
                Outcome::Created => format!("{}created{}", GREEN, RESET),
                Outcome::Duplicate => format!("{}exists{}", YELLOW, RESET),
                Outcome::Failed(reason) => format!("{}failed: {}{}", RED, reason, RESET),
            };
            println!("[{}/{}] {:<45} {}", i + 1, songs.len(), name, label);

            match outcome {
                Outcome::Created => created += 1,
                Outcome::Duplicate => duplicates += 1,
                Outcome::Failed(_) => failed += 1,
            }
        }

        println!("\n{}Totals:{}", BOLD, RESET);
        println!("  • Created: {}{}{}", GREEN, created, RESET);
        println!("  • Already present: {}{}{}", YELLOW, duplicates, RESET);
        println!("  • Failed: {}{}{}", RED, failed, RESET);
        println!("  • Duration: {:.1}s", started.elapsed().as_secs_f64());

        if failed > 0 {
            bail!("{} recommendations could not be created", failed);
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let base_url = env::var("RECOMMENDATIONS_API_URL")
        .unwrap_or_else(|_| "http://localhost:5000".to_string());

    Seeder::new(base_url)?.run().await
}
