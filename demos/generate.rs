use std::env;
use std::fs;
use std::sync::Arc;
use thumbforge::models::{OutputSize, ReferenceImage, StyleConfig};
use thumbforge::{BatchGenerator, GeminiClient, GeminiConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    thumbforge::logger::init()?;

    let api_key = env::var("GEMINI_API_KEY")?;
    let config = GeminiConfig::new().with_api_key(api_key);
    let client = GeminiClient::new(config)?;

    let references: Vec<ReferenceImage> = env::args()
        .skip(1)
        .map(|path| {
            let bytes = fs::read(&path)?;
            Ok(ReferenceImage::new(bytes, "image/jpeg"))
        })
        .collect::<Result<_, std::io::Error>>()?;

    let style = StyleConfig {
        pose: "Thumbs up".to_string(),
        emotion: "Excited".to_string(),
        size: OutputSize::Landscape,
        ..StyleConfig::default()
    };

    let generator = BatchGenerator::new(Arc::new(client.images().clone()));
    let batch = generator.generate_batch(&style, &references).await?;

    for (index, image) in batch.iter().enumerate() {
        let filename = format!("variation-{}.png", index + 1);
        fs::write(&filename, &image.payload.data)?;
        println!("saved {} ({} bytes)", filename, image.payload.data.len());
    }

    Ok(())
}
