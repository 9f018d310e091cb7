use std::env;
use std::fs;
use std::sync::Arc;
use thumbforge::models::ReferenceImage;
use thumbforge::studio::{GalleryView, StudioAction, ThumbnailStudio};
use thumbforge::{GeminiClient, GeminiConfig, ImageClient, StudioError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    thumbforge::logger::init_with_config(
        thumbforge::logger::LoggerConfig::development()
            .with_level(thumbforge::logger::LogLevel::Debug),
    )?;

    thumbforge::logger::log_startup_info("thumbforge", env!("CARGO_PKG_VERSION"));

    log::info!("🔍 Checking Gemini environment...");

    // Check credentials (without printing the actual values for security).
    // Set-but-blank counts as missing, matching GeminiConfig::from_env.
    let env_key = |name: &str| env::var(name).ok().filter(|value| !value.trim().is_empty());
    match env_key("GEMINI_API_KEY").or_else(|| env_key("GOOGLE_API_KEY")) {
        Some(key) => {
            log::info!("✅ Gemini API key found in environment");
            log::debug!("API key starts with: {}...", &key[..5.min(key.len())]);
        }
        None => {
            log::warn!("⚠️  No GEMINI_API_KEY or GOOGLE_API_KEY in environment");
            log::error!("❌ This will cause authentication failures");
        }
    }

    if let Ok(base) = env::var("GEMINI_API_BASE") {
        log::info!("GEMINI_API_BASE: {}", base);
    }
    if let Ok(model) = env::var("GEMINI_IMAGE_MODEL") {
        log::info!("GEMINI_IMAGE_MODEL: {}", model);
    }

    let config = GeminiConfig::from_env();
    thumbforge::logger::log_config_info(&config);

    log::info!("🔄 Creating Gemini client...");
    let client = match GeminiClient::new(config) {
        Ok(client) => {
            log::info!("✅ Gemini client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            return Err(e.into());
        }
    };

    log::info!("🖼️  Available image generation models:");
    for (id, name, provider) in ImageClient::supported_models() {
        log::info!("  {} - {} ({})", id, name, provider);
    }

    let mut studio = ThumbnailStudio::new(Arc::new(client.images().clone()));

    // Reference photos come from the command line
    let paths: Vec<String> = env::args().skip(1).collect();
    for path in &paths {
        match fs::read(path) {
            Ok(bytes) => {
                let mime = mime_for_path(path);
                log::info!("📎 Loaded reference {} ({}, {} bytes)", path, mime, bytes.len());
                studio.apply(StudioAction::AddReference(ReferenceImage::new(bytes, mime)));
            }
            Err(e) => {
                log::error!("❌ Failed to read reference {}: {}", path, e);
            }
        }
    }

    log::info!(
        "🎨 Generating a batch with {} reference image(s)...",
        studio.state().references.len()
    );

    match studio.generate().await {
        Ok(produced) => {
            log::info!("✅ Batch finished with {} image(s)", produced);

            for (index, image) in studio.state().current_batch.iter().enumerate() {
                let ext = image.mime_type.strip_prefix("image/").unwrap_or("png");
                let filename = format!(
                    "helal-thumbnail-{}-{}-{}.{}",
                    image.size.as_str(),
                    chrono::Utc::now().timestamp_millis(),
                    index + 1,
                    ext
                );
                match fs::write(&filename, &image.data) {
                    Ok(_) => log::info!("💾 Image saved to: {}", filename),
                    Err(e) => log::error!("❌ Failed to save image: {}", e),
                }
            }

            let view = GalleryView::new();
            log::info!("🗂️  {}", view.title(studio.state()));
        }
        Err(StudioError::MissingReferences) => {
            if let Some(banner) = &studio.state().error {
                log::error!("❌ {}", banner);
            }
            log::info!("💡 Pass one or more reference image paths as arguments");
        }
        Err(e) => {
            if let Some(banner) = &studio.state().error {
                log::error!("❌ {}", banner);
            }
            log::error!("❌ Generation failed: {}", e);
        }
    }

    log::info!("🎉 Done!");
    log::info!("📝 Summary:");
    log::info!(
        "   - References attached: {}",
        studio.state().references.len()
    );
    log::info!(
        "   - Current batch: {} image(s)",
        studio.state().current_batch.len()
    );
    log::info!("   - History: {} image(s)", studio.state().history.len());

    Ok(())
}

fn mime_for_path(path: &str) -> &'static str {
    match path.rsplit('.').next().map(|ext| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "webp" => "image/webp",
        _ => "image/png",
    }
}
