use artgen::{
    logger, BackendConfig, GenerationController, HttpBackend, ImageSize, ProviderChoice,
    RequestBuilder,
};
use std::env;
use std::fs;
use std::sync::Arc;

const DEFAULT_PROMPT: &str = "A serene watercolor landscape of mountains at sunrise";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_with_config(logger::LoggerConfig::development())?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::debug!("No .env file found, using system environment variables"),
    }

    // Usage: artgen [prompt] [size] [provider]
    let mut args = env::args().skip(1);
    let prompt = args.next().unwrap_or_else(|| DEFAULT_PROMPT.to_string());
    let size = match args.next() {
        Some(selection) => selection.parse::<ImageSize>()?,
        None => ImageSize::default(),
    };
    let provider = match args.next() {
        Some(selection) => selection.parse::<ProviderChoice>()?,
        None => ProviderChoice::default(),
    };

    let config = BackendConfig::from_env();
    log::info!("🌐 Generation endpoint: {}", config.resolved_base_url());

    let backend = Arc::new(HttpBackend::new(config)?);
    let mut controller = GenerationController::new(backend);

    log::info!("🎨 Generating a {}x{} image ({})", size, size, provider);
    log::debug!("Prompt: {}", prompt);

    let request = RequestBuilder::new(prompt)
        .with_size(size)
        .with_provider(provider)
        .build();

    let state = controller.submit(request).await;

    if let Some(image) = state.image() {
        if let Some(note) = state.note() {
            log::info!("📝 Note from the endpoint: {}", note);
        }

        let filename = format!("generated_{}.png", chrono::Utc::now().timestamp());
        match image.to_bytes() {
            Ok(bytes) => {
                fs::write(&filename, bytes)?;
                log::info!("💾 Image saved to: {}", filename);
            }
            Err(e) => {
                log::error!("❌ Failed to decode image payload: {}", e);
            }
        }
    } else if let Some(message) = state.failure() {
        log::warn!("⚠️  Generation failed: {}", message);
    }

    Ok(())
}
