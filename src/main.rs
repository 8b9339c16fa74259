use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use lazyimage::domain::entities::LoadRequest;
use lazyimage::domain::ports::ImageView;
use lazyimage::infrastructure::config::Command;
use lazyimage::infrastructure::{AppConfig, CliArgs, ConfigStore, LazyImage};
use lazyimage::presentation::ImageViewState;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let store = ConfigStore::new()?;
    let mut config = store.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

async fn run(loader: &LazyImage, command: Command) -> Result<()> {
    match command {
        Command::Show {
            url,
            size,
            placeholder,
            spinner,
            force,
            output,
        } => {
            let view = Arc::new(ImageViewState::with_bounds(size.unwrap_or_default()));
            let mut request = LoadRequest::new(url.clone());
            if let Some(size) = size {
                request = request.with_size(size);
            }
            if let Some(name) = placeholder {
                request = request.with_placeholder(name);
            }
            if spinner {
                request = request.with_spinner();
            }
            if force {
                request = request.force_download();
            }

            let source = loader.display(view.clone(), request).await?;
            let image = view.image().ok_or_else(|| eyre!("no image was shown"))?;
            info!(url = %url, source = %source, width = image.width(), height = image.height(), "Image shown");
            println!("{}x{} from {source}", image.width(), image.height());

            if let Some(output) = output {
                image.save(&output)?;
                info!(path = %output.display(), "Wrote image");
            }
        }
        Command::Prefetch { urls } => {
            let handles: Vec<_> = urls.iter().map(|url| (url, loader.prefetch(url))).collect();
            let mut failed = 0usize;
            for (url, handle) in handles {
                match handle.await {
                    Ok(Some(path)) => println!("{url} -> {}", path.display()),
                    Ok(None) => {
                        warn!(url = %url, "Downloaded but not cached");
                        failed += 1;
                    }
                    Err(e) => {
                        warn!(url = %url, error = %e, "Prefetch failed");
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                return Err(eyre!("{failed} of {} prefetches failed", urls.len()));
            }
        }
        Command::Clear { urls, all } => {
            if all {
                loader.clear_all().await;
            } else {
                loader.clear_cache_for_urls(urls.as_slice()).await;
            }
        }
        Command::Path { url } => {
            println!("{}", loader.cache_path(&url).display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = lazyimage::VERSION, "Starting lazyimage");
    if let Some(path) = config.effective_config_path() {
        debug!(path = %path.display(), "Using config file");
    }

    let loader = LazyImage::from_config(&config.loader_config()).await?;
    run(&loader, args.command).await
}
