//! Loader behaviour against a local HTTP server.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{Router, extract::State, http::StatusCode, routing::get};
use image::{DynamicImage, ImageFormat};
use tempfile::TempDir;

use lazyimage::domain::ports::{ImageFetcherPort, ImageView};
use lazyimage::infrastructure::{DiskImageStore, HttpImageFetcher, LazyImage};
use lazyimage::presentation::ImageViewState;
use lazyimage::{ImageSize, ImageSource, LazyImageError, LoadRequest};

// == Helpers ==

#[derive(Clone, Default)]
struct Hits {
    image: Arc<AtomicUsize>,
    slow: Arc<AtomicUsize>,
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::new_rgb8(width, height)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

async fn image_route(State(hits): State<Hits>) -> (StatusCode, Vec<u8>) {
    hits.image.fetch_add(1, Ordering::SeqCst);
    (StatusCode::OK, png_bytes(40, 20))
}

async fn slow_route(State(hits): State<Hits>) -> (StatusCode, Vec<u8>) {
    hits.slow.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(30)).await;
    (StatusCode::OK, png_bytes(1, 1))
}

async fn spawn_server() -> (String, Hits) {
    let hits = Hits::default();
    let app = Router::new()
        .route("/image.png", get(image_route))
        .route("/slow.png", get(slow_route))
        .route("/missing.png", get(|| async { StatusCode::NOT_FOUND }))
        .route("/empty.png", get(|| async { StatusCode::OK }))
        .route("/text.png", get(|| async { "definitely not an image" }))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), hits)
}

async fn loader_in(dir: &TempDir) -> LazyImage {
    let store = DiskImageStore::new(dir.path().to_path_buf()).await.unwrap();
    LazyImage::new(Arc::new(HttpImageFetcher::new().unwrap()), store)
}

// == Fetcher Classification ==

#[tokio::test]
async fn test_fetch_ok_returns_body() {
    let (base, hits) = spawn_server().await;
    let fetcher = HttpImageFetcher::new().unwrap();

    let body = fetcher.fetch(&format!("{base}/image.png")).await.unwrap();

    assert_eq!(body.as_ref(), png_bytes(40, 20).as_slice());
    assert_eq!(hits.image.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fetch_non_200_is_call_failed() {
    let (base, _) = spawn_server().await;
    let fetcher = HttpImageFetcher::new().unwrap();

    let result = fetcher.fetch(&format!("{base}/missing.png")).await;

    assert_eq!(result, Err(LazyImageError::CallFailed));
}

#[tokio::test]
async fn test_fetch_empty_body_is_no_data() {
    let (base, _) = spawn_server().await;
    let fetcher = HttpImageFetcher::new().unwrap();

    let result = fetcher.fetch(&format!("{base}/empty.png")).await;

    assert_eq!(result, Err(LazyImageError::NoDataAvailable));
}

#[tokio::test]
async fn test_fetch_image_rejects_non_image() {
    let (base, _) = spawn_server().await;
    let dir = TempDir::new().unwrap();
    let loader = loader_in(&dir).await;

    let result = loader.fetch_image(&format!("{base}/text.png")).await;

    assert_eq!(result.err(), Some(LazyImageError::CorruptedData));
}

// == Display ==

#[tokio::test]
async fn test_second_display_is_served_from_disk() {
    let (base, hits) = spawn_server().await;
    let dir = TempDir::new().unwrap();
    let loader = loader_in(&dir).await;
    let url = format!("{base}/image.png");

    let first = Arc::new(ImageViewState::with_bounds(ImageSize::new(40, 20)));
    let source = loader
        .display(first.clone(), LoadRequest::new(url.clone()).with_spinner())
        .await
        .unwrap();
    assert_eq!(source, ImageSource::Network);
    assert!(loader.cache_path(&url).is_file());

    let second = Arc::new(ImageViewState::with_bounds(ImageSize::new(40, 20)));
    let source = loader
        .display(second.clone(), LoadRequest::new(url.clone()).with_spinner())
        .await
        .unwrap();

    assert_eq!(source, ImageSource::DiskCache);
    assert_eq!(hits.image.load(Ordering::SeqCst), 1);
    assert_eq!(second.spinner_runs(), 0);
    assert_eq!(ImageSize::of(&second.image().unwrap()), ImageSize::new(40, 20));
}

#[tokio::test]
async fn test_forced_display_downloads_again() {
    let (base, hits) = spawn_server().await;
    let dir = TempDir::new().unwrap();
    let loader = loader_in(&dir).await;
    let url = format!("{base}/image.png");

    for _ in 0..2 {
        let view = Arc::new(ImageViewState::new());
        loader
            .display(view, LoadRequest::new(url.clone()).force_download())
            .await
            .unwrap();
    }

    assert_eq!(hits.image.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failed_display_keeps_placeholder() {
    let (base, _) = spawn_server().await;
    let dir = TempDir::new().unwrap();
    let loader = loader_in(&dir).await;
    let url = format!("{base}/missing.png");
    let view = Arc::new(ImageViewState::new());

    let result = loader
        .display(
            view.clone(),
            LoadRequest::new(url.clone())
                .with_placeholder("avatar")
                .with_spinner(),
        )
        .await;

    assert_eq!(result, Err(LazyImageError::CallFailed));
    assert_eq!(view.placeholder().as_deref(), Some("avatar"));
    assert!(view.image().is_none());
    assert!(!view.is_spinning());
    assert!(!loader.cache_path(&url).exists());
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_fetch() {
    let (base, hits) = spawn_server().await;
    let dir = TempDir::new().unwrap();
    let loader = loader_in(&dir).await;
    let view = Arc::new(ImageViewState::new());

    let handle = loader.display(view.clone(), LoadRequest::new(format!("{base}/slow.png")));
    while hits.slow.load(Ordering::SeqCst) == 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert!(loader.cancel());
    assert_eq!(handle.await, Err(LazyImageError::NoDataAvailable));
    assert!(view.image().is_none());
}

#[tokio::test]
async fn test_prefetch_then_display_hits_cache() {
    let (base, hits) = spawn_server().await;
    let dir = TempDir::new().unwrap();
    let loader = loader_in(&dir).await;
    let url = format!("{base}/image.png");

    let path = loader.prefetch(&url).await.unwrap();
    assert_eq!(path, Some(loader.cache_path(&url)));

    let view = Arc::new(ImageViewState::new());
    let source = loader.display(view.clone(), LoadRequest::new(url)).await.unwrap();

    assert_eq!(source, ImageSource::DiskCache);
    assert_eq!(hits.image.load(Ordering::SeqCst), 1);
    assert_eq!(view.bounds(), ImageSize::new(40, 40));
}
