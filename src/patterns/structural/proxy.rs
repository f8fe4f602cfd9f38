//! Proxy: a stand-in with the same interface as the real object. One proxy
//! guards and logs access, the other caches a slow video service.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub trait Subject {
    fn request(&self, console: &dyn Console);
}

pub struct RealSubject;

impl Subject for RealSubject {
    fn request(&self, console: &dyn Console) {
        console.write_line("RealSubject: Handling request.");
    }
}

/// Checks access before forwarding and records when each request went through.
pub struct LoggingProxy {
    real_subject: RealSubject,
    access_log: Mutex<Vec<DateTime<Utc>>>,
}

impl LoggingProxy {
    pub fn new(real_subject: RealSubject) -> Self {
        Self {
            real_subject,
            access_log: Mutex::new(Vec::new()),
        }
    }

    pub fn access_log(&self) -> Vec<DateTime<Utc>> {
        match self.access_log.lock() {
            Ok(log) => log.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn check_access(&self, console: &dyn Console) -> bool {
        console.write_line("Proxy: Checking access prior to firing a real request.");
        true
    }

    fn log_access(&self, console: &dyn Console) {
        let now = Utc::now();
        console.write_line("Proxy: Logging the time of request.");
        tracing::debug!("Request forwarded at {}", now.to_rfc3339());
        match self.access_log.lock() {
            Ok(mut log) => log.push(now),
            Err(poisoned) => poisoned.into_inner().push(now),
        }
    }
}

impl Subject for LoggingProxy {
    fn request(&self, console: &dyn Console) {
        if self.check_access(console) {
            self.real_subject.request(console);
            self.log_access(console);
        }
    }
}

pub fn client_code(subject: &dyn Subject, console: &dyn Console) {
    subject.request(console);
}

// Caching proxy around a third-party video service

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: u32,
    pub title: String,
    pub duration: u32,
}

#[async_trait]
pub trait VideoService: Send + Sync {
    async fn list_videos(&self) -> Vec<Video>;
    async fn video_info(&self, id: u32) -> Option<Video>;
    async fn download_video(&self, id: u32) -> Option<Video>;
}

/// Remote library; every call costs a round trip.
pub struct ThirdPartyYouTube {
    console: Arc<dyn Console>,
    videos: Vec<Video>,
    latency: Duration,
    calls: AtomicUsize,
}

impl ThirdPartyYouTube {
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self {
            console,
            videos: vec![Video {
                id: 1,
                title: "test".to_string(),
                duration: 2000,
            }],
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_videos(mut self, videos: Vec<Video>) -> Self {
        self.videos = videos;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn round_trip(&self, line: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.console.write_line(line);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn find(&self, id: u32) -> Option<Video> {
        self.videos.iter().find(|video| video.id == id).cloned()
    }
}

#[async_trait]
impl VideoService for ThirdPartyYouTube {
    async fn list_videos(&self) -> Vec<Video> {
        self.round_trip("Send an API request to YouTube.").await;
        self.videos.clone()
    }

    async fn video_info(&self, id: u32) -> Option<Video> {
        self.round_trip("Get metadata about some video.").await;
        self.find(id)
    }

    async fn download_video(&self, id: u32) -> Option<Video> {
        self.round_trip("Download a video file from YouTube.").await;
        self.find(id)
    }
}

/// Answers from memory when it can and only calls the service on a miss.
/// Misses for unknown ids are not cached.
pub struct CachedYouTube {
    service: Arc<dyn VideoService>,
    list_cache: tokio::sync::Mutex<Option<Vec<Video>>>,
    info_cache: tokio::sync::Mutex<HashMap<u32, Video>>,
    downloads: tokio::sync::Mutex<HashMap<u32, Video>>,
}

impl CachedYouTube {
    pub fn new(service: Arc<dyn VideoService>) -> Self {
        Self {
            service,
            list_cache: tokio::sync::Mutex::new(None),
            info_cache: tokio::sync::Mutex::new(HashMap::new()),
            downloads: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Drops every cached answer; the next calls go to the service.
    pub async fn reset(&self) {
        *self.list_cache.lock().await = None;
        self.info_cache.lock().await.clear();
        self.downloads.lock().await.clear();
        tracing::debug!("Video cache reset");
    }
}

#[async_trait]
impl VideoService for CachedYouTube {
    async fn list_videos(&self) -> Vec<Video> {
        let mut cache = self.list_cache.lock().await;
        if let Some(videos) = cache.as_ref() {
            return videos.clone();
        }
        let videos = self.service.list_videos().await;
        *cache = Some(videos.clone());
        videos
    }

    async fn video_info(&self, id: u32) -> Option<Video> {
        let mut cache = self.info_cache.lock().await;
        if let Some(video) = cache.get(&id) {
            return Some(video.clone());
        }
        let video = self.service.video_info(id).await?;
        cache.insert(id, video.clone());
        Some(video)
    }

    async fn download_video(&self, id: u32) -> Option<Video> {
        let mut downloads = self.downloads.lock().await;
        if let Some(video) = downloads.get(&id) {
            return Some(video.clone());
        }
        let video = self.service.download_video(id).await?;
        downloads.insert(id, video.clone());
        Some(video)
    }
}

/// Works with any [`VideoService`], so it cannot tell the proxy from the real thing.
pub struct YouTubeManager {
    service: Arc<dyn VideoService>,
    console: Arc<dyn Console>,
}

impl YouTubeManager {
    pub fn new(service: Arc<dyn VideoService>, console: Arc<dyn Console>) -> Self {
        Self { service, console }
    }

    pub async fn render_video_page(&self, id: u32) -> Option<Video> {
        let video = self.service.video_info(id).await;
        match &video {
            Some(video) => self.console.write_line(&format!(
                "Video page: {} ({}s)",
                video.title, video.duration
            )),
            None => self.console.write_line(&format!("Video page: no video {}", id)),
        }
        video
    }

    pub async fn render_list_panel(&self) -> Vec<Video> {
        let videos = self.service.list_videos().await;
        self.console
            .write_line(&format!("List panel: {} videos", videos.len()));
        videos
    }

    pub async fn react_on_user_input(&self) {
        self.render_video_page(1).await;
        self.render_list_panel().await;
    }
}

pub struct ProxyDemo {
    latency: Duration,
}

impl ProxyDemo {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for ProxyDemo {
    fn default() -> Self {
        Self::new(Duration::from_millis(20))
    }
}

#[async_trait]
impl Demo for ProxyDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "proxy",
            title: "Proxy",
            category: PatternCategory::Structural,
            summary: "Provides a substitute that controls access to the original object",
            complexity: 2,
            popularity: 1,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        console.write_line("Client: Executing the client code with a real subject:");
        client_code(&RealSubject, console.as_ref());
        console.blank_line();

        console.write_line("Client: Executing the same client code with a proxy:");
        let proxy = LoggingProxy::new(RealSubject);
        client_code(&proxy, console.as_ref());
        console.blank_line();

        let youtube = Arc::new(ThirdPartyYouTube::new(console.clone()).with_latency(self.latency));
        let cached = Arc::new(CachedYouTube::new(youtube.clone()));
        let manager = YouTubeManager::new(cached, console.clone());

        let started = std::time::Instant::now();
        manager.react_on_user_input().await;
        manager.react_on_user_input().await;
        tracing::debug!("Two rounds of user input took {:?}", started.elapsed());

        console.write_line(&format!(
            "Client: The service was called {} times for 2 rounds of user input.",
            youtube.calls()
        ));
        Ok(())
    }
}
