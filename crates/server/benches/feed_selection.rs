//! Benchmarks for a full selection pass
//!
//! Run with: cargo bench --package server

use catalog::{Category, PreferenceSet, VideoIndex, VideoRecord};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use server::{FeedConfig, FeedSelector};
use sources::{FeedMode, FeedRequest, LocalCatalog, ViewerContext};
use std::sync::Arc;
use tokio::runtime::Runtime;

fn build_selector(size: usize) -> FeedSelector {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let videos = (0..size).map(|i| VideoRecord {
        id: format!("video-{}", i),
        title: format!("Video {}", i),
        description: String::new(),
        video_url: format!("https://cdn.example.com/{}.mp4", i),
        thumbnail_url: None,
        category: Category::ALL[i % Category::ALL.len()],
        duration_secs: 30,
        views: i as u64,
        likes: (i % 100) as u64,
        age_appropriate: i % 3 != 0,
        created_by: format!("creator-{}", i % 50),
        tags: vec![],
        created_at: start + Duration::minutes(i as i64),
    });
    let catalog = LocalCatalog::new(VideoIndex::from_videos(videos));
    FeedSelector::new(Arc::new(catalog), FeedConfig::default())
}

fn viewer(mode: FeedMode) -> ViewerContext {
    let mut prefs = PreferenceSet::new();
    prefs.toggle_preferred(Category::Travel);
    prefs.toggle_preferred(Category::Music);
    prefs.toggle_blocked(Category::News);
    prefs.toggle_parental_mode();
    ViewerContext::new("bench")
        .with_preferences(prefs)
        .with_request(FeedRequest::new(mode))
}

fn bench_select(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let selector = build_selector(10_000);

    for mode in FeedMode::ALL {
        let context = viewer(mode);
        c.bench_function(&format!("select_{}", mode), |b| {
            b.iter(|| {
                let selected = runtime.block_on(selector.select(black_box(&context))).unwrap();
                black_box(selected)
            })
        });
    }
}

criterion_group!(benches, bench_select);
criterion_main!(benches);
