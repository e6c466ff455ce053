mod common;

use landing_render::config::SiteConfig;
use landing_render::features::data::{FsFetcher, HttpFetcher, Section};
use landing_render::{PageDocument, PageManager, SiteFetcher};

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

async fn http_manager(cfg: &SiteConfig) -> PageManager<SiteFetcher> {
    let base = common::serve_site().await;
    let fetcher = HttpFetcher::new(&base, reqwest::Client::new()).expect("base url");
    PageManager::from_config(SiteFetcher::Http(fetcher), cfg).expect("page manager")
}

#[tokio::test]
async fn full_site_renders_all_sections_with_limits() {
    let cfg = SiteConfig::default();
    let mut page = http_manager(&cfg).await;
    let mut doc = PageDocument::landing();
    let report = page.init(&mut doc).await;

    assert!(report.success);
    assert_eq!(report.rendered, Section::ALL.to_vec());
    assert!(report.unavailable.is_empty());
    assert!(!page.state().is_loading());

    let features = doc.container_html("features-grid");
    assert_eq!(count(features, "class=\"feature-card\""), 6);
    assert!(features.contains("animation-delay: 500ms"));
    assert!(!features.contains("特性 7"));

    assert_eq!(count(doc.container_html("tech-preview"), "class=\"tech-item\""), 3);
    assert_eq!(
        count(doc.container_html("use-cases-grid"), "class=\"use-case-card\""),
        3
    );
    assert_eq!(
        count(
            doc.container_html("service-table-container"),
            "class=\"service-row\""
        ),
        3
    );
}

#[tokio::test]
async fn one_missing_resource_keeps_overall_success() {
    let mut cfg = SiteConfig::default();
    cfg.data.use_cases_path = "data/missing-use-cases.json".to_string();
    let mut page = http_manager(&cfg).await;
    let mut doc = PageDocument::landing();
    let report = page.init(&mut doc).await;

    assert!(report.success);
    assert_eq!(report.unavailable, vec![Section::UseCases]);
    assert!(page.state().data().use_cases.is_none());
    assert!(
        doc.container_html("use-cases-grid")
            .contains(cfg.messages.section_unavailable.as_str())
    );
    assert_eq!(count(doc.container_html("features-grid"), "class=\"feature-card\""), 6);
}

#[tokio::test]
async fn all_resources_failing_shows_static_fallback() {
    let mut cfg = SiteConfig::default();
    cfg.data.features_path = "data/none-1.json".to_string();
    cfg.data.tech_advantages_path = "data/none-2.json".to_string();
    cfg.data.use_cases_path = "data/none-3.json".to_string();
    cfg.data.service_model_path = "data/broken.json".to_string();
    let mut page = http_manager(&cfg).await;
    let mut doc = PageDocument::landing();
    let report = page.init(&mut doc).await;

    assert!(!report.success);
    assert!(report.rendered.is_empty());
    assert_eq!(page.state().data().loaded_count(), 0);
    assert!(
        doc.container_html("features-grid")
            .contains(cfg.messages.features_unavailable.as_str())
    );
    for id in ["tech-preview", "use-cases-grid", "service-table-container"] {
        assert!(
            doc.container_html(id)
                .contains(cfg.messages.section_unavailable.as_str()),
            "{id} should show unavailable notice"
        );
    }
}

#[tokio::test]
async fn local_site_directory_renders_full_page() {
    let cfg = SiteConfig::default();
    let fetcher = SiteFetcher::Fs(FsFetcher::new(common::site_root()));
    let mut page = PageManager::from_config(fetcher, &cfg).expect("page manager");
    let mut doc = PageDocument::landing();
    let report = page.init(&mut doc).await;
    assert!(report.success);
    assert_eq!(report.rendered.len(), 4);

    let html = page
        .ui()
        .render_page(&doc, &cfg.output.title, "2026-01-01 00:00:00")
        .expect("render page");
    assert!(html.starts_with("<!DOCTYPE html>") || html.contains("<html"));
    assert!(html.contains(&cfg.output.title));
    assert!(html.contains("id=\"features-grid\""));
    assert!(html.contains("特性 1"));
    assert!(html.contains("2026-01-01 00:00:00"));
}
