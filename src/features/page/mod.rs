//! 页面编排
//!
//! 一次加载周期：
//! 1. 初始化导航（与数据无关）；
//! 2. 向四个内容容器注入加载占位；
//! 3. 并发加载全部数据；
//! 4. 成功：逐区块校验载荷并渲染，数据缺失的区块显示“暂不可用”提示；
//! 5. 失败：产品特性容器显示静态提示，其余容器显示“暂不可用”提示。
//!
//! 无论加载结果如何，随后都会注册窗口尺寸监听与区块淡入动画。不做自动重试。

use serde_json::Value;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::features::components::UiComponents;
use crate::features::data::{
    DataLoader, DataPaths, Feature, ResourceFetcher, Section, ServiceModel, TechAdvantage,
    UseCase, records_from,
};
use crate::features::navigation::Navigation;
use crate::state::AppState;
use crate::surface::{
    EventOutcome, IntersectionEntry, Listener, ObserverKind, ObserverOptions, UiEvent, UiSurface,
};
use crate::utils::{Debouncer, show_loading};

/// 页面编排参数
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub features_limit: usize,
    pub use_cases_limit: usize,
    pub feature_stagger_ms: u64,
    pub fade_threshold: f32,
    pub fade_root_margin: String,
}

impl From<&SiteConfig> for PageSettings {
    fn from(cfg: &SiteConfig) -> Self {
        Self {
            features_limit: cfg.render.features_limit,
            use_cases_limit: cfg.render.use_cases_limit,
            feature_stagger_ms: cfg.render.feature_stagger_ms,
            fade_threshold: cfg.animation.fade_threshold,
            fade_root_margin: cfg.animation.fade_root_margin.clone(),
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self::from(&SiteConfig::default())
    }
}

/// 一次加载周期的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// 整体加载是否可用（见 `DataLoader::load_all_data`）
    pub success: bool,
    /// 成功渲染了数据的区块
    pub rendered: Vec<Section>,
    /// 显示了不可用提示的区块
    pub unavailable: Vec<Section>,
}

pub struct PageManager<F> {
    loader: DataLoader<F>,
    ui: UiComponents,
    navigation: Navigation,
    settings: PageSettings,
    state: AppState,
    resize: Debouncer,
}

impl<F: ResourceFetcher> PageManager<F> {
    pub fn new(
        loader: DataLoader<F>,
        ui: UiComponents,
        navigation: Navigation,
        settings: PageSettings,
        resize: Debouncer,
    ) -> Self {
        Self {
            loader,
            ui,
            navigation,
            settings,
            state: AppState::new(),
            resize,
        }
    }

    /// 按站点配置组装
    pub fn from_config(fetcher: F, cfg: &SiteConfig) -> Result<Self, SiteError> {
        Ok(Self::new(
            DataLoader::new(fetcher, DataPaths::from(&cfg.data)),
            UiComponents::new(&cfg.render, cfg.messages.clone())?,
            Navigation::new(cfg.navigation.clone()),
            PageSettings::from(cfg),
            Debouncer::new(cfg.animation.resize_debounce()),
        ))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn ui(&self) -> &UiComponents {
        &self.ui
    }

    /// 页面加载入口
    pub async fn init<S: UiSurface + ?Sized>(&mut self, surface: &mut S) -> LoadReport {
        self.navigation.init(surface);
        let report = self.load_and_render_content(surface).await;
        self.setup_responsive(surface);
        self.setup_scroll_animations(surface);
        report
    }

    pub async fn load_and_render_content<S: UiSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> LoadReport {
        self.show_placeholders(surface);

        let success = self.loader.load_all_data(&mut self.state).await;
        let report = if success {
            self.render_all(surface)
        } else {
            self.render_failure(surface)
        };

        tracing::info!(
            success = report.success,
            rendered = report.rendered.len(),
            unavailable = report.unavailable.len(),
            "页面内容渲染完成"
        );
        report
    }

    fn show_placeholders<S: UiSurface + ?Sized>(&self, surface: &mut S) {
        let placeholder = match self.ui.render_loading() {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("加载占位渲染失败: {}", e);
                return;
            }
        };
        for section in Section::ALL {
            show_loading(surface, section.container_id(), &placeholder);
        }
    }

    fn render_all<S: UiSurface + ?Sized>(&self, surface: &mut S) -> LoadReport {
        let data = self.state.data();
        let mut report = LoadReport {
            success: true,
            ..Default::default()
        };

        for section in Section::ALL {
            let rendered = data
                .get(section)
                .and_then(|payload| self.render_section(section, payload));
            match rendered {
                Some(html) => {
                    surface.set_inner_html(section.container_id(), &html);
                    report.rendered.push(section);
                }
                None => {
                    tracing::warn!(section = section.key(), "区块数据缺失或格式不符");
                    let message = &self.ui.messages().section_unavailable;
                    self.show_unavailable(surface, section, message);
                    report.unavailable.push(section);
                }
            }
        }
        report
    }

    /// 校验载荷形态并渲染；载荷格式不符或模板失败时返回 `None`
    fn render_section(&self, section: Section, payload: &Value) -> Option<String> {
        let result = match section {
            Section::Features => records_from::<Feature>(payload, section.key()).map(|list| {
                self.ui.render_features(
                    &list,
                    self.settings.features_limit,
                    self.settings.feature_stagger_ms,
                )
            }),
            Section::TechAdvantages => records_from::<TechAdvantage>(payload, section.key())
                .map(|list| self.ui.render_tech_items(&list)),
            Section::UseCases => records_from::<UseCase>(payload, section.key())
                .map(|list| self.ui.render_use_cases(&list, self.settings.use_cases_limit)),
            Section::ServiceModel => ServiceModel::from_payload(payload)
                .map(|_| self.ui.render_service_table(Some(payload))),
        }?;

        match result {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::warn!(section = section.key(), "区块渲染失败: {}", e);
                None
            }
        }
    }

    fn render_failure<S: UiSurface + ?Sized>(&self, surface: &mut S) -> LoadReport {
        tracing::warn!("全部数据加载失败，显示静态提示");
        let messages = self.ui.messages();
        for section in Section::ALL {
            let message = match section {
                Section::Features => &messages.features_unavailable,
                _ => &messages.section_unavailable,
            };
            self.show_unavailable(surface, section, message);
        }
        LoadReport {
            success: false,
            rendered: Vec::new(),
            unavailable: Section::ALL.to_vec(),
        }
    }

    fn show_unavailable<S: UiSurface + ?Sized>(
        &self,
        surface: &mut S,
        section: Section,
        message: &str,
    ) {
        match self.ui.render_unavailable(message) {
            Ok(html) => {
                surface.set_inner_html(section.container_id(), &html);
            }
            Err(e) => tracing::warn!("提示片段渲染失败: {}", e),
        }
    }

    fn setup_responsive<S: UiSurface + ?Sized>(&self, surface: &mut S) {
        surface.register(Listener::Resize);
    }

    fn setup_scroll_animations<S: UiSurface + ?Sized>(&self, surface: &mut S) {
        let sections = surface.section_ids();
        if sections.is_empty() {
            return;
        }
        for id in &sections {
            surface.set_style(id, "opacity", "0");
            surface.set_style(id, "transform", "translateY(20px)");
            surface.set_style(id, "transition", "opacity 0.6s ease, transform 0.6s ease");
        }
        surface.register(Listener::Intersection {
            kind: ObserverKind::FadeIn,
            options: ObserverOptions {
                threshold: self.settings.fade_threshold,
                root_margin: self.settings.fade_root_margin.clone(),
            },
            targets: sections,
        });
    }

    fn reveal_sections<S: UiSurface + ?Sized>(
        &self,
        surface: &mut S,
        entries: &[IntersectionEntry],
    ) {
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            surface.set_style(&entry.target_id, "opacity", "1");
            surface.set_style(&entry.target_id, "transform", "translateY(0)");
            surface.unobserve(ObserverKind::FadeIn, &entry.target_id);
        }
    }

    /// 分发宿主事件
    pub fn handle_event<S: UiSurface + ?Sized>(
        &self,
        surface: &mut S,
        event: &UiEvent,
    ) -> EventOutcome {
        match event {
            UiEvent::Click(target) => self.navigation.handle_click(surface, target),
            UiEvent::Intersection {
                kind: ObserverKind::ActiveSection,
                entries,
            } => {
                self.navigation.handle_intersections(surface, entries);
                EventOutcome::default()
            }
            UiEvent::Intersection {
                kind: ObserverKind::FadeIn,
                entries,
            } => {
                self.reveal_sections(surface, entries);
                EventOutcome::default()
            }
            UiEvent::Resize => {
                // 暂无响应式布局逻辑，仅记录
                if let Err(e) = self.resize.call(|| tracing::debug!("窗口尺寸已变化")) {
                    tracing::warn!("窗口尺寸监听未生效: {}", e);
                }
                EventOutcome::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{ClickTarget, PageDocument};
    use std::time::Duration;

    /// 所有资源都返回同一个载荷
    struct ConstFetcher(Value);

    impl ResourceFetcher for ConstFetcher {
        async fn fetch_json(&self, _path: &str) -> Result<Value, SiteError> {
            Ok(self.0.clone())
        }
    }

    /// 请求永不返回
    struct HangingFetcher;

    impl ResourceFetcher for HangingFetcher {
        async fn fetch_json(&self, _path: &str) -> Result<Value, SiteError> {
            std::future::pending().await
        }
    }

    /// 所有资源都返回 500
    struct FailingFetcher;

    impl ResourceFetcher for FailingFetcher {
        async fn fetch_json(&self, path: &str) -> Result<Value, SiteError> {
            Err(SiteError::Status {
                path: path.to_string(),
                status: 500,
            })
        }
    }

    fn manager(payload: Value) -> PageManager<ConstFetcher> {
        PageManager::from_config(ConstFetcher(payload), &SiteConfig::default()).expect("manager")
    }

    #[tokio::test]
    async fn malformed_payloads_render_unavailable_notice_per_section() {
        let mut page = manager(serde_json::json!({"unexpected": true}));
        let mut doc = PageDocument::landing();
        let report = page.init(&mut doc).await;

        assert!(report.success);
        assert!(report.rendered.is_empty());
        assert_eq!(report.unavailable, Section::ALL.to_vec());
        let notice = &page.ui().messages().section_unavailable;
        for section in Section::ALL {
            assert!(doc.container_html(section.container_id()).contains(notice.as_str()));
        }
    }

    #[tokio::test]
    async fn fade_in_reveals_and_unobserves_section() {
        let mut page = manager(serde_json::json!([]));
        let mut doc = PageDocument::landing();
        page.init(&mut doc).await;

        assert_eq!(doc.style("features", "opacity"), Some("0"));
        assert!(doc.observed(ObserverKind::FadeIn).contains(&"features".to_string()));

        page.handle_event(
            &mut doc,
            &UiEvent::Intersection {
                kind: ObserverKind::FadeIn,
                entries: vec![IntersectionEntry::visible("features")],
            },
        );
        assert_eq!(doc.style("features", "opacity"), Some("1"));
        assert_eq!(doc.style("features", "transform"), Some("translateY(0)"));
        assert!(!doc.observed(ObserverKind::FadeIn).contains(&"features".to_string()));
        assert_eq!(doc.style("tech", "opacity"), Some("0"));
    }

    #[tokio::test]
    async fn click_events_route_to_navigation() {
        let mut page = manager(serde_json::json!([]));
        let mut doc = PageDocument::landing();
        page.init(&mut doc).await;

        let outcome = page.handle_event(
            &mut doc,
            &UiEvent::Click(ClickTarget::Anchor("#contact".into())),
        );
        assert!(outcome.default_prevented);
        assert_eq!(doc.scrolls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn placeholders_fill_every_container_while_loading() {
        let cfg = SiteConfig::default();
        let mut page = PageManager::from_config(HangingFetcher, &cfg).expect("manager");
        let mut doc = PageDocument::landing();

        let pending = tokio::time::timeout(Duration::from_millis(50), page.init(&mut doc)).await;
        assert!(pending.is_err(), "load should still be in flight");
        assert!(page.state().is_loading());

        for section in Section::ALL {
            let html = doc.container_html(section.container_id());
            assert!(html.contains("loading-placeholder"), "{section:?}: {html}");
            assert!(html.contains(cfg.messages.loading.as_str()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn resize_listener_is_registered_and_debounced() {
        let mut page = PageManager::from_config(FailingFetcher, &SiteConfig::default())
            .expect("manager");
        let mut doc = PageDocument::landing();
        let report = page.init(&mut doc).await;

        assert!(!report.success);
        assert!(doc.listeners().contains(&Listener::Resize));

        for _ in 0..5 {
            let outcome = page.handle_event(&mut doc, &UiEvent::Resize);
            assert!(!outcome.default_prevented);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(page.resize.is_pending());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!page.resize.is_pending());
    }
}
