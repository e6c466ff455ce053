pub mod fetcher;
pub mod loader;
pub mod models;

pub use fetcher::{FsFetcher, HttpFetcher, ResourceFetcher, SiteFetcher};
pub use loader::{DataLoader, DataPaths};
pub use models::{DeliveryItem, Feature, ServiceModel, TechAdvantage, UseCase, records_from};

/// 页面上由数据驱动的四个内容区块
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Features,
    TechAdvantages,
    UseCases,
    ServiceModel,
}

impl Section {
    /// 加载顺序
    pub const ALL: [Section; 4] = [
        Section::Features,
        Section::TechAdvantages,
        Section::UseCases,
        Section::ServiceModel,
    ];

    /// 区块在数据集合中的键名（列表类载荷也以此作为数组字段名）
    pub fn key(self) -> &'static str {
        match self {
            Section::Features => "features",
            Section::TechAdvantages => "techAdvantages",
            Section::UseCases => "useCases",
            Section::ServiceModel => "serviceModel",
        }
    }

    /// 所在 `<section>` 的 id（亦即导航锚点）
    pub fn anchor_id(self) -> &'static str {
        match self {
            Section::Features => "features",
            Section::TechAdvantages => "tech",
            Section::UseCases => "use-cases",
            Section::ServiceModel => "service",
        }
    }

    /// 按 `<section>` id 反查；不承载数据的区块（首页、联系我们）返回 `None`
    pub fn from_anchor(id: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.anchor_id() == id)
    }

    /// 渲染目标容器 id
    pub fn container_id(self) -> &'static str {
        match self {
            Section::Features => "features-grid",
            Section::TechAdvantages => "tech-preview",
            Section::UseCases => "use-cases-grid",
            Section::ServiceModel => "service-table-container",
        }
    }
}
