use serde_json::Value;

use crate::config::DataConfig;
use crate::state::{AppState, SiteData};

use super::Section;
use super::fetcher::ResourceFetcher;

/// 四份数据资源的相对路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub features: String,
    pub tech_advantages: String,
    pub use_cases: String,
    pub service_model: String,
}

impl DataPaths {
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Features => &self.features,
            Section::TechAdvantages => &self.tech_advantages,
            Section::UseCases => &self.use_cases,
            Section::ServiceModel => &self.service_model,
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::from(&DataConfig::default())
    }
}

impl From<&DataConfig> for DataPaths {
    fn from(cfg: &DataConfig) -> Self {
        Self {
            features: cfg.features_path.clone(),
            tech_advantages: cfg.tech_advantages_path.clone(),
            use_cases: cfg.use_cases_path.clone(),
            service_model: cfg.service_model_path.clone(),
        }
    }
}

/// 数据加载器
///
/// 两层失败策略：
/// - 单个资源的网络/状态码/解析失败在这里被记录并转换为 `None`；
/// - 某个区块数据缺失时如何展示，由渲染阶段决定。
#[derive(Debug, Clone)]
pub struct DataLoader<F> {
    fetcher: F,
    paths: DataPaths,
}

impl<F: ResourceFetcher> DataLoader<F> {
    pub fn new(fetcher: F, paths: DataPaths) -> Self {
        Self { fetcher, paths }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// 加载单个 JSON 资源；任何失败都记录日志并返回 `None`，不会向调用方传播。
    pub async fn load_json(&self, path: &str) -> Option<Value> {
        match self.fetcher.fetch_json(path).await {
            Ok(v) => Some(v),
            Err(e) if e.is_resource_failure() => {
                tracing::warn!(path, error = %e, "数据资源加载失败");
                None
            }
            Err(e) => {
                tracing::error!(path, error = %e, "数据资源地址或加载器异常");
                None
            }
        }
    }

    /// 并发加载全部四份资源，等待全部结束后一次性写入上下文。
    ///
    /// 返回值表示整体加载是否可用：只要至少一份载荷成功即为 `true`；
    /// 四份全部失败时返回 `false`，由调用方走整体失败分支。
    pub async fn load_all_data(&self, state: &mut AppState) -> bool {
        state.begin_load();
        tracing::info!("开始加载页面数据");

        let (features, tech_advantages, use_cases, service_model) = tokio::join!(
            self.load_json(&self.paths.features),
            self.load_json(&self.paths.tech_advantages),
            self.load_json(&self.paths.use_cases),
            self.load_json(&self.paths.service_model),
        );

        let data = SiteData {
            features,
            tech_advantages,
            use_cases,
            service_model,
        };
        let loaded = data.loaded_count();
        state.finish_load(data);

        tracing::info!(loaded, total = Section::ALL.len(), "页面数据加载完成");
        loaded > 0
    }
}
