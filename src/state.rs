use serde_json::Value;
use std::sync::Arc;

use crate::features::data::Section;

/// 一次加载周期得到的四份原始载荷（加载失败的资源为 `None`）
///
/// 载荷只在加载周期结束时整体写入一次，之后只读。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteData {
    pub features: Option<Value>,
    pub tech_advantages: Option<Value>,
    pub use_cases: Option<Value>,
    pub service_model: Option<Value>,
}

impl SiteData {
    /// 按区块取载荷
    pub fn get(&self, section: Section) -> Option<&Value> {
        match section {
            Section::Features => self.features.as_ref(),
            Section::TechAdvantages => self.tech_advantages.as_ref(),
            Section::UseCases => self.use_cases.as_ref(),
            Section::ServiceModel => self.service_model.as_ref(),
        }
    }

    /// 成功加载的载荷数量
    pub fn loaded_count(&self) -> usize {
        Section::ALL
            .iter()
            .filter(|s| self.get(**s).is_some())
            .count()
    }
}

/// 页面级上下文：显式传入加载器与渲染流程，不使用全局可变状态
#[derive(Debug, Clone, Default)]
pub struct AppState {
    is_loading: bool,
    data: Arc<SiteData>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// 当前加载周期的数据快照
    pub fn data(&self) -> Arc<SiteData> {
        Arc::clone(&self.data)
    }

    pub(crate) fn begin_load(&mut self) {
        self.is_loading = true;
    }

    pub(crate) fn finish_load(&mut self, data: SiteData) {
        self.data = Arc::new(data);
        self.is_loading = false;
    }
}
