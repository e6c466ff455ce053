/// 统一错误处理模块
pub mod error;

/// 配置模块
pub mod config;

/// 启动检查模块
pub mod startup;

/// 功能聚合模块（数据加载 / 片段渲染 / 导航 / 页面编排）
pub mod features;

/// 页面上下文模块
pub mod state;

/// 可观察 UI 表面（DOM 能力抽象）
pub mod surface;

/// 通用工具（防抖 / 滚动 / 加载占位）
pub mod utils;

/// HTTP Client 复用工具
pub mod http;

// 导出常用类型供外部使用
pub use config::SiteConfig;
pub use error::SiteError;
pub use features::components::UiComponents;
pub use features::data::{DataLoader, Section, SiteFetcher};
pub use features::navigation::Navigation;
pub use features::page::{LoadReport, PageManager};
pub use state::{AppState, SiteData};
pub use surface::{PageDocument, UiSurface};
