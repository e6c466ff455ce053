use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::SiteError;

/// 默认配置文件名（不存在时全部使用内置默认值）
pub const DEFAULT_CONFIG_FILE: &str = "site.toml";

/// 数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 数据基地址：`http(s)://` 开头走网络请求，否则视为本地站点目录
    #[serde(default = "DataConfig::default_base_url")]
    pub base_url: String,
    /// 产品特性数据路径
    #[serde(default = "DataConfig::default_features_path")]
    pub features_path: String,
    /// 技术优势数据路径
    #[serde(default = "DataConfig::default_tech_advantages_path")]
    pub tech_advantages_path: String,
    /// 应用场景数据路径
    #[serde(default = "DataConfig::default_use_cases_path")]
    pub use_cases_path: String,
    /// 服务模式数据路径
    #[serde(default = "DataConfig::default_service_model_path")]
    pub service_model_path: String,
    /// 单次请求超时（秒），0 表示不设超时
    #[serde(default = "DataConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl DataConfig {
    fn default_base_url() -> String {
        ".".to_string()
    }

    fn default_features_path() -> String {
        "data/product-features.json".to_string()
    }

    fn default_tech_advantages_path() -> String {
        "data/tech-advantages.json".to_string()
    }

    fn default_use_cases_path() -> String {
        "data/use-cases.json".to_string()
    }

    fn default_service_model_path() -> String {
        "data/service-model.json".to_string()
    }

    fn default_timeout_secs() -> u64 {
        30
    }

    /// 请求超时；0 表示不设超时
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// 基地址是否为远程 HTTP 地址
    pub fn is_remote(&self) -> bool {
        let base = self.base_url.trim();
        base.starts_with("http://") || base.starts_with("https://")
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            features_path: Self::default_features_path(),
            tech_advantages_path: Self::default_tech_advantages_path(),
            use_cases_path: Self::default_use_cases_path(),
            service_model_path: Self::default_service_model_path(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

/// 片段渲染配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// 产品特性最多展示条数
    #[serde(default = "RenderConfig::default_features_limit")]
    pub features_limit: usize,
    /// 应用场景最多展示条数
    #[serde(default = "RenderConfig::default_use_cases_limit")]
    pub use_cases_limit: usize,
    /// 特性卡片逐个淡入的间隔（毫秒）
    #[serde(default = "RenderConfig::default_feature_stagger_ms")]
    pub feature_stagger_ms: u64,
    /// 外部模板目录（留空则使用内置模板）
    #[serde(default)]
    pub template_dir: Option<String>,
}

impl RenderConfig {
    fn default_features_limit() -> usize {
        6
    }

    fn default_use_cases_limit() -> usize {
        3
    }

    fn default_feature_stagger_ms() -> u64 {
        100
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            features_limit: Self::default_features_limit(),
            use_cases_limit: Self::default_use_cases_limit(),
            feature_stagger_ms: Self::default_feature_stagger_ms(),
            template_dir: None,
        }
    }
}

/// 导航配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// 当前区块对应导航链接的样式类
    #[serde(default = "NavigationConfig::default_active_classes")]
    pub active_classes: Vec<String>,
    /// 其余导航链接的样式类
    #[serde(default = "NavigationConfig::default_inactive_classes")]
    pub inactive_classes: Vec<String>,
    /// 移动端菜单隐藏时的样式类
    #[serde(default = "NavigationConfig::default_menu_hidden_class")]
    pub menu_hidden_class: String,
    /// 区块可见比例阈值
    #[serde(default = "NavigationConfig::default_threshold")]
    pub threshold: f32,
    /// 视口内缩边距（与 IntersectionObserver 的 rootMargin 语义一致）
    #[serde(default = "NavigationConfig::default_root_margin")]
    pub root_margin: String,
}

impl NavigationConfig {
    fn default_active_classes() -> Vec<String> {
        vec!["text-blue-600".to_string(), "font-semibold".to_string()]
    }

    fn default_inactive_classes() -> Vec<String> {
        vec!["text-gray-600".to_string()]
    }

    fn default_menu_hidden_class() -> String {
        "hidden".to_string()
    }

    fn default_threshold() -> f32 {
        0.3
    }

    fn default_root_margin() -> String {
        "-80px 0px -50% 0px".to_string()
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            active_classes: Self::default_active_classes(),
            inactive_classes: Self::default_inactive_classes(),
            menu_hidden_class: Self::default_menu_hidden_class(),
            threshold: Self::default_threshold(),
            root_margin: Self::default_root_margin(),
        }
    }
}

/// 滚动动画与窗口事件配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// 区块淡入的可见比例阈值
    #[serde(default = "AnimationConfig::default_fade_threshold")]
    pub fade_threshold: f32,
    /// 区块淡入的视口边距
    #[serde(default = "AnimationConfig::default_fade_root_margin")]
    pub fade_root_margin: String,
    /// 窗口尺寸变化的防抖间隔（毫秒）
    #[serde(default = "AnimationConfig::default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
}

impl AnimationConfig {
    fn default_fade_threshold() -> f32 {
        0.1
    }

    fn default_fade_root_margin() -> String {
        "0px 0px -50px 0px".to_string()
    }

    fn default_resize_debounce_ms() -> u64 {
        250
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fade_threshold: Self::default_fade_threshold(),
            fade_root_margin: Self::default_fade_root_margin(),
            resize_debounce_ms: Self::default_resize_debounce_ms(),
        }
    }
}

/// 页面上所有用户可见的提示文案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// 加载中占位文案
    #[serde(default = "MessagesConfig::default_loading")]
    pub loading: String,
    /// 服务模式表格加载中文案
    #[serde(default = "MessagesConfig::default_service_loading")]
    pub service_loading: String,
    /// 整体加载失败时产品特性区块的静态提示
    #[serde(default = "MessagesConfig::default_features_unavailable")]
    pub features_unavailable: String,
    /// 单个区块数据缺失时的提示
    #[serde(default = "MessagesConfig::default_section_unavailable")]
    pub section_unavailable: String,
}

impl MessagesConfig {
    fn default_loading() -> String {
        "加载中...".to_string()
    }

    fn default_service_loading() -> String {
        "服务模式数据加载中...".to_string()
    }

    fn default_features_unavailable() -> String {
        "内容暂时无法加载，请稍后刷新页面重试。".to_string()
    }

    fn default_section_unavailable() -> String {
        "该部分内容暂时无法显示。".to_string()
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            loading: Self::default_loading(),
            service_loading: Self::default_service_loading(),
            features_unavailable: Self::default_features_unavailable(),
            section_unavailable: Self::default_section_unavailable(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
    /// 日志格式（compact / full）
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }

    fn default_format() -> String {
        "full".to_string()
    }

    /// 未设置 RUST_LOG 时使用的过滤指令
    pub fn filter_directive(&self) -> String {
        format!("landing_render={}", self.level.trim())
    }

    pub fn is_compact(&self) -> bool {
        self.format.trim().eq_ignore_ascii_case("compact")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            format: Self::default_format(),
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 预渲染页面的输出路径
    #[serde(default = "OutputConfig::default_path")]
    pub path: String,
    /// 页面标题
    #[serde(default = "OutputConfig::default_title")]
    pub title: String,
}

impl OutputConfig {
    fn default_path() -> String {
        "dist/index.html".to_string()
    }

    fn default_title() -> String {
        "产品介绍".to_string()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            title: Self::default_title(),
        }
    }
}

/// 站点配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl SiteConfig {
    /// 从配置文件加载配置，支持环境变量覆盖
    ///
    /// 配置文件可缺省；环境变量形如 `SITE_DATA__BASE_URL`。
    pub fn load(path: Option<&Path>) -> Result<Self, SiteError> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let builder = ConfigBuilder::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix("SITE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(builder.try_deserialize()?)
    }

    /// 从 TOML 文本解析配置（缺省字段取默认值）
    pub fn from_toml_str(text: &str) -> Result<Self, SiteError> {
        let builder = ConfigBuilder::builder()
            .add_source(File::from_str(text, config::FileFormat::Toml))
            .build()?;
        Ok(builder.try_deserialize()?)
    }

    /// 获取输出文件路径
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output.path)
    }
}
