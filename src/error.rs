use thiserror::Error;

/// 站点渲染统一错误类型
///
/// 说明：
/// - 数据加载阶段的错误只用于日志，最终都会被转换为空载荷（见 `DataLoader::load_json`）；
/// - 只有二进制入口的准备步骤（配置、输出文件）会把错误向外传播。
#[derive(Error, Debug)]
pub enum SiteError {
    /// 网络请求错误
    #[error("网络错误: {0}")]
    Network(String),

    /// 请求超时（包含 connect/read 等阶段）
    #[error("请求超时: {0}")]
    Timeout(String),

    /// 非 2xx 响应
    #[error("HTTP 状态异常（{status}）: {path}")]
    Status {
        /// 请求的资源路径
        path: String,
        /// 响应状态码
        status: u16,
    },

    /// JSON 解析错误
    #[error("JSON 解析错误: {0}")]
    Json(String),

    /// I/O 错误
    #[error("I/O 错误: {0}")]
    Io(String),

    /// 模板加载或渲染错误
    #[error("模板渲染错误: {0}")]
    Template(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl SiteError {
    /// 是否属于单个资源的传输/解析失败（数据加载阶段会被吞掉并记录）
    pub fn is_resource_failure(&self) -> bool {
        matches!(
            self,
            SiteError::Network(_)
                | SiteError::Timeout(_)
                | SiteError::Status { .. }
                | SiteError::Json(_)
                | SiteError::Io(_)
        )
    }
}

// =============== Error conversions for common external errors ===============

impl From<reqwest::Error> for SiteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SiteError::Timeout(err.to_string())
        } else {
            SiteError::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for SiteError {
    fn from(err: std::io::Error) -> Self {
        SiteError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::Json(err.to_string())
    }
}

impl From<minijinja::Error> for SiteError {
    fn from(err: minijinja::Error) -> Self {
        SiteError::Template(err.to_string())
    }
}

impl From<config::ConfigError> for SiteError {
    fn from(err: config::ConfigError) -> Self {
        SiteError::Config(err.to_string())
    }
}
