use std::future::Future;
use std::path::{Component, Path, PathBuf};

use reqwest::{Client, Url};
use serde_json::Value;

use crate::config::DataConfig;
use crate::error::SiteError;

/// JSON 资源获取能力
///
/// 实现只负责“取到并解析”，失败一律以 `SiteError` 返回；
/// 软失败策略由 `DataLoader` 统一处理。
pub trait ResourceFetcher: Send + Sync {
    fn fetch_json(&self, path: &str) -> impl Future<Output = Result<Value, SiteError>> + Send;
}

/// 基于 reqwest 的远程获取：相对路径拼接到基地址上
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str, client: Client) -> Result<Self, SiteError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base)
            .map_err(|e| SiteError::Config(format!("无效的数据基地址 '{base_url}': {e}")))?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn resolve(&self, path: &str) -> Result<Url, SiteError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| SiteError::Internal(format!("拼接资源地址失败 '{path}': {e}")))
    }
}

impl ResourceFetcher for HttpFetcher {
    async fn fetch_json(&self, path: &str) -> Result<Value, SiteError> {
        let url = self.resolve(path)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SiteError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// 本地站点目录获取：用于离线预渲染
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, SiteError> {
        let rel = Path::new(path.trim_start_matches('/'));
        // 仅允许站点目录内的相对路径
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(SiteError::Io(format!("非法的资源路径: {path}")));
        }
        Ok(self.root.join(rel))
    }
}

impl ResourceFetcher for FsFetcher {
    async fn fetch_json(&self, path: &str) -> Result<Value, SiteError> {
        let file = self.resolve(path)?;
        tracing::debug!("读取本地资源 {:?}", file);
        let body = tokio::fs::read_to_string(&file).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// 按配置选择的数据源
#[derive(Debug, Clone)]
pub enum SiteFetcher {
    Http(HttpFetcher),
    Fs(FsFetcher),
}

impl SiteFetcher {
    pub fn from_config(cfg: &DataConfig) -> Result<Self, SiteError> {
        if cfg.is_remote() {
            let client = crate::http::client_with_timeout(cfg.timeout())?;
            Ok(Self::Http(HttpFetcher::new(&cfg.base_url, client)?))
        } else {
            Ok(Self::Fs(FsFetcher::new(cfg.base_url.trim())))
        }
    }

    /// 数据源描述（用于日志）
    pub fn describe(&self) -> String {
        match self {
            Self::Http(f) => f.base().to_string(),
            Self::Fs(f) => f.root().display().to_string(),
        }
    }
}

impl ResourceFetcher for SiteFetcher {
    async fn fetch_json(&self, path: &str) -> Result<Value, SiteError> {
        match self {
            Self::Http(f) => f.fetch_json(path).await,
            Self::Fs(f) => f.fetch_json(path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_fetcher_joins_relative_paths_under_base() {
        let client = Client::new();
        let fetcher =
            HttpFetcher::new("https://example.com/site", client).expect("valid base url");
        let url = fetcher
            .resolve("data/product-features.json")
            .expect("join");
        assert_eq!(
            url.as_str(),
            "https://example.com/site/data/product-features.json"
        );
        let url = fetcher.resolve("/data/use-cases.json").expect("join");
        assert_eq!(url.as_str(), "https://example.com/site/data/use-cases.json");
    }

    #[test]
    fn http_fetcher_rejects_invalid_base() {
        let err = HttpFetcher::new("not a url", Client::new()).expect_err("invalid base");
        assert!(matches!(err, SiteError::Config(_)));
    }

    #[test]
    fn fs_fetcher_rejects_parent_traversal() {
        let fetcher = FsFetcher::new("site");
        assert!(fetcher.resolve("../secret.json").is_err());
        assert_eq!(
            fetcher.resolve("data/use-cases.json").expect("inside root"),
            PathBuf::from("site/data/use-cases.json")
        );
    }

    #[tokio::test]
    async fn fs_fetcher_missing_file_is_io_error() {
        let fetcher = FsFetcher::new("definitely-missing-site-root");
        let err = fetcher
            .fetch_json("data/product-features.json")
            .await
            .expect_err("missing file");
        assert!(matches!(err, SiteError::Io(_)));
    }

    #[test]
    fn site_fetcher_picks_source_from_config() {
        let local = DataConfig::default();
        assert!(matches!(
            SiteFetcher::from_config(&local).expect("fs"),
            SiteFetcher::Fs(_)
        ));

        let remote = DataConfig {
            base_url: "http://127.0.0.1:9/".to_string(),
            ..DataConfig::default()
        };
        assert!(matches!(
            SiteFetcher::from_config(&remote).expect("http"),
            SiteFetcher::Http(_)
        ));
    }
}
