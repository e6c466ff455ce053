use once_cell::sync::OnceCell;
use reqwest::Client;
use std::time::Duration;

use crate::error::SiteError;

/// 全局复用的 HTTP Client（统一连接池/Keep-Alive），避免每次加载重复创建。
///
/// 说明：
/// - 按 timeout 维度拆分 client：不设超时的默认 client 全局只有一个；
/// - 自定义超时的 client 由调用方持有（`HttpFetcher` 生命周期内复用）。
static CLIENT_DEFAULT: OnceCell<Client> = OnceCell::new();

/// 默认配置的 HTTP Client（不额外设置 timeout）。
pub fn client_default() -> Result<&'static Client, SiteError> {
    CLIENT_DEFAULT
        .get_or_try_init(|| Client::builder().build())
        .map_err(SiteError::from)
}

/// 按需构建带超时的 HTTP Client；`None` 时返回全局默认 client 的克隆。
pub fn client_with_timeout(timeout: Option<Duration>) -> Result<Client, SiteError> {
    match timeout {
        Some(t) => Ok(Client::builder().timeout(t).build()?),
        None => client_default().cloned(),
    }
}
