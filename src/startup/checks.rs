use crate::config::SiteConfig;
use crate::error::SiteError;
use std::fs;
use std::path::Path;

/// 执行启动检查
///
/// 1. 检查并创建输出目录
/// 2. 检查本地数据目录 / 外部模板目录（仅告警，不阻断渲染）
pub async fn run_startup_checks(config: &SiteConfig) -> Result<(), SiteError> {
    tracing::info!("🔍 开始执行启动检查...");

    ensure_output_folder(&config.output_path())?;

    if !config.data.is_remote() {
        check_local_data(config);
    }

    if let Some(dir) = config.render.template_dir.as_deref() {
        if Path::new(dir).is_dir() {
            tracing::info!("✅ 外部模板目录: {}", dir);
        } else {
            tracing::warn!("⚠️ 外部模板目录不存在，将使用内置模板: {}", dir);
        }
    }

    tracing::info!("✅ 启动检查完成");
    Ok(())
}

/// 确保输出文件所在目录存在
fn ensure_output_folder(output: &Path) -> Result<(), SiteError> {
    let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    if !parent.exists() {
        tracing::warn!("📁 未找到输出目录，正在创建: {:?}", parent);
        fs::create_dir_all(parent)
            .map_err(|e| SiteError::Io(format!("创建输出目录失败: {e}")))?;
        tracing::info!("✅ 输出目录创建成功");
    }

    Ok(())
}

/// 本地数据源缺文件时只告警：缺失的区块会在渲染阶段显示提示
fn check_local_data(config: &SiteConfig) {
    let root = Path::new(config.data.base_url.trim());
    for rel in [
        &config.data.features_path,
        &config.data.tech_advantages_path,
        &config.data.use_cases_path,
        &config.data.service_model_path,
    ] {
        let path = root.join(rel);
        if !path.is_file() {
            tracing::warn!("⚠️ 数据文件不存在: {:?}", path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_without_parent_needs_no_folder() {
        assert!(ensure_output_folder(Path::new("index.html")).is_ok());
    }

    #[test]
    fn creates_missing_output_folder() {
        let dir = std::env::temp_dir().join(format!(
            "landing-render-startup-{}",
            std::process::id()
        ));
        let out = dir.join("nested").join("index.html");
        ensure_output_folder(&out).expect("create folder");
        assert!(dir.join("nested").is_dir());
        let _ = fs::remove_dir_all(&dir);
    }
}
