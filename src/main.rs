//! 落地页预渲染工具：加载四份 JSON 数据，按页面脚本的流程渲染到内存文档，
//! 再输出完整的 HTML 页面。
//!
//! 数据加载失败不会导致进程失败：缺失的区块会带着提示文案输出。

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use landing_render::startup::run_startup_checks;
use landing_render::{PageDocument, PageManager, SiteConfig, SiteError, SiteFetcher};

#[tokio::main]
async fn main() {
    let args = Args::parse(std::env::args().skip(1).collect());
    if args.help {
        print_help();
        return;
    }

    let mut config = match SiteConfig::load(args.config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("配置加载失败: {e}");
            std::process::exit(1);
        }
    };
    if let Some(base) = args.base_url {
        config.data.base_url = base;
    }
    if let Some(out) = args.out_path {
        config.output.path = out.display().to_string();
    }

    init_logging(&config);

    if let Err(e) = run(&config).await {
        tracing::error!("渲染失败: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(config: &SiteConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter_directive().into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = if config.logging.is_compact() {
        builder.compact().try_init()
    } else {
        builder.try_init()
    };
}

async fn run(config: &SiteConfig) -> Result<(), SiteError> {
    run_startup_checks(config).await?;

    let fetcher = SiteFetcher::from_config(&config.data)?;
    tracing::info!("数据源: {}", fetcher.describe());

    let mut page = PageManager::from_config(fetcher, config)?;
    let mut doc = PageDocument::landing();
    let report = page.init(&mut doc).await;

    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let html = page
        .ui()
        .render_page(&doc, &config.output.title, &generated_at)?;

    let out_path = config.output_path();
    fs::write(&out_path, html)?;

    tracing::info!(
        "已写入: {:?}（成功渲染 {} 个区块，{} 个区块显示提示）",
        out_path,
        report.rendered.len(),
        report.unavailable.len()
    );
    if !report.success {
        tracing::warn!("全部数据加载失败，页面仅包含静态提示");
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
struct Args {
    help: bool,
    config_path: Option<PathBuf>,
    base_url: Option<String>,
    out_path: Option<PathBuf>,
}

impl Args {
    fn parse(argv: Vec<String>) -> Self {
        let mut args = Self::default();

        let mut it = argv.into_iter();
        while let Some(a) = it.next() {
            match a.as_str() {
                "-h" | "--help" => args.help = true,
                "--config" => {
                    args.config_path = it.next().map(PathBuf::from);
                }
                "--base-url" => {
                    args.base_url = it.next();
                }
                "--out" => {
                    args.out_path = it.next().map(PathBuf::from);
                }
                _ => {}
            }
        }
        args
    }
}

fn print_help() {
    println!(
        r#"landing-render（落地页预渲染工具）

用法：
  landing-render --base-url ./site --out dist/index.html

常用参数：
  --config PATH        配置文件（默认 site.toml，可缺省）
  --base-url URL|DIR   数据基地址：http(s) 地址或本地站点目录（覆盖 data.base_url）
  --out PATH           输出 HTML 路径（覆盖 output.path）
  -h, --help           显示帮助

环境变量：
  SITE_DATA__BASE_URL 等   覆盖配置文件中的同名字段
  RUST_LOG                 日志过滤（默认取 logging.level）
"#
    );
}
