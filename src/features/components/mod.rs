//! 片段渲染
//!
//! 每种记录对应一个 minijinja 模板，渲染结果是可直接注入容器的 HTML 片段：
//! - 模板内置于二进制（`templates/`），也可通过 `render.template_dir` 用同名文件覆盖；
//! - 统一开启 HTML 自动转义，数据中的文本不会破坏页面结构；
//! - 渲染函数不修改输入，同样的输入总是得到逐字节相同的输出。

use std::path::Path;

use minijinja::{AutoEscape, Environment, context};
use serde::Serialize;
use serde_json::Value;

use crate::config::{MessagesConfig, RenderConfig};
use crate::error::SiteError;
use crate::surface::{LANDING_SECTIONS, PageDocument};

use super::data::{Feature, Section, ServiceModel, TechAdvantage, UseCase};

const FEATURE_CARD: &str = "feature_card.html";
const TECH_ITEM: &str = "tech_item.html";
const USE_CASE_CARD: &str = "use_case_card.html";
const SERVICE_TABLE: &str = "service_table.html";
const SERVICE_TABLE_LOADING: &str = "service_table_loading.html";
const LOADING: &str = "loading.html";
const SECTION_UNAVAILABLE: &str = "section_unavailable.html";
const PAGE: &str = "page.html";

const EMBEDDED_TEMPLATES: [(&str, &str); 8] = [
    (
        FEATURE_CARD,
        include_str!("../../../templates/fragments/feature_card.html"),
    ),
    (
        TECH_ITEM,
        include_str!("../../../templates/fragments/tech_item.html"),
    ),
    (
        USE_CASE_CARD,
        include_str!("../../../templates/fragments/use_case_card.html"),
    ),
    (
        SERVICE_TABLE,
        include_str!("../../../templates/fragments/service_table.html"),
    ),
    (
        SERVICE_TABLE_LOADING,
        include_str!("../../../templates/fragments/service_table_loading.html"),
    ),
    (
        LOADING,
        include_str!("../../../templates/fragments/loading.html"),
    ),
    (
        SECTION_UNAVAILABLE,
        include_str!("../../../templates/fragments/section_unavailable.html"),
    ),
    (PAGE, include_str!("../../../templates/page.html")),
];

#[derive(Debug, Serialize)]
struct NavLinkView {
    href: String,
    label: &'static str,
    classes: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SectionView<'a> {
    id: &'static str,
    label: &'static str,
    container: Option<&'static str>,
    html: &'a str,
}

/// 片段渲染器
#[derive(Debug)]
pub struct UiComponents {
    env: Environment<'static>,
    messages: MessagesConfig,
}

impl UiComponents {
    /// 仅使用内置模板与默认文案
    pub fn embedded() -> Result<Self, SiteError> {
        Self::build(None, MessagesConfig::default())
    }

    /// 按配置构建；`template_dir` 中存在的同名模板会覆盖内置模板
    pub fn new(render: &RenderConfig, messages: MessagesConfig) -> Result<Self, SiteError> {
        Self::build(render.template_dir.as_deref().map(Path::new), messages)
    }

    fn build(template_dir: Option<&Path>, messages: MessagesConfig) -> Result<Self, SiteError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        for (name, source) in EMBEDDED_TEMPLATES {
            let overridden = template_dir.is_some_and(|dir| dir.join(name).is_file());
            if overridden {
                tracing::debug!("使用外部模板覆盖: {}", name);
                continue;
            }
            env.add_template(name, source)?;
        }
        if let Some(dir) = template_dir {
            env.set_loader(minijinja::path_loader(dir.to_path_buf()));
        }

        Ok(Self { env, messages })
    }

    pub fn messages(&self) -> &MessagesConfig {
        &self.messages
    }

    fn render_template<T: Serialize>(&self, name: &str, ctx: T) -> Result<String, SiteError> {
        let tpl = self
            .env
            .get_template(name)
            .map_err(|e| SiteError::Template(format!("加载模板失败（{name}）: {e}")))?;
        tpl.render(ctx)
            .map_err(|e| SiteError::Template(format!("渲染模板失败（{name}）: {e}")))
    }

    /// 单张产品特性卡片
    pub fn render_feature_card(&self, feature: &Feature) -> Result<String, SiteError> {
        self.render_feature_card_with_delay(feature, None)
    }

    fn render_feature_card_with_delay(
        &self,
        feature: &Feature,
        delay_ms: Option<u64>,
    ) -> Result<String, SiteError> {
        self.render_template(FEATURE_CARD, context! { feature, delay_ms })
    }

    /// 单个技术优势条目
    pub fn render_tech_item(&self, item: &TechAdvantage) -> Result<String, SiteError> {
        self.render_template(TECH_ITEM, context! { item })
    }

    /// 单张应用场景卡片
    pub fn render_use_case_card(&self, case: &UseCase) -> Result<String, SiteError> {
        self.render_template(USE_CASE_CARD, context! { case })
    }

    /// 服务模式表格；载荷为空或缺少 `deliveryItems` 时返回“加载中”占位，而不是空表格
    pub fn render_service_table(&self, payload: Option<&Value>) -> Result<String, SiteError> {
        match payload.and_then(ServiceModel::from_payload) {
            Some(model) => self.render_template(
                SERVICE_TABLE,
                context! { items => model.delivery_items },
            ),
            None => self.render_template(
                SERVICE_TABLE_LOADING,
                context! { message => self.messages.service_loading },
            ),
        }
    }

    /// 产品特性网格：最多 `limit` 张，第 i 张带 `i × stagger_ms` 的淡入延迟
    pub fn render_features(
        &self,
        features: &[Feature],
        limit: usize,
        stagger_ms: u64,
    ) -> Result<String, SiteError> {
        let cards = features
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, f)| self.render_feature_card_with_delay(f, Some(i as u64 * stagger_ms)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards.join("\n"))
    }

    /// 技术优势列表（全部展示）
    pub fn render_tech_items(&self, items: &[TechAdvantage]) -> Result<String, SiteError> {
        let parts = items
            .iter()
            .map(|t| self.render_tech_item(t))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join("\n"))
    }

    /// 应用场景网格：最多 `limit` 张
    pub fn render_use_cases(&self, cases: &[UseCase], limit: usize) -> Result<String, SiteError> {
        let parts = cases
            .iter()
            .take(limit)
            .map(|c| self.render_use_case_card(c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join("\n"))
    }

    /// 加载中占位
    pub fn render_loading(&self) -> Result<String, SiteError> {
        self.render_template(LOADING, context! { message => self.messages.loading })
    }

    /// 区块不可用提示
    pub fn render_unavailable(&self, message: &str) -> Result<String, SiteError> {
        self.render_template(SECTION_UNAVAILABLE, context! { message })
    }

    /// 完整页面（预渲染输出）
    pub fn render_page(
        &self,
        doc: &PageDocument,
        title: &str,
        generated_at: &str,
    ) -> Result<String, SiteError> {
        let nav: Vec<NavLinkView> = LANDING_SECTIONS
            .iter()
            .map(|&(id, label)| {
                let href = format!("#{id}");
                let classes = doc.link_classes(&href);
                NavLinkView {
                    href,
                    label,
                    classes,
                }
            })
            .collect();
        let sections: Vec<SectionView<'_>> = LANDING_SECTIONS
            .iter()
            .map(|&(id, label)| {
                let container = Section::from_anchor(id).map(Section::container_id);
                SectionView {
                    id,
                    label,
                    container,
                    html: container.map(|c| doc.container_html(c)).unwrap_or(""),
                }
            })
            .collect();

        self.render_template(
            PAGE,
            context! {
                title,
                generated_at,
                version => env!("CARGO_PKG_VERSION"),
                nav,
                sections,
                menu_classes => doc.classes("mobile-menu"),
            },
        )
    }
}
