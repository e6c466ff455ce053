//! 可观察 UI 表面
//!
//! 把页面脚本依赖的 DOM 能力收敛为一个 trait：
//! - 按 id 查询/修改元素（内容、样式类、内联样式、滚动）；
//! - 查询 `section[id]`、`a[href^="#"]`、`nav a[href^="#"]` 等集合；
//! - 以 `Listener` 声明需要的事件源（点击 / 可见性 / 窗口尺寸），
//!   宿主再把对应的 `UiEvent` 回送给 `PageManager::handle_event`。
//!
//! 所有修改方法在目标缺失时静默返回 `false`，不视为错误。

mod document;

pub use document::{LANDING_SECTIONS, PageDocument, PageDocumentBuilder};

/// 可见性观察器的种类（同一页面上两类观察器相互独立）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserverKind {
    /// 导航高亮：追踪当前可见区块
    ActiveSection,
    /// 区块淡入动画
    FadeIn,
}

/// 可见性观察参数（与 IntersectionObserver 的 threshold / rootMargin 对应）
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f32,
    pub root_margin: String,
}

/// 点击事件源
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    /// 移动端菜单按钮
    MenuToggle,
    /// 页内锚点链接（携带 href，如 `#features`）
    Anchor(String),
}

/// 页面向宿主注册的事件监听
#[derive(Debug, Clone, PartialEq)]
pub enum Listener {
    Click(ClickTarget),
    Intersection {
        kind: ObserverKind,
        options: ObserverOptions,
        targets: Vec<String>,
    },
    Resize,
}

/// 单个元素的可见性变化
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target_id: String,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn visible(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            is_intersecting: true,
        }
    }

    pub fn hidden(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            is_intersecting: false,
        }
    }
}

/// 宿主回送给页面的事件
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click(ClickTarget),
    /// 同一批次内的多个可见性变化
    Intersection {
        kind: ObserverKind,
        entries: Vec<IntersectionEntry>,
    },
    Resize,
}

/// 事件处理结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// 是否阻止浏览器默认行为（如锚点跳转）
    pub default_prevented: bool,
}

impl EventOutcome {
    pub fn prevented() -> Self {
        Self {
            default_prevented: true,
        }
    }
}

/// DOM 能力抽象
pub trait UiSurface {
    fn has_element(&self, id: &str) -> bool;

    fn set_inner_html(&mut self, id: &str, html: &str) -> bool;

    fn has_class(&self, id: &str, class: &str) -> bool;

    fn add_class(&mut self, id: &str, class: &str) -> bool;

    fn remove_class(&mut self, id: &str, class: &str) -> bool;

    /// 切换样式类；返回切换后是否持有该类（目标缺失时为 `false`）
    fn toggle_class(&mut self, id: &str, class: &str) -> bool {
        if !self.has_element(id) {
            return false;
        }
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            true
        }
    }

    fn set_style(&mut self, id: &str, property: &str, value: &str) -> bool;

    /// 平滑滚动到元素（`scrollIntoView({ behavior: 'smooth' })`）
    fn scroll_to(&mut self, id: &str) -> bool;

    /// `section[id]`，按文档顺序
    fn section_ids(&self) -> Vec<String>;

    /// 页面上所有 `a[href^="#"]` 的 href
    fn anchor_hrefs(&self) -> Vec<String>;

    /// `nav a[href^="#"]` 的 href
    fn nav_link_hrefs(&self) -> Vec<String>;

    /// 修改 href 匹配的导航链接样式
    fn set_link_classes(&mut self, href: &str, add: &[String], remove: &[String]) -> bool;

    fn register(&mut self, listener: Listener);

    /// 停止观察某个元素
    fn unobserve(&mut self, kind: ObserverKind, target_id: &str);
}
