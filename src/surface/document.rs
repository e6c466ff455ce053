use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::features::data::Section;

use super::{Listener, ObserverKind, UiSurface};

/// 落地页的标准区块（id, 导航文字）
pub const LANDING_SECTIONS: [(&str, &str); 6] = [
    ("home", "首页"),
    ("features", "产品特性"),
    ("tech", "技术优势"),
    ("use-cases", "应用场景"),
    ("service", "服务模式"),
    ("contact", "联系我们"),
];

#[derive(Debug, Clone, Default, PartialEq)]
struct Element {
    classes: BTreeSet<String>,
    style: BTreeMap<String, String>,
    inner_html: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Link {
    href: String,
    in_nav: bool,
    classes: BTreeSet<String>,
}

/// 内存中的页面文档
///
/// 既是测试替身（记录所有注册的监听、滚动请求与样式变化），
/// 也是命令行预渲染时写入片段的目标文档。
#[derive(Debug, Clone, Default)]
pub struct PageDocument {
    elements: BTreeMap<String, Element>,
    sections: Vec<String>,
    links: Vec<Link>,
    listeners: Vec<Listener>,
    scrolls: Vec<String>,
    observed: HashMap<ObserverKind, Vec<String>>,
}

impl PageDocument {
    pub fn builder() -> PageDocumentBuilder {
        PageDocumentBuilder::default()
    }

    /// 标准落地页：导航、移动端菜单、六个区块与四个内容容器
    pub fn landing() -> Self {
        let mut builder = Self::builder()
            .element("mobile-menu-btn")
            .element_with_classes("mobile-menu", &["hidden"]);

        for (id, _) in LANDING_SECTIONS {
            builder = builder.section(id).nav_link(&format!("#{id}"));
        }
        for section in Section::ALL {
            builder = builder.element(section.container_id());
        }
        for (id, _) in LANDING_SECTIONS {
            builder = builder.anchor(&format!("#{id}"));
        }
        builder.anchor("#contact").build()
    }

    /// 已注册的全部监听（按注册顺序）
    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// 滚动请求记录（目标 id）
    pub fn scrolls(&self) -> &[String] {
        &self.scrolls
    }

    /// 某类观察器当前仍在观察的元素
    pub fn observed(&self, kind: ObserverKind) -> Vec<String> {
        self.observed.get(&kind).cloned().unwrap_or_default()
    }

    pub fn style(&self, id: &str, property: &str) -> Option<&str> {
        self.elements
            .get(id)
            .and_then(|el| el.style.get(property))
            .map(String::as_str)
    }

    /// 元素当前的样式类
    pub fn classes(&self, id: &str) -> Vec<String> {
        self.elements
            .get(id)
            .map(|el| el.classes.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// href 对应的第一个链接的样式类
    pub fn link_classes(&self, href: &str) -> Vec<String> {
        self.links
            .iter()
            .find(|l| l.href == href)
            .map(|l| l.classes.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// 内容容器的当前 HTML（容器缺失时为空串）
    pub fn container_html(&self, id: &str) -> &str {
        self.elements
            .get(id)
            .map(|el| el.inner_html.as_str())
            .unwrap_or("")
    }
}

impl UiSurface for PageDocument {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn set_inner_html(&mut self, id: &str, html: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.inner_html = html.to_string();
                true
            }
            None => false,
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|el| el.classes.contains(class))
    }

    fn add_class(&mut self, id: &str, class: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.classes.insert(class.to_string());
                true
            }
            None => false,
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.classes.remove(class);
                true
            }
            None => false,
        }
    }

    fn set_style(&mut self, id: &str, property: &str, value: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.style.insert(property.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    fn scroll_to(&mut self, id: &str) -> bool {
        if !self.has_element(id) {
            return false;
        }
        self.scrolls.push(id.to_string());
        true
    }

    fn section_ids(&self) -> Vec<String> {
        self.sections.clone()
    }

    fn anchor_hrefs(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.links
            .iter()
            .filter(|l| l.href.starts_with('#'))
            .filter(|l| seen.insert(l.href.clone()))
            .map(|l| l.href.clone())
            .collect()
    }

    fn nav_link_hrefs(&self) -> Vec<String> {
        self.links
            .iter()
            .filter(|l| l.in_nav && l.href.starts_with('#'))
            .map(|l| l.href.clone())
            .collect()
    }

    fn set_link_classes(&mut self, href: &str, add: &[String], remove: &[String]) -> bool {
        let mut hit = false;
        for link in self.links.iter_mut().filter(|l| l.in_nav && l.href == href) {
            for class in remove {
                link.classes.remove(class);
            }
            for class in add {
                link.classes.insert(class.clone());
            }
            hit = true;
        }
        hit
    }

    fn register(&mut self, listener: Listener) {
        if let Listener::Intersection { kind, targets, .. } = &listener {
            let observed = self.observed.entry(*kind).or_default();
            for t in targets {
                if !observed.contains(t) {
                    observed.push(t.clone());
                }
            }
        }
        self.listeners.push(listener);
    }

    fn unobserve(&mut self, kind: ObserverKind, target_id: &str) {
        if let Some(observed) = self.observed.get_mut(&kind) {
            observed.retain(|t| t != target_id);
        }
    }
}

/// `PageDocument` 构建器
#[derive(Debug, Default)]
pub struct PageDocumentBuilder {
    doc: PageDocument,
}

impl PageDocumentBuilder {
    pub fn element(self, id: &str) -> Self {
        self.element_with_classes(id, &[])
    }

    pub fn element_with_classes(mut self, id: &str, classes: &[&str]) -> Self {
        let el = self.doc.elements.entry(id.to_string()).or_default();
        el.classes.extend(classes.iter().map(|c| c.to_string()));
        self
    }

    /// `<section id=...>`，同时可按 id 寻址
    pub fn section(mut self, id: &str) -> Self {
        if !self.doc.sections.iter().any(|s| s == id) {
            self.doc.sections.push(id.to_string());
        }
        self.element(id)
    }

    /// `<nav>` 内的链接
    pub fn nav_link(mut self, href: &str) -> Self {
        self.doc.links.push(Link {
            href: href.to_string(),
            in_nav: true,
            classes: BTreeSet::new(),
        });
        self
    }

    /// 导航以外的链接
    pub fn anchor(mut self, href: &str) -> Self {
        self.doc.links.push(Link {
            href: href.to_string(),
            in_nav: false,
            classes: BTreeSet::new(),
        });
        self
    }

    pub fn build(self) -> PageDocument {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ObserverOptions;

    #[test]
    fn landing_exposes_all_anchors() {
        let doc = PageDocument::landing();
        for section in Section::ALL {
            let id = section.container_id();
            assert!(doc.has_element(id), "missing container {id}");
        }
        assert!(doc.has_element("mobile-menu-btn"));
        assert!(doc.has_class("mobile-menu", "hidden"));
        assert_eq!(doc.section_ids().len(), LANDING_SECTIONS.len());
        assert_eq!(doc.nav_link_hrefs().len(), LANDING_SECTIONS.len());
        // 重复的 #contact 只出现一次
        assert_eq!(doc.anchor_hrefs().len(), LANDING_SECTIONS.len());
    }

    #[test]
    fn mutations_on_missing_targets_are_noops() {
        let mut doc = PageDocument::builder().element("a").build();
        assert!(!doc.set_inner_html("missing", "<p></p>"));
        assert!(!doc.add_class("missing", "x"));
        assert!(!doc.toggle_class("missing", "x"));
        assert!(!doc.scroll_to("missing"));
        assert!(!doc.set_link_classes("#missing", &[], &[]));
        assert!(doc.scrolls().is_empty());
    }

    #[test]
    fn toggle_class_flips_state() {
        let mut doc = PageDocument::builder()
            .element_with_classes("menu", &["hidden"])
            .build();
        assert!(!doc.toggle_class("menu", "hidden"));
        assert!(!doc.has_class("menu", "hidden"));
        assert!(doc.toggle_class("menu", "hidden"));
        assert!(doc.has_class("menu", "hidden"));
    }

    #[test]
    fn unobserve_removes_only_that_target() {
        let mut doc = PageDocument::builder().section("a").section("b").build();
        doc.register(Listener::Intersection {
            kind: ObserverKind::FadeIn,
            options: ObserverOptions {
                threshold: 0.1,
                root_margin: "0px".into(),
            },
            targets: vec!["a".into(), "b".into()],
        });
        doc.unobserve(ObserverKind::FadeIn, "a");
        assert_eq!(doc.observed(ObserverKind::FadeIn), vec!["b".to_string()]);
        assert!(doc.observed(ObserverKind::ActiveSection).is_empty());
    }
}
