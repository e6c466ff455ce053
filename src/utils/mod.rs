/// 尾沿防抖
pub mod debounce;

pub use debounce::Debouncer;

use crate::surface::UiSurface;

/// 平滑滚动到指定元素；`target` 可带或不带 `#` 前缀。
///
/// 目标缺失时返回 `false`。
pub fn scroll_to_element<S: UiSurface + ?Sized>(surface: &mut S, target: &str) -> bool {
    let id = target.trim_start_matches('#');
    if id.is_empty() {
        return false;
    }
    surface.scroll_to(id)
}

/// 向容器注入加载占位片段
pub fn show_loading<S: UiSurface + ?Sized>(
    surface: &mut S,
    container_id: &str,
    placeholder: &str,
) -> bool {
    surface.set_inner_html(container_id, placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PageDocument;

    #[test]
    fn scroll_to_element_accepts_hash_prefix() {
        let mut doc = PageDocument::builder().section("features").build();
        assert!(scroll_to_element(&mut doc, "#features"));
        assert!(scroll_to_element(&mut doc, "features"));
        assert!(!scroll_to_element(&mut doc, "#"));
        assert!(!scroll_to_element(&mut doc, "#missing"));
        assert_eq!(doc.scrolls().len(), 2);
        assert!(doc.scrolls().iter().all(|id| id == "features"));
    }

    #[test]
    fn show_loading_skips_missing_container() {
        let mut doc = PageDocument::builder().element("features-grid").build();
        assert!(show_loading(&mut doc, "features-grid", "<p>加载中</p>"));
        assert!(!show_loading(&mut doc, "tech-preview", "<p>加载中</p>"));
        assert_eq!(doc.container_html("features-grid"), "<p>加载中</p>");
    }
}
