//! 导航交互：移动端菜单、页内锚点平滑滚动、当前区块高亮
//!
//! 三个子功能各自独立：对应的页面元素缺失时静默跳过。

use crate::config::NavigationConfig;
use crate::surface::{
    ClickTarget, EventOutcome, IntersectionEntry, Listener, ObserverKind, ObserverOptions,
    UiSurface,
};
use crate::utils::scroll_to_element;

pub const MOBILE_MENU_BUTTON_ID: &str = "mobile-menu-btn";
pub const MOBILE_MENU_ID: &str = "mobile-menu";

#[derive(Debug, Clone)]
pub struct Navigation {
    config: NavigationConfig,
}

impl Navigation {
    pub fn new(config: NavigationConfig) -> Self {
        Self { config }
    }

    pub fn init<S: UiSurface + ?Sized>(&self, surface: &mut S) {
        self.setup_mobile_menu(surface);
        self.setup_smooth_scroll(surface);
        self.setup_active_section_tracking(surface);
    }

    fn setup_mobile_menu<S: UiSurface + ?Sized>(&self, surface: &mut S) {
        if !surface.has_element(MOBILE_MENU_BUTTON_ID) || !surface.has_element(MOBILE_MENU_ID) {
            return;
        }
        surface.register(Listener::Click(ClickTarget::MenuToggle));
    }

    fn setup_smooth_scroll<S: UiSurface + ?Sized>(&self, surface: &mut S) {
        for href in surface.anchor_hrefs() {
            surface.register(Listener::Click(ClickTarget::Anchor(href)));
        }
    }

    fn setup_active_section_tracking<S: UiSurface + ?Sized>(&self, surface: &mut S) {
        let sections = surface.section_ids();
        if sections.is_empty() || surface.nav_link_hrefs().is_empty() {
            return;
        }
        surface.register(Listener::Intersection {
            kind: ObserverKind::ActiveSection,
            options: ObserverOptions {
                threshold: self.config.threshold,
                root_margin: self.config.root_margin.clone(),
            },
            targets: sections,
        });
    }

    /// 移动端菜单当前是否展开
    pub fn is_menu_open<S: UiSurface + ?Sized>(&self, surface: &S) -> bool {
        surface.has_element(MOBILE_MENU_ID)
            && !surface.has_class(MOBILE_MENU_ID, &self.config.menu_hidden_class)
    }

    pub fn handle_click<S: UiSurface + ?Sized>(
        &self,
        surface: &mut S,
        target: &ClickTarget,
    ) -> EventOutcome {
        match target {
            ClickTarget::MenuToggle => {
                surface.toggle_class(MOBILE_MENU_ID, &self.config.menu_hidden_class);
                EventOutcome::default()
            }
            ClickTarget::Anchor(href) => {
                // 目标不存在时交给浏览器默认处理
                if !scroll_to_element(surface, href) {
                    return EventOutcome::default();
                }
                if self.is_menu_open(surface) {
                    surface.add_class(MOBILE_MENU_ID, &self.config.menu_hidden_class);
                }
                EventOutcome::prevented()
            }
        }
    }

    /// 同一批次中逐条处理，后处理的条目覆盖先前的高亮
    pub fn handle_intersections<S: UiSurface + ?Sized>(
        &self,
        surface: &mut S,
        entries: &[IntersectionEntry],
    ) {
        let links = surface.nav_link_hrefs();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let active = format!("#{}", entry.target_id);
            for href in &links {
                if *href == active {
                    surface.set_link_classes(
                        href,
                        &self.config.active_classes,
                        &self.config.inactive_classes,
                    );
                } else {
                    surface.set_link_classes(
                        href,
                        &self.config.inactive_classes,
                        &self.config.active_classes,
                    );
                }
            }
        }
    }
}
