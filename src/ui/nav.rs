//! Section navigation
//!
//! Buttons name their destination in a `data-scroll-target` attribute.

pub const SCROLL_TARGET_ATTR: &str = "data-scroll-target";

/// Scroll position that leaves `offset` px above a section whose top is at `section_top`
pub fn scroll_top_for(section_top: f64, offset: f64) -> f64 {
    section_top - offset
}

#[cfg(target_arch = "wasm32")]
pub use web::{bind_section_buttons, scroll_to_section};

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

    use super::{SCROLL_TARGET_ATTR, scroll_top_for};
    use crate::platform::web::{add_listener, element_by_id, query_all};

    /// Smooth-scroll to the section with `section_id`. Unknown ids are ignored.
    pub fn scroll_to_section(window: &Window, document: &Document, section_id: &str, offset: f64) {
        let Ok(section) = element_by_id::<HtmlElement>(document, section_id) else {
            log::debug!("No section #{}", section_id);
            return;
        };
        let options = ScrollToOptions::new();
        options.set_top(scroll_top_for(section.offset_top() as f64, offset));
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }

    /// Register every `[data-scroll-target]` button. Returns how many were bound.
    pub fn bind_section_buttons(window: &Window, document: &Document, offset: f64) -> usize {
        let selector = format!("[{}]", SCROLL_TARGET_ATTR);
        let buttons = query_all(document, &selector);
        for button in &buttons {
            let Some(target) = button.get_attribute(SCROLL_TARGET_ATTR) else {
                continue;
            };
            let window = window.clone();
            let document = document.clone();
            add_listener(button, "click", move |event: web_sys::MouseEvent| {
                event.prevent_default();
                scroll_to_section(&window, &document, &target, offset);
            });
        }
        buttons.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_top_leaves_header_room() {
        assert_eq!(scroll_top_for(1200.0, 80.0), 1120.0);
    }

    #[test]
    fn test_scroll_top_near_page_start() {
        // Browsers clamp negative scroll positions to 0
        assert_eq!(scroll_top_for(40.0, 80.0), -40.0);
    }
}
