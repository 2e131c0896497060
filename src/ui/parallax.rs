//! Scroll-linked parallax for the floating hearts and stars
//!
//! Each element moves up at its own speed: the n-th element (document
//! order) gets `base + n * step` times the scroll distance.

use crate::config::UiConfig;

pub const PARALLAX_SELECTOR: &str = ".heart-float, .star-float";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Speed multiplier for the element at `index`
pub fn layer_speed(index: usize, config: &UiConfig) -> f64 {
    config.parallax_base_speed + index as f64 * config.parallax_speed_step
}

/// Vertical offset (px) of the element at `index` after scrolling `scrolled` px
pub fn offset(scrolled: f64, index: usize, config: &UiConfig) -> f64 {
    let y = -(scrolled * layer_speed(index, config));
    // Avoid "-0px" at the top of the page
    if y == 0.0 { 0.0 } else { y }
}

/// CSS transform for an offset
pub fn transform(offset: f64) -> String {
    format!("translateY({}px)", offset)
}

#[cfg(target_arch = "wasm32")]
pub use web::install;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, Window};

    use super::{PARALLAX_SELECTOR, REDUCED_MOTION_QUERY, offset, transform};
    use crate::config::UiConfig;
    use crate::error::Result;
    use crate::platform::web::{add_listener, query_all, set_style};

    /// Listen for scroll and update at most once per animation frame.
    /// Does nothing when the user prefers reduced motion.
    pub fn install(window: &Window, document: &Document, config: &UiConfig) -> Result<()> {
        let reduced = window
            .match_media(REDUCED_MOTION_QUERY)?
            .map(|mq| mq.matches())
            .unwrap_or(false);
        if reduced {
            log::info!("Reduced motion requested, parallax disabled");
            return Ok(());
        }

        let ticking = Rc::new(Cell::new(false));
        let window_clone = window.clone();
        let document = document.clone();
        let config = config.clone();

        add_listener(window, "scroll", move |_: web_sys::Event| {
            if ticking.get() {
                return;
            }
            ticking.set(true);

            let pending = ticking.clone();
            let window = window_clone.clone();
            let document = document.clone();
            let config = config.clone();
            let closure = Closure::once(move |_time: f64| {
                update(&window, &document, &config);
                pending.set(false);
            });
            if let Err(e) = window_clone.request_animation_frame(closure.as_ref().unchecked_ref()) {
                log::warn!("Parallax frame request failed: {:?}", e);
                ticking.set(false);
            }
            closure.forget();
        });
        Ok(())
    }

    fn update(window: &Window, document: &Document, config: &UiConfig) {
        let scrolled = window.page_y_offset().unwrap_or(0.0);
        for (index, element) in query_all(document, PARALLAX_SELECTOR).into_iter().enumerate() {
            if let Ok(element) = element.dyn_into::<HtmlElement>() {
                set_style(&element, "transform", &transform(offset(scrolled, index, config)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_speeds() {
        let config = UiConfig::default();
        assert!((layer_speed(0, &config) - 0.5).abs() < 1e-12);
        assert!((layer_speed(3, &config) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_offset_moves_up() {
        let config = UiConfig::default();
        assert_eq!(offset(100.0, 0, &config), -50.0);
        assert!((offset(100.0, 2, &config) + 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_of_page_has_no_negative_zero() {
        let config = UiConfig::default();
        assert_eq!(transform(offset(0.0, 4, &config)), "translateY(0px)");
    }

    #[test]
    fn test_transform_format() {
        assert_eq!(transform(-12.5), "translateY(-12.5px)");
        assert_eq!(transform(-40.0), "translateY(-40px)");
    }
}
