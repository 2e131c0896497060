//! Photo carousel buttons

pub const CAROUSEL_SELECTOR: &str = ".photo-carousel";
pub const PREV_SELECTOR: &str = ".carousel-btn.prev";
pub const NEXT_SELECTOR: &str = ".carousel-btn.next";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselDirection {
    Prev,
    Next,
}

impl CarouselDirection {
    /// Horizontal scroll delta for one press
    pub fn delta(&self, step: f64) -> f64 {
        match self {
            CarouselDirection::Prev => -step,
            CarouselDirection::Next => step,
        }
    }

    pub fn selector(&self) -> &'static str {
        match self {
            CarouselDirection::Prev => PREV_SELECTOR,
            CarouselDirection::Next => NEXT_SELECTOR,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::install;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{Document, ScrollBehavior, ScrollToOptions};

    use super::{CAROUSEL_SELECTOR, CarouselDirection};
    use crate::error::{Result, SiteError};
    use crate::platform::web::add_listener;

    /// Wire the prev/next buttons to smooth-scroll the carousel
    pub fn install(document: &Document, step: f64) -> Result<()> {
        let carousel = document
            .query_selector(CAROUSEL_SELECTOR)?
            .ok_or_else(|| SiteError::MissingElement(CAROUSEL_SELECTOR.to_string()))?;

        for direction in [CarouselDirection::Prev, CarouselDirection::Next] {
            let Some(button) = document.query_selector(direction.selector())? else {
                log::warn!("Carousel button {} not found", direction.selector());
                continue;
            };
            let carousel = carousel.clone();
            add_listener(&button, "click", move |_: web_sys::MouseEvent| {
                let options = ScrollToOptions::new();
                options.set_left(direction.delta(step));
                options.set_behavior(ScrollBehavior::Smooth);
                carousel.scroll_by_with_scroll_to_options(&options);
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_delta() {
        assert_eq!(CarouselDirection::Next.delta(300.0), 300.0);
        assert_eq!(CarouselDirection::Prev.delta(300.0), -300.0);
    }

    #[test]
    fn test_direction_selectors() {
        assert_eq!(CarouselDirection::Prev.selector(), ".carousel-btn.prev");
        assert_eq!(CarouselDirection::Next.selector(), ".carousel-btn.next");
    }
}
