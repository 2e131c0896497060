//! Scroll-triggered reveal of `[data-reveal]` elements

pub const REVEAL_SELECTOR: &str = "[data-reveal]";
pub const REVEALED_CLASS: &str = "revealed";

/// Observer tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Visible fraction that counts as intersecting
    pub threshold: f64,
    /// Pixels trimmed off the bottom of the viewport before testing
    pub bottom_inset: u32,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_inset: 50,
        }
    }
}

impl RevealOptions {
    /// CSS margin string for `IntersectionObserverInit.rootMargin`
    pub fn root_margin(&self) -> String {
        if self.bottom_inset == 0 {
            "0px".to_string()
        } else {
            format!("0px 0px -{}px 0px", self.bottom_inset)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::install;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

    use super::{REVEAL_SELECTOR, REVEALED_CLASS, RevealOptions};
    use crate::error::Result;
    use crate::platform::web::query_all;

    /// Observe every reveal element; each one is revealed once, then dropped
    /// from the observer. Returns the number of elements observed.
    pub fn install(document: &Document, options: RevealOptions) -> Result<usize> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        let target = entry.target();
                        let _ = target.class_list().add_1(REVEALED_CLASS);
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin());
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        callback.forget();

        let elements = query_all(document, REVEAL_SELECTOR);
        for element in &elements {
            observer.observe(element);
        }
        Ok(elements.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root_margin() {
        assert_eq!(RevealOptions::default().root_margin(), "0px 0px -50px 0px");
    }

    #[test]
    fn test_zero_inset_margin() {
        let options = RevealOptions {
            bottom_inset: 0,
            ..Default::default()
        };
        assert_eq!(options.root_margin(), "0px");
    }
}
