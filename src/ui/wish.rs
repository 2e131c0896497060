//! The "make a wish" action: toast, confetti and a quick heartbeat on the button

pub const WISH_BUTTON_SELECTOR: &str = ".wish-button";
/// Fast pulse right after a wish
pub const PULSE_ANIMATION: &str = "heartbeat 0.6s ease-in-out 3";
/// Resting pulse
pub const IDLE_ANIMATION: &str = "heartbeat 1.5s ease-in-out infinite";

pub fn wish_message(honoree: Option<&str>) -> String {
    match honoree.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("Make a wish, {}! ✨", name),
        None => "Make a wish! ✨".to_string(),
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::make_wish;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlElement};

    use super::{IDLE_ANIMATION, PULSE_ANIMATION, WISH_BUTTON_SELECTOR, wish_message};
    use crate::config::UiConfig;
    use crate::platform::web::{PageConfetti, set_style, set_timeout};
    use crate::ui::toast::Toaster;

    pub fn make_wish(
        document: &Document,
        confetti: Option<&PageConfetti>,
        toaster: &Toaster,
        config: &UiConfig,
    ) {
        toaster.show(&wish_message(config.honoree.as_deref()));

        match confetti {
            Some(engine) => {
                let id = engine.trigger();
                log::info!("Wish made, confetti burst {}", id.0);
            }
            None => log::info!("Wish made (no confetti canvas)"),
        }

        let button = document
            .query_selector(WISH_BUTTON_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(button) = button {
            set_style(&button, "animation", PULSE_ANIMATION);
            set_timeout(config.wish_pulse_ms, move || {
                set_style(&button, "animation", IDLE_ANIMATION);
            });
        }
    }
}
