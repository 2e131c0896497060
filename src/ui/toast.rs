//! Transient toast notifications

pub const TOAST_ELEMENT_ID: &str = "toast";
/// Class that makes the toast visible
pub const SHOW_CLASS: &str = "show";

#[cfg(target_arch = "wasm32")]
pub use web::Toaster;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::Document;

    use super::{SHOW_CLASS, TOAST_ELEMENT_ID};
    use crate::platform::web::set_timeout;

    /// Shows a message in `#toast` for a fixed duration. Fire and forget.
    #[derive(Clone)]
    pub struct Toaster {
        document: Document,
        duration_ms: i32,
    }

    impl Toaster {
        pub fn new(document: Document, duration_ms: i32) -> Self {
            Self {
                document,
                duration_ms,
            }
        }

        pub fn show(&self, message: &str) {
            let Some(toast) = self.document.get_element_by_id(TOAST_ELEMENT_ID) else {
                log::debug!("No toast element for: {}", message);
                return;
            };

            toast.set_text_content(Some(message));
            let _ = toast.class_list().add_1(SHOW_CLASS);

            set_timeout(self.duration_ms, move || {
                let _ = toast.class_list().remove_1(SHOW_CLASS);
            });
        }
    }
}
