//! Skip the intro loader

use web_sys::{Document, HtmlElement};

use crate::platform::web::{element_by_id, set_style};

pub const LOADER_ELEMENT_ID: &str = "intro-loader";
pub const MAIN_CONTENT_ELEMENT_ID: &str = "main-content";

/// Hide the loader and show the main content immediately
pub fn skip_intro(document: &Document) {
    let loader = element_by_id::<HtmlElement>(document, LOADER_ELEMENT_ID);
    let main = element_by_id::<HtmlElement>(document, MAIN_CONTENT_ELEMENT_ID);
    let (Ok(loader), Ok(main)) = (loader, main) else {
        return;
    };

    set_style(&loader, "display", "none");
    set_style(&main, "opacity", "1");
    set_style(&main, "animation", "none");
    log::debug!("Intro skipped");
}
