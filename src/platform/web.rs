//! Browser bindings: canvas surface, animation-frame scheduler, DOM helpers

use std::f64::consts::TAU;

use glam::DVec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, EventTarget, HtmlCanvasElement, HtmlElement,
    Window,
};

use crate::confetti::{ConfettiColor, ConfettiEngine, FrameCallback, FrameHandle, FrameScheduler};
use crate::confetti::{Surface, Viewport};
use crate::error::{Result, SiteError};

/// Confetti engine bound to the page canvas
pub type PageConfetti = ConfettiEngine<CanvasSurface, AnimationFrameScheduler>;

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(SiteError::MissingWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(SiteError::MissingDocument)
}

/// Look up an element by id and cast it to the expected type
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| SiteError::MissingElement(format!("#{id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| SiteError::WrongElementType {
            id: id.to_string(),
            expected: std::any::type_name::<T>(),
        })
}

/// All elements matching `selector`, in document order
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("Bad selector: {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Set an inline style property, ignoring failures
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

/// Attach an event handler for the lifetime of the page
pub fn add_listener<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("Failed to listen for {}: {:?}", event, e);
    }
    closure.forget();
}

/// Run `callback` once after `timeout_ms`
pub fn set_timeout(timeout_ms: i32, callback: impl FnOnce() + 'static) {
    let Ok(window) = window() else { return };
    let closure = Closure::once(callback);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        timeout_ms,
    );
    closure.forget();
}

/// HTML canvas with a 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(SiteError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SiteError::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }

    pub fn from_id(document: &Document, id: &str) -> Result<Self> {
        Self::new(element_by_id(document, id)?)
    }

    /// Match the canvas backing size to the window's inner size
    pub fn fit_to_window(&self, window: &Window) {
        let width = WindowViewport(window.clone()).inner_width();
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: ConfettiColor, alpha: f64) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(alpha);
        ctx.set_fill_style_str(color.as_css());
        ctx.begin_path();
        let _ = ctx.arc(center.x, center.y, radius, 0.0, TAU);
        ctx.fill();
        ctx.restore();
    }
}

/// `requestAnimationFrame`-backed scheduler
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        let closure = Closure::once(move |time: f64| callback(time));
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => {
                closure.forget();
                Some(FrameHandle(id))
            }
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }
}

/// Reads `window.innerWidth` on every call
pub struct WindowViewport(pub Window);

impl Viewport for WindowViewport {
    fn inner_width(&self) -> f64 {
        self.0
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }
}
