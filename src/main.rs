//! Birthday site entry point
//!
//! In the browser this wires every page feature to the DOM. The native
//! binary runs headless confetti bursts as a smoke check of the engine.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_site {
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, VisibilityState, Window};

    use birthday_site::SiteConfig;
    use birthday_site::confetti::ConfettiEngine;
    use birthday_site::error::Result;
    use birthday_site::ids;
    use birthday_site::input::{Command, command_for_key};
    use birthday_site::music::MusicPlayer;
    use birthday_site::platform::web::{
        AnimationFrameScheduler, CanvasSurface, PageConfetti, WindowViewport, add_listener,
        document, query_all, window,
    };
    use birthday_site::ui::toast::Toaster;
    use birthday_site::ui::{carousel, date, intro, nav, parallax, reveal, wish};

    /// Attribute naming the action a button performs
    const ACTION_ATTR: &str = "data-action";

    /// State shared by all page event handlers
    struct Page {
        window: Window,
        document: Document,
        config: SiteConfig,
        toaster: Toaster,
        confetti: Option<PageConfetti>,
        music: Option<MusicPlayer>,
    }

    impl Page {
        fn make_wish(&self) {
            wish::make_wish(
                &self.document,
                self.confetti.as_ref(),
                &self.toaster,
                &self.config.ui,
            );
        }

        fn toggle_music(&self) {
            match &self.music {
                Some(music) => music.toggle(),
                None => log::debug!("No music on this page"),
            }
        }

        fn skip_intro(&self) {
            intro::skip_intro(&self.document);
        }

        fn scroll_to_section(&self, section_id: &str) {
            nav::scroll_to_section(
                &self.window,
                &self.document,
                section_id,
                self.config.ui.scroll_offset,
            );
        }

        fn run(&self, command: Command) {
            match command {
                Command::ToggleMusic => self.toggle_music(),
                Command::SkipIntro => self.skip_intro(),
            }
        }

        /// Page unload: stop every pending frame and the music
        fn teardown(&self) {
            if let Some(confetti) = &self.confetti {
                confetti.cancel_all();
            }
            if let Some(music) = &self.music {
                music.stop();
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Birthday site starting...");

        let document = match document() {
            Ok(document) => document,
            Err(e) => {
                log::warn!("Cannot start: {}", e);
                return;
            }
        };

        // Module scripts usually run after parsing, but don't count on it
        if document.ready_state() == "loading" {
            add_listener(&document, "DOMContentLoaded", |_: web_sys::Event| init());
        } else {
            init();
        }
    }

    fn init() {
        let (window, document) = match (window(), document()) {
            (Ok(window), Ok(document)) => (window, document),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("Cannot start: {}", e);
                return;
            }
        };

        let config = SiteConfig::load();
        let toaster = Toaster::new(document.clone(), config.ui.toast_duration_ms);

        let confetti = match setup_confetti(&window, &document, &config) {
            Ok(engine) => Some(engine),
            Err(e) => {
                log::warn!("Confetti disabled: {}", e);
                None
            }
        };

        let music = match MusicPlayer::new(&document, toaster.clone(), config.music.volume) {
            Ok(music) => Some(music),
            Err(e) => {
                log::warn!("Music disabled: {}", e);
                None
            }
        };

        let page = Rc::new(Page {
            window,
            document,
            config,
            toaster,
            confetti,
            music,
        });

        setup_keyboard(&page);
        setup_action_buttons(&page);
        setup_lifecycle(&page);
        export_globals(&page);

        let ui = &page.config.ui;
        let sections = nav::bind_section_buttons(&page.window, &page.document, ui.scroll_offset);
        log::info!("{} section buttons bound", sections);

        match reveal::install(&page.document, reveal::RevealOptions::default()) {
            Ok(count) => log::info!("Observing {} reveal elements", count),
            Err(e) => log::warn!("Reveal disabled: {}", e),
        }
        if let Err(e) = parallax::install(&page.window, &page.document, ui) {
            log::warn!("Parallax disabled: {}", e);
        }
        if let Err(e) = carousel::install(&page.document, ui.carousel_step) {
            log::warn!("Carousel disabled: {}", e);
        }
        date::stamp_current_date(&page.document);

        log::info!("Birthday site ready! Press 'M' to toggle music, 'Escape' to skip intro");
    }

    fn setup_confetti(
        window: &Window,
        document: &Document,
        config: &SiteConfig,
    ) -> Result<PageConfetti> {
        let surface = CanvasSurface::from_id(document, ids::CONFETTI_CANVAS)?;
        surface.fit_to_window(window);

        let seed = js_sys::Date::now() as u64;
        let engine = ConfettiEngine::new(
            surface,
            AnimationFrameScheduler::new(window.clone()),
            WindowViewport(window.clone()),
            config.confetti.clone(),
            seed,
        );
        log::info!("Confetti ready (seed {})", seed);

        // Keep the canvas sized to the viewport
        let resized = engine.clone();
        let window_clone = window.clone();
        add_listener(window, "resize", move |_: web_sys::Event| {
            resized.with_surface_mut(|surface| surface.fit_to_window(&window_clone));
        });

        Ok(engine)
    }

    fn setup_keyboard(page: &Rc<Page>) {
        let page_clone = page.clone();
        add_listener(&page.document, "keydown", move |event: KeyboardEvent| {
            let Some(command) = command_for_key(&event.key(), event.ctrl_key(), event.alt_key())
            else {
                return;
            };
            if command.prevents_default() {
                event.prevent_default();
            }
            page_clone.run(command);
        });
    }

    /// Buttons declare what they do with `data-action="wish"` or
    /// `data-action="toggle-music"`
    fn setup_action_buttons(page: &Rc<Page>) {
        let selector = format!("[{}]", ACTION_ATTR);
        for button in query_all(&page.document, &selector) {
            let action = button.get_attribute(ACTION_ATTR).unwrap_or_default();
            let page_clone = page.clone();
            match action.as_str() {
                "wish" => add_listener(&button, "click", move |_: web_sys::MouseEvent| {
                    page_clone.make_wish();
                }),
                "toggle-music" => add_listener(&button, "click", move |_: web_sys::MouseEvent| {
                    page_clone.toggle_music();
                }),
                "skip-intro" => add_listener(&button, "click", move |_: web_sys::MouseEvent| {
                    page_clone.skip_intro();
                }),
                other => log::warn!("Unknown button action: {:?}", other),
            }
        }
    }

    fn setup_lifecycle(page: &Rc<Page>) {
        // Pause music when the tab is hidden
        {
            let page_clone = page.clone();
            add_listener(&page.document, "visibilitychange", move |_: web_sys::Event| {
                if page_clone.document.visibility_state() == VisibilityState::Hidden {
                    if let Some(music) = &page_clone.music {
                        music.on_hidden();
                    }
                }
            });
        }

        // Cancel outstanding animation frames before the page goes away
        {
            let page_clone = page.clone();
            add_listener(&page.window, "beforeunload", move |_: web_sys::Event| {
                page_clone.teardown();
            });
        }
    }

    /// Make the page actions callable from inline markup
    fn export_globals(page: &Rc<Page>) {
        let p = page.clone();
        export(&page.window, "skipIntro", Closure::<dyn FnMut()>::new(move || p.skip_intro()));

        let p = page.clone();
        export(
            &page.window,
            "scrollToSection",
            Closure::<dyn FnMut(String)>::new(move |id: String| p.scroll_to_section(&id)),
        );

        let p = page.clone();
        export(&page.window, "toggleMusic", Closure::<dyn FnMut()>::new(move || p.toggle_music()));

        let p = page.clone();
        export(&page.window, "triggerConfetti", Closure::<dyn FnMut()>::new(move || p.make_wish()));
    }

    fn export<T>(window: &Window, name: &str, closure: Closure<T>)
    where
        T: ?Sized + wasm_bindgen::closure::WasmClosure,
    {
        if let Err(e) = js_sys::Reflect::set(window, &JsValue::from_str(name), closure.as_ref()) {
            log::warn!("Failed to export {}: {:?}", name, e);
        }
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_site::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Birthday site (native) starting...");
    log::info!("The page runs in the browser - build for wasm32 with `trunk serve`");

    println!("\nRunning headless confetti bursts...");
    headless_bursts();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_bursts() {
    use birthday_site::confetti::{ConfettiEngine, DrawOp, ManualScheduler, RecordingSurface};
    use birthday_site::SiteConfig;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let config = SiteConfig::load();
    for (label, width, height) in [("desktop", 1280.0, 720.0), ("mobile", 390.0, 844.0)] {
        let engine = ConfettiEngine::new(
            RecordingSurface::new(width, height),
            ManualScheduler::new(),
            width,
            config.confetti.clone(),
            2024,
        );
        engine.trigger();
        let frames = engine.scheduler().run_until_idle(FRAME_MS, 10_000);

        let surface = engine.surface();
        let circles = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
            .count();
        println!(
            "✓ {label} {width}x{height}: burst ran {} frames, {} circles drawn, {} bursts left",
            frames + 1,
            circles,
            engine.active_bursts()
        );
    }
}
