//! Background music toggle
//!
//! `MusicToggle` is the play/pause state machine; it decides what the
//! button and toast should show after each transition. On the web,
//! `MusicPlayer` drives an `<audio>` element with it.

/// Toast texts
pub const MSG_PAUSED: &str = "Music paused 🎵";
pub const MSG_PLAYING: &str = "Music playing 🎶";
pub const MSG_PLAY_FAILED: &str = "Unable to play music 😔";

/// What a toggle press asks the audio element to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    Pause,
    Play,
}

/// Music button appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLabel {
    pub icon: &'static str,
    pub text: &'static str,
    /// Whether the button carries the `playing` class
    pub playing: bool,
}

impl ButtonLabel {
    pub const PLAYING_CLASS: &'static str = "playing";

    pub fn for_state(playing: bool) -> Self {
        if playing {
            Self {
                icon: "♫",
                text: "Pause Music",
                playing: true,
            }
        } else {
            Self {
                icon: "♪",
                text: "Play Music",
                playing: false,
            }
        }
    }
}

/// UI changes that follow a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicUpdate {
    pub button: Option<ButtonLabel>,
    pub toast: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MusicToggle {
    playing: bool,
}

impl MusicToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Command for a toggle press in the current state
    pub fn next_command(&self) -> MusicCommand {
        if self.playing {
            MusicCommand::Pause
        } else {
            MusicCommand::Play
        }
    }

    /// The user paused playback
    pub fn paused(&mut self) -> MusicUpdate {
        self.playing = false;
        MusicUpdate {
            button: Some(ButtonLabel::for_state(false)),
            toast: Some(MSG_PAUSED),
        }
    }

    /// Playback started after a play request
    pub fn play_succeeded(&mut self) -> MusicUpdate {
        self.playing = true;
        MusicUpdate {
            button: Some(ButtonLabel::for_state(true)),
            toast: Some(MSG_PLAYING),
        }
    }

    /// Play request was rejected (autoplay policy, missing file, ...)
    pub fn play_failed(&self) -> MusicUpdate {
        MusicUpdate {
            button: None,
            toast: Some(MSG_PLAY_FAILED),
        }
    }

    /// Page went to the background. Returns None when nothing was playing.
    pub fn hidden(&mut self) -> Option<MusicUpdate> {
        if !self.playing {
            return None;
        }
        self.playing = false;
        Some(MusicUpdate {
            button: Some(ButtonLabel::for_state(false)),
            toast: None,
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::MusicPlayer;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, HtmlAudioElement, HtmlElement};

    use super::{ButtonLabel, MusicCommand, MusicToggle, MusicUpdate};
    use crate::error::Result;
    use crate::platform::web::{add_listener, element_by_id, set_style};
    use crate::ui::toast::Toaster;

    pub const AUDIO_ELEMENT_ID: &str = "bg-music";
    pub const BUTTON_ELEMENT_ID: &str = "music-btn";

    /// `<audio>` element plus the button that reflects its state
    #[derive(Clone)]
    pub struct MusicPlayer {
        audio: HtmlAudioElement,
        button: Option<HtmlElement>,
        toggle: Rc<RefCell<MusicToggle>>,
        toaster: Toaster,
    }

    impl MusicPlayer {
        pub fn new(document: &Document, toaster: Toaster, volume: f64) -> Result<Self> {
            let audio: HtmlAudioElement = element_by_id(document, AUDIO_ELEMENT_ID)?;
            audio.set_volume(volume);
            let button = element_by_id::<HtmlElement>(document, BUTTON_ELEMENT_ID).ok();

            let player = Self {
                audio,
                button,
                toggle: Rc::new(RefCell::new(MusicToggle::new())),
                toaster,
            };
            player.watch_load_errors();
            Ok(player)
        }

        fn watch_load_errors(&self) {
            add_listener(&self.audio, "loadstart", |_: web_sys::Event| {
                log::info!("Audio loading started");
            });

            let button = self.button.clone();
            add_listener(&self.audio, "error", move |_: web_sys::Event| {
                log::warn!("Audio failed to load, hiding music button");
                if let Some(button) = &button {
                    set_style(button, "display", "none");
                }
            });
        }

        pub fn is_playing(&self) -> bool {
            self.toggle.borrow().is_playing()
        }

        pub fn toggle(&self) {
            let command = self.toggle.borrow().next_command();
            match command {
                MusicCommand::Pause => {
                    let _ = self.audio.pause();
                    let update = self.toggle.borrow_mut().paused();
                    self.apply(update);
                }
                MusicCommand::Play => self.play(),
            }
        }

        fn play(&self) {
            let promise = match self.audio.play() {
                Ok(promise) => promise,
                Err(e) => {
                    log::warn!("Audio play failed: {:?}", e);
                    let update = self.toggle.borrow().play_failed();
                    self.apply(update);
                    return;
                }
            };

            let player = self.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let update = match JsFuture::from(promise).await {
                    Ok(_) => player.toggle.borrow_mut().play_succeeded(),
                    Err(e) => {
                        log::warn!("Audio play failed: {:?}", e);
                        player.toggle.borrow().play_failed()
                    }
                };
                player.apply(update);
            });
        }

        /// Pause without a toast when the tab is hidden
        pub fn on_hidden(&self) {
            let update = self.toggle.borrow_mut().hidden();
            if let Some(update) = update {
                let _ = self.audio.pause();
                self.apply(update);
                log::info!("Music paused (tab hidden)");
            }
        }

        /// Page teardown
        pub fn stop(&self) {
            if self.is_playing() {
                let _ = self.audio.pause();
            }
        }

        fn apply(&self, update: MusicUpdate) {
            if let Some(label) = update.button {
                self.render_button(label);
            }
            if let Some(message) = update.toast {
                self.toaster.show(message);
            }
        }

        fn render_button(&self, label: ButtonLabel) {
            let Some(button) = &self.button else { return };

            if let Ok(Some(icon)) = button.query_selector(".music-icon") {
                icon.set_text_content(Some(label.icon));
            }
            if let Ok(Some(text)) = button.query_selector(".music-text") {
                text.set_text_content(Some(label.text));
            }
            let classes = button.class_list();
            let _ = if label.playing {
                classes.add_1(ButtonLabel::PLAYING_CLASS)
            } else {
                classes.remove_1(ButtonLabel::PLAYING_CLASS)
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_paused() {
        let toggle = MusicToggle::new();
        assert!(!toggle.is_playing());
        assert_eq!(toggle.next_command(), MusicCommand::Play);
    }

    #[test]
    fn test_play_then_pause() {
        let mut toggle = MusicToggle::new();
        let update = toggle.play_succeeded();
        assert!(toggle.is_playing());
        assert_eq!(update.toast, Some(MSG_PLAYING));
        assert_eq!(update.button, Some(ButtonLabel::for_state(true)));
        assert_eq!(toggle.next_command(), MusicCommand::Pause);

        let update = toggle.paused();
        assert!(!toggle.is_playing());
        assert_eq!(update.toast, Some(MSG_PAUSED));
        let label = update.button.unwrap();
        assert_eq!(label.icon, "♪");
        assert_eq!(label.text, "Play Music");
        assert!(!label.playing);
    }

    #[test]
    fn test_play_failure_keeps_state() {
        let toggle = MusicToggle::new();
        let update = toggle.play_failed();
        assert!(!toggle.is_playing());
        assert_eq!(update.button, None);
        assert_eq!(update.toast, Some(MSG_PLAY_FAILED));
    }

    #[test]
    fn test_hidden_only_when_playing() {
        let mut toggle = MusicToggle::new();
        assert_eq!(toggle.hidden(), None);

        toggle.play_succeeded();
        let update = toggle.hidden().unwrap();
        assert!(!toggle.is_playing());
        assert_eq!(update.toast, None);
        assert_eq!(update.button, Some(ButtonLabel::for_state(false)));
    }

    #[test]
    fn test_playing_label() {
        let label = ButtonLabel::for_state(true);
        assert_eq!(label.icon, "♫");
        assert_eq!(label.text, "Pause Music");
        assert!(label.playing);
    }
}
