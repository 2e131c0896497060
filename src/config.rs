//! Page configuration
//!
//! Defaults match the shipped page. A page can override any field with an
//! inline `<script type="application/json" id="site-config">` block; missing
//! fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};

/// Confetti spawn policy and physics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiConfig {
    /// Viewports narrower than this get the mobile batch size
    pub mobile_breakpoint: f64,
    pub mobile_count: usize,
    pub desktop_count: usize,
    /// Spawn height, just above the visible top edge
    pub spawn_y: f64,
    /// Horizontal velocity range (units/frame)
    pub vx_range: (f64, f64),
    /// Initial vertical velocity range (units/frame, positive is down)
    pub vy_range: (f64, f64),
    pub radius_range: (f64, f64),
    /// Life lost per frame
    pub decay_range: (f64, f64),
    /// Added to vy every frame
    pub gravity: f64,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            mobile_count: 50,
            desktop_count: 100,
            spawn_y: -10.0,
            vx_range: (-3.0, 3.0),
            vy_range: (2.0, 5.0),
            radius_range: (2.0, 6.0),
            decay_range: (0.01, 0.03),
            gravity: 0.1,
        }
    }
}

impl ConfettiConfig {
    /// Number of particles a burst spawns for the given viewport width
    pub fn batch_size(&self, viewport_width: f64) -> usize {
        if viewport_width < self.mobile_breakpoint {
            self.mobile_count
        } else {
            self.desktop_count
        }
    }

    fn validate(&self) -> Result<()> {
        let ranges = [
            ("vx_range", self.vx_range),
            ("vy_range", self.vy_range),
            ("radius_range", self.radius_range),
            ("decay_range", self.decay_range),
        ];
        for (name, (min, max)) in ranges {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(SiteError::InvalidConfig(format!(
                    "confetti.{name} must be a finite [min, max] pair, got [{min}, {max}]"
                )));
            }
        }
        // A particle whose life never drops would keep its loop alive forever
        if self.decay_range.0 <= 0.0 {
            return Err(SiteError::InvalidConfig(
                "confetti.decay_range minimum must be positive".to_string(),
            ));
        }
        if self.radius_range.0 < 0.0 {
            return Err(SiteError::InvalidConfig(
                "confetti.radius_range must not be negative".to_string(),
            ));
        }
        if !self.gravity.is_finite() || !self.spawn_y.is_finite() {
            return Err(SiteError::InvalidConfig(
                "confetti.gravity and confetti.spawn_y must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Timing and geometry for the small page affordances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Name used in the wish toast, if any
    pub honoree: Option<String>,
    pub toast_duration_ms: i32,
    /// Pixels per carousel button press
    pub carousel_step: f64,
    /// Space left above a section after navigating to it
    pub scroll_offset: f64,
    pub parallax_base_speed: f64,
    /// Extra speed per successive parallax element
    pub parallax_speed_step: f64,
    /// How long the fast wish-button heartbeat runs before reverting
    pub wish_pulse_ms: i32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            honoree: None,
            toast_duration_ms: 3000,
            carousel_step: 300.0,
            scroll_offset: 80.0,
            parallax_base_speed: 0.5,
            parallax_speed_step: 0.1,
            wish_pulse_ms: 1800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    /// Background music volume (0.0 - 1.0)
    pub volume: f64,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self { volume: 0.3 }
    }
}

/// Complete page configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub confetti: ConfettiConfig,
    pub ui: UiConfig,
    pub music: MusicConfig,
}

impl SiteConfig {
    /// Element holding the inline JSON override block
    pub const CONFIG_ELEMENT_ID: &'static str = "site-config";

    /// Parse and validate a JSON override block
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.confetti.validate()?;
        if self.ui.toast_duration_ms < 0 || self.ui.wish_pulse_ms < 0 {
            return Err(SiteError::InvalidConfig(
                "ui durations must not be negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.music.volume) {
            return Err(SiteError::InvalidConfig(format!(
                "music.volume must be within 0.0 - 1.0, got {}",
                self.music.volume
            )));
        }
        Ok(())
    }

    /// Load config from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = json else {
            log::info!("No page config, using defaults");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded page config");
                config
            }
            Err(e) => {
                log::warn!("Ignoring page config: {}", e);
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
