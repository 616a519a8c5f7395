//! Game settings and preferences
//!
//! Persisted separately from session state in LocalStorage.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Fraction of the ambient bubble pool that gets drawn
    pub fn bubble_fraction(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.0,
        }
    }

    /// Whether to render the background light rays
    pub fn light_rays_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }

    /// Whether to render glow halos (treasures, diver light)
    pub fn glow_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Screen shake on pickups/impacts
    pub screen_shake: bool,
    /// Darkened-corner vignette overlay
    pub vignette: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (minimize shake, flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            screen_shake: true,
            vignette: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "abyss_dive_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
