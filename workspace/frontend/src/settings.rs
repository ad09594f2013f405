use compute::composer::DEFAULT_FORECAST_STEP_MINUTES;
use log::Level;
use wasm_bindgen::JsValue;
use web_sys::window;

/// localStorage key prefix for user overrides
const STORAGE_PREFIX: &str = "tempcast_";

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Full URL of the forecast endpoint
    pub forecast_url: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Minutes between consecutive forecast points
    pub forecast_step_minutes: u32,

    /// Whether the sidebar starts expanded
    pub sidebar_default_open: bool,

    /// Draw the confidence band around the forecast
    pub show_confidence_band: bool,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            forecast_url: "http://localhost:3000/forecast".to_string(),
            log_level: Level::Info,
            forecast_step_minutes: DEFAULT_FORECAST_STEP_MINUTES,
            sidebar_default_open: true,
            show_confidence_band: true,
            debug_mode: false,
        }
    }
}

fn parse_level(raw: &str) -> Option<Level> {
    match raw.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from window location and localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            for key in Self::storage_keys() {
                if let Ok(Some(value)) = storage.get_item(&format!("{}{}", STORAGE_PREFIX, key)) {
                    settings.apply_override(key, &value);
                }
            }
        }

        settings
    }

    fn storage_keys() -> [&'static str; 5] {
        [
            "forecast_url",
            "log_level",
            "forecast_step_minutes",
            "sidebar_default_open",
            "show_confidence_band",
        ]
    }

    /// Applies one stored override. Unparseable values keep the current setting.
    pub fn apply_override(&mut self, key: &str, value: &str) {
        match key {
            "forecast_url" if !value.trim().is_empty() => self.forecast_url = value.trim().to_string(),
            "log_level" => {
                if let Some(level) = parse_level(value) {
                    self.log_level = level;
                }
            }
            "forecast_step_minutes" => {
                if let Ok(step) = value.parse::<u32>() {
                    if step > 0 {
                        self.forecast_step_minutes = step;
                    }
                }
            }
            "sidebar_default_open" => self.sidebar_default_open = value.eq_ignore_ascii_case("true"),
            "show_confidence_band" => self.show_confidence_band = value.eq_ignore_ascii_case("true"),
            _ => log::warn!("Ignoring setting override {}={}", key, value),
        }
    }

    /// Save settings to localStorage
    pub fn save_to_storage(&self) -> Result<(), JsValue> {
        if let Some(window) = window() {
            if let Some(storage) = window.local_storage()? {
                let key = |name: &str| format!("{}{}", STORAGE_PREFIX, name);
                storage.set_item(&key("forecast_url"), &self.forecast_url)?;
                storage.set_item(&key("log_level"), &self.log_level.as_str().to_lowercase())?;
                storage.set_item(&key("forecast_step_minutes"), &self.forecast_step_minutes.to_string())?;
                storage.set_item(&key("sidebar_default_open"), &self.sidebar_default_open.to_string())?;
                storage.set_item(&key("show_confidence_band"), &self.show_confidence_band.to_string())?;
            }
        }
        Ok(())
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Update the global settings
pub fn update_settings<F>(f: F)
where
    F: FnOnce(&mut AppSettings),
{
    SETTINGS.with(|s| {
        let mut settings = s.borrow_mut();
        f(&mut settings);
    });
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_are_applied() {
        let mut settings = AppSettings::default();
        settings.apply_override("forecast_url", " https://sensors.example/forecast ");
        settings.apply_override("log_level", "TRACE");
        settings.apply_override("forecast_step_minutes", "30");
        settings.apply_override("sidebar_default_open", "false");

        assert_eq!(settings.forecast_url, "https://sensors.example/forecast");
        assert_eq!(settings.log_level, Level::Trace);
        assert_eq!(settings.forecast_step_minutes, 30);
        assert!(!settings.sidebar_default_open);
    }

    #[test]
    fn test_bad_overrides_keep_defaults() {
        let mut settings = AppSettings::default();
        settings.apply_override("forecast_url", "   ");
        settings.apply_override("log_level", "loud");
        settings.apply_override("forecast_step_minutes", "0");
        settings.apply_override("forecast_step_minutes", "quarter");
        settings.apply_override("unknown", "1");

        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_update_settings_is_visible_to_readers() {
        update_settings(|s| s.forecast_step_minutes = 5);
        assert_eq!(get_settings().forecast_step_minutes, 5);
    }
}
