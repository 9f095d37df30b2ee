pub mod actions;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

use std::time::Duration;

pub use actions::*;
use keybindings::KeybindingsConfig;
pub use loader::load;
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

use crate::animation::SpringConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: crate::theme::DEFAULT_THEME.to_string(),
        }
    }
}

/// Frame pacing and the parameters of the two screen animations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frame_rate: f64,
    pub tick_rate: f64,
    pub dropdown_duration_ms: u64,
    pub dropdown_height: f64,
    pub press_scale: f64,
    pub press_hold_ms: u64,
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl AnimationConfig {
    pub const fn dropdown_duration(&self) -> Duration {
        Duration::from_millis(self.dropdown_duration_ms)
    }

    pub const fn press_hold(&self) -> Duration {
        Duration::from_millis(self.press_hold_ms)
    }

    /// Reject frame and tick rates the event loop cannot pace.
    pub fn validate(&self) -> color_eyre::Result<()> {
        for (name, rate) in [("frame_rate", self.frame_rate), ("tick_rate", self.tick_rate)] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(color_eyre::eyre::eyre!(
                    "animation.{name} must be a positive number, got {rate}"
                ));
            }
        }
        Ok(())
    }

    pub fn spring(&self) -> SpringConfig {
        SpringConfig {
            stiffness: self.stiffness,
            damping: self.damping,
            mass: self.mass,
            ..SpringConfig::default()
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let spring = SpringConfig::default();
        Self {
            frame_rate: 60.0,
            tick_rate: 4.0,
            dropdown_duration_ms: 300,
            dropdown_height: 150.0,
            press_scale: 0.95,
            press_hold_ms: 120,
            stiffness: spring.stiffness,
            damping: spring.damping,
            mass: spring.mass,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.theme.name, crate::theme::DEFAULT_THEME);
        assert_eq!(config.animation.dropdown_duration(), Duration::from_millis(300));
        assert!((config.animation.dropdown_height - 150.0).abs() < f64::EPSILON);
        assert!((config.animation.press_scale - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [animation]
            dropdown_duration_ms = 500

            [keybindings.global]
            menu = "ctrl+o"
            "#,
        )
        .unwrap();

        assert_eq!(config.animation.dropdown_duration(), Duration::from_millis(500));
        assert_eq!(config.animation.press_hold(), Duration::from_millis(120));

        let menu = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL);
        assert!(config.keybindings.global.menu.matches(&menu));
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(config.keybindings.global.quit.matches(&quit));
    }

    #[test]
    fn test_rates_must_be_positive() {
        assert!(AnimationConfig::default().validate().is_ok());
        for (frame_rate, tick_rate) in [(0.0, 4.0), (60.0, 0.0), (-30.0, 4.0), (f64::INFINITY, 4.0)] {
            let config = AnimationConfig {
                frame_rate,
                tick_rate,
                ..AnimationConfig::default()
            };
            assert!(config.validate().is_err(), "{frame_rate} / {tick_rate}");
        }
    }

    #[test]
    fn test_spring_from_config() {
        let config = AnimationConfig {
            damping: 30.0,
            ..AnimationConfig::default()
        };
        let spring = config.spring();
        assert!((spring.damping - 30.0).abs() < f64::EPSILON);
        assert!((spring.stiffness - 230.2).abs() < f64::EPSILON);
    }
}
