use bevy::prelude::*;
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_PATH: &str = "camwatch.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CameraSpec {
    /// Icon anchor on the map overlay.
    pub icon: [f32; 2],
    /// Observed world region as `[x, y, width, height]`.
    pub view: [f32; 4],
}

/// Session parameters, fixed for the lifetime of the process.
#[derive(Resource, Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SessionConfig {
    pub window_title: String,
    pub map_width: f32,
    pub map_height: f32,
    pub npc_count: usize,
    pub npc_radius: f32,
    pub npc_max_speed: f32,
    pub state_reroll_ms: u64,
    pub suspicious_probability: f32,
    pub building_count: usize,
    pub seed: Option<u64>,
    pub show_view_overlays: bool,
    pub cameras: Vec<CameraSpec>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let camera = |icon: [f32; 2], view: [f32; 4]| CameraSpec { icon, view };
        Self {
            window_title: "City Map - Security Camera Simulation".to_string(),
            map_width: 1000.0,
            map_height: 700.0,
            npc_count: 20,
            npc_radius: 10.0,
            npc_max_speed: 1.5,
            state_reroll_ms: 3000,
            suspicious_probability: 0.3,
            building_count: 10,
            seed: None,
            show_view_overlays: false,
            cameras: vec![
                camera([150.0, 150.0], [100.0, 100.0, 300.0, 200.0]),
                camera([850.0, 150.0], [700.0, 100.0, 300.0, 200.0]),
                camera([150.0, 550.0], [100.0, 500.0, 300.0, 200.0]),
                camera([850.0, 550.0], [700.0, 500.0, 300.0, 200.0]),
            ],
        }
    }
}

impl SessionConfig {
    pub fn map_size(&self) -> Vec2 {
        Vec2::new(self.map_width, self.map_height)
    }

    /// The window is sized to the map, so the display and the map share extents.
    pub fn display_size(&self) -> Vec2 {
        self.map_size()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.map_width.is_finite() && self.map_height.is_finite())
            || self.map_width <= 0.0
            || self.map_height <= 0.0
        {
            return Err(format!(
                "map size must be positive, got {}x{}",
                self.map_width, self.map_height
            ));
        }
        if !self.npc_radius.is_finite() || self.npc_radius <= 0.0 {
            return Err(format!("npc_radius must be positive, got {}", self.npc_radius));
        }
        if !self.npc_max_speed.is_finite() || self.npc_max_speed < 0.0 {
            return Err(format!(
                "npc_max_speed must be a non-negative number, got {}",
                self.npc_max_speed
            ));
        }
        if !(0.0..=1.0).contains(&self.suspicious_probability) {
            return Err(format!(
                "suspicious_probability must be within [0, 1], got {}",
                self.suspicious_probability
            ));
        }
        crate::cameras::CameraRig::from_config(self).map(|_| ())
    }
}

/// Reads the session config from `CAMWATCH_CONFIG` (or `camwatch.json`).
/// Missing files fall back to defaults; malformed files are reported and ignored.
pub fn load_session_config() -> SessionConfig {
    let path = std::env::var("CAMWATCH_CONFIG")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    match std::fs::read_to_string(&path) {
        Ok(contents) => match parse_session_config(&contents) {
            Ok(cfg) => {
                println!("[Camwatch] Loaded session config from {}", path);
                cfg
            }
            Err(e) => {
                eprintln!("[Camwatch] Failed to parse {}: {}", path, e);
                SessionConfig::default()
            }
        },
        Err(_) => SessionConfig::default(),
    }
}

pub fn parse_session_config(contents: &str) -> Result<SessionConfig, String> {
    serde_json::from_str::<SessionConfig>(contents).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = SessionConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.cameras.len(), 4);
        assert_eq!(cfg.display_size(), Vec2::new(1000.0, 700.0));
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let cfg = parse_session_config(r#"{"npc_count": 5, "seed": 7}"#).expect("parse");
        assert_eq!(cfg.npc_count, 5);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.state_reroll_ms, 3000);
        assert!((cfg.suspicious_probability - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_sized_camera_view_is_rejected() {
        let cfg = parse_session_config(
            r#"{"cameras": [{"icon": [10, 10], "view": [0, 0, 0, 200]}]}"#,
        )
        .expect("parse");
        let err = cfg.validate().expect_err("zero width must fail");
        assert!(err.contains("width"), "unexpected error: {err}");
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let cfg = SessionConfig {
            suspicious_probability: 1.5,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_session_config("{ not json").is_err());
    }
}
