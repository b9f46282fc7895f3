//! backend/src/domain/models/settings.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Blue,
    Green,
    Pink,
    Purple,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Blue => "blue",
            Theme::Green => "green",
            Theme::Pink => "pink",
            Theme::Purple => "purple",
        }
    }

    pub fn from_string(value: &str) -> Result<Self, String> {
        match value.trim().to_lowercase().as_str() {
            "blue" => Ok(Theme::Blue),
            "green" => Ok(Theme::Green),
            "pink" => Ok(Theme::Pink),
            "purple" => Ok(Theme::Purple),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Blue
    }
}
