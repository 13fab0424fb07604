use serde::{Deserialize, Serialize};

/// Physical controls active while a node plays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSettings {
    pub wheel: bool,
    pub ok: bool,
    pub home: bool,
    pub pause: bool,
    pub autoplay: bool,
}

impl ControlSettings {
    /// Cover: browse with the wheel, enter with ok.
    pub fn cover() -> Self {
        Self {
            wheel: true,
            ok: true,
            ..Self::default()
        }
    }

    /// Question: plays itself, then hands over to the options.
    pub fn question() -> Self {
        Self {
            autoplay: true,
            ..Self::default()
        }
    }

    pub fn option() -> Self {
        Self {
            wheel: true,
            ok: true,
            home: true,
            ..Self::default()
        }
    }

    pub fn story() -> Self {
        Self {
            autoplay: true,
            ..Self::default()
        }
    }
}
