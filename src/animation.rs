//! Canned animation kinds and how long each one runs.

use std::str::FromStr;

use crate::error::PlaygroundError;

/// Duration used for animation names we do not recognise.
pub const DEFAULT_ANIMATION_MS: u32 = 1000;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Bounce,
    Shake,
    Flip,
    Zoom,
    Rainbow,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 5] = [
        AnimationKind::Bounce,
        AnimationKind::Shake,
        AnimationKind::Flip,
        AnimationKind::Zoom,
        AnimationKind::Rainbow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnimationKind::Bounce => "bounce",
            AnimationKind::Shake => "shake",
            AnimationKind::Flip => "flip",
            AnimationKind::Zoom => "zoom",
            AnimationKind::Rainbow => "rainbow",
        }
    }

    pub fn duration_ms(self) -> u32 {
        match self {
            AnimationKind::Bounce | AnimationKind::Zoom => 800,
            AnimationKind::Shake => 600,
            AnimationKind::Flip => 1000,
            AnimationKind::Rainbow => 2000,
        }
    }
}

impl FromStr for AnimationKind {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimationKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| PlaygroundError::InvalidOperation(s.to_string()))
    }
}

/// Duration for an animation by name, falling back to [`DEFAULT_ANIMATION_MS`].
pub fn animation_duration(name: &str) -> u32 {
    name.parse::<AnimationKind>()
        .map(AnimationKind::duration_ms)
        .unwrap_or(DEFAULT_ANIMATION_MS)
}
