use bevy::prelude::*;
use serde::Serialize;

/// Stable identifier assigned to each NPC at spawn.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NpcId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    #[default]
    Normal,
    Suspicious,
}

/// Color class handed to the renderer; a pure function of capture and behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NpcTint {
    Captured,
    Normal,
    Suspicious,
}
