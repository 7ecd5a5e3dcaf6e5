use std::collections::VecDeque;

use bevy::prelude::*;
use serde::Serialize;

const MAX_EVENTS: usize = 500;

/// Something the player did that changed the session.
#[derive(Serialize, Clone, Debug)]
pub struct SessionEvent {
    pub name: String,
    pub data: serde_json::Value,
    pub frame: u64,
    pub npc: Option<u64>,
}

/// Bounded log of recent session events, stamped with the simulation frame.
#[derive(Resource, Default)]
pub struct GameEventBus {
    pub recent: VecDeque<SessionEvent>,
    pub frame: u64,
    pub dropped_events: u64,
}

impl GameEventBus {
    pub fn emit(&mut self, name: impl Into<String>, data: serde_json::Value, npc: Option<u64>) {
        self.recent.push_back(SessionEvent {
            name: name.into(),
            data,
            frame: self.frame,
            npc,
        });
        while self.recent.len() > MAX_EVENTS {
            self.recent.pop_front();
            self.dropped_events = self.dropped_events.saturating_add(1);
        }
    }
}

pub struct GameEventsPlugin;

impl Plugin for GameEventsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameEventBus>().add_systems(
            FixedUpdate,
            tick_event_frame.after(crate::npc::update_npcs),
        );
    }
}

fn tick_event_frame(mut bus: ResMut<GameEventBus>) {
    bus.frame = bus.frame.saturating_add(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_bus_is_bounded() {
        let mut bus = GameEventBus::default();
        for i in 0..(MAX_EVENTS + 25) {
            bus.emit("npc_captured", serde_json::json!({ "npc": i }), Some(i as u64));
        }
        assert_eq!(bus.recent.len(), MAX_EVENTS);
        assert_eq!(bus.dropped_events, 25);
        assert_eq!(bus.recent.front().and_then(|e| e.npc), Some(25));
    }

    #[test]
    fn events_carry_current_frame() {
        let mut app = App::new();
        app.init_resource::<GameEventBus>()
            .add_systems(Update, tick_event_frame);
        app.update();
        app.update();
        let mut bus = app.world_mut().resource_mut::<GameEventBus>();
        bus.emit("camera_selected", serde_json::json!({ "camera": 2 }), None);
        assert_eq!(bus.recent.back().map(|e| e.frame), Some(2));
        assert_eq!(bus.recent.len(), 1);
        assert_eq!(bus.recent[0].name, "camera_selected");
    }
}
