use std::collections::VecDeque;

use bevy::input::mouse::MouseButtonInput;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// A pointer press in screen space (top-left origin, y down, logical pixels).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerClick {
    pub position: Vec2,
    pub button: MouseButton,
}

/// Presses waiting for the next simulation tick, oldest first.
#[derive(Resource, Default, Clone, Debug)]
pub struct PointerQueue {
    pending: VecDeque<PointerClick>,
}

impl PointerQueue {
    pub fn push(&mut self, click: PointerClick) {
        self.pending.push_back(click);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = PointerClick> + '_ {
        self.pending.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Map-mode overlay of every camera's view rectangle.
#[derive(Resource, Default, Clone, Copy)]
pub struct ViewOverlayToggle(pub bool);

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerQueue>()
            .init_resource::<ViewOverlayToggle>()
            .add_systems(
                PreUpdate,
                (
                    queue_pointer_presses,
                    toggle_view_overlay.run_if(resource_exists::<ButtonInput<KeyCode>>),
                ),
            );
    }
}

/// Translate window mouse presses into queued clicks
fn queue_pointer_presses(
    mut presses: EventReader<MouseButtonInput>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut queue: ResMut<PointerQueue>,
) {
    let Ok(window) = windows.get_single() else {
        presses.clear();
        return;
    };
    let Some(position) = window.cursor_position() else {
        presses.clear();
        return;
    };
    for press in presses.read() {
        if press.state != ButtonState::Pressed {
            continue;
        }
        queue.push(PointerClick {
            position,
            button: press.button,
        });
    }
}

fn toggle_view_overlay(keyboard: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<ViewOverlayToggle>) {
    if keyboard.just_pressed(KeyCode::KeyV) {
        overlay.0 = !overlay.0;
        info!("[Camwatch] View overlay {}", if overlay.0 { "on" } else { "off" });
    }
}
