use std::ops::DerefMut;

use bevy::prelude::*;

use crate::cameras::CameraRig;
use crate::components::NpcId;
use crate::config::SessionConfig;
use crate::events::GameEventBus;
use crate::input::{PointerClick, PointerQueue};
use crate::npc::Npc;
use crate::viewport::{HitBox, Viewport};

/// Screen-space "Back" control shown in camera view.
pub const BACK_BUTTON: HitBox = HitBox::new(10.0, 10.0, 80.0, 30.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Map,
    CameraView(usize),
}

/// Mode, selected camera and score. Changed only through [`Session::handle_click`].
#[derive(Resource, Clone, Debug, Default)]
pub struct Session {
    mode: ViewMode,
    score: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not a left-button press.
    Ignored,
    CameraSelected(usize),
    ReturnedToMap,
    Captured(Vec<NpcId>),
    Missed,
}

impl Session {
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selected_camera(&self) -> Option<usize> {
        match self.mode {
            ViewMode::Map => None,
            ViewMode::CameraView(index) => Some(index),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Viewport of the active view: identity on the map, fitted to the
    /// selected camera otherwise.
    pub fn viewport(&self, rig: &CameraRig, display: Vec2) -> Viewport {
        self.selected_camera()
            .and_then(|index| rig.get(index))
            .map_or(Viewport::IDENTITY, |cam| cam.viewport(display))
    }

    /// Applies one pointer click. In camera view every suspicious, uncaptured
    /// NPC under the pointer is captured and scores a point.
    pub fn handle_click<I, N>(
        &mut self,
        click: &PointerClick,
        rig: &CameraRig,
        display: Vec2,
        npcs: I,
    ) -> ClickOutcome
    where
        I: IntoIterator<Item = (NpcId, N)>,
        N: DerefMut<Target = Npc>,
    {
        if click.button != MouseButton::Left {
            return ClickOutcome::Ignored;
        }
        let pointer = click.position;

        let index = match self.mode {
            ViewMode::Map => {
                return match rig.icon_at(pointer) {
                    Some(index) => {
                        self.mode = ViewMode::CameraView(index);
                        ClickOutcome::CameraSelected(index)
                    }
                    None => ClickOutcome::Missed,
                };
            }
            ViewMode::CameraView(index) => index,
        };

        if BACK_BUTTON.contains(pointer) {
            self.mode = ViewMode::Map;
            return ClickOutcome::ReturnedToMap;
        }
        let Some(camera) = rig.get(index) else {
            return ClickOutcome::Missed;
        };

        let viewport = camera.viewport(display);
        let mut captured = Vec::new();
        for (id, mut npc) in npcs {
            if !camera.view().intersects_circle_bounds(npc.position, npc.radius) {
                continue;
            }
            if !viewport.hits_circle(pointer, npc.position, npc.radius) {
                continue;
            }
            if npc.is_capturable() {
                npc.captured = true;
                self.score = self.score.saturating_add(1);
                captured.push(id);
            }
        }

        if captured.is_empty() {
            ClickOutcome::Missed
        } else {
            ClickOutcome::Captured(captured)
        }
    }
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Session>()
            .init_resource::<PointerQueue>()
            .add_systems(FixedUpdate, resolve_clicks);
    }
}

/// Drains queued clicks in arrival order, each fully applied before the next.
pub fn resolve_clicks(
    config: Res<SessionConfig>,
    rig: Res<CameraRig>,
    mut queue: ResMut<PointerQueue>,
    mut session: ResMut<Session>,
    mut bus: ResMut<GameEventBus>,
    mut npcs: Query<(&NpcId, &mut Npc)>,
) {
    if queue.is_empty() {
        return;
    }
    let display = config.display_size();
    for click in queue.drain() {
        let outcome = session.handle_click(
            &click,
            &rig,
            display,
            npcs.iter_mut().map(|(id, npc)| (*id, npc)),
        );
        match outcome {
            ClickOutcome::CameraSelected(index) => {
                info!("[Camwatch] Switched to camera {}", index);
                bus.emit("camera_selected", serde_json::json!({ "camera": index }), None);
            }
            ClickOutcome::ReturnedToMap => {
                info!("[Camwatch] Returned to map");
                bus.emit("camera_closed", serde_json::json!({}), None);
            }
            ClickOutcome::Captured(ids) => {
                for id in ids {
                    info!(
                        "[Camwatch] Captured NPC {} (score {})",
                        id.0,
                        session.score()
                    );
                    bus.emit(
                        "npc_captured",
                        serde_json::json!({ "npc": id.0, "score": session.score() }),
                        Some(id.0),
                    );
                }
            }
            ClickOutcome::Missed => {
                let world = session.viewport(&rig, display).unproject(click.position);
                debug!(
                    "[Camwatch] Click at {:?} (world {:?}) hit nothing",
                    click.position, world
                );
            }
            ClickOutcome::Ignored => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Behavior;

    const DISPLAY: Vec2 = Vec2::new(1000.0, 700.0);

    fn rig() -> CameraRig {
        CameraRig::from_config(&SessionConfig::default()).expect("valid cameras")
    }

    fn left(x: f32, y: f32) -> PointerClick {
        PointerClick {
            position: Vec2::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn suspicious_at(x: f32, y: f32) -> Npc {
        let mut npc = Npc::new(Vec2::new(x, y), Vec2::ZERO, 10.0, 0);
        npc.behavior = Behavior::Suspicious;
        npc
    }

    fn click(session: &mut Session, c: PointerClick, npcs: &mut [Npc]) -> ClickOutcome {
        session.handle_click(
            &c,
            &rig(),
            DISPLAY,
            npcs.iter_mut()
                .enumerate()
                .map(|(i, npc)| (NpcId(i as u64), npc)),
        )
    }

    #[test]
    fn starts_on_map_with_zero_score() {
        let session = Session::default();
        assert_eq!(session.mode(), ViewMode::Map);
        assert_eq!(session.selected_camera(), None);
        assert_eq!(session.score(), 0);
        assert_eq!(session.viewport(&rig(), DISPLAY), Viewport::IDENTITY);
    }

    #[test]
    fn icon_click_selects_camera() {
        let mut session = Session::default();
        let outcome = click(&mut session, left(845.0, 155.0), &mut []);
        assert_eq!(outcome, ClickOutcome::CameraSelected(1));
        assert_eq!(session.mode(), ViewMode::CameraView(1));
        assert_eq!(session.selected_camera(), Some(1));
        let vp = session.viewport(&rig(), DISPLAY);
        assert_eq!(vp.offset, Vec2::new(700.0, 100.0));
    }

    #[test]
    fn click_elsewhere_on_map_keeps_mode() {
        let mut session = Session::default();
        let mut npcs = [suspicious_at(500.0, 350.0)];
        let outcome = click(&mut session, left(500.0, 350.0), &mut npcs);
        assert_eq!(outcome, ClickOutcome::Missed);
        assert_eq!(session.mode(), ViewMode::Map);
        assert!(!npcs[0].captured, "map mode never captures");
    }

    #[test]
    fn non_left_buttons_are_ignored() {
        let mut session = Session::default();
        let right = PointerClick {
            position: Vec2::new(150.0, 150.0),
            button: MouseButton::Right,
        };
        assert_eq!(click(&mut session, right, &mut []), ClickOutcome::Ignored);
        assert_eq!(session.mode(), ViewMode::Map);
    }

    #[test]
    fn back_button_returns_to_map() {
        let mut session = Session::default();
        click(&mut session, left(150.0, 150.0), &mut []);
        assert_eq!(session.mode(), ViewMode::CameraView(0));
        assert_eq!(click(&mut session, left(89.0, 39.0), &mut []), ClickOutcome::ReturnedToMap);
        assert_eq!(session.mode(), ViewMode::Map);
        assert_eq!(session.selected_camera(), None);
    }

    #[test]
    fn capture_scores_once() {
        let mut session = Session::default();
        click(&mut session, left(150.0, 150.0), &mut []);

        let mut npcs = [suspicious_at(150.0, 150.0)];
        let outcome = click(&mut session, left(166.7, 166.7), &mut npcs);
        assert_eq!(outcome, ClickOutcome::Captured(vec![NpcId(0)]));
        assert_eq!(session.score(), 1);
        assert!(npcs[0].captured);

        for _ in 0..5 {
            let again = click(&mut session, left(166.7, 166.7), &mut npcs);
            assert_eq!(again, ClickOutcome::Missed);
        }
        assert_eq!(session.score(), 1);
        assert!(npcs[0].captured);
    }

    #[test]
    fn click_radius_scales_with_camera() {
        let mut session = Session::default();
        click(&mut session, left(150.0, 150.0), &mut []);
        let mut npcs = [suspicious_at(150.0, 150.0)];
        // 40 px away: outside 33.3 px radius.
        assert_eq!(click(&mut session, left(206.7, 166.7), &mut npcs), ClickOutcome::Missed);
        // 30 px away: inside.
        let outcome = click(&mut session, left(196.7, 166.7), &mut npcs);
        assert_eq!(outcome, ClickOutcome::Captured(vec![NpcId(0)]));
    }

    #[test]
    fn normal_npcs_are_not_captured() {
        let mut session = Session::default();
        click(&mut session, left(150.0, 150.0), &mut []);
        let mut npcs = [Npc::new(Vec2::new(150.0, 150.0), Vec2::ZERO, 10.0, 0)];
        assert_eq!(click(&mut session, left(166.7, 166.7), &mut npcs), ClickOutcome::Missed);
        assert!(!npcs[0].captured);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn npcs_outside_the_view_are_filtered_before_hit_test() {
        let mut session = Session::default();
        click(&mut session, left(150.0, 150.0), &mut []);
        let mut npcs = [suspicious_at(60.0, 60.0)];
        let projected = session.viewport(&rig(), DISPLAY).project(npcs[0].position);
        let on_projection = PointerClick {
            position: projected,
            button: MouseButton::Left,
        };
        assert_eq!(click(&mut session, on_projection, &mut npcs), ClickOutcome::Missed);
        assert!(!npcs[0].captured);
    }

    #[test]
    fn overlapping_suspects_are_all_captured() {
        let mut session = Session::default();
        click(&mut session, left(150.0, 150.0), &mut []);
        let mut npcs = [
            suspicious_at(150.0, 150.0),
            suspicious_at(152.0, 150.0),
            Npc::new(Vec2::new(151.0, 150.0), Vec2::ZERO, 10.0, 0),
        ];
        let outcome = click(&mut session, left(170.0, 166.7), &mut npcs);
        assert_eq!(outcome, ClickOutcome::Captured(vec![NpcId(0), NpcId(1)]));
        assert_eq!(session.score(), 2);
        assert!(!npcs[2].captured);
    }

    #[test]
    fn resolve_clicks_system_drains_queue_in_order() {
        let mut app = App::new();
        app.insert_resource(SessionConfig::default())
            .insert_resource(rig())
            .insert_resource(GameEventBus::default())
            .init_resource::<Session>()
            .init_resource::<PointerQueue>()
            .add_systems(Update, resolve_clicks);
        let npc = app
            .world_mut()
            .spawn((NpcId(7), suspicious_at(850.0, 550.0)))
            .id();

        {
            let mut queue = app.world_mut().resource_mut::<PointerQueue>();
            queue.push(left(850.0, 550.0));
            queue.push(left(500.0, 166.7));
            queue.push(left(500.0, 166.7));
        }
        app.update();

        let world = app.world();
        assert_eq!(world.resource::<Session>().score(), 1);
        assert_eq!(world.resource::<Session>().mode(), ViewMode::CameraView(3));
        assert!(world.get::<Npc>(npc).expect("npc").captured);
        assert!(world.resource::<PointerQueue>().is_empty());
        let names: Vec<&str> = world
            .resource::<GameEventBus>()
            .recent
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["camera_selected", "npc_captured"]);
    }
}
