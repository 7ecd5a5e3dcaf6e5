use bevy::prelude::*;

use crate::cameras::CameraRig;
use crate::components::NpcTint;
use crate::config::SessionConfig;
use crate::input::ViewOverlayToggle;
use crate::layout::CityLayout;
use crate::npc::Npc;
use crate::session::{Session, ViewMode};

const BACKGROUND: Color = Color::srgb(50.0 / 255.0, 50.0 / 255.0, 50.0 / 255.0);
const BUILDING: Color = Color::srgb(100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0);
const CAMERA_ICON: Color = Color::srgb(1.0, 1.0, 0.0);
const CAMERA_ICON_RIM: Color = Color::BLACK;
const VIEW_OUTLINE: Color = Color::srgb(1.0, 165.0 / 255.0, 0.0);
const CAMERA_ICON_RADIUS: f32 = 10.0;

pub fn tint_color(tint: NpcTint) -> Color {
    match tint {
        NpcTint::Captured => BUILDING,
        NpcTint::Normal => Color::srgb(0.0, 0.0, 1.0),
        NpcTint::Suspicious => Color::srgb(1.0, 0.0, 0.0),
    }
}

/// Screen space (top-left origin, y down) to the 2D camera's world space
/// (center origin, y up).
pub fn screen_to_canvas(screen: Vec2, display: Vec2) -> Vec2 {
    Vec2::new(screen.x - display.x * 0.5, display.y * 0.5 - screen.y)
}

/// A circle ready to draw: screen-space center and radius plus its color class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NpcSprite {
    pub center: Vec2,
    pub radius: f32,
    pub tint: NpcTint,
}

/// NPCs visible in the active view, projected with the same viewport the
/// click resolver uses.
pub fn visible_npcs<'a>(
    session: &Session,
    rig: &CameraRig,
    display: Vec2,
    npcs: impl IntoIterator<Item = &'a Npc>,
) -> Vec<NpcSprite> {
    let viewport = session.viewport(rig, display);
    let view = session.selected_camera().and_then(|i| rig.get(i)).map(|c| *c.view());
    npcs.into_iter()
        .filter(|npc| {
            view.map_or(true, |v| v.intersects_circle_bounds(npc.position, npc.radius))
        })
        .map(|npc| NpcSprite {
            center: viewport.project(npc.position),
            radius: viewport.project_radius(npc.radius),
            tint: npc.tint(),
        })
        .collect()
}

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND))
            .add_systems(Startup, spawn_canvas_camera)
            .add_systems(Update, draw_scene);
    }
}

fn spawn_canvas_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn draw_scene(
    mut gizmos: Gizmos,
    config: Res<SessionConfig>,
    session: Res<Session>,
    rig: Res<CameraRig>,
    layout: Res<CityLayout>,
    overlay: Res<ViewOverlayToggle>,
    npcs: Query<&Npc>,
) {
    let display = config.display_size();

    match session.mode() {
        ViewMode::Map => {
            for b in &layout.buildings {
                solid_rect(&mut gizmos, display, b.min, b.min + b.size, BUILDING);
            }
            for cam in rig.iter() {
                disc(&mut gizmos, display, cam.icon(), CAMERA_ICON_RADIUS - 2.0, CAMERA_ICON);
                let rim = screen_to_canvas(cam.icon(), display);
                gizmos.circle_2d(rim, CAMERA_ICON_RADIUS, CAMERA_ICON_RIM);
                gizmos.circle_2d(rim, CAMERA_ICON_RADIUS - 1.0, CAMERA_ICON_RIM);
                if overlay.0 {
                    let v = cam.view();
                    let center = screen_to_canvas(v.origin() + v.size() * 0.5, display);
                    gizmos.rect_2d(center, v.size(), VIEW_OUTLINE);
                }
            }
        }
        ViewMode::CameraView(index) => {
            let Some(cam) = rig.get(index) else {
                return;
            };
            let viewport = cam.viewport(display);
            for b in &layout.buildings {
                if let Some((min, max)) = cam.view().clip(b.min.x, b.min.y, b.size.x, b.size.y) {
                    let (min, max) = (viewport.project(min), viewport.project(max));
                    solid_rect(&mut gizmos, display, min, max, BUILDING);
                }
            }
        }
    }

    for sprite in visible_npcs(&session, &rig, display, npcs.iter()) {
        disc(&mut gizmos, display, sprite.center, sprite.radius, tint_color(sprite.tint));
    }
}

/// Gizmos only stroke outlines; fill by stacking concentric rings.
fn disc(gizmos: &mut Gizmos, display: Vec2, center: Vec2, radius: f32, color: Color) {
    let center = screen_to_canvas(center, display);
    let mut r = radius;
    while r > 0.0 {
        gizmos.circle_2d(center, r, color);
        r -= 1.5;
    }
}

fn solid_rect(gizmos: &mut Gizmos, display: Vec2, min: Vec2, max: Vec2, color: Color) {
    let size = max - min;
    gizmos.rect_2d(screen_to_canvas(min + size * 0.5, display), size, color);
    let mut y = min.y + 3.0;
    while y < max.y {
        gizmos.line_2d(
            screen_to_canvas(Vec2::new(min.x, y), display),
            screen_to_canvas(Vec2::new(max.x, y), display),
            color,
        );
        y += 3.0;
    }
}
