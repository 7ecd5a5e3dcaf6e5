use bevy::prelude::*;

use crate::rng::SimRng;

const BUILDING_MIN_SIDE: i32 = 50;
const BUILDING_MAX_SIDE: i32 = 150;

/// Decorative city block in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Building {
    pub min: Vec2,
    pub size: Vec2,
}

#[derive(Resource, Clone, Debug, Default)]
pub struct CityLayout {
    pub buildings: Vec<Building>,
}

/// Scatter `count` buildings whose top-left corner keeps a
/// `BUILDING_MAX_SIDE` margin from the right and bottom map edges.
pub fn generate_buildings(rng: &mut SimRng, map: Vec2, count: usize) -> CityLayout {
    let max_x = (map.x as i32 - BUILDING_MAX_SIDE).max(0);
    let max_y = (map.y as i32 - BUILDING_MAX_SIDE).max(0);
    let buildings = (0..count)
        .map(|_| {
            let x = rng.range_inclusive(0, max_x);
            let y = rng.range_inclusive(0, max_y);
            let w = rng.range_inclusive(BUILDING_MIN_SIDE, BUILDING_MAX_SIDE);
            let h = rng.range_inclusive(BUILDING_MIN_SIDE, BUILDING_MAX_SIDE);
            Building {
                min: Vec2::new(x as f32, y as f32),
                size: Vec2::new(w as f32, h as f32),
            }
        })
        .collect();
    CityLayout { buildings }
}

pub struct LayoutPlugin;

impl Plugin for LayoutPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CityLayout>()
            .add_systems(Startup, build_layout);
    }
}

pub fn build_layout(
    config: Res<crate::config::SessionConfig>,
    mut rng: ResMut<SimRng>,
    mut layout: ResMut<CityLayout>,
) {
    *layout = generate_buildings(&mut rng, config.map_size(), config.building_count);
    debug!("[Camwatch] Placed {} buildings", layout.buildings.len());
}
