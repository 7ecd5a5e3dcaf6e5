use bevy::prelude::*;

use crate::config::SessionConfig;
use crate::viewport::{HitBox, ViewRect, Viewport};

/// Half the side of the square around an icon that selects its camera.
pub const ICON_HIT_HALF_EXTENT: f32 = 10.0;

/// A fixed security camera. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct SecurityCamera {
    icon: Vec2,
    view: ViewRect,
}

impl SecurityCamera {
    pub fn new(icon: Vec2, view: ViewRect) -> Self {
        Self { icon, view }
    }

    pub fn icon(&self) -> Vec2 {
        self.icon
    }

    pub fn view(&self) -> &ViewRect {
        &self.view
    }

    pub fn icon_hit_box(&self) -> HitBox {
        HitBox::centered(self.icon, ICON_HIT_HALF_EXTENT)
    }

    pub fn viewport(&self, display: Vec2) -> Viewport {
        Viewport::fit(&self.view, display)
    }
}

/// All cameras of the session, indexed in config order.
#[derive(Resource, Clone, Debug, Default)]
pub struct CameraRig {
    cameras: Vec<SecurityCamera>,
}

impl CameraRig {
    pub fn new(cameras: Vec<SecurityCamera>) -> Self {
        Self { cameras }
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self, String> {
        let cameras = config
            .cameras
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let [x, y, w, h] = spec.view;
                ViewRect::new(x, y, w, h)
                    .map(|view| SecurityCamera::new(Vec2::from(spec.icon), view))
                    .map_err(|e| format!("camera {index}: {e}"))
            })
            .collect::<Result<Vec<_>, String>>()?;
        Ok(Self::new(cameras))
    }

    pub fn get(&self, index: usize) -> Option<&SecurityCamera> {
        self.cameras.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SecurityCamera> {
        self.cameras.iter()
    }

    /// Camera whose icon hit-box contains `pointer`. Overlapping icons resolve
    /// to the one listed last, as it is drawn on top.
    pub fn icon_at(&self, pointer: Vec2) -> Option<usize> {
        self.cameras
            .iter()
            .rposition(|cam| cam.icon_hit_box().contains(pointer))
    }
}
