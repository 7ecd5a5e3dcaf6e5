use std::time::Duration;

use bevy::prelude::*;

use crate::components::{Behavior, NpcId, NpcTint};
use crate::config::SessionConfig;
use crate::rng::SimRng;

/// Simulation time, advanced only by the fixed tick driver.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct SimClock {
    elapsed: Duration,
    ticks: u64,
}

impl SimClock {
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
        self.ticks = self.ticks.saturating_add(1);
    }

    pub fn now_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Behavior re-roll parameters.
#[derive(Clone, Copy, Debug)]
pub struct RerollRule {
    pub interval_ms: u64,
    pub suspicious_probability: f32,
}

impl RerollRule {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            interval_ms: config.state_reroll_ms,
            suspicious_probability: config.suspicious_probability,
        }
    }
}

#[derive(Component, Clone, Debug, PartialEq)]
pub struct Npc {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub behavior: Behavior,
    pub captured: bool,
    /// Sim time (ms) of the last behavior roll.
    pub rolled_at_ms: u64,
}

impl Npc {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, now_ms: u64) -> Self {
        Self {
            position,
            velocity,
            radius,
            behavior: Behavior::Normal,
            captured: false,
            rolled_at_ms: now_ms,
        }
    }

    /// Random position inside `bounds`, each velocity component in `[-max_speed, max_speed)`.
    pub fn random(
        rng: &mut SimRng,
        bounds: Vec2,
        radius: f32,
        max_speed: f32,
        now_ms: u64,
    ) -> Self {
        let position = Vec2::new(rng.range_f32(0.0, bounds.x), rng.range_f32(0.0, bounds.y));
        let velocity = Vec2::new(
            rng.range_f32(-1.0, 1.0) * max_speed,
            rng.range_f32(-1.0, 1.0) * max_speed,
        );
        Self::new(position, velocity, radius, now_ms)
    }

    /// Advances one tick: move, bounce off the map edges, and re-roll behavior
    /// once the interval has elapsed. Captured NPCs are frozen.
    pub fn update(&mut self, bounds: Vec2, now_ms: u64, rule: &RerollRule, rng: &mut SimRng) {
        if self.captured {
            return;
        }

        // The position is not clamped; an overshoot walks back on the next tick.
        self.position += self.velocity;
        if self.position.x <= 0.0 || self.position.x >= bounds.x {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y <= 0.0 || self.position.y >= bounds.y {
            self.velocity.y = -self.velocity.y;
        }

        if now_ms.saturating_sub(self.rolled_at_ms) > rule.interval_ms {
            self.behavior = if rng.chance(rule.suspicious_probability) {
                Behavior::Suspicious
            } else {
                Behavior::Normal
            };
            self.rolled_at_ms = now_ms;
        }
    }

    pub fn tint(&self) -> NpcTint {
        if self.captured {
            return NpcTint::Captured;
        }
        match self.behavior {
            Behavior::Normal => NpcTint::Normal,
            Behavior::Suspicious => NpcTint::Suspicious,
        }
    }

    pub fn is_capturable(&self) -> bool {
        !self.captured && self.behavior == Behavior::Suspicious
    }
}

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimClock>()
            .add_systems(Startup, spawn_npcs.after(crate::layout::build_layout))
            .add_systems(
                FixedUpdate,
                (advance_clock, update_npcs)
                    .chain()
                    .after(crate::session::resolve_clicks),
            );
    }
}

pub fn spawn_npcs(
    mut commands: Commands,
    config: Res<SessionConfig>,
    clock: Res<SimClock>,
    mut rng: ResMut<SimRng>,
) {
    let bounds = config.map_size();
    for i in 0..config.npc_count {
        let npc = Npc::random(
            &mut rng,
            bounds,
            config.npc_radius,
            config.npc_max_speed,
            clock.now_ms(),
        );
        commands.spawn((NpcId(i as u64), npc));
    }
    info!("[Camwatch] Spawned {} NPCs", config.npc_count);
}

fn advance_clock(time: Res<Time>, mut clock: ResMut<SimClock>) {
    clock.advance(time.delta());
}

pub fn update_npcs(
    config: Res<SessionConfig>,
    clock: Res<SimClock>,
    mut rng: ResMut<SimRng>,
    mut npcs: Query<&mut Npc>,
) {
    let bounds = config.map_size();
    let rule = RerollRule::from_config(&config);
    let now_ms = clock.now_ms();
    for mut npc in npcs.iter_mut() {
        npc.update(bounds, now_ms, &rule, &mut rng);
    }
}
