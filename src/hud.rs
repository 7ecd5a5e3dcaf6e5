use bevy::prelude::*;

use crate::config::SessionConfig;
use crate::session::{Session, ViewMode, BACK_BUTTON};

const HUD_FONT_SIZE: f32 = 20.0;
const MAP_HINT: &str = "Map Mode - Click a camera icon to switch to view mode.";
const CAMERA_HINT: &str =
    "Camera View - Click on suspicious individuals. Press Back to return to map.";

#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct HintText;

#[derive(Component)]
struct BackButton;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, (update_score_text, update_mode_widgets));
    }
}

pub fn score_label(score: u32) -> String {
    format!("Score: {score}")
}

pub fn hint_for(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Map => MAP_HINT,
        ViewMode::CameraView(_) => CAMERA_HINT,
    }
}

fn spawn_hud(mut commands: Commands, config: Res<SessionConfig>) {
    let font = TextFont {
        font_size: HUD_FONT_SIZE,
        ..default()
    };

    commands.spawn((
        Text::new(score_label(0)),
        font.clone(),
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(config.map_width - 120.0),
            top: Val::Px(10.0),
            ..default()
        },
        ScoreText,
    ));

    commands.spawn((
        Text::new(MAP_HINT),
        font.clone(),
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(config.map_height - 30.0),
            ..default()
        },
        HintText,
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(BACK_BUTTON.min.x),
                top: Val::Px(BACK_BUTTON.min.y),
                width: Val::Px(BACK_BUTTON.size.x),
                height: Val::Px(BACK_BUTTON.size.y),
                border: UiRect::all(Val::Px(2.0)),
                padding: UiRect::new(Val::Px(8.0), Val::Px(0.0), Val::Px(3.0), Val::Px(0.0)),
                ..default()
            },
            BackgroundColor(Color::srgb(100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0)),
            BorderColor(Color::WHITE),
            Visibility::Hidden,
            BackButton,
        ))
        .with_children(|button| {
            button.spawn((Text::new("Back"), font, TextColor(Color::WHITE)));
        });
}

fn update_score_text(session: Res<Session>, mut query: Query<&mut Text, With<ScoreText>>) {
    if !session.is_changed() {
        return;
    }
    for mut text in query.iter_mut() {
        text.0 = score_label(session.score());
    }
}

fn update_mode_widgets(
    session: Res<Session>,
    config: Res<SessionConfig>,
    mut hints: Query<(&mut Text, &mut Node), (With<HintText>, Without<BackButton>)>,
    mut buttons: Query<&mut Visibility, With<BackButton>>,
) {
    if !session.is_changed() {
        return;
    }
    let mode = session.mode();
    for (mut text, mut node) in hints.iter_mut() {
        text.0 = hint_for(mode).to_string();
        // The camera hint sits at the top next to the Back button.
        match mode {
            ViewMode::Map => {
                node.left = Val::Px(10.0);
                node.top = Val::Px(config.map_height - 30.0);
            }
            ViewMode::CameraView(_) => {
                node.left = Val::Px(config.map_width * 0.5 - 300.0);
                node.top = Val::Px(10.0);
            }
        }
    }
    for mut visibility in buttons.iter_mut() {
        *visibility = match mode {
            ViewMode::Map => Visibility::Hidden,
            ViewMode::CameraView(_) => Visibility::Inherited,
        };
    }
}
