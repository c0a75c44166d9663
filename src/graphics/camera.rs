use crate::{level::level::*, schedule::UpdateStage};
use bevy::{input::mouse::MouseWheel, prelude::*};

const KEYBOARD_PAN_SPEED: f32 = 600.0;
const ZOOM_STEP: f32 = 0.1;
const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 4.0;

#[derive(Component, Debug)]
pub struct PlayerCameraController {
    mouse_panning_last_position: Vec2,
    pub mouse_panning_in_progress: bool,
    pub keyboard_panning_in_progress: bool,
}

impl PlayerCameraController {
    fn new() -> Self {
        Self {
            mouse_panning_last_position: Vec2::ZERO,
            mouse_panning_in_progress: false,
            keyboard_panning_in_progress: false,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.mouse_panning_in_progress || self.keyboard_panning_in_progress
    }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera).add_systems(
            Update,
            (keyboard_panning, mouse_zoom, mouse_panning).in_set(UpdateStage::UpdateView),
        );
    }
}

// Looks at the first starting structure, or the origin when there is none.
fn spawn_camera(mut commands: Commands, level: Option<Res<Level>>, settings: Res<GridSettings>) {
    let focus = level
        .and_then(|level| level.structures.first().map(|structure| structure.cell))
        .map(|[x, y]| Vec2::new(x as f32 + 0.5, y as f32 + 0.5) * settings.cell_size)
        .unwrap_or(Vec2::ZERO);

    commands.spawn((
        Camera2dBundle {
            camera: Camera {
                clear_color: ClearColorConfig::Custom(Color::srgb(0.1, 0.1, 0.12)),
                ..default()
            },
            transform: Transform::from_translation(focus.extend(999.9)),
            ..default()
        },
        PlayerCameraController::new(),
    ));
}

fn keyboard_panning(
    mut query: Query<(&mut Transform, &mut PlayerCameraController, &OrthographicProjection)>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    if let Ok((mut transform, mut controller, projection)) = query.get_single_mut() {
        let mut delta = Vec2::ZERO;

        if keyboard.pressed(KeyCode::KeyW) {
            delta.y += 1.0;
        }
        if keyboard.pressed(KeyCode::KeyS) {
            delta.y -= 1.0;
        }
        if keyboard.pressed(KeyCode::KeyA) {
            delta.x -= 1.0;
        }
        if keyboard.pressed(KeyCode::KeyD) {
            delta.x += 1.0;
        }

        let step = delta.normalize_or_zero() * KEYBOARD_PAN_SPEED * projection.scale * time.delta_seconds();
        transform.translation += step.extend(0.0);

        controller.keyboard_panning_in_progress = delta != Vec2::ZERO;
    }
}

fn mouse_zoom(mut query: Query<&mut OrthographicProjection, With<PlayerCameraController>>, mut mouse_wheel: EventReader<MouseWheel>) {
    if let Ok(mut projection) = query.get_single_mut() {
        for scroll in mouse_wheel.read() {
            let factor = 1.0 - scroll.y.signum() * ZOOM_STEP;
            projection.scale = (projection.scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }
}

fn mouse_panning(
    mut query: Query<(&mut Transform, &mut PlayerCameraController, &OrthographicProjection)>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if let Ok((mut transform, mut controller, projection)) = query.get_single_mut() {
        if mouse.just_pressed(MouseButton::Right) {
            if let Some(cursor_position) = window.cursor_position() {
                controller.mouse_panning_last_position = cursor_position;
                controller.mouse_panning_in_progress = true;
            }
        } else if mouse.just_released(MouseButton::Right) {
            controller.mouse_panning_in_progress = false;
        }

        if controller.mouse_panning_in_progress {
            if let Some(cursor_position) = window.cursor_position() {
                // Screen space grows downward, world space upward.
                let drag = cursor_position - controller.mouse_panning_last_position;
                transform.translation.x -= drag.x * projection.scale;
                transform.translation.y += drag.y * projection.scale;
                controller.mouse_panning_last_position = cursor_position;
            }
        }
    }
}
