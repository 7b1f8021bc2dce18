//! Orbit controls for the scene camera.
//!
//! The camera starts where the scene file puts it. Dragging with the left
//! mouse button circles the look-at point, the wheel moves in and out, and
//! Escape quits.

use std::f32::consts::FRAC_PI_2;

use bevy::ecs::message::MessageWriter;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;

/// Radians of turn per pixel of drag.
const DRAG_SENSITIVITY: f32 = 0.005;
/// Distance multiplier per scroll line.
const ZOOM_STEP: f32 = 0.9;
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 50.0;
/// Stay just short of the poles so `looking_at` keeps a usable up vector.
const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

pub struct OrbitControlsPlugin;

impl Plugin for OrbitControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (quit_on_escape, orbit_camera));
    }
}

/// Spherical position of the camera around `target`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub target: Vec3,
    /// Angle about world Y, zero looking down -Z.
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Orbit {
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let pitch = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-MAX_PITCH, MAX_PITCH);
        Self {
            target,
            yaw: offset.x.atan2(offset.z),
            pitch,
            distance,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * self.distance
    }

    /// Turn by a mouse drag measured in pixels.
    pub fn drag(&mut self, delta: Vec2) {
        self.yaw -= delta.x * DRAG_SENSITIVITY;
        self.pitch = (self.pitch + delta.y * DRAG_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Positive `lines` move towards the target.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance * ZOOM_STEP.powf(lines)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn quit_on_escape(keyboard: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        tracing::info!("Escape pressed, exiting");
        exit.write(AppExit::Success);
    }
}

#[allow(clippy::needless_pass_by_value)]
fn orbit_camera(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    mut query: Query<(&mut Orbit, &mut Transform)>,
) {
    let drag = if buttons.pressed(MouseButton::Left) {
        motion.delta
    } else {
        Vec2::ZERO
    };
    if drag == Vec2::ZERO && scroll.delta.y == 0.0 {
        return;
    }

    for (mut orbit, mut transform) in &mut query {
        orbit.drag(drag);
        orbit.zoom(scroll.delta.y);
        *transform = orbit.transform();
    }
}
