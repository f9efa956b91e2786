//! Input handling systems
//!
//! Roll triggers (Space key, Roll button) and pointer-drag rotation.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::dice3d::animator::DiceAnimator;
use crate::dice3d::types::*;

/// Start a roll on Space or a Roll-button press.
pub fn handle_roll_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    interactions: Query<&Interaction, (Changed<Interaction>, With<RollButton>)>,
    mut animator: ResMut<DiceAnimator>,
    mut last_roll: ResMut<LastRoll>,
) {
    let button_pressed = interactions.iter().any(|i| *i == Interaction::Pressed);
    if !button_pressed && !keyboard.just_pressed(KeyCode::Space) {
        return;
    }

    // The animator no-ops on re-entry; skip clearing the shown result too.
    if animator.is_rolling() {
        return;
    }

    last_roll.face = None;
    animator.start_roll(&mut rand::thread_rng());
}

/// Translate left-button cursor drags into gesture input for the core.
pub fn handle_drag_input(
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    buttons: Query<&Interaction, With<Button>>,
    mut pointer: ResMut<PointerDrag>,
    mut animator: ResMut<DiceAnimator>,
) {
    if mouse.just_released(MouseButton::Left) {
        if pointer.origin.take().is_some() {
            animator.on_drag_release();
        }
        return;
    }

    if !mouse.pressed(MouseButton::Left) {
        return;
    }

    if animator.is_rolling() {
        pointer.origin = None;
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    if mouse.just_pressed(MouseButton::Left) {
        // Don't grab drags that start on a UI control.
        if buttons.iter().any(|i| *i != Interaction::None) {
            return;
        }
        pointer.origin = Some(cursor);
        return;
    }

    let Some(origin) = pointer.origin else {
        return;
    };
    let delta = cursor - origin;
    animator.on_drag_move(delta.x, delta.y, time.elapsed_secs_f64());
}
