//! Dice frame-advance and result display systems

use bevy::prelude::*;

use crate::dice3d::animator::DiceAnimator;
use crate::dice3d::systems::setup::{BUTTON_RED, BUTTON_RED_DIM};
use crate::dice3d::types::*;

/// Advance the animation core by one frame and mirror its orientation
/// into the cube's transform.
pub fn advance_dice(
    time: Res<Time>,
    mut animator: ResMut<DiceAnimator>,
    mut last_roll: ResMut<LastRoll>,
    labels: Res<FaceLabels>,
    mut die_query: Query<&mut Transform, With<DieCube>>,
) {
    let outcome = animator.tick(time.delta_secs());

    for mut transform in die_query.iter_mut() {
        transform.rotation = animator.orientation().to_quat();
    }

    if let TickOutcome::Finished(face) = outcome {
        last_roll.face = Some(face);
        if labels.is_custom() {
            info!("Rolled {} ({})", face.value(), labels.label_for(face));
        } else {
            info!("Rolled {}", face.value());
        }
    }
}

/// Keep the headline result and the hint line in sync with the widget.
pub fn update_results_display(
    animator: Res<DiceAnimator>,
    last_roll: Res<LastRoll>,
    labels: Res<FaceLabels>,
    mut result_query: Query<&mut Text, With<ResultText>>,
    mut hint_query: Query<&mut Text, (With<InstructionText>, Without<ResultText>)>,
) {
    for mut text in result_query.iter_mut() {
        text.0 = if animator.is_rolling() {
            "Rolling...".to_string()
        } else {
            match last_roll.face {
                Some(face) => labels.label_for(face),
                None => "...".to_string(),
            }
        };
    }

    for mut text in hint_query.iter_mut() {
        text.0 = if animator.is_rolling() {
            "Watch the dice roll!"
        } else {
            "Drag to rotate - Space or Roll Dice to throw"
        }
        .to_string();
    }
}

/// Dim the Roll button and swap its label while a roll is in flight.
pub fn update_roll_button(
    animator: Res<DiceAnimator>,
    mut button_query: Query<&mut BackgroundColor, With<RollButton>>,
    mut label_query: Query<&mut Text, With<RollButtonLabel>>,
) {
    let rolling = animator.is_rolling();

    for mut background in button_query.iter_mut() {
        background.0 = if rolling { BUTTON_RED_DIM } else { BUTTON_RED };
    }
    for mut text in label_query.iter_mut() {
        text.0 = if rolling { "Rolling..." } else { "Roll Dice" }.to_string();
    }
}
