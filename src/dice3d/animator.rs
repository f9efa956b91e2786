//! The roll/settle animation state machine and the idle drag controller.
//!
//! One `DiceAnimator` owns the cube's orientation at all times. While a
//! roll session is active it integrates tumble motion and then blends
//! toward the committed target face; while idle it applies drag input and
//! decaying fling inertia. The two modes never overlap: rolling suppresses
//! drag input entirely.

use bevy::prelude::Resource;
use rand::Rng;

use crate::dice3d::faces::{canonical_orientation, resolve_face, wrap_angle};
use crate::dice3d::types::{Face, Orientation, TickOutcome};

/// Duration of the free-spin phase, seconds.
pub const TUMBLE_DURATION: f32 = 2.0;
/// Duration of the settle phase, seconds.
pub const SETTLE_DURATION: f32 = 1.0;
/// Full roll length, seconds.
pub const ROLL_DURATION: f32 = TUMBLE_DURATION + SETTLE_DURATION;

const TUMBLE_BASE_SPEED: f32 = 18.0;
const TUMBLE_SPEED_SPREAD: f32 = 4.0;
// Tumble speed eases down to 15% of base by the end of the phase.
const TUMBLE_SPEED_DECAY: f32 = 0.85;
// Residual spin fades to 5% across the settle phase.
const SETTLE_RESIDUAL_DECAY: f32 = 0.95;
const ALIGN_GAIN: f32 = 3.0;
const START_IMPULSE: f32 = 0.25;

const DRAG_ROTATE_GAIN: f32 = 0.005;
const INERTIA_ROTATE_GAIN: f32 = 0.0001;
const INERTIA_DAMPING: f32 = 0.95;
const INERTIA_REST_THRESHOLD: f32 = 0.001;

// Slightly tilted idle pose so three faces are visible at launch.
const IDLE_TILT: Orientation = Orientation::new(0.4, 0.4, 0.0);

/// Fling velocity captured from drag gestures: pitch-rate and yaw-rate in
/// drag units per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragVelocity {
    pub x: f32,
    pub y: f32,
}

impl DragVelocity {
    const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// Ephemeral state of one roll, created on `start_roll` and destroyed when
/// the roll completes.
#[derive(Clone, Copy, Debug)]
struct RollSession {
    elapsed: f32,
    /// Per-axis spin weights, drawn once per roll.
    axis_weights: [f32; 3],
    /// Base angular speed for this roll, drawn once per roll.
    tumble_speed: f32,
    /// The committed outcome. `None` until the tumble phase ends; sampled
    /// exactly once at the tumble/settle boundary and never re-sampled.
    target: Option<Face>,
    /// Orientation at the moment the target was committed.
    settle_from: Orientation,
}

/// Cumulative pointer deltas of the active drag gesture plus the wall-clock
/// time they were observed at.
#[derive(Clone, Copy, Debug)]
struct GestureSample {
    dx: f32,
    dy: f32,
    time: f64,
}

#[derive(Resource)]
pub struct DiceAnimator {
    orientation: Orientation,
    /// Orientation baseline that cumulative drag deltas are applied on top
    /// of; frozen on release.
    drag_base: Orientation,
    session: Option<RollSession>,
    velocity: DragVelocity,
    dragging: bool,
    last_gesture: Option<GestureSample>,
}

impl Default for DiceAnimator {
    fn default() -> Self {
        Self {
            orientation: IDLE_TILT,
            drag_base: IDLE_TILT,
            session: None,
            velocity: DragVelocity::ZERO,
            dragging: false,
            last_gesture: None,
        }
    }
}

impl DiceAnimator {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_rolling(&self) -> bool {
        self.session.is_some()
    }

    /// The committed outcome of the roll in progress, once the settle phase
    /// has fixed it. `None` while idle or still tumbling.
    pub fn target_face(&self) -> Option<Face> {
        self.session.and_then(|session| session.target)
    }

    pub fn drag_velocity(&self) -> DragVelocity {
        self.velocity
    }

    /// Begin a roll. A no-op while a session is already active, so callers
    /// cannot corrupt a roll in progress.
    pub fn start_roll(&mut self, rng: &mut impl Rng) {
        if self.session.is_some() {
            return;
        }

        self.dragging = false;
        self.last_gesture = None;
        self.velocity = DragVelocity::ZERO;

        let axis_weights = [
            rng.gen_range(-1.5..1.5),
            rng.gen_range(-1.5..1.5),
            rng.gen_range(-1.0..1.0),
        ];
        let tumble_speed = TUMBLE_BASE_SPEED + rng.gen_range(0.0..TUMBLE_SPEED_SPREAD);

        // A small one-time kick so consecutive rolls never replay the same
        // arc from an identical pose.
        self.orientation.x += rng.gen_range(-START_IMPULSE..START_IMPULSE);
        self.orientation.y += rng.gen_range(-START_IMPULSE..START_IMPULSE);
        self.orientation.z += rng.gen_range(-START_IMPULSE..START_IMPULSE);

        self.session = Some(RollSession {
            elapsed: 0.0,
            axis_weights,
            tumble_speed,
            target: None,
            settle_from: self.orientation,
        });
    }

    /// Advance the widget by one frame.
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        if let Some(mut session) = self.session.take() {
            session.elapsed += dt;

            if session.elapsed < TUMBLE_DURATION {
                self.tumble(&session, dt);
            } else if session.elapsed < ROLL_DURATION {
                self.settle(&mut session, dt);
            } else {
                return TickOutcome::Finished(self.finish(session));
            }

            self.session = Some(session);
            return TickOutcome::Rolling;
        }

        if !self.dragging {
            self.coast();
        }
        TickOutcome::Idle
    }

    /// Feed a drag gesture: `dx`/`dy` are cumulative pointer deltas since
    /// the gesture began, `timestamp` is wall-clock seconds. Ignored while
    /// rolling.
    pub fn on_drag_move(&mut self, dx: f32, dy: f32, timestamp: f64) {
        if self.session.is_some() {
            return;
        }

        if !self.dragging {
            self.dragging = true;
            self.drag_base = self.orientation;
            self.velocity = DragVelocity::ZERO;
        } else if let Some(last) = self.last_gesture {
            let dt = (timestamp - last.time) as f32;
            if dt > 0.0 {
                self.velocity.x = (dy - last.dy) / dt;
                self.velocity.y = (dx - last.dx) / dt;
            }
        }
        self.last_gesture = Some(GestureSample { dx, dy, time: timestamp });

        // Vertical drag pitches, horizontal drag yaws.
        self.orientation.x = self.drag_base.x + dy * DRAG_ROTATE_GAIN;
        self.orientation.y = self.drag_base.y + dx * DRAG_ROTATE_GAIN;
    }

    /// End the drag gesture, freezing the current pose as the new baseline.
    /// The last gesture velocity is kept for inertia.
    pub fn on_drag_release(&mut self) {
        if self.session.is_some() {
            return;
        }
        self.dragging = false;
        self.drag_base = self.orientation;
        self.last_gesture = None;
    }

    fn tumble(&mut self, session: &RollSession, dt: f32) {
        let progress = session.elapsed / TUMBLE_DURATION;
        // Front-loaded spin: fast at first, tailing off toward the boundary.
        let ease_out = 1.0 - (1.0 - progress) * (1.0 - progress);
        let speed = session.tumble_speed * (1.0 - ease_out * TUMBLE_SPEED_DECAY);

        self.orientation.x += speed * dt * session.axis_weights[0];
        self.orientation.y += speed * dt * session.axis_weights[1];
        self.orientation.z += speed * dt * session.axis_weights[2];
    }

    fn settle(&mut self, session: &mut RollSession, dt: f32) {
        let target = match session.target {
            Some(face) => face,
            None => {
                // The outcome commits here, from whatever pose the tumble
                // reached. It is a function of the tumble randomness, not an
                // independent draw.
                let face = resolve_face(self.orientation);
                session.target = Some(face);
                session.settle_from = self.orientation;
                face
            }
        };

        let settle_progress = (session.elapsed - TUMBLE_DURATION) / SETTLE_DURATION;

        // Residual spin carried over from the tumble, fading almost to rest.
        let end_of_tumble_speed = session.tumble_speed * (1.0 - TUMBLE_SPEED_DECAY);
        let residual = end_of_tumble_speed * (1.0 - settle_progress * SETTLE_RESIDUAL_DECAY);
        self.orientation.x += residual * dt * session.axis_weights[0];
        self.orientation.y += residual * dt * session.axis_weights[1];
        self.orientation.z += residual * dt * session.axis_weights[2];

        // Quadratic ease-in on the alignment pull: negligible early,
        // dominant late, so the spin hands over without a visible pop.
        let align = settle_progress * settle_progress;
        let rest = canonical_orientation(target);
        self.orientation.x += wrap_angle(rest.x - self.orientation.x) * align * dt * ALIGN_GAIN;
        self.orientation.y += wrap_angle(rest.y - self.orientation.y) * align * dt * ALIGN_GAIN;
        self.orientation.z += wrap_angle(rest.z - self.orientation.z) * align * dt * ALIGN_GAIN;
    }

    fn finish(&mut self, session: RollSession) -> Face {
        // A single tick large enough to jump the whole settle window lands
        // here with no committed target; commit from the current pose so
        // the roll still reports a valid face.
        let face = session
            .target
            .unwrap_or_else(|| resolve_face(self.orientation));

        // Snap exactly onto the resting pose; no floating-point drift
        // survives a completed roll.
        self.orientation = canonical_orientation(face);
        self.drag_base = self.orientation;
        face
    }

    fn coast(&mut self) {
        if self.velocity.x.abs() > INERTIA_REST_THRESHOLD
            || self.velocity.y.abs() > INERTIA_REST_THRESHOLD
        {
            // Per-tick step, as the gesture feel was tuned: no dt factor.
            self.orientation.x += self.velocity.x * INERTIA_ROTATE_GAIN;
            self.orientation.y += self.velocity.y * INERTIA_ROTATE_GAIN;
            self.velocity.x *= INERTIA_DAMPING;
            self.velocity.y *= INERTIA_DAMPING;
            self.drag_base = self.orientation;
        } else {
            self.velocity = DragVelocity::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FRAME: f32 = 1.0 / 60.0;

    fn finish_roll(animator: &mut DiceAnimator) -> Face {
        for _ in 0..1000 {
            if let TickOutcome::Finished(face) = animator.tick(FRAME) {
                return face;
            }
        }
        panic!("roll did not complete");
    }

    #[test]
    fn test_idle_tick_without_velocity_is_inert() {
        let mut animator = DiceAnimator::default();
        let before = animator.orientation();
        assert_eq!(animator.tick(FRAME), TickOutcome::Idle);
        assert_eq!(animator.orientation(), before);
    }

    #[test]
    fn test_roll_runs_to_completion_and_snaps() {
        let mut animator = DiceAnimator::default();
        animator.start_roll(&mut StdRng::seed_from_u64(7));
        assert!(animator.is_rolling());

        let face = finish_roll(&mut animator);
        assert!(!animator.is_rolling());
        assert!((1..=6).contains(&face.value()));
        assert_eq!(animator.orientation(), canonical_orientation(face));
    }

    #[test]
    fn test_start_roll_is_noop_while_rolling() {
        let mut control = DiceAnimator::default();
        let mut probed = DiceAnimator::default();
        control.start_roll(&mut StdRng::seed_from_u64(11));
        probed.start_roll(&mut StdRng::seed_from_u64(11));

        for i in 0..40 {
            control.tick(FRAME);
            probed.tick(FRAME);
            if i == 20 {
                // Re-entry mid-roll must not disturb the session.
                probed.start_roll(&mut StdRng::seed_from_u64(999));
            }
        }
        assert_eq!(control.orientation(), probed.orientation());
        assert_eq!(finish_roll(&mut control), finish_roll(&mut probed));
    }

    #[test]
    fn test_drag_ignored_while_rolling() {
        let mut animator = DiceAnimator::default();
        animator.start_roll(&mut StdRng::seed_from_u64(3));
        animator.tick(FRAME);
        let mid_roll = animator.orientation();

        animator.on_drag_move(500.0, 300.0, 0.5);
        animator.on_drag_release();
        assert_eq!(animator.orientation(), mid_roll);
    }

    #[test]
    fn test_drag_moves_follow_pointer() {
        let mut animator = DiceAnimator::default();
        let base = animator.orientation();

        animator.on_drag_move(100.0, -40.0, 0.0);
        let dragged = animator.orientation();
        assert!((dragged.y - (base.y + 100.0 * 0.005)).abs() < 1e-6);
        assert!((dragged.x - (base.x - 40.0 * 0.005)).abs() < 1e-6);

        // Deltas are cumulative, not incremental.
        animator.on_drag_move(200.0, -40.0, 0.1);
        let dragged = animator.orientation();
        assert!((dragged.y - (base.y + 200.0 * 0.005)).abs() < 1e-6);
    }

    #[test]
    fn test_inertia_decays_to_exact_rest() {
        let mut animator = DiceAnimator::default();
        animator.on_drag_move(0.0, 0.0, 0.0);
        animator.on_drag_move(60.0, 0.0, 0.1);
        animator.on_drag_release();
        assert!(animator.drag_velocity().y > 0.0);

        let mut last_yaw = animator.orientation().y;
        let mut ticks = 0;
        while animator.drag_velocity() != DragVelocity::ZERO {
            animator.tick(FRAME);
            let yaw = animator.orientation().y;
            assert!(yaw >= last_yaw);
            last_yaw = yaw;
            ticks += 1;
            assert!(ticks < 10_000, "inertia never came to rest");
        }
        assert_eq!(animator.drag_velocity(), DragVelocity::ZERO);

        // Once at rest the pose is stable.
        let settled = animator.orientation();
        animator.tick(FRAME);
        assert_eq!(animator.orientation(), settled);
    }
}
