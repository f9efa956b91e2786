//! Face geometry: outward normals, canonical resting poses, and the
//! resolver that decides which face points toward the viewer.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy::math::Vec3;

use crate::dice3d::types::{Face, Orientation};

/// Axis from the cube toward the camera.
pub const VIEW_AXIS: Vec3 = Vec3::Z;

/// Unit outward normals of the six faces in canonical (unrotated) pose,
/// in enumeration order.
pub const FACE_NORMALS: [(Vec3, Face); 6] = [
    (Vec3::Z, Face::One),
    (Vec3::NEG_Z, Face::Two),
    (Vec3::X, Face::Three),
    (Vec3::NEG_X, Face::Four),
    (Vec3::Y, Face::Five),
    (Vec3::NEG_Y, Face::Six),
];

/// Determine which face points toward the viewer in the given orientation.
///
/// Rotates every canonical normal by the orientation and keeps the one
/// with the largest dot product against [`VIEW_AXIS`]. Exact ties go to
/// the first-declared face; geometrically they are measure-zero, so the
/// tie-break is arbitrary but documented.
pub fn resolve_face(orientation: Orientation) -> Face {
    let rotation = orientation.to_quat();
    let mut best = Face::One;
    let mut best_dot = f32::NEG_INFINITY;

    for (normal, face) in FACE_NORMALS {
        let dot = (rotation * normal).dot(VIEW_AXIS);
        if dot > best_dot {
            best_dot = dot;
            best = face;
        }
    }

    best
}

/// The resting orientation that puts `face` flat toward the viewer.
pub fn canonical_orientation(face: Face) -> Orientation {
    match face {
        Face::One => Orientation::new(0.0, 0.0, 0.0),
        Face::Two => Orientation::new(0.0, PI, 0.0),
        Face::Three => Orientation::new(0.0, -FRAC_PI_2, 0.0),
        Face::Four => Orientation::new(0.0, FRAC_PI_2, 0.0),
        Face::Five => Orientation::new(FRAC_PI_2, 0.0, 0.0),
        Face::Six => Orientation::new(-FRAC_PI_2, 0.0, 0.0),
    }
}

/// Wrap an angle into [-pi, pi] so angular deltas take the shortest arc.
pub fn wrap_angle(mut angle: f32) -> f32 {
    while angle > PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_orientations_round_trip() {
        for face in Face::ALL {
            assert_eq!(resolve_face(canonical_orientation(face)), face);
        }
    }

    #[test]
    fn test_resolve_face_is_total() {
        // Sweep a grid of orientations; every one must resolve to a face.
        let mut seen = [false; 6];
        let mut angle = -7.0_f32;
        while angle < 7.0 {
            let face = resolve_face(Orientation::new(angle, angle * 0.7, angle * 0.3));
            seen[face.index()] = true;
            angle += 0.05;
        }
        assert!(seen.iter().filter(|s| **s).count() >= 4);
    }

    #[test]
    fn test_edge_on_pose_resolves_deterministically() {
        // Halfway between two faces the winner is decided by dot-product
        // comparison alone; whichever face wins, it must be one of the two
        // co-facing candidates and stable across calls.
        let edge_on = Orientation::new(0.0, -FRAC_PI_2 / 2.0, 0.0);
        let face = resolve_face(edge_on);
        assert!(matches!(face, Face::One | Face::Three));
        assert_eq!(resolve_face(edge_on), face);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-6);
        assert!((wrap_angle(-3.0 * PI) + PI).abs() < 1e-6);
        assert_eq!(wrap_angle(0.5), 0.5);
        assert_eq!(wrap_angle(-0.5), -0.5);
        assert!(wrap_angle(TAU).abs() < 1e-6);
    }
}
