use std::path::Path;

use bevy::math::{EulerRot, Quat};
use bevy::prelude::*;
use serde::Deserialize;

/// One of the six sides of the cube.
///
/// The enumeration order matches the face-normal table in
/// [`crate::dice3d::faces`]; `value()` is the pip count shown in numeric
/// mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::One,
        Face::Two,
        Face::Three,
        Face::Four,
        Face::Five,
        Face::Six,
    ];

    pub fn value(&self) -> u32 {
        match self {
            Face::One => 1,
            Face::Two => 2,
            Face::Three => 3,
            Face::Four => 4,
            Face::Five => 5,
            Face::Six => 6,
        }
    }

    /// Zero-based index, used for label and pip-layout lookup.
    pub fn index(&self) -> usize {
        self.value() as usize - 1
    }

    pub fn from_value(value: u32) -> Option<Face> {
        Face::ALL.get(value.checked_sub(1)? as usize).copied()
    }
}

/// The cube's rotation state as three axis angles, radians.
///
/// Angles are unbounded while animating; wrapping happens only when
/// computing angular differences toward a target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Orientation {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.x, self.y, self.z)
    }
}

/// What a single animation tick produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// No roll in progress; drag or inertia may still have moved the cube.
    Idle,
    /// A roll session is animating.
    Rolling,
    /// The roll just completed with this face toward the viewer.
    Finished(Face),
}

/// On-disk shape of a custom-label file: `{"faces": ["...", x6]}`.
#[derive(Debug, Deserialize)]
pub struct FaceLabelsFile {
    pub faces: Vec<String>,
}

/// Validated display labels for the six faces.
///
/// Either numeric pips (the default) or exactly six non-empty custom
/// labels. Validation lives here, at the configuration layer; the
/// animation core only ever reasons about face indices.
#[derive(Resource, Clone, Default)]
pub struct FaceLabels {
    labels: Option<Vec<String>>,
}

impl FaceLabels {
    pub const MAX_LABEL_LEN: usize = 10;

    /// Accept exactly six non-blank labels of at most
    /// [`MAX_LABEL_LEN`](Self::MAX_LABEL_LEN) characters.
    pub fn validate(labels: Vec<String>) -> Option<Self> {
        if labels.len() != Face::ALL.len() {
            return None;
        }
        if labels
            .iter()
            .any(|label| label.trim().is_empty() || label.chars().count() > Self::MAX_LABEL_LEN)
        {
            return None;
        }
        Some(Self {
            labels: Some(labels),
        })
    }

    /// Load labels from a JSON file, falling back to numeric pips (with a
    /// message on stderr) when the file is missing or invalid.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<FaceLabelsFile>(&contents) {
                Ok(file) => match Self::validate(file.faces) {
                    Some(labels) => labels,
                    None => {
                        eprintln!(
                            "Ignoring {}: need exactly 6 non-blank labels of at most {} characters",
                            path.display(),
                            Self::MAX_LABEL_LEN
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    eprintln!("Failed to parse face labels: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Failed to read face labels file: {}", e);
                Self::default()
            }
        }
    }

    pub fn is_custom(&self) -> bool {
        self.labels.is_some()
    }

    /// The validated custom labels, in face order, if any.
    pub fn custom_labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Display text for a face: its custom label, or its pip count.
    pub fn label_for(&self, face: Face) -> String {
        match &self.labels {
            Some(labels) => labels[face.index()].clone(),
            None => face.value().to_string(),
        }
    }
}

/// Result of the most recent completed roll.
#[derive(Resource, Default)]
pub struct LastRoll {
    pub face: Option<Face>,
}

/// Where the current pointer drag started, in window coordinates.
#[derive(Resource, Default)]
pub struct PointerDrag {
    pub origin: Option<Vec2>,
}

#[derive(Component)]
pub struct DieCube;

#[derive(Component)]
pub struct MainCamera;

#[derive(Component)]
pub struct ResultText;

#[derive(Component)]
pub struct InstructionText;

#[derive(Component)]
pub struct RollButton;

#[derive(Component)]
pub struct RollButtonLabel;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_values() {
        assert_eq!(Face::One.value(), 1);
        assert_eq!(Face::Six.value(), 6);
        assert_eq!(Face::Three.index(), 2);
    }

    #[test]
    fn test_face_from_value() {
        for face in Face::ALL {
            assert_eq!(Face::from_value(face.value()), Some(face));
        }
        assert_eq!(Face::from_value(0), None);
        assert_eq!(Face::from_value(7), None);
    }

    #[test]
    fn test_orientation_identity_quat() {
        let quat = Orientation::default().to_quat();
        assert_eq!(quat, Quat::IDENTITY);
    }

    #[test]
    fn test_labels_default_is_numeric() {
        let labels = FaceLabels::default();
        assert!(!labels.is_custom());
        assert_eq!(labels.label_for(Face::Four), "4");
    }

    #[test]
    fn test_labels_validate_accepts_six() {
        let labels = FaceLabels::validate(
            ["Yes", "No", "Maybe", "Later", "Now", "Never"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .expect("six labels");
        assert!(labels.is_custom());
        assert_eq!(labels.label_for(Face::One), "Yes");
        assert_eq!(labels.label_for(Face::Six), "Never");
    }

    #[test]
    fn test_labels_validate_rejects_bad_input() {
        let five = vec!["a".to_string(); 5];
        assert!(FaceLabels::validate(five).is_none());

        let mut blank = vec!["a".to_string(); 6];
        blank[3] = "   ".to_string();
        assert!(FaceLabels::validate(blank).is_none());

        let mut long = vec!["a".to_string(); 6];
        long[0] = "abcdefghijk".to_string();
        assert!(FaceLabels::validate(long).is_none());
    }
}
