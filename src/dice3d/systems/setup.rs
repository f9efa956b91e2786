//! Scene and UI construction
//!
//! Spawns the camera, lights, the cube with its face decorations (pip dots
//! or custom-label quads), and the widget chrome (texts plus the Roll
//! button).

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::dice3d::animator::DiceAnimator;
use crate::dice3d::pixel_font;
use crate::dice3d::types::*;

pub const CUBE_SIZE: f32 = 2.0;
const CAMERA_DISTANCE: f32 = 6.0;
// Decorations hover just above the surface to avoid z-fighting.
const FACE_OFFSET: f32 = CUBE_SIZE / 2.0 + 0.01;
const PIP_RADIUS: f32 = 0.12;
const LABEL_QUAD_SIZE: f32 = 1.8;
const LABEL_TEXTURE_SIZE: u32 = 128;

const INK_RED: Color = Color::srgb(0.863, 0.149, 0.149);
pub const BUTTON_RED: Color = Color::srgb(0.863, 0.149, 0.149);
pub const BUTTON_RED_DIM: Color = Color::srgb(0.478, 0.082, 0.082);

/// Pip offsets on the face plane for values 1 through 6.
const PIP_LAYOUTS: [&[(f32, f32)]; 6] = [
    &[(0.0, 0.0)],
    &[(-0.3, 0.3), (0.3, -0.3)],
    &[(-0.3, 0.3), (0.0, 0.0), (0.3, -0.3)],
    &[(-0.3, 0.3), (0.3, 0.3), (-0.3, -0.3), (0.3, -0.3)],
    &[(-0.3, 0.3), (0.3, 0.3), (0.0, 0.0), (-0.3, -0.3), (0.3, -0.3)],
    &[
        (-0.3, 0.3),
        (0.3, 0.3),
        (-0.3, 0.0),
        (0.3, 0.0),
        (-0.3, -0.3),
        (0.3, -0.3),
    ],
];

pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    animator: Res<DiceAnimator>,
    labels: Res<FaceLabels>,
) {
    // Camera straight down the view axis; the face resolver assumes the
    // viewer sits on +Z.
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));

    // Key light plus a dim fill from behind.
    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 3_000.0,
            ..default()
        },
        Transform::from_xyz(-5.0, -5.0, -5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 250.0,
        ..default()
    });

    spawn_die(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut images,
        &animator,
        &labels,
    );

    spawn_ui(&mut commands);
}

/// Spawn the cube with its face decorations as children.
pub fn spawn_die(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    images: &mut ResMut<Assets<Image>>,
    animator: &DiceAnimator,
    labels: &FaceLabels,
) -> Entity {
    let body = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.6,
        ..default()
    });

    let die = commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE))),
            MeshMaterial3d(body),
            Transform::from_rotation(animator.orientation().to_quat()),
            DieCube,
        ))
        .id();

    match labels.custom_labels() {
        Some(custom) => spawn_label_quads(commands, meshes, materials, images, die, custom),
        None => spawn_pips(commands, meshes, materials, die),
    }

    die
}

fn spawn_pips(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    die: Entity,
) {
    let pip_mesh = meshes.add(Circle::new(PIP_RADIUS));
    let pip_material = materials.add(StandardMaterial {
        base_color: INK_RED,
        unlit: true,
        ..default()
    });

    commands.entity(die).with_children(|parent| {
        for face in Face::ALL {
            for &(x, y) in PIP_LAYOUTS[face.index()] {
                parent.spawn((
                    Mesh3d(pip_mesh.clone()),
                    MeshMaterial3d(pip_material.clone()),
                    decal_transform(face, x, y),
                ));
            }
        }
    });
}

fn spawn_label_quads(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    images: &mut ResMut<Assets<Image>>,
    die: Entity,
    labels: &[String],
) {
    let quad_mesh = meshes.add(Rectangle::new(LABEL_QUAD_SIZE, LABEL_QUAD_SIZE));

    commands.entity(die).with_children(|parent| {
        for face in Face::ALL {
            let texture = images.add(label_image(&labels[face.index()]));
            let material = materials.add(StandardMaterial {
                base_color_texture: Some(texture),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            });
            parent.spawn((
                Mesh3d(quad_mesh.clone()),
                MeshMaterial3d(material),
                decal_transform(face, 0.0, 0.0),
            ));
        }
    });
}

/// Place a flat decoration at 2D offset `(x, y)` on a face of the
/// unrotated cube, rotated to lie in the face plane and look outward.
fn decal_transform(face: Face, x: f32, y: f32) -> Transform {
    let (position, euler) = match face {
        Face::One => (Vec3::new(x, y, FACE_OFFSET), (0.0, 0.0, 0.0)),
        Face::Two => (Vec3::new(-x, y, -FACE_OFFSET), (0.0, PI, 0.0)),
        Face::Three => (Vec3::new(FACE_OFFSET, y, -x), (0.0, FRAC_PI_2, 0.0)),
        Face::Four => (Vec3::new(-FACE_OFFSET, y, x), (0.0, -FRAC_PI_2, 0.0)),
        Face::Five => (Vec3::new(x, FACE_OFFSET, -y), (-FRAC_PI_2, 0.0, 0.0)),
        Face::Six => (Vec3::new(x, -FACE_OFFSET, y), (FRAC_PI_2, 0.0, 0.0)),
    };
    Transform::from_translation(position)
        .with_rotation(Quat::from_euler(EulerRot::XYZ, euler.0, euler.1, euler.2))
}

fn label_image(text: &str) -> Image {
    let rgba = pixel_font::rasterize_label(text, LABEL_TEXTURE_SIZE as usize);
    Image::new(
        Extent3d {
            width: LABEL_TEXTURE_SIZE,
            height: LABEL_TEXTURE_SIZE,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        rgba,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

fn spawn_ui(commands: &mut Commands) {
    commands.spawn((
        Text::new("The Dice"),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));

    commands.spawn((
        Text::new("Drag to rotate - Space or Roll Dice to throw"),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.63, 0.63, 0.69)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(48.0),
            left: Val::Px(12.0),
            ..default()
        },
        InstructionText,
    ));

    commands.spawn((
        Text::new("..."),
        TextFont {
            font_size: 48.0,
            ..default()
        },
        TextColor(INK_RED),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(72.0),
            left: Val::Px(12.0),
            ..default()
        },
        ResultText,
    ));

    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(24.0),
                left: Val::Px(12.0),
                width: Val::Px(160.0),
                height: Val::Px(48.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_RED),
            RollButton,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new("Roll Dice"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                RollButtonLabel,
            ));
        });
}
