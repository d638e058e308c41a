//! Test level: a ground slab with a few obstacles for the camera, and a pool
//! with a dry shelf and steps to climb back out.

use bevy::{math::bounding::Aabb3d, prelude::*};
use shared::{
    physics::rapier::SceneSolidBundle,
    water::{WaterRegions, WaterVolume},
};

/// Block of level geometry.
#[derive(Debug, Clone, Copy)]
pub struct Solid {
    pub bounds: Aabb3d,
    pub color: Color,
}

#[derive(Debug, Clone, Default)]
pub struct LevelLayout {
    pub solids: Vec<Solid>,
    pub water: Vec<WaterVolume>,
}

const GRASS: Color = Color::srgb(0.36, 0.55, 0.29);
const STONE: Color = Color::srgb(0.55, 0.55, 0.52);
const TILE: Color = Color::srgb(0.78, 0.84, 0.86);
const WATER: Color = Color::srgba(0.1, 0.35, 0.65, 0.55);

fn solid(min: Vec3, max: Vec3, color: Color) -> Solid {
    Solid {
        bounds: Aabb3d {
            min: min.into(),
            max: max.into(),
        },
        color,
    }
}

impl LevelLayout {
    /// Ground top sits at y = 0. The pool spans x in [5, 18] and z in
    /// [-6, 6]; water only covers its deep half so swimmers can float onto
    /// the shelf and walk out.
    pub fn pool_level() -> Self {
        let solids = vec![
            // Ground around the pool
            solid(Vec3::new(-40.0, -8.0, -40.0), Vec3::new(5.0, 0.0, 40.0), GRASS),
            solid(Vec3::new(18.0, -8.0, -40.0), Vec3::new(40.0, 0.0, 40.0), GRASS),
            solid(Vec3::new(5.0, -8.0, 6.0), Vec3::new(18.0, 0.0, 40.0), GRASS),
            solid(Vec3::new(5.0, -8.0, -40.0), Vec3::new(18.0, 0.0, -6.0), GRASS),
            // Deep end floor
            solid(Vec3::new(5.0, -8.0, -6.0), Vec3::new(11.0, -6.0, 6.0), TILE),
            // Shelf, low enough to float over
            solid(Vec3::new(11.0, -8.0, -6.0), Vec3::new(18.0, -2.8, 6.0), TILE),
            // Steps up to the ground
            solid(Vec3::new(14.5, -2.8, -6.0), Vec3::new(18.0, -1.9, 6.0), TILE),
            solid(Vec3::new(16.0, -1.9, -6.0), Vec3::new(18.0, -0.95, 6.0), TILE),
            // Obstacles for the chase camera
            solid(Vec3::new(-12.0, 0.0, -20.0), Vec3::new(8.0, 4.0, -19.0), STONE),
            solid(Vec3::new(-8.0, 0.0, -6.0), Vec3::new(-6.0, 3.0, -4.0), STONE),
            solid(Vec3::new(-4.0, 2.5, 6.0), Vec3::new(4.0, 3.0, 10.0), STONE),
            solid(Vec3::new(-4.0, 0.0, 9.5), Vec3::new(4.0, 2.5, 10.0), STONE),
        ];
        let water = vec![WaterVolume::new(
            Vec3::new(5.0, -6.0, -6.0),
            Vec3::new(13.0, -0.2, 6.0),
        )];
        Self { solids, water }
    }
}

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut regions: ResMut<WaterRegions>,
) {
    let layout = LevelLayout::pool_level();

    for block in &layout.solids {
        let size = Vec3::from(block.bounds.max - block.bounds.min);
        commands.spawn((
            SceneSolidBundle::from_aabb(block.bounds),
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: block.color,
                perceptual_roughness: 0.9,
                ..default()
            })),
        ));
    }

    let water_material = materials.add(StandardMaterial {
        base_color: WATER,
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.1,
        ..default()
    });
    for volume in &layout.water {
        regions.register(*volume);
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(volume.max() - volume.min()))),
            MeshMaterial3d(water_material.clone()),
            Transform::from_translation((volume.min() + volume.max()) * 0.5),
        ));
    }
    info!(
        "Scene ready: {} solids, {} water volumes",
        layout.solids.len(),
        regions.volumes().len()
    );

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(20.0, 40.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        brightness: 400.0,
        ..default()
    });
}
