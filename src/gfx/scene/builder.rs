// src/gfx/scene/builder.rs
//! Room construction
//!
//! Builds every object in the gallery from procedural primitives and
//! registers the materials they use. Flat primitives face positive Z
//! and are rotated into place here.

use std::path::Path;

use cgmath::{Deg, Matrix4, Vector3};

use crate::assets::TextureData;
use crate::config::ScenePreset;
use crate::gfx::geometry::{
    generate_box, generate_circle, generate_cone, generate_cylinder, generate_plane,
    generate_sphere,
};
use crate::gfx::resources::material::{Material, ShaderKind};

use super::object::Object;
use super::scene::Scene;

/// Number of cyclable painting texture slots
pub const PAINTING_COUNT: usize = 4;

/// All image textures the room needs, loaded up front
pub struct RoomTextures {
    pub floor: TextureData,
    pub wall: TextureData,
    pub roof: TextureData,
    pub table: TextureData,
    pub rug: TextureData,
    pub statue: TextureData,
    pub paintings: Vec<TextureData>,
}

impl RoomTextures {
    /// Loads every room texture, substituting checkerboards for any
    /// file that fails to load
    pub fn load(assets_dir: &Path) -> Self {
        let paintings = (1..=PAINTING_COUNT)
            .map(|i| TextureData::load_or_fallback(&assets_dir.join(format!("painting{}.jpg", i))))
            .collect();

        Self {
            floor: TextureData::load_or_fallback(&assets_dir.join("floor.jpg")),
            wall: TextureData::load_or_fallback(&assets_dir.join("wall.jpg")),
            roof: TextureData::load_or_fallback(&assets_dir.join("roof.jpg")),
            table: TextureData::load_or_fallback(&assets_dir.join("table.jpg")),
            rug: TextureData::load_or_fallback(&assets_dir.join("rug.jpg")),
            statue: TextureData::load_or_fallback(&assets_dir.join("statue.jpg")),
            paintings,
        }
    }
}

/// Populates the scene with the room shell, furniture, paintings, lamp,
/// and planters
pub fn build_room(scene: &mut Scene, preset: &ScenePreset, textures: RoomTextures) {
    register_materials(scene, preset, textures);

    let room = &preset.room;
    let half_w = room.width * 0.5;
    let half_d = room.depth * 0.5;

    // Room shell. Walls face inward; the floor and roof are planes
    // rotated to face up and down respectively.
    let floor = generate_plane(room.width, room.depth);
    scene.add_object(
        Object::from_geometry("floor", &floor)
            .with_material("floor")
            .with_transform(Matrix4::from_angle_x(Deg(-90.0)))
            .with_shadow(false),
    );

    scene.add_object(
        Object::from_geometry("roof", &floor)
            .with_material("roof")
            .with_transform(
                Matrix4::from_translation(Vector3::new(0.0, room.height, 0.0))
                    * Matrix4::from_angle_x(Deg(90.0)),
            )
            .with_shadow(false),
    );

    let wall = generate_plane(room.width, room.height);
    let wall_y = room.height * 0.5;
    scene.add_object(
        Object::from_geometry("wall_back", &wall)
            .with_material("wall")
            .with_transform(Matrix4::from_translation(Vector3::new(0.0, wall_y, -half_d)))
            .with_shadow(false),
    );
    scene.add_object(
        Object::from_geometry("wall_front", &wall)
            .with_material("wall")
            .with_transform(
                Matrix4::from_translation(Vector3::new(0.0, wall_y, half_d))
                    * Matrix4::from_angle_y(Deg(180.0)),
            )
            .with_shadow(false),
    );
    scene.add_object(
        Object::from_geometry("wall_left", &wall)
            .with_material("wall")
            .with_transform(
                Matrix4::from_translation(Vector3::new(-half_w, wall_y, 0.0))
                    * Matrix4::from_angle_y(Deg(90.0)),
            )
            .with_shadow(false),
    );
    scene.add_object(
        Object::from_geometry("wall_right", &wall)
            .with_material("wall")
            .with_transform(
                Matrix4::from_translation(Vector3::new(half_w, wall_y, 0.0))
                    * Matrix4::from_angle_y(Deg(-90.0)),
            )
            .with_shadow(false),
    );

    // Display table under the statue.
    scene.add_object(
        Object::from_geometry("table", &generate_box(4.0, 0.5, 2.0))
            .with_material("table")
            .with_transform(Matrix4::from_translation(Vector3::new(0.0, 0.25, -3.0))),
    );

    // Rug sits just above the floor to avoid z-fighting.
    scene.add_object(
        Object::from_geometry("rug", &generate_circle(3.0, 48))
            .with_material("rug")
            .with_transform(
                Matrix4::from_translation(Vector3::new(0.0, 0.01, -3.0))
                    * Matrix4::from_angle_x(Deg(-90.0)),
            )
            .with_shadow(false),
    );

    // Paintings: two on the back wall, one on each side wall, pulled
    // slightly off the wall surface. Each starts on its own texture.
    let painting = generate_plane(8.0, 4.0);
    let inset = half_d - 0.2;
    let placements = [
        (Vector3::new(-5.0, 3.0, -inset), 0.0),
        (Vector3::new(5.0, 3.0, -inset), 0.0),
        (Vector3::new(-inset, 3.0, 0.0), 90.0),
        (Vector3::new(inset, 3.0, 0.0), -90.0),
    ];
    for (slot, (position, rotation_y)) in placements.into_iter().enumerate() {
        let index = scene.add_object(
            Object::from_geometry(format!("painting_slot_{}", slot), &painting)
                .with_transform(
                    Matrix4::from_translation(position) * Matrix4::from_angle_y(Deg(rotation_y)),
                )
                .with_shadow(false),
        );
        scene.register_painting(index, slot);
    }

    // Hanging lamp: rod from the ceiling, emissive sphere at the end.
    let lamp = &preset.lamp;
    scene.add_object(
        Object::from_geometry(
            "lamp_rod",
            &generate_cylinder(lamp.rod_radius, lamp.rod_radius, lamp.rod_height, 16),
        )
        .with_material("lamp_rod")
        .with_transform(Matrix4::from_translation(Vector3::new(
            lamp.anchor.x,
            lamp.anchor.y - lamp.rod_height * 0.5,
            lamp.anchor.z,
        )))
        .with_shadow(false),
    );
    scene.add_object(
        Object::from_geometry("lamp_sphere", &generate_sphere(24, 16))
            .with_material("lamp_sphere")
            .with_transform(
                Matrix4::from_translation(Vector3::new(
                    lamp.anchor.x,
                    lamp.anchor.y - lamp.rod_height - lamp.sphere_radius,
                    lamp.anchor.z,
                )) * Matrix4::from_scale(lamp.sphere_radius),
            )
            .with_shadow(false),
    );

    // Corner planters.
    for (i, x) in [-9.5f32, 9.5].into_iter().enumerate() {
        add_planter(scene, i, Vector3::new(x, 0.0, -8.8));
    }
}

/// One potted plant: tapered pot, soil disc, stem, and two leaf cones
fn add_planter(scene: &mut Scene, index: usize, base: Vector3<f32>) {
    let name = |part: &str| format!("planter_{}_{}", index, part);

    let pot_height = 1.0;
    scene.add_object(
        Object::from_geometry(name("pot"), &generate_cylinder(0.4, 0.35, pot_height, 24))
            .with_material("pot")
            .with_transform(Matrix4::from_translation(
                base + Vector3::new(0.0, pot_height * 0.5, 0.0),
            )),
    );

    scene.add_object(
        Object::from_geometry(name("soil"), &generate_cylinder(0.35, 0.35, 0.05, 24))
            .with_material("soil")
            .with_transform(Matrix4::from_translation(
                base + Vector3::new(0.0, pot_height + 0.025, 0.0),
            ))
            .with_shadow(false),
    );

    let stem_height = 0.5;
    scene.add_object(
        Object::from_geometry(name("stem"), &generate_cylinder(0.03, 0.03, stem_height, 8))
            .with_material("plant")
            .with_transform(Matrix4::from_translation(
                base + Vector3::new(0.0, pot_height + stem_height * 0.5, 0.0),
            )),
    );

    let leaf_base = pot_height + stem_height;
    scene.add_object(
        Object::from_geometry(name("leaves_lower"), &generate_cone(0.35, 0.6, 16))
            .with_material("plant")
            .with_transform(Matrix4::from_translation(
                base + Vector3::new(0.0, leaf_base + 0.3, 0.0),
            )),
    );
    scene.add_object(
        Object::from_geometry(name("leaves_upper"), &generate_cone(0.245, 0.42, 16))
            .with_material("plant")
            .with_transform(Matrix4::from_translation(
                base + Vector3::new(0.0, leaf_base + 0.6 + 0.21, 0.0),
            )),
    );
}

fn register_materials(scene: &mut Scene, preset: &ScenePreset, textures: RoomTextures) {
    let mm = &mut scene.material_manager;

    mm.add_material(
        Material::textured("floor", ShaderKind::Room, textures.floor).with_uv_scale(4.0, 4.0),
    );
    mm.add_material(
        Material::textured("wall", ShaderKind::Room, textures.wall).with_uv_scale(4.0, 2.0),
    );
    mm.add_material(
        Material::textured("roof", ShaderKind::Room, textures.roof).with_uv_scale(4.0, 4.0),
    );
    mm.add_material(Material::textured("table", ShaderKind::Room, textures.table));
    mm.add_material(Material::textured("rug", ShaderKind::Room, textures.rug));
    mm.add_material(Material::textured("statue", ShaderKind::Statue, textures.statue));

    let lamp = &preset.lamp;
    mm.add_material(Material::colored(
        "lamp_rod",
        ShaderKind::Room,
        [0.15, 0.15, 0.15, 1.0],
    ));
    mm.add_material(
        Material::colored("lamp_sphere", ShaderKind::Room, [1.0, 0.95, 0.8, 1.0]).with_emissive(
            lamp.emissive_color.into(),
            lamp.emissive_intensity,
        ),
    );

    mm.add_material(Material::colored(
        "pot",
        ShaderKind::Room,
        [0.72, 0.45, 0.32, 1.0],
    ));
    mm.add_material(Material::colored(
        "soil",
        ShaderKind::Room,
        [0.25, 0.17, 0.12, 1.0],
    ));
    mm.add_material(Material::colored(
        "plant",
        ShaderKind::Room,
        [0.25, 0.55, 0.25, 1.0],
    ));

    let mut painting_ids = Vec::with_capacity(PAINTING_COUNT);
    for (i, texture) in textures.paintings.into_iter().enumerate() {
        let id = format!("painting_{}", i);
        mm.add_material(Material::textured(&id, ShaderKind::Room, texture));
        painting_ids.push(id);
    }
    scene.set_painting_materials(painting_ids);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenePreset;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use crate::gfx::lighting::Lighting;

    fn fallback_textures() -> RoomTextures {
        let checker = || TextureData::checkerboard([255, 255, 255, 255], [0, 0, 0, 255]);
        RoomTextures {
            floor: checker(),
            wall: checker(),
            roof: checker(),
            table: checker(),
            rug: checker(),
            statue: checker(),
            paintings: (0..PAINTING_COUNT).map(|_| checker()).collect(),
        }
    }

    fn built_scene() -> Scene {
        let preset = ScenePreset::classic();
        let camera_manager = CameraManager::new(
            OrbitCamera::from_preset(&preset.camera, 1.5),
            CameraController::from_preset(&preset.camera),
        );
        let mut scene = Scene::new(camera_manager, Lighting::from_preset(&preset));
        build_room(&mut scene, &preset, fallback_textures());
        scene
    }

    #[test]
    fn room_has_expected_object_count() {
        let scene = built_scene();
        // 6 shell + table + rug + 4 paintings + 2 lamp parts + 2 * 5 planter parts
        assert_eq!(scene.objects.len(), 6 + 1 + 1 + 4 + 2 + 10);
    }

    #[test]
    fn paintings_start_on_distinct_slots() {
        let scene = built_scene();
        assert_eq!(scene.painting_texture_indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn every_material_reference_resolves() {
        let scene = built_scene();
        for object in &scene.objects {
            if let Some(id) = &object.material_id {
                assert!(
                    scene.material_manager.get_material(id).is_some(),
                    "missing material {} for object {}",
                    id,
                    object.name
                );
            }
        }
    }

    #[test]
    fn room_shell_does_not_cast_shadows() {
        let scene = built_scene();
        for name in ["floor", "roof", "wall_back", "wall_front"] {
            let object = scene.objects.iter().find(|o| o.name == name).unwrap();
            assert!(!object.casts_shadow, "{} should not cast shadows", name);
        }
        let table = scene.objects.iter().find(|o| o.name == "table").unwrap();
        assert!(table.casts_shadow);
    }
}
