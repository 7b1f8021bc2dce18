//! Conversion from engine meshes and skins to Bevy assets.

use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use revolt::ObjectId;
use revolt_mdl::Corner;

/// Links a spawned entity to its scene object.
#[derive(Component)]
pub struct SceneObjectMarker {
    pub id: ObjectId,
    /// Animation frame the current mesh asset was built from.
    pub shown_frame: i32,
}

/// Build a non-indexed triangle list from one frame of `mesh`.
pub fn convert_mesh(mesh: &revolt::Mesh, frame: i32) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();

    let mut push = |corner: &Corner| {
        positions.push(corner.position.to_array());
        normals.push(corner.normal.to_array());
        uvs.push(corner.tex_coord.to_array());
    };
    revolt::submit(mesh, frame, &mut push);

    let mut out = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    out.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    out.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    out.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    out
}

/// Upload a decoded skin with nearest-neighbour sampling.
pub fn convert_texture(skin: &image::RgbaImage) -> Image {
    let mut image = Image::new(
        Extent3d {
            width: skin.width(),
            height: skin.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        skin.as_raw().clone(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.sampler = ImageSampler::nearest();
    image
}

/// Material for a scene object, textured with the first skin if it has one.
pub fn convert_material(
    object: &revolt::GameObject,
    images: &mut Assets<Image>,
) -> StandardMaterial {
    let [r, g, b, a] = object.material.color.to_array();
    let mut material = StandardMaterial {
        base_color: Color::srgba(r, g, b, a),
        alpha_mode: if object.material.is_translucent() {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        ..Default::default()
    };

    if let Some(skin) = object.mesh.as_model().and_then(|model| model.skins().first()) {
        material.base_color_texture = Some(images.add(convert_texture(skin)));
        // Palette index 255 is transparent.
        material.alpha_mode = AlphaMode::Mask(0.5);
        // Model triangles use the opposite winding.
        material.cull_mode = None;
    }

    material
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn object(color: [f32; 4]) -> revolt::GameObject {
        let [r, g, b, a] = color;
        revolt::GameObject::new(Arc::new(revolt::Mesh::Cube { size: 1.0 }))
            .with_material(revolt::Material::rgba(r, g, b, a))
    }

    #[test]
    fn material_colour_is_read_as_srgb() {
        let mut images = Assets::<Image>::default();
        let material = convert_material(&object([0.5, 0.25, 1.0, 1.0]), &mut images);

        assert_eq!(material.base_color.to_srgba().to_f32_array(), [0.5, 0.25, 1.0, 1.0]);
        assert_eq!(material.alpha_mode, AlphaMode::Opaque);
    }

    #[test]
    fn translucent_colour_blends() {
        let mut images = Assets::<Image>::default();
        let material = convert_material(&object([0.0, 1.0, 0.0, 0.7]), &mut images);
        assert_eq!(material.alpha_mode, AlphaMode::Blend);
    }

    #[test]
    fn cube_mesh_has_one_vertex_per_corner() {
        let mesh = convert_mesh(&revolt::Mesh::Cube { size: 1.0 }, 0);
        assert_eq!(mesh.count_vertices(), 36);
    }
}
