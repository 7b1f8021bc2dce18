use glam::Vec3;
use proptest::prelude::*;
use revolt_mdl::{
    CompressedVertex, DecodeError, Feature, Frame, HEADER_SIZE, Header, MAGIC, Model, ModelWriter,
    NoSkins, RgbaSkins, TexCoord, Triangle,
};

fn finite() -> impl Strategy<Value = f32> {
    -1000.0f32..1000.0
}

fn vec3() -> impl Strategy<Value = Vec3> {
    (finite(), finite(), finite()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn vertex() -> impl Strategy<Value = CompressedVertex> {
    any::<[u8; 4]>().prop_map(CompressedVertex::from_bytes)
}

prop_compose! {
    /// A well-formed single-frame model with random geometry and indices
    /// that may point past the vertex table.
    fn model_parts()(
        scale in vec3(),
        translate in vec3(),
        vertices in prop::collection::vec(vertex(), 1..24),
        raw_triangles in prop::collection::vec((any::<bool>(), [-2i32..30, -2i32..30, -2i32..30]), 0..16),
    ) -> (Header, Vec<Triangle>, Frame) {
        let header = Header {
            scale,
            translate,
            num_verts: vertices.len() as u32,
            num_tris: raw_triangles.len() as u32,
            num_frames: 1,
            ..Header::default()
        };
        let triangles = raw_triangles
            .into_iter()
            .map(|(faces_front, vertices)| Triangle { faces_front, vertices })
            .collect();
        let frame = Frame {
            name: "pose".into(),
            vertices,
            ..Frame::default()
        };
        (header, triangles, frame)
    }
}

fn encode(header: &Header, triangles: &[Triangle], frame: &Frame) -> Vec<u8> {
    ModelWriter {
        header,
        skins: &[],
        tex_coords: &vec![TexCoord::default(); header.vertex_count()],
        triangles,
        frames: std::slice::from_ref(frame),
    }
    .to_vec()
}

/// `encode` with one 1x1 skin added.
fn encode_skinned(header: &Header, triangles: &[Triangle], frame: &Frame) -> Vec<u8> {
    let header = Header {
        num_skins: 1,
        skin_width: 1,
        skin_height: 1,
        ..*header
    };
    ModelWriter {
        header: &header,
        skins: &[vec![7]],
        tex_coords: &vec![TexCoord::default(); header.vertex_count()],
        triangles,
        frames: std::slice::from_ref(frame),
    }
    .to_vec()
}

fn nonzero() -> impl Strategy<Value = i32> {
    any::<i32>().prop_filter("discriminator must be nonzero", |&value| value != 0)
}

fn put_i32(bytes: &mut [u8], offset: usize, value: i32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

proptest! {
    #[test]
    fn positions_are_scale_times_vertex_plus_translate((header, triangles, frame) in model_parts()) {
        let bytes = encode(&header, &triangles, &frame);
        let model = Model::from_bytes(&bytes, &mut NoSkins).unwrap();

        let expected: Vec<Vec3> = triangles
            .iter()
            .flat_map(|triangle| triangle.vertices)
            .filter_map(|slot| usize::try_from(slot).ok())
            .filter_map(|slot| frame.vertices.get(slot))
            .map(|v| {
                let [x, y, z] = v.position;
                Vec3::new(
                    header.scale.x * f32::from(x) + header.translate.x,
                    header.scale.y * f32::from(y) + header.translate.y,
                    header.scale.z * f32::from(z) + header.translate.z,
                )
            })
            .collect();
        let actual: Vec<Vec3> = model.frame_corners(0).iter().map(|c| c.position).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn decoding_is_deterministic((header, triangles, frame) in model_parts()) {
        let bytes = encode(&header, &triangles, &frame);
        let first = Model::from_bytes(&bytes, &mut RgbaSkins).unwrap();
        let second = Model::from_bytes(&bytes, &mut RgbaSkins).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.header(), &header);
        prop_assert_eq!(first.frames(), std::slice::from_ref(&frame));
    }

    #[test]
    fn normals_are_unit_length(index in any::<u8>()) {
        let n = revolt_mdl::normal(index);
        prop_assert!((n.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn any_prefix_fails_cleanly((header, triangles, frame) in model_parts(), cut in any::<prop::sample::Index>()) {
        let bytes = encode(&header, &triangles, &frame);
        let len = cut.index(bytes.len());
        prop_assert!(Model::from_bytes(&bytes[..len], &mut NoSkins).is_err());
    }

    #[test]
    fn any_other_magic_is_rejected(
        (header, triangles, frame) in model_parts(),
        magic in any::<i32>().prop_filter("must differ from IDPO", |&value| value != MAGIC),
    ) {
        let mut bytes = encode(&header, &triangles, &frame);
        put_i32(&mut bytes, 0, magic);
        prop_assert!(matches!(
            Model::from_bytes(&bytes, &mut NoSkins),
            Err(DecodeError::BadMagic { found }) if found == magic
        ), "expected BadMagic with found == {}", magic);
    }

    #[test]
    fn any_nonzero_skin_discriminator_is_grouped(
        (header, triangles, frame) in model_parts(),
        discriminator in nonzero(),
    ) {
        let mut bytes = encode_skinned(&header, &triangles, &frame);
        put_i32(&mut bytes, HEADER_SIZE, discriminator);
        prop_assert!(matches!(
            Model::from_bytes(&bytes, &mut RgbaSkins),
            Err(DecodeError::UnsupportedFeature(Feature::GroupedSkins))
        ));
    }

    #[test]
    fn any_nonzero_frame_discriminator_is_grouped(
        (header, triangles, frame) in model_parts(),
        discriminator in nonzero(),
    ) {
        let mut bytes = encode(&header, &triangles, &frame);
        let frame_start = bytes.len() - (28 + 4 * frame.vertices.len());
        put_i32(&mut bytes, frame_start, discriminator);
        prop_assert!(matches!(
            Model::from_bytes(&bytes, &mut NoSkins),
            Err(DecodeError::UnsupportedFeature(Feature::GroupedFrames))
        ));
    }
}
