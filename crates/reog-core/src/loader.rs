//! glTF/GLB import into a [`TargetModel`].
//!
//! Node transforms are baked into vertex data so every part lives in the
//! model's own frame and the bounds match what the user sees.

use crate::error::Result;
use crate::model::{Emphasis, ModelPart, PartId, TargetModel, TextureImage};
use glam::{Mat3, Mat4, Vec3, Vec4};

/// Parse GLB (or self-contained glTF JSON) bytes.
pub fn load_model(bytes: &[u8]) -> Result<TargetModel> {
    let (document, buffers, images) = gltf::import_slice(bytes)?;

    let mut parts = Vec::new();
    let roots: Vec<gltf::Node> = match document.default_scene().or_else(|| document.scenes().next()) {
        Some(scene) => scene.nodes().collect(),
        None => Vec::new(),
    };
    for node in roots {
        collect_node(&node, Mat4::IDENTITY, &buffers, &mut parts);
    }

    let textures = images.iter().map(to_rgba8).collect();
    let model = TargetModel::new(parts, textures)?;
    log::debug!(
        "[assets] parsed model: {} parts, {} textures",
        model.parts().len(),
        model.textures().len()
    );
    Ok(model)
}

fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<ModelPart>,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!("[assets] skipping non-triangle primitive in {:?}", mesh.name());
                continue;
            }
            if let Some(part) = read_primitive(&primitive, mesh.name(), world, buffers) {
                out.push(part);
            }
        }
    }
    for child in node.children() {
        collect_node(&child, world, buffers, out);
    }
}

fn read_primitive(
    primitive: &gltf::Primitive,
    mesh_name: Option<&str>,
    world: Mat4,
    buffers: &[gltf::buffer::Data],
) -> Option<ModelPart> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));

    let positions: Vec<Vec3> = reader
        .read_positions()?
        .map(|p| world.transform_point3(Vec3::from(p)))
        .collect();
    let indices: Vec<u32> = reader
        .read_indices()
        .map(|i| i.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());

    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
    let normals = match reader.read_normals() {
        Some(n) => n
            .map(|n| (normal_matrix * Vec3::from(n)).normalize_or_zero())
            .collect(),
        None => face_normals(&positions, &indices),
    };
    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|t| t.into_f32().collect())
        .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);

    let material = primitive.material();
    let pbr = material.pbr_metallic_roughness();
    Some(ModelPart {
        id: PartId(0),
        name: mesh_name.unwrap_or("part").to_string(),
        positions,
        normals,
        uvs,
        indices,
        base_color: Vec4::from(pbr.base_color_factor()),
        base_color_texture: pbr.base_color_texture().map(|t| t.texture().source().index()),
        emphasis: Emphasis {
            color: Vec3::from(material.emissive_factor()),
            intensity: 1.0,
        },
    })
}

/// Area-weighted vertex normals for meshes that ship without them.
fn face_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(pa), Some(pb), Some(pc)) = (positions.get(a), positions.get(b), positions.get(c))
        else {
            continue;
        };
        let n = (*pb - *pa).cross(*pc - *pa);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    normals
        .into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == Vec3::ZERO {
                Vec3::Y
            } else {
                n
            }
        })
        .collect()
}

fn to_rgba8(image: &gltf::image::Data) -> TextureImage {
    use gltf::image::Format;
    let rgba = match image.format {
        Format::R8G8B8A8 => image.pixels.clone(),
        Format::R8G8B8 => image
            .pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        Format::R8G8 => image
            .pixels
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[1], 0, 255])
            .collect(),
        Format::R8 => image.pixels.iter().flat_map(|v| [*v, *v, *v, 255]).collect(),
        other => {
            log::warn!("[assets] unsupported texture format {:?}, using white", other);
            return TextureImage {
                width: 1,
                height: 1,
                rgba: vec![255; 4],
            };
        }
    };
    TextureImage {
        width: image.width,
        height: image.height,
        rgba,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShowcaseError;

    // One triangle (0,0,0) (1,0,0) (0,1,0) under a translated parent and a
    // scaled child node.
    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [
            { "translation": [0, 1, 0], "children": [1] },
            { "mesh": 0, "scale": [2, 2, 2] }
        ],
        "meshes": [{ "name": "crest", "primitives": [{ "attributes": { "POSITION": 0 }, "material": 0 }] }],
        "materials": [{
            "emissiveFactor": [0.2, 0.1, 0.0],
            "pbrMetallicRoughness": { "baseColorFactor": [0.5, 0.4, 0.3, 1.0] }
        }],
        "buffers": [{
            "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
        }],
        "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
        "accessors": [{
            "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
            "min": [0, 0, 0], "max": [1, 1, 0]
        }]
    }"#;

    #[test]
    fn bakes_node_transforms() {
        let model = load_model(TRIANGLE_GLTF.as_bytes()).unwrap();
        assert_eq!(model.parts().len(), 1);
        let part = &model.parts()[0];
        assert_eq!(part.name, "crest");
        assert_eq!(part.indices, vec![0, 1, 2]);
        assert!((part.positions[1] - Vec3::new(2.0, 1.0, 0.0)).length() < 1e-6);
        assert!((part.positions[2] - Vec3::new(0.0, 3.0, 0.0)).length() < 1e-6);
        assert!((model.bounds().height() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn reads_material_and_computes_normals() {
        let model = load_model(TRIANGLE_GLTF.as_bytes()).unwrap();
        let part = &model.parts()[0];
        assert_eq!(part.base_color, Vec4::new(0.5, 0.4, 0.3, 1.0));
        assert_eq!(part.emphasis.color, Vec3::new(0.2, 0.1, 0.0));
        assert!(part.normals.iter().all(|n| (*n - Vec3::Z).length() < 1e-6));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            load_model(b"not a model"),
            Err(ShowcaseError::ModelParse(_))
        ));
    }

    #[test]
    fn scene_without_meshes_is_empty() {
        let doc = r#"{ "asset": { "version": "2.0" }, "scenes": [{ "nodes": [0] }], "nodes": [{}] }"#;
        assert!(matches!(
            load_model(doc.as_bytes()),
            Err(ShowcaseError::EmptyModel)
        ));
    }
}
