//! glTF / GLB model loader.
//!
//! Extracts, per file:
//! - the node hierarchy with local transforms
//! - triangle primitives (positions, normals, first UV set, base color)
//! - base color textures, converted to RGBA8
//! - node animation clips (translation / rotation / scale channels)
//!
//! Only the first root of the default scene is kept. Skins and morph targets
//! are not evaluated; skinned meshes draw in bind pose.

use std::collections::HashSet;
use std::path::Path;

use glam::{Quat, Vec3};

use crate::error::{SceneError, SceneResult};
use crate::render::types::VertexData;

use super::anim::{AnimationClip, Channel, ChannelValues, Interpolation};
use super::model::{LoadedModel, ModelNode, ModelPrimitive, ModelTexture, NodeTransform};

pub fn load_gltf_model(path: impl AsRef<Path>) -> SceneResult<LoadedModel> {
    let path = path.as_ref();
    let (document, buffers, images) = gltf::import(path)?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());

    let mut nodes: Vec<ModelNode> = document
        .nodes()
        .map(|node| {
            let (translation, rotation, scale) = node.transform().decomposed();
            ModelNode {
                parent: None,
                children: node.children().map(|c| c.index()).collect(),
                local: NodeTransform {
                    translation: Vec3::from(translation),
                    rotation: Quat::from_array(rotation),
                    scale: Vec3::from(scale),
                },
            }
        })
        .collect();

    for index in 0..nodes.len() {
        for child in nodes[index].children.clone() {
            if let Some(child_node) = nodes.get_mut(child) {
                child_node.parent = Some(index);
            }
        }
    }

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| SceneError::EmptyScene(path.display().to_string()))?;
    let roots: Vec<usize> = scene.nodes().map(|n| n.index()).collect();

    let mut textures = Vec::new();
    let mut texture_for_image = Vec::with_capacity(images.len());
    for (index, image) in images.iter().enumerate() {
        match convert_image(image) {
            Some(texture) => {
                texture_for_image.push(Some(textures.len()));
                textures.push(texture);
            }
            None => {
                log::warn!("{}: image {} has unsupported format {:?}", name, index, image.format);
                texture_for_image.push(None);
            }
        }
    }

    let mut primitives = Vec::new();
    for node in document.nodes() {
        let Some(mesh) = node.mesh() else {
            continue;
        };
        let mesh_name = mesh.name().unwrap_or("unnamed").to_string();

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!("{}: skipping non-triangle primitive in mesh '{}'", name, mesh_name);
                continue;
            }

            let (vertices, indices) = extract_primitive_data(&primitive, &buffers, &mesh_name)?;

            let pbr = primitive.material().pbr_metallic_roughness();
            let texture = pbr
                .base_color_texture()
                .and_then(|info| texture_for_image.get(info.texture().source().index()).copied())
                .flatten();

            primitives.push(ModelPrimitive {
                node: node.index(),
                vertices,
                indices,
                base_color: pbr.base_color_factor(),
                texture,
            });
        }
    }

    let animations = document
        .animations()
        .map(|animation| read_animation(&animation, &buffers))
        .collect::<Vec<_>>();

    let joints: HashSet<usize> = document
        .skins()
        .flat_map(|skin| skin.joints().map(|joint| joint.index()))
        .collect();
    for clip in animations.iter().filter(|clip| clip.drives_only(&joints)) {
        log::warn!(
            "{}: animation '{}' only moves skin joints; skinning is not evaluated, so it will not show",
            name,
            clip.name
        );
    }

    let mut model = LoadedModel {
        name,
        nodes,
        roots,
        primitives,
        textures,
        animations,
    };
    if let Some(root) = model.first_root() {
        let dropped = model.retain_subtree(root);
        if dropped > 0 {
            log::debug!("{}: {} primitives outside the first root left out", model.name, dropped);
        }
    }

    log::info!(
        "Loaded {}: {} nodes, {} primitives, {} triangles, {} textures, {} animations",
        path.display(),
        model.nodes.len(),
        model.primitives.len(),
        model.triangle_count(),
        model.textures.len(),
        model.animations.len()
    );

    Ok(model)
}

fn extract_primitive_data(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    mesh_name: &str,
) -> SceneResult<(Vec<VertexData>, Vec<u32>)> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .ok_or_else(|| SceneError::MissingPositions(mesh_name.to_string()))?
        .collect();

    let normals: Vec<[f32; 3]> = reader
        .read_normals()
        .map(|iter| iter.collect())
        .unwrap_or_default();

    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|tc| tc.into_f32().collect())
        .unwrap_or_default();

    let vertices = positions
        .iter()
        .enumerate()
        .map(|(i, &position)| VertexData {
            position,
            uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
            normal: normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
        })
        .collect();

    let indices = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    Ok((vertices, indices))
}

fn convert_image(image: &gltf::image::Data) -> Option<ModelTexture> {
    use gltf::image::Format;

    let pixels = match image.format {
        Format::R8G8B8A8 => image.pixels.clone(),
        Format::R8G8B8 => image
            .pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        Format::R8G8 => image
            .pixels
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        Format::R8 => image.pixels.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        _ => return None,
    };

    Some(ModelTexture {
        width: image.width,
        height: image.height,
        pixels,
    })
}

fn read_animation(animation: &gltf::Animation, buffers: &[gltf::buffer::Data]) -> AnimationClip {
    use gltf::animation::util::ReadOutputs;

    let name = animation
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("animation_{}", animation.index()));

    let mut channels = Vec::new();
    for channel in animation.channels() {
        let reader = channel.reader(|buffer| Some(&buffers[buffer.index()]));
        let Some(inputs) = reader.read_inputs() else {
            continue;
        };
        let times: Vec<f32> = inputs.collect();

        let (interpolation, cubic) = match channel.sampler().interpolation() {
            gltf::animation::Interpolation::Linear => (Interpolation::Linear, false),
            gltf::animation::Interpolation::Step => (Interpolation::Step, false),
            gltf::animation::Interpolation::CubicSpline => (Interpolation::Linear, true),
        };

        let values = match reader.read_outputs() {
            Some(ReadOutputs::Translations(iter)) => {
                ChannelValues::Translation(spline_values(iter.map(Vec3::from), cubic))
            }
            Some(ReadOutputs::Rotations(rotations)) => ChannelValues::Rotation(spline_values(
                rotations.into_f32().map(Quat::from_array),
                cubic,
            )),
            Some(ReadOutputs::Scales(iter)) => {
                ChannelValues::Scale(spline_values(iter.map(Vec3::from), cubic))
            }
            Some(ReadOutputs::MorphTargetWeights(_)) | None => continue,
        };

        channels.push(Channel {
            node: channel.target().node().index(),
            times,
            values,
            interpolation,
        });
    }

    AnimationClip::new(name, channels)
}

/// Cubic spline outputs come as (in-tangent, value, out-tangent) triplets;
/// only the values are kept and blended linearly.
fn spline_values<T>(values: impl Iterator<Item = T>, cubic: bool) -> Vec<T> {
    if cubic {
        values.skip(1).step_by(3).collect()
    } else {
        values.collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spline_triplets_keep_middle_value() {
        let values = spline_values([1, 2, 3, 4, 5, 6].into_iter(), true);
        assert_eq!(values, vec![2, 5]);
        let values = spline_values([1, 2, 3].into_iter(), false);
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn missing_file_is_a_gltf_error() {
        let err = load_gltf_model("no/such/model.glb").unwrap_err();
        assert!(matches!(err, SceneError::Gltf(_)));
    }
}
