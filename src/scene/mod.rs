pub mod anim;
pub mod camera;
pub mod gltf_loader;
pub mod model;
pub mod placement;

use crate::config::{PlaneConfig, SceneConfig};
use crate::frame_loop::FrameTick;
use crate::resource_path::find_asset;
use crate::shading::{OctaveParams, ShaderUniforms};

use anim::AnimationMixer;
use gltf_loader::load_gltf_model;
use model::LoadedModel;
use placement::ModelPlacement;

/// A placed model and, when it animates, the mixer playing its first clip.
pub struct SceneObject {
    pub model: LoadedModel,
    pub mixer: Option<AnimationMixer>,
}

impl SceneObject {
    /// Applies `placement` to the model's first root node and picks up its
    /// first animation clip if the placement allows it.
    pub fn new(placement: &ModelPlacement, mut model: LoadedModel) -> Self {
        match model.first_root().and_then(|root| model.nodes.get_mut(root)) {
            Some(root) => placement.apply(&mut root.local),
            None => log::warn!("{}: model has no root node to place", placement.name),
        }

        let mixer = if placement.animate {
            model.animations.first().cloned().map(AnimationMixer::new)
        } else {
            None
        };
        match &mixer {
            Some(mixer) => log::info!("{}: playing clip '{}'", placement.name, mixer.clip_name()),
            None => log::info!("{}: no animations to play", placement.name),
        }

        Self {
            model,
            mixer,
        }
    }

    pub fn update(&mut self, delta: f32) {
        if let Some(mixer) = &mut self.mixer {
            mixer.update(delta, &mut self.model.nodes);
        }
    }
}

/// Everything drawn each frame, plus the shader time both surfaces share.
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub water: PlaneConfig,
    pub ground: PlaneConfig,
    pub noise: OctaveParams,
    pub uniforms: ShaderUniforms,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            objects: Vec::new(),
            water: config.water.clone(),
            ground: config.ground.clone(),
            noise: config.noise,
            uniforms: ShaderUniforms::new(0.0, config.water.dimensions()),
        }
    }

    /// Builds the scene and loads every configured model. A model that fails
    /// to load is logged and left out.
    pub fn load(config: &SceneConfig) -> Self {
        let mut scene = Self::new(config);

        for placement in &config.models {
            let Some(path) = find_asset(&config.asset_dir, &placement.file) else {
                log::warn!("{}: {}/{} not found, skipping", placement.name, config.asset_dir, placement.file);
                continue;
            };
            match load_gltf_model(&path) {
                Ok(model) => scene.objects.push(SceneObject::new(placement, model)),
                Err(e) => log::warn!("{}: {}, skipping", placement.name, e),
            }
        }

        log::info!("Scene ready with {} of {} models", scene.objects.len(), config.models.len());
        scene
    }

    /// Advances every mixer by the frame delta and publishes the new time.
    pub fn update(&mut self, tick: FrameTick) {
        for object in &mut self.objects {
            object.update(tick.delta);
        }
        self.uniforms.time = tick.time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anim::{AnimationClip, Channel, ChannelValues, Interpolation};
    use glam::Vec3;
    use model::{ModelNode, NodeTransform};

    fn bobbing_model() -> LoadedModel {
        LoadedModel {
            name: "duck".to_string(),
            nodes: vec![
                ModelNode {
                    parent: None,
                    children: vec![1],
                    local: NodeTransform::default(),
                },
                ModelNode {
                    parent: Some(0),
                    children: Vec::new(),
                    local: NodeTransform::default(),
                },
            ],
            roots: vec![0],
            primitives: Vec::new(),
            textures: Vec::new(),
            animations: vec![AnimationClip::new(
                "bob".to_string(),
                vec![Channel {
                    node: 1,
                    times: vec![0.0, 2.0],
                    values: ChannelValues::Translation(vec![Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0)]),
                    interpolation: Interpolation::Linear,
                }],
            )],
        }
    }

    fn placement(animate: bool) -> ModelPlacement {
        ModelPlacement {
            name: "duck".to_string(),
            file: "duck.glb".to_string(),
            scale: Some([0.5, 0.5, 0.5]),
            position: [Some(1.0), None, None],
            rotations: Vec::new(),
            animate,
        }
    }

    #[test]
    fn placement_lands_on_first_root() {
        let object = SceneObject::new(&placement(true), bobbing_model());
        let root = &object.model.nodes[0].local;
        assert_eq!(root.scale, Vec3::splat(0.5));
        assert_eq!(root.translation, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(object.model.nodes[1].local, NodeTransform::default());
    }

    #[test]
    fn update_drives_mixers_and_time() {
        let config = SceneConfig::default();
        let mut scene = Scene::new(&config);
        scene.objects.push(SceneObject::new(&placement(true), bobbing_model()));
        scene.objects.push(SceneObject::new(&placement(false), bobbing_model()));

        scene.update(FrameTick { delta: 1.0, time: 7.0 });

        assert_eq!(scene.uniforms.time, 7.0);
        assert_eq!(scene.objects[0].model.nodes[1].local.translation, Vec3::new(0.0, 1.0, 0.0));
        assert!(scene.objects[1].mixer.is_none());
        assert_eq!(scene.objects[1].model.nodes[1].local.translation, Vec3::ZERO);
    }

    #[test]
    fn missing_assets_are_skipped() {
        let config = SceneConfig {
            asset_dir: "no-such-assets".to_string(),
            ..SceneConfig::default()
        };
        let scene = Scene::load(&config);
        assert!(scene.objects.is_empty());
        assert_eq!(scene.uniforms.dimensions, config.water.dimensions());
    }
}
