use glam::{Mat4, Quat, Vec3};

use crate::render::types::VertexData;

use super::anim::AnimationClip;

/// Translation / rotation / scale of one node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl NodeTransform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Debug)]
pub struct ModelNode {
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub local: NodeTransform,
}

/// RGBA8 pixels of a base color texture.
#[derive(Clone, Debug)]
pub struct ModelTexture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct ModelPrimitive {
    /// Node whose world transform places this primitive.
    pub node: usize,
    pub vertices: Vec<VertexData>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
    /// Index into [`LoadedModel::textures`].
    pub texture: Option<usize>,
}

/// A model file flattened into drawable primitives plus its node hierarchy.
#[derive(Clone, Debug)]
pub struct LoadedModel {
    pub name: String,
    pub nodes: Vec<ModelNode>,
    /// Root nodes of the scene, in file order.
    pub roots: Vec<usize>,
    pub primitives: Vec<ModelPrimitive>,
    pub textures: Vec<ModelTexture>,
    pub animations: Vec<AnimationClip>,
}

impl LoadedModel {
    /// The node placement overrides apply to.
    pub fn first_root(&self) -> Option<usize> {
        self.roots.first().copied()
    }

    /// World matrix of every node, indexed like `nodes`. Nodes unreachable
    /// from a root keep the identity.
    pub fn world_transforms(&self) -> Vec<Mat4> {
        let mut world = vec![Mat4::IDENTITY; self.nodes.len()];
        let mut stack: Vec<(usize, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|&root| (root, Mat4::IDENTITY))
            .collect();

        while let Some((index, parent)) = stack.pop() {
            let Some(node) = self.nodes.get(index) else {
                continue;
            };
            let matrix = parent * node.local.matrix();
            world[index] = matrix;
            for &child in node.children.iter().rev() {
                stack.push((child, matrix));
            }
        }

        world
    }

    /// Nodes reachable from `root` through child links, indexed like `nodes`.
    pub fn reachable_from(&self, root: usize) -> Vec<bool> {
        let mut reachable = vec![false; self.nodes.len()];
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            let Some(node) = self.nodes.get(index) else {
                continue;
            };
            if reachable[index] {
                continue;
            }
            reachable[index] = true;
            stack.extend(node.children.iter().copied());
        }
        reachable
    }

    /// Makes `root` the only root and drops primitives hanging off any node
    /// outside its subtree. Returns how many primitives were dropped.
    pub fn retain_subtree(&mut self, root: usize) -> usize {
        let reachable = self.reachable_from(root);
        let before = self.primitives.len();
        self.primitives
            .retain(|primitive| reachable.get(primitive.node).copied().unwrap_or(false));
        self.roots = vec![root];
        before - self.primitives.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.primitives.iter().map(|p| p.indices.len() / 3).sum()
    }
}
