//! Keyframed node animation and a looping single-clip mixer.

use std::collections::HashSet;

use glam::{Quat, Vec3};

use super::model::ModelNode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpolation {
    Linear,
    Step,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChannelValues {
    Translation(Vec<Vec3>),
    Rotation(Vec<Quat>),
    Scale(Vec<Vec3>),
}

impl ChannelValues {
    pub fn len(&self) -> usize {
        match self {
            ChannelValues::Translation(v) | ChannelValues::Scale(v) => v.len(),
            ChannelValues::Rotation(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    pub node: usize,
    pub times: Vec<f32>,
    pub values: ChannelValues,
    pub interpolation: Interpolation,
}

/// Where `time` falls between two keyframes: `(previous, next, blend)`.
fn keyframe_span(times: &[f32], time: f32) -> (usize, usize, f32) {
    let last = times.len() - 1;
    let next = times.partition_point(|&t| t <= time);
    if next == 0 {
        return (0, 0, 0.0);
    }
    if next > last {
        return (last, last, 0.0);
    }

    let previous = next - 1;
    let span = times[next] - times[previous];
    let blend = if span > 0.0 { (time - times[previous]) / span } else { 0.0 };
    (previous, next, blend.clamp(0.0, 1.0))
}

impl Channel {
    /// Writes the sampled value into the target node's local transform.
    pub fn apply(&self, time: f32, nodes: &mut [ModelNode]) {
        if self.times.is_empty() || self.values.len() < self.times.len() {
            return;
        }
        let Some(node) = nodes.get_mut(self.node) else {
            return;
        };

        let (previous, next, mut blend) = keyframe_span(&self.times, time);
        if self.interpolation == Interpolation::Step {
            blend = 0.0;
        }

        match &self.values {
            ChannelValues::Translation(v) => {
                node.local.translation = v[previous].lerp(v[next], blend);
            }
            ChannelValues::Rotation(v) => {
                node.local.rotation = v[previous].slerp(v[next], blend).normalize();
            }
            ChannelValues::Scale(v) => {
                node.local.scale = v[previous].lerp(v[next], blend);
            }
        }
    }

    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub channels: Vec<Channel>,
}

impl AnimationClip {
    pub fn new(name: String, channels: Vec<Channel>) -> Self {
        let duration = channels.iter().map(Channel::end_time).fold(0.0, f32::max);
        Self {
            name,
            duration,
            channels,
        }
    }

    /// True when every channel targets a node in `targets`.
    pub fn drives_only(&self, targets: &HashSet<usize>) -> bool {
        !self.channels.is_empty() && self.channels.iter().all(|c| targets.contains(&c.node))
    }

    pub fn sample(&self, time: f32, nodes: &mut [ModelNode]) {
        for channel in &self.channels {
            channel.apply(time, nodes);
        }
    }
}

/// Plays one clip on repeat, advanced by the frame delta.
#[derive(Clone, Debug)]
pub struct AnimationMixer {
    clip: AnimationClip,
    time: f32,
}

impl AnimationMixer {
    pub fn new(clip: AnimationClip) -> Self {
        Self { clip, time: 0.0 }
    }

    pub fn clip_name(&self) -> &str {
        &self.clip.name
    }

    /// Current position within the clip, in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn update(&mut self, delta: f32, nodes: &mut [ModelNode]) {
        self.time += delta.max(0.0);
        if self.clip.duration > 0.0 {
            self.time = self.time.rem_euclid(self.clip.duration);
        } else {
            self.time = 0.0;
        }
        self.clip.sample(self.time, nodes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::model::NodeTransform;

    fn nodes() -> Vec<ModelNode> {
        vec![ModelNode {
            parent: None,
            children: Vec::new(),
            local: NodeTransform::default(),
        }]
    }

    fn slide(interpolation: Interpolation) -> AnimationClip {
        AnimationClip::new(
            "slide".to_string(),
            vec![Channel {
                node: 0,
                times: vec![0.0, 1.0, 2.0],
                values: ChannelValues::Translation(vec![
                    Vec3::ZERO,
                    Vec3::new(2.0, 0.0, 0.0),
                    Vec3::new(2.0, 4.0, 0.0),
                ]),
                interpolation,
            }],
        )
    }

    #[test]
    fn clip_duration_is_last_keyframe() {
        assert_eq!(slide(Interpolation::Linear).duration, 2.0);
    }

    #[test]
    fn linear_channel_blends_between_keys() {
        let mut nodes = nodes();
        slide(Interpolation::Linear).sample(0.5, &mut nodes);
        assert_eq!(nodes[0].local.translation, Vec3::new(1.0, 0.0, 0.0));
        slide(Interpolation::Linear).sample(1.5, &mut nodes);
        assert_eq!(nodes[0].local.translation, Vec3::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn step_channel_holds_previous_key() {
        let mut nodes = nodes();
        slide(Interpolation::Step).sample(1.9, &mut nodes);
        assert_eq!(nodes[0].local.translation, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn sampling_outside_range_clamps() {
        let mut nodes = nodes();
        slide(Interpolation::Linear).sample(-1.0, &mut nodes);
        assert_eq!(nodes[0].local.translation, Vec3::ZERO);
        slide(Interpolation::Linear).sample(10.0, &mut nodes);
        assert_eq!(nodes[0].local.translation, Vec3::new(2.0, 4.0, 0.0));
    }

    #[test]
    fn mixer_loops() {
        let mut nodes = nodes();
        let mut mixer = AnimationMixer::new(slide(Interpolation::Linear));
        mixer.update(1.5, &mut nodes);
        mixer.update(1.0, &mut nodes);
        assert!((mixer.time() - 0.5).abs() < 1e-6);
        assert!((nodes[0].local.translation - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn rotation_channel_slerps() {
        let mut nodes = nodes();
        let clip = AnimationClip::new(
            "spin".to_string(),
            vec![Channel {
                node: 0,
                times: vec![0.0, 1.0],
                values: ChannelValues::Rotation(vec![
                    Quat::IDENTITY,
                    Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
                ]),
                interpolation: Interpolation::Linear,
            }],
        );
        clip.sample(0.5, &mut nodes);
        let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
        assert!(nodes[0].local.rotation.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn drives_only_checks_every_channel() {
        let mut clip = slide(Interpolation::Linear);
        assert!(clip.drives_only(&HashSet::from([0, 3])));
        assert!(!clip.drives_only(&HashSet::from([3])));

        let mut other = clip.channels[0].clone();
        other.node = 3;
        clip.channels.push(other);
        assert!(!clip.drives_only(&HashSet::from([3])));
        assert!(!AnimationClip::new("empty".to_string(), Vec::new()).drives_only(&HashSet::from([0])));
    }

    #[test]
    fn channel_for_missing_node_is_ignored() {
        let mut nodes = nodes();
        let mut clip = slide(Interpolation::Linear);
        clip.channels[0].node = 7;
        clip.sample(0.5, &mut nodes);
        assert_eq!(nodes[0].local.translation, Vec3::ZERO);
    }
}
