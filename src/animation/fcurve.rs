use crate::{
    foundation::core::FrameIndex,
    scene::asset::{ObjectId, Transform},
};

/// Interpolation applied from a keyframe toward the next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Interpolation {
    /// Hold the key's value until the next key.
    Constant,
    Linear,
    /// Eased in and out; the default for freshly inserted keys.
    Bezier,
}

impl Interpolation {
    /// Map segment progress `t` in `[0, 1]` to blend weight.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Constant => 0.0,
            Self::Linear => t,
            Self::Bezier => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    pub frame: FrameIndex,
    pub value: f32,
    pub interpolation: Interpolation, // toward next key
}

/// Transform property an [`FCurve`] drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ChannelPath {
    Location,
    RotationEuler,
    Scale,
}

/// Keyframes for one component (`index` 0..3) of one transform property.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FCurve {
    pub path: ChannelPath,
    pub index: usize,
    keys: Vec<Keyframe>, // sorted by frame, unique frames
}

impl FCurve {
    pub fn new(path: ChannelPath, index: usize) -> Self {
        Self {
            path,
            index,
            keys: Vec::new(),
        }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Insert a key, replacing any key already on the same frame.
    pub fn insert(&mut self, key: Keyframe) {
        match self.keys.binary_search_by_key(&key.frame, |k| k.frame) {
            Ok(i) => self.keys[i] = key,
            Err(i) => self.keys.insert(i, key),
        }
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        for key in &mut self.keys {
            key.interpolation = interpolation;
        }
    }

    /// Value at `frame`; holds the first/last key outside the keyed span.
    pub fn evaluate(&self, frame: FrameIndex) -> Option<f32> {
        let first = self.keys.first()?;
        let idx = self.keys.partition_point(|k| k.frame <= frame);
        if idx == 0 {
            return Some(first.value);
        }
        if idx >= self.keys.len() {
            return self.keys.last().map(|k| k.value);
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let t = (frame.0 - a.frame.0) as f32 / (b.frame.0 - a.frame.0) as f32;
        let w = a.interpolation.apply(t);
        Some(a.value + (b.value - a.value) * w)
    }
}

/// Animation data attached to one object: one curve per keyed channel component.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationTrack {
    pub target: ObjectId,
    pub channels: Vec<FCurve>,
}

impl AnimationTrack {
    pub fn new(target: ObjectId) -> Self {
        Self {
            target,
            channels: Vec::new(),
        }
    }

    pub fn channel(&self, path: ChannelPath, index: usize) -> Option<&FCurve> {
        self.channels
            .iter()
            .find(|c| c.path == path && c.index == index)
    }

    /// Curve for `(path, index)`, created on first use.
    pub fn channel_mut(&mut self, path: ChannelPath, index: usize) -> &mut FCurve {
        let pos = match self
            .channels
            .iter()
            .position(|c| c.path == path && c.index == index)
        {
            Some(pos) => pos,
            None => {
                self.channels.push(FCurve::new(path, index));
                self.channels.len() - 1
            }
        };
        &mut self.channels[pos]
    }

    /// Key all three components of `path` from the current values in `transform`.
    pub fn insert_vector_keys(
        &mut self,
        path: ChannelPath,
        transform: &Transform,
        frame: FrameIndex,
        interpolation: Interpolation,
    ) {
        let values = match path {
            ChannelPath::Location => transform.location,
            ChannelPath::RotationEuler => transform.rotation_euler,
            ChannelPath::Scale => transform.scale,
        };
        for (index, value) in values.to_array().into_iter().enumerate() {
            self.channel_mut(path, index).insert(Keyframe {
                frame,
                value,
                interpolation,
            });
        }
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        for channel in &mut self.channels {
            channel.set_interpolation(interpolation);
        }
    }

    pub fn keyframe_count(&self) -> usize {
        self.channels.iter().map(|c| c.keys.len()).sum()
    }

    /// Overwrite the animated components of `transform` with their values at `frame`.
    pub fn apply(&self, transform: &mut Transform, frame: FrameIndex) {
        for channel in &self.channels {
            let Some(value) = channel.evaluate(frame) else {
                continue;
            };
            let target = match channel.path {
                ChannelPath::Location => &mut transform.location,
                ChannelPath::RotationEuler => &mut transform.rotation_euler,
                ChannelPath::Scale => &mut transform.scale,
            };
            if channel.index < 3 {
                target[channel.index] = value;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/fcurve.rs"]
mod tests;
