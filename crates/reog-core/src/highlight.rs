use crate::model::{Emphasis, ModelPart, PartId};
use fnv::FnvHashMap;
use glam::Vec3;

/// Emphasis applied to every part while the pointer is over the model (`#ff6600`).
pub const HIGHLIGHT: Emphasis = Emphasis {
    color: Vec3::new(1.0, 0.4, 0.0),
    intensity: 0.6,
};

/// Intensity restored together with the baseline colour.
pub const BASELINE_INTENSITY: f32 = 1.0;

/// Each part's emphasis as loaded, recorded before the first highlight.
#[derive(Clone, Debug, Default)]
pub struct EmphasisBaseline {
    colors: FnvHashMap<PartId, Vec3>,
}

impl EmphasisBaseline {
    pub fn capture(parts: &[ModelPart]) -> Self {
        Self {
            colors: parts.iter().map(|p| (p.id, p.emphasis.color)).collect(),
        }
    }

    pub fn baseline_of(&self, id: PartId) -> Option<Emphasis> {
        self.colors.get(&id).map(|color| Emphasis {
            color: *color,
            intensity: BASELINE_INTENSITY,
        })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Highlight every part, or restore recorded baselines. Parts without a
    /// recorded baseline keep whatever emphasis they have.
    pub fn apply(&self, parts: &mut [ModelPart], active: bool) {
        for part in parts {
            if active {
                part.emphasis = HIGHLIGHT;
            } else if let Some(original) = self.baseline_of(part.id) {
                part.emphasis = original;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::box_part;

    #[test]
    fn highlight_then_restore() {
        let mut parts = vec![box_part("a", Vec3::ZERO, Vec3::ONE)];
        parts[0].emphasis = Emphasis {
            color: Vec3::new(0.1, 0.2, 0.3),
            intensity: 0.25,
        };
        let baseline = EmphasisBaseline::capture(&parts);

        baseline.apply(&mut parts, true);
        assert_eq!(parts[0].emphasis, HIGHLIGHT);

        baseline.apply(&mut parts, false);
        assert_eq!(parts[0].emphasis.color, Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(parts[0].emphasis.intensity, BASELINE_INTENSITY);
    }

    #[test]
    fn unrecorded_part_is_left_alone_on_restore() {
        let mut parts = vec![box_part("a", Vec3::ZERO, Vec3::ONE)];
        let baseline = EmphasisBaseline::default();
        baseline.apply(&mut parts, true);
        baseline.apply(&mut parts, false);
        assert_eq!(parts[0].emphasis, HIGHLIGHT);
    }
}
