use crate::model::Aabb;

/// Vertical band of the artifact a click landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Top of the model: the peacock-feather crown.
    Headpiece,
    /// The tiger-head mask and the warok figures.
    Middle,
    /// Costume and dancers.
    Lower,
    /// Used when the model has no usable height (flat or degenerate bounds),
    /// where a normalized height cannot be computed.
    General,
}

impl Region {
    /// Classify a normalized height `t` in `[0, 1]` (0 = bottom of bounds).
    /// The middle band is closed at both ends: 0.35 and 0.7 are both Middle.
    pub fn classify(t: f32) -> Region {
        if !t.is_finite() {
            Region::General
        } else if t > 0.7 {
            Region::Headpiece
        } else if t >= 0.35 {
            Region::Middle
        } else {
            Region::Lower
        }
    }

    /// Classify a local-space hit height against the model bounds.
    pub fn from_hit(local_y: f32, bounds: &Aabb) -> Region {
        let height = bounds.height();
        if !(height > 0.0) {
            return Region::General;
        }
        Region::classify((local_y - bounds.min.y) / height)
    }

    pub fn title(self) -> &'static str {
        match self {
            Region::Headpiece => "Dadak Merak",
            Region::Middle => "Wajah Barongan / Warok",
            Region::Lower => "Kostum & Penari Bawah",
            Region::General => "Umum",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Region::Headpiece => {
                "The Dadak Merak is the great crown of peacock feathers rising above \
                 the tiger head. It can weigh over 50 kg and is carried by the dancer \
                 with his teeth alone, a feat of strength that defines the performance."
            }
            Region::Middle => {
                "The Barongan is the fierce tiger head at the heart of the mask. Around \
                 it stand the Warok, the wise and powerful guardians whose black \
                 costumes and stern faces embody spiritual and physical strength."
            }
            Region::Lower => {
                "The lower part shows the costume and the supporting dancers: the \
                 Jathil horse riders, the masked Bujang Ganong, and the musicians who \
                 drive the performance with kendang, gong, and trumpet."
            }
            Region::General => {
                "Reog Ponorogo is a traditional dance-drama from Ponorogo, East Java. \
                 It combines a giant tiger and peacock mask with acrobatic dancers, \
                 gamelan music, and stories of the kingdom of Bantarangin."
            }
        }
    }

    pub fn info(self) -> InfoRequest {
        InfoRequest {
            region: self,
            title: self.title().to_string(),
            body: self.description().to_string(),
        }
    }
}

/// Content for the info panel, produced by a click on the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoRequest {
    pub region: Region,
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn band_edges() {
        assert_eq!(Region::classify(0.71), Region::Headpiece);
        assert_eq!(Region::classify(0.7), Region::Middle);
        assert_eq!(Region::classify(0.36), Region::Middle);
        assert_eq!(Region::classify(0.35), Region::Middle);
        assert_eq!(Region::classify(0.34), Region::Lower);
        assert_eq!(Region::classify(f32::NAN), Region::General);
    }

    #[test]
    fn flat_bounds_are_general() {
        let flat = Aabb {
            min: Vec3::new(0.0, 1.0, 0.0),
            max: Vec3::new(1.0, 1.0, 1.0),
        };
        assert_eq!(Region::from_hit(1.0, &flat), Region::General);
    }

    #[test]
    fn info_carries_titles() {
        let info = Region::Headpiece.info();
        assert_eq!(info.title, "Dadak Merak");
        assert!(!info.body.is_empty());
    }
}
