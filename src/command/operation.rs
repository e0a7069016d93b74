use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::bitmap::Bitmap;
use crate::geometry::Rectangle;
use crate::transform;

/// The redaction applied by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Mosaic,
    Blur,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::Mosaic, ToolKind::Blur];

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Mosaic => "Mosaic",
            ToolKind::Blur => "Blur",
        }
    }
}

/// Strength of a redaction, always within `1..=50`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Intensity(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Intensity {0} is outside 1..=50")]
pub struct InvalidIntensity(pub u8);

impl Intensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 50;

    pub fn new(value: u8) -> Result<Self, InvalidIntensity> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidIntensity(value))
        }
    }

    /// Clamp any integer into the valid range
    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u8> for Intensity {
    type Error = InvalidIntensity;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Intensity> for u8 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}

/// A single committed redaction. Immutable once created: the kind and
/// intensity are frozen at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    id: String,
    kind: ToolKind,
    rect: Rectangle,
    intensity: Intensity,
}

impl Operation {
    /// Create an operation with a fresh random id
    pub fn new(kind: ToolKind, rect: Rectangle, intensity: Intensity) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), kind, rect, intensity)
    }

    pub fn with_id(id: impl Into<String>, kind: ToolKind, rect: Rectangle, intensity: Intensity) -> Self {
        Self {
            id: id.into(),
            kind,
            rect,
            intensity,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    /// Run this operation's transform over `bitmap`
    pub fn apply(&self, bitmap: &mut Bitmap) {
        transform::apply(self.kind, bitmap, &self.rect, self.intensity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_bounds() {
        assert!(Intensity::new(0).is_err());
        assert!(Intensity::new(51).is_err());
        assert_eq!(Intensity::new(1).unwrap().get(), 1);
        assert_eq!(Intensity::new(50).unwrap().get(), 50);
        assert_eq!(Intensity::saturating(-3).get(), 1);
        assert_eq!(Intensity::saturating(900).get(), 50);
    }

    #[test]
    fn test_operation_ids_are_unique() {
        let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let a = Operation::new(ToolKind::Mosaic, rect, Intensity::default());
        let b = Operation::new(ToolKind::Mosaic, rect, Intensity::default());
        assert_ne!(a.id(), b.id());
        assert!(Uuid::parse_str(a.id()).is_ok());
    }

    #[test]
    fn test_operation_json_shape() {
        let op = Operation::with_id(
            "op-1",
            ToolKind::Blur,
            Rectangle::new(1.0, 2.0, 30.0, 40.0),
            Intensity::new(12).unwrap(),
        );
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["kind"], "blur");
        assert_eq!(json["intensity"], 12);
        assert_eq!(json["rect"]["width"], 30.0);
    }

    #[test]
    fn test_out_of_range_intensity_is_rejected_on_deserialize() {
        let json = r#"{"id":"x","kind":"mosaic","rect":{"x":0.0,"y":0.0,"width":9.0,"height":9.0},"intensity":99}"#;
        assert!(serde_json::from_str::<Operation>(json).is_err());
    }
}
