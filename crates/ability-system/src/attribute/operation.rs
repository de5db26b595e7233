/// Arithmetic applied to an attribute's base value by effects and costs.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttributeOperation {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
    Set,
}

impl AttributeOperation {
    /// Returns the new value, or `None` for a division by zero.
    pub fn apply(self, value: f32, magnitude: f32) -> Option<f32> {
        match self {
            Self::Add => Some(value + magnitude),
            Self::Subtract => Some(value - magnitude),
            Self::Multiply => Some(value * magnitude),
            Self::Divide if magnitude == 0.0 => None,
            Self::Divide => Some(value / magnitude),
            Self::Set => Some(magnitude),
        }
    }
}
