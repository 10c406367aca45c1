//! Configuration of material generation.

use serde::{Deserialize, Serialize};

/// Feature level of the graphics device the material targets. Levels are
/// ordered, so a feature can require a minimum level.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GraphicsProfile {
    Level9_1,
    Level9_2,
    Level9_3,
    #[default]
    Level10_0,
    Level10_1,
    Level11_0,
    Level11_1,
    Level11_2,
}

/// Color space that constant colors are expressed in when bound as shader
/// parameters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSpace {
    #[default]
    Linear,
    Gamma,
}

/// Configuration parameters for material generation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialGeneratorConfig {
    /// Feature level of the target graphics device.
    pub graphics_profile: GraphicsProfile,
    /// Color space of the bound color parameters.
    pub color_space: ColorSpace,
}
