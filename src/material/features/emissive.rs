//! Emitted light.

use super::MaterialFeature;
use crate::{
    material::{
        MaterialShaderStage,
        compute::{ComputeColorNode, ComputeScalarNode, MaterialComputeColorKeys},
        generator::MaterialGeneratorContext,
        parameter::keys,
        shading::ShadingModel,
        stream::streams,
    },
    shader::ShaderClassSource,
};
use serde::{Deserialize, Serialize};

/// Light emitted by the surface, independent of the lights in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmissiveMapFeature {
    pub emissive_map: ComputeColorNode,
    #[serde(default = "default_intensity")]
    pub intensity: ComputeScalarNode,
    /// Whether the alpha of the emissive color modulates the emission.
    #[serde(default)]
    pub use_alpha: bool,
}

fn default_intensity() -> ComputeScalarNode {
    ComputeScalarNode::constant(1.0)
}

impl EmissiveMapFeature {
    pub fn new(emissive_map: ComputeColorNode) -> Self {
        Self {
            emissive_map,
            intensity: default_intensity(),
            use_alpha: false,
        }
    }
}

impl MaterialFeature for EmissiveMapFeature {
    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        context.set_stream(
            MaterialShaderStage::Pixel,
            streams::EMISSIVE,
            &self.emissive_map,
            &MaterialComputeColorKeys::new(keys::EMISSIVE_MAP, keys::EMISSIVE_VALUE),
        );
        context.set_stream(
            MaterialShaderStage::Pixel,
            streams::EMISSIVE_INTENSITY,
            &self.intensity.clamped(0.0, f32::MAX),
            &MaterialComputeColorKeys::value_only(keys::EMISSIVE_INTENSITY).not_color(),
        );

        let builder = context.add_shading(ShadingModel::Emissive {
            use_alpha: self.use_alpha,
        });
        builder.shader_sources =
            vec![ShaderClassSource::with_arguments("MaterialSurfaceEmissiveShading", [self.use_alpha]).into()];
    }
}
