//! Ambient occlusion and cavity.

use super::MaterialFeature;
use crate::material::{
    MaterialShaderStage, RGBAColor,
    compute::{ComputeScalarNode, MaterialComputeColorKeys},
    generator::MaterialGeneratorContext,
    parameter::keys,
    stream::streams,
};
use serde::{Deserialize, Serialize};

/// Occlusion of ambient light, and optionally of light in small cavities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OcclusionMapFeature {
    #[serde(default = "one")]
    pub ambient_occlusion_map: ComputeScalarNode,
    /// How much the ambient occlusion also darkens direct lighting.
    #[serde(default = "zero")]
    pub direct_lighting_factor: ComputeScalarNode,
    #[serde(default)]
    pub cavity_map: Option<ComputeScalarNode>,
    #[serde(default = "one")]
    pub diffuse_cavity: ComputeScalarNode,
    #[serde(default = "one")]
    pub specular_cavity: ComputeScalarNode,
}

fn one() -> ComputeScalarNode {
    ComputeScalarNode::constant(1.0)
}

fn zero() -> ComputeScalarNode {
    ComputeScalarNode::constant(0.0)
}

impl Default for OcclusionMapFeature {
    fn default() -> Self {
        Self {
            ambient_occlusion_map: one(),
            direct_lighting_factor: zero(),
            cavity_map: None,
            diffuse_cavity: one(),
            specular_cavity: one(),
        }
    }
}

impl MaterialFeature for OcclusionMapFeature {
    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        let white = RGBAColor::repeat(1.0);

        context.set_stream(
            MaterialShaderStage::Pixel,
            streams::AMBIENT_OCCLUSION,
            &self.ambient_occlusion_map.clamped(0.0, 1.0),
            &MaterialComputeColorKeys::new(keys::AMBIENT_OCCLUSION_MAP, keys::AMBIENT_OCCLUSION_VALUE)
                .with_default_texture_value(white),
        );
        context.set_stream(
            MaterialShaderStage::Pixel,
            streams::AMBIENT_OCCLUSION_DIRECT_LIGHTING_FACTOR,
            &self.direct_lighting_factor.clamped(0.0, 1.0),
            &MaterialComputeColorKeys::value_only(keys::AMBIENT_OCCLUSION_DIRECT_LIGHTING_FACTOR_VALUE),
        );

        let Some(cavity_map) = &self.cavity_map else {
            return;
        };
        context.set_stream(
            MaterialShaderStage::Pixel,
            streams::CAVITY,
            &cavity_map.clamped(0.0, 1.0),
            &MaterialComputeColorKeys::new(keys::CAVITY_MAP, keys::CAVITY_VALUE).with_default_texture_value(white),
        );
        context.set_stream(
            MaterialShaderStage::Pixel,
            streams::CAVITY_DIFFUSE,
            &self.diffuse_cavity.clamped(0.0, 1.0),
            &MaterialComputeColorKeys::value_only(keys::CAVITY_DIFFUSE_VALUE),
        );
        context.set_stream(
            MaterialShaderStage::Pixel,
            streams::CAVITY_SPECULAR,
            &self.specular_cavity.clamped(0.0, 1.0),
            &MaterialComputeColorKeys::value_only(keys::CAVITY_SPECULAR_VALUE),
        );
    }
}
