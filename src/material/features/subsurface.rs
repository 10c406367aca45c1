//! Light scattered beneath the surface.

use super::MaterialFeature;
use crate::{
    material::{
        MaterialShaderStage,
        compute::{ComputeScalarNode, MaterialComputeColorKeys},
        generator::MaterialGeneratorContext,
        parameter::{ParameterValue, keys},
        shading::{ScatteringProfile, ShadingModel},
        stream::streams,
    },
    shader::{ShaderClassSource, ShaderMixinSource},
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubsurfaceScatteringFeature {
    /// Distance light travels beneath the surface, in world units.
    #[serde(default = "default_scattering_width")]
    pub scattering_width: f32,
    #[serde(default = "default_scattering_strength")]
    pub scattering_strength: ComputeScalarNode,
    #[serde(default = "default_translucency")]
    pub translucency_map: ComputeScalarNode,
    #[serde(default)]
    pub profile: ScatteringProfile,
}

fn default_scattering_width() -> f32 {
    1.0
}

fn default_scattering_strength() -> ComputeScalarNode {
    ComputeScalarNode::constant(1.0)
}

fn default_translucency() -> ComputeScalarNode {
    ComputeScalarNode::constant(0.83)
}

impl Default for SubsurfaceScatteringFeature {
    fn default() -> Self {
        Self {
            scattering_width: default_scattering_width(),
            scattering_strength: default_scattering_strength(),
            translucency_map: default_translucency(),
            profile: ScatteringProfile::default(),
        }
    }
}

impl MaterialFeature for SubsurfaceScatteringFeature {
    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        context.parameters_mut().set(
            &keys::SUBSURFACE_SCATTERING_WIDTH,
            ParameterValue::Float(self.scattering_width.max(0.0)),
        );

        context.set_stream(
            MaterialShaderStage::Pixel,
            streams::SCATTERING_STRENGTH,
            &self.scattering_strength.clamped(0.0, 1.0),
            &MaterialComputeColorKeys::value_only(keys::SCATTERING_STRENGTH_VALUE).not_color(),
        );
        context.set_stream(
            MaterialShaderStage::Pixel,
            streams::TRANSLUCENCY,
            &self.translucency_map.clamped(0.0, 1.0),
            &MaterialComputeColorKeys::new(keys::TRANSLUCENCY_MAP, keys::TRANSLUCENCY_VALUE).not_color(),
        );

        let builder = context.add_shading(ShadingModel::SubsurfaceScattering(self.profile));
        builder.light_dependent_surface = Some(
            ShaderMixinSource::of_class("MaterialSurfaceSubsurfaceScatteringShading")
                .with_composition("scatteringProfileFunction", self.profile.shader_source())
                .into(),
        );
        builder.light_dependent_extra_models = vec![ShaderClassSource::new("MaterialSubsurfaceScatteringLighting")];
    }
}
