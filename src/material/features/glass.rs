//! Thin glass rendered in separate transmittance and reflectance passes.

use super::MaterialFeature;
use crate::{
    material::{
        Blend, BlendStateDescription, CullMode, MaterialShaderStage,
        generator::{DEFAULT_FINAL_CALLBACK_ORDER, MaterialGeneratorContext},
        parameter::{ParameterValue, keys},
        shading::{MicrofacetModel, ShadingModel},
    },
    shader::ShaderClassSource,
};
use serde::{Deserialize, Serialize};

/// Specular model for thin glass.
///
/// Glass needs two passes: one darkening the background by the light
/// transmitted through the glass, and one adding the light it reflects. Two
/// sided glass, which has no culling, renders both passes for the back
/// faces before the front faces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThinGlassModelFeature {
    #[serde(default = "MicrofacetModel::thin_glass")]
    pub model: MicrofacetModel,
    #[serde(default = "default_refractive_index")]
    pub refractive_index: f32,
}

/// Render state of a single glass pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GlassPassConfiguration {
    /// Whether the pass renders transmitted rather than reflected light.
    pub is_transmittance: bool,
    /// The faces the pass renders, when forced by the pass layout.
    pub cull_mode: Option<CullMode>,
}

fn default_refractive_index() -> f32 {
    1.52
}

impl Default for ThinGlassModelFeature {
    fn default() -> Self {
        Self {
            model: MicrofacetModel::thin_glass(),
            refractive_index: default_refractive_index(),
        }
    }
}

impl GlassPassConfiguration {
    /// Number of passes for glass with the given cull mode.
    pub fn pass_count(cull_mode: Option<CullMode>) -> usize {
        if cull_mode == Some(CullMode::None) { 4 } else { 2 }
    }

    /// The configuration of the pass with the given index.
    pub fn new(pass_index: usize, pass_count: usize) -> Self {
        let cull_mode = (pass_count == 4).then(|| {
            if pass_index < 2 {
                CullMode::Front
            } else {
                CullMode::Back
            }
        });
        Self {
            is_transmittance: pass_index % 2 == 0,
            cull_mode,
        }
    }

    pub fn blend_state(&self) -> BlendStateDescription {
        if self.is_transmittance {
            BlendStateDescription::new(Blend::Zero, Blend::SourceColor).with_alpha(Blend::One, Blend::Zero)
        } else {
            BlendStateDescription::ADDITIVE
        }
    }
}

impl MaterialFeature for ThinGlassModelFeature {
    fn multipass_generation(&self, context: &mut MaterialGeneratorContext) {
        let pass_count = GlassPassConfiguration::pass_count(context.current_material_cull_mode());
        context.set_multiple_passes("Glass", pass_count);
    }

    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        context
            .add_shading(ShadingModel::SpecularThinGlass(self.model))
            .light_dependent_surface = Some(self.model.shader_source());

        context.parameters_mut().set(
            &keys::REFRACTIVE_INDEX,
            ParameterValue::Float(self.refractive_index),
        );

        let configuration = GlassPassConfiguration::new(context.pass_index(), context.pass_count());

        let pass = context.material_pass_mut();
        pass.has_transparency = true;
        pass.blend_state = Some(configuration.blend_state());
        if let Some(cull_mode) = configuration.cull_mode {
            pass.cull_mode = Some(cull_mode);
        }

        if configuration.is_transmittance && context.tag_once("GlassTransmittance") {
            context.add_final_callback(
                MaterialShaderStage::Pixel,
                DEFAULT_FINAL_CALLBACK_ORDER,
                |stage, context| {
                    context.add_shader_source(
                        stage,
                        ShaderClassSource::new("MaterialSurfaceTransmittanceShading").into(),
                    );
                },
            );
        }
    }
}
