//! Specular color, metalness and specular shading models.

use super::{MaterialFeature, ThinGlassModelFeature};
use crate::{
    material::{
        MaterialShaderStage, RGBAColor,
        compute::{ComputeColorNode, ComputeScalarNode, MaterialComputeColorKeys},
        generator::MaterialGeneratorContext,
        parameter::keys,
        shading::{HairShadingModel, MicrofacetModel, ShadingModel},
        stream::streams,
    },
    shader::{ShaderClassSource, ShaderMixinSource},
};
use serde::{Deserialize, Serialize};

/// Either a metalness map or an explicit specular color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpecularFeature {
    Metalness(MetalnessMapFeature),
    SpecularMap(SpecularMapFeature),
}

/// Specular color derived from the diffuse color by a metalness factor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetalnessMapFeature {
    pub metalness_map: ComputeScalarNode,
}

/// Explicit specular color and intensity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecularMapFeature {
    pub specular_map: ComputeColorNode,
    #[serde(default = "default_intensity")]
    pub intensity: ComputeScalarNode,
}

/// How specular light is reflected by the surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpecularModelFeature {
    Microfacet(MicrofacetModel),
    ThinGlass(ThinGlassModelFeature),
    Hair(HairShadingModel),
}

fn default_intensity() -> ComputeScalarNode {
    ComputeScalarNode::constant(1.0)
}

impl MaterialFeature for SpecularFeature {
    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        match self {
            Self::Metalness(feature) => feature.generate_shader(context),
            Self::SpecularMap(feature) => feature.generate_shader(context),
        }
    }
}

impl MetalnessMapFeature {
    pub fn new(metalness_map: ComputeScalarNode) -> Self {
        Self { metalness_map }
    }
}

impl MaterialFeature for MetalnessMapFeature {
    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        add_metalness_map(context, &self.metalness_map);
    }
}

/// Adds a `MaterialSurfaceMetalness` computing the metalness from the given
/// graph, clamped to [0, 1].
pub(super) fn add_metalness_map(context: &mut MaterialGeneratorContext, metalness_map: &ComputeScalarNode) {
    let metalness_map = metalness_map.clamped(0.0, 1.0);
    let source = context.generate_compute_source(
        &metalness_map,
        &MaterialComputeColorKeys::new(keys::METALNESS_MAP, keys::METALNESS_VALUE),
    );

    context.use_stream(MaterialShaderStage::Pixel, streams::SPECULAR);
    context.add_shader_source(
        MaterialShaderStage::Pixel,
        ShaderMixinSource::of_class("MaterialSurfaceMetalness")
            .with_composition("metalnessMap", source)
            .into(),
    );
}

impl SpecularMapFeature {
    pub fn new(specular_map: ComputeColorNode) -> Self {
        Self {
            specular_map,
            intensity: default_intensity(),
        }
    }
}

impl MaterialFeature for SpecularMapFeature {
    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        let specular_map = self.specular_map.clamped_uniform(0.0, 1.0);
        let intensity = self.intensity.clamped(0.0, 1.0);

        context.set_stream(
            MaterialShaderStage::Pixel,
            streams::SPECULAR,
            &specular_map,
            &MaterialComputeColorKeys::new(keys::SPECULAR_MAP, keys::SPECULAR_VALUE)
                .with_default_texture_value(RGBAColor::repeat(1.0)),
        );
        context.set_stream(
            MaterialShaderStage::Pixel,
            streams::SPECULAR_INTENSITY,
            &intensity,
            &MaterialComputeColorKeys::value_only(keys::SPECULAR_INTENSITY_VALUE).not_color(),
        );
    }
}

impl MaterialFeature for SpecularModelFeature {
    fn multipass_generation(&self, context: &mut MaterialGeneratorContext) {
        if let Self::ThinGlass(feature) = self {
            feature.multipass_generation(context);
        }
    }

    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        match self {
            Self::Microfacet(model) => {
                context
                    .add_shading(ShadingModel::SpecularMicrofacet(*model))
                    .light_dependent_surface = Some(model.shader_source());
            }
            Self::ThinGlass(feature) => feature.generate_shader(context),
            Self::Hair(model) => {
                context
                    .add_shading(ShadingModel::SpecularHair(*model))
                    .light_dependent_surface = Some(
                    ShaderClassSource::new("MaterialSurfaceShadingSpecularHair")
                        .with_argument(model.index())
                        .into(),
                );
            }
        }
    }
}

impl SpecularModelFeature {
    /// Whether this is the hair shading model.
    pub fn is_hair(&self) -> bool {
        matches!(self, Self::Hair(_))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::material::{
        generator::{MaterialGeneratorConfig, MaterialGeneratorStep},
        parameter::ParameterValue,
    };

    fn generating_context() -> MaterialGeneratorContext {
        let mut context = MaterialGeneratorContext::new(MaterialGeneratorConfig::default());
        context.set_step(MaterialGeneratorStep::GenerateShader);
        context.push_pass();
        context.push_layer(None);
        context
    }

    #[test]
    fn metalness_uses_only_specular_stream() {
        let mut context = generating_context();
        MetalnessMapFeature::new(ComputeScalarNode::constant(1.0)).generate_shader(&mut context);
        assert_eq!(
            context.current_layer().stage(MaterialShaderStage::Pixel).streams(),
            &[streams::SPECULAR]
        );
    }

    #[test]
    fn specular_intensity_above_one_is_bound_as_one() {
        let mut context = generating_context();
        SpecularMapFeature {
            specular_map: ComputeColorNode::constant(RGBAColor::repeat(1.0)),
            intensity: ComputeScalarNode::constant(5.0),
        }
        .generate_shader(&mut context);

        assert_eq!(
            context.parameters().get_key(&keys::SPECULAR_INTENSITY_VALUE),
            Some(&ParameterValue::Float(1.0))
        );
        assert_eq!(
            context.current_layer().stage(MaterialShaderStage::Pixel).streams(),
            &[streams::SPECULAR, streams::SPECULAR_INTENSITY]
        );
    }

    #[test]
    fn microfacet_model_adds_light_dependent_surface() {
        let mut context = generating_context();
        SpecularModelFeature::Microfacet(MicrofacetModel::default()).generate_shader(&mut context);
        let models = context.current_layer().shading_models();
        assert_eq!(models.len(), 1);
        assert!(
            models
                .generate()
                .iter()
                .any(|source| source.references_class("MaterialSurfaceShadingSpecularMicrofacet"))
        );
    }
}
