//! Diffuse color and diffuse shading models.

use super::MaterialFeature;
use crate::{
    material::{
        MaterialShaderStage, RGBAColor,
        compute::{ComputeColorNode, MaterialComputeColorKeys},
        generator::MaterialGeneratorContext,
        parameter::keys,
        shading::{CelShadingModel, HairShadingModel, ShadingModel},
        stream::streams,
    },
    shader::{ShaderClassSource, ShaderMixinSource},
};
use serde::{Deserialize, Serialize};

/// The diffuse color of the surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiffuseMapFeature {
    pub diffuse_map: ComputeColorNode,
}

/// How diffuse light is reflected by the surface.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum DiffuseModelFeature {
    #[default]
    Lambert,
    CelShading(CelShadingModel),
    Hair(HairShadingModel),
}

impl DiffuseMapFeature {
    pub fn new(diffuse_map: ComputeColorNode) -> Self {
        Self { diffuse_map }
    }
}

impl MaterialFeature for DiffuseMapFeature {
    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        add_diffuse_map(context, &self.diffuse_map);
    }
}

/// Adds a `MaterialSurfaceDiffuse` computing the diffuse color from the
/// given graph, clamped to valid colors.
pub(super) fn add_diffuse_map(context: &mut MaterialGeneratorContext, diffuse_map: &ComputeColorNode) {
    let diffuse_map = diffuse_map.clamped_uniform(0.0, 1.0);
    let keys = MaterialComputeColorKeys::new(keys::DIFFUSE_MAP, keys::DIFFUSE_VALUE)
        .with_default_texture_value(RGBAColor::repeat(1.0));
    let source = context.generate_compute_source(&diffuse_map, &keys);

    context.use_stream(MaterialShaderStage::Pixel, streams::DIFFUSE);
    context.use_stream(MaterialShaderStage::Pixel, streams::COLOR_BASE);
    context.add_shader_source(
        MaterialShaderStage::Pixel,
        ShaderMixinSource::of_class("MaterialSurfaceDiffuse")
            .with_composition("diffuseMap", source)
            .into(),
    );
}

impl MaterialFeature for DiffuseModelFeature {
    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        match self {
            Self::Lambert => {
                context
                    .add_shading(ShadingModel::DiffuseLambert)
                    .light_dependent_surface = Some(
                    ShaderClassSource::with_arguments("MaterialSurfaceShadingDiffuseLambert", [false]).into(),
                );
            }
            Self::CelShading(model) => {
                let surface = ShaderMixinSource::new(ShaderClassSource::with_arguments(
                    "MaterialSurfaceShadingDiffuseCelShading",
                    [model.is_energy_conservative],
                ))
                .with_composition("rampFunction", model.ramp.shader_source());
                context
                    .add_shading(ShadingModel::DiffuseCelShading(model.clone()))
                    .light_dependent_surface = Some(surface.into());
            }
            Self::Hair(model) => {
                let surface = ShaderClassSource::new("MaterialSurfaceShadingDiffuseHair")
                    .with_argument(false)
                    .with_argument(model.index());
                context
                    .add_shading(ShadingModel::DiffuseHair(*model))
                    .light_dependent_surface = Some(surface.into());
            }
        }
    }
}
