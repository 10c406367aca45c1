//! Normal and glossiness maps.

use super::MaterialFeature;
use crate::{
    material::{
        MaterialShaderStage, RGBAColor,
        compute::{ComputeColorNode, ComputeScalarNode, MaterialComputeColorKeys},
        generator::MaterialGeneratorContext,
        parameter::{ParameterValue, keys},
        stream::streams,
    },
    shader::{ShaderClassSource, ShaderMixinSource},
};
use serde::{Deserialize, Serialize};

/// Texel of a normal map that leaves the normal unperturbed.
pub const DEFAULT_NORMAL_COLOR: RGBAColor = RGBAColor::new(0.5, 0.5, 1.0, 1.0);

/// Normals perturbed by a normal map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalMapFeature {
    pub normal_map: ComputeColorNode,
    /// Whether the map stores values in [0, 1] that must be mapped to
    /// [-1, 1].
    #[serde(default = "default_true")]
    pub scale_and_bias: bool,
    /// Whether only X and Y are stored, so Z must be reconstructed.
    #[serde(default)]
    pub is_xy_normal: bool,
}

/// Glossiness of the microsurface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlossinessMapFeature {
    pub glossiness_map: ComputeScalarNode,
    /// Whether the map holds roughness rather than glossiness.
    #[serde(default)]
    pub invert: bool,
}

fn default_true() -> bool {
    true
}

impl NormalMapFeature {
    pub fn new(normal_map: ComputeColorNode) -> Self {
        Self {
            normal_map,
            scale_and_bias: true,
            is_xy_normal: false,
        }
    }
}

impl MaterialFeature for NormalMapFeature {
    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        add_normal_map(context, &self.normal_map, self.is_xy_normal, self.scale_and_bias);
    }
}

/// Adds a `MaterialSurfaceNormalMap` reading normals from the given graph.
/// Normals of layers are blended by `MaterialStreamNormalBlend`.
pub(super) fn add_normal_map(
    context: &mut MaterialGeneratorContext,
    normal_map: &ComputeColorNode,
    is_xy_normal: bool,
    scale_and_bias: bool,
) {
    let keys = MaterialComputeColorKeys::new(keys::NORMAL_MAP, keys::NORMAL_VALUE)
        .with_default_texture_value(DEFAULT_NORMAL_COLOR)
        .not_color();
    let source = context.generate_compute_source(normal_map, &keys);

    context.use_stream_with_custom_blend(
        MaterialShaderStage::Pixel,
        streams::NORMAL,
        ShaderClassSource::new("MaterialStreamNormalBlend").into(),
    );
    context
        .parameters_mut()
        .set(&keys::HAS_NORMAL_MAP, ParameterValue::Bool(true));

    context.add_shader_source(
        MaterialShaderStage::Pixel,
        ShaderMixinSource::new(
            ShaderClassSource::new("MaterialSurfaceNormalMap")
                .with_argument(is_xy_normal)
                .with_argument(scale_and_bias),
        )
        .with_composition("normalMap", source)
        .into(),
    );
}

impl GlossinessMapFeature {
    pub fn new(glossiness_map: ComputeScalarNode) -> Self {
        Self {
            glossiness_map,
            invert: false,
        }
    }
}

impl MaterialFeature for GlossinessMapFeature {
    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        add_glossiness_map(context, &self.glossiness_map, self.invert);
    }
}

/// Adds a `MaterialSurfaceGlossinessMap` computing the glossiness from the
/// given graph, clamped to [0, 1].
pub(super) fn add_glossiness_map(
    context: &mut MaterialGeneratorContext,
    glossiness_map: &ComputeScalarNode,
    invert: bool,
) {
    let glossiness_map = glossiness_map.clamped(0.0, 1.0);
    let source = context.generate_compute_source(
        &glossiness_map,
        &MaterialComputeColorKeys::new(keys::GLOSSINESS_MAP, keys::GLOSSINESS_VALUE),
    );

    context.use_stream(MaterialShaderStage::Pixel, streams::GLOSSINESS);
    context.add_shader_source(
        MaterialShaderStage::Pixel,
        ShaderMixinSource::new(ShaderClassSource::with_arguments(
            "MaterialSurfaceGlossinessMap",
            [invert],
        ))
        .with_composition("glossinessMap", source)
        .into(),
    );
}
