//! Car paint with metal flakes under a clear coat.

use super::{
    MaterialFeature,
    diffuse::add_diffuse_map,
    specular::add_metalness_map,
    surface::{DEFAULT_NORMAL_COLOR, add_glossiness_map, add_normal_map},
};
use crate::{
    material::{
        BlendStateDescription, MaterialShaderStage, RGBAColor,
        compute::{ComputeColorNode, ComputeScalarNode, MaterialComputeColorKeys},
        generator::MaterialGeneratorContext,
        parameter::keys,
        stream::streams,
    },
    shader::{ShaderClassSource, ShaderMixinSource, ShaderSource},
};
use serde::{Deserialize, Serialize};

/// Layered car paint.
///
/// The first pass draws the base paint and the metal flakes embedded in it,
/// with the flakes fading into the base paint with distance. The second pass
/// adds the reflections of the transparent clear coat on top.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearCoatFeature {
    /// Distance over which the metal flakes fade into the base paint.
    pub lod_distance: ComputeScalarNode,

    pub base_paint_diffuse_map: ComputeColorNode,
    pub base_paint_glossiness_map: ComputeScalarNode,
    pub base_paint_glossiness_invert: bool,

    pub metal_flakes_diffuse_map: ComputeColorNode,
    pub metal_flakes_glossiness_map: ComputeScalarNode,
    pub metal_flakes_glossiness_invert: bool,
    pub metal_flakes_metalness_map: ComputeScalarNode,
    pub metal_flakes_normal_map: ComputeColorNode,
    pub metal_flakes_scale_and_bias: bool,
    pub metal_flakes_is_xy_normal: bool,

    pub clear_coat_glossiness_map: ComputeScalarNode,
    pub clear_coat_glossiness_invert: bool,
    pub clear_coat_metalness_map: ComputeScalarNode,
    pub orange_peel_normal_map: ComputeColorNode,
    pub orange_peel_scale_and_bias: bool,
    pub orange_peel_is_xy_normal: bool,
}

const PASS_COUNT: usize = 2;

impl Default for ClearCoatFeature {
    fn default() -> Self {
        let white = ComputeColorNode::constant(RGBAColor::repeat(1.0));
        let flat_normal = ComputeColorNode::constant(DEFAULT_NORMAL_COLOR);
        Self {
            lod_distance: ComputeScalarNode::constant(1.0),
            base_paint_diffuse_map: white.clone(),
            base_paint_glossiness_map: ComputeScalarNode::constant(0.0),
            base_paint_glossiness_invert: false,
            metal_flakes_diffuse_map: white,
            metal_flakes_glossiness_map: ComputeScalarNode::constant(0.0),
            metal_flakes_glossiness_invert: false,
            metal_flakes_metalness_map: ComputeScalarNode::constant(0.0),
            metal_flakes_normal_map: flat_normal.clone(),
            metal_flakes_scale_and_bias: true,
            metal_flakes_is_xy_normal: false,
            clear_coat_glossiness_map: ComputeScalarNode::constant(0.0),
            clear_coat_glossiness_invert: false,
            clear_coat_metalness_map: ComputeScalarNode::constant(0.0),
            orange_peel_normal_map: flat_normal,
            orange_peel_scale_and_bias: true,
            orange_peel_is_xy_normal: false,
        }
    }
}

impl MaterialFeature for ClearCoatFeature {
    fn multipass_generation(&self, context: &mut MaterialGeneratorContext) {
        context.set_multiple_passes("ClearCoat", PASS_COUNT);
    }

    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        context.material_pass_mut().blend_state = Some(BlendStateDescription::ADDITIVE);

        if context.pass_index() == 0 {
            add_diffuse_map(context, &self.base_paint_diffuse_map);
            add_glossiness_map(
                context,
                &self.base_paint_glossiness_map,
                self.base_paint_glossiness_invert,
            );

            self.add_metal_flakes_diffuse(context);
            add_normal_map(
                context,
                &self.metal_flakes_normal_map,
                self.metal_flakes_is_xy_normal,
                self.metal_flakes_scale_and_bias,
            );
            self.add_metal_flakes_glossiness(context);
            add_metalness_map(context, &self.metal_flakes_metalness_map);
        } else {
            context.material_pass_mut().has_transparency = true;

            add_normal_map(
                context,
                &self.orange_peel_normal_map,
                self.orange_peel_is_xy_normal,
                self.orange_peel_scale_and_bias,
            );
            add_glossiness_map(
                context,
                &self.clear_coat_glossiness_map,
                self.clear_coat_glossiness_invert,
            );
            add_metalness_map(context, &self.clear_coat_metalness_map);
        }
    }
}

impl ClearCoatFeature {
    fn surface_to_eye_distance_source(&self, context: &mut MaterialGeneratorContext) -> ShaderSource {
        context.generate_compute_source(
            &self.lod_distance.clamped(0.001, 2.0),
            &MaterialComputeColorKeys::new(keys::GLOSSINESS_MAP, keys::GLOSSINESS_VALUE)
                .with_default_texture_value(RGBAColor::repeat(1.0)),
        )
    }

    /// Diffuse color of the flakes, interpolated towards the base paint with
    /// distance.
    fn add_metal_flakes_diffuse(&self, context: &mut MaterialGeneratorContext) {
        let surface_to_eye_distance = self.surface_to_eye_distance_source(context);
        let diffuse = context.generate_compute_source(
            &self.metal_flakes_diffuse_map.clamped_uniform(0.0, 1.0),
            &MaterialComputeColorKeys::new(keys::DIFFUSE_MAP, keys::DIFFUSE_VALUE)
                .with_default_texture_value(RGBAColor::repeat(1.0)),
        );

        context.use_stream(MaterialShaderStage::Pixel, streams::DIFFUSE);
        context.use_stream(MaterialShaderStage::Pixel, streams::COLOR_BASE);
        context.add_shader_source(
            MaterialShaderStage::Pixel,
            ShaderMixinSource::of_class("MaterialSurfaceDiffuseMetalFlakes")
                .with_composition("diffuseMap", diffuse)
                .with_composition("surfaceToEyeDistanceFactor", surface_to_eye_distance)
                .into(),
        );
    }

    fn add_metal_flakes_glossiness(&self, context: &mut MaterialGeneratorContext) {
        let surface_to_eye_distance = self.surface_to_eye_distance_source(context);
        let glossiness = context.generate_compute_source(
            &self.metal_flakes_glossiness_map.clamped(0.0, 1.0),
            &MaterialComputeColorKeys::new(keys::GLOSSINESS_MAP, keys::GLOSSINESS_VALUE),
        );

        context.use_stream(MaterialShaderStage::Pixel, streams::GLOSSINESS);
        context.add_shader_source(
            MaterialShaderStage::Pixel,
            ShaderMixinSource::new(ShaderClassSource::with_arguments(
                "MaterialSurfaceGlossinessMapMetalFlakes",
                [self.metal_flakes_glossiness_invert],
            ))
            .with_composition("glossinessMap", glossiness)
            .with_composition("surfaceToEyeDistanceFactor", surface_to_eye_distance)
            .into(),
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::material::generator::{MaterialGeneratorConfig, MaterialGeneratorStep};

    fn generating_context(pass_count: usize) -> MaterialGeneratorContext {
        let mut context = MaterialGeneratorContext::new(MaterialGeneratorConfig::default());
        context.set_multiple_passes("ClearCoat", pass_count);
        context.set_step(MaterialGeneratorStep::GenerateShader);
        context
    }

    #[test]
    fn clear_coat_needs_two_passes() {
        let mut context = MaterialGeneratorContext::new(MaterialGeneratorConfig::default());
        ClearCoatFeature::default().multipass_generation(&mut context);
        assert_eq!(context.pass_count(), 2);
    }

    #[test]
    fn first_pass_draws_paint_and_flakes_and_second_pass_clear_coat() {
        let feature = ClearCoatFeature::default();
        let mut context = generating_context(2);

        context.push_pass();
        context.push_layer(None);
        feature.generate_shader(&mut context);
        let flakes_pass_sources = context
            .current_layer()
            .stage(MaterialShaderStage::Pixel)
            .shader_sources()
            .len();
        assert!(!context.material_pass().has_transparency);
        context.pop_layer();
        context.pop_pass();

        context.push_pass();
        context.push_layer(None);
        feature.generate_shader(&mut context);
        let clear_coat_pass_sources = context
            .current_layer()
            .stage(MaterialShaderStage::Pixel)
            .shader_sources()
            .len();
        assert!(context.material_pass().has_transparency);
        assert_eq!(
            context.material_pass().blend_state,
            Some(BlendStateDescription::ADDITIVE)
        );

        assert_eq!(flakes_pass_sources, 6);
        assert_eq!(clear_coat_pass_sources, 3);
    }
}
