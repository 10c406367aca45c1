//! Transparent surfaces.

use super::MaterialFeature;
use crate::{
    material::{
        BlendStateDescription, MaterialShaderStage, RGBAColor,
        compute::{ComputeColorNode, ComputeScalarNode, MaterialComputeColorKeys},
        generator::{DEFAULT_FINAL_CALLBACK_ORDER, MaterialGeneratorContext},
        parameter::{ParameterValue, keys},
        stream::streams,
    },
    shader::ShaderClassSource,
};
use serde::{Deserialize, Serialize};

/// How the surface lets the background show through.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TransparencyFeature {
    Additive(AdditiveTransparency),
    Blend(BlendTransparency),
    Cutoff(CutoffTransparency),
}

/// Light of the surface added to the background. An alpha of zero gives
/// fully additive blending, one gives regular alpha blending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdditiveTransparency {
    #[serde(default = "half")]
    pub alpha: ComputeScalarNode,
    #[serde(default = "white")]
    pub tint: ComputeColorNode,
}

/// The surface blended over the background by its alpha.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendTransparency {
    #[serde(default = "one")]
    pub alpha: ComputeScalarNode,
    #[serde(default = "white")]
    pub tint: ComputeColorNode,
}

/// Pixels with alpha below a threshold are discarded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CutoffTransparency {
    #[serde(default = "half")]
    pub alpha: ComputeScalarNode,
}

fn half() -> ComputeScalarNode {
    ComputeScalarNode::constant(0.5)
}

fn one() -> ComputeScalarNode {
    ComputeScalarNode::constant(1.0)
}

fn white() -> ComputeColorNode {
    ComputeColorNode::constant(RGBAColor::repeat(1.0))
}

impl Default for AdditiveTransparency {
    fn default() -> Self {
        Self {
            alpha: half(),
            tint: white(),
        }
    }
}

impl Default for BlendTransparency {
    fn default() -> Self {
        Self {
            alpha: one(),
            tint: white(),
        }
    }
}

impl Default for CutoffTransparency {
    fn default() -> Self {
        Self { alpha: half() }
    }
}

impl MaterialFeature for TransparencyFeature {
    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        match self {
            Self::Additive(AdditiveTransparency { alpha, tint }) | Self::Blend(BlendTransparency { alpha, tint }) => {
                generate_alpha_blend(context, alpha, tint);
            }
            Self::Cutoff(CutoffTransparency { alpha }) => generate_cutoff(context, alpha),
        }
    }
}

fn generate_alpha_blend(context: &mut MaterialGeneratorContext, alpha: &ComputeScalarNode, tint: &ComputeColorNode) {
    let pass = context.material_pass_mut();
    pass.has_transparency = true;
    if pass.blend_state.is_none() {
        pass.blend_state = Some(BlendStateDescription::ALPHA_BLEND);
    }

    let white = RGBAColor::repeat(1.0);
    context.set_stream(
        MaterialShaderStage::Pixel,
        streams::DIFFUSE_SPECULAR_ALPHA_BLEND,
        &alpha.clamped(0.0, 1.0),
        &MaterialComputeColorKeys::new(
            keys::DIFFUSE_SPECULAR_ALPHA_BLEND_MAP,
            keys::DIFFUSE_SPECULAR_ALPHA_BLEND_VALUE,
        )
        .with_default_texture_value(white),
    );
    context.set_stream(
        MaterialShaderStage::Pixel,
        streams::ALPHA_BLEND_COLOR,
        &tint.clamped_uniform(0.0, 1.0),
        &MaterialComputeColorKeys::new(keys::ALPHA_BLEND_COLOR_MAP, keys::ALPHA_BLEND_COLOR_VALUE)
            .with_default_texture_value(white),
    );

    if context.tag_once("TransparencyAlphaBlend") {
        context.add_final_callback(
            MaterialShaderStage::Pixel,
            DEFAULT_FINAL_CALLBACK_ORDER,
            |stage, context| {
                context.add_shader_source(
                    stage,
                    ShaderClassSource::new("MaterialSurfaceDiffuseSpecularAlphaBlendColor").into(),
                );
            },
        );
    }
}

fn generate_cutoff(context: &mut MaterialGeneratorContext, alpha: &ComputeScalarNode) {
    context.set_stream(
        MaterialShaderStage::Pixel,
        streams::ALPHA_DISCARD,
        &alpha.clamped(0.0, 1.0),
        &MaterialComputeColorKeys::new(keys::ALPHA_DISCARD_MAP, keys::ALPHA_DISCARD_VALUE)
            .with_default_texture_value(RGBAColor::repeat(0.5)),
    );
    context
        .parameters_mut()
        .set(&keys::USE_PIXEL_SHADER_WITH_DEPTH_PASS, ParameterValue::Bool(true));
    context.material_pass_mut().alpha_to_coverage = Some(true);

    if context.tag_once("TransparencyCutoff") {
        context.add_final_callback(
            MaterialShaderStage::Pixel,
            DEFAULT_FINAL_CALLBACK_ORDER,
            |stage, context| {
                context.add_shader_source(
                    stage,
                    ShaderClassSource::new("MaterialSurfaceTransparentAlphaDiscard").into(),
                );
            },
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        material::generator::{MaterialGeneratorConfig, MaterialGeneratorStep},
        shader::ShaderSource,
    };

    fn generating_context() -> MaterialGeneratorContext {
        let mut context = MaterialGeneratorContext::new(MaterialGeneratorConfig::default());
        context.set_step(MaterialGeneratorStep::GenerateShader);
        context.push_pass();
        context.push_layer(None);
        context
    }

    #[test]
    fn blend_transparency_sets_alpha_blend_state_only_when_unset() {
        let mut context = generating_context();
        TransparencyFeature::Blend(BlendTransparency::default()).generate_shader(&mut context);
        assert!(context.material_pass().has_transparency);
        assert_eq!(
            context.material_pass().blend_state,
            Some(BlendStateDescription::ALPHA_BLEND)
        );

        let mut context = generating_context();
        context.material_pass_mut().blend_state = Some(BlendStateDescription::ADDITIVE);
        TransparencyFeature::Additive(AdditiveTransparency::default()).generate_shader(&mut context);
        assert_eq!(
            context.material_pass().blend_state,
            Some(BlendStateDescription::ADDITIVE)
        );
    }

    #[test]
    fn alpha_blend_color_is_appended_once_after_merging() {
        let mut context = generating_context();
        let feature = TransparencyFeature::Blend(BlendTransparency::default());
        feature.generate_shader(&mut context);
        feature.generate_shader(&mut context);
        context.pop_layer();

        let pixel = context.current_layer().stage(MaterialShaderStage::Pixel).shader_sources();
        let alpha_blend_color: ShaderSource =
            ShaderClassSource::new("MaterialSurfaceDiffuseSpecularAlphaBlendColor").into();
        assert_eq!(pixel.last(), Some(&alpha_blend_color));
        assert_eq!(
            pixel.iter().filter(|source| **source == alpha_blend_color).count(),
            1
        );
    }

    #[test]
    fn cutoff_enables_alpha_to_coverage_and_discards() {
        let mut context = generating_context();
        TransparencyFeature::Cutoff(CutoffTransparency::default()).generate_shader(&mut context);
        assert_eq!(context.material_pass().alpha_to_coverage, Some(true));
        assert!(!context.material_pass().has_transparency);
        assert_eq!(
            context.parameters().get_key(&keys::USE_PIXEL_SHADER_WITH_DEPTH_PASS),
            Some(&ParameterValue::Bool(true))
        );
        context.pop_layer();
        assert!(
            context
                .compute_shader_source(MaterialShaderStage::Pixel)
                .unwrap()
                .references_class("MaterialSurfaceTransparentAlphaDiscard")
        );
    }
}
