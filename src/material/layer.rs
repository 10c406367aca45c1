//! Blend layers and the sources they accumulate during generation.

use crate::{
    material::{
        MaterialShaderStage, PerStage,
        compute::{ComputeNode, ComputeScalarNode, MaterialComputeColorKeys},
        generator::ShaderGeneratorContext,
        parameter::keys,
        shading::ShadingModelCollection,
        stream::{MaterialStreamType, StageContext, streams},
    },
    shader::{ShaderClassSource, ShaderMixinSource, ShaderSource},
};
use std::mem;

/// Pixel sources of layers that share a shading model which has not yet
/// been blended with the shading of the layers below.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PendingPixelSources {
    #[default]
    Empty,
    Staged(Vec<ShaderSource>),
}

/// The state of a single blend layer while its material is being generated.
///
/// Layers form a tree mirroring the nesting of blend layers in the material
/// descriptors. The tree is merged into the root once the root layer is
/// popped.
#[derive(Debug, Default)]
pub struct BlendLayerContext {
    pub(crate) stages: PerStage<StageContext>,
    pub(crate) shading_models: ShadingModelCollection,
    pub(crate) shading_model_count: usize,
    pub(crate) blend_map: Option<ComputeScalarNode>,
    pub(crate) blend_map_for_shading_model: Option<ComputeScalarNode>,
    pub(crate) pending_pixel_sources: PendingPixelSources,
    pub(crate) children: Vec<BlendLayerContext>,
}

impl PendingPixelSources {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Staged(sources) => sources.is_empty(),
        }
    }

    pub fn extend(&mut self, sources: impl IntoIterator<Item = ShaderSource>) {
        match self {
            Self::Empty => {
                let sources: Vec<_> = sources.into_iter().collect();
                if !sources.is_empty() {
                    *self = Self::Staged(sources);
                }
            }
            Self::Staged(staged) => staged.extend(sources),
        }
    }

    /// Removes and returns the staged sources.
    pub fn take(&mut self) -> Vec<ShaderSource> {
        match mem::take(self) {
            Self::Empty => Vec::new(),
            Self::Staged(sources) => sources,
        }
    }
}

impl BlendLayerContext {
    /// Creates a layer blended over its parent by the given blend map. Only
    /// the root layer has no blend map.
    pub fn new(blend_map: Option<ComputeScalarNode>) -> Self {
        Self {
            blend_map,
            ..Default::default()
        }
    }

    pub fn stage(&self, stage: MaterialShaderStage) -> &StageContext {
        &self.stages[stage]
    }

    pub fn stage_mut(&mut self, stage: MaterialShaderStage) -> &mut StageContext {
        &mut self.stages[stage]
    }

    pub fn shading_models(&self) -> &ShadingModelCollection {
        &self.shading_models
    }

    /// Emits a source writing the value computed by the given node into the
    /// given stream, and marks the stream as used by the stage.
    ///
    /// The number of stream components follows the kind of the value key.
    ///
    /// # Panics
    /// If the value key is not of a floating point vector kind.
    pub fn set_stream(
        &mut self,
        context: &mut ShaderGeneratorContext,
        stage: MaterialShaderStage,
        stream: &str,
        node: &dyn ComputeNode,
        keys: &MaterialComputeColorKeys,
    ) {
        let stream_type = MaterialStreamType::from_parameter_kind(keys.value_base_key.kind())
            .unwrap_or_else(|| {
                panic!(
                    "Stream `{stream}` cannot hold values of key {}",
                    keys.value_base_key
                )
            });
        let source = node.generate_shader_source(context, keys);
        self.set_stream_from_source(stage, stream, stream_type, source);
    }

    /// Emits a source writing the value computed by the given source into
    /// the given stream, and marks the stream as used by the stage.
    pub fn set_stream_from_source(
        &mut self,
        stage: MaterialShaderStage,
        stream: &str,
        stream_type: MaterialStreamType,
        source: ShaderSource,
    ) {
        let stage_context = &mut self.stages[stage];
        stage_context.push_shader_source(
            ShaderMixinSource::new(ShaderClassSource::with_arguments(
                "MaterialSurfaceSetStreamFromComputeColor",
                [stream, stream_type.channel()],
            ))
            .with_composition("computeColorSource", source)
            .into(),
        );
        if stream != streams::BLEND {
            stage_context.use_stream(stream);
        }
    }

    /// Emits a source writing the given blend map into the blend stream.
    pub fn set_stream_blend(
        &mut self,
        context: &mut ShaderGeneratorContext,
        stage: MaterialShaderStage,
        blend_map: &ComputeScalarNode,
    ) {
        self.set_stream(context, stage, streams::BLEND, blend_map, &blend_keys());
    }
}

fn blend_keys() -> MaterialComputeColorKeys {
    MaterialComputeColorKeys::new(keys::BLEND_MAP, keys::BLEND_VALUE).not_color()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::material::{
        RGBAColor, compute::ComputeColorNode, generator::MaterialGeneratorConfig,
        parameter::ParameterValue,
    };

    fn context() -> ShaderGeneratorContext {
        ShaderGeneratorContext::new(MaterialGeneratorConfig::default())
    }

    #[test]
    fn setting_stream_emits_set_stream_source_with_channel_of_key() {
        let mut context = context();
        let mut layer = BlendLayerContext::new(None);
        layer.set_stream(
            &mut context,
            MaterialShaderStage::Pixel,
            streams::EMISSIVE,
            &ComputeColorNode::constant(RGBAColor::new(0.0, 0.0, 1.0, 1.0)),
            &MaterialComputeColorKeys::new(keys::EMISSIVE_MAP, keys::EMISSIVE_VALUE),
        );

        let pixel = layer.stage(MaterialShaderStage::Pixel);
        let mixin = pixel.shader_sources()[0].as_mixin().unwrap();
        assert_eq!(
            mixin.mixins()[0],
            ShaderClassSource::with_arguments("MaterialSurfaceSetStreamFromComputeColor", ["matEmissive", "rgba"])
        );
        assert!(mixin.composition("computeColorSource").is_some());
        assert_eq!(pixel.streams(), &[streams::EMISSIVE]);
    }

    #[test]
    fn setting_blend_stream_does_not_mark_it_as_used() {
        let mut context = context();
        let mut layer = BlendLayerContext::new(Some(ComputeScalarNode::constant(0.5)));
        let blend_map = ComputeScalarNode::constant(0.5);
        layer.set_stream_blend(&mut context, MaterialShaderStage::Pixel, &blend_map);

        let pixel = layer.stage(MaterialShaderStage::Pixel);
        assert_eq!(pixel.shader_sources().len(), 1);
        assert!(!pixel.has_streams());
        assert_eq!(
            context.parameters().get_key(&keys::BLEND_VALUE),
            Some(&ParameterValue::Float(0.5))
        );
    }

    #[test]
    fn pending_sources_are_staged_then_taken() {
        let mut pending = PendingPixelSources::default();
        assert!(pending.is_empty());
        pending.extend(Vec::new());
        assert_eq!(pending, PendingPixelSources::Empty);

        pending.extend([ShaderClassSource::new("A").into()]);
        pending.extend([ShaderClassSource::new("B").into()]);
        assert!(!pending.is_empty());
        assert_eq!(pending.take().len(), 2);
        assert_eq!(pending, PendingPixelSources::Empty);
    }
}
