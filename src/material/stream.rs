//! Material streams and the per-stage accumulation of shader sources.

use crate::{
    material::parameter::ParameterKind,
    shader::{ShaderArraySource, ShaderClassSource, ShaderMixinSource, ShaderSource},
};
use std::mem;

/// Names of the streams written by material features.
pub mod streams {
    pub const BLEND: &str = "matBlend";
    pub const DIFFUSE: &str = "matDiffuse";
    pub const COLOR_BASE: &str = "matColorBase";
    pub const SPECULAR: &str = "matSpecular";
    pub const SPECULAR_INTENSITY: &str = "matSpecularIntensity";
    pub const GLOSSINESS: &str = "matGlossiness";
    pub const NORMAL: &str = "matNormal";
    pub const AMBIENT_OCCLUSION: &str = "matAmbientOcclusion";
    pub const AMBIENT_OCCLUSION_DIRECT_LIGHTING_FACTOR: &str = "matAmbientOcclusionDirectLightingFactor";
    pub const CAVITY: &str = "matCavity";
    pub const CAVITY_DIFFUSE: &str = "matCavityDiffuse";
    pub const CAVITY_SPECULAR: &str = "matCavitySpecular";
    pub const EMISSIVE: &str = "matEmissive";
    pub const EMISSIVE_INTENSITY: &str = "matEmissiveIntensity";
    pub const DIFFUSE_SPECULAR_ALPHA_BLEND: &str = "matDiffuseSpecularAlphaBlend";
    pub const ALPHA_BLEND_COLOR: &str = "matAlphaBlendColor";
    pub const ALPHA_DISCARD: &str = "matAlphaDiscard";
    pub const DISPLACEMENT: &str = "matDisplacement";
    pub const SCATTERING_STRENGTH: &str = "matScatteringStrength";
    pub const TRANSLUCENCY: &str = "matTranslucency";
}

/// Number of components of a material stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MaterialStreamType {
    Float,
    Float2,
    Float3,
    Float4,
}

/// The shader sources, streams and stream initializers a blend layer has
/// accumulated for a single stage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StageContext {
    shader_sources: Vec<ShaderSource>,
    streams: Vec<String>,
    stream_initializers: Vec<String>,
}

impl MaterialStreamType {
    /// The stream type for values of the given parameter kind, or [`None`]
    /// if streams cannot hold such values.
    pub fn from_parameter_kind(kind: ParameterKind) -> Option<Self> {
        match kind {
            ParameterKind::Float => Some(Self::Float),
            ParameterKind::Float2 => Some(Self::Float2),
            ParameterKind::Float3 => Some(Self::Float3),
            ParameterKind::Float4 => Some(Self::Float4),
            _ => None,
        }
    }

    /// The swizzle selecting the channels of a color that the stream holds.
    pub fn channel(self) -> &'static str {
        match self {
            Self::Float => "r",
            Self::Float2 => "rg",
            Self::Float3 => "rgb",
            Self::Float4 => "rgba",
        }
    }
}

impl StageContext {
    pub fn shader_sources(&self) -> &[ShaderSource] {
        &self.shader_sources
    }

    pub fn has_shader_sources(&self) -> bool {
        !self.shader_sources.is_empty()
    }

    pub fn push_shader_source(&mut self, source: ShaderSource) {
        self.shader_sources.push(source);
    }

    pub fn extend_shader_sources(&mut self, sources: impl IntoIterator<Item = ShaderSource>) {
        self.shader_sources.extend(sources);
    }

    /// Removes and returns all accumulated shader sources.
    pub fn take_shader_sources(&mut self) -> Vec<ShaderSource> {
        mem::take(&mut self.shader_sources)
    }

    /// The streams used by this stage, in the order they were first used.
    pub fn streams(&self) -> &[String] {
        &self.streams
    }

    pub fn has_streams(&self) -> bool {
        !self.streams.is_empty()
    }

    /// Marks the stream as used. Streams are only recorded once.
    pub fn use_stream(&mut self, stream: &str) {
        if !self.streams.iter().any(|used| used == stream) {
            self.streams.push(stream.to_string());
        }
    }

    /// Removes and returns all used streams.
    pub fn take_streams(&mut self) -> Vec<String> {
        mem::take(&mut self.streams)
    }

    pub fn stream_initializers(&self) -> &[String] {
        &self.stream_initializers
    }

    /// Registers the named shader class for initializing streams. Each
    /// initializer is only registered once.
    pub fn add_stream_initializer(&mut self, class_name: &str) {
        if !self
            .stream_initializers
            .iter()
            .any(|initializer| initializer == class_name)
        {
            self.stream_initializers.push(class_name.to_string());
        }
    }

    /// Squashes the accumulated shader sources into a single source.
    ///
    /// A single source is returned as is, while several sources are
    /// evaluated in order by a `MaterialSurfaceArray`.
    pub fn compute_shader_source(&self) -> Option<ShaderSource> {
        match self.shader_sources.as_slice() {
            [] => None,
            [source] => Some(source.clone()),
            sources => Some(
                ShaderMixinSource::of_class("MaterialSurfaceArray")
                    .with_composition("layers", ShaderArraySource::new(sources.to_vec()))
                    .into(),
            ),
        }
    }

    /// Creates the shader source initializing the streams of this stage and
    /// forgets the registered initializers.
    pub fn generate_stream_initializers(&mut self) -> Option<ShaderSource> {
        if self.stream_initializers.is_empty() {
            return None;
        }
        let mut mixin = ShaderMixinSource::of_class("MaterialStream");
        for initializer in self.stream_initializers.drain(..) {
            mixin.add_mixin(ShaderClassSource::new(initializer));
        }
        Some(mixin.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn streams_are_recorded_once_in_first_use_order() {
        let mut stage = StageContext::default();
        stage.use_stream(streams::DIFFUSE);
        stage.use_stream(streams::SPECULAR);
        stage.use_stream(streams::DIFFUSE);
        assert_eq!(stage.streams(), &[streams::DIFFUSE, streams::SPECULAR]);
    }

    #[test]
    fn computing_source_of_empty_stage_gives_none() {
        assert_eq!(StageContext::default().compute_shader_source(), None);
    }

    #[test]
    fn computing_source_of_single_source_returns_it() {
        let mut stage = StageContext::default();
        stage.push_shader_source(ShaderClassSource::new("A").into());
        assert_eq!(
            stage.compute_shader_source(),
            Some(ShaderClassSource::new("A").into())
        );
    }

    #[test]
    fn computing_source_of_several_sources_wraps_them_in_array() {
        let mut stage = StageContext::default();
        stage.push_shader_source(ShaderClassSource::new("A").into());
        stage.push_shader_source(ShaderClassSource::new("B").into());
        let source = stage.compute_shader_source().unwrap();
        let mixin = source.as_mixin().unwrap();
        assert_eq!(mixin.mixins()[0].class_name(), "MaterialSurfaceArray");
        assert_eq!(
            mixin.composition("layers").and_then(ShaderSource::as_array).map(ShaderArraySource::len),
            Some(2)
        );
    }

    #[test]
    fn generating_stream_initializers_deduplicates_and_clears() {
        let mut stage = StageContext::default();
        stage.add_stream_initializer("MaterialDisplacementStream");
        stage.add_stream_initializer("MaterialDisplacementStream");
        let source = stage.generate_stream_initializers().unwrap();
        let mixin = source.as_mixin().unwrap();
        assert_eq!(
            mixin.mixins(),
            &[
                ShaderClassSource::new("MaterialStream"),
                ShaderClassSource::new("MaterialDisplacementStream")
            ]
        );
        assert!(stage.stream_initializers().is_empty());
        assert_eq!(stage.generate_stream_initializers(), None);
    }

    #[test]
    fn stream_channel_follows_component_count() {
        assert_eq!(
            MaterialStreamType::from_parameter_kind(ParameterKind::Float3).map(MaterialStreamType::channel),
            Some("rgb")
        );
        assert_eq!(MaterialStreamType::from_parameter_kind(ParameterKind::Texture), None);
    }
}
