//! Materials.

pub mod compute;
pub mod descriptor;
pub mod features;
pub mod generator;
pub mod layer;
pub mod library;
pub mod parameter;
pub mod shading;
pub mod stream;

pub use descriptor::{
    MaterialAttributes, MaterialBlendLayer, MaterialDescriptor, MaterialOverrides,
    MaterialReference,
};
pub use generator::{
    GenerationLog, GenerationResult, MaterialGenerator, MaterialGeneratorConfig,
    MaterialGeneratorContext, MaterialGeneratorStep,
};
pub use library::{MaterialAssetResolver, MaterialLibrary};

use crate::shader::ShaderSource;
use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use lamina_utils::stringhash64_newtype;
use nalgebra::Vector4;
use parameter::ParameterCollection;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// A color with RGBA components.
pub type RGBAColor = Vector4<f32>;

stringhash64_newtype!(
    /// Identifier for a material descriptor, used to detect materials that
    /// include themselves. Wraps a [`StringHash64`](lamina_utils::StringHash64).
    [pub] MaterialID
);

/// A pipeline stage that accumulates its own material shader sources.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialShaderStage {
    Vertex,
    Domain,
    Pixel,
}

/// One value of type `T` for each [`MaterialShaderStage`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerStage<T>([T; 3]);

/// Face culling mode for a material pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CullMode {
    None,
    Front,
    #[default]
    Back,
}

/// A factor in the blend equation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Blend {
    Zero,
    One,
    SourceColor,
    InverseSourceColor,
    SourceAlpha,
    InverseSourceAlpha,
    DestinationColor,
    InverseDestinationColor,
    DestinationAlpha,
    InverseDestinationAlpha,
}

/// The operation combining the source and destination terms of the blend
/// equation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlendFunction {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

/// How the output of a material pass is blended with the render target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlendStateDescription {
    pub color_source_blend: Blend,
    pub color_destination_blend: Blend,
    pub color_blend_function: BlendFunction,
    pub alpha_source_blend: Blend,
    pub alpha_destination_blend: Blend,
    pub alpha_blend_function: BlendFunction,
}

bitflags! {
    /// Bitflags encoding how a material pass tessellates its geometry.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Zeroable, Pod)]
    pub struct TessellationMethod: u8 {
        /// Flat tessellation of triangles.
        const FLAT                  = 1 << 0;
        /// Curved point-normal triangles.
        const POINT_NORMAL          = 1 << 1;
        /// Averaging of attributes along adjacent edges to avoid cracks.
        const ADJACENT_EDGE_AVERAGE = 1 << 2;
    }
}

/// A single rendering pass of a material, holding the composed shader
/// sources for each stage together with its render state and bound
/// parameters.
#[derive(Clone, Debug, Default)]
pub struct MaterialPass {
    pub pass_index: usize,
    pub cull_mode: Option<CullMode>,
    pub blend_state: Option<BlendStateDescription>,
    pub has_transparency: bool,
    pub alpha_to_coverage: Option<bool>,
    pub tessellation_method: TessellationMethod,
    pub parameters: ParameterCollection,
    pub surface_shaders: PerStage<Option<ShaderSource>>,
    pub stream_initializers: PerStage<Option<ShaderSource>>,
}

/// The result of generating a material: one or more passes.
#[derive(Clone, Debug, Default)]
pub struct Material {
    pub passes: Vec<MaterialPass>,
}

impl MaterialShaderStage {
    /// All stages, in the order they are processed.
    pub const ALL: [Self; 3] = [Self::Vertex, Self::Domain, Self::Pixel];

    const fn idx(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MaterialShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl<T> PerStage<T> {
    /// Returns an iterator over the stages and their values, in stage order.
    pub fn iter(&self) -> impl Iterator<Item = (MaterialShaderStage, &T)> {
        MaterialShaderStage::ALL.into_iter().zip(self.0.iter())
    }

    /// Returns an iterator over the stages and mutable references to their
    /// values, in stage order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (MaterialShaderStage, &mut T)> {
        MaterialShaderStage::ALL.into_iter().zip(self.0.iter_mut())
    }
}

impl<T> Index<MaterialShaderStage> for PerStage<T> {
    type Output = T;

    fn index(&self, stage: MaterialShaderStage) -> &Self::Output {
        &self.0[stage.idx()]
    }
}

impl<T> IndexMut<MaterialShaderStage> for PerStage<T> {
    fn index_mut(&mut self, stage: MaterialShaderStage) -> &mut Self::Output {
        &mut self.0[stage.idx()]
    }
}

impl BlendStateDescription {
    /// Writes the source over the destination.
    pub const OPAQUE: Self = Self::new(Blend::One, Blend::Zero);

    /// Premultiplied alpha blending.
    pub const ALPHA_BLEND: Self = Self::new(Blend::One, Blend::InverseSourceAlpha);

    /// Adds the alpha-weighted source to the destination.
    pub const ADDITIVE: Self = Self::new(Blend::SourceAlpha, Blend::One);

    /// Alpha blending of a source that is not premultiplied.
    pub const NON_PREMULTIPLIED: Self = Self::new(Blend::SourceAlpha, Blend::InverseSourceAlpha);

    /// Creates a blend state using the given source and destination factors
    /// for both color and alpha, combined by addition.
    pub const fn new(source_blend: Blend, destination_blend: Blend) -> Self {
        Self {
            color_source_blend: source_blend,
            color_destination_blend: destination_blend,
            color_blend_function: BlendFunction::Add,
            alpha_source_blend: source_blend,
            alpha_destination_blend: destination_blend,
            alpha_blend_function: BlendFunction::Add,
        }
    }

    /// Returns this blend state with the given alpha factors.
    pub const fn with_alpha(mut self, source_blend: Blend, destination_blend: Blend) -> Self {
        self.alpha_source_blend = source_blend;
        self.alpha_destination_blend = destination_blend;
        self
    }
}

impl MaterialPass {
    /// Creates an empty pass with the given index.
    pub fn new(pass_index: usize) -> Self {
        Self {
            pass_index,
            ..Default::default()
        }
    }

    /// The composed shader source for the given stage, if the stage has any.
    pub fn surface_shader(&self, stage: MaterialShaderStage) -> Option<&ShaderSource> {
        self.surface_shaders[stage].as_ref()
    }

    /// The stream initializer source for the given stage, if the stage has
    /// any.
    pub fn stream_initializer(&self, stage: MaterialShaderStage) -> Option<&ShaderSource> {
        self.stream_initializers[stage].as_ref()
    }
}

impl fmt::Display for MaterialPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pass {}", self.pass_index)?;
        writeln!(f, "CullMode: {:?}", self.cull_mode.unwrap_or_default())?;
        if let Some(blend_state) = &self.blend_state {
            writeln!(
                f,
                "BlendState: {:?}/{:?}",
                blend_state.color_source_blend, blend_state.color_destination_blend
            )?;
        }
        writeln!(f, "HasTransparency: {}", self.has_transparency)?;
        if !self.tessellation_method.is_empty() {
            writeln!(f, "TessellationMethod: {:?}", self.tessellation_method)?;
        }
        for (stage, source) in self.stream_initializers.iter() {
            if let Some(source) = source {
                writeln!(f, "{stage}StreamInitializer: {source}")?;
            }
        }
        for (stage, source) in self.surface_shaders.iter() {
            if let Some(source) = source {
                writeln!(f, "{stage}SurfaceShaders: {source}")?;
            }
        }
        write!(f, "{}", self.parameters)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn per_stage_values_are_indexed_by_stage() {
        let mut values = PerStage::<u32>::default();
        values[MaterialShaderStage::Domain] = 2;
        values[MaterialShaderStage::Pixel] = 3;
        assert_eq!(values[MaterialShaderStage::Vertex], 0);
        assert_eq!(
            values.iter().map(|(_, value)| *value).collect::<Vec<_>>(),
            vec![0, 2, 3]
        );
    }

    #[test]
    fn material_ids_from_same_name_are_equal() {
        assert_eq!(MaterialID::from_name("brick"), MaterialID::from_name("brick"));
        assert_ne!(MaterialID::from_name("brick"), MaterialID::from_name("glass"));
    }

    #[test]
    fn default_cull_mode_is_back() {
        assert_eq!(CullMode::default(), CullMode::Back);
        assert_eq!(MaterialPass::new(0).cull_mode, None);
    }

    #[test]
    fn blend_state_alpha_factors_can_be_overridden() {
        let state = BlendStateDescription::new(Blend::Zero, Blend::SourceColor)
            .with_alpha(Blend::Zero, Blend::One);
        assert_eq!(state.color_destination_blend, Blend::SourceColor);
        assert_eq!(state.alpha_destination_blend, Blend::One);
    }
}
