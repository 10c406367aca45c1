//! Graphs computing the scalar and color inputs of material features.

use crate::{
    material::{
        RGBAColor,
        generator::ShaderGeneratorContext,
        parameter::{ParameterKey, ParameterKind, ParameterValue, SamplerState, TextureReference, keys},
    },
    shader::{ShaderClassSource, ShaderMixinSource, ShaderSource},
};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Parameter keys a compute graph binds its values and textures to, unless
/// a node carries its own key.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialComputeColorKeys {
    /// Base key for textures. [`keys::GENERIC_TEXTURE`] is used when absent.
    pub texture_base_key: Option<ParameterKey>,
    /// Base key for constant values. Its kind decides how many components
    /// the computed value has.
    pub value_base_key: ParameterKey,
    /// Color bound in place of a texture that is not specified.
    pub default_texture_value: Option<RGBAColor>,
    /// Whether constant values are colors and must be converted to the
    /// configured color space.
    pub is_color: bool,
}

/// A node of a compute graph that can generate the shader source computing
/// its value.
pub trait ComputeNode {
    /// Generates the shader source computing the value of this node, binding
    /// the parameters it needs in the given context.
    fn generate_shader_source(
        &self,
        context: &mut ShaderGeneratorContext,
        keys: &MaterialComputeColorKeys,
    ) -> ShaderSource;
}

/// A graph computing a scalar value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ComputeScalarNode {
    Constant(ComputeFloat),
    Texture(ComputeTextureScalar),
    VertexStream(ComputeVertexStreamScalar),
    Binary(Box<ComputeBinaryScalar>),
}

/// A graph computing a color value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ComputeColorNode {
    Constant(ComputeColor),
    Texture(ComputeTextureColor),
    VertexStream(ComputeVertexStreamColor),
    Binary(Box<ComputeBinaryColor>),
    ShaderClass(ComputeShaderClassColor),
}

/// A constant scalar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComputeFloat {
    pub value: f32,
    /// Key to bind the value to instead of the base key.
    #[serde(default)]
    pub key: Option<ParameterKey>,
}

/// A constant color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComputeColor {
    pub value: RGBAColor,
    /// Key to bind the value to instead of the base key.
    #[serde(default)]
    pub key: Option<ParameterKey>,
    #[serde(default = "default_premultiply_alpha")]
    pub premultiply_alpha: bool,
}

/// How a texture is looked up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureSampling {
    /// Name of the texture asset. A solid color is bound when absent.
    #[serde(default)]
    pub texture: Option<String>,
    /// Key to bind the texture to instead of the base key.
    #[serde(default)]
    pub key: Option<ParameterKey>,
    /// Index of the texture coordinate set.
    #[serde(default)]
    pub texcoord_index: u32,
    #[serde(default)]
    pub sampler: SamplerState,
    #[serde(default = "default_uv_scale")]
    pub scale: Vector2<f32>,
    #[serde(default)]
    pub offset: Vector2<f32>,
}

/// A color channel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorChannel {
    #[default]
    R,
    G,
    B,
    A,
}

/// A single channel of a texture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComputeTextureScalar {
    #[serde(flatten)]
    pub sampling: TextureSampling,
    #[serde(default)]
    pub channel: ColorChannel,
}

/// The color of a texture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComputeTextureColor {
    #[serde(flatten)]
    pub sampling: TextureSampling,
}

/// A single channel of a vertex attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComputeVertexStreamScalar {
    /// Semantic of the vertex attribute, like `COLOR0`.
    pub semantic: String,
    #[serde(default)]
    pub channel: ColorChannel,
}

/// The value of a vertex attribute as a color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComputeVertexStreamColor {
    /// Semantic of the vertex attribute, like `COLOR0`.
    pub semantic: String,
}

/// Operator combining two compute graphs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Average,
    Min,
    Max,
}

/// Two scalar graphs combined by an operator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComputeBinaryScalar {
    pub operator: BinaryOperator,
    pub left: ComputeScalarNode,
    pub right: ComputeScalarNode,
}

/// Two color graphs combined by an operator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComputeBinaryColor {
    pub operator: BinaryOperator,
    pub left: ComputeColorNode,
    pub right: ComputeColorNode,
}

/// A color computed by a custom shader class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComputeShaderClassColor {
    pub class_name: String,
    #[serde(default)]
    pub generic_arguments: Vec<String>,
}

fn default_premultiply_alpha() -> bool {
    true
}

fn default_uv_scale() -> Vector2<f32> {
    Vector2::new(1.0, 1.0)
}

impl MaterialComputeColorKeys {
    /// Keys for a color input that may be textured.
    pub fn new(texture_base_key: ParameterKey, value_base_key: ParameterKey) -> Self {
        Self {
            texture_base_key: Some(texture_base_key),
            value_base_key,
            default_texture_value: None,
            is_color: true,
        }
    }

    /// Keys for an input whose textures use the generic texture key.
    pub fn value_only(value_base_key: ParameterKey) -> Self {
        Self {
            texture_base_key: None,
            value_base_key,
            default_texture_value: None,
            is_color: true,
        }
    }

    /// Binds the given color when a texture is not specified.
    pub fn with_default_texture_value(mut self, color: RGBAColor) -> Self {
        self.default_texture_value = Some(color);
        self
    }

    /// Marks the computed value as data rather than a color.
    pub fn not_color(mut self) -> Self {
        self.is_color = false;
        self
    }
}

impl ComputeScalarNode {
    /// A constant scalar bound to the base value key.
    pub fn constant(value: f32) -> Self {
        Self::Constant(ComputeFloat { value, key: None })
    }

    /// A constant scalar bound to the given key.
    pub fn constant_with_key(value: f32, key: ParameterKey) -> Self {
        Self::Constant(ComputeFloat {
            value,
            key: Some(key),
        })
    }

    /// The red channel of the given texture.
    pub fn texture(texture: impl Into<String>) -> Self {
        Self::Texture(ComputeTextureScalar {
            sampling: TextureSampling::new(texture),
            channel: ColorChannel::R,
        })
    }

    /// Returns a copy of this graph whose output is restricted to
    /// `[min, max]`.
    ///
    /// Constants are restricted directly, while the result of a binary node
    /// is passed through a `Max` and a `Min` node. Textures and vertex
    /// streams are assumed to hold valid values.
    pub fn clamped(&self, min: f32, max: f32) -> Self {
        match self {
            Self::Constant(constant) => Self::Constant(ComputeFloat {
                value: constant.value.clamp(min, max),
                key: constant.key.clone(),
            }),
            Self::Binary(_) => {
                let lower_bounded = Self::Binary(Box::new(ComputeBinaryScalar {
                    operator: BinaryOperator::Max,
                    left: self.clone(),
                    right: Self::constant(min),
                }));
                Self::Binary(Box::new(ComputeBinaryScalar {
                    operator: BinaryOperator::Min,
                    left: lower_bounded,
                    right: Self::constant(max),
                }))
            }
            Self::Texture(_) | Self::VertexStream(_) => self.clone(),
        }
    }

    /// The value of this graph if it is a constant.
    pub fn constant_value(&self) -> Option<f32> {
        if let Self::Constant(constant) = self {
            Some(constant.value)
        } else {
            None
        }
    }
}

impl ComputeNode for ComputeScalarNode {
    fn generate_shader_source(
        &self,
        context: &mut ShaderGeneratorContext,
        keys: &MaterialComputeColorKeys,
    ) -> ShaderSource {
        match self {
            Self::Constant(constant) => {
                let key = context.parameter_key(constant.key.as_ref().unwrap_or(&keys.value_base_key));
                let value = match key.kind() {
                    ParameterKind::Float => ParameterValue::Float(constant.value),
                    kind => ParameterValue::from_color(RGBAColor::repeat(constant.value), kind),
                };
                context.parameters_mut().set(&key, value);
                constant_link_source(&key)
            }
            Self::Texture(texture) => {
                texture
                    .sampling
                    .generate_shader_source(context, keys, texture.channel.swizzle())
            }
            Self::VertexStream(stream) => ShaderClassSource::with_arguments(
                "ComputeColorFromStream",
                [stream.semantic.as_str(), stream.channel.swizzle()],
            )
            .into(),
            Self::Binary(binary) => binary.operator.generate_shader_source(
                binary.left.generate_shader_source(context, keys),
                binary.right.generate_shader_source(context, keys),
            ),
        }
    }
}

impl ComputeColorNode {
    /// A constant color bound to the base value key.
    pub fn constant(value: RGBAColor) -> Self {
        Self::Constant(ComputeColor {
            value,
            key: None,
            premultiply_alpha: true,
        })
    }

    /// A constant color bound to the given key.
    pub fn constant_with_key(value: RGBAColor, key: ParameterKey) -> Self {
        Self::Constant(ComputeColor {
            value,
            key: Some(key),
            premultiply_alpha: true,
        })
    }

    /// The color of the given texture.
    pub fn texture(texture: impl Into<String>) -> Self {
        Self::Texture(ComputeTextureColor {
            sampling: TextureSampling::new(texture),
        })
    }

    /// Returns a copy of this graph whose output is restricted to
    /// `[min, max]` component-wise.
    ///
    /// Constants are restricted directly, while the result of a binary node
    /// is passed through a `Max` and a `Min` node. Textures, vertex streams
    /// and shader classes are assumed to hold valid values.
    pub fn clamped(&self, min: RGBAColor, max: RGBAColor) -> Self {
        match self {
            Self::Constant(constant) => Self::Constant(ComputeColor {
                value: constant.value.sup(&min).inf(&max),
                key: constant.key.clone(),
                premultiply_alpha: constant.premultiply_alpha,
            }),
            Self::Binary(_) => {
                let lower_bounded = Self::Binary(Box::new(ComputeBinaryColor {
                    operator: BinaryOperator::Max,
                    left: self.clone(),
                    right: Self::bound(min),
                }));
                Self::Binary(Box::new(ComputeBinaryColor {
                    operator: BinaryOperator::Min,
                    left: lower_bounded,
                    right: Self::bound(max),
                }))
            }
            Self::Texture(_) | Self::VertexStream(_) | Self::ShaderClass(_) => self.clone(),
        }
    }

    fn bound(value: RGBAColor) -> Self {
        Self::Constant(ComputeColor {
            value,
            key: None,
            premultiply_alpha: false,
        })
    }

    /// Returns a copy of this graph with every component of its output
    /// restricted to `[min, max]`.
    pub fn clamped_uniform(&self, min: f32, max: f32) -> Self {
        self.clamped(RGBAColor::repeat(min), RGBAColor::repeat(max))
    }

    /// The value of this graph if it is a constant.
    pub fn constant_value(&self) -> Option<RGBAColor> {
        if let Self::Constant(constant) = self {
            Some(constant.value)
        } else {
            None
        }
    }
}

impl ComputeNode for ComputeColorNode {
    fn generate_shader_source(
        &self,
        context: &mut ShaderGeneratorContext,
        keys: &MaterialComputeColorKeys,
    ) -> ShaderSource {
        match self {
            Self::Constant(constant) => {
                let key = context.parameter_key(constant.key.as_ref().unwrap_or(&keys.value_base_key));
                let mut color = constant.value;
                if constant.premultiply_alpha {
                    color = premultiply_alpha(color);
                }
                if keys.is_color {
                    color = context.to_color_space(color);
                }
                context
                    .parameters_mut()
                    .set(&key, ParameterValue::from_color(color, key.kind()));
                constant_link_source(&key)
            }
            Self::Texture(texture) => texture.sampling.generate_shader_source(context, keys, "rgba"),
            Self::VertexStream(stream) => ShaderClassSource::with_arguments(
                "ComputeColorFromStream",
                [stream.semantic.as_str(), "rgba"],
            )
            .into(),
            Self::Binary(binary) => binary.operator.generate_shader_source(
                binary.left.generate_shader_source(context, keys),
                binary.right.generate_shader_source(context, keys),
            ),
            Self::ShaderClass(class) => ShaderClassSource::with_arguments(
                class.class_name.as_str(),
                class.generic_arguments.iter().map(String::as_str),
            )
            .into(),
        }
    }
}

impl TextureSampling {
    /// Sampling of the given texture with default settings.
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: Some(texture.into()),
            key: None,
            texcoord_index: 0,
            sampler: SamplerState::default(),
            scale: default_uv_scale(),
            offset: Vector2::zeros(),
        }
    }

    fn generate_shader_source(
        &self,
        context: &mut ShaderGeneratorContext,
        keys: &MaterialComputeColorKeys,
        swizzle: &str,
    ) -> ShaderSource {
        let base_key = self
            .key
            .clone()
            .or_else(|| keys.texture_base_key.clone())
            .unwrap_or(keys::GENERIC_TEXTURE);
        let texture_key = context.parameter_key(&base_key);

        let texture = match &self.texture {
            Some(name) => TextureReference::Asset(name.clone()),
            None => TextureReference::SolidColor(
                keys.default_texture_value
                    .unwrap_or_else(|| RGBAColor::repeat(1.0)),
            ),
        };
        context
            .parameters_mut()
            .set(&texture_key, ParameterValue::Texture(texture));

        let sampler_key = context.sampler_key(self.sampler);

        let scale = self.scale.component_mul(&context.current_overrides().uv_scale);
        let texcoord = format!("TEXCOORD{}", self.texcoord_index);
        let scale = format_float2(scale);
        let offset = format_float2(self.offset);

        ShaderClassSource::with_arguments(
            "ComputeColorTextureScaledOffsetDynamicSampler",
            [
                texture_key.name(),
                texcoord.as_str(),
                sampler_key.name(),
                swizzle,
                scale.as_str(),
                offset.as_str(),
            ],
        )
        .into()
    }
}

impl ColorChannel {
    fn swizzle(self) -> &'static str {
        match self {
            Self::R => "r",
            Self::G => "g",
            Self::B => "b",
            Self::A => "a",
        }
    }
}

impl BinaryOperator {
    fn class_name(self) -> &'static str {
        match self {
            Self::Add => "ComputeColorAdd",
            Self::Subtract => "ComputeColorSubtract",
            Self::Multiply => "ComputeColorMultiply",
            Self::Average => "ComputeColorAverage",
            Self::Min => "ComputeColorMin",
            Self::Max => "ComputeColorMax",
        }
    }

    fn generate_shader_source(self, left: ShaderSource, right: ShaderSource) -> ShaderSource {
        ShaderMixinSource::of_class(self.class_name())
            .with_composition("color1", left)
            .with_composition("color2", right)
            .into()
    }
}

fn constant_link_source(key: &ParameterKey) -> ShaderSource {
    let class_name = if key.kind() == ParameterKind::Float {
        "ComputeColorConstantFloatLink"
    } else {
        "ComputeColorConstantColorLink"
    };
    ShaderClassSource::with_arguments(class_name, [key.name()]).into()
}

fn premultiply_alpha(color: RGBAColor) -> RGBAColor {
    RGBAColor::new(color.x * color.w, color.y * color.w, color.z * color.w, color.w)
}

fn format_float2(value: Vector2<f32>) -> String {
    format!("float2({},{})", value.x, value.y)
}
