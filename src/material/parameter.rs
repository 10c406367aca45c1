//! Shader parameters bound by material features.

use crate::shader::ShaderSource;
use nalgebra::{Vector2, Vector3, Vector4};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::BTreeMap, fmt};

/// The type of value a [`ParameterKey`] refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    Float,
    Float2,
    Float3,
    Float4,
    Bool,
    Int,
    Texture,
    Sampler,
    Shader,
}

/// Name and type of a shader parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterKey {
    name: Cow<'static, str>,
    kind: ParameterKind,
}

/// A value bound to a shader parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterValue {
    Float(f32),
    Float2(Vector2<f32>),
    Float3(Vector3<f32>),
    Float4(Vector4<f32>),
    Bool(bool),
    Int(i32),
    Texture(TextureReference),
    Sampler(SamplerState),
    Shader(ShaderSource),
}

/// Reference to a texture asset, or a solid color standing in for a missing
/// texture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TextureReference {
    Asset(String),
    SolidColor(Vector4<f32>),
}

/// How a texture is filtered when sampled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureFilter {
    Point,
    #[default]
    Linear,
    Anisotropic,
}

/// How texture coordinates outside [0, 1] are resolved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureAddressMode {
    #[default]
    Wrap,
    Mirror,
    Clamp,
    Border,
}

/// State of a texture sampler. Materials get one sampler parameter per
/// distinct state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SamplerState {
    #[serde(default)]
    pub filter: TextureFilter,
    #[serde(default)]
    pub address_u: TextureAddressMode,
    #[serde(default)]
    pub address_v: TextureAddressMode,
}

/// Parameter values bound for a single material pass, keyed by parameter
/// name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterCollection {
    values: BTreeMap<String, ParameterValue>,
}

/// Well-known material parameter keys.
pub mod keys {
    use super::{ParameterKey, ParameterKind};

    macro_rules! define_keys {
        ($($const_name:ident = $name:literal: $kind:ident),* $(,)?) => {
            $(
                pub const $const_name: ParameterKey = ParameterKey::new_static($name, ParameterKind::$kind);
            )*
        };
    }

    define_keys!(
        DIFFUSE_MAP = "Material.DiffuseMap": Texture,
        DIFFUSE_VALUE = "Material.DiffuseValue": Float4,
        SPECULAR_MAP = "Material.SpecularMap": Texture,
        SPECULAR_VALUE = "Material.SpecularValue": Float3,
        SPECULAR_INTENSITY_VALUE = "Material.SpecularIntensityValue": Float,
        METALNESS_MAP = "Material.MetalnessMap": Texture,
        METALNESS_VALUE = "Material.MetalnessValue": Float,
        GLOSSINESS_MAP = "Material.GlossinessMap": Texture,
        GLOSSINESS_VALUE = "Material.GlossinessValue": Float,
        NORMAL_MAP = "Material.NormalMap": Texture,
        NORMAL_VALUE = "Material.NormalValue": Float4,
        HAS_NORMAL_MAP = "Material.HasNormalMap": Bool,
        EMISSIVE_MAP = "Material.EmissiveMap": Texture,
        EMISSIVE_VALUE = "Material.EmissiveValue": Float4,
        EMISSIVE_INTENSITY = "Material.EmissiveIntensity": Float,
        AMBIENT_OCCLUSION_MAP = "Material.AmbientOcclusionMap": Texture,
        AMBIENT_OCCLUSION_VALUE = "Material.AmbientOcclusionValue": Float,
        AMBIENT_OCCLUSION_DIRECT_LIGHTING_FACTOR_VALUE = "Material.AmbientOcclusionDirectLightingFactorValue": Float,
        CAVITY_MAP = "Material.CavityMap": Texture,
        CAVITY_VALUE = "Material.CavityValue": Float,
        CAVITY_DIFFUSE_VALUE = "Material.CavityDiffuseValue": Float,
        CAVITY_SPECULAR_VALUE = "Material.CavitySpecularValue": Float,
        DIFFUSE_SPECULAR_ALPHA_BLEND_MAP = "Material.DiffuseSpecularAlphaBlendMap": Texture,
        DIFFUSE_SPECULAR_ALPHA_BLEND_VALUE = "Material.DiffuseSpecularAlphaBlendValue": Float,
        ALPHA_BLEND_COLOR_MAP = "Material.AlphaBlendColorMap": Texture,
        ALPHA_BLEND_COLOR_VALUE = "Material.AlphaBlendColorValue": Float3,
        ALPHA_DISCARD_MAP = "Material.AlphaDiscardMap": Texture,
        ALPHA_DISCARD_VALUE = "Material.AlphaDiscardValue": Float,
        USE_PIXEL_SHADER_WITH_DEPTH_PASS = "Material.UsePixelShaderWithDepthPass": Bool,
        BLEND_MAP = "Material.BlendMap": Texture,
        BLEND_VALUE = "Material.BlendValue": Float,
        DISPLACEMENT_MAP = "Material.DisplacementMap": Texture,
        DISPLACEMENT_VALUE = "Material.DisplacementValue": Float,
        DISPLACEMENT_INTENSITY = "Material.DisplacementIntensity": Float,
        SCATTERING_STRENGTH_VALUE = "Material.ScatteringStrengthValue": Float,
        TRANSLUCENCY_MAP = "Material.TranslucencyMap": Texture,
        TRANSLUCENCY_VALUE = "Material.TranslucencyValue": Float,
        SUBSURFACE_SCATTERING_WIDTH = "Material.SubsurfaceScatteringWidth": Float,
        TESSELLATION_SHADER = "Material.TessellationShader": Shader,
        DESIRED_TRIANGLE_SIZE = "Tessellation.DesiredTriangleSize": Float,
        REFRACTIVE_INDEX = "MaterialTransmittanceReflectanceStream.RefractiveIndex": Float,
        GENERIC_TEXTURE = "Material.GenericTexture": Texture,
        SAMPLER = "Texturing.Sampler": Sampler,
    );
}

impl ParameterKey {
    /// Creates a key with the given name and kind.
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            kind,
        }
    }

    /// Creates a key with the given static name and kind.
    pub const fn new_static(name: &'static str, kind: ParameterKind) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// Returns the `index`th variant of this key, named `<name>.i<index>`.
    /// Index zero is the key itself.
    pub fn indexed(&self, index: usize) -> Self {
        if index == 0 {
            self.clone()
        } else {
            Self::new(format!("{}.i{}", self.name, index), self.kind)
        }
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl ParameterValue {
    /// The kind of parameter this value can be bound to.
    pub fn kind(&self) -> ParameterKind {
        match self {
            Self::Float(_) => ParameterKind::Float,
            Self::Float2(_) => ParameterKind::Float2,
            Self::Float3(_) => ParameterKind::Float3,
            Self::Float4(_) => ParameterKind::Float4,
            Self::Bool(_) => ParameterKind::Bool,
            Self::Int(_) => ParameterKind::Int,
            Self::Texture(_) => ParameterKind::Texture,
            Self::Sampler(_) => ParameterKind::Sampler,
            Self::Shader(_) => ParameterKind::Shader,
        }
    }

    /// Converts the given RGBA color into a value for a parameter of the
    /// given kind, dropping the trailing components the kind has no room
    /// for.
    ///
    /// # Panics
    /// If the kind is not a float kind.
    pub fn from_color(color: Vector4<f32>, kind: ParameterKind) -> Self {
        match kind {
            ParameterKind::Float => Self::Float(color.x),
            ParameterKind::Float2 => Self::Float2(color.xy()),
            ParameterKind::Float3 => Self::Float3(color.xyz()),
            ParameterKind::Float4 => Self::Float4(color),
            _ => panic!("Cannot store a color in a parameter of kind {kind:?}"),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(value) => write!(f, "{value}"),
            Self::Float2(value) => write!(f, "({}, {})", value.x, value.y),
            Self::Float3(value) => write!(f, "({}, {}, {})", value.x, value.y, value.z),
            Self::Float4(value) => {
                write!(f, "({}, {}, {}, {})", value.x, value.y, value.z, value.w)
            }
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Texture(TextureReference::Asset(name)) => write!(f, "texture {name}"),
            Self::Texture(TextureReference::SolidColor(color)) => write!(
                f,
                "solid texture ({}, {}, {}, {})",
                color.x, color.y, color.z, color.w
            ),
            Self::Sampler(state) => write!(
                f,
                "sampler {:?} {:?}/{:?}",
                state.filter, state.address_u, state.address_v
            ),
            Self::Shader(source) => write!(f, "{source}"),
        }
    }
}

impl ParameterCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the given value to the given key, replacing any previous value.
    ///
    /// # Panics
    /// If the value does not have the kind of the key.
    pub fn set(&mut self, key: &ParameterKey, value: ParameterValue) {
        assert_eq!(
            key.kind(),
            value.kind(),
            "Parameter {key} cannot hold a value of kind {:?}",
            value.kind()
        );
        self.values.insert(key.name().to_string(), value);
    }

    /// Returns the value bound to the parameter with the given name.
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }

    /// Returns the value bound to the given key.
    pub fn get_key(&self, key: &ParameterKey) -> Option<&ParameterValue> {
        self.get(key.name())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over the parameter names and values, ordered by
    /// name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl fmt::Display for ParameterCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn indexing_key_appends_index_to_name() {
        assert_eq!(keys::BLEND_VALUE.indexed(0), keys::BLEND_VALUE);
        let indexed = keys::BLEND_VALUE.indexed(2);
        assert_eq!(indexed.name(), "Material.BlendValue.i2");
        assert_eq!(indexed.kind(), ParameterKind::Float);
    }

    #[test]
    fn static_and_owned_keys_with_same_name_are_equal() {
        let owned = ParameterKey::new("Material.DiffuseValue", ParameterKind::Float4);
        assert_eq!(owned, keys::DIFFUSE_VALUE);
    }

    #[test]
    fn setting_parameter_replaces_value() {
        let mut parameters = ParameterCollection::new();
        parameters.set(&keys::METALNESS_VALUE, ParameterValue::Float(0.2));
        parameters.set(&keys::METALNESS_VALUE, ParameterValue::Float(0.7));
        assert_eq!(parameters.len(), 1);
        assert_eq!(
            parameters.get("Material.MetalnessValue"),
            Some(&ParameterValue::Float(0.7))
        );
    }

    #[test]
    #[should_panic]
    fn setting_parameter_with_wrong_kind_fails() {
        let mut parameters = ParameterCollection::new();
        parameters.set(&keys::DIFFUSE_VALUE, ParameterValue::Float(1.0));
    }

    #[test]
    fn color_is_truncated_to_parameter_kind() {
        let color = Vector4::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(
            ParameterValue::from_color(color, ParameterKind::Float3),
            ParameterValue::Float3(Vector3::new(0.1, 0.2, 0.3))
        );
        assert_eq!(
            ParameterValue::from_color(color, ParameterKind::Float),
            ParameterValue::Float(0.1)
        );
    }
}
