//! Shading models and the shader sources they contribute.

use crate::shader::{ShaderClassSource, ShaderMixinSource, ShaderSource};
use lamina_utils::InsertionOrderedMap;
use serde::{Deserialize, Serialize};

/// Identifies the type of a [`ShadingModel`]. A layer holds at most one
/// shading model of each kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShadingModelKind {
    DiffuseLambert,
    DiffuseCelShading,
    DiffuseHair,
    SpecularMicrofacet,
    SpecularThinGlass,
    SpecularHair,
    Emissive,
    SubsurfaceScattering,
}

/// A model for how a surface interacts with light, together with its
/// configuration. Two layers are shaded the same way when they hold equal
/// shading models.
#[derive(Clone, Debug, PartialEq)]
pub enum ShadingModel {
    DiffuseLambert,
    DiffuseCelShading(CelShadingModel),
    DiffuseHair(HairShadingModel),
    SpecularMicrofacet(MicrofacetModel),
    SpecularThinGlass(MicrofacetModel),
    SpecularHair(HairShadingModel),
    Emissive { use_alpha: bool },
    SubsurfaceScattering(ScatteringProfile),
}

/// Configuration of cel shading of diffuse light.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CelShadingModel {
    #[serde(default)]
    pub is_energy_conservative: bool,
    #[serde(default)]
    pub ramp: CelShadingRamp,
}

/// Function mapping light intensity to discrete shading levels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CelShadingRamp {
    Default { black_and_white: bool },
    Texture(String),
}

/// Which hair shading approximation to use.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HairShadingModel {
    #[default]
    Scheuermann,
    ScheuermannImproved,
    KajiyaKay,
}

/// Profile describing how light scatters beneath a surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScatteringProfile {
    #[default]
    Skin,
    CustomUniform,
}

/// Choice of the functions making up a microfacet specular model.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MicrofacetModel {
    #[serde(default)]
    pub fresnel: MicrofacetFresnelFunction,
    #[serde(default)]
    pub visibility: MicrofacetVisibilityFunction,
    #[serde(default)]
    pub normal_distribution: MicrofacetNormalDistributionFunction,
    #[serde(default)]
    pub environment: MicrofacetEnvironmentFunction,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MicrofacetFresnelFunction {
    None,
    #[default]
    Schlick,
    ThinGlass,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MicrofacetVisibilityFunction {
    Implicit,
    CookTorrance,
    Kelemen,
    Neumann,
    SmithBeckmann,
    SmithGGXCorrelated,
    SmithSchlickBeckmann,
    #[default]
    SmithSchlickGGX,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MicrofacetNormalDistributionFunction {
    Beckmann,
    BlinnPhong,
    #[default]
    GGX,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MicrofacetEnvironmentFunction {
    #[default]
    GGXLUT,
    GGXPolynomial,
    ThinGlass,
}

/// The shader sources a shading model contributes to a layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShadingModelShaderBuilder {
    /// Sources evaluated regardless of lighting.
    pub shader_sources: Vec<ShaderSource>,
    /// Source evaluated for each light affecting the surface.
    pub light_dependent_surface: Option<ShaderSource>,
    /// Extra shader classes mixed into the lighting of the surface.
    pub light_dependent_extra_models: Vec<ShaderClassSource>,
}

/// The shading models of a layer, in the order they were added.
#[derive(Clone, Debug, Default)]
pub struct ShadingModelCollection {
    models: InsertionOrderedMap<ShadingModelKind, (ShadingModel, ShadingModelShaderBuilder)>,
}

impl ShadingModel {
    pub fn kind(&self) -> ShadingModelKind {
        match self {
            Self::DiffuseLambert => ShadingModelKind::DiffuseLambert,
            Self::DiffuseCelShading(_) => ShadingModelKind::DiffuseCelShading,
            Self::DiffuseHair(_) => ShadingModelKind::DiffuseHair,
            Self::SpecularMicrofacet(_) => ShadingModelKind::SpecularMicrofacet,
            Self::SpecularThinGlass(_) => ShadingModelKind::SpecularThinGlass,
            Self::SpecularHair(_) => ShadingModelKind::SpecularHair,
            Self::Emissive { .. } => ShadingModelKind::Emissive,
            Self::SubsurfaceScattering(_) => ShadingModelKind::SubsurfaceScattering,
        }
    }

    /// Whether this is one of the hair shading models.
    pub fn is_hair(&self) -> bool {
        matches!(self, Self::DiffuseHair(_) | Self::SpecularHair(_))
    }
}

impl Default for CelShadingRamp {
    fn default() -> Self {
        Self::Default {
            black_and_white: false,
        }
    }
}

impl CelShadingRamp {
    /// Source of the function mapping light intensity to shading levels.
    pub fn shader_source(&self) -> ShaderSource {
        match self {
            Self::Default { black_and_white } => {
                ShaderClassSource::with_arguments("MaterialCelShadingLightDefault", [*black_and_white]).into()
            }
            Self::Texture(_) => ShaderClassSource::new("MaterialCelShadingLightRamp").into(),
        }
    }
}

impl HairShadingModel {
    /// Index identifying the model in the hair shaders.
    pub fn index(self) -> i64 {
        match self {
            Self::Scheuermann => 0,
            Self::ScheuermannImproved => 1,
            Self::KajiyaKay => 2,
        }
    }
}

impl ScatteringProfile {
    pub fn shader_source(self) -> ShaderClassSource {
        match self {
            Self::Skin => ShaderClassSource::new("SubsurfaceScatteringScatteringProfileSkin"),
            Self::CustomUniform => ShaderClassSource::new("SubsurfaceScatteringScatteringProfileCustomUniform"),
        }
    }
}

impl MicrofacetModel {
    /// The microfacet model used for thin glass.
    pub fn thin_glass() -> Self {
        Self {
            fresnel: MicrofacetFresnelFunction::ThinGlass,
            environment: MicrofacetEnvironmentFunction::ThinGlass,
            ..Default::default()
        }
    }

    /// Creates the surface source evaluating this model for a light.
    pub fn shader_source(&self) -> ShaderSource {
        ShaderMixinSource::of_class("MaterialSurfaceShadingSpecularMicrofacet")
            .with_composition(
                "environmentFunction",
                microfacet_function("Environment", self.environment.name()),
            )
            .with_composition("fresnelFunction", microfacet_function("Fresnel", self.fresnel.name()))
            .with_composition(
                "geometricShadowingFunction",
                microfacet_function("Visibility", self.visibility.name()),
            )
            .with_composition(
                "normalDistributionFunction",
                microfacet_function("NormalDistribution", self.normal_distribution.name()),
            )
            .into()
    }
}

impl MicrofacetFresnelFunction {
    fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Schlick => "Schlick",
            Self::ThinGlass => "ThinGlass",
        }
    }
}

impl MicrofacetVisibilityFunction {
    fn name(self) -> &'static str {
        match self {
            Self::Implicit => "Implicit",
            Self::CookTorrance => "CookTorrance",
            Self::Kelemen => "Kelemen",
            Self::Neumann => "Neumann",
            Self::SmithBeckmann => "SmithBeckmann",
            Self::SmithGGXCorrelated => "SmithGGXCorrelated",
            Self::SmithSchlickBeckmann => "SmithSchlickBeckmann",
            Self::SmithSchlickGGX => "SmithSchlickGGX",
        }
    }
}

impl MicrofacetNormalDistributionFunction {
    fn name(self) -> &'static str {
        match self {
            Self::Beckmann => "Beckmann",
            Self::BlinnPhong => "BlinnPhong",
            Self::GGX => "GGX",
        }
    }
}

impl MicrofacetEnvironmentFunction {
    fn name(self) -> &'static str {
        match self {
            Self::GGXLUT => "GGXLUT",
            Self::GGXPolynomial => "GGXPolynomial",
            Self::ThinGlass => "ThinGlass",
        }
    }
}

fn microfacet_function(function_type: &str, name: &str) -> ShaderClassSource {
    ShaderClassSource::new(format!("MaterialSpecularMicrofacet{function_type}{name}"))
}

impl ShadingModelCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn contains(&self, kind: ShadingModelKind) -> bool {
        self.models.contains_key(kind)
    }

    pub fn model(&self, kind: ShadingModelKind) -> Option<&ShadingModel> {
        self.models.get(kind).map(|(model, _)| model)
    }

    /// Adds the given shading model and returns the builder for its shader
    /// sources. If a model of the same kind is already present, it is kept
    /// and its builder is returned.
    pub fn add(&mut self, model: ShadingModel) -> &mut ShadingModelShaderBuilder {
        let (_, builder) = self
            .models
            .get_or_insert_with(model.kind(), || (model, ShadingModelShaderBuilder::default()));
        builder
    }

    /// Returns the builder for the model of the given kind, if present.
    pub fn builder_mut(&mut self, kind: ShadingModelKind) -> Option<&mut ShadingModelShaderBuilder> {
        self.models.get_mut(kind).map(|(_, builder)| builder)
    }

    /// Copies all models and their builders into the given collection,
    /// replacing any models of the same kinds there.
    pub fn copy_to(&self, other: &mut Self) {
        for (kind, entry) in self.models.iter() {
            other.models.insert(kind, entry.clone());
        }
    }

    pub fn clear(&mut self) {
        self.models.clear();
    }

    /// Generates the shader sources shading a surface with these models.
    ///
    /// The sources of each builder come first, in the order the models were
    /// added. All light dependent surfaces are then evaluated together by a
    /// single `MaterialSurfaceLightingAndShading`.
    pub fn generate(&self) -> Vec<ShaderSource> {
        let mut sources = Vec::new();
        let mut lighting: Option<ShaderMixinSource> = None;

        for (_, (_, builder)) in self.models.iter() {
            sources.extend(builder.shader_sources.iter().cloned());

            if let Some(surface) = &builder.light_dependent_surface {
                let lighting = lighting.get_or_insert_with(|| {
                    ShaderMixinSource::of_class("MaterialSurfaceLightingAndShading")
                });
                lighting.add_composition_to_array("surfaces", surface.clone());
                for extra_model in &builder.light_dependent_extra_models {
                    if !lighting.contains_mixin(extra_model) {
                        lighting.add_mixin(extra_model.clone());
                    }
                }
            }
        }

        sources.extend(lighting.map(ShaderSource::from));
        sources
    }
}

impl PartialEq for ShadingModelCollection {
    /// Collections are equal when they hold equal models, regardless of the
    /// order the models were added in.
    fn eq(&self, other: &Self) -> bool {
        self.models.len() == other.models.len()
            && self
                .models
                .iter()
                .all(|(kind, (model, _))| other.model(kind) == Some(model))
    }
}
