//! Tessellation of the geometry a material is applied to.

use super::MaterialFeature;
use crate::{
    material::{
        MaterialShaderStage, TessellationMethod,
        generator::{GraphicsProfile, MaterialGeneratorContext},
        parameter::{ParameterValue, keys},
    },
    shader::{ShaderClassSource, ShaderMixinSource},
};
use serde::{Deserialize, Serialize};

/// Subdivision of triangles on the GPU.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TessellationFeature {
    /// Triangles are subdivided in their own plane.
    Flat(TessellationSettings),
    /// Triangles are subdivided into curved point-normal triangles.
    PointNormal(TessellationSettings),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TessellationSettings {
    /// Screen space size, in pixels, that tessellated triangles should
    /// have.
    #[serde(default = "default_triangle_size")]
    pub triangle_size: f32,
    /// Whether attributes are averaged across adjacent edges, which hides
    /// cracks along texture seams.
    #[serde(default = "default_adjacent_edge_average")]
    pub adjacent_edge_average: bool,
}

fn default_triangle_size() -> f32 {
    12.0
}

fn default_adjacent_edge_average() -> bool {
    true
}

impl Default for TessellationSettings {
    fn default() -> Self {
        Self {
            triangle_size: default_triangle_size(),
            adjacent_edge_average: default_adjacent_edge_average(),
        }
    }
}

impl TessellationFeature {
    fn settings(&self) -> &TessellationSettings {
        match self {
            Self::Flat(settings) | Self::PointNormal(settings) => settings,
        }
    }

    fn method(&self) -> TessellationMethod {
        match self {
            Self::Flat(_) => TessellationMethod::FLAT,
            Self::PointNormal(_) => TessellationMethod::POINT_NORMAL,
        }
    }

    fn shader_class_name(&self) -> &'static str {
        match self {
            Self::Flat(_) => "TessellationFlat",
            Self::PointNormal(_) => "TessellationPN",
        }
    }
}

impl MaterialFeature for TessellationFeature {
    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        if context.graphics_profile() < GraphicsProfile::Level11_0 {
            context.log_mut().warning(
                "Tessellation is only supported for graphics profile 11.0 or higher. Tessellation will be ignored",
            );
            return;
        }

        if !context.material_pass().tessellation_method.is_empty() {
            context.log_mut().warning(
                "A material cannot have more than one layer performing tessellation. \
                 The first tessellation method found will be used",
            );
            return;
        }

        let settings = self.settings();
        let mut method = self.method();

        context.parameters_mut().set(
            &keys::DESIRED_TRIANGLE_SIZE,
            ParameterValue::Float(settings.triangle_size.max(1.0)),
        );
        context.parameters_mut().set(
            &keys::TESSELLATION_SHADER,
            ParameterValue::Shader(ShaderMixinSource::of_class(self.shader_class_name()).into()),
        );
        context.add_stream_initializer(MaterialShaderStage::Domain, "MaterialTessellationStream");

        if settings.adjacent_edge_average {
            method |= TessellationMethod::ADJACENT_EDGE_AVERAGE;
            context.add_shader_source(
                MaterialShaderStage::Domain,
                ShaderClassSource::with_arguments("TessellationAE4", ["PositionWS"]).into(),
            );
            context.set_stream_final_modifier::<TessellationFeature>(
                MaterialShaderStage::Domain,
                ShaderClassSource::with_arguments("TessellationAE2", ["TexCoord"]).into(),
            );
        }

        context.material_pass_mut().tessellation_method |= method;
    }
}
