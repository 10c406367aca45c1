//! Displacement of vertices along their normals.

use super::MaterialFeature;
use crate::{
    material::{
        MaterialShaderStage,
        compute::{ComputeScalarNode, MaterialComputeColorKeys},
        generator::MaterialGeneratorContext,
        parameter::keys,
        stream::streams,
    },
    shader::{ShaderClassSource, ShaderMixinSource},
};
use serde::{Deserialize, Serialize};

/// Vertices moved along their normals by the value of a displacement map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplacementMapFeature {
    pub displacement_map: ComputeScalarNode,
    #[serde(default = "default_intensity")]
    pub intensity: ComputeScalarNode,
    /// Whether the map is clamped to [0, 1].
    #[serde(default = "default_true")]
    pub clamp: bool,
    /// Whether values in [0, 1] are mapped to [-1, 1].
    #[serde(default)]
    pub scale_and_bias: bool,
    #[serde(default)]
    pub stage: DisplacementStage,
}

/// Stage vertices are displaced in. Displacing in the domain stage moves
/// the vertices created by tessellation too.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplacementStage {
    #[default]
    Vertex,
    Domain,
}

fn default_intensity() -> ComputeScalarNode {
    ComputeScalarNode::constant(1.0)
}

fn default_true() -> bool {
    true
}

impl DisplacementMapFeature {
    pub fn new(displacement_map: ComputeScalarNode) -> Self {
        Self {
            displacement_map,
            intensity: default_intensity(),
            clamp: true,
            scale_and_bias: false,
            stage: DisplacementStage::default(),
        }
    }
}

impl DisplacementStage {
    pub fn shader_stage(self) -> MaterialShaderStage {
        match self {
            Self::Vertex => MaterialShaderStage::Vertex,
            Self::Domain => MaterialShaderStage::Domain,
        }
    }

    fn position_member(self) -> &'static str {
        match self {
            Self::Vertex => "Position",
            Self::Domain => "PositionWS",
        }
    }

    fn normal_member(self) -> &'static str {
        match self {
            Self::Vertex => "meshNormal",
            Self::Domain => "normalWS",
        }
    }
}

impl MaterialFeature for DisplacementMapFeature {
    fn generate_shader(&self, context: &mut MaterialGeneratorContext) {
        let stage = self.stage.shader_stage();

        let displacement_map = if self.clamp {
            self.displacement_map.clamped(0.0, 1.0)
        } else {
            self.displacement_map.clone()
        };

        context.add_stream_initializer(stage, "MaterialDisplacementStream");
        context.set_stream(
            stage,
            streams::DISPLACEMENT,
            &displacement_map,
            &MaterialComputeColorKeys::new(keys::DISPLACEMENT_MAP, keys::DISPLACEMENT_VALUE).not_color(),
        );

        let intensity = context.generate_compute_source(
            &self.intensity,
            &MaterialComputeColorKeys::value_only(keys::DISPLACEMENT_INTENSITY).not_color(),
        );
        let modifier = ShaderMixinSource::new(
            ShaderClassSource::new("MaterialSurfaceDisplacement")
                .with_argument(self.stage.position_member())
                .with_argument(self.stage.normal_member())
                .with_argument(self.scale_and_bias),
        )
        .with_composition("displacementIntensity", intensity);

        context.set_stream_final_modifier::<DisplacementMapFeature>(stage, modifier.into());
    }
}
