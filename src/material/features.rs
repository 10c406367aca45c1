//! Material features contributing shader sources to the layers of a
//! material.

mod clear_coat;
mod diffuse;
mod displacement;
mod emissive;
mod glass;
mod occlusion;
mod specular;
mod subsurface;
mod surface;
mod tessellation;
mod transparency;

pub use clear_coat::ClearCoatFeature;
pub use diffuse::{DiffuseMapFeature, DiffuseModelFeature};
pub use displacement::{DisplacementMapFeature, DisplacementStage};
pub use emissive::EmissiveMapFeature;
pub use glass::{GlassPassConfiguration, ThinGlassModelFeature};
pub use occlusion::OcclusionMapFeature;
pub use specular::{MetalnessMapFeature, SpecularFeature, SpecularMapFeature, SpecularModelFeature};
pub use subsurface::SubsurfaceScatteringFeature;
pub use surface::{GlossinessMapFeature, NormalMapFeature};
pub use tessellation::{TessellationFeature, TessellationSettings};
pub use transparency::{
    AdditiveTransparency, BlendTransparency, CutoffTransparency, TransparencyFeature,
};

use crate::material::generator::{MaterialGeneratorContext, MaterialGeneratorStep};

/// A feature of a material, like a diffuse map or a shading model.
///
/// Features are visited once for evaluating the passes of the material and
/// once for each pass, and contribute to the material only through the
/// [`MaterialGeneratorContext`].
pub trait MaterialFeature {
    /// Registers the passes the feature needs. Most features need only the
    /// default single pass.
    fn multipass_generation(&self, _context: &mut MaterialGeneratorContext) {}

    /// Contributes shader sources, streams, parameters and render state to
    /// the current pass.
    fn generate_shader(&self, context: &mut MaterialGeneratorContext);

    /// Dispatches to the operation for the current step of the context.
    fn visit(&self, context: &mut MaterialGeneratorContext) {
        match context.step() {
            MaterialGeneratorStep::PassesEvaluation => self.multipass_generation(context),
            MaterialGeneratorStep::GenerateShader => self.generate_shader(context),
        }
    }
}
