//! State shared by everything that generates shader sources for a material.

use super::{GenerationLog, MaterialGeneratorConfig, config::ColorSpace};
use crate::material::{
    RGBAColor,
    descriptor::MaterialOverrides,
    parameter::{ParameterCollection, ParameterKey, ParameterValue, SamplerState, keys},
};
use std::{collections::HashMap, mem};

/// Parameters, parameter key allocation, active overrides and the log of the
/// current generation run.
///
/// Compute graphs only see this part of the generator state, which keeps it
/// borrowable alongside the blend layer being processed.
#[derive(Debug)]
pub struct ShaderGeneratorContext {
    config: MaterialGeneratorConfig,
    parameters: ParameterCollection,
    parameter_key_indices: HashMap<String, usize>,
    sampler_keys: HashMap<SamplerState, ParameterKey>,
    overrides: Vec<MaterialOverrides>,
    log: GenerationLog,
}

impl ShaderGeneratorContext {
    /// Creates a new context with the given configuration.
    pub fn new(config: MaterialGeneratorConfig) -> Self {
        Self {
            config,
            parameters: ParameterCollection::new(),
            parameter_key_indices: HashMap::new(),
            sampler_keys: HashMap::new(),
            overrides: Vec::new(),
            log: GenerationLog::new(),
        }
    }

    pub fn config(&self) -> &MaterialGeneratorConfig {
        &self.config
    }

    /// The parameters bound for the current pass.
    pub fn parameters(&self) -> &ParameterCollection {
        &self.parameters
    }

    /// The parameters bound for the current pass.
    pub fn parameters_mut(&mut self) -> &mut ParameterCollection {
        &mut self.parameters
    }

    pub fn log(&self) -> &GenerationLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut GenerationLog {
        &mut self.log
    }

    /// Returns a key for binding a new parameter based on the given key.
    ///
    /// The first request for a key within a pass returns the key itself.
    /// Later requests return `<name>.i1`, `<name>.i2` and so on, so that
    /// features binding the same kind of parameter do not overwrite each
    /// other.
    pub fn parameter_key(&mut self, base_key: &ParameterKey) -> ParameterKey {
        let index = self
            .parameter_key_indices
            .entry(base_key.name().to_string())
            .or_insert(0);
        let key = base_key.indexed(*index);
        *index += 1;
        key
    }

    /// Returns the key of the sampler parameter for the given sampler state,
    /// binding a new sampler parameter the first time the state is seen in
    /// a pass.
    pub fn sampler_key(&mut self, state: SamplerState) -> ParameterKey {
        if let Some(key) = self.sampler_keys.get(&state) {
            return key.clone();
        }
        let key = self.parameter_key(&keys::SAMPLER);
        self.parameters.set(&key, ParameterValue::Sampler(state));
        self.sampler_keys.insert(state, key.clone());
        key
    }

    /// Converts the given color from gamma space into the configured color
    /// space.
    pub fn to_color_space(&self, color: RGBAColor) -> RGBAColor {
        match self.config.color_space {
            ColorSpace::Gamma => color,
            ColorSpace::Linear => RGBAColor::new(
                srgb_to_linear(color.x),
                srgb_to_linear(color.y),
                srgb_to_linear(color.z),
                color.w,
            ),
        }
    }

    /// Makes the given overrides active, combined with the currently active
    /// ones, until the matching [`Self::pop_overrides`].
    pub fn push_overrides(&mut self, overrides: &MaterialOverrides) {
        let combined = self.current_overrides().combined_with(overrides);
        self.overrides.push(combined);
    }

    /// Restores the overrides active before the last
    /// [`Self::push_overrides`].
    ///
    /// # Panics
    /// If no overrides have been pushed.
    pub fn pop_overrides(&mut self) {
        assert!(
            self.overrides.pop().is_some(),
            "Cannot pop overrides more times than they were pushed"
        );
    }

    /// The combination of all pushed overrides.
    pub fn current_overrides(&self) -> MaterialOverrides {
        self.overrides.last().copied().unwrap_or_default()
    }

    /// Starts binding parameters for a new pass.
    pub(super) fn begin_pass(&mut self) {
        self.parameters = ParameterCollection::new();
        self.parameter_key_indices.clear();
        self.sampler_keys.clear();
    }

    /// Returns the parameters bound for the pass that just ended.
    pub(super) fn end_pass(&mut self) -> ParameterCollection {
        mem::take(&mut self.parameters)
    }

    pub(super) fn into_log(self) -> GenerationLog {
        self.log
    }
}

fn srgb_to_linear(value: f32) -> f32 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::material::{generator::config::GraphicsProfile, parameter::TextureFilter};
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector2;

    fn context() -> ShaderGeneratorContext {
        ShaderGeneratorContext::new(MaterialGeneratorConfig::default())
    }

    #[test]
    fn repeated_parameter_keys_are_indexed() {
        let mut context = context();
        let names: Vec<_> = (0..3)
            .map(|_| context.parameter_key(&keys::BLEND_VALUE).name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "Material.BlendValue",
                "Material.BlendValue.i1",
                "Material.BlendValue.i2"
            ]
        );
    }

    #[test]
    fn parameter_key_indices_restart_for_each_pass() {
        let mut context = context();
        context.parameter_key(&keys::DIFFUSE_VALUE);
        context.begin_pass();
        assert_eq!(context.parameter_key(&keys::DIFFUSE_VALUE), keys::DIFFUSE_VALUE);
    }

    #[test]
    fn equal_sampler_states_share_key() {
        let mut context = context();
        let linear = SamplerState::default();
        let point = SamplerState {
            filter: TextureFilter::Point,
            ..Default::default()
        };
        let first = context.sampler_key(linear);
        let second = context.sampler_key(point);
        assert_eq!(context.sampler_key(linear), first);
        assert_ne!(first, second);
        assert_eq!(context.parameters().len(), 2);
    }

    #[test]
    fn overrides_multiply_along_stack() {
        let mut context = context();
        context.push_overrides(&MaterialOverrides {
            uv_scale: Vector2::new(2.0, 3.0),
        });
        context.push_overrides(&MaterialOverrides {
            uv_scale: Vector2::new(0.5, 2.0),
        });
        assert_abs_diff_eq!(context.current_overrides().uv_scale, Vector2::new(1.0, 6.0));
        context.pop_overrides();
        assert_abs_diff_eq!(context.current_overrides().uv_scale, Vector2::new(2.0, 3.0));
        context.pop_overrides();
        assert_abs_diff_eq!(context.current_overrides().uv_scale, Vector2::new(1.0, 1.0));
    }

    #[test]
    #[should_panic]
    fn popping_overrides_without_push_fails() {
        context().pop_overrides();
    }

    #[test]
    fn pure_colors_are_unchanged_by_linear_conversion() {
        let context = context();
        let red = RGBAColor::new(1.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(context.to_color_space(red), red);
        assert_eq!(context.config().graphics_profile, GraphicsProfile::Level10_0);
    }

    #[test]
    fn mid_gray_becomes_darker_in_linear_space() {
        let context = context();
        let linear = context.to_color_space(RGBAColor::new(0.5, 0.5, 0.5, 0.5));
        assert_abs_diff_eq!(linear.x, 0.21404, epsilon = 1e-4);
        assert_abs_diff_eq!(linear.w, 0.5);
    }
}
