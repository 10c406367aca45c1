//! Generation of materials from material descriptors.

mod config;
mod generation_log;
mod shader_context;

pub use config::{ColorSpace, GraphicsProfile, MaterialGeneratorConfig};
pub use generation_log::{GenerationLog, GenerationLogEntry, LogLevel};
pub use shader_context::ShaderGeneratorContext;

use crate::{
    material::{
        CullMode, Material, MaterialID, MaterialPass, MaterialShaderStage, PerStage,
        compute::{ComputeNode, ComputeScalarNode, MaterialComputeColorKeys},
        descriptor::{MaterialDescriptor, MaterialOverrides},
        features::MaterialFeature,
        layer::BlendLayerContext,
        library::MaterialAssetResolver,
        parameter::ParameterCollection,
        shading::{ShadingModel, ShadingModelKind, ShadingModelShaderBuilder},
        stream::MaterialStreamType,
    },
    shader::{ShaderClassSource, ShaderMixinSource, ShaderSource},
};
use anyhow::{Result, anyhow};
use lamina_utils::InsertionOrderedMap;
use std::{
    any::TypeId,
    collections::{HashMap, HashSet},
    fmt, mem,
    sync::Arc,
};

/// The order final callbacks are invoked in when no other order is given.
pub const DEFAULT_FINAL_CALLBACK_ORDER: i32 = 0;

/// The phase of a generation run. Material features are visited once in
/// each phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MaterialGeneratorStep {
    /// Features register the number of passes they need.
    PassesEvaluation,
    /// Features contribute shader sources for the current pass.
    GenerateShader,
}

/// A callback invoked with the fully composited root layer, letting a
/// feature append sources that must come after everything else.
pub type FinalCallback = Box<dyn FnOnce(MaterialShaderStage, &mut MaterialGeneratorContext)>;

/// Generates [`Material`]s from [`MaterialDescriptor`]s.
#[derive(Clone, Debug, Default)]
pub struct MaterialGenerator {
    config: MaterialGeneratorConfig,
    resolver: Option<Arc<dyn MaterialAssetResolver>>,
}

/// The outcome of generating a material.
#[derive(Debug)]
pub struct GenerationResult {
    pub material: Material,
    pub log: GenerationLog,
}

/// The state of a single generation run.
///
/// Holds the stacks of materials, blend layers and overrides being visited,
/// the pass being generated and the registrations made by material features
/// for that pass. The blend layers are merged into the root layer when the
/// root layer is popped.
#[derive(Debug)]
pub struct MaterialGeneratorContext {
    shader: ShaderGeneratorContext,
    step: MaterialGeneratorStep,
    resolver: Option<Arc<dyn MaterialAssetResolver>>,
    material: Material,
    pass_active: bool,
    pass_index: usize,
    pass_count: usize,
    multipass_module: Option<String>,
    material_stack: Vec<MaterialStackEntry>,
    layer_stack: Vec<BlendLayerContext>,
    tags: HashSet<String>,
    stream_final_modifiers: InsertionOrderedMap<(MaterialShaderStage, TypeId), ShaderSource>,
    final_callbacks: PerStage<Vec<OrderedFinalCallback>>,
    registered_stream_blends: HashMap<String, ShaderSource>,
}

#[derive(Clone, Debug)]
struct MaterialStackEntry {
    id: Option<MaterialID>,
    cull_mode: CullMode,
}

struct OrderedFinalCallback {
    order: i32,
    callback: FinalCallback,
}

impl MaterialGenerator {
    /// Creates a generator using the given configuration. Materials
    /// referenced by name can not be resolved until a resolver is
    /// provided.
    pub fn new(config: MaterialGeneratorConfig) -> Self {
        Self {
            config,
            resolver: None,
        }
    }

    /// Uses the given resolver to find materials referenced by name.
    pub fn with_resolver(mut self, resolver: Arc<dyn MaterialAssetResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Generates the passes of the material described by the given
    /// descriptor. Problems with the material data are reported in the log
    /// of the result rather than aborting generation.
    pub fn generate(&self, descriptor: &MaterialDescriptor) -> GenerationResult {
        let mut context = MaterialGeneratorContext::new(self.config.clone());
        if let Some(resolver) = &self.resolver {
            context = context.with_resolver(Arc::clone(resolver));
        }
        with_trace_logging!("Generating material {}", descriptor.name; {
            generate_material(&mut context, descriptor)
        });
        context.into_result()
    }
}

fn generate_material(context: &mut MaterialGeneratorContext, descriptor: &MaterialDescriptor) {
    if !context.push_material(descriptor, Some(descriptor.id()), &descriptor.name) {
        return;
    }

    context.set_step(MaterialGeneratorStep::PassesEvaluation);
    descriptor.visit(context);

    context.set_step(MaterialGeneratorStep::GenerateShader);
    for _ in 0..context.pass_count() {
        with_trace_logging!("Generating pass {} of material {}", context.pass_index(), descriptor.name; {
            context.push_pass();
            context.push_layer(None);
            descriptor.visit(context);
            context.pop_layer();

            for stage in MaterialShaderStage::ALL {
                let surface_shader = context.compute_shader_source(stage);
                let stream_initializer = context.generate_stream_initializers(stage);
                let pass = context.material_pass_mut();
                pass.surface_shaders[stage] = surface_shader;
                pass.stream_initializers[stage] = stream_initializer;
            }

            let pass = context.material_pass_mut();
            if pass.cull_mode.is_none() {
                pass.cull_mode = Some(descriptor.attributes.cull_mode);
            }

            context.pop_pass();
        });
    }

    context.pop_material();
}

impl GenerationResult {
    pub fn has_errors(&self) -> bool {
        self.log.has_errors()
    }
}

impl MaterialGeneratorContext {
    /// Creates a context for a new generation run.
    pub fn new(config: MaterialGeneratorConfig) -> Self {
        Self {
            shader: ShaderGeneratorContext::new(config),
            step: MaterialGeneratorStep::PassesEvaluation,
            resolver: None,
            material: Material::default(),
            pass_active: false,
            pass_index: 0,
            pass_count: 1,
            multipass_module: None,
            material_stack: Vec::new(),
            layer_stack: Vec::new(),
            tags: HashSet::new(),
            stream_final_modifiers: InsertionOrderedMap::new(),
            final_callbacks: PerStage::default(),
            registered_stream_blends: HashMap::new(),
        }
    }

    /// Uses the given resolver to find materials referenced by name.
    pub fn with_resolver(mut self, resolver: Arc<dyn MaterialAssetResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn step(&self) -> MaterialGeneratorStep {
        self.step
    }

    pub fn set_step(&mut self, step: MaterialGeneratorStep) {
        self.step = step;
    }

    pub fn config(&self) -> &MaterialGeneratorConfig {
        self.shader.config()
    }

    /// The feature level of the graphics device the material targets.
    pub fn graphics_profile(&self) -> GraphicsProfile {
        self.shader.config().graphics_profile
    }

    pub fn shader_context(&self) -> &ShaderGeneratorContext {
        &self.shader
    }

    pub fn shader_context_mut(&mut self) -> &mut ShaderGeneratorContext {
        &mut self.shader
    }

    /// The parameters bound for the current pass.
    pub fn parameters(&self) -> &ParameterCollection {
        self.shader.parameters()
    }

    /// The parameters bound for the current pass.
    pub fn parameters_mut(&mut self) -> &mut ParameterCollection {
        self.shader.parameters_mut()
    }

    pub fn log(&self) -> &GenerationLog {
        self.shader.log()
    }

    pub fn log_mut(&mut self) -> &mut GenerationLog {
        self.shader.log_mut()
    }

    /// The material generated so far.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Index of the pass being generated.
    pub fn pass_index(&self) -> usize {
        self.pass_index
    }

    /// Number of passes the material is generated with.
    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    /// Registers that the material needs the given number of passes. Only
    /// one module can register multiple passes; later registrations are
    /// reported as errors and ignored.
    ///
    /// # Panics
    /// If called outside [`MaterialGeneratorStep::PassesEvaluation`].
    pub fn set_multiple_passes(&mut self, module: &str, pass_count: usize) {
        self.ensure_step(MaterialGeneratorStep::PassesEvaluation);
        if let Some(existing_module) = &self.multipass_module {
            let message = format!(
                "Two different material settings try to register multipass rendering: {module} and {existing_module}. \
                 Please make sure to not use exclusive features."
            );
            self.log_mut().error(message);
            return;
        }
        self.multipass_module = Some(module.to_string());
        self.pass_count = pass_count;
    }

    /// Starts generating a new pass. Parameter keys, tags, stream final
    /// modifiers, final callbacks and custom stream blends start out empty
    /// for each pass.
    pub fn push_pass(&mut self) -> &mut MaterialPass {
        self.shader.begin_pass();
        self.tags.clear();
        self.stream_final_modifiers.clear();
        self.final_callbacks = PerStage::default();
        self.registered_stream_blends.clear();

        self.material.passes.push(MaterialPass::new(self.pass_index));
        self.pass_active = true;
        self.material_pass_mut()
    }

    /// Finishes the current pass, storing the parameters bound for it.
    ///
    /// # Panics
    /// If no pass is being generated.
    pub fn pop_pass(&mut self) {
        assert!(self.pass_active, "Cannot PopPass more than PushPass");
        let parameters = self.shader.end_pass();
        self.material_pass_mut().parameters = parameters;
        self.pass_active = false;
        self.pass_index += 1;
        self.layer_stack.clear();
    }

    /// The pass being generated.
    ///
    /// # Panics
    /// If no pass is being generated.
    pub fn material_pass(&self) -> &MaterialPass {
        match self.material.passes.last() {
            Some(pass) if self.pass_active => pass,
            _ => panic!("No material pass is being generated"),
        }
    }

    /// The pass being generated.
    ///
    /// # Panics
    /// If no pass is being generated.
    pub fn material_pass_mut(&mut self) -> &mut MaterialPass {
        match self.material.passes.last_mut() {
            Some(pass) if self.pass_active => pass,
            _ => panic!("No material pass is being generated"),
        }
    }

    /// Pushes the given material onto the stack of materials being visited.
    ///
    /// Materials that can be referenced from elsewhere carry an `id`. Inline
    /// materials are owned by their parent and pass `None`, so they are
    /// never checked for recursion.
    ///
    /// Returns `false` and reports an error if a material with the same `id`
    /// is already on the stack, since visiting it again would never
    /// terminate.
    pub fn push_material(
        &mut self,
        descriptor: &MaterialDescriptor,
        id: Option<MaterialID>,
        name: &str,
    ) -> bool {
        if id.is_some() && self.material_stack.iter().any(|entry| entry.id == id) {
            self.log_mut()
                .error(format!("The material [{name}] cannot be used recursively."));
            return false;
        }
        self.material_stack.push(MaterialStackEntry {
            id,
            cull_mode: descriptor.attributes.cull_mode,
        });
        true
    }

    /// # Panics
    /// If the material stack is empty.
    pub fn pop_material(&mut self) {
        assert!(
            self.material_stack.pop().is_some(),
            "Cannot PopMaterial more than PushMaterial"
        );
    }

    /// The cull mode of the material being visited.
    pub fn current_material_cull_mode(&self) -> Option<CullMode> {
        self.material_stack.last().map(|entry| entry.cull_mode)
    }

    /// Finds the material descriptor registered under the given name.
    pub fn resolve_material(&self, name: &str) -> Result<Arc<MaterialDescriptor>> {
        let resolver = self
            .resolver
            .as_ref()
            .ok_or_else(|| anyhow!("No material asset resolver available"))?;
        resolver.find_material(name)
    }

    pub fn push_overrides(&mut self, overrides: &MaterialOverrides) {
        self.shader.push_overrides(overrides);
    }

    pub fn pop_overrides(&mut self) {
        self.shader.pop_overrides();
    }

    pub fn current_overrides(&self) -> MaterialOverrides {
        self.shader.current_overrides()
    }

    /// Visits the given feature according to the current step. Nothing
    /// happens for an absent feature.
    pub fn visit<F: MaterialFeature + ?Sized>(&mut self, feature: Option<&F>) {
        if let Some(feature) = feature {
            feature.visit(self);
        }
    }

    /// Pushes a new blend layer on top of the current one. Only the root
    /// layer can lack a blend map. Does nothing outside
    /// [`MaterialGeneratorStep::GenerateShader`].
    ///
    /// # Panics
    /// If a child layer is pushed without a blend map.
    pub fn push_layer(&mut self, blend_map: Option<ComputeScalarNode>) {
        if self.step != MaterialGeneratorStep::GenerateShader {
            return;
        }
        assert!(
            blend_map.is_some() || self.layer_stack.is_empty(),
            "Blendmap parameter cannot be null for a child layer"
        );
        self.layer_stack.push(BlendLayerContext::new(blend_map));
    }

    /// Pops the current blend layer. Popping the root layer merges the whole
    /// layer tree into the root layer, which then stays current until the
    /// pass is popped. Does nothing outside
    /// [`MaterialGeneratorStep::GenerateShader`].
    ///
    /// # Panics
    /// If no layer has been pushed.
    pub fn pop_layer(&mut self) {
        if self.step != MaterialGeneratorStep::GenerateShader {
            return;
        }
        let Some(layer) = self.layer_stack.pop() else {
            panic!("Cannot PopLayer when no balancing PushLayer was called");
        };

        if let Some(parent) = self.layer_stack.last_mut() {
            parent.children.push(layer);
            return;
        }

        let mut root = layer;
        self.process_layer_tree(&mut root);
        self.layer_stack.push(root);
        self.process_root_layer();
    }

    /// The current blend layer.
    ///
    /// # Panics
    /// If no layer has been pushed.
    pub fn current_layer(&self) -> &BlendLayerContext {
        match self.layer_stack.last() {
            Some(layer) => layer,
            None => panic!("No blend layer has been pushed"),
        }
    }

    fn current_layer_mut(&mut self) -> &mut BlendLayerContext {
        match self.layer_stack.last_mut() {
            Some(layer) => layer,
            None => panic!("No blend layer has been pushed"),
        }
    }

    /// Appends the given source to the given stage of the current layer.
    pub fn add_shader_source(&mut self, stage: MaterialShaderStage, source: ShaderSource) {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.current_layer_mut()
            .stage_mut(stage)
            .push_shader_source(source);
    }

    pub fn has_shader_sources(&self, stage: MaterialShaderStage) -> bool {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.current_layer().stage(stage).has_shader_sources()
    }

    /// Squashes the sources of the given stage of the current layer into a
    /// single source.
    pub fn compute_shader_source(&self, stage: MaterialShaderStage) -> Option<ShaderSource> {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.current_layer().stage(stage).compute_shader_source()
    }

    /// Creates the source initializing the streams of the given stage of the
    /// current layer.
    pub fn generate_stream_initializers(&mut self, stage: MaterialShaderStage) -> Option<ShaderSource> {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.current_layer_mut()
            .stage_mut(stage)
            .generate_stream_initializers()
    }

    /// Marks the given stream as used by the given stage of the current
    /// layer.
    pub fn use_stream(&mut self, stage: MaterialShaderStage, stream: &str) {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.current_layer_mut().stage_mut(stage).use_stream(stream);
    }

    /// Marks the given stream as used and blends it with the given source
    /// instead of linearly.
    pub fn use_stream_with_custom_blend(
        &mut self,
        stage: MaterialShaderStage,
        stream: &str,
        blend: ShaderSource,
    ) {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.use_stream(stage, stream);
        self.registered_stream_blends
            .insert(stream.to_string(), blend);
    }

    /// The source blending the values of the given stream between layers.
    pub fn stream_blend_shader_source(&self, stream: &str) -> ShaderSource {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.registered_stream_blend(stream)
    }

    fn registered_stream_blend(&self, stream: &str) -> ShaderSource {
        self.registered_stream_blends
            .get(stream)
            .cloned()
            .unwrap_or_else(|| ShaderClassSource::with_arguments("MaterialStreamLinearBlend", [stream]).into())
    }

    pub fn add_stream_initializer(&mut self, stage: MaterialShaderStage, class_name: &str) {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.current_layer_mut()
            .stage_mut(stage)
            .add_stream_initializer(class_name);
    }

    /// Writes the value computed by the given node into the given stream of
    /// the current layer.
    pub fn set_stream(
        &mut self,
        stage: MaterialShaderStage,
        stream: &str,
        node: &dyn ComputeNode,
        keys: &MaterialComputeColorKeys,
    ) {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        let Some(layer) = self.layer_stack.last_mut() else {
            panic!("No blend layer has been pushed");
        };
        layer.set_stream(&mut self.shader, stage, stream, node, keys);
    }

    /// Writes the value computed by the given source into the given stream
    /// of the current layer.
    pub fn set_stream_source(
        &mut self,
        stage: MaterialShaderStage,
        stream: &str,
        stream_type: MaterialStreamType,
        source: ShaderSource,
    ) {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.current_layer_mut()
            .set_stream_from_source(stage, stream, stream_type, source);
    }

    /// Generates the source computing the value of the given node, binding
    /// its parameters for the current pass.
    pub fn generate_compute_source(
        &mut self,
        node: &dyn ComputeNode,
        keys: &MaterialComputeColorKeys,
    ) -> ShaderSource {
        node.generate_shader_source(&mut self.shader, keys)
    }

    /// Adds the given shading model to the current layer and returns the
    /// builder for its shader sources.
    pub fn add_shading(&mut self, model: ShadingModel) -> &mut ShadingModelShaderBuilder {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.current_layer_mut().shading_models.add(model)
    }

    /// The builder of the shading model of the given kind in the current
    /// layer.
    pub fn shading_model_builder(&mut self, kind: ShadingModelKind) -> Option<&mut ShadingModelShaderBuilder> {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.current_layer_mut().shading_models.builder_mut(kind)
    }

    /// Returns `true` the first time the given tag is seen in the current
    /// pass, letting a feature that may be visited once per layer do some
    /// work only once.
    pub fn tag_once(&mut self, tag: &str) -> bool {
        self.tags.insert(tag.to_string())
    }

    /// Registers a source modifying a stream after all layers have written
    /// to it. Only the last modifier registered by the feature type `T`
    /// for a stage is kept.
    pub fn set_stream_final_modifier<T: 'static>(&mut self, stage: MaterialShaderStage, source: ShaderSource) {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.stream_final_modifiers
            .insert((stage, TypeId::of::<T>()), source);
    }

    /// The stream modifier registered by the feature type `T` for the given
    /// stage.
    pub fn stream_final_modifier<T: 'static>(&self, stage: MaterialShaderStage) -> Option<&ShaderSource> {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.stream_final_modifiers.get((stage, TypeId::of::<T>()))
    }

    /// Registers a callback invoked once the layers of the pass have been
    /// merged into the root layer. Callbacks run in ascending order, and in
    /// registration order for equal orders.
    pub fn add_final_callback(
        &mut self,
        stage: MaterialShaderStage,
        order: i32,
        callback: impl FnOnce(MaterialShaderStage, &mut MaterialGeneratorContext) + 'static,
    ) {
        self.ensure_step(MaterialGeneratorStep::GenerateShader);
        self.final_callbacks[stage].push(OrderedFinalCallback {
            order,
            callback: Box::new(callback),
        });
    }

    fn ensure_step(&self, step: MaterialGeneratorStep) {
        assert!(
            self.step == step,
            "This method can only be called during step [{step:?}]"
        );
    }

    fn into_result(self) -> GenerationResult {
        GenerationResult {
            material: self.material,
            log: self.shader.into_log(),
        }
    }

    /// Merges the children of the given layer into it, deepest layers
    /// first.
    fn process_layer_tree(&mut self, layer: &mut BlendLayerContext) {
        if !layer.shading_models.is_empty() {
            layer.shading_model_count += 1;
        }

        let mut children = mem::take(&mut layer.children);
        let child_count = children.len();
        for (idx, child) in children.iter_mut().enumerate() {
            self.process_layer_tree(child);
            self.process_intermediate_layer(layer, child, idx + 1 == child_count);
        }
    }

    /// Merges a child layer into its parent.
    ///
    /// Attributes of layers with the same shading models as the parent are
    /// blended stream by stream. When the shading models change, the layers
    /// are shaded separately and the shading results are blended instead.
    fn process_intermediate_layer(
        &mut self,
        parent: &mut BlendLayerContext,
        layer: &mut BlendLayerContext,
        is_last_layer: bool,
    ) {
        let mut same_shading_model = true;
        if parent.shading_model_count > 0 {
            same_shading_model = layer.shading_models == parent.shading_models;
        } else if layer.shading_model_count > 0 {
            layer.shading_models.copy_to(&mut parent.shading_models);
            layer.shading_models.clear();
            parent.shading_model_count += 1;
        }

        if same_shading_model {
            self.blend_streams(layer);
        } else {
            parent.shading_model_count += 1;
        }

        for stage in MaterialShaderStage::ALL {
            for initializer in layer.stage(stage).stream_initializers() {
                parent.stage_mut(stage).add_stream_initializer(initializer);
            }

            let sources = layer.stage(stage).shader_sources().iter().cloned();
            if stage == MaterialShaderStage::Pixel {
                // Pixel sources wait for a possible blend of shading models
                if same_shading_model {
                    parent.pending_pixel_sources.extend(sources);
                }
            } else {
                parent.stage_mut(stage).extend_shader_sources(sources);
            }
        }

        let force_shading = is_last_layer && (parent.shading_model_count > 1 || !same_shading_model);
        if !same_shading_model || force_shading {
            let mut layer_already_blended = false;

            if force_shading && parent.blend_map_for_shading_model.is_none() {
                if !same_shading_model {
                    self.shade_pending_sources(parent);
                    layer.shading_models.copy_to(&mut parent.shading_models);
                }
                parent.blend_map_for_shading_model = layer.blend_map.clone();
                parent
                    .pending_pixel_sources
                    .extend(layer.stage(MaterialShaderStage::Pixel).shader_sources().iter().cloned());
                layer_already_blended = true;
            }

            if parent.blend_map_for_shading_model.is_some() {
                self.blend_shading_model(parent);
            } else {
                self.shade_pending_sources(parent);
            }

            if !same_shading_model && !layer_already_blended {
                parent.blend_map_for_shading_model = layer.blend_map.clone();
                parent.shading_models.clear();
                layer.shading_models.copy_to(&mut parent.shading_models);
                parent
                    .pending_pixel_sources
                    .extend(layer.stage(MaterialShaderStage::Pixel).shader_sources().iter().cloned());

                if is_last_layer && parent.shading_model_count > 1 {
                    self.blend_shading_model(parent);
                }
            }
        }
    }

    /// Moves the pending pixel sources of the layer into its pixel stage,
    /// followed by the shading of its current shading models.
    fn shade_pending_sources(&mut self, layer: &mut BlendLayerContext) {
        let pending = layer.pending_pixel_sources.take();
        let shading = layer.shading_models.generate();
        let pixel = layer.stage_mut(MaterialShaderStage::Pixel);
        pixel.extend_shader_sources(pending);
        pixel.extend_shader_sources(shading);
        layer.shading_models.clear();
    }

    /// Shades the pending pixel sources of the layer with its current
    /// shading models, blended over the shading of the layers below by the
    /// blend map recorded for the change of shading models.
    fn blend_shading_model(&mut self, parent: &mut BlendLayerContext) {
        let Some(blend_map) = parent.blend_map_for_shading_model.take() else {
            return;
        };

        let mut blend = ShaderMixinSource::of_class("MaterialSurfaceShadingBlend");
        parent.set_stream_blend(&mut self.shader, MaterialShaderStage::Pixel, &blend_map);

        for source in parent.pending_pixel_sources.take() {
            blend.add_composition_to_array("layers", source);
        }
        for source in parent.shading_models.generate() {
            blend.add_composition_to_array("layers", source);
        }
        parent.shading_models.clear();

        parent
            .stage_mut(MaterialShaderStage::Pixel)
            .push_shader_source(blend.into());
    }

    /// Wraps the sources of every stage writing to streams in a blend of
    /// those streams, weighted by the blend map of the layer.
    fn blend_streams(&mut self, layer: &mut BlendLayerContext) {
        let Some(blend_map) = layer.blend_map.clone() else {
            return;
        };

        for stage in MaterialShaderStage::ALL {
            if !layer.stage(stage).has_streams() {
                continue;
            }

            layer.set_stream_blend(&mut self.shader, stage, &blend_map);

            let mut blend = ShaderMixinSource::of_class("MaterialSurfaceStreamsBlend");
            for stream in layer.stage_mut(stage).take_streams() {
                blend.add_composition_to_array("blends", self.registered_stream_blend(&stream));
            }

            let stage_context = layer.stage_mut(stage);
            if let Some(source) = stage_context.compute_shader_source() {
                blend.add_composition("layer", source);
            }
            stage_context.take_shader_sources();
            stage_context.push_shader_source(blend.into());
        }
    }

    /// Finalizes the merged root layer with its own shading, the stream
    /// final modifiers and the final callbacks.
    fn process_root_layer(&mut self) {
        let root = self.current_layer_mut();
        let pending = root.pending_pixel_sources.take();
        root.stage_mut(MaterialShaderStage::Pixel)
            .extend_shader_sources(pending);

        if !root.shading_models.is_empty() {
            let shading = root.shading_models.generate();
            root.stage_mut(MaterialShaderStage::Pixel)
                .extend_shader_sources(shading);
        }

        let modifiers: Vec<_> = self
            .stream_final_modifiers
            .iter()
            .map(|((stage, _), source)| (stage, source.clone()))
            .collect();
        for (stage, source) in modifiers {
            self.add_shader_source(stage, source);
        }

        // Callbacks registered by other callbacks run after the current batch
        for stage in MaterialShaderStage::ALL {
            while !self.final_callbacks[stage].is_empty() {
                let mut callbacks = mem::take(&mut self.final_callbacks[stage]);
                callbacks.sort_by_key(|callback| callback.order);
                for OrderedFinalCallback { callback, .. } in callbacks {
                    callback(stage, self);
                }
            }
        }
    }
}

impl fmt::Debug for OrderedFinalCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedFinalCallback")
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
