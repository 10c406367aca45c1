//! Declarative descriptions of materials.

use crate::material::{
    CullMode, MaterialID,
    compute::ComputeScalarNode,
    features::{
        ClearCoatFeature, DiffuseMapFeature, DiffuseModelFeature, DisplacementMapFeature,
        EmissiveMapFeature, GlossinessMapFeature, NormalMapFeature, OcclusionMapFeature,
        SpecularFeature, SpecularModelFeature, SubsurfaceScatteringFeature, TessellationFeature,
        TransparencyFeature,
    },
    generator::MaterialGeneratorContext,
};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A material: a set of attributes, optionally with other materials blended
/// on top of it as layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    pub name: String,
    #[serde(default)]
    pub attributes: MaterialAttributes,
    #[serde(default)]
    pub layers: Vec<MaterialBlendLayer>,
}

/// The features of a material. Absent features contribute nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialAttributes {
    pub enabled: bool,
    pub tessellation: Option<TessellationFeature>,
    pub displacement: Option<DisplacementMapFeature>,
    pub surface: Option<NormalMapFeature>,
    pub micro_surface: Option<GlossinessMapFeature>,
    pub diffuse: Option<DiffuseMapFeature>,
    pub diffuse_model: Option<DiffuseModelFeature>,
    pub specular: Option<SpecularFeature>,
    pub specular_model: Option<SpecularModelFeature>,
    pub occlusion: Option<OcclusionMapFeature>,
    pub emissive: Option<EmissiveMapFeature>,
    pub subsurface_scattering: Option<SubsurfaceScatteringFeature>,
    pub transparency: Option<TransparencyFeature>,
    pub clear_coat: Option<ClearCoatFeature>,
    pub overrides: MaterialOverrides,
    pub cull_mode: CullMode,
}

/// A material blended over the layers below it by a blend map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialBlendLayer {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Weight of this layer, from 0 where only the layers below are visible
    /// to 1 where only this layer is.
    pub blend_map: ComputeScalarNode,
    pub material: MaterialReference,
    #[serde(default)]
    pub overrides: MaterialOverrides,
}

/// The material of a blend layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MaterialReference {
    Inline(Box<MaterialDescriptor>),
    /// Name of a material found through the asset resolver of the generator.
    Asset(String),
}

/// Adjustments applied to a material and the layers it contains.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialOverrides {
    /// Factor scaling the texture coordinates of all texture lookups.
    pub uv_scale: Vector2<f32>,
}

fn default_true() -> bool {
    true
}

impl MaterialDescriptor {
    /// Creates a material with the given name and no features.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: MaterialAttributes::default(),
            layers: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: MaterialAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_layer(mut self, layer: MaterialBlendLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Identifier of the material when referenced by its name, derived from
    /// the name.
    pub fn id(&self) -> MaterialID {
        MaterialID::from_name(&self.name)
    }

    /// Visits the attributes of the material and then each of its layers.
    pub fn visit(&self, context: &mut MaterialGeneratorContext) {
        self.attributes.visit(context);
        for layer in &self.layers {
            layer.visit(context);
        }
    }
}

impl Default for MaterialAttributes {
    fn default() -> Self {
        Self {
            enabled: true,
            tessellation: None,
            displacement: None,
            surface: None,
            micro_surface: None,
            diffuse: None,
            diffuse_model: None,
            specular: None,
            specular_model: None,
            occlusion: None,
            emissive: None,
            subsurface_scattering: None,
            transparency: None,
            clear_coat: None,
            overrides: MaterialOverrides::default(),
            cull_mode: CullMode::default(),
        }
    }
}

impl MaterialAttributes {
    /// Visits the features in the order they affect each other: geometry
    /// first, then the surface and its shading, and finally transparency
    /// and the clear coat. Shading models are only visited together with
    /// the color they shade.
    pub fn visit(&self, context: &mut MaterialGeneratorContext) {
        if !self.enabled {
            return;
        }

        context.push_overrides(&self.overrides);

        context.visit(self.tessellation.as_ref());
        context.visit(self.displacement.as_ref());
        context.visit(self.surface.as_ref());
        context.visit(self.micro_surface.as_ref());

        context.visit(self.diffuse.as_ref());
        if self.diffuse.is_some() {
            context.visit(self.diffuse_model.as_ref());
        }

        context.visit(self.specular.as_ref());
        if self.specular.is_some() {
            context.visit(self.specular_model.as_ref());
        }

        context.visit(self.occlusion.as_ref());
        context.visit(self.emissive.as_ref());
        context.visit(self.subsurface_scattering.as_ref());

        if self.transparency.is_some() && self.has_hair_shading() {
            context
                .log_mut()
                .warning("Transparency is not supported together with hair shading and will be ignored");
        } else {
            context.visit(self.transparency.as_ref());
        }

        context.visit(self.clear_coat.as_ref());

        context.pop_overrides();
    }

    fn has_hair_shading(&self) -> bool {
        matches!(self.diffuse_model, Some(DiffuseModelFeature::Hair(_)))
            || self
                .specular_model
                .as_ref()
                .is_some_and(SpecularModelFeature::is_hair)
    }
}

impl MaterialBlendLayer {
    /// A layer blending the given material by the given blend map.
    pub fn new(blend_map: ComputeScalarNode, material: MaterialReference) -> Self {
        Self {
            name: String::new(),
            enabled: true,
            blend_map,
            material,
            overrides: MaterialOverrides::default(),
        }
    }

    /// Visits the material of the layer inside a new blend layer. Layers
    /// whose material can not be found or that contain themselves are
    /// skipped after reporting an error.
    pub fn visit(&self, context: &mut MaterialGeneratorContext) {
        if !self.enabled {
            return;
        }

        let resolved;
        let (descriptor, id): (&MaterialDescriptor, _) = match &self.material {
            MaterialReference::Inline(descriptor) => (descriptor.as_ref(), None),
            MaterialReference::Asset(name) => match context.resolve_material(name) {
                Ok(descriptor) => {
                    resolved = descriptor;
                    (resolved.as_ref(), Some(MaterialID::from_name(name)))
                }
                Err(error) => {
                    log::debug!("Failed to resolve material {name}: {error:#}");
                    context
                        .log_mut()
                        .error(format!("Unable to find material [{name}]"));
                    return;
                }
            },
        };

        let name = if self.name.is_empty() {
            &descriptor.name
        } else {
            &self.name
        };
        if !context.push_material(descriptor, id, name) {
            return;
        }
        context.push_overrides(&self.overrides);
        context.push_layer(Some(self.blend_map.clone()));

        descriptor.visit(context);

        context.pop_layer();
        context.pop_overrides();
        context.pop_material();
    }
}

impl MaterialReference {
    pub fn inline(descriptor: MaterialDescriptor) -> Self {
        Self::Inline(Box::new(descriptor))
    }
}

impl Default for MaterialOverrides {
    fn default() -> Self {
        Self {
            uv_scale: Vector2::new(1.0, 1.0),
        }
    }
}

impl MaterialOverrides {
    /// Combines these overrides with overrides applied inside them.
    pub fn combined_with(&self, other: &Self) -> Self {
        Self {
            uv_scale: self.uv_scale.component_mul(&other.uv_scale),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::material::{RGBAColor, compute::ComputeColorNode};

    #[test]
    fn descriptor_with_only_name_parses_with_defaults() {
        let descriptor: MaterialDescriptor = ron::from_str(r#"(name: "empty")"#).unwrap();
        assert_eq!(descriptor, MaterialDescriptor::new("empty"));
        assert!(descriptor.attributes.enabled);
        assert_eq!(descriptor.attributes.cull_mode, CullMode::Back);
    }

    #[test]
    fn descriptor_with_features_and_layers_parses() {
        let descriptor: MaterialDescriptor = ron::from_str(
            r#"(
                name: "layered",
                attributes: (
                    diffuse: Some((diffuse_map: Constant((value: (1.0, 0.0, 0.0, 1.0))))),
                    diffuse_model: Some(Lambert),
                    cull_mode: None,
                ),
                layers: [
                    (
                        blend_map: Constant((value: 0.5)),
                        material: Asset("rust"),
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(
            descriptor.attributes.diffuse,
            Some(DiffuseMapFeature::new(ComputeColorNode::constant(RGBAColor::new(
                1.0, 0.0, 0.0, 1.0
            ))))
        );
        assert_eq!(descriptor.attributes.diffuse_model, Some(DiffuseModelFeature::Lambert));
        assert_eq!(descriptor.attributes.cull_mode, CullMode::None);
        assert_eq!(descriptor.layers.len(), 1);
        assert!(descriptor.layers[0].enabled);
        assert_eq!(
            descriptor.layers[0].material,
            MaterialReference::Asset("rust".to_string())
        );
    }

    #[test]
    fn materials_with_same_name_share_id() {
        assert_eq!(
            MaterialDescriptor::new("stone").id(),
            MaterialDescriptor::new("stone").id()
        );
        assert_ne!(
            MaterialDescriptor::new("stone").id(),
            MaterialDescriptor::new("wood").id()
        );
    }

    #[test]
    fn overrides_combine_by_multiplying_uv_scales() {
        let outer = MaterialOverrides {
            uv_scale: Vector2::new(2.0, 2.0),
        };
        let inner = MaterialOverrides {
            uv_scale: Vector2::new(0.5, 3.0),
        };
        assert_eq!(outer.combined_with(&inner).uv_scale, Vector2::new(1.0, 6.0));
    }
}
