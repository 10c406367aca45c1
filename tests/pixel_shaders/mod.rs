//! Expected pixel stage surface shaders of the layered material scenarios.

pub const SIMPLE_NO_LAYER: &str = r#"!ShaderMixinSource
Mixins:
    - !ShaderClassSource
        ClassName: MaterialSurfaceArray
Compositions:
    layers: !ShaderArraySource
        Values:
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceDiffuse
                Compositions:
                    diffuseMap: !ShaderClassSource
                        ClassName: ComputeColorConstantColorLink
                        GenericArguments: [Material.DiffuseValue]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceLightingAndShading
                Compositions:
                    surfaces: !ShaderArraySource
                        Values:
                            - !ShaderClassSource
                                ClassName: MaterialSurfaceShadingDiffuseLambert
                                GenericArguments: [false]"#;

pub const ONE_LAYER_SAME_SHADING_MODEL: &str = r#"!ShaderMixinSource
Mixins:
    - !ShaderClassSource
        ClassName: MaterialSurfaceArray
Compositions:
    layers: !ShaderArraySource
        Values:
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceDiffuse
                Compositions:
                    diffuseMap: !ShaderClassSource
                        ClassName: ComputeColorConstantColorLink
                        GenericArguments: [Material.DiffuseValue]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceStreamsBlend
                Compositions:
                    blends: !ShaderArraySource
                        Values:
                            - !ShaderClassSource
                                ClassName: MaterialStreamLinearBlend
                                GenericArguments: [matDiffuse]
                            - !ShaderClassSource
                                ClassName: MaterialStreamLinearBlend
                                GenericArguments: [matColorBase]
                    layer: !ShaderMixinSource
                        Mixins:
                            - !ShaderClassSource
                                ClassName: MaterialSurfaceArray
                        Compositions:
                            layers: !ShaderArraySource
                                Values:
                                    - !ShaderMixinSource
                                        Mixins:
                                            - !ShaderClassSource
                                                ClassName: MaterialSurfaceDiffuse
                                        Compositions:
                                            diffuseMap: !ShaderClassSource
                                                ClassName: ComputeColorConstantColorLink
                                                GenericArguments: [TestMaterialGenerator.DiffuseValueCustom1]
                                    - !ShaderMixinSource
                                        Mixins:
                                            - !ShaderClassSource
                                                ClassName: MaterialSurfaceSetStreamFromComputeColor
                                                GenericArguments: [matBlend, r]
                                        Compositions:
                                            computeColorSource: !ShaderClassSource
                                                ClassName: ComputeColorConstantFloatLink
                                                GenericArguments: [Material.BlendValue]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceLightingAndShading
                Compositions:
                    surfaces: !ShaderArraySource
                        Values:
                            - !ShaderClassSource
                                ClassName: MaterialSurfaceShadingDiffuseLambert
                                GenericArguments: [false]"#;

pub const ONE_LAYER_TWO_SHADING_MODELS: &str = r#"!ShaderMixinSource
Mixins:
    - !ShaderClassSource
        ClassName: MaterialSurfaceArray
Compositions:
    layers: !ShaderArraySource
        Values:
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceDiffuse
                Compositions:
                    diffuseMap: !ShaderClassSource
                        ClassName: ComputeColorConstantColorLink
                        GenericArguments: [Material.DiffuseValue]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceLightingAndShading
                Compositions:
                    surfaces: !ShaderArraySource
                        Values:
                            - !ShaderClassSource
                                ClassName: MaterialSurfaceShadingDiffuseLambert
                                GenericArguments: [false]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceSetStreamFromComputeColor
                        GenericArguments: [matBlend, r]
                Compositions:
                    computeColorSource: !ShaderClassSource
                        ClassName: ComputeColorConstantFloatLink
                        GenericArguments: [Material.BlendValue]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceShadingBlend
                Compositions:
                    layers: !ShaderArraySource
                        Values:
                            - !ShaderMixinSource
                                Mixins:
                                    - !ShaderClassSource
                                        ClassName: MaterialSurfaceMetalness
                                Compositions:
                                    metalnessMap: !ShaderClassSource
                                        ClassName: ComputeColorConstantFloatLink
                                        GenericArguments: [Material.MetalnessValue]
                            - !ShaderMixinSource
                                Mixins:
                                    - !ShaderClassSource
                                        ClassName: MaterialSurfaceLightingAndShading
                                Compositions:
                                    surfaces: !ShaderArraySource
                                        Values:
                                            - !ShaderMixinSource
                                                Mixins:
                                                    - !ShaderClassSource
                                                        ClassName: MaterialSurfaceShadingSpecularMicrofacet
                                                Compositions:
                                                    environmentFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetEnvironmentGGXLUT
                                                    fresnelFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetFresnelSchlick
                                                    geometricShadowingFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetVisibilitySmithSchlickGGX
                                                    normalDistributionFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetNormalDistributionGGX"#;

pub const TWO_LAYERS_TWO_SHADING_MODELS: &str = r#"!ShaderMixinSource
Mixins:
    - !ShaderClassSource
        ClassName: MaterialSurfaceArray
Compositions:
    layers: !ShaderArraySource
        Values:
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceStreamsBlend
                Compositions:
                    blends: !ShaderArraySource
                        Values:
                            - !ShaderClassSource
                                ClassName: MaterialStreamLinearBlend
                                GenericArguments: [matDiffuse]
                            - !ShaderClassSource
                                ClassName: MaterialStreamLinearBlend
                                GenericArguments: [matColorBase]
                    layer: !ShaderMixinSource
                        Mixins:
                            - !ShaderClassSource
                                ClassName: MaterialSurfaceArray
                        Compositions:
                            layers: !ShaderArraySource
                                Values:
                                    - !ShaderMixinSource
                                        Mixins:
                                            - !ShaderClassSource
                                                ClassName: MaterialSurfaceDiffuse
                                        Compositions:
                                            diffuseMap: !ShaderClassSource
                                                ClassName: ComputeColorConstantColorLink
                                                GenericArguments: [Material.DiffuseValue]
                                    - !ShaderMixinSource
                                        Mixins:
                                            - !ShaderClassSource
                                                ClassName: MaterialSurfaceSetStreamFromComputeColor
                                                GenericArguments: [matBlend, r]
                                        Compositions:
                                            computeColorSource: !ShaderClassSource
                                                ClassName: ComputeColorConstantFloatLink
                                                GenericArguments: [Material.BlendValue]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceLightingAndShading
                Compositions:
                    surfaces: !ShaderArraySource
                        Values:
                            - !ShaderClassSource
                                ClassName: MaterialSurfaceShadingDiffuseLambert
                                GenericArguments: [false]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceSetStreamFromComputeColor
                        GenericArguments: [matBlend, r]
                Compositions:
                    computeColorSource: !ShaderClassSource
                        ClassName: ComputeColorConstantFloatLink
                        GenericArguments: [Material.BlendValue.i1]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceShadingBlend
                Compositions:
                    layers: !ShaderArraySource
                        Values:
                            - !ShaderMixinSource
                                Mixins:
                                    - !ShaderClassSource
                                        ClassName: MaterialSurfaceMetalness
                                Compositions:
                                    metalnessMap: !ShaderClassSource
                                        ClassName: ComputeColorConstantFloatLink
                                        GenericArguments: [Material.MetalnessValue]
                            - !ShaderMixinSource
                                Mixins:
                                    - !ShaderClassSource
                                        ClassName: MaterialSurfaceLightingAndShading
                                Compositions:
                                    surfaces: !ShaderArraySource
                                        Values:
                                            - !ShaderMixinSource
                                                Mixins:
                                                    - !ShaderClassSource
                                                        ClassName: MaterialSurfaceShadingSpecularMicrofacet
                                                Compositions:
                                                    environmentFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetEnvironmentGGXLUT
                                                    fresnelFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetFresnelSchlick
                                                    geometricShadowingFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetVisibilitySmithSchlickGGX
                                                    normalDistributionFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetNormalDistributionGGX"#;

pub const THREE_LAYERS_TWO_SHADING_MODELS: &str = r#"!ShaderMixinSource
Mixins:
    - !ShaderClassSource
        ClassName: MaterialSurfaceArray
Compositions:
    layers: !ShaderArraySource
        Values:
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceStreamsBlend
                Compositions:
                    blends: !ShaderArraySource
                        Values:
                            - !ShaderClassSource
                                ClassName: MaterialStreamLinearBlend
                                GenericArguments: [matDiffuse]
                            - !ShaderClassSource
                                ClassName: MaterialStreamLinearBlend
                                GenericArguments: [matColorBase]
                    layer: !ShaderMixinSource
                        Mixins:
                            - !ShaderClassSource
                                ClassName: MaterialSurfaceArray
                        Compositions:
                            layers: !ShaderArraySource
                                Values:
                                    - !ShaderMixinSource
                                        Mixins:
                                            - !ShaderClassSource
                                                ClassName: MaterialSurfaceDiffuse
                                        Compositions:
                                            diffuseMap: !ShaderClassSource
                                                ClassName: ComputeColorConstantColorLink
                                                GenericArguments: [Material.DiffuseValue]
                                    - !ShaderMixinSource
                                        Mixins:
                                            - !ShaderClassSource
                                                ClassName: MaterialSurfaceSetStreamFromComputeColor
                                                GenericArguments: [matBlend, r]
                                        Compositions:
                                            computeColorSource: !ShaderClassSource
                                                ClassName: ComputeColorConstantFloatLink
                                                GenericArguments: [Material.BlendValue]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceLightingAndShading
                Compositions:
                    surfaces: !ShaderArraySource
                        Values:
                            - !ShaderClassSource
                                ClassName: MaterialSurfaceShadingDiffuseLambert
                                GenericArguments: [false]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceSetStreamFromComputeColor
                        GenericArguments: [matBlend, r]
                Compositions:
                    computeColorSource: !ShaderClassSource
                        ClassName: ComputeColorConstantFloatLink
                        GenericArguments: [TestMaterialGenerator.BlendValueCustom1]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceShadingBlend
                Compositions:
                    layers: !ShaderArraySource
                        Values:
                            - !ShaderMixinSource
                                Mixins:
                                    - !ShaderClassSource
                                        ClassName: MaterialSurfaceMetalness
                                Compositions:
                                    metalnessMap: !ShaderClassSource
                                        ClassName: ComputeColorConstantFloatLink
                                        GenericArguments: [TestMaterialGenerator.MetalnessValueCustom1]
                            - !ShaderMixinSource
                                Mixins:
                                    - !ShaderClassSource
                                        ClassName: MaterialSurfaceStreamsBlend
                                Compositions:
                                    blends: !ShaderArraySource
                                        Values:
                                            - !ShaderClassSource
                                                ClassName: MaterialStreamLinearBlend
                                                GenericArguments: [matSpecular]
                                    layer: !ShaderMixinSource
                                        Mixins:
                                            - !ShaderClassSource
                                                ClassName: MaterialSurfaceArray
                                        Compositions:
                                            layers: !ShaderArraySource
                                                Values:
                                                    - !ShaderMixinSource
                                                        Mixins:
                                                            - !ShaderClassSource
                                                                ClassName: MaterialSurfaceMetalness
                                                        Compositions:
                                                            metalnessMap: !ShaderClassSource
                                                                ClassName: ComputeColorConstantFloatLink
                                                                GenericArguments: [TestMaterialGenerator.MetalnessValueCustom2]
                                                    - !ShaderMixinSource
                                                        Mixins:
                                                            - !ShaderClassSource
                                                                ClassName: MaterialSurfaceSetStreamFromComputeColor
                                                                GenericArguments: [matBlend, r]
                                                        Compositions:
                                                            computeColorSource: !ShaderClassSource
                                                                ClassName: ComputeColorConstantFloatLink
                                                                GenericArguments: [TestMaterialGenerator.BlendValueCustom2]
                            - !ShaderMixinSource
                                Mixins:
                                    - !ShaderClassSource
                                        ClassName: MaterialSurfaceLightingAndShading
                                Compositions:
                                    surfaces: !ShaderArraySource
                                        Values:
                                            - !ShaderMixinSource
                                                Mixins:
                                                    - !ShaderClassSource
                                                        ClassName: MaterialSurfaceShadingSpecularMicrofacet
                                                Compositions:
                                                    environmentFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetEnvironmentGGXLUT
                                                    fresnelFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetFresnelSchlick
                                                    geometricShadowingFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetVisibilitySmithSchlickGGX
                                                    normalDistributionFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetNormalDistributionGGX"#;

pub const TWO_LAYERS_THREE_SHADING_MODELS: &str = r#"!ShaderMixinSource
Mixins:
    - !ShaderClassSource
        ClassName: MaterialSurfaceArray
Compositions:
    layers: !ShaderArraySource
        Values:
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceDiffuse
                Compositions:
                    diffuseMap: !ShaderClassSource
                        ClassName: ComputeColorConstantColorLink
                        GenericArguments: [Material.DiffuseValue]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceLightingAndShading
                Compositions:
                    surfaces: !ShaderArraySource
                        Values:
                            - !ShaderClassSource
                                ClassName: MaterialSurfaceShadingDiffuseLambert
                                GenericArguments: [false]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceSetStreamFromComputeColor
                        GenericArguments: [matBlend, r]
                Compositions:
                    computeColorSource: !ShaderClassSource
                        ClassName: ComputeColorConstantFloatLink
                        GenericArguments: [TestMaterialGenerator.BlendValueCustom1]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceShadingBlend
                Compositions:
                    layers: !ShaderArraySource
                        Values:
                            - !ShaderMixinSource
                                Mixins:
                                    - !ShaderClassSource
                                        ClassName: MaterialSurfaceMetalness
                                Compositions:
                                    metalnessMap: !ShaderClassSource
                                        ClassName: ComputeColorConstantFloatLink
                                        GenericArguments: [Material.MetalnessValue]
                            - !ShaderMixinSource
                                Mixins:
                                    - !ShaderClassSource
                                        ClassName: MaterialSurfaceLightingAndShading
                                Compositions:
                                    surfaces: !ShaderArraySource
                                        Values:
                                            - !ShaderMixinSource
                                                Mixins:
                                                    - !ShaderClassSource
                                                        ClassName: MaterialSurfaceShadingSpecularMicrofacet
                                                Compositions:
                                                    environmentFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetEnvironmentGGXLUT
                                                    fresnelFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetFresnelSchlick
                                                    geometricShadowingFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetVisibilitySmithSchlickGGX
                                                    normalDistributionFunction: !ShaderClassSource
                                                        ClassName: MaterialSpecularMicrofacetNormalDistributionGGX
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceSetStreamFromComputeColor
                        GenericArguments: [matBlend, r]
                Compositions:
                    computeColorSource: !ShaderClassSource
                        ClassName: ComputeColorConstantFloatLink
                        GenericArguments: [TestMaterialGenerator.BlendValueCustom2]
            - !ShaderMixinSource
                Mixins:
                    - !ShaderClassSource
                        ClassName: MaterialSurfaceShadingBlend
                Compositions:
                    layers: !ShaderArraySource
                        Values:
                            - !ShaderMixinSource
                                Mixins:
                                    - !ShaderClassSource
                                        ClassName: MaterialSurfaceSetStreamFromComputeColor
                                        GenericArguments: [matEmissive, rgba]
                                Compositions:
                                    computeColorSource: !ShaderClassSource
                                        ClassName: ComputeColorConstantColorLink
                                        GenericArguments: [Material.EmissiveValue]
                            - !ShaderMixinSource
                                Mixins:
                                    - !ShaderClassSource
                                        ClassName: MaterialSurfaceSetStreamFromComputeColor
                                        GenericArguments: [matEmissiveIntensity, r]
                                Compositions:
                                    computeColorSource: !ShaderClassSource
                                        ClassName: ComputeColorConstantFloatLink
                                        GenericArguments: [Material.EmissiveIntensity]
                            - !ShaderClassSource
                                ClassName: MaterialSurfaceEmissiveShading
                                GenericArguments: [false]"#;
