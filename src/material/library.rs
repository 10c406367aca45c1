//! Lookup of materials referenced by name.

use crate::{io, material::descriptor::MaterialDescriptor};
use anyhow::{Result, anyhow};
use std::{collections::HashMap, fmt, path::Path, sync::Arc};

/// Finds the descriptors of materials referenced by name from blend layers.
pub trait MaterialAssetResolver: fmt::Debug + Send + Sync {
    /// Returns the descriptor of the material with the given name.
    ///
    /// # Errors
    /// Returns an error if no material with the given name is known.
    fn find_material(&self, name: &str) -> Result<Arc<MaterialDescriptor>>;
}

/// In-memory collection of material descriptors keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MaterialLibrary {
    materials: HashMap<String, Arc<MaterialDescriptor>>,
}

impl MaterialLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a list of material descriptors from the RON file at the given
    /// path and adds them to a new library.
    ///
    /// # Errors
    /// Returns an error if the file can not be read or parsed.
    pub fn from_ron_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let mut library = Self::new();
        library.load_ron_file(file_path)?;
        Ok(library)
    }

    /// Reads a list of material descriptors from the RON file at the given
    /// path and adds them to the library, replacing materials with the same
    /// names.
    ///
    /// # Errors
    /// Returns an error if the file can not be read or parsed.
    pub fn load_ron_file(&mut self, file_path: impl AsRef<Path>) -> Result<()> {
        let descriptors: Vec<MaterialDescriptor> = io::parse_ron_file(file_path)?;
        for descriptor in descriptors {
            self.add_material(descriptor);
        }
        Ok(())
    }

    /// Adds the given material under its name, replacing any material with
    /// the same name.
    pub fn add_material(&mut self, descriptor: MaterialDescriptor) {
        log::debug!("Adding material {} to library", descriptor.name);
        self.materials
            .insert(descriptor.name.clone(), Arc::new(descriptor));
    }

    pub fn get_material(&self, name: &str) -> Option<&Arc<MaterialDescriptor>> {
        self.materials.get(name)
    }

    pub fn n_materials(&self) -> usize {
        self.materials.len()
    }
}

impl MaterialAssetResolver for MaterialLibrary {
    fn find_material(&self, name: &str) -> Result<Arc<MaterialDescriptor>> {
        self.get_material(name)
            .cloned()
            .ok_or_else(|| anyhow!("Material {name} not present in library"))
    }
}
