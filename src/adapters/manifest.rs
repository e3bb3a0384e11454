//! Loader that walks a statically declared module tree.
//!
//! A [`Module`] lists the components declared directly in it and its child
//! modules. [`ManifestLoader`] walks the tree depth-first, registering every
//! component under the root module's name as its library unless an explicit
//! library is given.

use crate::domain::Constructor;
use crate::ports::loader::validate_module_path;
use crate::ports::{DiscoveredComponent, DiscoveryResult, Loader};

#[derive(Debug, Clone)]
struct Declaration {
    name: Option<String>,
    constructor: Constructor,
}

/// A module in a component tree.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    declarations: Vec<Declaration>,
    children: Vec<Module>,
}

impl Module {
    /// Creates an empty module.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Declares a component keyed by its type name.
    #[must_use]
    pub fn component(mut self, constructor: impl Into<Constructor>) -> Self {
        self.declarations.push(Declaration {
            name: None,
            constructor: constructor.into(),
        });
        self
    }

    /// Declares a component under an explicit key.
    #[must_use]
    pub fn named_component(
        mut self,
        name: impl Into<String>,
        constructor: impl Into<Constructor>,
    ) -> Self {
        self.declarations.push(Declaration {
            name: Some(name.into()),
            constructor: constructor.into(),
        });
        self
    }

    /// Adds a child module.
    #[must_use]
    pub fn child(mut self, module: Self) -> Self {
        self.children.push(module);
        self
    }

    /// Returns the module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Discovers every component in a [`Module`] tree.
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    root: Module,
    library: Option<String>,
    label: Option<String>,
}

impl ManifestLoader {
    /// Creates a loader over the tree rooted at `root`.
    #[must_use]
    pub const fn new(root: Module) -> Self {
        Self {
            root,
            library: None,
            label: None,
        }
    }

    /// Registers every component under `library` instead of the root name.
    #[must_use]
    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }

    /// Registers every component with `label`.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn walk(
        &self,
        module: &Module,
        path: &str,
        discovered: &mut Vec<DiscoveredComponent>,
    ) -> DiscoveryResult<()> {
        validate_module_path(path)?;
        for declaration in &module.declarations {
            let key = declaration
                .name
                .as_deref()
                .unwrap_or_else(|| declaration.constructor.short_name());
            let mut component =
                DiscoveredComponent::new(path, key, declaration.constructor.clone())?;
            if let Some(library) = &self.library {
                component = component.with_library(library.clone());
            }
            if let Some(label) = &self.label {
                component = component.with_label(label.clone());
            }
            discovered.push(component);
        }

        for child in &module.children {
            self.walk(child, &format!("{path}::{}", child.name), discovered)?;
        }
        Ok(())
    }
}

impl Loader for ManifestLoader {
    fn discover(&self) -> DiscoveryResult<Vec<DiscoveredComponent>> {
        let mut discovered = Vec::new();
        self.walk(&self.root, &self.root.name, &mut discovered)?;
        Ok(discovered)
    }
}
