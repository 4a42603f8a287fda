//! Resolution options

use smol_str::SmolStr;

/// Step bound used when neither the config nor the host can size the walk
pub const DEFAULT_MAX_RESOLVE_STEPS: usize = 64;

/// Options for the alias resolution walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveConfig {
    /// Fixed upper bound on lookup steps taken by a single `fully_resolve` call.
    ///
    /// `None` lets the host derive the bound from the workspace it resolves
    /// against. A bound of 0 is treated as 1, so a walk always performs its
    /// first lookup.
    pub max_resolve_steps: Option<usize>,
    /// Name of the built-in root module
    pub kernel_module: SmolStr,
    /// File name that defines the built-in root module
    pub kernel_file_name: SmolStr,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            max_resolve_steps: None,
            kernel_module: SmolStr::new_static("Kernel"),
            kernel_file_name: SmolStr::new_static("kernel.ex"),
        }
    }
}

impl ResolveConfig {
    /// Override the derived step bound with a fixed one
    pub fn with_max_resolve_steps(mut self, steps: usize) -> Self {
        self.max_resolve_steps = Some(steps);
        self
    }

    /// Whether `scope_file` and `alias_name` name the root module inside its own defining file
    pub fn is_kernel_self_reference(&self, scope_file: &str, alias_name: &str) -> bool {
        scope_file == self.kernel_file_name && alias_name == self.kernel_module
    }
}
