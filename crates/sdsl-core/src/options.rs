//! Compilation options.

/// Options controlling what a compilation run emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Emit `OpName` for variables, functions and parameters
    pub debug_names: bool,
    /// Emit `OpName` with the canonical id for every registered type
    pub type_names: bool,
}

impl CompileOptions {
    /// Create options with every debug name enabled.
    pub fn new() -> Self {
        Self {
            debug_names: true,
            type_names: true,
        }
    }

    /// Disable debug names for variables, functions and parameters.
    pub fn without_debug_names(mut self) -> Self {
        self.debug_names = false;
        self
    }

    /// Disable canonical type names.
    pub fn without_type_names(mut self) -> Self {
        self.type_names = false;
        self
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::new()
    }
}
