//! Run-scoped state threaded through every generation phase.

use crate::config::GenerationConfig;
use crate::naming::{add_backticks_if_needed, mangle_class_name};
use mirrorgen_java::{ClassId, MemberRef, SymbolProvider};
use std::collections::{HashMap, HashSet};

/// Lookup tables for one generation run.
///
/// Discovery fills the depth map and the rename table, the whole-program
/// pass fills the mangle set, and rendering only reads.
pub struct GenerationContext<'a> {
    pub symbols: &'a dyn SymbolProvider,
    pub config: &'a GenerationConfig,
    /// Minimum discovery depth per reached class. Only populated when the
    /// traversal is depth-limited.
    depths: HashMap<ClassId, usize>,
    /// Member to replacement name.
    renames: HashMap<MemberRef, String>,
    /// Classes whose emitted name is the flattened binary name.
    mangled: HashSet<ClassId>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(symbols: &'a dyn SymbolProvider, config: &'a GenerationConfig) -> Self {
        let mut depths = HashMap::new();
        if config.max_depth.is_some() {
            depths.insert(symbols.object_class(), 0);
            depths.insert(symbols.string_class(), 0);
        }
        Self {
            symbols,
            config,
            depths,
            renames: HashMap::new(),
            mangled: HashSet::new(),
        }
    }

    pub fn is_depth_limited(&self) -> bool {
        self.config.max_depth.is_some()
    }

    pub fn max_depth(&self) -> usize {
        self.config.max_depth.unwrap_or(usize::MAX)
    }

    pub fn depth_of(&self, class: ClassId) -> Option<usize> {
        self.depths.get(&class).copied()
    }

    /// Keeps the first recorded depth; the queue is FIFO so it is the minimum.
    pub fn record_depth(&mut self, class: ClassId, depth: usize) {
        self.depths.entry(class).or_insert(depth);
    }

    pub fn is_reached(&self, class: ClassId) -> bool {
        self.depths.contains_key(&class)
    }

    pub fn reached_classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.depths.keys().copied()
    }

    pub fn rename_of(&self, member: MemberRef) -> Option<&str> {
        self.renames.get(&member).map(String::as_str)
    }

    pub fn set_rename(&mut self, member: MemberRef, name: String) {
        self.renames.insert(member, name);
    }

    pub fn renames(&self) -> &HashMap<MemberRef, String> {
        &self.renames
    }

    pub fn set_mangled(&mut self, mangled: HashSet<ClassId>) {
        self.mangled = mangled;
    }

    pub fn is_mangled(&self, class: ClassId) -> bool {
        self.mangled.contains(&class)
    }

    pub fn mangled(&self) -> &HashSet<ClassId> {
        &self.mangled
    }

    /// Emitted identifier of a class declaration.
    pub fn class_identifier(&self, class: ClassId) -> String {
        let model = self.symbols.class(class);
        if self.is_mangled(class) {
            mangle_class_name(&model.name)
        } else {
            add_backticks_if_needed(model.flat_name())
        }
    }
}
