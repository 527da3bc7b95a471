//! Mirror synthesis: discovery, override analysis, renaming and tree building.

pub mod builder;
pub mod closure;
pub mod context;
pub mod defaults;
pub mod generator;
pub mod hiding;
pub mod mangle;
pub mod members;
pub mod override_set;
pub mod overrides;
pub mod types;
pub mod visibility;

pub use builder::{EmittedName, MirrorBuilder};
pub use closure::ClosureTraversal;
pub use context::GenerationContext;
pub use defaults::DefaultMethodMerger;
pub use generator::{GeneratedUnit, GenerationOutput, MirrorGenerator, OutputCollision};
pub use hiding::collect_hidden_members;
pub use mangle::{HASH_CODE_RENAME, STATIC_SUFFIX, TO_STRING_RENAME, compute_mangle_set, rename_clashes};
pub use override_set::{OverrideSet, OverrideSlot};
pub use overrides::{OverrideChain, OverrideResolver};
pub use types::TypeMapper;
