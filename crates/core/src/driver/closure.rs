//! Worklist discovery of every class a set of roots needs mirrored.

use super::context::GenerationContext;
use super::mangle::rename_clashes;
use super::members::body_members;
use super::visibility::is_class_generated;
use indexmap::IndexSet;
use mirrorgen_java::{ClassId, MemberRef};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Breadth-first traversal from the roots through member signatures and
/// supertypes. Also runs the per-class rename pass as classes are visited.
pub struct ClosureTraversal<'c, 'a> {
    ctx: &'c mut GenerationContext<'a>,
    queue: VecDeque<ClassId>,
    visited: IndexSet<ClassId>,
}

impl<'c, 'a> ClosureTraversal<'c, 'a> {
    pub fn new(ctx: &'c mut GenerationContext<'a>) -> Self {
        Self {
            ctx,
            queue: VecDeque::new(),
            visited: IndexSet::new(),
        }
    }

    /// Visits everything reachable from `roots` and returns the visited
    /// classes in discovery order.
    pub fn run(mut self, roots: &[ClassId]) -> IndexSet<ClassId> {
        for root in roots.iter().copied() {
            if self.ctx.is_depth_limited() {
                self.ctx.record_depth(root, 0);
            }
            self.queue.push_back(root);
        }

        while let Some(class) = self.queue.pop_front() {
            if self.visited.insert(class) {
                self.visit(class);
            }
        }

        info!("Closure of {} root(s) contains {} class(es)", roots.len(), self.visited.len());
        self.visited
    }

    fn visit(&mut self, class: ClassId) {
        let symbols = self.ctx.symbols;
        if !is_class_generated(symbols, class) {
            return;
        }
        debug!("Traversing {}", symbols.class(class).name);

        rename_clashes(self.ctx, class);

        let next = self.ctx.depth_of(class).map(|depth| depth + 1);

        for member in body_members(self.ctx, class) {
            match member {
                MemberRef::Method(id) => {
                    let method = symbols.method(id);
                    for ty in method.parameter_types() {
                        self.enqueue(symbols.erased_class(ty), next);
                    }
                    if !method.is_constructor() {
                        self.enqueue(symbols.erased_class(&method.return_type), next);
                    }
                }
                MemberRef::Field(id) => {
                    self.enqueue(symbols.erased_class(&symbols.field(id).ty), next);
                }
            }
        }

        for supertype in symbols.direct_supertypes(class) {
            self.enqueue(Some(supertype), next);
        }
    }

    fn enqueue(&mut self, class: Option<ClassId>, level: Option<usize>) {
        let Some(class) = class else { return };
        if level.is_some_and(|level| level > self.ctx.max_depth()) {
            return;
        }
        let symbols = self.ctx.symbols;
        if class == symbols.object_class() || class == symbols.string_class() {
            return;
        }
        if !is_class_generated(symbols, class) {
            return;
        }
        self.queue.push_back(class);
        if let Some(level) = level {
            self.ctx.record_depth(class, level);
        }
    }
}
