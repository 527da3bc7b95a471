use super::{CompilationUnit, NodeRef};
use crate::naming::QualifiedName;
use indexmap::IndexSet;

/// Pre-order walk calling `visit` on every node.
pub fn scan<'a>(node: NodeRef<'a>, visit: &mut impl FnMut(NodeRef<'a>)) {
    visit(node);
    for child in node.children() {
        scan(child, visit);
    }
}

/// Names referenced anywhere in `unit` that need an explicit import from
/// `package`, sorted by their dotted form.
pub fn collect_imports(unit: &CompilationUnit, package: &QualifiedName) -> Vec<QualifiedName> {
    let mut seen = IndexSet::new();
    scan(NodeRef::Unit(unit), &mut |node| {
        if let NodeRef::Name(name) = node {
            seen.extend(name.imports.iter().cloned());
        }
    });

    let mut imports: Vec<QualifiedName> = seen
        .into_iter()
        .filter(|name| name.requires_import() && !name.is_from_package(package))
        .collect();
    imports.sort();
    imports
}
