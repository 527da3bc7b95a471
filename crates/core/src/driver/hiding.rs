//! Same-named ancestor members that a member hides instead of overriding.

use super::overrides::OverrideResolver;
use indexmap::IndexSet;
use mirrorgen_java::MemberRef;

/// Ancestor members with the same name as `member` that it does not
/// override. For two methods only those with the same erased parameter
/// list count; a method never hides a constructor.
pub fn collect_hidden_members(resolver: &OverrideResolver<'_>, member: MemberRef) -> IndexSet<MemberRef> {
    let symbols = resolver.symbols();
    let owner = symbols.member_owner(member);
    let name = symbols.member_name(member);
    let mut result = IndexSet::new();

    for ancestor in symbols.closure(owner) {
        if ancestor == owner {
            continue;
        }
        for candidate in symbols.members_named(ancestor, name) {
            if let MemberRef::Method(id) = candidate {
                if symbols.method(id).is_constructor() {
                    continue;
                }
            }
            if let (MemberRef::Method(child), MemberRef::Method(parent)) = (member, candidate) {
                if resolver.overrides_with_filter(child, parent) {
                    continue;
                }
                if !symbols.method(child).has_same_args(symbols.method(parent)) {
                    continue;
                }
            }
            result.insert(candidate);
        }
    }

    result
}
