use mirrorgen_java::{
    ClassProvider, HierarchyProvider, JavaModelError, MemberProvider, SymbolProvider,
    UniverseBuilder,
};

#[test]
fn seeds_root_types_when_absent() {
    let universe = UniverseBuilder::new().build().unwrap();
    let object = universe.object_class();
    let string = universe.string_class();
    assert_eq!(universe.class(object).name, "java.lang.Object");
    assert_eq!(universe.class(string).name, "java.lang.String");
    assert!(universe.direct_supertypes(object).is_empty());
    assert_eq!(universe.direct_supertypes(string), vec![object]);
    assert_eq!(universe.methods_named(object, "toString").len(), 1);
}

#[test]
fn interfaces_report_object_before_super_interfaces() {
    let universe = UniverseBuilder::new()
        .interface("a.Top", |i| i.public())
        .interface("a.Left", |i| i.public().implements("a.Top"))
        .interface("a.Right", |i| i.public().implements("a.Top"))
        .class("a.Both", |c| c.public().implements("a.Left").implements("a.Right"))
        .build()
        .unwrap();

    let top = universe.find_class("a.Top").unwrap();
    let left = universe.find_class("a.Left").unwrap();
    let right = universe.find_class("a.Right").unwrap();
    let both = universe.find_class("a.Both").unwrap();
    let object = universe.object_class();

    assert_eq!(universe.direct_supertypes(top), vec![object]);
    assert_eq!(universe.direct_supertypes(left), vec![object, top]);

    let closure = universe.closure(both);
    assert_eq!(closure[0], both);
    for ancestor in [left, right, top, object] {
        assert_eq!(closure.iter().filter(|c| **c == ancestor).count(), 1);
    }

    assert!(universe.is_subclass(both, top));
    assert!(universe.is_subclass(both, both));
    assert!(!universe.is_subclass(top, both));
}

#[test]
fn nested_classes_keep_their_declared_simple_name() {
    let universe = UniverseBuilder::new()
        .class("a.Outer", |c| c.public())
        .class("a.Outer$Inner", |c| c.public().inner_of("a.Outer"))
        .class("a.Outer$Static", |c| c.public().nested_in("a.Outer"))
        .build()
        .unwrap();

    let inner = universe.class(universe.find_class("a.Outer$Inner").unwrap());
    assert_eq!(inner.simple_name, "Inner");
    assert_eq!(inner.flat_name(), "Outer$Inner");
    assert_eq!(inner.package(), "a");
    assert!(inner.has_outer_instance);

    let nested = universe.class(universe.find_class("a.Outer$Static").unwrap());
    assert!(!nested.has_outer_instance);
    assert!(nested.is_static());
}

#[test]
fn duplicate_and_cyclic_declarations_fail() {
    let duplicate = UniverseBuilder::new()
        .class("a.X", |c| c)
        .class("a.X", |c| c)
        .build();
    assert!(matches!(duplicate, Err(JavaModelError::DuplicateClass(_))));

    let cyclic = UniverseBuilder::new()
        .interface("a.P", |i| i.implements("a.Q"))
        .interface("a.Q", |i| i.implements("a.P"))
        .build();
    assert!(matches!(cyclic, Err(JavaModelError::CyclicInheritance(_))));
}

#[test]
fn signature_types_include_return_only_for_methods() {
    let universe = UniverseBuilder::new()
        .class("a.Box", |c| {
            c.public()
                .constructor(|m| m.public().param("a.Item"))
                .method("get", "a.Item[]", |m| m.public().param("int"))
        })
        .class("a.Item", |c| c.public())
        .build()
        .unwrap();

    let boxed = universe.find_class("a.Box").unwrap();
    let members = &universe.class(boxed).members;
    let ctor = universe.signature_types(members[0]);
    assert_eq!(ctor.len(), 1);
    let get = universe.signature_types(members[1]);
    assert_eq!(get.len(), 2);
    assert_eq!(
        universe.erased_class(get[1]),
        universe.find_class("a.Item")
    );
    let get_id = members[1].as_method().unwrap();
    assert_eq!(universe.method(get_id).name, "get");
}
