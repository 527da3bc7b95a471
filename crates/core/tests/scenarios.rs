use mirrorgen_core::GenerationConfig;
use mirrorgen_core::config::GenerationMode;
use mirrorgen_core::driver::{
    ClosureTraversal, DefaultMethodMerger, GenerationContext, MirrorGenerator, OverrideResolver,
};
use mirrorgen_core::driver::members::body_members;
use mirrorgen_core::emit::{EMIT_ERROR_PLACEHOLDER, Printer};
use mirrorgen_core::tree::{Expression, Literal};
use mirrorgen_java::{
    ClassProvider, MemberProvider, MemberRef, SymbolProvider, Universe, UniverseBuilder, parse_universe,
};

fn owners_and_names(universe: &Universe, members: &[MemberRef]) -> Vec<(String, String)> {
    members
        .iter()
        .map(|m| {
            let id = m.as_method().unwrap();
            let method = universe.method(id);
            (universe.class(method.owner).name.clone(), method.name.clone())
        })
        .collect()
}

#[test]
fn unrelated_defaults_are_each_synthesized_once() {
    let universe = UniverseBuilder::new()
        .interface("p.Left", |i| i.public().method("foo", "void", |m| m.default_()))
        .interface("p.Right", |i| {
            i.public()
                .method("foo", "void", |m| m.default_().param("int"))
                .method("bar", "void", |m| m.default_())
        })
        .class("p.Both", |c| {
            c.public()
                .implements("p.Left")
                .implements("p.Right")
                .constructor(|m| m.public())
        })
        .build()
        .unwrap();
    let config = GenerationConfig::default();
    let mut ctx = GenerationContext::new(&universe, &config);
    let both = universe.find_class("p.Both").unwrap();
    ClosureTraversal::new(&mut ctx).run(&[both]);

    let members = body_members(&ctx, both);
    let methods: Vec<MemberRef> = members
        .iter()
        .copied()
        .filter(|m| m.as_method().is_some_and(|id| !universe.method(id).is_constructor()))
        .collect();
    assert_eq!(
        owners_and_names(&universe, &methods),
        vec![
            ("p.Left".to_string(), "foo".to_string()),
            ("p.Right".to_string(), "foo".to_string()),
            ("p.Right".to_string(), "bar".to_string()),
        ]
    );
}

#[test]
fn same_signature_defaults_collapse_to_the_first() {
    let universe = UniverseBuilder::new()
        .interface("p.Left", |i| i.public().method("foo", "void", |m| m.default_()))
        .interface("p.Right", |i| i.public().method("foo", "void", |m| m.default_()))
        .class("p.Both", |c| c.public().implements("p.Left").implements("p.Right"))
        .build()
        .unwrap();
    let merger = DefaultMethodMerger::new(OverrideResolver::new(&universe));
    let merged = merger.merged_default_methods(universe.find_class("p.Both").unwrap());
    assert_eq!(merged.len(), 1);
    assert_eq!(universe.class(universe.method(merged[0]).owner).name, "p.Left");
}

#[test]
fn diamond_default_appears_once_attributed_to_the_ancestor() {
    let universe = UniverseBuilder::new()
        .interface("p.Base", |i| i.public().method("bar", "void", |m| m.default_()))
        .interface("p.A", |i| i.public().implements("p.Base"))
        .interface("p.B", |i| i.public().implements("p.Base"))
        .class("p.C", |c| c.public().implements("p.A").implements("p.B"))
        .build()
        .unwrap();
    let merger = DefaultMethodMerger::new(OverrideResolver::new(&universe));
    let c = universe.find_class("p.C").unwrap();

    let merged = merger.merged_default_methods(c);
    assert_eq!(merged.len(), 1);
    assert_eq!(universe.class(universe.method(merged[0]).owner).name, "p.Base");

    let diamonds = merger.diamond_default_methods(c);
    assert_eq!(diamonds.len(), 1);
    assert!(diamonds.contains(&merged[0]));
}

#[test]
fn conflicting_defaults_emit_one_stub_from_the_first_interface() {
    let universe = UniverseBuilder::new()
        .interface("p.Left", |i| i.public().method("greet", "java.lang.String", |m| m.default_()))
        .interface("p.Right", |i| i.public().method("greet", "int", |m| m.default_()))
        .class("p.Both", |c| {
            c.public()
                .implements("p.Left")
                .implements("p.Right")
                .constructor(|m| m.public())
        })
        .build()
        .unwrap();
    let config = GenerationConfig::default();
    let mut ctx = GenerationContext::new(&universe, &config);
    let both = universe.find_class("p.Both").unwrap();
    ClosureTraversal::new(&mut ctx).run(&[both]);
    let methods: Vec<MemberRef> = body_members(&ctx, both)
        .into_iter()
        .filter(|m| m.as_method().is_some_and(|id| !universe.method(id).is_constructor()))
        .collect();
    assert_eq!(
        owners_and_names(&universe, &methods),
        vec![("p.Left".to_string(), "greet".to_string())]
    );

    let output = MirrorGenerator::new(&universe, &config).generate(&["p.Both"]).unwrap();
    let unit = output.units.iter().find(|u| u.path.ends_with("/Both.cj")).unwrap();
    assert_eq!(unit.text.matches("func greet(").count(), 1, "{}", unit.text);
    assert!(!unit.text.contains("Int32"), "{}", unit.text);
}

#[test]
fn diamond_defaults_get_a_stub_below_an_ancestor_that_declares_them() {
    let universe = UniverseBuilder::new()
        .interface("p.Base", |i| i.public().method("bar", "void", |m| m.default_()))
        .interface("p.A", |i| i.public().implements("p.Base"))
        .interface("p.B", |i| i.public().implements("p.Base"))
        .class("p.Impl", |c| c.public().implements("p.A").constructor(|m| m.public()))
        .class("p.Sub", |c| {
            c.public()
                .extends("p.Impl")
                .implements("p.A")
                .implements("p.B")
                .constructor(|m| m.public())
        })
        .build()
        .unwrap();
    let merger = DefaultMethodMerger::new(OverrideResolver::new(&universe));
    let sub = universe.find_class("p.Sub").unwrap();
    assert!(merger.merged_default_methods(sub).is_empty());
    assert_eq!(merger.diamond_default_methods(sub).len(), 1);

    let config = GenerationConfig::default();
    let output = MirrorGenerator::new(&universe, &config).generate(&["p.Sub"]).unwrap();
    for file in ["/Impl.cj", "/Sub.cj"] {
        let unit = output.units.iter().find(|u| u.path.ends_with(file)).unwrap();
        assert_eq!(unit.text.matches("func bar(").count(), 1, "{}", unit.text);
    }
}

#[test]
fn defaults_are_synthesized_at_the_first_class_only() {
    let universe = UniverseBuilder::new()
        .interface("p.Api", |i| i.public().method("ping", "void", |m| m.default_()))
        .class("p.Impl", |c| c.public().implements("p.Api"))
        .class("p.Sub", |c| c.public().extends("p.Impl").implements("p.Api"))
        .build()
        .unwrap();
    let merger = DefaultMethodMerger::new(OverrideResolver::new(&universe));
    assert_eq!(merger.merged_default_methods(universe.find_class("p.Impl").unwrap()).len(), 1);
    assert!(merger.merged_default_methods(universe.find_class("p.Sub").unwrap()).is_empty());
}

#[test]
fn overridden_defaults_are_not_merged() {
    let universe = UniverseBuilder::new()
        .interface("p.Api", |i| i.public().method("ping", "void", |m| m.default_()))
        .class("p.Impl", |c| {
            c.public()
                .implements("p.Api")
                .method("ping", "void", |m| m.public())
        })
        .build()
        .unwrap();
    let merger = DefaultMethodMerger::new(OverrideResolver::new(&universe));
    assert!(merger.merged_default_methods(universe.find_class("p.Impl").unwrap()).is_empty());
}

#[test]
fn widgets_in_two_packages_are_mangled_in_one_package_mode() {
    let universe = UniverseBuilder::new()
        .class("a.Widget", |c| c.public().constructor(|m| m.public()))
        .class("b.Widget", |c| c.public().constructor(|m| m.public()))
        .build()
        .unwrap();
    let config = GenerationConfig {
        one_package: true,
        package_name: "lib".to_string(),
        ..GenerationConfig::default()
    };
    let output = MirrorGenerator::new(&universe, &config)
        .generate(&["a.Widget", "b.Widget"])
        .unwrap();

    let paths: Vec<&str> = output.units.iter().map(|u| u.path.as_str()).collect();
    assert_eq!(paths, vec!["lib/src/a_Widget.cj", "lib/src/b_Widget.cj"]);
    assert!(output.units[0].text.contains("class a_Widget {"));
    assert!(output.units[1].text.contains("class b_Widget {"));
    assert!(output.units.iter().all(|u| !u.text.contains("class Widget")));
    assert!(output.collisions.is_empty());
}

#[test]
fn static_redefinition_with_new_return_type_gets_both_suffixes() {
    let universe = UniverseBuilder::new()
        .class("p.Alpha", |c| c.public())
        .class("p.Beta", |c| c.public())
        .class("p.Gamma", |c| c.public())
        .class("p.Base", |c| {
            c.public()
                .method("make", "p.Alpha", |m| m.public().static_())
                .method("make", "p.Beta", |m| m.public().param("int"))
        })
        .class("p.Sub", |c| {
            c.public()
                .extends("p.Base")
                .method("make", "p.Gamma", |m| m.public().static_())
        })
        .build()
        .unwrap();
    let config = GenerationConfig::default();
    let mut ctx = GenerationContext::new(&universe, &config);
    let sub = universe.find_class("p.Sub").unwrap();
    ClosureTraversal::new(&mut ctx).run(&[sub]);

    let base = universe.find_class("p.Base").unwrap();
    let sub_make = universe.methods_named(sub, "make")[0];
    let base_makes = universe.methods_named(base, "make");

    assert_eq!(ctx.rename_of(MemberRef::Method(sub_make)), Some("makeStatic_p_Gamma"));
    assert_eq!(ctx.rename_of(MemberRef::Method(base_makes[0])), Some("makeStatic"));
    assert_eq!(ctx.rename_of(MemberRef::Method(base_makes[1])), None);
}

#[test]
fn argument_constructors_still_get_a_no_argument_init() {
    let universe = UniverseBuilder::new()
        .class("p.Point", |c| c.public().constructor(|m| m.public().param("int")))
        .build()
        .unwrap();
    let config = GenerationConfig::default();
    let output = MirrorGenerator::new(&universe, &config).generate(&["p.Point"]).unwrap();
    let text = &output.units[0].text;
    assert!(text.contains("    public init(p0: Int32)\n\n    public init()\n}"), "{text}");
}

#[test]
fn definition_mode_only_adds_init_when_missing() {
    let universe = UniverseBuilder::new()
        .class("p.Point", |c| c.public().constructor(|m| m.public()))
        .build()
        .unwrap();
    let config = GenerationConfig {
        mode: GenerationMode::Definition,
        ..GenerationConfig::default()
    };
    let output = MirrorGenerator::new(&universe, &config).generate(&["p.Point"]).unwrap();
    let text = &output.units[0].text;
    assert_eq!(text.matches("init()").count(), 1, "{text}");
    assert!(text.contains("public init() { }"));
}

#[test]
fn string_literals_escape_quotes_and_newlines() {
    let literal = Expression::Literal(Literal::Str("say \"hi\"\nbye".to_string()));
    let text = Printer.emit(&literal).text().to_string();
    assert_eq!(text, "\"say \\\"hi\\\"\\nbye\"");
    assert!(!text.contains('\n'));
}

#[test]
fn inner_constructor_without_enclosing_class_renders_a_placeholder() {
    let universe = parse_universe(
        r#"{ "classes": [
            { "name": "p.Orphan", "modifiers": ["public"], "outer_instance": true,
              "members": [
                { "kind": "constructor", "modifiers": ["public"] },
                { "kind": "method", "name": "run", "modifiers": ["public"], "returns": "void" }
              ] } ] }"#,
    )
    .unwrap();
    let config = GenerationConfig::default();
    let output = MirrorGenerator::new(&universe, &config).generate(&["p.Orphan"]).unwrap();

    let text = &output.units[0].text;
    assert_eq!(text.matches(EMIT_ERROR_PLACEHOLDER).count(), 1, "{text}");
    assert!(!text.contains("init("), "{text}");
    assert!(text.contains("public open func run(): Unit"), "{text}");
}
