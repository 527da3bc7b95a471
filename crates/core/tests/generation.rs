use mirrorgen_core::config::{GenerationMode, OverrideMethodRequest, OverrideSetRequest};
use mirrorgen_core::{GenerationConfig, MirrorError, MirrorGenerator};
use mirrorgen_java::{Modifier, Universe, UniverseBuilder};

fn widget_universe() -> Universe {
    UniverseBuilder::new()
        .class("q.sub.Owner", |c| c.public())
        .class("p.Widget", |c| {
            c.public()
                .field("count", "int", &[Modifier::Public])
                .constructor(|m| m.public())
                .method("run", "void", |m| m.public())
                .method("size", "int", |m| m.public().final_())
        })
        .class("p.Holder", |c| {
            c.public()
                .constructor(|m| m.public())
                .method("owner", "q.sub.Owner", |m| m.public())
        })
        .class("p.Outer", |c| c.public())
        .class("p.Outer$Inner", |c| {
            c.public()
                .inner_of("p.Outer")
                .constructor(|m| m.public().param("int"))
        })
        .class("p.Hidden", |c| c)
        .interface("p.Api", |i| {
            i.public()
                .method("greet", "java.lang.String", |m| m.default_())
                .method("run", "void", |m| m)
        })
        .class("p.Impl", |c| {
            c.public()
                .implements("p.Api")
                .constructor(|m| m.public())
                .method("run", "void", |m| m.public())
        })
        .build()
        .unwrap()
}

#[test]
fn renders_a_plain_class() {
    let universe = widget_universe();
    let config = GenerationConfig::default();
    let output = MirrorGenerator::new(&universe, &config).generate(&["p.Widget"]).unwrap();

    assert_eq!(output.units.len(), 1);
    let unit = &output.units[0];
    assert_eq!(unit.path, "UNNAMED/src/p/Widget.cj");
    assert_eq!(
        unit.text,
        "package p\n\
         \n\
         import java.lang.*\n\
         \n\
         public open class Widget {\n\
         \x20   public var count: Int32\n\
         \n\
         \x20   public init()\n\
         \n\
         \x20   public open func run(): Unit\n\
         \n\
         \x20   public func size(): Int32\n\
         }"
    );
}

#[test]
fn references_across_packages_are_imported() {
    let universe = widget_universe();
    let config = GenerationConfig::default();
    let output = MirrorGenerator::new(&universe, &config).generate(&["p.Holder"]).unwrap();

    let paths: Vec<&str> = output.units.iter().map(|u| u.path.as_str()).collect();
    assert_eq!(paths, vec!["UNNAMED/src/p/Holder.cj", "UNNAMED/src/q/sub/Owner.cj"]);

    let holder = &output.units[0].text;
    assert!(holder.contains("import java.lang.*\nimport q.sub.Owner\n"), "{holder}");
    assert!(holder.contains("public open func owner(): ?Owner"));
}

#[test]
fn one_package_mode_drops_explicit_imports() {
    let universe = widget_universe();
    let config = GenerationConfig {
        one_package: true,
        ..GenerationConfig::default()
    };
    let output = MirrorGenerator::new(&universe, &config).generate(&["p.Holder"]).unwrap();
    let holder = &output.units[0];
    assert_eq!(holder.path, "UNNAMED/src/Holder.cj");
    assert!(holder.text.starts_with("package UNNAMED\n\nimport java.lang.*\n\n@JavaMirror[\"p.Holder\"]\n"));
    assert!(!holder.text.contains("import q.sub.Owner"));
}

#[test]
fn inner_class_constructors_take_the_outer_instance() {
    let universe = widget_universe();
    let config = GenerationConfig::default();
    let output = MirrorGenerator::new(&universe, &config).generate(&["p.Outer$Inner"]).unwrap();
    let unit = &output.units[0];
    assert_eq!(unit.path, "UNNAMED/src/p/Outer$Inner.cj");
    assert!(unit.text.contains("public open class Outer_Inner {"));
    assert!(unit.text.contains("    public init(p0: Outer, p1: Int32)\n"));
    assert!(unit.text.contains("    public init(p0: ?Outer)\n"));
}

#[test]
fn interfaces_carry_default_annotations_in_one_package_mode() {
    let universe = widget_universe();
    let config = GenerationConfig {
        one_package: true,
        package_name: "lib".to_string(),
        ..GenerationConfig::default()
    };
    let output = MirrorGenerator::new(&universe, &config).generate(&["p.Impl"]).unwrap();
    let names: Vec<&str> = output.units.iter().map(|u| u.binary_name.as_str()).collect();
    assert_eq!(names, vec!["p.Impl", "p.Api"]);

    assert_eq!(
        output.units[1].text,
        "package lib\n\
         \n\
         import java.lang.*\n\
         \n\
         @JavaMirror[\"p.Api\"]\n\
         public interface Api {\n\
         \x20   @JavaHasDefault\n\
         \x20   func greet(): ?JString\n\
         \n\
         \x20   func run(): Unit\n\
         }"
    );

    let implementation = &output.units[0].text;
    assert!(implementation.contains("public open class Impl <: Api {"));
    assert!(implementation.contains("    public open func run(): Unit\n"));
    assert!(implementation.contains("    public open func greet(): ?JString\n"));
}

#[test]
fn definition_mode_synthesizes_bodies() {
    let universe = UniverseBuilder::new()
        .class("p.Calc", |c| {
            c.public()
                .field("scale", "double", &[Modifier::Public])
                .constructor(|m| m.public())
                .method("sum", "int", |m| m.public().param("int").param("int"))
                .method("label", "java.lang.String", |m| m.public())
                .method("toString", "java.lang.String", |m| m.public())
                .method("reset", "void", |m| m.public())
        })
        .build()
        .unwrap();
    let config = GenerationConfig {
        mode: GenerationMode::Definition,
        ..GenerationConfig::default()
    };
    let output = MirrorGenerator::new(&universe, &config).generate(&["p.Calc"]).unwrap();
    let text = &output.units[0].text;

    assert!(text.contains("public open class Calc <: JObject {"), "{text}");
    assert!(text.contains("    public var scale: Float64 = 0.0\n"));
    assert!(text.contains("    public init() { }\n"));
    assert!(text.contains("    public open func sum(p0: Int32, p1: Int32): Int32 {\n        0\n    }"));
    assert!(text.contains("    public open func label(): ?JString {\n        None\n    }"));
    assert!(text.contains("    public open func toJString(): JString {\n        JString()\n    }"));
    assert!(text.contains("    public open func reset(): Unit { }"));
}

#[test]
fn mangled_names_that_meet_are_reported() {
    let universe = UniverseBuilder::new()
        .class("a.b_C", |c| c.public())
        .class("a_b.C", |c| c.public())
        .class("x.C", |c| c.public())
        .class("y.b_C", |c| c.public())
        .build()
        .unwrap();
    let config = GenerationConfig {
        one_package: true,
        ..GenerationConfig::default()
    };
    let output = MirrorGenerator::new(&universe, &config)
        .generate(&["a.b_C", "a_b.C", "x.C", "y.b_C"])
        .unwrap();

    assert_eq!(output.collisions.len(), 1);
    assert_eq!(output.collisions[0].path, "UNNAMED/src/a_b_C.cj");
    assert_eq!(output.collisions[0].classes, vec!["a.b_C", "a_b.C"]);
}

#[test]
fn import_config_lines_name_the_mirror() {
    let universe = widget_universe();
    let config = GenerationConfig {
        emit_import_config: true,
        package_name: "mirrors".to_string(),
        ..GenerationConfig::default()
    };
    let output = MirrorGenerator::new(&universe, &config)
        .generate(&["p.Widget", "p.Outer$Inner"])
        .unwrap();
    assert_eq!(
        output.import_config,
        vec!["p.Widget mirrors.Widget", "p.Outer$Inner mirrors.Outer_Inner"]
    );
}

#[test]
fn renamed_imports_are_referenced_but_not_generated() {
    let universe = widget_universe();
    let mut config = GenerationConfig::default();
    config
        .import_renames
        .insert("q.sub.Owner".to_string(), "ext.pkg.Owner".to_string());
    let output = MirrorGenerator::new(&universe, &config).generate(&["p.Holder"]).unwrap();

    assert_eq!(output.units.len(), 1);
    assert_eq!(output.visited.len(), 2);
    let text = &output.units[0].text;
    assert!(text.contains("import ext.pkg.Owner"), "{text}");
    assert!(text.contains("func owner(): ?Owner"));
}

#[test]
fn configuration_errors_fail_the_run() {
    let universe = widget_universe();
    let config = GenerationConfig::default();
    let generator = MirrorGenerator::new(&universe, &config);
    assert!(matches!(generator.generate(&["p.Missing"]), Err(MirrorError::UnknownRoot(_))));
    assert!(matches!(generator.generate(&["p.Hidden"]), Err(MirrorError::RootNotEligible(_))));

    let config = GenerationConfig {
        override_sets: vec![OverrideSetRequest {
            class: "p.Api".to_string(),
            methods: vec![OverrideMethodRequest {
                name: "run".to_string(),
                parameters: vec![],
            }],
        }],
        ..GenerationConfig::default()
    };
    let result = MirrorGenerator::new(&universe, &config).generate(&["p.Widget"]);
    assert!(matches!(result, Err(MirrorError::InterfaceNotAllowed(_))));
}

#[test]
fn override_sets_are_resolved_with_the_run() {
    let universe = widget_universe();
    let config = GenerationConfig {
        override_sets: vec![OverrideSetRequest {
            class: "p.Widget".to_string(),
            methods: vec![
                OverrideMethodRequest {
                    name: "size".to_string(),
                    parameters: vec![],
                },
                OverrideMethodRequest {
                    name: "run".to_string(),
                    parameters: vec![],
                },
            ],
        }],
        ..GenerationConfig::default()
    };
    let output = MirrorGenerator::new(&universe, &config).generate(&["p.Widget"]).unwrap();
    assert_eq!(output.override_sets.len(), 1);
    let bits: Vec<u32> = output.override_sets[0].slots.iter().map(|s| s.bit).collect();
    assert_eq!(bits, vec![0, 1]);
}
