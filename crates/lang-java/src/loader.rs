use crate::error::Result;
use crate::schema::UniverseSchema;
use crate::universe::Universe;
use std::path::Path;
use tracing::info;

/// Reads a JSON symbol universe from disk.
pub fn load_universe(path: &Path) -> Result<Universe> {
    let text = std::fs::read_to_string(path)?;
    let universe = parse_universe(&text)?;
    info!(
        "Loaded {} classes from {}",
        universe.len(),
        path.display()
    );
    Ok(universe)
}

pub fn parse_universe(json: &str) -> Result<Universe> {
    let schema: UniverseSchema = serde_json::from_str(json)?;
    Universe::from_schema(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JavaType, Modifier, PrimitiveType};
    use crate::provider::{ClassProvider, HierarchyProvider, MemberProvider, SymbolProvider};

    const SAMPLE: &str = r#"{
        "classes": [
            { "name": "a.Shape", "kind": "interface", "modifiers": ["public"],
              "members": [
                { "kind": "method", "name": "area", "returns": "double" },
                { "kind": "field", "name": "ORIGIN", "type": "int" }
              ] },
            { "name": "a.Circle", "modifiers": ["public"], "interfaces": ["a.Shape"],
              "members": [
                { "kind": "constructor", "modifiers": ["public"],
                  "parameters": [{ "name": "radius", "type": "double" }] },
                { "kind": "method", "name": "area", "modifiers": ["public"], "returns": "double" }
              ] }
        ]
    }"#;

    #[test]
    fn parses_and_normalizes_interface_members() {
        let universe = parse_universe(SAMPLE).unwrap();
        let shape = universe.find_class("a.Shape").unwrap();
        let area = universe.methods_named(shape, "area")[0];
        let area = universe.method(area);
        assert!(area.has(Modifier::Public));
        assert!(area.is_abstract());
        assert_eq!(area.return_type, JavaType::Primitive(PrimitiveType::Double));

        let origin = universe.class(shape).members[1].as_field().unwrap();
        let origin = universe.field(origin);
        assert!(origin.is_static() && origin.is_final());
    }

    #[test]
    fn classes_default_to_object_superclass() {
        let universe = parse_universe(SAMPLE).unwrap();
        let circle = universe.find_class("a.Circle").unwrap();
        let shape = universe.find_class("a.Shape").unwrap();
        assert_eq!(
            universe.direct_supertypes(circle),
            vec![universe.object_class(), shape]
        );
        assert!(universe.is_subclass(circle, universe.object_class()));
    }

    #[test]
    fn unknown_supertype_is_rejected() {
        let json = r#"{ "classes": [ { "name": "a.B", "superclass": "a.Missing" } ] }"#;
        assert!(parse_universe(json).is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("universe.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let universe = load_universe(&path).unwrap();
        assert_eq!(universe.len(), 4);
    }
}
