use crate::RunArgs;
use mirrorgen_core::MirrorGenerator;
use mirrorgen_java::{ClassKind, SymbolProvider, load_universe};
use tabled::{Table, Tabled};
use tracing::info;

#[derive(Tabled)]
struct ClassRow {
    #[tabled(rename = "Class")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Imported")]
    imported: bool,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.to_config()?;
    let universe = load_universe(&args.universe)?;
    let symbols: &dyn SymbolProvider = &universe;

    let visited = MirrorGenerator::new(symbols, &config).closure(&args.roots)?;
    info!("{} class(es) reachable from {} root(s)", visited.len(), args.roots.len());

    let rows: Vec<ClassRow> = visited
        .iter()
        .map(|id| {
            let class = symbols.class(*id);
            ClassRow {
                name: class.name.clone(),
                kind: match class.kind {
                    ClassKind::Class => "class",
                    ClassKind::Interface => "interface",
                    ClassKind::Annotation => "annotation",
                },
                imported: config.import_renames.contains_key(&class.name),
            }
        })
        .collect();

    if rows.is_empty() {
        println!("No classes reached.");
    } else {
        println!("{}", Table::new(rows));
    }
    Ok(())
}
