use crate::RunArgs;
use crate::output::{write_import_config, write_units};
use mirrorgen_core::MirrorGenerator;
use mirrorgen_core::driver::OverrideSet;
use mirrorgen_java::{SymbolProvider, load_universe};
use nu_ansi_term::Color;
use std::path::Path;
use tabled::{Table, Tabled};
use tracing::info;

#[derive(Tabled)]
struct SlotRow {
    #[tabled(rename = "Base")]
    base: String,
    #[tabled(rename = "Bit")]
    bit: u32,
    #[tabled(rename = "Method")]
    method: String,
}

pub fn run(args: &RunArgs, output: &Path, import_config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = args.to_config()?;
    config.emit_import_config |= import_config.is_some();

    info!("Loading symbol universe from {}...", args.universe.display());
    let universe = load_universe(&args.universe)?;

    let result = MirrorGenerator::new(&universe, &config).generate(&args.roots)?;
    let written = write_units(output, &result.units)?;
    info!("Wrote {} file(s) under {}", written, output.display());
    println!(
        "Generated {} mirror(s) for {} visited class(es).",
        written,
        result.visited.len()
    );

    if let Some(path) = import_config {
        write_import_config(path, &result.import_config)?;
        info!("Import config written to {}", path.display());
    }

    for collision in &result.collisions {
        println!(
            "{} {} is written by: {}",
            Color::Yellow.bold().paint("warning:"),
            collision.path,
            collision.classes.join(", ")
        );
    }

    if !result.override_sets.is_empty() {
        println!("{}", Table::new(slot_rows(&universe, &result.override_sets)));
    }
    Ok(())
}

fn slot_rows(symbols: &dyn SymbolProvider, sets: &[OverrideSet]) -> Vec<SlotRow> {
    sets.iter()
        .flat_map(|set| {
            let base = symbols.class(set.base).name.clone();
            set.slots.iter().map(move |slot| {
                let method = symbols.method(slot.method);
                let params: Vec<String> = method.parameter_types().map(|ty| ty.to_string()).collect();
                SlotRow {
                    base: base.clone(),
                    bit: slot.bit,
                    method: format!("{}({})", method.name, params.join(", ")),
                }
            })
        })
        .collect()
}
