use std::env;
use std::fs;
use std::path::PathBuf;

const EXPONENT_COLUMNS: usize = 8;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let out_dir = env::var("OUT_DIR").unwrap();

    println!("cargo:rerun-if-changed=units.csv");

    let units = parse_units_csv(&crate_dir);
    check_unique_symbols(&units);
    generate_unit_table(&units, &out_dir);
}

#[derive(Debug, Clone)]
struct UnitRow {
    symbol: String,
    name: String,
    exponents: [i32; EXPONENT_COLUMNS],
    scale: String,
    prefixable: bool,
}

fn parse_units_csv(crate_dir: &str) -> Vec<UnitRow> {
    let csv_path = PathBuf::from(crate_dir).join("units.csv");
    let content = fs::read_to_string(&csv_path).expect("Failed to read units.csv");

    let mut units = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        if parts.len() != EXPONENT_COLUMNS + 4 {
            panic!(
                "units.csv:{}: expected {} columns, found {}",
                lineno + 1,
                EXPONENT_COLUMNS + 4,
                parts.len()
            );
        }

        let mut exponents = [0i32; EXPONENT_COLUMNS];
        for (slot, raw) in exponents.iter_mut().zip(&parts[2..2 + EXPONENT_COLUMNS]) {
            *slot = raw
                .parse()
                .unwrap_or_else(|_| panic!("units.csv:{}: bad exponent {:?}", lineno + 1, raw));
        }

        let prefixable = match parts[EXPONENT_COLUMNS + 3] {
            "true" => true,
            "false" => false,
            other => panic!("units.csv:{}: bad prefixable flag {:?}", lineno + 1, other),
        };

        units.push(UnitRow {
            symbol: parts[0].to_string(),
            name: parts[1].to_string(),
            exponents,
            scale: parts[EXPONENT_COLUMNS + 2].to_string(),
            prefixable,
        });
    }

    units
}

fn check_unique_symbols(units: &[UnitRow]) {
    let mut seen = std::collections::HashSet::new();
    for unit in units {
        if !seen.insert(unit.symbol.as_str()) {
            panic!("units.csv: duplicate symbol {:?}", unit.symbol);
        }
    }
}

fn generate_unit_table(units: &[UnitRow], out_dir: &str) {
    let mut code = String::from("// Auto-generated from units.csv\n");
    code.push_str("&[\n");

    for unit in units {
        let exps: Vec<String> = unit.exponents.iter().map(i32::to_string).collect();
        code.push_str("    UnitRow {\n");
        code.push_str(&format!("        symbol: {:?},\n", unit.symbol));
        code.push_str(&format!("        name: {:?},\n", unit.name));
        code.push_str(&format!("        exponents: [{}],\n", exps.join(", ")));
        code.push_str(&format!("        scale: {},\n", unit.scale));
        code.push_str(&format!("        prefixable: {},\n", unit.prefixable));
        code.push_str("    },\n");
    }

    code.push_str("]\n");

    let dest_path = PathBuf::from(out_dir).join("unit_table.rs");
    fs::write(&dest_path, code).expect("Failed to write unit_table.rs");
}
