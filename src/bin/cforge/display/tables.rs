use std::collections::BTreeMap;
use std::io::Write;

use cube_forge::{Cube, System};

use crate::util::text::{format_triplet, group_thousands, truncate};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

/// Shown for atoms whose atomic number is not a known element (ghost atoms).
const UNKNOWN_SYMBOL: &str = "X";

pub fn print_structure_info(out: &mut impl Write, system: &System) {
    let rows = vec![
        ("Name", system.data("name").unwrap_or("-").to_string()),
        ("Formula", formula(system)),
        ("Total Atoms", system.atom_count().to_string()),
        ("Total Bonds", system.bond_count().to_string()),
        ("Grids", system.cube_count().to_string()),
    ];

    print_kv_table(out, "Structure Summary", &rows);
}

pub fn print_element_distribution(out: &mut impl Write, system: &System) {
    if system.atoms.is_empty() {
        return;
    }

    let mut sorted: Vec<(String, usize)> = element_counts(system).into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    print_distribution_table(out, "Element Distribution", &sorted, system.atom_count());
}

pub fn print_grid_info(out: &mut impl Write, system: &System) {
    for (index, cube) in system.cubes.iter().enumerate() {
        let title = match cube.orbital() {
            Some(orbital) => format!("Grid {index} (orbital {orbital})"),
            None => format!("Grid {index}"),
        };
        print_kv_table(out, &title, &grid_rows(cube));
    }
}

fn grid_rows(cube: &Cube) -> Vec<(&'static str, String)> {
    let [nx, ny, nz] = cube.dimensions();
    let range = cube
        .value_range()
        .map(|(lo, hi)| format!("{lo:.4e} … {hi:.4e}"))
        .unwrap_or_else(|| "no finite samples".to_string());

    vec![
        ("Dimensions", format!("{nx} × {ny} × {nz}")),
        ("Points", group_thousands(cube.point_count())),
        ("Spacing (Å)", format_triplet(cube.spacing(), 4)),
        ("Origin (Å)", format_triplet(cube.min(), 4)),
        ("Far corner (Å)", format_triplet(cube.max(), 4)),
        ("Value range", range),
    ]
}

fn element_counts(system: &System) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for atom in &system.atoms {
        let symbol = atom.element().map_or(UNKNOWN_SYMBOL, |e| e.symbol());
        *counts.entry(symbol.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Hill-order formula: carbon, then hydrogen, then the rest alphabetically.
/// Without carbon every element is alphabetical.
fn formula(system: &System) -> String {
    let mut counts = element_counts(system);
    if counts.is_empty() {
        return "-".to_string();
    }

    let mut parts = Vec::new();
    if let Some(carbon) = counts.remove("C") {
        parts.push(("C".to_string(), carbon));
        if let Some(hydrogen) = counts.remove("H") {
            parts.push(("H".to_string(), hydrogen));
        }
    }
    parts.extend(counts);

    parts
        .into_iter()
        .map(|(symbol, count)| {
            if count == 1 {
                symbol
            } else {
                format!("{symbol}{count}")
            }
        })
        .collect()
}

fn print_distribution_table(
    out: &mut impl Write,
    title: &str,
    data: &[(String, usize)],
    total: usize,
) {
    const MAX_ROWS: usize = 15;

    let name_w = 10usize;
    let count_w = 8usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{INDENT}{left}{}{mid}{}{mid}{}{right}",
            "─".repeat(name_w + 2),
            "─".repeat(count_w + 2),
            "─".repeat(dist_w + 2)
        )
    };
    let row = |name: &str, count: &str, dist: &str| {
        format!("{INDENT}│ {name:<name_w$} │ {count:>count_w$} │ {dist:<dist_w$} │")
    };

    let _ = writeln!(out, "{INDENT}┌─ {} ─┐", truncate(title, SAFE_TABLE_WIDTH - 6));
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    let _ = writeln!(out, "{}", row("Element", "Count", "Distribution"));
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));

    for (name, count) in data.iter().take(MAX_ROWS) {
        let pct = (*count as f64 / total as f64) * 100.0;
        let dist = format!("{}  {:>5.1}%", make_bar(pct, max_bar_width), pct);
        let _ = writeln!(
            out,
            "{}",
            row(&truncate(name, name_w), &count.to_string(), &dist)
        );
    }

    if data.len() > MAX_ROWS {
        let more = format!("({} more elements)", data.len() - MAX_ROWS);
        let _ = writeln!(out, "{}", row("...", "...", &more));
    }

    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{INDENT}{left}{}{mid}{}{right}",
            "─".repeat(key_w + 2),
            "─".repeat(val_w + 2)
        )
    };

    let _ = writeln!(out, "{INDENT}┌─ {} ─┐", truncate(title, SAFE_TABLE_WIDTH - 6));
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    let _ = writeln!(out, "{INDENT}│ {:<key_w$} │ {:>val_w$} │", "Metric", "Value");
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<key_w$} │ {:>val_w$} │",
            truncate(key, key_w),
            truncate(val, val_w)
        );
    }

    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = ((pct / 100.0) * max_width as f64).round() as usize;
    let filled = filled.min(max_width);
    format!("{}{}", "█".repeat(filled), "░".repeat(max_width - filled))
}
