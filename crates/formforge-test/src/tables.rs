//! Writers for the four comma-delimited input tables.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes `header` followed by `rows` to `dir/name` and returns the path.
pub fn write_table(dir: &Path, name: &str, header: &str, rows: &[&str]) -> io::Result<PathBuf> {
    let path = dir.join(name);
    let mut contents = String::from(header);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    fs::write(&path, contents)?;
    Ok(path)
}

/// Paths of a complete set of input tables.
#[derive(Debug, Clone)]
pub struct TableSet {
    pub responses: PathBuf,
    pub blueprint: PathBuf,
    pub keys: PathBuf,
    pub domains: PathBuf,
}

/// Writes the three-item form as raw responses keyed `A`.
///
/// Correct answers are `A`, wrong answers `B`, matching the scores of
/// [`three_item_grid`](crate::scenarios::three_item_grid).
pub fn write_three_item_tables(dir: &Path) -> io::Result<TableSet> {
    let columns: [(&str, [u8; 4]); 3] = [
        ("i1", [1, 1, 0, 0]),
        ("i2", [1, 0, 1, 0]),
        ("i3", [0, 1, 1, 1]),
    ];
    let mut response_rows = Vec::new();
    for c in 0..4 {
        for (item, scores) in &columns {
            let answer = if scores[c] == 1 { "A" } else { "B" };
            response_rows.push(format!("c{},{},{}", c + 1, item, answer));
        }
    }
    let response_refs: Vec<&str> = response_rows.iter().map(String::as_str).collect();

    Ok(TableSet {
        responses: write_table(dir, "responses.csv", "candidate,item,response", &response_refs)?,
        blueprint: write_table(dir, "blueprint.csv", "domain,min,max", &["D,1,3"])?,
        keys: write_table(dir, "keys.csv", "item,key", &["i1,A", "i2,A", "i3,A"])?,
        domains: write_table(dir, "domains.csv", "item,domain", &["i1,D", "i2,D", "i3,D"])?,
    })
}
