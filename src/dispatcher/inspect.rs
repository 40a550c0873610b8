use anyhow::{Context, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use colored::Colorize;
use std::path::Path;

/// Print the sheets, dimensions and (optionally) cells of an Excel file
pub fn dispatch_inspect(file_path: &Path, full: bool) -> Result<()> {
    println!(
        "{} Inspecting file: {}\n",
        "📊".cyan().bold(),
        file_path.display().to_string().green()
    );

    let mut workbook: Xlsx<_> = open_workbook(file_path)
        .with_context(|| format!("Failed to open Excel file {:?}", file_path))?;

    let sheet_names = workbook.sheet_names().to_vec();
    println!(
        "{} Found {} sheet(s):",
        "📄".cyan().bold(),
        sheet_names.len()
    );
    for name in &sheet_names {
        println!("  • {}", name.yellow());
    }
    println!();

    for sheet_name in sheet_names {
        let range = match workbook.worksheet_range(&sheet_name) {
            Ok(range) => range,
            Err(err) => {
                eprintln!(
                    "{} Failed to read sheet {}: {}",
                    "⚠️".yellow(),
                    sheet_name.yellow(),
                    err
                );
                continue;
            }
        };

        println!(
            "{} Sheet: {}",
            "📌".cyan().bold(),
            sheet_name.yellow().bold()
        );
        println!("  Rows: {}", range.height());
        println!("  Columns: {}", range.width());

        if let Some(header) = range.rows().next() {
            let names: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();
            println!("  Header: {}\n", names.join(" | "));
        }

        if full {
            for (row_idx, row) in range.rows().enumerate().skip(1) {
                println!("  Row {}:", row_idx + 1);
                for (col_idx, cell) in row.iter().enumerate() {
                    if cell != &Data::Empty {
                        println!("    Col {}: {:?}", col_idx + 1, cell);
                    }
                }
            }
            println!();
        }
    }

    if !full {
        println!("{}", "Tip: Use --full to see all data".blue());
    }

    Ok(())
}
