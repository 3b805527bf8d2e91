use fmg_editor::{export_lines, import_lines, read_file, write_file, FmgReader, ReadOptions};
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter};

const SAMPLE_ROWS: usize = 10;

fn usage(program: &str) -> ! {
    eprintln!("Usage:");
    eprintln!("  {} show <file.fmg>", program);
    eprintln!("  {} export <file.fmg> <out.txt>", program);
    eprintln!("  {} import <in.txt> <out.fmg>", program);
    std::process::exit(1);
}

fn show(path: &str) -> fmg_editor::Result<()> {
    let mut reader = FmgReader::open(path, ReadOptions::default())?;
    let entries = reader.entries()?;
    let header = reader.header;

    println!("FMG file: {}", path);
    println!("{}", "=".repeat(60));
    println!("  Version: {}", header.version);
    println!("  File size: {} bytes", header.file_size);
    println!("  Chunks: {}", header.chunk_count);
    println!("  Entries: {}", header.entry_count);
    println!("  Non-empty: {}", entries.values().filter(|t| !t.is_empty()).count());

    println!("\nFirst entries:");
    for (id, text) in entries.iter().take(SAMPLE_ROWS) {
        println!("  [{}] {}", id, text);
    }
    if entries.len() > SAMPLE_ROWS {
        println!("  ... and {} more", entries.len() - SAMPLE_ROWS);
    }
    Ok(())
}

fn export(fmg_path: &str, txt_path: &str) -> fmg_editor::Result<()> {
    let entries = read_file(fmg_path)?;
    export_lines(&entries, BufWriter::new(File::create(txt_path)?))?;
    println!("Exported {} entries to {}", entries.len(), txt_path);
    Ok(())
}

fn import(txt_path: &str, fmg_path: &str) -> fmg_editor::Result<()> {
    let entries = import_lines(BufReader::new(File::open(txt_path)?))?;
    write_file(&entries, fmg_path)?;
    println!("Wrote {} entries to {}", entries.len(), fmg_path);
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("fmg-editor");

    let result = match args.get(1).map(String::as_str) {
        Some("show") if args.len() == 3 => show(&args[2]),
        Some("export") if args.len() == 4 => export(&args[2], &args[3]),
        Some("import") if args.len() == 4 => import(&args[2], &args[3]),
        _ => usage(program),
    };

    if let Err(e) = result {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}
