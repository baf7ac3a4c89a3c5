//! Parsley raw-text scanner driver.
//!
//! Treats a file as the body of an open `<style>`/`<script>`/`<SQL>` region
//! and prints every token the external scanner produces for it.

mod driver;

use driver::drive;

fn main() {
    parsley_raw_text::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    let mut file_path = None;
    let mut offset = 0;

    for arg in args.iter().skip(1) {
        if let Some(value) = arg.strip_prefix("--offset=") {
            let Ok(parsed) = value.parse::<usize>() else {
                eprintln!("error: invalid offset '{value}'");
                std::process::exit(1);
            };
            offset = parsed;
        } else if arg == "-h" || arg == "--help" {
            print_usage();
            return;
        } else if arg.starts_with('-') {
            eprintln!("error: unknown option '{arg}'");
            print_usage();
            std::process::exit(1);
        } else if file_path.is_none() {
            file_path = Some(arg.as_str());
        } else {
            eprintln!("error: unexpected argument '{arg}'");
            std::process::exit(1);
        }
    }

    let Some(path) = file_path else {
        print_usage();
        std::process::exit(1);
    };

    let content = read_file(path);
    let entries = drive(&content, offset);

    println!("Tokens for '{}' ({} tokens):", path, entries.len());
    for entry in &entries {
        println!(
            "  {} @ {}..{} {:?}",
            entry.kind,
            entry.start,
            entry.end,
            &content[entry.start..entry.end]
        );
    }
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: parsley-scan <file> [--offset=<n>]");
    eprintln!();
    eprintln!("Scans <file> as the body of an open raw-text region.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --offset=<n>   Byte offset where the region body starts (default: 0)");
    eprintln!();
    eprintln!("Set RUST_LOG=parsley_raw_text=trace to see every scan decision.");
}
