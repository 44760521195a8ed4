//! Simple decoder to inspect TLV files.
//!
//! Usage: `cargo run --example inspect -- <file> [--exact]`

use std::fs;
use std::process::ExitCode;

use compact_tlv::{decode_exact, decode_prefix, Value};

fn print_tree(value: &Value, indent: usize, max_items: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::List(items) => {
            println!("{}List ({} items)", pad, items.len());
            for item in items.iter().take(max_items) {
                print_tree(item, indent + 1, max_items);
            }
            if items.len() > max_items {
                println!("{}  ... and {} more items", pad, items.len() - max_items);
            }
        }
        other => println!("{}{}", pad, other),
    }
}

#[derive(Default)]
struct Counts {
    nulls: usize,
    texts: usize,
    text_bytes: usize,
    ints: usize,
    lists: usize,
}

fn count(value: &Value, counts: &mut Counts) {
    match value {
        Value::Null => counts.nulls += 1,
        Value::Text(s) => {
            counts.texts += 1;
            counts.text_bytes += s.len();
        }
        Value::Int32(_) => counts.ints += 1,
        Value::List(items) => {
            counts.lists += 1;
            for item in items {
                count(item, counts);
            }
        }
    }
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: inspect <file> [--exact]");
        return ExitCode::FAILURE;
    };
    let exact = args.any(|a| a == "--exact");

    println!("Reading: {}", path);

    let data = match fs::read(&path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("failed to read {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };
    println!("File size: {} bytes", data.len());

    let decoded = if exact {
        decode_exact(&data).map(|v| (v, data.len()))
    } else {
        decode_prefix(&data)
    };
    let (value, used) = match decoded {
        Ok(decoded) => decoded,
        Err(e) => {
            eprintln!("decode failed ({}): {}", e.kind().code(), e);
            return ExitCode::FAILURE;
        }
    };

    if used < data.len() {
        println!("Trailing bytes: {}", data.len() - used);
    }

    let mut counts = Counts::default();
    count(&value, &mut counts);

    println!("\n=== Summary ===");
    println!("Depth: {}", value.depth());
    println!("  Null:  {}", counts.nulls);
    println!("  Text:  {} ({} bytes)", counts.texts, counts.text_bytes);
    println!("  Int32: {}", counts.ints);
    println!("  List:  {}", counts.lists);

    println!("\n=== Value (first 20 items per list) ===");
    print_tree(&value, 0, 20);

    ExitCode::SUCCESS
}
