//! Convert every .docx file of a folder into Markdown pages.
//!
//! Usage: cargo run --example convert_folder -- <input_dir> [output_dir]

use std::path::PathBuf;
use undocx::{HeaderKind, Undocx};

fn main() {
    let mut args = std::env::args().skip(1);
    let Some(input_dir) = args.next().map(PathBuf::from) else {
        eprintln!("Usage: convert_folder <input_dir> [output_dir]");
        std::process::exit(2);
    };
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| input_dir.clone());

    let started = std::time::Instant::now();
    let report = match Undocx::new()
        .header_kind(HeaderKind::SubTopic)
        .convert_dir(&input_dir, &output_dir)
    {
        Ok(report) => report,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    for output in &report.succeeded {
        println!(
            "✅ {} → {} ({} images)",
            output.input.display(),
            output.markdown_path.display(),
            output.images.len()
        );
    }
    for failure in &report.failed {
        println!("❌ {}: {}", failure.input.display(), failure.error);
    }

    println!(
        "\n{} of {} documents converted in {:.2?}",
        report.succeeded.len(),
        report.total(),
        started.elapsed()
    );
}
