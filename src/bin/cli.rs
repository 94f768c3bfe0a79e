// src/bin/cli.rs
use case_watch::cli;

fn main() {
    if let Err(e) = color_eyre::install() {
        // only the report handler is lost; the run itself is unaffected
        eprintln!("warning: error reporting not installed: {e}");
    }
    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        for cause in e.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}
