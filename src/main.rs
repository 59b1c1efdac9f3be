use log::{LevelFilter, error};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;
use TwoTClosures::Examples::closures_examples::closures_examples;

/// usage: TwoTClosures [example number] [data directory]
pub fn main() {
    if let Err(e) = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger not installed: {}", e);
    }
    let mut args = std::env::args().skip(1);
    let task: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(0);
    let data_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("data"));
    if let Err(e) = closures_examples(task, &data_dir) {
        error!("example {} failed: {}", task, e);
        std::process::exit(1);
    }
}
