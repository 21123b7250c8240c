use std::path::PathBuf;

use clap::Parser;
use quiz_studio::Studio;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the quiz catalog from (built-in samples when omitted)
    #[arg(short, long)]
    quizzes: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    let studio = match args.quizzes {
        Some(path) => Studio::from_json(path).expect("Failed to load quiz catalog"),
        None => Studio::with_sample_quizzes(),
    };

    if let Err(e) = studio.run() {
        eprintln!("Error running quiz studio: {}", e);
        std::process::exit(1);
    }
}
