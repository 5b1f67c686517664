// src/main.rs

fn main() {
    if let Err(e) = kf_raider::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
