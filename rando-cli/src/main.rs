//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = rando_cli::run() {
        eprintln!("rando: {err}");
        std::process::exit(1);
    }
}
