fn main() {
    if let Err(e) = mirrorgen_cli::run() {
        eprintln!("mirrorgen: {e}");
        std::process::exit(1);
    }
}
