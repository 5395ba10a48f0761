fn main() {
    stickerpress::logging::init_default_logging();

    if let Err(err) = stickerpress::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
