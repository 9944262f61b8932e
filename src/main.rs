fn main() {
    env_logger::init();

    if let Err(e) = tictactoe::app::run() {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
