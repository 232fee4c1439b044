use fincal_core::cli;

fn main() {
    fincal_core::init();
    if let Err(err) = cli::run() {
        cli::output::error(err);
        std::process::exit(1);
    }
}
