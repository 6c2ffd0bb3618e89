use std::env;

fn main() {
    steelforge::config::init_tracing();
    let args: Vec<String> = env::args().collect();
    std::process::exit(steelforge::cli::run_with_args(&args));
}
