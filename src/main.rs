use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = kaiwa::cli::run().await {
        eprintln!("{e}");
        process::exit(1);
    }
}
