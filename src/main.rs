#[tokio::main]
async fn main() {
    if let Err(e) = branchdo::cli::run().await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
