#[tokio::main]
async fn main() {
    if let Err(e) = likerelay::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
