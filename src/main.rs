#[tokio::main]
async fn main() {
    if let Err(e) = genrx_voice::app::run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
