#[tokio::main]
async fn main() {
    if let Err(err) = hireflow_api::run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
