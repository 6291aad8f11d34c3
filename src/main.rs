#[tokio::main]
async fn main() -> anyhow::Result<()> {
    produtos::app::run().await
}
