#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopper_server::start().await
}
