#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bedrock_chat::run().await
}
