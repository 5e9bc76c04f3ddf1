#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pas_fields::run_server().await
}
