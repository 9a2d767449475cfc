use module_server::{ServerConfig, init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载 .env 文件（仅用于 RUST_LOG）
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_current_dir()?;
    run(config).await?;

    Ok(())
}
