use anyhow::Result;
use classroom_autosubmit::utils::logging;
use classroom_autosubmit::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env()?;

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
