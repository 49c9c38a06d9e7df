use anyhow::Result;
use lesson_splitter::utils::logging;
use lesson_splitter::{App, Command, Config, Outcome};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化应用
    let mut app = App::initialize(config).await?;

    // 命令行参数作为首个要打开的文档
    if let Some(target) = std::env::args().nth(1) {
        match app.execute(Command::Open(target)).await {
            Ok(Outcome::Continue(reply)) => println!("{}", reply),
            Ok(Outcome::Quit) => return Ok(()),
            Err(e) => error!("❌ {}", e),
        }
    }

    app.run().await?;

    Ok(())
}
