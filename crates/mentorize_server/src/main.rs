use anyhow::anyhow;
use clap::Parser;
use mentorize_server::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    mentorize_core::init_logging(config.effective_log_level(), config.log_dir.as_deref())
        .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;

    mentorize_server::run(config).await
}
