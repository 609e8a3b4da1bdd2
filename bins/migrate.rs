use std::process::ExitCode;

use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use tracing::{error, info};
use uuid::Uuid;

use common::utils::logging::{init_logging, LogFormat};

#[derive(Clone, Copy, Debug)]
enum Command {
    Up,
    Down,
    Fresh,
}

impl Command {
    fn parse(arg: Option<&str>) -> Option<Self> {
        match arg.unwrap_or("up") {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "fresh" => Some(Self::Fresh),
            _ => None,
        }
    }
}

fn main() -> ExitCode {
    // 提前加载 .env，使 DATABASE_URL / RUST_LOG 等环境变量生效
    dotenv().ok();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "migrate", event = "config_invalid", error = %e, "failed to load config");
            return ExitCode::FAILURE;
        }
    };
    init_logging(LogFormat::parse(&cfg.logging.format));

    let arg = std::env::args().nth(1);
    let Some(command) = Command::parse(arg.as_deref()) else {
        error!(service = "migrate", event = "bad_args", arg = ?arg, "usage: migrate [up|down|fresh]");
        return ExitCode::from(2);
    };

    let run_id = Uuid::new_v4();
    info!(service = "migrate", event = "start", %run_id, ?command, version = env!("CARGO_PKG_VERSION"), "migration starting");

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "migrate", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let result: anyhow::Result<()> = rt.block_on(async {
        let db = models::db::connect_with_config(&cfg.database).await?;
        match command {
            Command::Up => Migrator::up(&db, None).await?,
            // 只回滚最近一次迁移
            Command::Down => Migrator::down(&db, Some(1)).await?,
            Command::Fresh => Migrator::fresh(&db).await?,
        }
        Ok(())
    });

    match result {
        Ok(()) => {
            info!(service = "migrate", event = "stop", %run_id, ?command, "migration finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "migrate", event = "failed", %run_id, ?command, error = %e, "migration failed");
            ExitCode::FAILURE
        }
    }
}
