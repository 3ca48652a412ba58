use mimalloc::MiMalloc;
use modules::{
    context::{Initialize, ServiceContext},
    database::manager::DatabaseManager,
    error::MailSiftResult,
    logger,
    metrics::MetricsService,
    rest::start_http_server,
    settings::dir::DataDirManager,
};
use tracing::{error, info};

mod modules;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

static LOGO: &str = r#"
  __  __       _ _ ____  _  __ _   
 |  \/  | __ _(_) / ___|(_)/ _| |_ 
 | |\/| |/ _` | | \___ \| | |_| __|
 | |  | | (_| | | |___) | |  _| |_ 
 |_|  |_|\__,_|_|_|____/|_|_|  \__|
                                   
"#;

#[tokio::main]
async fn main() -> MailSiftResult<()> {
    logger::initialize_logging();
    info!("{}", LOGO);
    info!("Starting mailsift-server");
    info!("Version:  {}", mailsift_version!());
    info!("Git:      [{}]", env!("GIT_HASH"));

    if let Err(error) = initialize().await {
        eprintln!("{:?}", error);
        return Err(error);
    }

    let database = DatabaseManager::get()?;
    let result = start_http_server(database.pool().clone()).await;
    if let Err(e) = &result {
        error!("Failed to start REST server: {}", e);
    }
    database.close().await;
    result
}

async fn initialize() -> MailSiftResult<()> {
    ServiceContext::initialize().await?;
    DataDirManager::initialize().await?;
    MetricsService::initialize().await?;
    DatabaseManager::initialize().await?;
    Ok(())
}
