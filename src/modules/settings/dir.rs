use crate::modules::context::Initialize;
use crate::modules::settings::cli::SETTINGS;
use crate::{
    modules::error::{code::ErrorCode, MailSiftResult},
    raise_error,
};
use std::path::PathBuf;
use std::sync::LazyLock;

pub const DATABASE_FILE: &str = "mailsift.db";
const LOG_DIR: &str = "logs";

pub static DATA_DIR_MANAGER: LazyLock<DataDirManager> =
    LazyLock::new(|| DataDirManager::new(PathBuf::from(&SETTINGS.mailsift_root_dir)));

#[derive(Debug)]
pub struct DataDirManager {
    pub root_dir: PathBuf,
    pub database: PathBuf,
    pub log_dir: PathBuf,
}

impl Initialize for DataDirManager {
    async fn initialize() -> MailSiftResult<()> {
        std::fs::create_dir_all(&DATA_DIR_MANAGER.root_dir)
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?;
        std::fs::create_dir_all(&DATA_DIR_MANAGER.log_dir)
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?;
        Ok(())
    }
}

impl DataDirManager {
    pub fn new(root_dir: PathBuf) -> Self {
        Self {
            database: root_dir.join(DATABASE_FILE),
            log_dir: root_dir.join(LOG_DIR),
            root_dir,
        }
    }

    /// The configured database URL, or a SQLite file under the root directory.
    pub fn database_url(&self) -> String {
        match &SETTINGS.mailsift_database_url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}", self.database.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_the_root() {
        let manager = DataDirManager::new(PathBuf::from("/srv/mailsift"));
        assert_eq!(manager.database, PathBuf::from("/srv/mailsift/mailsift.db"));
        assert_eq!(manager.log_dir, PathBuf::from("/srv/mailsift/logs"));
        assert_eq!(manager.database_url(), "sqlite:///srv/mailsift/mailsift.db");
    }
}
