use {
    anyhow::anyhow,
    std::{ops::Deref, path::PathBuf},
};

// relative to user home directory (~)
const DEFAULT_APP_DIR: &str = ".voting";

/// Where the client keeps its config file and the connected wallet address.
pub struct HomeDirectory {
    home: PathBuf,
}

impl HomeDirectory {
    pub fn new_or_default(home: Option<PathBuf>) -> anyhow::Result<Self> {
        let home = match home {
            Some(home) => home,
            None => home::home_dir()
                .ok_or(anyhow!("Failed to find home directory"))?
                .join(DEFAULT_APP_DIR),
        };

        Ok(Self { home })
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join("app.toml")
    }

    /// Remembers the connected wallet address between runs.
    pub fn identity_file(&self) -> PathBuf {
        self.home.join("wallet")
    }
}

impl Deref for HomeDirectory {
    type Target = PathBuf;

    fn deref(&self) -> &Self::Target {
        &self.home
    }
}
