use {crate::home_directory::HomeDirectory, anyhow::ensure, clap::Parser};

#[derive(Parser)]
pub struct InitCmd;

impl InitCmd {
    pub fn run(&self, home: &HomeDirectory) -> anyhow::Result<()> {
        let config_file = home.config_file();

        ensure!(
            !config_file.exists(),
            "config file already exists: {}",
            config_file.display()
        );

        std::fs::create_dir_all(home.as_path())?;
        std::fs::write(&config_file, include_str!("../testdata/default_config.toml"))?;

        tracing::info!("Voting directory initiated at: {}", home.display());

        Ok(())
    }
}

// ----------------------------------- tests -----------------------------------
