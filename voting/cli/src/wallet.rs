use {
    crate::{chain::AppSession, notify},
    clap::Subcommand,
    voting_types::Error,
};

#[derive(Subcommand)]
pub enum WalletCmd {
    /// Connect the wallet and remember its primary account
    Connect,
    /// Forget the connected account
    Logout,
    /// Print the connected account
    Whoami,
}

impl WalletCmd {
    pub async fn run(self, mut session: AppSession) -> anyhow::Result<()> {
        match self {
            WalletCmd::Connect => {
                let address = session.connect().await?;

                notify::success(format!("Wallet Connected! Address: {address}"));
            },
            WalletCmd::Logout => {
                session.logout()?;

                notify::success("Logout!");
            },
            WalletCmd::Whoami => {
                let address = session.identity().ok_or(Error::NotConnected)?;

                println!("{address}");
            },
        }

        Ok(())
    }
}
