use {
    crate::{IdentityStore, SessionContext, Wallet},
    voting_types::{Address, Error, Result},
};

/// Turns the wallet's accounts into the session's identity.
pub struct WalletGateway<W> {
    wallet: W,
}

impl<W> WalletGateway<W>
where
    W: Wallet,
{
    pub fn new(wallet: W) -> Self {
        Self { wallet }
    }

    /// Ask the wallet for its accounts and make the primary one the active
    /// identity, persisting it.
    pub async fn connect<S>(&self, ctx: &mut SessionContext<S>) -> Result<Address>
    where
        S: IdentityStore,
    {
        let accounts = self.wallet.request_accounts().await?;
        let account = accounts.first().copied().ok_or(Error::NoAccounts)?;

        ctx.establish(account)?;

        tracing::info!(%account, "Wallet connected");

        Ok(account)
    }

    /// The persisted identity, if any. Doesn't touch the wallet.
    pub fn current_identity<S>(&self, ctx: &SessionContext<S>) -> Option<Address> {
        ctx.identity()
    }

    /// Forget the identity. Permissions granted on the wallet side are left
    /// alone.
    pub fn disconnect<S>(&self, ctx: &mut SessionContext<S>) -> Result<()>
    where
        S: IdentityStore,
    {
        if let Some(account) = ctx.identity() {
            tracing::info!(%account, "Wallet disconnected");
        }

        ctx.teardown()
    }
}

// ----------------------------------- tests -----------------------------------
