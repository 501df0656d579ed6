use {
    alloy::{
        network::EthereumWallet,
        providers::Provider,
        signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner},
    },
    async_trait::async_trait,
    std::env,
    voting_types::{Address, Error, Result},
};

/// A source of accounts able to sign transactions for the user.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Ask the wallet for the accounts it's willing to expose, primary first.
    ///
    /// Fails with `WalletUnavailable` if the wallet can't be reached at all.
    /// An empty list is a valid answer; it's up to the caller to decide what
    /// that means.
    async fn request_accounts(&self) -> Result<Vec<Address>>;
}

#[async_trait]
impl<T> Wallet for Box<T>
where
    T: Wallet + ?Sized,
{
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        (**self).request_accounts().await
    }
}

/// Uses the accounts unlocked on the JSON-RPC node. The node signs the
/// transactions itself.
pub struct NodeWallet<P> {
    provider: P,
}

impl<P> NodeWallet<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P> Wallet for NodeWallet<P>
where
    P: Provider,
{
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.provider
            .get_accounts()
            .await
            .map_err(|err| Error::WalletUnavailable(err.to_string()))
    }
}

/// A signer derived locally from a BIP-39 mnemonic.
#[derive(Debug)]
pub struct LocalWallet {
    signer: PrivateKeySigner,
}

impl LocalWallet {
    pub fn from_mnemonic(phrase: &str) -> Result<Self> {
        let signer = MnemonicBuilder::<English>::default()
            .phrase(phrase)
            .build()
            .map_err(|err| Error::WalletUnavailable(format!("invalid mnemonic: {err}")))?;

        Ok(Self { signer })
    }

    /// Read the mnemonic from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self> {
        let phrase = env::var(var).map_err(|_| {
            Error::WalletUnavailable(format!("environment variable `{var}` not set"))
        })?;

        Self::from_mnemonic(phrase.trim())
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The signer, in the form expected by the provider's wallet filler.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::new(self.signer.clone())
    }
}

#[async_trait]
impl Wallet for LocalWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        Ok(vec![self.signer.address()])
    }
}

/// Stands in for a wallet that couldn't be set up, so that read-only use of
/// the client keeps working. Connecting through it always fails.
pub struct UnavailableWallet {
    error: Error,
}

impl UnavailableWallet {
    pub fn new<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self {
            error: Error::WalletUnavailable(reason.to_string()),
        }
    }
}

impl From<Error> for UnavailableWallet {
    fn from(error: Error) -> Self {
        Self { error }
    }
}

#[async_trait]
impl Wallet for UnavailableWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        Err(self.error.clone())
    }
}

// ----------------------------------- tests -----------------------------------
