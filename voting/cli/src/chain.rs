use {
    crate::{
        config::{ChainConfig, Config, WalletConfig, WalletKind},
        home_directory::HomeDirectory,
    },
    alloy::providers::{DynProvider, Provider, ProviderBuilder},
    reqwest::Url,
    std::str::FromStr,
    voting_client::{
        ContractFacade, EvmVotingContract, FileIdentityStore, LocalWallet, NodeWallet,
        UnavailableWallet, Wallet, WalletGateway,
    },
    voting_session::VotingSession,
    voting_types::Address,
};

pub type AppSession =
    VotingSession<Box<dyn Wallet>, EvmVotingContract<DynProvider>, FileIdentityStore>;

/// Wire the session to the configured node, wallet and contract, resuming the
/// identity remembered in the home directory.
pub fn open_session(app_dir: &HomeDirectory, cfg: &Config) -> anyhow::Result<AppSession> {
    let url = Url::parse(&cfg.chain.rpc_url)?;

    let address = contract_address(&cfg.chain);
    if address.is_none() {
        tracing::warn!(
            "Queries and transactions will fail until `chain.contract_address` is set in {} or `CHAIN__CONTRACT_ADDRESS`",
            app_dir.config_file().display()
        );
    }

    let (wallet, provider) = setup_wallet(&cfg.wallet, url);

    let session = VotingSession::init(
        WalletGateway::new(wallet),
        ContractFacade::new(EvmVotingContract::new(provider, address)),
        FileIdentityStore::new(app_dir.identity_file()),
    )?;

    Ok(session)
}

/// The configured contract address. A missing or malformed one is reported
/// and treated as absent, so that commands not touching the contract still
/// work.
fn contract_address(cfg: &ChainConfig) -> Option<Address> {
    let raw = cfg.contract_address.as_deref()?.trim();

    match Address::from_str(raw) {
        Ok(address) => Some(address),
        Err(err) => {
            tracing::warn!("Ignoring malformed contract address `{raw}`: {err}");

            None
        },
    }
}

fn setup_wallet(cfg: &WalletConfig, url: Url) -> (Box<dyn Wallet>, DynProvider) {
    match cfg.kind {
        WalletKind::Node => {
            let provider = ProviderBuilder::new().connect_http(url).erased();
            let wallet: Box<dyn Wallet> = Box::new(NodeWallet::new(provider.clone()));

            (wallet, provider)
        },
        WalletKind::Mnemonic => match LocalWallet::from_env(&cfg.mnemonic_env) {
            Ok(local) => {
                tracing::debug!(address = %local.address(), "Using local signer");

                let provider = ProviderBuilder::new()
                    .wallet(local.ethereum_wallet())
                    .connect_http(url)
                    .erased();
                let wallet: Box<dyn Wallet> = Box::new(local);

                (wallet, provider)
            },
            Err(err) => {
                // Reads don't need a signer; only connecting will fail.
                tracing::warn!("Local signer unavailable: {err}");

                let provider = ProviderBuilder::new().connect_http(url).erased();
                let wallet: Box<dyn Wallet> = Box::new(UnavailableWallet::from(err));

                (wallet, provider)
            },
        },
    }
}

// ----------------------------------- tests -----------------------------------
