use {
    voting_client::{
        testing::{MockContract, MockWallet},
        ContractFacade, MemoryIdentityStore, WalletGateway,
    },
    voting_session::VotingSession,
    voting_types::Address,
};

pub const ALICE: Address = Address::repeat_byte(0xa1);

pub type TestSession = VotingSession<MockWallet, MockContract, MemoryIdentityStore>;

pub fn setup_tracing_subscriber(level: tracing::Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_test_writer()
        .try_init();
}

/// A session over `contract`, whose wallet exposes Alice's account.
pub fn setup_session(contract: &MockContract, store: MemoryIdentityStore) -> TestSession {
    setup_tracing_subscriber(tracing::Level::DEBUG);

    VotingSession::init(
        WalletGateway::new(MockWallet::with_accounts(vec![ALICE])),
        ContractFacade::new(contract.clone()),
        store,
    )
    .unwrap()
}

/// A session where Alice connected in an earlier run.
pub fn setup_connected_session(contract: &MockContract) -> TestSession {
    setup_session(contract, MemoryIdentityStore::with_identity(ALICE))
}
