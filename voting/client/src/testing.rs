//! In-process stand-ins for the wallet and the contract, for use in tests.

use {
    crate::{VotingContract, Wallet},
    alloy::primitives::{TxHash, U256},
    anyhow::{bail, ensure},
    async_trait::async_trait,
    std::{
        collections::BTreeMap,
        sync::{Arc, Mutex, MutexGuard},
    },
    voting_types::{
        now_seconds, Address, CallerVote, Error, Proposal, ProposalInput, Result, VoteChoice,
    },
};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

pub struct MockWallet {
    accounts: Option<Vec<Address>>,
}

impl MockWallet {
    pub fn with_accounts(accounts: Vec<Address>) -> Self {
        Self {
            accounts: Some(accounts),
        }
    }

    /// A wallet that can't be reached.
    pub fn unavailable() -> Self {
        Self { accounts: None }
    }
}

#[async_trait]
impl Wallet for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.accounts
            .clone()
            .ok_or_else(|| Error::WalletUnavailable("wallet plugin not found".to_string()))
    }
}

#[derive(Default)]
struct MockState {
    owner: Option<Address>,
    voting_id: U256,
    proposal: Proposal,
    votes: BTreeMap<(U256, Address), CallerVote>,
    calls: usize,
    tx_count: u64,
    read_failure: Option<String>,
    write_failure: Option<String>,
    revert_reason: Option<String>,
}

/// An in-memory voting contract behaving like the deployed one: only the
/// owner may create a vote, each address votes once per proposal, and votes
/// are refused after the end date.
///
/// Clones share state, so a test can keep a handle after moving the mock into
/// the code under test, and inspect how many calls reached it.
#[derive(Clone, Default)]
pub struct MockContract {
    state: Arc<Mutex<MockState>>,
}

impl MockContract {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(self, owner: Address) -> Self {
        self.lock().owner = Some(owner);
        self
    }

    pub fn with_proposal(self, proposal: Proposal) -> Self {
        self.set_proposal(proposal);
        self
    }

    /// A proposal ending a day from now, with no votes yet.
    pub fn with_open_proposal(self) -> Self {
        self.with_proposal(sample_proposal(now_seconds() + SECONDS_PER_DAY))
    }

    /// A proposal that ended a day ago.
    pub fn with_closed_proposal(self) -> Self {
        self.with_proposal(sample_proposal(now_seconds() - SECONDS_PER_DAY))
    }

    /// Replace the current proposal, as a new `addVoting` would.
    pub fn set_proposal(&self, proposal: Proposal) {
        let mut state = self.lock();
        state.voting_id += U256::from(1);
        state.proposal = proposal;
    }

    /// Record a vote directly, bypassing the checks and the tallies.
    pub fn record_vote(&self, voter: Address, choice: VoteChoice) {
        let mut state = self.lock();
        let id = state.voting_id;
        state
            .votes
            .insert((id, voter), CallerVote::voted(choice, now_seconds()));
    }

    pub fn fail_reads(&self, reason: &str) {
        self.lock().read_failure = Some(reason.to_string());
    }

    pub fn fail_writes(&self, reason: &str) {
        self.lock().write_failure = Some(reason.to_string());
    }

    /// Include the following transactions in a block, but have them revert
    /// there, leaving the contract untouched.
    pub fn revert_writes(&self, reason: &str) {
        self.lock().revert_reason = Some(reason.to_string());
    }

    pub fn heal(&self) {
        let mut state = self.lock();
        state.read_failure = None;
        state.write_failure = None;
        state.revert_reason = None;
    }

    /// How many calls reached the contract so far.
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    pub fn proposal(&self) -> Proposal {
        self.lock().proposal.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panic while holding the lock only happens in a failed test.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin_read(&self) -> anyhow::Result<MutexGuard<'_, MockState>> {
        let mut state = self.lock();
        state.calls += 1;

        if let Some(reason) = &state.read_failure {
            bail!("{reason}");
        }

        Ok(state)
    }

    fn begin_write(&self) -> anyhow::Result<MutexGuard<'_, MockState>> {
        let mut state = self.lock();
        state.calls += 1;

        if let Some(reason) = &state.write_failure {
            bail!("{reason}");
        }

        state.tx_count += 1;

        if let Some(reason) = &state.revert_reason {
            let tx_hash = TxHash::with_last_byte(state.tx_count as u8);
            bail!("transaction reverted: {tx_hash} ({reason})");
        }

        Ok(state)
    }
}

#[async_trait]
impl VotingContract for MockContract {
    async fn add_voting(&self, from: Address, input: &ProposalInput) -> anyhow::Result<TxHash> {
        let mut state = self.begin_write()?;

        if let Some(owner) = state.owner {
            ensure!(from == owner, "execution reverted: caller is not the owner");
        }

        state.voting_id += U256::from(1);
        state.proposal = Proposal {
            title: input.title.clone(),
            option_one: input.option_one.clone(),
            img_option_one: input.img_option_one.clone(),
            option_two: input.option_two.clone(),
            img_option_two: input.img_option_two.clone(),
            end_date: now_seconds()
                .saturating_add(input.end_date_days.saturating_mul(SECONDS_PER_DAY)),
            option_one_votes: 0,
            option_two_votes: 0,
        };

        Ok(TxHash::with_last_byte(state.tx_count as u8))
    }

    async fn add_vote(&self, from: Address, choice: VoteChoice) -> anyhow::Result<TxHash> {
        let mut state = self.begin_write()?;
        let key = (state.voting_id, from);

        ensure!(!state.proposal.is_empty(), "execution reverted: no open voting");
        ensure!(
            state.proposal.is_open(now_seconds()),
            "execution reverted: voting is closed"
        );
        ensure!(
            !state.votes.contains_key(&key),
            "execution reverted: you already voted on this voting"
        );

        match choice {
            VoteChoice::One => state.proposal.option_one_votes += 1,
            VoteChoice::Two => state.proposal.option_two_votes += 1,
        }
        state
            .votes
            .insert(key, CallerVote::voted(choice, now_seconds()));

        Ok(TxHash::with_last_byte(state.tx_count as u8))
    }

    async fn get_current_voting(&self, _from: Address) -> anyhow::Result<Proposal> {
        Ok(self.begin_read()?.proposal.clone())
    }

    async fn current_voting_id(&self, _from: Address) -> anyhow::Result<U256> {
        Ok(self.begin_read()?.voting_id)
    }

    async fn votes(&self, voting_id: U256, voter: Address) -> anyhow::Result<CallerVote> {
        let state = self.begin_read()?;

        Ok(state
            .votes
            .get(&(voting_id, voter))
            .copied()
            .unwrap_or_default())
    }
}

pub fn sample_proposal(end_date: u64) -> Proposal {
    Proposal {
        title: "Best pet".to_string(),
        option_one: "Cat".to_string(),
        img_option_one: "https://img.example/cat.png".to_string(),
        option_two: "Dog".to_string(),
        img_option_two: "https://img.example/dog.png".to_string(),
        end_date,
        option_one_votes: 4,
        option_two_votes: 7,
    }
}
