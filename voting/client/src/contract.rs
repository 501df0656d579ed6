use {
    alloy::{
        primitives::{Address, TxHash, U256},
        providers::Provider,
        rpc::types::TransactionReceipt,
        sol,
    },
    anyhow::{anyhow, ensure},
    async_trait::async_trait,
    voting_types::{CallerVote, Proposal, ProposalInput, VoteChoice},
};

sol! {
    /// Interface of the on-chain voting contract.
    #[sol(rpc)]
    interface IVoting {
        struct VotingData {
            string title;
            string optionOne;
            string imgOptionOne;
            string optionTwo;
            string imgOptionTwo;
            uint256 optionOneVotes;
            uint256 optionTwoVotes;
            uint256 endDate;
        }

        function addVoting(
            string calldata title,
            string calldata optionOne,
            string calldata imgOptionOne,
            string calldata optionTwo,
            string calldata imgOptionTwo,
            uint256 timeToVote
        ) external;

        function addVote(uint8 choice) external;

        function getCurrentVoting() external view returns (VotingData memory);

        function currentVoting() external view returns (uint256);

        function votes(uint256 votingId, address voter) external view returns (uint8 choice, uint256 date);
    }
}

impl From<IVoting::VotingData> for Proposal {
    fn from(data: IVoting::VotingData) -> Self {
        Proposal {
            title: data.title,
            option_one: data.optionOne,
            img_option_one: data.imgOptionOne,
            option_two: data.optionTwo,
            img_option_two: data.imgOptionTwo,
            end_date: data.endDate.saturating_to(),
            option_one_votes: data.optionOneVotes.saturating_to(),
            option_two_votes: data.optionTwoVotes.saturating_to(),
        }
    }
}

/// The raw operations of the voting contract, as exposed by its ABI.
///
/// Implementations talk to the contract and nothing else: no validation, no
/// identity lookup. Errors are whatever the transport or the contract
/// reported.
#[async_trait]
pub trait VotingContract: Send + Sync {
    async fn add_voting(&self, from: Address, input: &ProposalInput) -> anyhow::Result<TxHash>;

    async fn add_vote(&self, from: Address, choice: VoteChoice) -> anyhow::Result<TxHash>;

    /// The current proposal, zero-valued if none was ever created.
    async fn get_current_voting(&self, from: Address) -> anyhow::Result<Proposal>;

    async fn current_voting_id(&self, from: Address) -> anyhow::Result<U256>;

    async fn votes(&self, voting_id: U256, voter: Address) -> anyhow::Result<CallerVote>;
}

/// The voting contract deployed on an EVM chain, reached through `provider`.
///
/// The contract address is optional so that a missing address is noticed
/// when an operation is attempted rather than when the client starts.
pub struct EvmVotingContract<P> {
    provider: P,
    address: Option<Address>,
}

impl<P> EvmVotingContract<P>
where
    P: Provider + Clone,
{
    pub fn new(provider: P, address: Option<Address>) -> Self {
        Self { provider, address }
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    fn instance(&self) -> anyhow::Result<IVoting::IVotingInstance<P>> {
        let address = self
            .address
            .ok_or_else(|| anyhow!("contract address not configured"))?;

        Ok(IVoting::new(address, self.provider.clone()))
    }
}

#[async_trait]
impl<P> VotingContract for EvmVotingContract<P>
where
    P: Provider + Clone,
{
    async fn add_voting(&self, from: Address, input: &ProposalInput) -> anyhow::Result<TxHash> {
        let receipt = self
            .instance()?
            .addVoting(
                input.title.clone(),
                input.option_one.clone(),
                input.img_option_one.clone(),
                input.option_two.clone(),
                input.img_option_two.clone(),
                U256::from(input.end_date_days),
            )
            .from(from)
            .send()
            .await?
            .get_receipt()
            .await?;

        ensure_success(&receipt)
    }

    async fn add_vote(&self, from: Address, choice: VoteChoice) -> anyhow::Result<TxHash> {
        let receipt = self
            .instance()?
            .addVote(choice.as_u8())
            .from(from)
            .send()
            .await?
            .get_receipt()
            .await?;

        ensure_success(&receipt)
    }

    async fn get_current_voting(&self, from: Address) -> anyhow::Result<Proposal> {
        let data = self.instance()?.getCurrentVoting().from(from).call().await?;

        Ok(data.into())
    }

    async fn current_voting_id(&self, from: Address) -> anyhow::Result<U256> {
        Ok(self.instance()?.currentVoting().from(from).call().await?)
    }

    async fn votes(&self, voting_id: U256, voter: Address) -> anyhow::Result<CallerVote> {
        let record = self
            .instance()?
            .votes(voting_id, voter)
            .from(voter)
            .call()
            .await?;

        Ok(CallerVote::from_raw(
            record.choice,
            record.date.saturating_to(),
        )?)
    }
}

/// An included transaction may still have reverted: only a successful
/// receipt counts as accepted.
fn ensure_success(receipt: &TransactionReceipt) -> anyhow::Result<TxHash> {
    ensure!(
        receipt.status(),
        "transaction reverted: {}",
        receipt.transaction_hash
    );

    Ok(receipt.transaction_hash)
}

// ----------------------------------- tests -----------------------------------
