use {
    crate::{SessionContext, VotingContract},
    voting_types::{CallerVote, Error, Proposal, ProposalInput, Result, TxHash, VoteChoice},
};

/// The application's only way into the voting contract.
///
/// Every operation needs a connected identity, taken from the session context.
/// Inputs are validated before anything leaves the process, and whatever the
/// contract or transport reports is folded into the error taxonomy:
/// state-changing calls fail with `TransactionRejected`, reads with
/// `ReadFailure`.
pub struct ContractFacade<C> {
    contract: C,
}

impl<C> ContractFacade<C>
where
    C: VotingContract,
{
    pub fn new(contract: C) -> Self {
        Self { contract }
    }

    pub fn contract(&self) -> &C {
        &self.contract
    }

    /// Open a new vote. Only the contract owner is allowed to; the contract
    /// enforces that, not us.
    pub async fn submit_proposal<S>(
        &self,
        ctx: &SessionContext<S>,
        input: &ProposalInput,
    ) -> Result<TxHash> {
        input.validate()?;

        let from = ctx.require_identity()?;

        tracing::debug!(
            %from,
            title = %input.title,
            days = input.end_date_days,
            "Submitting proposal"
        );

        let tx_hash = self
            .contract
            .add_voting(from, input)
            .await
            .map_err(|err| {
                tracing::warn!(%from, "Proposal rejected: {err:#}");
                Error::transaction_rejected(format!("{err:#}"))
            })?;

        tracing::info!(%tx_hash, "Proposal created");

        Ok(tx_hash)
    }

    pub async fn cast_vote<S>(&self, ctx: &SessionContext<S>, choice: u8) -> Result<TxHash> {
        let choice = VoteChoice::try_from(choice)?;

        let from = ctx.require_identity()?;

        tracing::debug!(%from, %choice, "Casting vote");

        let tx_hash = self
            .contract
            .add_vote(from, choice)
            .await
            .map_err(|err| {
                tracing::warn!(%from, %choice, "Vote rejected: {err:#}");
                Error::transaction_rejected(format!("{err:#}"))
            })?;

        tracing::info!(%tx_hash, %choice, "Vote confirmed");

        Ok(tx_hash)
    }

    /// The proposal currently held by the contract, if any.
    pub async fn read_current_proposal<S>(
        &self,
        ctx: &SessionContext<S>,
    ) -> Result<Option<Proposal>> {
        let from = ctx.require_identity()?;

        let proposal = self
            .contract
            .get_current_voting(from)
            .await
            .map_err(|err| Error::read_failure(format!("{err:#}")))?;

        Ok(proposal.non_empty())
    }

    /// How the current identity voted on the active proposal.
    ///
    /// The active proposal's id is resolved first, then the record for
    /// `(id, identity)` is looked up.
    pub async fn read_caller_vote_status<S>(&self, ctx: &SessionContext<S>) -> Result<CallerVote> {
        let from = ctx.require_identity()?;

        let voting_id = self
            .contract
            .current_voting_id(from)
            .await
            .map_err(|err| Error::read_failure(format!("{err:#}")))?;

        self.contract
            .votes(voting_id, from)
            .await
            .map_err(|err| match err.downcast::<Error>() {
                Ok(err) => err,
                Err(err) => Error::read_failure(format!("{err:#}")),
            })
    }
}

// ----------------------------------- tests -----------------------------------
