use {
    crate::{derive_state, ChainView, Reads, SessionState},
    voting_client::{
        ContractFacade, IdentityStore, SessionContext, VotingContract, Wallet, WalletGateway,
    },
    voting_types::{now_seconds, Address, Error, Result, TxHash, VoteChoice},
};

/// Issue the two reads a view needs, concurrently, and merge their results.
pub async fn load_view<C, S>(
    facade: &ContractFacade<C>,
    ctx: &SessionContext<S>,
) -> Result<ChainView>
where
    C: VotingContract,
{
    let (proposal, caller_vote) = futures::try_join!(
        facade.read_current_proposal(ctx),
        facade.read_caller_vote_status(ctx),
    )?;

    Ok(ChainView {
        proposal,
        caller_vote,
    })
}

/// Permission to apply one round of reads to a session.
///
/// A ticket goes stale as soon as the session moves on (logout, reconnect, or
/// a newer refresh). Results brought by a stale ticket are dropped.
#[derive(Debug)]
#[must_use]
pub struct RefreshTicket {
    generation: u64,
}

/// What happened to a read result handed to [`VotingSession::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Accepted,
    Discarded,
}

/// Result of a successful vote.
#[derive(Debug)]
pub struct CastOutcome {
    pub tx_hash: TxHash,
    /// The vote went through, but re-reading the contract afterwards failed.
    /// The session is left loading until the next refresh.
    pub refresh_error: Option<Error>,
}

/// One user's voting session: identity, the reads fetched for it, and the
/// actions the derived state allows.
pub struct VotingSession<W, C, S> {
    gateway: WalletGateway<W>,
    facade: ContractFacade<C>,
    context: SessionContext<S>,
    reads: Reads,
    just_cast: Option<VoteChoice>,
    generation: u64,
}

impl<W, C, S> VotingSession<W, C, S>
where
    W: Wallet,
    C: VotingContract,
    S: IdentityStore,
{
    /// Start a session, picking up the identity persisted by a previous one.
    pub fn init(gateway: WalletGateway<W>, facade: ContractFacade<C>, store: S) -> Result<Self> {
        let context = SessionContext::init(store)?;

        if let Some(identity) = context.identity() {
            tracing::debug!(%identity, "Resuming session");
        }

        Ok(Self {
            gateway,
            facade,
            context,
            reads: Reads::Pending,
            just_cast: None,
            generation: 0,
        })
    }

    pub fn context(&self) -> &SessionContext<S> {
        &self.context
    }

    pub fn facade(&self) -> &ContractFacade<C> {
        &self.facade
    }

    pub fn identity(&self) -> Option<Address> {
        self.gateway.current_identity(&self.context)
    }

    pub fn state_at(&self, now: u64) -> SessionState {
        derive_state(self.identity(), &self.reads, self.just_cast, now)
    }

    pub fn state(&self) -> SessionState {
        self.state_at(now_seconds())
    }

    /// Connect the wallet. The session starts over in `Loading`; nothing
    /// fetched before is kept.
    pub async fn connect(&mut self) -> Result<Address> {
        let identity = self.gateway.connect(&mut self.context).await?;

        self.reset();

        Ok(identity)
    }

    /// Forget the identity and everything fetched for it.
    pub fn logout(&mut self) -> Result<()> {
        self.reset();

        self.gateway.disconnect(&mut self.context)
    }

    /// Mark the reads as pending and hand out the ticket to apply their
    /// results with. Returns `None` when logged out: there's nothing to read.
    pub fn begin_refresh(&mut self) -> Option<RefreshTicket> {
        self.identity()?;

        self.generation += 1;
        self.reads = Reads::Pending;

        Some(RefreshTicket {
            generation: self.generation,
        })
    }

    /// Apply the outcome of the reads started with `ticket`.
    ///
    /// A stale ticket's result is discarded silently, whether it succeeded or
    /// not. A failed read leaves the session in `Loading` and is returned.
    pub fn apply(&mut self, ticket: RefreshTicket, result: Result<ChainView>) -> Result<Applied> {
        if ticket.generation != self.generation || self.identity().is_none() {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale read result"
            );

            return Ok(Applied::Discarded);
        }

        self.reads = Reads::Ready(result?);

        Ok(Applied::Accepted)
    }

    /// Re-read the contract as on entering the view. Any optimistic vote shown
    /// so far is replaced by the contract's numbers.
    pub async fn refresh(&mut self) -> Result<SessionState> {
        self.just_cast = None;

        self.reload().await
    }

    /// Vote for `choice`, then re-read the contract.
    ///
    /// Only allowed while voting is open. On failure the session is left
    /// untouched, and nothing is retried.
    pub async fn cast_vote(&mut self, choice: u8) -> Result<CastOutcome> {
        let choice = VoteChoice::try_from(choice)?;

        match self.state() {
            SessionState::VotingOpen { .. } => {},
            SessionState::LoggedOut => return Err(Error::NotConnected),
            other => return Err(Error::NotPermitted(other.name())),
        }

        let tx_hash = self.facade.cast_vote(&self.context, choice.as_u8()).await?;

        self.just_cast = Some(choice);

        let refresh_error = self.reload().await.err();
        if let Some(err) = &refresh_error {
            tracing::warn!(%tx_hash, "Failed to reload after voting: {err}");
        }

        Ok(CastOutcome {
            tx_hash,
            refresh_error,
        })
    }

    async fn reload(&mut self) -> Result<SessionState> {
        let Some(ticket) = self.begin_refresh() else {
            return Ok(SessionState::LoggedOut);
        };

        let result = load_view(&self.facade, &self.context).await;

        self.apply(ticket, result)?;

        Ok(self.state())
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.reads = Reads::Pending;
        self.just_cast = None;
    }
}
