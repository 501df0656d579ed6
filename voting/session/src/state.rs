use voting_types::{Address, CallerVote, Proposal, ProposalStatus, Tally, VoteChoice};

/// What the two reads issued at view entry returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainView {
    pub proposal: Option<Proposal>,
    pub caller_vote: CallerVote,
}

/// Progress of the reads feeding the state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Reads {
    /// Issued, or about to be, and not resolved yet.
    #[default]
    Pending,
    Ready(ChainView),
}

/// Everything the user can see of a voting session, and therefore everything
/// they're allowed to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No identity. The only way out is connecting a wallet.
    LoggedOut,
    /// Identity known, proposal and vote status still being fetched.
    Loading { identity: Address },
    /// The contract holds no proposal.
    NoActiveVote { identity: Address },
    /// The proposal accepts votes and the caller hasn't voted.
    VotingOpen {
        identity: Address,
        proposal: Proposal,
    },
    /// The caller voted. `tally` is what to display, which may include the
    /// caller's own vote ahead of the contract.
    AlreadyVoted {
        identity: Address,
        proposal: Proposal,
        choice: VoteChoice,
        tally: Tally,
    },
    /// The proposal ended without the caller voting.
    VotingClosed {
        identity: Address,
        proposal: Proposal,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::LoggedOut => "logged out",
            SessionState::Loading { .. } => "loading",
            SessionState::NoActiveVote { .. } => "without an active vote",
            SessionState::VotingOpen { .. } => "open for voting",
            SessionState::AlreadyVoted { .. } => "already voted",
            SessionState::VotingClosed { .. } => "closed",
        }
    }

    pub fn identity(&self) -> Option<Address> {
        match self {
            SessionState::LoggedOut => None,
            SessionState::Loading { identity }
            | SessionState::NoActiveVote { identity }
            | SessionState::VotingOpen { identity, .. }
            | SessionState::AlreadyVoted { identity, .. }
            | SessionState::VotingClosed { identity, .. } => Some(*identity),
        }
    }

    pub fn proposal(&self) -> Option<&Proposal> {
        match self {
            SessionState::VotingOpen { proposal, .. }
            | SessionState::AlreadyVoted { proposal, .. }
            | SessionState::VotingClosed { proposal, .. } => Some(proposal),
            _ => None,
        }
    }

    /// Both vote actions are enabled in exactly one state.
    pub fn can_vote(&self) -> bool {
        matches!(self, SessionState::VotingOpen { .. })
    }

    /// The counts to display, or `None` while the vote buttons are shown
    /// instead.
    pub fn tally(&self) -> Option<Tally> {
        match self {
            SessionState::AlreadyVoted { tally, .. } => Some(*tally),
            SessionState::VotingClosed { proposal, .. } => Some(proposal.tally()),
            _ => None,
        }
    }

    /// The Open/Closed label. Uses the end date alone, so a caller who voted
    /// on a proposal that's still running sees `Open`.
    pub fn status(&self, now: u64) -> Option<ProposalStatus> {
        self.proposal().map(|proposal| proposal.status(now))
    }
}

/// Derive the session state from its inputs.
///
/// - `identity`: the connected wallet address, if any;
/// - `reads`: the current proposal and the caller's vote record, once fetched;
/// - `just_cast`: the choice the caller successfully voted for earlier in this
///   session, if any. When it matches the recorded vote, one is added to its
///   bucket of the displayed tally, until the next refresh.
/// - `now`: wall-clock UNIX time in seconds, compared to the end date.
///
/// A recorded vote takes precedence over the end date: a caller who voted sees
/// `AlreadyVoted` whether or not the proposal has ended.
pub fn derive_state(
    identity: Option<Address>,
    reads: &Reads,
    just_cast: Option<VoteChoice>,
    now: u64,
) -> SessionState {
    let Some(identity) = identity else {
        return SessionState::LoggedOut;
    };

    let Reads::Ready(view) = reads else {
        return SessionState::Loading { identity };
    };

    let Some(proposal) = view.proposal.clone() else {
        return SessionState::NoActiveVote { identity };
    };

    match view.caller_vote.choice {
        Some(choice) => {
            let tally = match just_cast {
                Some(cast) if cast == choice => proposal.tally().with_vote(cast),
                _ => proposal.tally(),
            };

            SessionState::AlreadyVoted {
                identity,
                proposal,
                choice,
                tally,
            }
        },
        None if proposal.is_open(now) => SessionState::VotingOpen { identity, proposal },
        None => SessionState::VotingClosed { identity, proposal },
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case, voting_client::testing::sample_proposal};

    const ALICE: Address = Address::repeat_byte(0xa1);
    const NOW: u64 = 1_700_000_000;

    fn ready(proposal: Option<Proposal>, choice: Option<VoteChoice>) -> Reads {
        Reads::Ready(ChainView {
            proposal,
            caller_vote: CallerVote {
                choice,
                cast_at: choice.map(|_| NOW - 10),
            },
        })
    }

    #[test_case(None, Reads::Pending => "logged out"; "no identity")]
    #[test_case(
        None,
        ready(Some(sample_proposal(NOW + 1)), None)
        => "logged out";
        "no identity ignores stale reads"
    )]
    #[test_case(Some(ALICE), Reads::Pending => "loading"; "reads in flight")]
    #[test_case(Some(ALICE), ready(None, None) => "without an active vote"; "no proposal")]
    #[test_case(
        Some(ALICE),
        ready(Some(sample_proposal(NOW + 1)), None)
        => "open for voting";
        "future end date and not voted"
    )]
    #[test_case(
        Some(ALICE),
        ready(Some(sample_proposal(NOW)), None)
        => "closed";
        "ends exactly now"
    )]
    #[test_case(
        Some(ALICE),
        ready(Some(sample_proposal(NOW - 1)), None)
        => "closed";
        "past end date and not voted"
    )]
    #[test_case(
        Some(ALICE),
        ready(Some(sample_proposal(NOW + 1)), Some(VoteChoice::One))
        => "already voted";
        "voted on open proposal"
    )]
    #[test_case(
        Some(ALICE),
        ready(Some(sample_proposal(NOW - 1)), Some(VoteChoice::Two))
        => "already voted";
        "voted on closed proposal"
    )]
    fn deriving_state(identity: Option<Address>, reads: Reads) -> &'static str {
        derive_state(identity, &reads, None, NOW).name()
    }

    #[test]
    fn only_open_voting_permits_votes() {
        let open = derive_state(
            Some(ALICE),
            &ready(Some(sample_proposal(NOW + 1)), None),
            None,
            NOW,
        );
        let closed = derive_state(
            Some(ALICE),
            &ready(Some(sample_proposal(NOW - 1)), None),
            None,
            NOW,
        );

        assert!(open.can_vote());
        assert_eq!(open.tally(), None);

        assert!(!closed.can_vote());
        assert_eq!(closed.tally(), Some(sample_proposal(0).tally()));
        assert_eq!(closed.status(NOW), Some(ProposalStatus::Closed));
    }

    #[test]
    fn already_voted_keeps_open_label_while_running() {
        let state = derive_state(
            Some(ALICE),
            &ready(Some(sample_proposal(NOW + 1)), Some(VoteChoice::One)),
            None,
            NOW,
        );

        assert!(!state.can_vote());
        assert_eq!(state.status(NOW), Some(ProposalStatus::Open));
    }

    // `sample_proposal` reports 4 votes for option one and 7 for option two.
    #[test_case(None => Tally { option_one: 4, option_two: 7 }; "fresh load shows contract tally")]
    #[test_case(Some(VoteChoice::Two) => Tally { option_one: 4, option_two: 8 }; "same session cast adds one")]
    #[test_case(Some(VoteChoice::One) => Tally { option_one: 4, option_two: 7 }; "cast for another choice is ignored")]
    fn optimistic_tally(just_cast: Option<VoteChoice>) -> Tally {
        derive_state(
            Some(ALICE),
            &ready(Some(sample_proposal(NOW - 1)), Some(VoteChoice::Two)),
            just_cast,
            NOW,
        )
        .tally()
        .unwrap()
    }

    #[test]
    fn accessors_expose_identity_and_proposal() {
        let state = derive_state(Some(ALICE), &ready(None, None), None, NOW);

        assert_eq!(state.identity(), Some(ALICE));
        assert_eq!(state.proposal(), None);
        assert_eq!(state.status(NOW), None);
        assert_eq!(SessionState::LoggedOut.identity(), None);
    }
}
