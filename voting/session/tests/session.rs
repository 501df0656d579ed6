use {
    crate::utils::{setup_connected_session, setup_session, ALICE},
    voting_client::{
        testing::{sample_proposal, MockContract},
        IdentityStore, MemoryIdentityStore,
    },
    voting_session::{load_view, Applied, SessionState},
    voting_types::{Error, Tally, VoteChoice},
};

mod utils;

// `sample_proposal` reports 4 votes for option one and 7 for option two.
const SAMPLE_TALLY: Tally = Tally {
    option_one: 4,
    option_two: 7,
};

#[tokio::test]
async fn logged_out_issues_no_reads() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut session = setup_session(&contract, MemoryIdentityStore::default());

    assert_eq!(session.state(), SessionState::LoggedOut);
    assert_eq!(session.refresh().await?, SessionState::LoggedOut);
    assert!(session.begin_refresh().is_none());
    assert_eq!(session.cast_vote(1).await.unwrap_err(), Error::NotConnected);

    assert_eq!(contract.calls(), 0);

    Ok(())
}

#[tokio::test]
async fn connect_then_load_open_voting() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut session = setup_session(&contract, MemoryIdentityStore::default());

    assert_eq!(session.connect().await?, ALICE);
    assert_eq!(session.context().store().load()?, Some(ALICE));
    assert_eq!(session.state(), SessionState::Loading { identity: ALICE });

    let state = session.refresh().await?;

    assert_eq!(state, SessionState::VotingOpen {
        identity: ALICE,
        proposal: contract.proposal(),
    });
    assert!(state.can_vote());

    Ok(())
}

#[tokio::test]
async fn resumed_session_starts_loading() -> anyhow::Result<()> {
    let contract = MockContract::new();
    let mut session = setup_connected_session(&contract);

    assert_eq!(session.state(), SessionState::Loading { identity: ALICE });
    assert_eq!(contract.calls(), 0);

    assert_eq!(session.refresh().await?, SessionState::NoActiveVote {
        identity: ALICE
    });
    assert_eq!(
        session.cast_vote(1).await.unwrap_err(),
        Error::NotPermitted("without an active vote")
    );

    Ok(())
}

#[tokio::test]
async fn closed_voting_cannot_be_voted_on() -> anyhow::Result<()> {
    let contract = MockContract::new().with_closed_proposal();
    let mut session = setup_connected_session(&contract);

    let state = session.refresh().await?;
    assert!(matches!(state, SessionState::VotingClosed { .. }));
    assert!(!state.can_vote());
    assert_eq!(state.tally(), Some(SAMPLE_TALLY));

    let calls = contract.calls();

    assert_eq!(
        session.cast_vote(1).await.unwrap_err(),
        Error::NotPermitted("closed")
    );
    assert_eq!(contract.calls(), calls);

    Ok(())
}

#[tokio::test]
async fn already_voted_wins_over_closure() -> anyhow::Result<()> {
    let contract = MockContract::new().with_closed_proposal();
    contract.record_vote(ALICE, VoteChoice::One);

    let mut session = setup_connected_session(&contract);

    assert_eq!(session.refresh().await?, SessionState::AlreadyVoted {
        identity: ALICE,
        proposal: contract.proposal(),
        choice: VoteChoice::One,
        tally: SAMPLE_TALLY,
    });

    Ok(())
}

#[tokio::test]
async fn invalid_choice_is_rejected_before_anything() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut session = setup_connected_session(&contract);

    session.refresh().await?;
    let calls = contract.calls();

    assert_eq!(session.cast_vote(3).await.unwrap_err(), Error::InvalidChoice(3));
    assert_eq!(contract.calls(), calls);
    assert!(matches!(session.state(), SessionState::VotingOpen { .. }));

    Ok(())
}

#[tokio::test]
async fn vote_adds_one_until_refresh() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut session = setup_connected_session(&contract);

    session.refresh().await?;

    let outcome = session.cast_vote(2).await?;
    assert!(outcome.refresh_error.is_none());

    // The contract counts the vote: 4 and 8.
    let counted = contract.proposal().tally();
    assert_eq!(counted, Tally {
        option_one: 4,
        option_two: 8,
    });

    // Right after voting, the caller's bucket shows one more.
    assert_eq!(session.state(), SessionState::AlreadyVoted {
        identity: ALICE,
        proposal: contract.proposal(),
        choice: VoteChoice::Two,
        tally: Tally {
            option_one: 4,
            option_two: 9,
        },
    });

    // A fresh session shows the contract's numbers as they are.
    let mut fresh = setup_connected_session(&contract);
    let fresh_tally = fresh.refresh().await?.tally();

    assert_eq!(fresh_tally, Some(counted));
    assert_ne!(session.state().tally(), fresh_tally);

    // So does an explicit refresh of the voting session.
    assert_eq!(session.refresh().await?.tally(), Some(counted));

    Ok(())
}

#[tokio::test]
async fn logout_drops_the_extra_vote() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut session = setup_connected_session(&contract);

    session.refresh().await?;
    session.cast_vote(1).await?;

    session.logout()?;
    session.connect().await?;

    // Apply the reads directly, without the reset `refresh` performs itself.
    let ticket = session.begin_refresh().unwrap();
    let result = load_view(session.facade(), session.context()).await;
    session.apply(ticket, result)?;

    assert_eq!(session.state().tally(), Some(contract.proposal().tally()));

    Ok(())
}

#[tokio::test]
async fn reverted_vote_leaves_voting_open() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut session = setup_connected_session(&contract);

    session.refresh().await?;
    contract.revert_writes("voting is closed");

    let err = session.cast_vote(2).await.unwrap_err();
    assert!(matches!(err, Error::TransactionRejected(reason) if reason.contains("reverted")));

    assert_eq!(session.state(), SessionState::VotingOpen {
        identity: ALICE,
        proposal: contract.proposal(),
    });

    Ok(())
}

#[tokio::test]
async fn rejected_vote_leaves_voting_open() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut session = setup_connected_session(&contract);

    session.refresh().await?;
    contract.fail_writes("insufficient funds for gas");

    let err = session.cast_vote(1).await.unwrap_err();
    assert!(matches!(err, Error::TransactionRejected(reason) if reason.contains("insufficient funds")));

    assert_eq!(session.state(), SessionState::VotingOpen {
        identity: ALICE,
        proposal: contract.proposal(),
    });

    Ok(())
}

#[tokio::test]
async fn duplicate_vote_is_rejected_by_contract() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut first = setup_connected_session(&contract);
    let mut second = setup_connected_session(&contract);

    first.refresh().await?;
    second.refresh().await?;

    first.cast_vote(1).await?;

    // The second session still believes voting is open.
    let err = second.cast_vote(2).await.unwrap_err();
    assert!(matches!(err, Error::TransactionRejected(reason) if reason.contains("already voted")));

    Ok(())
}

#[tokio::test]
async fn failed_read_leaves_session_loading() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut session = setup_connected_session(&contract);

    contract.fail_reads("connection refused");

    assert!(matches!(session.refresh().await, Err(Error::ReadFailure(_))));
    assert_eq!(session.state(), SessionState::Loading { identity: ALICE });

    contract.heal();

    assert!(session.refresh().await?.can_vote());

    Ok(())
}

#[tokio::test]
async fn vote_succeeds_even_if_reload_fails() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut session = setup_connected_session(&contract);

    session.refresh().await?;
    contract.fail_reads("connection reset");

    let outcome = session.cast_vote(1).await?;

    assert!(matches!(outcome.refresh_error, Some(Error::ReadFailure(_))));
    assert_eq!(session.state(), SessionState::Loading { identity: ALICE });

    Ok(())
}

#[tokio::test]
async fn result_arriving_after_logout_is_discarded() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut session = setup_connected_session(&contract);

    let ticket = session.begin_refresh().unwrap();
    let result = load_view(session.facade(), session.context()).await;

    session.logout()?;

    assert_eq!(session.apply(ticket, result)?, Applied::Discarded);
    assert_eq!(session.state(), SessionState::LoggedOut);
    assert_eq!(session.context().store().load()?, None);

    Ok(())
}

#[tokio::test]
async fn only_the_latest_refresh_is_applied() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut session = setup_connected_session(&contract);

    let older = session.begin_refresh().unwrap();
    let older_result = load_view(session.facade(), session.context()).await;

    let newer = session.begin_refresh().unwrap();
    let newer_result = load_view(session.facade(), session.context()).await;

    assert_eq!(session.apply(older, older_result)?, Applied::Discarded);
    assert_eq!(session.state(), SessionState::Loading { identity: ALICE });

    assert_eq!(session.apply(newer, newer_result)?, Applied::Accepted);
    assert!(session.state().can_vote());

    Ok(())
}

#[tokio::test]
async fn reconnect_derives_from_fresh_reads() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut session = setup_connected_session(&contract);

    assert!(session.refresh().await?.can_vote());

    session.logout()?;
    assert_eq!(session.state(), SessionState::LoggedOut);

    // Meanwhile, Alice voted from another device.
    contract.record_vote(ALICE, VoteChoice::Two);

    session.connect().await?;
    assert_eq!(session.state(), SessionState::Loading { identity: ALICE });

    assert_eq!(session.refresh().await?, SessionState::AlreadyVoted {
        identity: ALICE,
        proposal: contract.proposal(),
        choice: VoteChoice::Two,
        tally: SAMPLE_TALLY,
    });

    Ok(())
}

#[tokio::test]
async fn new_proposal_replaces_the_old_vote() -> anyhow::Result<()> {
    let contract = MockContract::new().with_open_proposal();
    let mut session = setup_connected_session(&contract);

    session.refresh().await?;
    session.cast_vote(1).await?;
    assert!(!session.state().can_vote());

    contract.set_proposal(sample_proposal(u64::MAX));

    assert!(session.refresh().await?.can_vote());

    Ok(())
}
