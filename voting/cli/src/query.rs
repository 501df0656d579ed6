use {
    crate::{chain::AppSession, notify},
    chrono::{Local, TimeZone, Utc},
    clap::Parser,
    colored::Colorize,
    std::fmt::{Display, Write},
    voting_session::SessionState,
    voting_types::{date_formatter, now_seconds, votes_label, VoteChoice},
};

#[derive(Parser)]
pub struct QueryCmd {
    /// Show dates in UTC instead of the local timezone
    #[arg(long)]
    utc: bool,
}

impl QueryCmd {
    pub async fn run(self, mut session: AppSession) -> anyhow::Result<()> {
        let state = session.refresh().await?;

        if !matches!(state, SessionState::LoggedOut) {
            notify::success("Voting loaded");
        }

        print_state(&state, self.utc);

        Ok(())
    }
}

pub fn print_state(state: &SessionState, utc: bool) {
    let now = now_seconds();

    let view = if utc {
        render(state, now, &Utc)
    } else {
        render(state, now, &Local)
    };

    print!("{view}");
}

/// The voting view as text, for the session in `state`.
pub fn render<Tz>(state: &SessionState, now: u64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();

    let Some(proposal) = state.proposal() else {
        let message = match state {
            SessionState::LoggedOut => {
                "Wallet not connected! Run `voting wallet connect` to see the current voting."
            },
            SessionState::Loading { .. } => "Loading...",
            _ => "No voting open at the moment!",
        };

        return format!("{message}\n");
    };

    // Writing into a `String` never fails.
    let _ = writeln!(out, "{}", proposal.title.bold());
    let _ = writeln!(
        out,
        "Ends: {} ({})",
        date_formatter(proposal.end_date, tz),
        proposal.status(now)
    );

    let voted = match state {
        SessionState::AlreadyVoted { choice, .. } => Some(*choice),
        _ => None,
    };

    for choice in [VoteChoice::One, VoteChoice::Two] {
        let result = match state.tally() {
            Some(tally) => votes_label(tally.get(choice)),
            None => format!("vote with `voting tx vote {choice}`"),
        };

        let marker = if voted == Some(choice) { "*" } else { " " };

        let _ = writeln!(
            out,
            "{marker} {choice}. {} <{}> {result}",
            proposal.option_label(choice),
            proposal.option_image(choice),
        );
    }

    if let Some(choice) = voted {
        let _ = writeln!(out, "You voted for option {choice}.");
    }

    out
}

// ----------------------------------- tests -----------------------------------
