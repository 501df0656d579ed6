use {
    crate::{chain::AppSession, notify, query::print_state},
    clap::Subcommand,
    voting_types::{ProposalInput, VoteChoice},
};

#[derive(Subcommand)]
pub enum TxCmd {
    /// Vote for one option of the current voting
    Vote {
        /// 1 for the first option, 2 for the second
        choice: u8,
        /// Show dates in UTC instead of the local timezone
        #[arg(long)]
        utc: bool,
    },
    /// Create a new voting, replacing the current one (contract owner only)
    Create {
        /// Question put to the voters, at least 3 characters
        #[arg(long)]
        title: String,
        /// Label of the first option, at least 3 characters
        #[arg(long)]
        option_one: String,
        /// Image URL of the first option, at least 10 characters
        #[arg(long)]
        img_option_one: String,
        /// Label of the second option, at least 3 characters
        #[arg(long)]
        option_two: String,
        /// Image URL of the second option, at least 10 characters
        #[arg(long)]
        img_option_two: String,
        /// Number of days the voting stays open
        #[arg(long, default_value_t = 1)]
        days: u64,
    },
}

impl TxCmd {
    pub async fn run(self, mut session: AppSession) -> anyhow::Result<()> {
        match self {
            TxCmd::Vote { choice, utc } => {
                // Reject a bad choice before anything goes over the network.
                let choice = VoteChoice::try_from(choice)?;

                session.refresh().await?;

                let outcome = session.cast_vote(choice.as_u8()).await?;

                notify::success("Voting confirmed!");
                tracing::info!(tx_hash = %outcome.tx_hash, "Vote included");

                match outcome.refresh_error {
                    Some(err) => notify::warning(format!("Failed to reload the voting: {err}")),
                    None => print_state(&session.state(), utc),
                }
            },
            TxCmd::Create {
                title,
                option_one,
                img_option_one,
                option_two,
                img_option_two,
                days,
            } => {
                let input = ProposalInput {
                    title,
                    option_one,
                    img_option_one,
                    option_two,
                    img_option_two,
                    end_date_days: days,
                };

                let tx_hash = session
                    .facade()
                    .submit_proposal(session.context(), &input)
                    .await?;

                notify::success("Voting Created");
                tracing::info!(%tx_hash, "Voting included");
            },
        }

        Ok(())
    }
}
