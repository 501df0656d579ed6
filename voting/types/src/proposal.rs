use {
    crate::{status_label, VoteChoice},
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// The single two-option vote currently held by the contract.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub title: String,
    pub option_one: String,
    pub img_option_one: String,
    pub option_two: String,
    pub img_option_two: String,
    /// UNIX timestamp in seconds after which no more votes are accepted.
    pub end_date: u64,
    pub option_one_votes: u64,
    pub option_two_votes: u64,
}

impl Proposal {
    /// The contract hands back a zero-valued struct when no vote was ever
    /// created. Such a proposal is treated as absent.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.end_date == 0
    }

    /// Return `None` if the proposal is the contract's zero value.
    pub fn non_empty(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    pub fn is_open(&self, now: u64) -> bool {
        self.end_date > now
    }

    pub fn status(&self, now: u64) -> ProposalStatus {
        status_label(self.end_date, now)
    }

    pub fn tally(&self) -> Tally {
        Tally {
            option_one: self.option_one_votes,
            option_two: self.option_two_votes,
        }
    }

    pub fn option_label(&self, choice: VoteChoice) -> &str {
        match choice {
            VoteChoice::One => &self.option_one,
            VoteChoice::Two => &self.option_two,
        }
    }

    pub fn option_image(&self, choice: VoteChoice) -> &str {
        match choice {
            VoteChoice::One => &self.img_option_one,
            VoteChoice::Two => &self.img_option_two,
        }
    }
}

/// Whether a proposal still accepts votes, judged from its end date alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalStatus {
    Open,
    Closed,
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProposalStatus::Open => f.write_str("Open"),
            ProposalStatus::Closed => f.write_str("Closed"),
        }
    }
}

/// Vote counts of the two options, as displayed.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub option_one: u64,
    pub option_two: u64,
}

impl Tally {
    pub fn get(&self, choice: VoteChoice) -> u64 {
        match choice {
            VoteChoice::One => self.option_one,
            VoteChoice::Two => self.option_two,
        }
    }

    /// Add one vote to the bucket of `choice`.
    pub fn with_vote(mut self, choice: VoteChoice) -> Self {
        match choice {
            VoteChoice::One => self.option_one = self.option_one.saturating_add(1),
            VoteChoice::Two => self.option_two = self.option_two.saturating_add(1),
        }

        self
    }
}

// ----------------------------------- tests -----------------------------------
