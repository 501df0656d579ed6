use {
    crate::{Error, Result},
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// One of the two options of a proposal.
///
/// On the wire a choice is a `uint8`: `1` for the first option, `2` for the
/// second. `0` means "hasn't voted" and is modelled as the absence of a
/// choice, see [`CallerVote`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    One,
    Two,
}

impl VoteChoice {
    pub const fn as_u8(self) -> u8 {
        match self {
            VoteChoice::One => 1,
            VoteChoice::Two => 2,
        }
    }
}

impl TryFrom<u8> for VoteChoice {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(VoteChoice::One),
            2 => Ok(VoteChoice::Two),
            other => Err(Error::InvalidChoice(other)),
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// The contract's record of whether, and how, the current identity voted on
/// the active proposal.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallerVote {
    pub choice: Option<VoteChoice>,
    /// UNIX timestamp in seconds of when the vote was cast.
    pub cast_at: Option<u64>,
}

impl CallerVote {
    pub const NOT_VOTED: Self = Self {
        choice: None,
        cast_at: None,
    };

    pub const fn voted(choice: VoteChoice, cast_at: u64) -> Self {
        Self {
            choice: Some(choice),
            cast_at: Some(cast_at),
        }
    }

    /// Interpret the raw `(choice, date)` pair stored by the contract.
    ///
    /// A zero choice means "not voted", whatever the date says. Any value other
    /// than 0, 1 or 2 can only come from a contract that doesn't match the
    /// interface we were built against, so it's reported as a failed read.
    pub fn from_raw(choice: u8, date: u64) -> Result<Self> {
        if choice == 0 {
            return Ok(Self::NOT_VOTED);
        }

        let choice = VoteChoice::try_from(choice).map_err(|_| {
            Error::ReadFailure(format!("contract reported unknown vote choice `{choice}`"))
        })?;

        Ok(Self {
            choice: Some(choice),
            cast_at: (date != 0).then_some(date),
        })
    }

    pub fn has_voted(&self) -> bool {
        self.choice.is_some()
    }

    /// The raw `uint8` representation, `0` if not voted.
    pub fn raw_choice(&self) -> u8 {
        self.choice.map(VoteChoice::as_u8).unwrap_or(0)
    }
}

// ----------------------------------- tests -----------------------------------
