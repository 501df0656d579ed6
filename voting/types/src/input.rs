use {
    crate::{Error, Result},
    serde::{Deserialize, Serialize},
    std::fmt,
};

pub const MIN_TITLE_LEN: usize = 3;
pub const MIN_OPTION_LEN: usize = 3;
pub const MIN_IMAGE_URL_LEN: usize = 10;
pub const MIN_DURATION_DAYS: u64 = 1;

/// The fields of a [`ProposalInput`], used to point at the offending one when
/// validation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Title,
    OptionOne,
    ImgOptionOne,
    OptionTwo,
    ImgOptionTwo,
    EndDateDays,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputField::Title => "title",
            InputField::OptionOne => "option_one",
            InputField::ImgOptionOne => "img_option_one",
            InputField::OptionTwo => "option_two",
            InputField::ImgOptionTwo => "img_option_two",
            InputField::EndDateDays => "end_date_days",
        };

        f.write_str(name)
    }
}

/// What the contract owner submits to open a new vote.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProposalInput {
    pub title: String,
    pub option_one: String,
    pub img_option_one: String,
    pub option_two: String,
    pub img_option_two: String,
    /// How many days the vote stays open, counted from the block that includes
    /// the transaction.
    pub end_date_days: u64,
}

impl ProposalInput {
    /// Check the input locally, before anything is sent to the contract.
    ///
    /// Fields are checked in form order and the first offending one is
    /// reported. Lengths are counted in characters, not bytes.
    pub fn validate(&self) -> Result<()> {
        check_min_len(InputField::Title, &self.title, MIN_TITLE_LEN)?;
        check_min_len(InputField::OptionOne, &self.option_one, MIN_OPTION_LEN)?;
        check_min_len(
            InputField::ImgOptionOne,
            &self.img_option_one,
            MIN_IMAGE_URL_LEN,
        )?;
        check_min_len(InputField::OptionTwo, &self.option_two, MIN_OPTION_LEN)?;
        check_min_len(
            InputField::ImgOptionTwo,
            &self.img_option_two,
            MIN_IMAGE_URL_LEN,
        )?;

        if self.end_date_days < MIN_DURATION_DAYS {
            return Err(Error::invalid_input(
                InputField::EndDateDays,
                "the quantity of days must be greater than zero",
            ));
        }

        Ok(())
    }
}

fn check_min_len(field: InputField, value: &str, min: usize) -> Result<()> {
    if value.chars().count() < min {
        return Err(Error::invalid_input(
            field,
            format!("must be at least {min} characters long"),
        ));
    }

    Ok(())
}

// ----------------------------------- tests -----------------------------------
