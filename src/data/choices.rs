use crate::error::{InvalidChoiceSnafu, RosterResult};
use serde::{Deserialize, Serialize};
use snafu::OptionExt;
use std::fmt::{Display, Formatter};

///A closed set of options offered through a `<select>`.
pub trait Choice: Copy + Eq + Sized + 'static {
    ///used in error messages
    const FIELD: &'static str;
    ///every option, in the order they are offered
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse_choice(value: &str) -> RosterResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.as_str() == value)
            .context(InvalidChoiceSnafu {
                field: Self::FIELD,
                value,
            })
    }

    ///the empty string means nothing was picked
    fn parse_optional(value: &str) -> RosterResult<Option<Self>> {
        if value.is_empty() {
            Ok(None)
        } else {
            Self::parse_choice(value).map(Some)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchoolClass {
    #[serde(rename = "PG")]
    PlayGroup,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "11")]
    Eleven,
    #[serde(rename = "12")]
    Twelve,
}

impl Choice for SchoolClass {
    const FIELD: &'static str = "class";
    const ALL: &'static [Self] = &[
        Self::PlayGroup,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Eleven,
        Self::Twelve,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::PlayGroup => "PG",
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Eleven => "11",
            Self::Twelve => "12",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Choice for Section {
    const FIELD: &'static str = "section";
    const ALL: &'static [Self] = &[Self::A, Self::B, Self::C, Self::D, Self::E, Self::F];

    fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    Bangla,
    English,
}

impl Choice for Version {
    const FIELD: &'static str = "version";
    const ALL: &'static [Self] = &[Self::Bangla, Self::English];

    fn as_str(self) -> &'static str {
        match self {
            Self::Bangla => "Bangla",
            Self::English => "English",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wing {
    Boys,
    Girls,
}

impl Choice for Wing {
    const FIELD: &'static str = "wing";
    const ALL: &'static [Self] = &[Self::Boys, Self::Girls];

    fn as_str(self) -> &'static str {
        match self {
            Self::Boys => "Boys",
            Self::Girls => "Girls",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl Choice for BloodGroup {
    const FIELD: &'static str = "blood group";
    const ALL: &'static [Self] = &[
        Self::APositive,
        Self::ANegative,
        Self::BPositive,
        Self::BNegative,
        Self::AbPositive,
        Self::AbNegative,
        Self::OPositive,
        Self::ONegative,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        }
    }
}

impl Display for SchoolClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Wing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for BloodGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
