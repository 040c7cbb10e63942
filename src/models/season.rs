use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const INVALID_SEASON: &str = "시즌 정보가 올바르지 않습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonType {
    #[serde(rename = "SS")]
    Ss,
    #[serde(rename = "FW")]
    Fw,
}

impl SeasonType {
    pub fn as_str(self) -> &'static str {
        match self {
            SeasonType::Ss => "SS",
            SeasonType::Fw => "FW",
        }
    }
}

impl FromStr for SeasonType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SS" => Ok(SeasonType::Ss),
            "FW" => Ok(SeasonType::Fw),
            _ => Err(AppError::validation(INVALID_SEASON)),
        }
    }
}

/// Season code such as `24SS`: a two-digit year followed by the season type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Season {
    year: String,
    kind: SeasonType,
}

impl Season {
    pub fn new(year: &str, kind: SeasonType) -> Result<Self, AppError> {
        if year.len() != 2 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::validation(INVALID_SEASON));
        }
        Ok(Season { year: year.to_string(), kind })
    }

    #[cfg(test)]
    pub fn year(&self) -> &str {
        &self.year
    }

    #[cfg(test)]
    pub fn kind(&self) -> SeasonType {
        self.kind
    }
}

/// What the season-year input accepts: digits only, at most two of them.
pub fn sanitize_year(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).take(2).collect()
}

impl FromStr for Season {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() < 2 || !s.is_char_boundary(2) {
            return Err(AppError::validation(INVALID_SEASON));
        }
        let (year, kind) = s.split_at(2);
        Season::new(year, kind.parse()?)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.year, self.kind.as_str())
    }
}

impl TryFrom<String> for Season {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map_err(|_| INVALID_SEASON.to_string())
    }
}

impl From<Season> for String {
    fn from(season: Season) -> Self {
        season.to_string()
    }
}
