//! Date values as written in `DATE` lines.
//!
//! Supports plain dates (`6 MAY 1989`, `MAY 1989`, `1989`), qualified dates
//! (`ABT 1888`, `BEF 1900`, `AFT 1900`, `EST 1900`, `CAL 1900`), ranges
//! (`BET 1900 AND 1910`) and periods (`FROM 1900 TO 1910`, `FROM 1900`,
//! `TO 1910`). Keywords and month names are case-insensitive.

use std::str::FromStr;

use crate::error::DateError;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateConstraint {
    #[default]
    Exact,
    About,
    Before,
    After,
    Estimated,
    Calculated,
}

impl DateConstraint {
    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "ABT" | "ABOUT" | "CIRCA" => Some(DateConstraint::About),
            "BEF" | "BEFORE" => Some(DateConstraint::Before),
            "AFT" | "AFTER" => Some(DateConstraint::After),
            "EST" => Some(DateConstraint::Estimated),
            "CAL" => Some(DateConstraint::Calculated),
            _ => None,
        }
    }
}

/// A single point in time with optional day and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DatePoint {
    pub year: i32,
    pub month: Option<u8>,
    pub day: Option<u8>,
}

impl DatePoint {
    pub fn year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
        }
    }

    pub fn ymd(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            month: Some(month),
            day: Some(day),
        }
    }

    fn parse(words: &[String]) -> Option<Self> {
        match words {
            [year] => Some(Self::year(parse_year(year)?)),
            [month, year] => Some(Self {
                year: parse_year(year)?,
                month: Some(parse_month(month)?),
                day: None,
            }),
            [day, month, year] => {
                let day: u8 = day.parse().ok().filter(|d| (1..=31).contains(d))?;
                Some(Self {
                    year: parse_year(year)?,
                    month: Some(parse_month(month)?),
                    day: Some(day),
                })
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for DatePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(day) = self.day {
            write!(f, "{day} ")?;
        }
        let month = self
            .month
            .and_then(|m| MONTHS.get(usize::from(m).checked_sub(1)?));
        if let Some(month) = month {
            write!(f, "{month} ")?;
        }
        write!(f, "{}", self.year)
    }
}

/// A parsed date value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Date {
    Single {
        constraint: DateConstraint,
        point: DatePoint,
    },
    /// `BET start AND end`
    Range { start: DatePoint, end: DatePoint },
    /// `FROM start TO end`, either side may be missing
    Period {
        from: Option<DatePoint>,
        to: Option<DatePoint>,
    },
}

impl Date {
    /// The earliest year mentioned by the date.
    pub fn year(&self) -> Option<i32> {
        match self {
            Date::Single { point, .. } => Some(point.year),
            Date::Range { start, .. } => Some(start.year),
            Date::Period { from, to } => from.or(*to).map(|p| p.year),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(
            self,
            Date::Single {
                constraint: DateConstraint::Exact,
                point: DatePoint {
                    day: Some(_),
                    month: Some(_),
                    ..
                }
            }
        )
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<String> = s.split_whitespace().map(str::to_uppercase).collect();
        let unrecognised = || DateError::Unrecognised(s.trim().to_owned());

        let Some(first) = words.first() else {
            return Err(DateError::Empty);
        };

        match first.as_str() {
            "BET" => {
                let and = words.iter().position(|w| w == "AND").ok_or_else(unrecognised)?;
                let start = DatePoint::parse(&words[1..and]).ok_or_else(unrecognised)?;
                let end = DatePoint::parse(&words[and + 1..]).ok_or_else(unrecognised)?;
                Ok(Date::Range { start, end })
            }
            "FROM" => {
                let to = words.iter().position(|w| w == "TO");
                let from_words = &words[1..to.unwrap_or(words.len())];
                let from = DatePoint::parse(from_words).ok_or_else(unrecognised)?;
                let to = match to {
                    Some(idx) => Some(DatePoint::parse(&words[idx + 1..]).ok_or_else(unrecognised)?),
                    None => None,
                };
                Ok(Date::Period {
                    from: Some(from),
                    to,
                })
            }
            "TO" => {
                let to = DatePoint::parse(&words[1..]).ok_or_else(unrecognised)?;
                Ok(Date::Period { from: None, to: Some(to) })
            }
            keyword => {
                let (constraint, rest) = match DateConstraint::from_keyword(keyword) {
                    Some(constraint) => (constraint, &words[1..]),
                    None => (DateConstraint::Exact, &words[..]),
                };
                let point = DatePoint::parse(rest).ok_or_else(unrecognised)?;
                Ok(Date::Single { constraint, point })
            }
        }
    }
}

fn parse_month(word: &str) -> Option<u8> {
    MONTHS
        .iter()
        .position(|m| *m == word)
        .and_then(|idx| u8::try_from(idx + 1).ok())
}

fn parse_year(word: &str) -> Option<i32> {
    // Dual dating such as 1750/51 keeps the first year
    let year = word.split('/').next()?;
    if year.is_empty() || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    year.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exact() {
        let date: Date = "6 MAY 1989".parse().unwrap();
        assert_eq!(
            date,
            Date::Single {
                constraint: DateConstraint::Exact,
                point: DatePoint::ymd(1989, 5, 6),
            }
        );
        assert!(date.is_exact());
        assert_eq!(date.year(), Some(1989));
    }

    #[test]
    fn parse_partial_and_qualified() {
        assert_eq!(
            "sep 1945".parse::<Date>().unwrap(),
            Date::Single {
                constraint: DateConstraint::Exact,
                point: DatePoint {
                    year: 1945,
                    month: Some(9),
                    day: None
                },
            }
        );

        let about: Date = "abt 1888".parse().unwrap();
        assert_eq!(
            about,
            Date::Single {
                constraint: DateConstraint::About,
                point: DatePoint::year(1888),
            }
        );
        assert!(!about.is_exact());

        assert!(matches!(
            "BEF 1900".parse::<Date>(),
            Ok(Date::Single {
                constraint: DateConstraint::Before,
                ..
            })
        ));
    }

    #[test]
    fn parse_range_and_period() {
        assert_eq!(
            "BET 1900 AND 3 MAR 1910".parse::<Date>().unwrap(),
            Date::Range {
                start: DatePoint::year(1900),
                end: DatePoint::ymd(1910, 3, 3),
            }
        );

        assert_eq!(
            "FROM 1900 TO 1910".parse::<Date>().unwrap(),
            Date::Period {
                from: Some(DatePoint::year(1900)),
                to: Some(DatePoint::year(1910)),
            }
        );

        let to: Date = "TO 1910".parse().unwrap();
        assert_eq!(to.year(), Some(1910));
    }

    #[test]
    fn dual_year_keeps_first() {
        let date: Date = "1750/51".parse().unwrap();
        assert_eq!(date.year(), Some(1750));
    }

    #[test]
    fn reject_garbage() {
        assert_eq!("".parse::<Date>(), Err(DateError::Empty));
        assert!(matches!(
            "sometime".parse::<Date>(),
            Err(DateError::Unrecognised(_))
        ));
        assert!("32 JAN 1900".parse::<Date>().is_err());
        assert!("BET 1900".parse::<Date>().is_err());
    }

    #[test]
    fn point_display() {
        assert_eq!(DatePoint::ymd(1989, 5, 6).to_string(), "6 MAY 1989");
        assert_eq!(DatePoint::year(1905).to_string(), "1905");
    }
}
