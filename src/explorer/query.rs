//! Query state for the dataset browser
//!
//! Holds the user-controlled filter, sort, and page values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rows per page
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Wire value for `sort_order`
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(format!("invalid sort order '{}': use asc or desc", other)),
        }
    }
}

/// Dataset column the backend can sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortColumn {
    #[serde(rename = "Name")]
    Name,
    #[serde(rename = "Platform")]
    Platform,
    #[serde(rename = "Year_of_Release")]
    Year,
    #[serde(rename = "Genre")]
    Genre,
    #[serde(rename = "Publisher")]
    Publisher,
    #[serde(rename = "NA_Sales")]
    NaSales,
    #[serde(rename = "EU_Sales")]
    EuSales,
    #[serde(rename = "JP_Sales")]
    JpSales,
    #[serde(rename = "Other_Sales")]
    OtherSales,
    #[serde(rename = "Global_Sales")]
    GlobalSales,
    #[serde(rename = "Critic_Score")]
    CriticScore,
    #[serde(rename = "User_Score")]
    UserScore,
}

impl SortColumn {
    pub const ALL: [SortColumn; 12] = [
        SortColumn::Name,
        SortColumn::Platform,
        SortColumn::Year,
        SortColumn::Genre,
        SortColumn::Publisher,
        SortColumn::NaSales,
        SortColumn::EuSales,
        SortColumn::JpSales,
        SortColumn::OtherSales,
        SortColumn::GlobalSales,
        SortColumn::CriticScore,
        SortColumn::UserScore,
    ];

    /// Wire value for `sort_by`
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Name => "Name",
            SortColumn::Platform => "Platform",
            SortColumn::Year => "Year_of_Release",
            SortColumn::Genre => "Genre",
            SortColumn::Publisher => "Publisher",
            SortColumn::NaSales => "NA_Sales",
            SortColumn::EuSales => "EU_Sales",
            SortColumn::JpSales => "JP_Sales",
            SortColumn::OtherSales => "Other_Sales",
            SortColumn::GlobalSales => "Global_Sales",
            SortColumn::CriticScore => "Critic_Score",
            SortColumn::UserScore => "User_Score",
        }
    }

    /// Short names accepted on the command line
    fn alias(&self) -> Option<&'static str> {
        match self {
            SortColumn::Year => Some("year"),
            SortColumn::GlobalSales => Some("sales"),
            SortColumn::CriticScore => Some("critic"),
            SortColumn::UserScore => Some("user"),
            SortColumn::NaSales => Some("na"),
            SortColumn::EuSales => Some("eu"),
            SortColumn::JpSales => Some("jp"),
            SortColumn::OtherSales => Some("other"),
            _ => None,
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortColumn::ALL
            .into_iter()
            .find(|col| {
                col.as_str().eq_ignore_ascii_case(wanted)
                    || col.alias().is_some_and(|a| a.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| format!("unknown sort column '{}'", wanted))
    }
}

/// Filter, sort, and page values driving the game table
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub search: String,
    pub platform: String,
    pub genre: String,
    pub publisher: String,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub sort_column: SortColumn,
    pub sort_order: SortOrder,
    /// 1-based
    pub page: u32,
    pub page_size: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl QueryState {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            search: String::new(),
            platform: String::new(),
            genre: String::new(),
            publisher: String::new(),
            year_min: None,
            year_max: None,
            sort_column: SortColumn::GlobalSales,
            sort_order: SortOrder::Desc,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Row offset of the first record on the current page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.page_size)
    }

    /// Whether any filter narrows the result set
    pub fn has_filters(&self) -> bool {
        !self.search.is_empty()
            || !self.platform.is_empty()
            || !self.genre.is_empty()
            || !self.publisher.is_empty()
            || self.year_min.is_some()
            || self.year_max.is_some()
    }

    /// Empty every filter and return to the first page
    pub fn cleared(&self) -> Self {
        Self {
            sort_column: self.sort_column,
            sort_order: self.sort_order,
            ..Self::with_page_size(self.page_size)
        }
    }
}
