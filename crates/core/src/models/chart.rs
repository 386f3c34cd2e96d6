use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::bucket::{BucketCounts, BucketKey};
use super::sentiment::{SentimentCategory, SentimentRow};
use super::series::StackedSeries;

/// The views a front end can render from the loaded rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartView {
    Table,
    StackedBar,
    Stream,
    Calendar,
    Donut,
    Sparkline,
}

impl std::str::FromStr for ChartView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(ChartView::Table),
            "bar" | "stacked" | "stackedbar" | "stacked-bar" => Ok(ChartView::StackedBar),
            "stream" | "streamgraph" => Ok(ChartView::Stream),
            "calendar" | "heatmap" => Ok(ChartView::Calendar),
            "donut" | "pie" => Ok(ChartView::Donut),
            "sparkline" | "spark" => Ok(ChartView::Sparkline),
            other => Err(format!("unknown chart view: {other}")),
        }
    }
}

/// One day cell of the calendar heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub counts: BucketCounts,
    pub majority: SentimentCategory,
}

/// One slice of the donut view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonutSlice {
    pub category: SentimentCategory,
    pub count: u32,
    /// Fraction of all rows, in `[0, 1]`.
    pub share: f64,
}

/// A bucket's majority class, for sparklines and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorityPoint {
    pub key: BucketKey,
    pub counts: BucketCounts,
    pub majority: SentimentCategory,
}

/// Render-ready data for one view.
///
/// `Empty` means the view must show "No data to display" instead of an
/// empty chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartData {
    Empty,
    Table(Vec<SentimentRow>),
    Stacked(StackedSeries),
    Calendar(Vec<CalendarCell>),
    Donut(Vec<DonutSlice>),
    Sparkline(Vec<MajorityPoint>),
}

impl ChartData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, ChartData::Empty)
    }
}
