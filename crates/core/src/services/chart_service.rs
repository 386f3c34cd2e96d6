use crate::models::bucket::Granularity;
use crate::models::chart::{CalendarCell, ChartData, ChartView, DonutSlice};
use crate::models::sentiment::{SentimentCategory, SentimentRow};
use crate::models::series::StackOffset;
use crate::services::aggregation_service::AggregationService;
use crate::services::stack_service::StackService;

/// Generates render-ready data for every dashboard view.
///
/// The core computes all the numbers; front ends only draw them. Every view
/// is derived from the same aggregation, so bar, stream, calendar, donut and
/// sparkline always agree on the counts.
pub struct ChartService {
    aggregation_service: AggregationService,
    stack_service: StackService,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            aggregation_service: AggregationService::new(),
            stack_service: StackService::new(),
        }
    }

    /// Build the data for `view`.
    ///
    /// `granularity` applies to the bar, stream and sparkline views; the
    /// calendar is always daily and the donut always covers every row.
    /// No rows yields [`ChartData::Empty`].
    #[must_use]
    pub fn build(
        &self,
        rows: &[SentimentRow],
        view: ChartView,
        granularity: Granularity,
    ) -> ChartData {
        if rows.is_empty() {
            return ChartData::Empty;
        }

        match view {
            ChartView::Table => ChartData::Table(rows.to_vec()),
            ChartView::StackedBar => {
                let buckets = self.aggregation_service.aggregate(rows, granularity);
                ChartData::Stacked(self.stack_service.stack(&buckets, StackOffset::Zero))
            }
            ChartView::Stream => {
                let buckets = self.aggregation_service.aggregate(rows, granularity);
                ChartData::Stacked(self.stack_service.stack(&buckets, StackOffset::Wiggle))
            }
            ChartView::Calendar => ChartData::Calendar(self.calendar(rows)),
            ChartView::Donut => ChartData::Donut(self.donut(rows)),
            ChartView::Sparkline => {
                let buckets = self.aggregation_service.aggregate(rows, granularity);
                ChartData::Sparkline(self.aggregation_service.majority_series(&buckets))
            }
        }
    }

    /// One cell per calendar day between the first and last row.
    fn calendar(&self, rows: &[SentimentRow]) -> Vec<CalendarCell> {
        self.aggregation_service
            .day_range(rows)
            .into_iter()
            .map(|(key, counts)| CalendarCell {
                date: key.start,
                counts,
                majority: counts.majority(),
            })
            .collect()
    }

    fn donut(&self, rows: &[SentimentRow]) -> Vec<DonutSlice> {
        let totals = self.aggregation_service.totals(rows);
        let total = f64::from(totals.total());
        SentimentCategory::ALL
            .into_iter()
            .map(|category| {
                let count = totals.get(category);
                DonutSlice {
                    category,
                    count,
                    share: if total > 0.0 { f64::from(count) / total } else { 0.0 },
                }
            })
            .collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
