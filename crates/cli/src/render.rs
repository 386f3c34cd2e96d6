//! Plain-text renderings of chart data for the terminal.

use std::fmt::Write;

use news_sentiment_core::models::chart::ChartData;
use news_sentiment_core::models::sentiment::SentimentCategory;

const NO_DATA: &str = "No data to display\n";
const BAR_WIDTH: f64 = 40.0;

pub fn render(data: &ChartData) -> String {
    let mut out = String::new();
    match data {
        ChartData::Empty => out.push_str(NO_DATA),
        ChartData::Table(rows) => {
            let _ = writeln!(out, "{:<12} {}", "Date", "Sentiment");
            for row in rows {
                let _ = writeln!(out, "{:<12} {} ({})", row.date, row.score.score(), row.score);
            }
        }
        ChartData::Stacked(series) => {
            let (lo, hi) = series.domain;
            let span = if hi > lo { hi - lo } else { 1.0 };
            let _ = writeln!(out, "domain [{lo:.2}, {hi:.2}]");
            for (j, key) in series.keys.iter().enumerate() {
                let mut line = String::new();
                let first = series.layers.first().and_then(|l| l.points.get(j));
                let offset = first.map_or(0.0, |p| p.y0 - lo);
                line.push_str(&" ".repeat(scale(offset, span)));
                for layer in &series.layers {
                    if let Some(point) = layer.points.get(j) {
                        let width = scale(point.height(), span);
                        line.push_str(&glyph(layer.category).repeat(width));
                    }
                }
                let _ = writeln!(out, "{:<10} |{line}", key.label());
            }
            let _ = writeln!(
                out,
                "legend: {} neutral  {} positive  {} negative",
                glyph(SentimentCategory::Neutral),
                glyph(SentimentCategory::Positive),
                glyph(SentimentCategory::Negative)
            );
        }
        ChartData::Calendar(cells) => {
            for cell in cells {
                let mark = if cell.counts.is_empty() {
                    "."
                } else {
                    glyph(cell.majority)
                };
                let _ = writeln!(out, "{} {mark}", cell.date);
            }
        }
        ChartData::Donut(slices) => {
            for slice in slices {
                let _ = writeln!(
                    out,
                    "{:<9} {:>5} {:>6.1}%",
                    slice.category.label(),
                    slice.count,
                    slice.share * 100.0
                );
            }
        }
        ChartData::Sparkline(points) => {
            let line: String = points.iter().map(|p| glyph(p.majority)).collect();
            let _ = writeln!(out, "{line}");
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                let _ = writeln!(out, "{} .. {}", first.key.label(), last.key.label());
            }
        }
    }
    out
}

fn glyph(category: SentimentCategory) -> &'static str {
    match category {
        SentimentCategory::Neutral => "=",
        SentimentCategory::Positive => "+",
        SentimentCategory::Negative => "-",
    }
}

fn scale(value: f64, span: f64) -> usize {
    ((value / span) * BAR_WIDTH).round().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use news_sentiment_core::models::bucket::{BucketCounts, BucketKey, Granularity};
    use news_sentiment_core::models::chart::{CalendarCell, MajorityPoint};
    use news_sentiment_core::models::series::{SeriesLayer, SeriesPoint, StackOffset, StackedSeries};

    use SentimentCategory::{Negative, Neutral, Positive};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn layer(category: SentimentCategory, spans: &[(BucketKey, f64, f64)]) -> SeriesLayer {
        SeriesLayer {
            category,
            points: spans
                .iter()
                .map(|&(key, y0, y1)| SeriesPoint { key, y0, y1, category })
                .collect(),
        }
    }

    #[test]
    fn empty_state_message() {
        assert_eq!(render(&ChartData::Empty), "No data to display\n");
    }

    #[test]
    fn stream_with_negative_baseline_is_shifted_into_view() {
        let a = BucketKey::for_date(d(2024, 1, 1), Granularity::Day);
        let b = BucketKey::for_date(d(2024, 1, 2), Granularity::Day);
        let series = StackedSeries {
            offset: StackOffset::Wiggle,
            keys: vec![a, b],
            layers: vec![
                layer(Neutral, &[(a, -1.0, 0.0), (b, 0.0, 0.0)]),
                layer(Positive, &[(a, 0.0, 1.0), (b, 0.0, 0.0)]),
                layer(Negative, &[(a, 1.0, 1.0), (b, 0.0, 1.0)]),
            ],
            domain: (-1.0, 1.0),
        };

        let text = render(&ChartData::Stacked(series));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "domain [-1.00, 1.00]");
        assert_eq!(lines[1], format!("2024-01-01 |{}{}", "=".repeat(20), "+".repeat(20)));
        assert_eq!(lines[2], format!("2024-01-02 |{}{}", " ".repeat(20), "-".repeat(20)));
        assert!(lines[3].starts_with("legend:"));
    }

    #[test]
    fn calendar_marks_days_without_rows() {
        let cells = vec![
            CalendarCell {
                date: d(2024, 1, 1),
                counts: BucketCounts::new(0, 1, 0),
                majority: Positive,
            },
            CalendarCell {
                date: d(2024, 1, 2),
                counts: BucketCounts::default(),
                majority: Neutral,
            },
            CalendarCell {
                date: d(2024, 1, 3),
                counts: BucketCounts::new(1, 0, 0),
                majority: Neutral,
            },
        ];
        assert_eq!(
            render(&ChartData::Calendar(cells)),
            "2024-01-01 +\n2024-01-02 .\n2024-01-03 =\n"
        );
    }

    #[test]
    fn sparkline_lists_majorities_and_range() {
        let point = |m: u32, counts: BucketCounts, majority| MajorityPoint {
            key: BucketKey::for_date(d(2024, m, 1), Granularity::Month),
            counts,
            majority,
        };
        let points = vec![
            point(1, BucketCounts::new(0, 2, 1), Positive),
            point(2, BucketCounts::new(0, 0, 3), Negative),
        ];
        assert_eq!(render(&ChartData::Sparkline(points)), "+-\n2024-01 .. 2024-02\n");
    }
}
