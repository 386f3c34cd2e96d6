// ═══════════════════════════════════════════════════════════════════
// Model Tests: categories, bucket keys, counts, selection, settings,
// ticker catalog
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use news_sentiment_core::errors::CoreError;
use news_sentiment_core::models::bucket::{BucketCounts, BucketKey, Granularity};
use news_sentiment_core::models::catalog::TickerCatalog;
use news_sentiment_core::models::chart::ChartView;
use news_sentiment_core::models::selection::Selection;
use news_sentiment_core::models::sentiment::{SentimentCategory, SentimentRow};
use news_sentiment_core::models::settings::{DataSource, Settings};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// SentimentCategory
// ═══════════════════════════════════════════════════════════════════

mod sentiment_category {
    use super::*;

    #[test]
    fn scores_match_wire_values() {
        assert_eq!(SentimentCategory::Neutral.score(), 0);
        assert_eq!(SentimentCategory::Positive.score(), 1);
        assert_eq!(SentimentCategory::Negative.score(), 2);
    }

    #[test]
    fn from_score_rejects_out_of_range() {
        assert_eq!(SentimentCategory::from_score(1), Some(SentimentCategory::Positive));
        assert_eq!(SentimentCategory::from_score(3), None);
    }

    #[test]
    fn fixed_stack_order() {
        assert_eq!(
            SentimentCategory::ALL,
            [
                SentimentCategory::Neutral,
                SentimentCategory::Positive,
                SentimentCategory::Negative
            ]
        );
    }

    #[test]
    fn serializes_as_number() {
        let row = SentimentRow::new(d(2024, 1, 2), SentimentCategory::Negative);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"date":"2024-01-02","score":2}"#);
    }

    #[test]
    fn deserialize_rejects_bad_score() {
        let result = serde_json::from_str::<SentimentRow>(r#"{"date":"2024-01-02","score":7}"#);
        assert!(result.is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// BucketKey
// ═══════════════════════════════════════════════════════════════════

mod bucket_key {
    use super::*;

    #[test]
    fn month_key_starts_on_first() {
        let key = BucketKey::for_date(d(2024, 2, 29), Granularity::Month);
        assert_eq!(key.start, d(2024, 2, 1));
        assert_eq!(key.label(), "2024-02");
    }

    #[test]
    fn year_key_starts_on_january_first() {
        let key = BucketKey::for_date(d(2023, 12, 31), Granularity::Year);
        assert_eq!(key.start, d(2023, 1, 1));
        assert_eq!(key.to_string(), "2023");
    }

    #[test]
    fn day_key_is_the_date() {
        let key = BucketKey::for_date(d(2024, 1, 5), Granularity::Day);
        assert_eq!(key.label(), "2024-01-05");
    }

    #[test]
    fn ordered_by_date() {
        let a = BucketKey::for_date(d(2023, 12, 1), Granularity::Month);
        let b = BucketKey::for_date(d(2024, 1, 1), Granularity::Month);
        assert!(a < b);
    }

    #[test]
    fn granularity_parses_aliases() {
        assert_eq!("Monthly".parse::<Granularity>().unwrap(), Granularity::Month);
        assert_eq!("day".parse::<Granularity>().unwrap(), Granularity::Day);
        assert!("week".parse::<Granularity>().is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// BucketCounts & majority classification
// ═══════════════════════════════════════════════════════════════════

mod bucket_counts {
    use super::*;

    #[test]
    fn record_and_total() {
        let mut counts = BucketCounts::default();
        counts.record(SentimentCategory::Positive);
        counts.record(SentimentCategory::Positive);
        counts.record(SentimentCategory::Negative);
        assert_eq!(counts, BucketCounts::new(0, 2, 1));
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn strict_majority_wins() {
        assert_eq!(BucketCounts::new(1, 3, 2).majority(), SentimentCategory::Positive);
        assert_eq!(BucketCounts::new(0, 0, 1).majority(), SentimentCategory::Negative);
        assert_eq!(BucketCounts::new(4, 1, 1).majority(), SentimentCategory::Neutral);
    }

    #[test]
    fn empty_bucket_is_neutral() {
        assert_eq!(BucketCounts::default().majority(), SentimentCategory::Neutral);
    }

    #[test]
    fn positive_negative_tie_is_neutral() {
        assert_eq!(BucketCounts::new(0, 1, 1).majority(), SentimentCategory::Neutral);
    }

    #[test]
    fn three_way_tie_is_neutral() {
        assert_eq!(BucketCounts::new(2, 2, 2).majority(), SentimentCategory::Neutral);
    }

    #[test]
    fn add_assign_sums_fields() {
        let mut a = BucketCounts::new(1, 2, 3);
        a += BucketCounts::new(1, 1, 1);
        assert_eq!(a, BucketCounts::new(2, 3, 4));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Selection
// ═══════════════════════════════════════════════════════════════════

mod selection {
    use super::*;

    #[test]
    fn trims_and_uppercases() {
        let sel = Selection::parse("  nasdaq ", " aapl").unwrap();
        assert_eq!(sel.exchange, "NASDAQ");
        assert_eq!(sel.ticker, "AAPL");
        assert_eq!(sel.to_string(), "NASDAQ:AAPL");
    }

    #[test]
    fn blank_fields_rejected() {
        assert!(matches!(Selection::parse("", "AAPL"), Err(CoreError::InvalidSelection(_))));
        assert!(matches!(Selection::parse("NYSE", "   "), Err(CoreError::InvalidSelection(_))));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.source, DataSource::Remote);
        assert_eq!(s.debounce_ms, 300);
        assert_eq!(s.request_timeout_secs, 30);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"source": "static", "data_dir": "/tmp/data"}"#).unwrap();
        assert_eq!(s.source, DataSource::Static);
        assert_eq!(s.data_dir, std::path::PathBuf::from("/tmp/data"));
        assert_eq!(s.debounce_ms, 300);
    }

    #[test]
    fn zero_timeout_rejected() {
        let result = Settings::from_json(r#"{"request_timeout_secs": 0}"#);
        assert!(matches!(result, Err(CoreError::InvalidSettings(_))));
    }

    #[test]
    fn remote_needs_base_url() {
        let result = Settings::from_json(r#"{"api_base_url": "  "}"#);
        assert!(matches!(result, Err(CoreError::InvalidSettings(_))));
    }

    #[test]
    fn static_source_ignores_base_url() {
        assert!(Settings::from_json(r#"{"api_base_url": "", "source": "static"}"#).is_ok());
    }

    #[test]
    fn malformed_json_is_deserialization_error() {
        assert!(matches!(Settings::from_json("{"), Err(CoreError::Deserialization(_))));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"debounce_ms": 50}"#).unwrap();
        let s = Settings::load_from_file(&path).unwrap();
        assert_eq!(s.debounce_ms, 50);
    }

    #[test]
    fn data_source_parses() {
        assert_eq!("file".parse::<DataSource>().unwrap(), DataSource::Static);
        assert_eq!("REMOTE".parse::<DataSource>().unwrap(), DataSource::Remote);
    }

    #[test]
    fn chart_view_parses() {
        assert_eq!("bar".parse::<ChartView>().unwrap(), ChartView::StackedBar);
        assert_eq!("streamgraph".parse::<ChartView>().unwrap(), ChartView::Stream);
        assert!("radar".parse::<ChartView>().is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// TickerCatalog
// ═══════════════════════════════════════════════════════════════════

mod ticker_catalog {
    use super::*;

    // 2024-01-10T00:00:00Z
    const JAN_10_MS: i64 = 1_704_844_800_000;

    #[test]
    fn parses_both_key_spellings() {
        let json = format!(
            r#"[{{"ticker": "aapl", "lastUpdated": {JAN_10_MS}}},
                {{"symbol": "MSFT", "last_updated": "{JAN_10_MS}"}}]"#
        );
        let catalog = TickerCatalog::from_json(&json).unwrap();
        assert_eq!(catalog.tickers(), vec!["AAPL", "MSFT"]);
        assert_eq!(catalog.get("msft").unwrap().last_updated, Some(d(2024, 1, 10)));
    }

    #[test]
    fn skips_malformed_entries() {
        let json = r#"[42, {"lastUpdated": 0}, {"ticker": ""}, {"ticker": "IBM"}]"#;
        let catalog = TickerCatalog::from_json(json).unwrap();
        assert_eq!(catalog.tickers(), vec!["IBM"]);
        assert_eq!(catalog.get("IBM").unwrap().last_updated, None);
    }

    #[test]
    fn non_array_is_error() {
        assert!(TickerCatalog::from_json(r#"{"ticker": "AAPL"}"#).is_err());
    }

    #[test]
    fn stale_uses_min_gap() {
        let json = format!(
            r#"[{{"ticker": "OLD", "lastUpdated": {JAN_10_MS}}},
                {{"ticker": "FRESH", "lastUpdated": {}}},
                {{"ticker": "UNKNOWN"}}]"#,
            JAN_10_MS + 86_400_000
        );
        let catalog = TickerCatalog::from_json(&json).unwrap();
        let stale: Vec<&str> = catalog
            .stale(d(2024, 1, 12), 2)
            .iter()
            .map(|e| e.ticker.as_str())
            .collect();
        assert_eq!(stale, vec!["OLD"]);
    }
}
