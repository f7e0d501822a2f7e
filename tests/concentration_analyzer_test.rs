use common_test_utils::*;

use chart_analysis::analyzer::concentration_analyzer::ConcentrationAnalyzer;
use chart_analysis::config::AnalysisConfig;
use chart_analysis::model::{StockCandle, Timeframe};

fn close_candle(close: f64, volume: f64) -> StockCandle {
    StockCandle::new(None, close - 1.0, close + 1.0, close - 2.0, close, volume)
}

#[test]
fn test_densest_bucket_ranks_first() {
    // 75000원대 6개, 72000원대 3개, 나머지 1개씩
    let mut candles = Vec::new();
    for close in [74980.0, 75010.0, 75040.0, 74960.0, 75020.0, 74990.0] {
        candles.push(close_candle(close, 100.0));
    }
    for close in [72010.0, 71980.0, 72030.0] {
        candles.push(close_candle(close, 50.0));
    }
    candles.push(close_candle(68000.0, 10.0));
    candles.push(close_candle(80000.0, 10.0));

    let zones = ConcentrationAnalyzer::zones(&candles);

    assert_eq!(zones[0].price, 75000.0);
    assert_eq!(zones[0].count, 6);
    assert_eq!(zones[0].volume, 600.0);
    assert_eq!(zones[1].price, 72000.0);
    assert_eq!(zones[1].count, 3);
}

#[test]
fn test_zone_count_is_capped_at_five() {
    let mut candles = Vec::new();
    for i in 0..8 {
        candles.push(close_candle(10_000.0 + (i as f64) * 1000.0, 10.0));
    }

    let zones = ConcentrationAnalyzer::zones(&candles);
    assert_eq!(zones.len(), 5);
}

#[test]
fn test_tied_buckets_order_by_price() {
    // 동률이면 가격이 낮은 구간이 먼저
    let candles = vec![
        close_candle(50_000.0, 10.0),
        close_candle(40_000.0, 10.0),
        close_candle(30_000.0, 10.0),
    ];

    let zones = ConcentrationAnalyzer::zones(&candles);
    assert_eq!(zones[0].price, 30_000.0);
    assert_eq!(zones[1].price, 40_000.0);
    assert_eq!(zones[2].price, 50_000.0);
}

#[test]
fn test_analyze_all_reports_available_timeframes() {
    let analyzer = ConcentrationAnalyzer::new(&AnalysisConfig::default());

    // 두 달 남짓의 일봉 → 일봉/주봉/월봉 모두 생성 가능
    let candles: Vec<TestCandle> = dates_desc(60, ymd(2025, 7, 1))
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            let base = 70_000.0 + (i % 5) as f64 * 100.0;
            TestCandle::with_body(Some(date), base, base + 50.0)
        })
        .collect();

    let reports = analyzer.analyze_all(&candles);

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].timeframe, Timeframe::Daily);
    assert_eq!(reports[0].period, "1년 일봉");
    assert!(reports.iter().all(|report| report.zones.len() <= 3));
    assert!(reports.iter().all(|report| !report.zones.is_empty()));
}

#[test]
fn test_analyze_all_skips_empty_timeframes() {
    let analyzer = ConcentrationAnalyzer::new(&AnalysisConfig::default());

    // 하루짜리 입력은 주봉(최소 2일)과 월봉(최소 5일)을 만들 수 없음
    let candles = vec![TestCandle::with_body(Some(ymd(2025, 7, 1)), 100.0, 101.0)];
    let reports = analyzer.analyze_all(&candles);

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].timeframe, Timeframe::Daily);
}
