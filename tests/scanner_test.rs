use common_test_utils::ymd;

use chart_analysis::config::AnalysisConfig;
use chart_analysis::level::OverlapScanner;
use chart_analysis::model::StockCandle;
use chrono::NaiveDate;

fn body_candle(date: Option<NaiveDate>, open: f64, close: f64) -> StockCandle {
    StockCandle::new(
        date,
        open,
        open.max(close) + 0.5,
        open.min(close) - 0.5,
        close,
        1000.0,
    )
}

/// 몸통 [118, 122] 군집 5개와 서로 겹치지 않는 몸통 5개
fn clustered_candles() -> Vec<StockCandle> {
    let mut candles = Vec::new();
    for day in [1, 2, 3, 4, 5] {
        candles.push(body_candle(Some(ymd(2025, 6, day)), 118.0, 122.0));
    }
    for (i, (open, close)) in [
        (100.0, 101.0),
        (104.0, 105.0),
        (108.0, 109.0),
        (112.0, 113.0),
        (126.0, 127.0),
    ]
    .into_iter()
    .enumerate()
    {
        candles.push(body_candle(Some(ymd(2025, 5, (i + 1) as u32)), open, close));
    }
    candles
}

#[test]
fn test_overlap_count_matches_containing_bodies() {
    let scanner = OverlapScanner::new(&AnalysisConfig::default());
    let levels = scanner.scan(&clustered_candles());

    assert!(!levels.is_empty());

    // 유효 레벨(중첩 3 이상)은 군집 몸통 안에만 존재
    for level in &levels {
        assert!(level.price >= 117.9 && level.price <= 122.1, "level {}", level.price);
        assert_eq!(level.overlap_count, 5);
        assert_eq!(level.overlapping.len(), 5);
    }

    // 중첩된 캔들 참조는 군집 캔들(인덱스 0~4)만 가리킴
    let best = levels.iter().max_by_key(|level| level.overlap_count).unwrap();
    let mut indices: Vec<usize> = best.overlapping.iter().map(|r| r.index).collect();
    indices.sort();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_insufficient_candles_returns_empty() {
    let scanner = OverlapScanner::new(&AnalysisConfig::default());
    let candles: Vec<StockCandle> = clustered_candles().into_iter().take(9).collect();
    assert!(scanner.scan(&candles).is_empty());
}

#[test]
fn test_two_overlaps_are_noise() {
    let scanner = OverlapScanner::new(&AnalysisConfig::default());

    // 같은 몸통 2개 + 서로 겹치지 않는 몸통 8개 → 어떤 레벨도 중첩 3 미만
    let mut candles = vec![
        body_candle(Some(ymd(2025, 6, 1)), 118.0, 122.0),
        body_candle(Some(ymd(2025, 6, 2)), 118.0, 122.0),
    ];
    for (i, base) in [50.0, 55.0, 60.0, 65.0, 70.0, 75.0, 80.0, 85.0]
        .into_iter()
        .enumerate()
    {
        candles.push(body_candle(Some(ymd(2025, 5, (i + 1) as u32)), base, base + 1.0));
    }

    assert!(scanner.scan(&candles).is_empty());
}

#[test]
fn test_scan_is_deterministic() {
    let scanner = OverlapScanner::new(&AnalysisConfig::default());
    let candles = clustered_candles();

    let first = scanner.scan(&candles);
    let second = scanner.scan(&candles);
    assert_eq!(first, second);
}

#[test]
fn test_min_overlap_is_configurable() {
    let config = AnalysisConfig {
        min_overlap_count: 6,
        ..AnalysisConfig::default()
    };
    let scanner = OverlapScanner::new(&config);

    // 군집 중첩이 5이므로 기준 6에서는 아무 레벨도 남지 않음
    assert!(scanner.scan(&clustered_candles()).is_empty());
}
