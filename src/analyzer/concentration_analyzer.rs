use crate::aggregator::TimeframeAggregator;
use crate::config::AnalysisConfig;
use crate::model::{Candle, StockCandle, Timeframe};
use serde::Serialize;
use std::collections::BTreeMap;

/// 가격 구간 폭 (원 단위)
const ZONE_BUCKET_WIDTH: f64 = 100.0;
/// 보존할 상위 구간 수
const TOP_ZONES: usize = 5;
/// 타임프레임별 보고에 포함할 상위 구간 수
const TOP_ZONES_PER_TIMEFRAME: usize = 3;

/// 가격 집중 구간
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationZone {
    /// 구간 대표 가격 (버킷 폭 단위 반올림)
    pub price: f64,
    /// 구간에 속한 캔들 수
    pub count: usize,
    /// 구간 누적 거래량
    pub volume: f64,
}

/// 타임프레임별 집중 구간 묶음
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeframeZones {
    pub timeframe: Timeframe,
    /// 기간 설명
    pub period: String,
    pub zones: Vec<ConcentrationZone>,
}

/// 가격 집중 구간 분석기
///
/// 종가를 고정 폭 구간으로 버킷화해 캔들과 거래량이 몰린 가격대를
/// 찾습니다. 지지/저항 스캔과 달리 몸통이 아닌 종가만 봅니다.
#[derive(Debug, Clone)]
pub struct ConcentrationAnalyzer {
    aggregator: TimeframeAggregator,
}

impl ConcentrationAnalyzer {
    pub fn new(config: &AnalysisConfig) -> ConcentrationAnalyzer {
        ConcentrationAnalyzer {
            aggregator: TimeframeAggregator::new(config),
        }
    }

    /// 캔들 시퀀스에서 상위 집중 구간 추출
    ///
    /// # Returns
    /// * `Vec<ConcentrationZone>` - 캔들 수 내림차순 상위 5개 구간.
    ///   동률이면 가격이 낮은 구간이 먼저 옵니다.
    pub fn zones(candles: &[StockCandle]) -> Vec<ConcentrationZone> {
        let mut buckets: BTreeMap<i64, ConcentrationZone> = BTreeMap::new();
        for candle in candles {
            let bucket_price = (candle.close / ZONE_BUCKET_WIDTH).round() * ZONE_BUCKET_WIDTH;
            let zone = buckets
                .entry(bucket_price as i64)
                .or_insert_with(|| ConcentrationZone {
                    price: bucket_price,
                    count: 0,
                    volume: 0.0,
                });
            zone.count += 1;
            zone.volume += candle.volume;
        }

        let mut zones: Vec<ConcentrationZone> = buckets.into_values().collect();
        // 안정 정렬이라 동률 구간은 가격 오름차순이 유지됨
        zones.sort_by(|a, b| b.count.cmp(&a.count));
        zones.truncate(TOP_ZONES);
        zones
    }

    /// 세 타임프레임 각각의 상위 집중 구간 계산
    ///
    /// 집계 결과가 빈 타임프레임은 보고에서 제외합니다.
    pub fn analyze_all<C: Candle>(&self, daily: &[C]) -> Vec<TimeframeZones> {
        [
            (Timeframe::Daily, "1년 일봉"),
            (Timeframe::Weekly, "3년 주봉"),
            (Timeframe::Monthly, "전체 월봉"),
        ]
        .into_iter()
        .filter_map(|(timeframe, period)| {
            let candles = self.aggregator.aggregate(daily, timeframe);
            if candles.is_empty() {
                return None;
            }
            let mut zones = Self::zones(&candles);
            zones.truncate(TOP_ZONES_PER_TIMEFRAME);
            Some(TimeframeZones {
                timeframe,
                period: period.to_string(),
                zones,
            })
        })
        .collect()
    }
}
