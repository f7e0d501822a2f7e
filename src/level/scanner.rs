use crate::config::AnalysisConfig;
use crate::level::strength;
use crate::model::{Candle, StockCandle};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

/// 가격 레벨과 중첩된 캔들 참조
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlapRef {
    /// 입력 시퀀스 내 캔들 인덱스 (0이 최신)
    pub index: usize,
    /// 캔들 날짜
    pub date: Option<NaiveDate>,
    /// 캔들 몸통 크기
    pub body_size: f64,
}

/// 양자화된 가격 레벨 하나의 중첩 정보
///
/// 스캔 한 번 동안만 존재하는 중간 결과이며, 가장 강한 라인을 추출한 뒤
/// 버려집니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceLevel {
    pub price: f64,
    pub overlap_count: usize,
    pub overlapping: Vec<OverlapRef>,
    pub strength: f64,
}

/// 캔들 몸통 중첩 스캐너
///
/// 관측된 가격 범위를 최저가의 일정 비율 단위로 양자화하고, 각 레벨을
/// 지나가는 캔들 몸통 수를 셉니다. 최소 중첩 횟수에 못 미치는 레벨은
/// 노이즈로 간주해 버립니다.
#[derive(Debug, Clone)]
pub struct OverlapScanner {
    price_step_ratio: f64,
    min_overlap_count: usize,
    min_candles_for_scan: usize,
}

impl OverlapScanner {
    pub fn new(config: &AnalysisConfig) -> OverlapScanner {
        OverlapScanner {
            price_step_ratio: config.price_step_ratio,
            min_overlap_count: config.min_overlap_count,
            min_candles_for_scan: config.min_candles_for_scan,
        }
    }

    /// 가격 레벨별 캔들 중첩 계산
    ///
    /// # Arguments
    /// * `candles` - 스캔할 캔들 시퀀스 (최신순)
    ///
    /// # Returns
    /// * `Vec<PriceLevel>` - 가격 오름차순의 유효 레벨 목록. 캔들 수가 최소
    ///   기준에 못 미치면 빈 목록 (데이터 부족은 오류가 아님)
    pub fn scan(&self, candles: &[StockCandle]) -> Vec<PriceLevel> {
        if candles.len() < self.min_candles_for_scan {
            debug!(
                "스캔 생략: 캔들 {}개 (최소 {}개 필요)",
                candles.len(),
                self.min_candles_for_scan
            );
            return Vec::new();
        }

        let (min_price, max_price) = price_range(candles);
        let step = min_price * self.price_step_ratio;
        if step <= 0.0 || !step.is_finite() {
            return Vec::new();
        }

        let mut levels = Vec::new();
        let mut level = min_price;
        while level <= max_price {
            let overlapping: Vec<OverlapRef> = candles
                .iter()
                .enumerate()
                .filter_map(|(index, candle)| {
                    let (body_low, body_high) = candle.body_range();
                    if body_low <= level && level <= body_high {
                        Some(OverlapRef {
                            index,
                            date: candle.date,
                            body_size: candle.body_size(),
                        })
                    } else {
                        None
                    }
                })
                .collect();

            if overlapping.len() >= self.min_overlap_count {
                let strength = strength::calculate_strength(overlapping.len(), &overlapping);
                levels.push(PriceLevel {
                    price: level,
                    overlap_count: overlapping.len(),
                    overlapping,
                    strength,
                });
            }

            level += step;
        }

        debug!(
            "스캔 완료: 범위 {:.2}~{:.2}, 캔들 {}개, 유효 레벨 {}개",
            min_price,
            max_price,
            candles.len(),
            levels.len()
        );
        levels
    }
}

/// 전체 캔들의 시가/종가/고가/저가를 아우르는 가격 범위
fn price_range(candles: &[StockCandle]) -> (f64, f64) {
    let mut min_price = f64::MAX;
    let mut max_price = f64::MIN;
    for candle in candles {
        for price in [candle.open, candle.close, candle.high, candle.low] {
            min_price = min_price.min(price);
            max_price = max_price.max(price);
        }
    }
    (min_price, max_price)
}
