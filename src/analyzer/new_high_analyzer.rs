use crate::model::Candle;
use log::debug;
use serde::Serialize;

/// 신고가 판정 기간 (거래일)
const NEW_HIGH_PERIODS: [usize; 4] = [20, 60, 120, 200];
/// 신고가 판정에 필요한 최소 캔들 수
const MIN_CANDLES: usize = 20;

/// 기간별 신고가 여부
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NewHighAnalysis {
    pub is_new_high_20d: bool,
    pub is_new_high_60d: bool,
    pub is_new_high_120d: bool,
    pub is_new_high_200d: bool,
}

impl NewHighAnalysis {
    /// 하나라도 신고가면 true
    pub fn is_any_new_high(&self) -> bool {
        self.is_new_high_20d
            || self.is_new_high_60d
            || self.is_new_high_120d
            || self.is_new_high_200d
    }
}

/// 신고가 분석기
///
/// 최신 캔들의 고가가 기간별(20/60/120/200 거래일) 최고가 이상인지
/// 판정합니다. 히스토리가 기간보다 짧으면 해당 기간은 false입니다.
#[derive(Debug, Clone, Default)]
pub struct NewHighAnalyzer;

impl NewHighAnalyzer {
    /// 최신순 일봉에서 기간별 신고가 여부 계산
    ///
    /// 캔들이 20개 미만이면 판정 자체를 생략하고 모든 기간을 false로
    /// 반환합니다.
    pub fn analyze<C: Candle>(&self, daily: &[C]) -> NewHighAnalysis {
        let mut analysis = NewHighAnalysis::default();
        if daily.len() < MIN_CANDLES {
            debug!("신고가 분석 생략: 캔들 {}개 (최소 {}개)", daily.len(), MIN_CANDLES);
            return analysis;
        }

        let current_high = daily[0].high_price();
        for period in NEW_HIGH_PERIODS {
            if daily.len() < period {
                continue;
            }
            let max_high = daily[..period]
                .iter()
                .map(|candle| candle.high_price())
                .fold(f64::MIN, f64::max);
            let is_new_high = current_high >= max_high;

            match period {
                20 => analysis.is_new_high_20d = is_new_high,
                60 => analysis.is_new_high_60d = is_new_high,
                120 => analysis.is_new_high_120d = is_new_high,
                200 => analysis.is_new_high_200d = is_new_high,
                _ => {}
            }
        }

        analysis
    }

    /// 목표가가 며칠 만의 고가인지 계산
    ///
    /// 최신순 고가 목록에서 목표가 이상을 처음 만나는 위치를 1부터 세어
    /// 반환합니다. 전체 기간에 목표가 이상이 없으면 `len + 1` (전 기간
    /// 최고가)입니다.
    pub fn high_days(highs: &[f64], target_price: f64) -> Option<usize> {
        if highs.is_empty() || target_price <= 0.0 {
            return None;
        }

        for (i, high) in highs.iter().enumerate() {
            if *high >= target_price {
                return Some(i + 1);
            }
        }

        Some(highs.len() + 1)
    }
}
