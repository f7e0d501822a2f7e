use crate::aggregator::TimeframeAggregator;
use crate::analyzer::position_analyzer::{self, PositionAnalysis};
use crate::candle_store::CandleStore;
use crate::config::{AnalysisConfig, DEFAULT_ANALYSIS_CONFIG};
use crate::level::{Line, LineSelector, OverlapScanner};
use crate::model::{Candle, Timeframe};
use log::info;
use serde::Serialize;

/// 연간 거래일 수 (기간 설명 환산용)
const TRADING_DAYS_PER_YEAR: f64 = 252.0;
/// 연간 주 수
const WEEKS_PER_YEAR: f64 = 52.0;
/// 연간 월 수
const MONTHS_PER_YEAR: f64 = 12.0;

/// 타임프레임별 분석 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub timeframe: Timeframe,
    /// 분석 기간 설명 (연 단위 환산)
    pub period_description: String,
    /// 집계 후 실제 사용된 캔들 수
    pub candle_count: usize,
    /// 최신 캔들 종가 (캔들이 없으면 0)
    pub current_price: f64,
    pub strongest_support: Option<Line>,
    pub strongest_resistance: Option<Line>,
    pub position: PositionAnalysis,
}

/// 멀티 타임프레임 지지/저항 분석기
///
/// 일봉 시계열을 타임프레임별로 집계한 뒤 몸통 중첩 스캔 → 강도 평가 →
/// 라인 선택 → 위치 분석 순서로 실행합니다. 호출 간 상태를 보존하지 않는
/// 순수 계산이므로 동일 입력은 항상 동일 결과를 내며, 종목/타임프레임
/// 단위 병렬 실행은 호출자의 자유입니다.
#[derive(Debug, Clone)]
pub struct LevelAnalyzer {
    aggregator: TimeframeAggregator,
    scanner: OverlapScanner,
    selector: LineSelector,
}

impl LevelAnalyzer {
    pub fn new(config: &AnalysisConfig) -> LevelAnalyzer {
        LevelAnalyzer {
            aggregator: TimeframeAggregator::new(config),
            scanner: OverlapScanner::new(config),
            selector: LineSelector,
        }
    }

    /// 단일 타임프레임 분석 실행
    ///
    /// # Arguments
    /// * `daily` - 최신순 일봉 시계열
    /// * `timeframe` - 분석할 타임프레임
    ///
    /// # Returns
    /// * `AnalysisResult` - 데이터가 부족해도 항상 유효한 결과를 반환하며,
    ///   이 경우 라인은 None이고 위치는 미확정입니다
    pub fn analyze<C: Candle>(&self, daily: &[C], timeframe: Timeframe) -> AnalysisResult {
        let candles = self.aggregator.aggregate(daily, timeframe);
        let current_price = candles.first().map(|c| c.close).unwrap_or(0.0);

        let levels = self.scanner.scan(&candles);
        let selected = self.selector.select(&levels, current_price);
        let position = position_analyzer::analyze_position(
            current_price,
            selected.support.as_ref(),
            selected.resistance.as_ref(),
        );

        info!(
            "{} 분석 완료: 캔들 {}개, 유효 레벨 {}개, 지지 {:?}, 저항 {:?}",
            timeframe,
            candles.len(),
            levels.len(),
            selected.support.as_ref().map(|line| line.price),
            selected.resistance.as_ref().map(|line| line.price),
        );

        AnalysisResult {
            timeframe,
            period_description: period_description(timeframe, candles.len()),
            candle_count: candles.len(),
            current_price,
            strongest_support: selected.support,
            strongest_resistance: selected.resistance,
            position,
        }
    }

    /// 세 타임프레임(일봉/주봉/월봉) 모두 분석
    ///
    /// 각 타임프레임은 독립적으로 계산됩니다.
    pub fn analyze_all<C: Candle>(&self, daily: &[C]) -> Vec<AnalysisResult> {
        [Timeframe::Daily, Timeframe::Weekly, Timeframe::Monthly]
            .into_iter()
            .map(|timeframe| self.analyze(daily, timeframe))
            .collect()
    }

    /// 저장소의 최신순 캔들로 분석 실행
    pub fn analyze_from_storage<C: Candle>(
        &self,
        storage: &CandleStore<C>,
        timeframe: Timeframe,
    ) -> AnalysisResult {
        self.analyze(storage.items(), timeframe)
    }
}

impl Default for LevelAnalyzer {
    fn default() -> Self {
        LevelAnalyzer::new(&DEFAULT_ANALYSIS_CONFIG)
    }
}

/// 분석 기간 설명 문자열
fn period_description(timeframe: Timeframe, candle_count: usize) -> String {
    match timeframe {
        Timeframe::Daily => {
            format!("{:.1}년치 일봉", candle_count as f64 / TRADING_DAYS_PER_YEAR)
        }
        Timeframe::Weekly => format!("{:.1}년치 주봉", candle_count as f64 / WEEKS_PER_YEAR),
        Timeframe::Monthly => format!("{:.1}년치 월봉", candle_count as f64 / MONTHS_PER_YEAR),
    }
}
