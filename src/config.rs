use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// 공유 기본 분석 설정
pub static DEFAULT_ANALYSIS_CONFIG: Lazy<AnalysisConfig> = Lazy::new(AnalysisConfig::default);

/// 분석 엔진 설정
///
/// 호출자에게 노출 가능한 조정 상수들입니다. 설정 파일(TOML/JSON)에서
/// 일부 필드만 지정해도 나머지는 기본값으로 채워집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 가격 양자화 비율 (관측 최저가 대비, 기본 0.5%)
    pub price_step_ratio: f64,
    /// 유효 레벨로 인정할 최소 중첩 횟수
    pub min_overlap_count: usize,
    /// 스캔을 시도할 최소 캔들 수
    pub min_candles_for_scan: usize,
    /// 일봉 분석 기간 (거래일, 약 1년)
    pub daily_lookback: usize,
    /// 주봉 변환에 사용할 일봉 수 (약 3년)
    pub weekly_lookback_days: usize,
    /// 월봉 변환에 사용할 일봉 수 (None이면 전체 기간)
    pub monthly_lookback_days: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            price_step_ratio: 0.005,
            min_overlap_count: 3,
            min_candles_for_scan: 10,
            daily_lookback: 252,
            weekly_lookback_days: 780,
            monthly_lookback_days: None,
        }
    }
}

impl ConfigValidation for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !(self.price_step_ratio > 0.0 && self.price_step_ratio < 1.0) {
            return Err(ConfigError::ValidationError(
                "price_step_ratio는 0과 1 사이여야 합니다".to_string(),
            ));
        }
        if self.min_overlap_count < 1 {
            return Err(ConfigError::ValidationError(
                "min_overlap_count는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.min_candles_for_scan < 2 {
            return Err(ConfigError::ValidationError(
                "min_candles_for_scan은 2 이상이어야 합니다".to_string(),
            ));
        }
        if self.daily_lookback == 0 || self.weekly_lookback_days == 0 {
            return Err(ConfigError::ValidationError(
                "lookback 기간은 0일 수 없습니다".to_string(),
            ));
        }
        if self.monthly_lookback_days == Some(0) {
            return Err(ConfigError::ValidationError(
                "monthly_lookback_days는 0일 수 없습니다 (전체 기간은 생략)".to_string(),
            ));
        }
        Ok(())
    }
}
