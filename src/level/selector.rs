use crate::level::LevelType;
use crate::level::scanner::PriceLevel;
use crate::level::strength::StrengthGrade;
use serde::Serialize;
use std::cmp::Ordering;

/// 현재가 대비 라인 후보 제외 마진 (최소 1% 이상 떨어져 있어야 함)
const LINE_MARGIN_RATIO: f64 = 0.01;

/// 선택된 지지선 또는 저항선
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub price: f64,
    pub level_type: LevelType,
    pub overlap_count: usize,
    pub strength: f64,
    pub strength_grade: StrengthGrade,
    /// 현재가와의 거리 (%)
    pub distance_percent: f64,
}

/// 라인 선택 결과
///
/// 타임프레임당 지지선과 저항선은 각각 최대 하나이며, 후보가 없는 쪽은
/// None입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectedLines {
    pub support: Option<Line>,
    pub resistance: Option<Line>,
}

/// 가장 강한 지지/저항선 선택기
#[derive(Debug, Clone, Default)]
pub struct LineSelector;

impl LineSelector {
    /// 스캔된 레벨을 현재가 기준으로 나누어 양쪽에서 가장 강한 레벨 선택
    ///
    /// # Arguments
    /// * `levels` - 스캔 결과 레벨 목록
    /// * `current_price` - 현재가 (최신 캔들 종가)
    pub fn select(&self, levels: &[PriceLevel], current_price: f64) -> SelectedLines {
        SelectedLines {
            support: self.pick(levels, current_price, LevelType::Support),
            resistance: self.pick(levels, current_price, LevelType::Resistance),
        }
    }

    fn pick(
        &self,
        levels: &[PriceLevel],
        current_price: f64,
        level_type: LevelType,
    ) -> Option<Line> {
        let strongest = levels
            .iter()
            .filter(|level| match level_type {
                LevelType::Resistance => level.price > current_price * (1.0 + LINE_MARGIN_RATIO),
                LevelType::Support => level.price < current_price * (1.0 - LINE_MARGIN_RATIO),
            })
            .max_by(|a, b| compare_candidates(a, b, current_price))?;

        let distance_percent = (strongest.price - current_price).abs() / current_price * 100.0;
        Some(Line {
            price: strongest.price,
            level_type,
            overlap_count: strongest.overlap_count,
            strength: strongest.strength,
            strength_grade: StrengthGrade::from_strength(strongest.strength),
            distance_percent,
        })
    }
}

/// 후보 우열 비교: 강도 → 중첩 횟수 → 현재가 근접도 순
fn compare_candidates(a: &PriceLevel, b: &PriceLevel, current_price: f64) -> Ordering {
    a.strength
        .partial_cmp(&b.strength)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.overlap_count.cmp(&b.overlap_count))
        .then_with(|| {
            // 거리가 가까운 쪽이 우위
            let distance_a = (a.price - current_price).abs();
            let distance_b = (b.price - current_price).abs();
            distance_b.partial_cmp(&distance_a).unwrap_or(Ordering::Equal)
        })
}
