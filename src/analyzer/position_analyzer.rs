use crate::level::Line;
use serde::Serialize;
use std::fmt::Display;

/// 박스권 상단 근접 판정 비율 (경계 포함)
const NEAR_RESISTANCE_RATIO: f64 = 0.8;
/// 박스권 하단 근접 판정 비율 (경계 제외)
const NEAR_SUPPORT_RATIO: f64 = 0.2;

/// 현재가의 시장 위치
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketPosition {
    /// 저항선 근접 (박스권 상단)
    NearResistance,
    /// 지지선 근접 (박스권 하단)
    NearSupport,
    /// 박스권 중간
    MidRange,
    /// 저항선 하단 (지지선 미확인)
    BelowResistance,
    /// 지지선 상단 (저항선 미확인)
    AboveSupport,
    /// 미확정 (유효한 라인 없음)
    Undetermined,
}

impl Display for MarketPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketPosition::NearResistance => write!(f, "저항선근접"),
            MarketPosition::NearSupport => write!(f, "지지선근접"),
            MarketPosition::MidRange => write!(f, "박스권중간"),
            MarketPosition::BelowResistance => write!(f, "저항선하단"),
            MarketPosition::AboveSupport => write!(f, "지지선상단"),
            MarketPosition::Undetermined => write!(f, "미확정"),
        }
    }
}

/// 위치 분석 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionAnalysis {
    pub position: MarketPosition,
    /// 박스권 내 현재가의 상대 위치 (지지/저항이 모두 있을 때만 Some)
    pub box_position_ratio: Option<f64>,
    /// 현재가에 더 가까운 라인
    pub nearest_line: Option<Line>,
    /// 권장 대응 전략
    pub strategy: String,
    /// 돌파 가능성 추정치
    pub breakout_probability: f64,
}

/// 현재가와 지지/저항선으로부터 시장 위치와 대응 전략 도출
///
/// 부수 효과가 없는 순수 함수이며, 상호 배타적인 네 가지 상태(박스권,
/// 저항선만, 지지선만, 둘 다 없음) 중 하나로 분류합니다.
pub fn analyze_position(
    current_price: f64,
    support: Option<&Line>,
    resistance: Option<&Line>,
) -> PositionAnalysis {
    let nearest_line = nearest_of(support, resistance);

    match (support, resistance) {
        (Some(support), Some(resistance)) => {
            let box_height = resistance.price - support.price;
            let ratio = (current_price - support.price) / box_height;

            let (position, strategy, breakout_probability) = if ratio >= NEAR_RESISTANCE_RATIO {
                (MarketPosition::NearResistance, "돌파 확인 후 매수", 0.75)
            } else if ratio < NEAR_SUPPORT_RATIO {
                (MarketPosition::NearSupport, "반발매수 타이밍", 0.25)
            } else {
                (MarketPosition::MidRange, "방향성 대기", 0.5)
            };

            PositionAnalysis {
                position,
                box_position_ratio: Some(ratio),
                nearest_line,
                strategy: strategy.to_string(),
                breakout_probability,
            }
        }
        (None, Some(_)) => PositionAnalysis {
            position: MarketPosition::BelowResistance,
            box_position_ratio: None,
            nearest_line,
            strategy: "돌파시 추격매수".to_string(),
            breakout_probability: 0.5,
        },
        (Some(_), None) => PositionAnalysis {
            position: MarketPosition::AboveSupport,
            box_position_ratio: None,
            nearest_line,
            strategy: "지지선 사수 필수".to_string(),
            breakout_probability: 0.5,
        },
        (None, None) => PositionAnalysis {
            position: MarketPosition::Undetermined,
            box_position_ratio: None,
            nearest_line: None,
            strategy: "데이터 부족 - 관망".to_string(),
            breakout_probability: 0.5,
        },
    }
}

/// distance_percent 기준으로 더 가까운 라인 반환
fn nearest_of(support: Option<&Line>, resistance: Option<&Line>) -> Option<Line> {
    match (support, resistance) {
        (Some(support), Some(resistance)) => {
            if support.distance_percent <= resistance.distance_percent {
                Some(support.clone())
            } else {
                Some(resistance.clone())
            }
        }
        (Some(support), None) => Some(support.clone()),
        (None, Some(resistance)) => Some(resistance.clone()),
        (None, None) => None,
    }
}
