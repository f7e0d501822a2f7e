// 가격 레벨 탐지 모듈
// 캔들 몸통 중첩 스캔, 중첩 강도 평가, 지지/저항선 선택을 제공합니다.

pub mod scanner;
pub mod selector;
pub mod strength;

pub use scanner::{OverlapRef, OverlapScanner, PriceLevel};
pub use selector::{Line, LineSelector, SelectedLines};
pub use strength::StrengthGrade;

use serde::Serialize;
use std::fmt::Display;

/// 라인 타입
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LevelType {
    /// 지지선 (현재가 아래)
    Support,
    /// 저항선 (현재가 위)
    Resistance,
}

impl Display for LevelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelType::Support => write!(f, "support"),
            LevelType::Resistance => write!(f, "resistance"),
        }
    }
}
