use crate::level::scanner::OverlapRef;
use chrono::Datelike;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Display;

/// 몸통 크기 보너스 상한
const MAX_BODY_SIZE_BONUS: f64 = 5.0;
/// 몸통 크기 보너스 환산 나눗수
const BODY_SIZE_DIVISOR: f64 = 1000.0;
/// 시간 분산 보너스 상한
const MAX_TEMPORAL_BONUS: f64 = 10.0;

/// 중첩 강도 계산
///
/// 기본 점수는 중첩 횟수입니다. 여기에 두 가지 보너스를 더합니다.
/// 큰 몸통끼리의 중첩일수록(도지성 캔들이 아닐수록), 그리고 여러 연-월에
/// 걸쳐 확인된 중첩일수록 강한 라인으로 평가합니다.
///
/// # Returns
/// * `f64` - 소수점 둘째 자리로 반올림한 강도 값
pub fn calculate_strength(overlap_count: usize, overlapping: &[OverlapRef]) -> f64 {
    let base_score = overlap_count as f64;

    let body_size_bonus = if overlapping.is_empty() {
        0.0
    } else {
        let avg_body_size =
            overlapping.iter().map(|r| r.body_size).sum::<f64>() / overlapping.len() as f64;
        (avg_body_size / BODY_SIZE_DIVISOR).min(MAX_BODY_SIZE_BONUS)
    };

    // 날짜 없는 레코드는 시간 분산에 기여하지 못함
    let months: HashSet<(i32, u32)> = overlapping
        .iter()
        .filter_map(|r| r.date.map(|d| (d.year(), d.month())))
        .collect();
    let temporal_bonus = (months.len() as f64).min(MAX_TEMPORAL_BONUS);

    let total = base_score + body_size_bonus + temporal_bonus;
    (total * 100.0).round() / 100.0
}

/// 중첩 강도 등급
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthGrade {
    S,
    A,
    B,
    C,
    D,
}

impl StrengthGrade {
    /// 강도 값에서 등급 산출 (하한 포함)
    pub fn from_strength(strength: f64) -> StrengthGrade {
        if strength >= 20.0 {
            StrengthGrade::S
        } else if strength >= 15.0 {
            StrengthGrade::A
        } else if strength >= 10.0 {
            StrengthGrade::B
        } else if strength >= 7.0 {
            StrengthGrade::C
        } else {
            StrengthGrade::D
        }
    }
}

impl Display for StrengthGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrengthGrade::S => write!(f, "S급"),
            StrengthGrade::A => write!(f, "A급"),
            StrengthGrade::B => write!(f, "B급"),
            StrengthGrade::C => write!(f, "C급"),
            StrengthGrade::D => write!(f, "D급"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn overlap_ref(year: i32, month: u32, body_size: f64) -> OverlapRef {
        OverlapRef {
            index: 0,
            date: NaiveDate::from_ymd_opt(year, month, 15),
            body_size,
        }
    }

    #[test]
    fn test_strength_sums_base_and_bonuses() {
        // 중첩 5회, 평균 몸통 2000 → 보너스 2.0, 연-월 3개 → 보너스 3.0
        let refs = vec![
            overlap_ref(2024, 1, 1000.0),
            overlap_ref(2024, 2, 2000.0),
            overlap_ref(2024, 3, 3000.0),
            overlap_ref(2024, 3, 2000.0),
            overlap_ref(2024, 3, 2000.0),
        ];
        assert_eq!(calculate_strength(5, &refs), 10.0);
    }

    #[test]
    fn test_body_size_bonus_is_capped() {
        let refs = vec![
            overlap_ref(2024, 1, 100_000.0),
            overlap_ref(2024, 1, 100_000.0),
            overlap_ref(2024, 1, 100_000.0),
        ];
        // 보너스는 5.0에서 포화: 3 + 5 + 1
        assert_eq!(calculate_strength(3, &refs), 9.0);
    }

    #[test]
    fn test_temporal_bonus_ignores_undated() {
        let mut refs = vec![overlap_ref(2024, 1, 0.0), overlap_ref(2024, 2, 0.0)];
        refs.push(OverlapRef {
            index: 9,
            date: None,
            body_size: 0.0,
        });
        assert_eq!(calculate_strength(3, &refs), 5.0);
    }

    #[test]
    fn test_grade_lower_bounds_inclusive() {
        assert_eq!(StrengthGrade::from_strength(20.0), StrengthGrade::S);
        assert_eq!(StrengthGrade::from_strength(19.99), StrengthGrade::A);
        assert_eq!(StrengthGrade::from_strength(15.0), StrengthGrade::A);
        assert_eq!(StrengthGrade::from_strength(10.0), StrengthGrade::B);
        assert_eq!(StrengthGrade::from_strength(7.0), StrengthGrade::C);
        assert_eq!(StrengthGrade::from_strength(6.99), StrengthGrade::D);
    }
}
