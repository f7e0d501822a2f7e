use chart_analysis::analyzer::position_analyzer::{MarketPosition, analyze_position};
use chart_analysis::level::{LevelType, Line, StrengthGrade};

fn line(price: f64, level_type: LevelType, current_price: f64) -> Line {
    Line {
        price,
        level_type,
        overlap_count: 5,
        strength: 12.0,
        strength_grade: StrengthGrade::B,
        distance_percent: (price - current_price).abs() / current_price * 100.0,
    }
}

#[test]
fn test_box_ratio_exactly_at_upper_bound_is_near_resistance() {
    // 지지 90, 저항 110, 현재가 106 → 박스 내 위치 0.8 (경계 포함)
    let support = line(90.0, LevelType::Support, 106.0);
    let resistance = line(110.0, LevelType::Resistance, 106.0);

    let analysis = analyze_position(106.0, Some(&support), Some(&resistance));

    assert_eq!(analysis.position, MarketPosition::NearResistance);
    assert_eq!(analysis.breakout_probability, 0.75);
    let ratio = analysis.box_position_ratio.unwrap();
    assert!((ratio - 0.8).abs() < 1e-12);

    // 더 가까운 라인은 저항선
    assert_eq!(
        analysis.nearest_line.as_ref().map(|l| l.price),
        Some(110.0)
    );
}

#[test]
fn test_box_lower_region_is_near_support() {
    let support = line(90.0, LevelType::Support, 92.0);
    let resistance = line(110.0, LevelType::Resistance, 92.0);

    let analysis = analyze_position(92.0, Some(&support), Some(&resistance));

    assert_eq!(analysis.position, MarketPosition::NearSupport);
    assert_eq!(analysis.breakout_probability, 0.25);
    assert_eq!(analysis.nearest_line.as_ref().map(|l| l.price), Some(90.0));
}

#[test]
fn test_box_middle_awaits_direction() {
    let support = line(90.0, LevelType::Support, 100.0);
    let resistance = line(110.0, LevelType::Resistance, 100.0);

    let analysis = analyze_position(100.0, Some(&support), Some(&resistance));

    assert_eq!(analysis.position, MarketPosition::MidRange);
    assert_eq!(analysis.breakout_probability, 0.5);
    let ratio = analysis.box_position_ratio.unwrap();
    assert!((ratio - 0.5).abs() < 1e-12);
    // 박스 중간에서도 더 가까운 라인은 항상 존재
    assert!(analysis.nearest_line.is_some());
}

#[test]
fn test_only_resistance_present() {
    let resistance = line(110.0, LevelType::Resistance, 100.0);

    let analysis = analyze_position(100.0, None, Some(&resistance));

    assert_eq!(analysis.position, MarketPosition::BelowResistance);
    assert_eq!(analysis.breakout_probability, 0.5);
    assert_eq!(analysis.box_position_ratio, None);
    assert_eq!(analysis.nearest_line.as_ref().map(|l| l.price), Some(110.0));
    assert!(!analysis.strategy.is_empty());
}

#[test]
fn test_only_support_present() {
    let support = line(90.0, LevelType::Support, 100.0);

    let analysis = analyze_position(100.0, Some(&support), None);

    assert_eq!(analysis.position, MarketPosition::AboveSupport);
    assert_eq!(analysis.breakout_probability, 0.5);
    assert_eq!(analysis.box_position_ratio, None);
    assert_eq!(analysis.nearest_line.as_ref().map(|l| l.price), Some(90.0));
}

#[test]
fn test_no_lines_is_undetermined() {
    let analysis = analyze_position(100.0, None, None);

    assert_eq!(analysis.position, MarketPosition::Undetermined);
    assert_eq!(analysis.breakout_probability, 0.5);
    assert_eq!(analysis.box_position_ratio, None);
    assert!(analysis.nearest_line.is_none());
}
