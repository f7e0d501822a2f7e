use crate::config::AnalysisConfig;
use crate::model::{Candle, StockCandle, Timeframe};
use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::BTreeMap;

/// 주봉 한 개를 구성하는 일봉 수
const DAYS_PER_WEEK: usize = 5;
/// 주봉으로 인정할 최소 일봉 수
const MIN_DAYS_PER_WEEK: usize = 2;
/// 월봉으로 인정할 최소 일봉 수
const MIN_DAYS_PER_MONTH: usize = 5;

/// 타임프레임 집계기
///
/// 최신순 일봉 시계열을 일봉/주봉/월봉 캔들 시퀀스로 변환합니다.
/// 필터링 후 사용할 수 있는 캔들이 없으면 빈 시퀀스를 반환하며, 이는
/// 데이터 부족 상태이지 오류가 아닙니다.
#[derive(Debug, Clone)]
pub struct TimeframeAggregator {
    daily_lookback: usize,
    weekly_lookback_days: usize,
    monthly_lookback_days: Option<usize>,
}

impl TimeframeAggregator {
    pub fn new(config: &AnalysisConfig) -> TimeframeAggregator {
        TimeframeAggregator {
            daily_lookback: config.daily_lookback,
            weekly_lookback_days: config.weekly_lookback_days,
            monthly_lookback_days: config.monthly_lookback_days,
        }
    }

    /// 요청한 타임프레임의 캔들 시퀀스 생성
    ///
    /// # Arguments
    /// * `daily` - 최신순 일봉 (최신 데이터가 인덱스 0)
    /// * `timeframe` - 변환할 타임프레임
    ///
    /// # Returns
    /// * `Vec<StockCandle>` - 최신순 캔들 시퀀스
    pub fn aggregate<C: Candle>(&self, daily: &[C], timeframe: Timeframe) -> Vec<StockCandle> {
        let normalized = self.normalize(daily);
        match timeframe {
            Timeframe::Daily => self.to_daily(normalized),
            Timeframe::Weekly => self.to_weekly(normalized),
            Timeframe::Monthly => self.to_monthly(normalized),
        }
    }

    /// 입력 레코드를 내부 캔들 타입으로 정규화
    ///
    /// 가격 필드가 유효하지 않은 레코드는 건너뜁니다. 레코드 하나 때문에
    /// 전체 분석이 실패해서는 안 됩니다.
    fn normalize<C: Candle>(&self, daily: &[C]) -> Vec<StockCandle> {
        let mut normalized = Vec::with_capacity(daily.len());
        let mut skipped = 0usize;

        for candle in daily {
            if !candle.has_valid_prices() {
                skipped += 1;
                continue;
            }
            normalized.push(StockCandle::new(
                candle.date(),
                candle.open_price(),
                candle.high_price(),
                candle.low_price(),
                candle.close_price(),
                candle.volume(),
            ));
        }

        if skipped > 0 {
            warn!("가격이 유효하지 않은 레코드 {}건 제외", skipped);
        }
        normalized
    }

    /// 일봉: 최근 1년치로 잘라서 그대로 사용
    fn to_daily(&self, mut candles: Vec<StockCandle>) -> Vec<StockCandle> {
        candles.truncate(self.daily_lookback);
        candles
    }

    /// 주봉: 최근 3년치 일봉을 5일 단위로 묶어 생성 (최신순 그룹핑)
    fn to_weekly(&self, mut candles: Vec<StockCandle>) -> Vec<StockCandle> {
        candles.truncate(self.weekly_lookback_days);

        let mut weekly = Vec::with_capacity(candles.len() / DAYS_PER_WEEK + 1);
        for group in candles.chunks(DAYS_PER_WEEK) {
            if group.len() < MIN_DAYS_PER_WEEK {
                continue;
            }
            // 그룹 첫 요소가 가장 최근 거래일, 마지막 요소가 가장 오래된 거래일
            let open = group[group.len() - 1].open;
            let close = group[0].close;
            let date = group[0].date;
            weekly.push(period_candle(date, open, close, group));
        }

        debug!(
            "주봉 변환 완료: 일봉 {}개 → 주봉 {}개",
            candles.len(),
            weekly.len()
        );
        weekly
    }

    /// 월봉: 달력 연-월 기준으로 묶어 생성
    ///
    /// 날짜가 없는 레코드는 그룹핑할 수 없으므로 건너뜁니다. 일봉이 5개
    /// 미만인 달은 의미있는 월봉이 되지 못해 제외합니다.
    fn to_monthly(&self, mut candles: Vec<StockCandle>) -> Vec<StockCandle> {
        if let Some(limit) = self.monthly_lookback_days {
            candles.truncate(limit);
        }

        let mut groups: BTreeMap<(i32, u32), Vec<StockCandle>> = BTreeMap::new();
        let mut undated = 0usize;
        for candle in candles {
            match candle.year_month() {
                Some(key) => groups.entry(key).or_default().push(candle),
                None => undated += 1,
            }
        }

        if undated > 0 {
            warn!("날짜 없는 레코드 {}건은 월봉 그룹핑에서 제외", undated);
        }

        let mut monthly = Vec::with_capacity(groups.len());
        for (_, mut month) in groups.into_iter().rev() {
            if month.len() < MIN_DAYS_PER_MONTH {
                continue;
            }
            // 월 내부는 과거 → 현재 순으로 정렬해 시가/종가를 결정
            month.sort_by_key(|candle| candle.date);
            let open = month[0].open;
            let close = month[month.len() - 1].close;
            let date = month[month.len() - 1].date;
            monthly.push(period_candle(date, open, close, &month));
        }

        debug!("월봉 변환 완료: 월봉 {}개", monthly.len());
        monthly
    }
}

/// 기간 캔들 생성 (주봉/월봉 공통)
///
/// 고가/저가는 기간 내 최고/최저, 거래량은 기간 합계입니다.
fn period_candle(
    date: Option<NaiveDate>,
    open: f64,
    close: f64,
    members: &[StockCandle],
) -> StockCandle {
    let high = members.iter().map(|c| c.high).fold(f64::MIN, f64::max);
    let low = members.iter().map(|c| c.low).fold(f64::MAX, f64::min);
    let volume = members.iter().map(|c| c.volume).sum();
    StockCandle::new(date, open, high, low, close, volume)
}
