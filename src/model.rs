use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// 캔들 데이터 접근을 위한 트레이트
///
/// 데이터 수집 계층이 공급하는 일봉 레코드는 이 트레이트만 구현하면
/// 어떤 타입이든 분석 입력으로 사용할 수 있습니다.
pub trait Candle: Clone + Debug + PartialEq {
    /// 캔들 날짜 (누락되었거나 파싱할 수 없으면 None)
    fn date(&self) -> Option<NaiveDate>;
    /// 시가
    fn open_price(&self) -> f64;
    /// 고가
    fn high_price(&self) -> f64;
    /// 저가
    fn low_price(&self) -> f64;
    /// 종가
    fn close_price(&self) -> f64;
    /// 거래량
    fn volume(&self) -> f64;

    /// 캔들 몸통 구간 반환 (하단, 상단)
    ///
    /// 몸통은 시가와 종가 사이의 구간이며 고가/저가 꼬리는 포함하지 않습니다.
    fn body_range(&self) -> (f64, f64) {
        let open = self.open_price();
        let close = self.close_price();
        (open.min(close), open.max(close))
    }

    /// 캔들 몸통 크기 (시가와 종가의 차이)
    fn body_size(&self) -> f64 {
        (self.close_price() - self.open_price()).abs()
    }

    /// 가격 필드가 모두 유효한지 확인
    ///
    /// OHLC 중 하나라도 결측이거나 수치가 아닌 레코드는 집계와 스캔에서
    /// 제외됩니다.
    fn has_valid_prices(&self) -> bool {
        [
            self.open_price(),
            self.high_price(),
            self.low_price(),
            self.close_price(),
        ]
        .iter()
        .all(|price| price.is_finite() && *price > 0.0)
    }
}

/// 분석 타임프레임
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// 일봉
    Daily,
    /// 주봉 (일봉 5개 묶음)
    Weekly,
    /// 월봉 (달력 연-월 묶음)
    Monthly,
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timeframe::Daily => write!(f, "daily"),
            Timeframe::Weekly => write!(f, "weekly"),
            Timeframe::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Timeframe::Daily),
            "weekly" => Ok(Timeframe::Weekly),
            "monthly" => Ok(Timeframe::Monthly),
            _ => Err(format!("지원되지 않는 타임프레임: {}", s)),
        }
    }
}

/// 집계기가 생성하는 캔들
///
/// 정규화된 일봉과 여기서 파생되는 주봉/월봉 캔들의 공통 표현입니다.
/// 생성 후에는 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockCandle {
    pub date: Option<NaiveDate>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl StockCandle {
    pub fn new(
        date: Option<NaiveDate>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> StockCandle {
        StockCandle {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 연-월 키 반환 (월봉 그룹핑과 시간 분산 보너스에 사용)
    pub fn year_month(&self) -> Option<(i32, u32)> {
        self.date.map(|d| (d.year(), d.month()))
    }
}

impl Display for StockCandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StockCandle(date={:?}, o={}, h={}, l={}, c={}, v={})",
            self.date, self.open, self.high, self.low, self.close, self.volume
        )
    }
}

impl Candle for StockCandle {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }
    fn open_price(&self) -> f64 {
        self.open
    }
    fn high_price(&self) -> f64 {
        self.high
    }
    fn low_price(&self) -> f64 {
        self.low
    }
    fn close_price(&self) -> f64 {
        self.close
    }
    fn volume(&self) -> f64 {
        self.volume
    }
}
