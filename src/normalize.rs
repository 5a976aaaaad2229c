//! 입력값 정규화. 범위를 벗어난 값은 거부하지 않고 경계값으로 잘라낸 뒤 오류를 함께 돌려준다.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::units::{round_to, GravityUnit};

/// 보정계수(WCF) 하한
pub const WCF_MIN: f64 = 0.75;
/// 보정계수(WCF) 상한
pub const WCF_MAX: f64 = 1.25;

/// 범위 검사 대상 물리량.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Gravity,
    Brix,
    CorrectionFactor,
}

impl Quantity {
    fn decimals(self) -> usize {
        match self {
            Quantity::Gravity => 3,
            Quantity::Brix => 1,
            Quantity::CorrectionFactor => 2,
        }
    }

    fn format_limit(self, limit: &f64) -> String {
        format!("{limit:.prec$}", prec = self.decimals())
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::Gravity => write!(f, "gravity"),
            Quantity::Brix => write!(f, "Brix"),
            Quantity::CorrectionFactor => write!(f, "wort correction factor"),
        }
    }
}

impl From<GravityUnit> for Quantity {
    fn from(unit: GravityUnit) -> Self {
        match unit {
            GravityUnit::SpecificGravity => Quantity::Gravity,
            GravityUnit::Brix => Quantity::Brix,
        }
    }
}

/// 범위를 벗어난 입력. 항상 경계값으로 복구되며 치명적이지 않다.
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeError {
    #[error("Input {quantity} cannot be below {}", .quantity.format_limit(.limit))]
    BelowMinimum { quantity: Quantity, limit: f64 },
    #[error("Input {quantity} cannot exceed {}", .quantity.format_limit(.limit))]
    AboveMaximum { quantity: Quantity, limit: f64 },
}

fn clamp(value: f64, min: f64, max: f64, quantity: Quantity) -> (f64, Option<RangeError>) {
    // NaN은 하한 미만으로 취급
    if value.is_nan() || value < min {
        warn!(%quantity, value, min, "input below minimum, clamped");
        return (
            min,
            Some(RangeError::BelowMinimum {
                quantity,
                limit: min,
            }),
        );
    }
    if value > max {
        warn!(%quantity, value, max, "input above maximum, clamped");
        return (
            max,
            Some(RangeError::AboveMaximum {
                quantity,
                limit: max,
            }),
        );
    }
    (value, None)
}

/// 비중 입력을 단위별 유효 범위로 정규화한다.
///
/// SG 모드에서 999~1125 사이의 값은 소수점을 생략한 입력(예: `1050`)으로 보고
/// 1000으로 나눈다. 이후 범위로 자르고 SG는 소수 3자리, Brix는 1자리로 반올림한다.
pub fn normalize(raw: f64, unit: GravityUnit) -> (f64, Option<RangeError>) {
    let value = match unit {
        GravityUnit::SpecificGravity if raw > 999.0 && raw < 1125.0 => raw / 1000.0,
        _ => raw,
    };
    let (min, max) = unit.range();
    let (clamped, error) = clamp(value, min, max, unit.into());
    // -0.0은 0.0으로
    (round_to(clamped, unit.decimals()) + 0.0, error)
}

/// 보정계수를 0.75~1.25 범위로 정규화한다.
pub fn normalize_wcf(raw: f64) -> (f64, Option<RangeError>) {
    clamp(raw, WCF_MIN, WCF_MAX, Quantity::CorrectionFactor)
}
