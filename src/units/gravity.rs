use serde::{Deserialize, Serialize};

/// 비중 측정값의 단위를 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GravityUnit {
    /// 비중(SG). 1.000~1.125
    #[default]
    SpecificGravity,
    /// Brix/Plato. 0.0~30.0
    Brix,
}

/// SG 유효 범위 하한
pub const SG_MIN: f64 = 1.000;
/// SG 유효 범위 상한
pub const SG_MAX: f64 = 1.125;
/// Brix 유효 범위 하한
pub const BRIX_MIN: f64 = 0.0;
/// Brix 유효 범위 상한
pub const BRIX_MAX: f64 = 30.0;

impl GravityUnit {
    /// 단위별 유효 범위 (하한, 상한)
    pub fn range(self) -> (f64, f64) {
        match self {
            GravityUnit::SpecificGravity => (SG_MIN, SG_MAX),
            GravityUnit::Brix => (BRIX_MIN, BRIX_MAX),
        }
    }

    /// 표시 및 정규화에 사용하는 소수 자릿수
    pub fn decimals(self) -> u32 {
        match self {
            GravityUnit::SpecificGravity => 3,
            GravityUnit::Brix => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GravityUnit::SpecificGravity => "SG",
            GravityUnit::Brix => "°Bx",
        }
    }
}

/// 값을 지정한 소수 자릿수로 반올림한다.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

fn brix_to_sg_unchecked(brix: f64) -> f64 {
    1.0 + brix / (258.6 - (brix / 258.2) * 227.1)
}

/// Brix를 SG로 변환한다. 0~30 °Bx 범위를 벗어나면 0을 반환한다.
pub fn brix_to_sg(brix: f64) -> f64 {
    if !(BRIX_MIN..=BRIX_MAX).contains(&brix) {
        return 0.0;
    }
    brix_to_sg_unchecked(brix)
}

/// SG를 Brix로 변환한다.
///
/// 3차 다항식 근사를 사용하며, 입력이 SG 하한 미만이거나 30 °Bx에 해당하는 SG를
/// 넘으면 외삽하지 않고 0을 반환한다. 음수 결과는 0으로 자른다.
pub fn sg_to_brix(sg: f64) -> f64 {
    if !(SG_MIN..=brix_to_sg_unchecked(BRIX_MAX)).contains(&sg) {
        return 0.0;
    }
    let brix = 135.997 * sg * sg * sg - 630.272 * sg * sg + 1111.14 * sg - 616.868;
    brix.max(0.0)
}

/// 비중 값을 서로 다른 단위로 변환한다.
pub fn convert_gravity(value: f64, from: GravityUnit, to: GravityUnit) -> f64 {
    match (from, to) {
        (GravityUnit::SpecificGravity, GravityUnit::Brix) => sg_to_brix(value),
        (GravityUnit::Brix, GravityUnit::SpecificGravity) => brix_to_sg(value),
        _ => value,
    }
}
