//! 굴절계 측정값 보정.

use serde::{Deserialize, Serialize};

/// 보정계수의 기본값 (SG 입력 기준 / Brix 입력 기준).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WcfDefaults {
    pub sg: f64,
    pub brix: f64,
}

impl Default for WcfDefaults {
    fn default() -> Self {
        Self { sg: 1.00, brix: 1.04 }
    }
}

/// 굴절계 Brix 측정값에 맥즙 보정계수(WCF)를 적용한다.
pub fn apply_wcf(brix: f64, wcf: f64) -> f64 {
    if wcf > 0.0 {
        brix / wcf
    } else {
        brix
    }
}

/// 발효 전/후 굴절계 Brix로부터 실제 최종 비중(SG)을 추정한다.
///
/// 잔류 알코올 때문에 굴절계는 발효 후 값을 잘못 읽는다. 경험식:
/// FG = 1.0000 - 0.0044993*O + 0.011774*F + 0.00027581*O^2 - 0.0012717*F^2
///      - 0.0000072800*O^3 + 0.000063293*F^3
/// O, F는 WCF 적용 후의 발효 전/후 Brix.
pub fn corrected_final_gravity(original_brix: f64, final_brix: f64) -> f64 {
    let o = original_brix;
    let f = final_brix;
    1.0000 - 0.0044993 * o + 0.011774 * f + 0.00027581 * o * o - 0.0012717 * f * f
        - 0.0000072800 * o * o * o
        + 0.000063293 * f * f * f
}
