use serde::Serialize;
use thiserror::Error;

use crate::units::{SG_MAX, SG_MIN};

/// 계산할 데이터가 아직 부족할 때 표시하는 문자열
pub const ABV_PLACEHOLDER: &str = "--.--%";

/// ABV 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", content = "percent", rename_all = "snake_case")]
pub enum Abv {
    /// 계산된 알코올 도수 [%]
    Percent(f64),
    /// OG/FG가 계산 가능한 범위 밖 (오류 아님)
    InsufficientData,
}

impl std::fmt::Display for Abv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Abv::Percent(v) => write!(f, "{v:.2}%"),
            Abv::InsufficientData => f.write_str(ABV_PLACEHOLDER),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AbvError {
    /// 최종 비중이 초기 비중보다 높음
    #[error("Final gravity must be lower than original gravity")]
    InvalidOrdering { og: f64, fg: f64 },
}

/// ABV 공식: (76.08 * (og-fg) / (1.775-og)) * (fg / 0.794)
pub fn abv_percent(og: f64, fg: f64) -> f64 {
    (76.08 * (og - fg) / (1.775 - og)) * (fg / 0.794)
}

/// 초기/최종 비중(SG)으로 ABV를 계산한다.
pub fn calc_abv(og: f64, fg: f64) -> Result<Abv, AbvError> {
    let in_domain = |sg: f64| (SG_MIN..=SG_MAX).contains(&sg);
    if !in_domain(og) || !in_domain(fg) {
        return Ok(Abv::InsufficientData);
    }
    if fg > og {
        return Err(AbvError::InvalidOrdering { og, fg });
    }
    Ok(Abv::Percent(abv_percent(og, fg)))
}

/// 결과를 표시 문자열로 만든다. 순서 오류는 자리표시 문자열로 표시된다.
pub fn format_abv(og: f64, fg: f64) -> String {
    calc_abv(og, fg)
        .map(|abv| abv.to_string())
        .unwrap_or_else(|_| ABV_PLACEHOLDER.to_string())
}
