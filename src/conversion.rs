//! 입력 폼 문자열을 엔진이 다루는 숫자/열거형으로 바꾸는 경계 계층.

use thiserror::Error;

use crate::engine::{AbvEngine, CalculationResult, Field, ReaderMode};
use crate::units::GravityUnit;

/// 입력 해석 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// 숫자로 해석할 수 없는 입력
    #[error("{field}: '{raw}' is not a number")]
    NotANumber { field: Field, raw: String },
    /// 알 수 없는 측정 기구 문자열
    #[error("unknown reader type: {0}")]
    UnknownReader(String),
    /// 알 수 없는 단위 문자열
    #[error("unknown unit type: {0}")]
    UnknownUnit(String),
}

/// 폼에서 발생하는 변경 이벤트.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    OriginalGravity(String),
    FinalGravity(String),
    CorrectionFactor(String),
    Reader(ReaderMode),
    Units(GravityUnit),
}

/// 필드 문자열을 숫자로 해석한다. 빈 문자열은 `None`(값 없음)이다.
pub fn parse_field(field: Field, raw: &str) -> Result<Option<f64>, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(InputError::NotANumber {
            field,
            raw: trimmed.to_string(),
        }),
    }
}

/// 이벤트를 엔진에 전달하고 재계산 결과를 돌려준다.
///
/// 해석에 실패한 입력은 엔진 상태를 바꾸지 않는다.
pub fn apply(engine: &mut AbvEngine, event: FieldEvent) -> Result<CalculationResult, InputError> {
    let result = match event {
        FieldEvent::OriginalGravity(raw) => {
            engine.set_original(parse_field(Field::OriginalGravity, &raw)?)
        }
        FieldEvent::FinalGravity(raw) => engine.set_final(parse_field(Field::FinalGravity, &raw)?),
        FieldEvent::CorrectionFactor(raw) => {
            engine.set_wcf(parse_field(Field::CorrectionFactor, &raw)?)
        }
        FieldEvent::Reader(mode) => engine.set_reader_mode(mode),
        FieldEvent::Units(unit) => engine.set_unit_mode(unit),
    };
    Ok(result)
}

/// 측정 기구 문자열을 enum으로 변환한다.
pub fn parse_reader_mode(s: &str) -> Result<ReaderMode, InputError> {
    match s.trim().to_lowercase().as_str() {
        "h" | "hydro" | "hydrometer" => Ok(ReaderMode::Hydrometer),
        "r" | "refract" | "refractometer" => Ok(ReaderMode::Refractometer),
        _ => Err(InputError::UnknownReader(s.to_string())),
    }
}

/// 단위 문자열을 enum으로 변환한다. Plato는 Brix와 같은 척도로 취급한다.
pub fn parse_gravity_unit(s: &str) -> Result<GravityUnit, InputError> {
    match s.trim().to_lowercase().as_str() {
        "sg" | "specific_gravity" | "specific-gravity" => Ok(GravityUnit::SpecificGravity),
        "bx" | "brix" | "°bx" | "p" | "plato" | "°p" => Ok(GravityUnit::Brix),
        _ => Err(InputError::UnknownUnit(s.to_string())),
    }
}
