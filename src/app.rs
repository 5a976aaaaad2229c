use std::io::{self, BufRead};

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::conversion::{self, FieldEvent, InputError};
use crate::engine::{AbvEngine, CalculationResult, ReaderMode};
use crate::ui_cli;
use crate::units::GravityUnit;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 입력 해석 오류
    #[error("input error: {0}")]
    Input(#[from] InputError),
    /// JSON 출력 오류
    #[error("output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 한 번의 계산 요청. 지정되지 않은 항목은 설정값을 따른다.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub reader: Option<ReaderMode>,
    pub units: Option<GravityUnit>,
    pub original: Option<String>,
    pub final_gravity: Option<String>,
    pub wcf: Option<String>,
}

impl Request {
    /// 폼 입력 순서대로 이벤트를 만든다: 기구, 단위, 보정계수, OG, FG.
    fn events(&self) -> Vec<FieldEvent> {
        let mut events = Vec::new();
        events.extend(self.reader.map(FieldEvent::Reader));
        events.extend(self.units.map(FieldEvent::Units));
        events.extend(self.wcf.clone().map(FieldEvent::CorrectionFactor));
        events.extend(self.original.clone().map(FieldEvent::OriginalGravity));
        events.extend(self.final_gravity.clone().map(FieldEvent::FinalGravity));
        events
    }
}

/// 요청을 새 세션에 적용하고 최종 결과를 반환한다.
///
/// 중간 단계에서 발생한 범위 오류도 결과에 모두 남긴다.
pub fn run_once(config: &Config, request: &Request) -> Result<CalculationResult, AppError> {
    let mut engine = AbvEngine::from_config(config);
    let mut errors = Vec::new();
    let mut result = engine.recalculate();
    for event in request.events() {
        result = conversion::apply(&mut engine, event)?;
        for err in result.errors.drain(..) {
            if !errors.contains(&err) {
                errors.push(err);
            }
        }
    }
    result.errors = errors;
    Ok(result)
}

/// 표준 입력으로 대화형 메뉴 루프를 실행한다.
pub fn run_interactive(config: &Config) -> Result<(), AppError> {
    run_session(config, &mut io::stdin().lock()).map(|_| ())
}

/// 주어진 입력에서 메뉴 선택을 읽어 세션을 진행한다.
///
/// 종료를 고르거나 입력이 끝나면 마지막 세션 상태를 반환한다.
pub fn run_session(config: &Config, input: &mut impl BufRead) -> Result<AbvEngine, AppError> {
    let mut engine = AbvEngine::from_config(config);
    ui_cli::print_result(&engine, &engine.recalculate());
    while let Some(event) = ui_cli::main_menu(&engine, input)? {
        match conversion::apply(&mut engine, event) {
            Ok(result) => ui_cli::print_result(&engine, &result),
            Err(err) => println!("{err}"),
        }
    }
    Ok(engine)
}
