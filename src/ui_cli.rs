use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::conversion::FieldEvent;
use crate::engine::{AbvEngine, CalculationResult, ReaderMode};
use crate::units::GravityUnit;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    OriginalGravity,
    FinalGravity,
    CorrectionFactor,
    ReaderType,
    UnitType,
    Exit,
}

/// 메뉴 번호를 해석한다. 보정계수(3)는 입력란이 보일 때만 고를 수 있다.
pub fn parse_choice(sel: &str, wcf_visible: bool) -> Option<MenuChoice> {
    match sel.trim() {
        "1" => Some(MenuChoice::OriginalGravity),
        "2" => Some(MenuChoice::FinalGravity),
        "3" if wcf_visible => Some(MenuChoice::CorrectionFactor),
        "4" => Some(MenuChoice::ReaderType),
        "5" => Some(MenuChoice::UnitType),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 메인 메뉴를 표시하고 선택에 해당하는 이벤트를 반환한다.
///
/// 종료를 고르거나 입력이 끝나면(EOF) `None`.
pub fn main_menu(
    engine: &AbvEngine,
    input: &mut impl BufRead,
) -> Result<Option<FieldEvent>, AppError> {
    let unit = engine.unit_mode().label();
    println!("\n=== ABV Calculator ===");
    println!("1) Original gravity ({unit})");
    println!("2) Final gravity ({unit})");
    if engine.wcf_visible() {
        println!("3) Wort correction factor (now {:.2})", engine.wcf());
    }
    println!("4) Reader type (now {:?})", engine.reader_mode());
    println!("5) Units (now {unit})");
    println!("0) Exit");
    let choice = loop {
        let Some(sel) = read_line(input, "Select: ")? else {
            return Ok(None);
        };
        if let Some(choice) = parse_choice(&sel, engine.wcf_visible()) {
            break choice;
        }
        println!("Invalid selection, try again.");
    };
    let event = match choice {
        MenuChoice::OriginalGravity => read_line(input, "OG: ")?.map(FieldEvent::OriginalGravity),
        MenuChoice::FinalGravity => read_line(input, "FG: ")?.map(FieldEvent::FinalGravity),
        MenuChoice::CorrectionFactor => {
            read_line(input, "WCF: ")?.map(FieldEvent::CorrectionFactor)
        }
        MenuChoice::ReaderType => read_reader_mode(input)?.map(FieldEvent::Reader),
        MenuChoice::UnitType => read_gravity_unit(input)?.map(FieldEvent::Units),
        MenuChoice::Exit => None,
    };
    Ok(event)
}

/// 계산 결과와 필드 오류를 출력한다.
pub fn print_result(engine: &AbvEngine, result: &CalculationResult) {
    for err in &result.errors {
        println!("! {}: {}", err.field, err.message);
    }
    let fmt_sg = |sg: Option<f64>| sg.map_or_else(|| "-.---".to_string(), |v| format!("{v:.3}"));
    let label = match engine.reader_mode() {
        ReaderMode::Hydrometer => "",
        ReaderMode::Refractometer => "corrected ",
    };
    println!("{label}OG: {}", fmt_sg(result.calculated_og));
    println!("{label}FG: {}", fmt_sg(result.calculated_fg));
    println!("ABV: {}", result.abv);
}

/// 한 줄을 읽는다. 읽은 바이트가 없으면(EOF) `None`.
fn read_line(input: &mut impl BufRead, prompt: &str) -> Result<Option<String>, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

fn read_reader_mode(input: &mut impl BufRead) -> Result<Option<ReaderMode>, AppError> {
    println!("Reader: 1=Hydrometer 2=Refractometer");
    let mode = read_line(input, "Select: ")?.map(|sel| match sel.trim() {
        "2" => ReaderMode::Refractometer,
        _ => ReaderMode::Hydrometer,
    });
    Ok(mode)
}

fn read_gravity_unit(input: &mut impl BufRead) -> Result<Option<GravityUnit>, AppError> {
    println!("Units: 1=SG 2=Brix/Plato");
    let unit = read_line(input, "Select: ")?.map(|sel| match sel.trim() {
        "2" => GravityUnit::Brix,
        _ => GravityUnit::SpecificGravity,
    });
    Ok(unit)
}
