use std::path::PathBuf;

use abv_calculator::app::{self, AppError, Request};
use abv_calculator::config;
use abv_calculator::conversion::{parse_gravity_unit, parse_reader_mode};
use abv_calculator::engine::ReaderMode;
use abv_calculator::units::GravityUnit;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// 비중계/굴절계 측정값으로 알코올 도수(ABV)를 계산한다.
#[derive(Parser, Debug)]
#[command(name = "abv_calculator", version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 측정 기구 (hydrometer | refractometer)
    #[arg(long, value_parser = parse_reader_mode)]
    reader: Option<ReaderMode>,

    /// 입력 단위 (sg | brix | plato)
    #[arg(long, value_parser = parse_gravity_unit)]
    units: Option<GravityUnit>,

    /// 초기 비중 (OG)
    #[arg(long, allow_hyphen_values = true)]
    og: Option<String>,

    /// 최종 비중 (FG)
    #[arg(long, allow_hyphen_values = true)]
    fg: Option<String>,

    /// 굴절계 맥즙 보정계수 (WCF)
    #[arg(long, allow_hyphen_values = true)]
    wcf: Option<String>,

    /// 결과를 JSON으로 출력
    #[arg(long)]
    json: bool,

    /// 대화형 모드
    #[arg(short, long)]
    interactive: bool,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "abv_calculator=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = try_run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(&cli.config)?;
    if cli.interactive {
        return app::run_interactive(&cfg);
    }

    let request = Request {
        reader: cli.reader,
        units: cli.units,
        original: cli.og,
        final_gravity: cli.fg,
        wcf: cli.wcf,
    };
    let result = app::run_once(&cfg, &request)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    for err in &result.errors {
        eprintln!("warning: {}: {}", err.field, err.message);
    }
    if let Some(og) = result.calculated_og {
        println!("OG:  {og:.3}");
    }
    if let Some(fg) = result.calculated_fg {
        println!("FG:  {fg:.3}");
    }
    println!("ABV: {}", result.abv);
    Ok(())
}
