//! 입력 문자열 해석과 한 번 실행(run_once) 경로 테스트.
use abv_calculator::app::{run_once, Request};
use abv_calculator::config::{self, Config};
use abv_calculator::conversion::{
    apply, parse_field, parse_gravity_unit, parse_reader_mode, FieldEvent, InputError,
};
use abv_calculator::engine::{AbvEngine, Field, ReaderMode};
use abv_calculator::units::GravityUnit;

#[test]
fn field_strings_are_parsed_explicitly() {
    assert_eq!(
        parse_field(Field::OriginalGravity, " 1.050 "),
        Ok(Some(1.050))
    );
    assert_eq!(parse_field(Field::OriginalGravity, "1050"), Ok(Some(1050.0)));
    assert_eq!(parse_field(Field::FinalGravity, "   "), Ok(None));
    assert_eq!(
        parse_field(Field::FinalGravity, "abc"),
        Err(InputError::NotANumber {
            field: Field::FinalGravity,
            raw: "abc".to_string()
        })
    );
    assert!(parse_field(Field::CorrectionFactor, "inf").is_err());
    assert!(parse_field(Field::CorrectionFactor, "NaN").is_err());
}

#[test]
fn mode_strings_are_parsed() {
    assert_eq!(parse_reader_mode("Refractometer"), Ok(ReaderMode::Refractometer));
    assert_eq!(parse_reader_mode("h"), Ok(ReaderMode::Hydrometer));
    assert!(matches!(
        parse_reader_mode("densitometer"),
        Err(InputError::UnknownReader(_))
    ));
    assert_eq!(parse_gravity_unit("SG"), Ok(GravityUnit::SpecificGravity));
    assert_eq!(parse_gravity_unit("Plato"), Ok(GravityUnit::Brix));
    assert!(matches!(
        parse_gravity_unit("oechsle"),
        Err(InputError::UnknownUnit(_))
    ));
}

#[test]
fn unparsable_event_leaves_engine_untouched() {
    let mut engine = AbvEngine::new();
    apply(&mut engine, FieldEvent::OriginalGravity("1.050".into())).expect("valid");
    let err = apply(&mut engine, FieldEvent::OriginalGravity("1,050x".into())).unwrap_err();
    assert_eq!(
        err.to_string(),
        "original gravity: '1,050x' is not a number"
    );
    assert_eq!(engine.original(), Some(1.050));
}

#[test]
fn events_drive_the_engine() {
    let mut engine = AbvEngine::new();
    apply(&mut engine, FieldEvent::Reader(ReaderMode::Refractometer)).expect("reader");
    apply(&mut engine, FieldEvent::Units(GravityUnit::Brix)).expect("units");
    apply(&mut engine, FieldEvent::CorrectionFactor("1.04".into())).expect("wcf");
    apply(&mut engine, FieldEvent::OriginalGravity("12".into())).expect("og");
    let result = apply(&mut engine, FieldEvent::FinalGravity("6".into())).expect("fg");
    assert_eq!(result.abv, "4.65%");
}

#[test]
fn run_once_refractometer_request() {
    let request = Request {
        reader: Some(ReaderMode::Refractometer),
        units: Some(GravityUnit::Brix),
        original: Some("12".into()),
        final_gravity: Some("6".into()),
        wcf: None,
    };
    let result = run_once(&Config::default(), &request).expect("run");
    assert_eq!(result.calculated_og, Some(1.046));
    assert_eq!(result.calculated_fg, Some(1.011));
    assert_eq!(result.abv, "4.65%");
    assert!(result.errors.is_empty());
}

#[test]
fn run_once_keeps_errors_from_every_field() {
    let request = Request {
        original: Some("1150".into()),
        final_gravity: Some("1.010".into()),
        wcf: Some("3".into()),
        ..Request::default()
    };
    let result = run_once(&Config::default(), &request).expect("run");
    assert_eq!(result.calculated_og, Some(1.125));
    assert_eq!(result.abv, "17.12%");
    let fields: Vec<Field> = result.errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec![Field::CorrectionFactor, Field::OriginalGravity]);
}

#[test]
fn run_once_rejects_garbage() {
    let request = Request {
        original: Some("strong".into()),
        ..Request::default()
    };
    assert!(run_once(&Config::default(), &request).is_err());
}

#[test]
fn config_defaults_fill_missing_keys() {
    let cfg: Config = toml::from_str("unit_mode = \"brix\"").expect("parse");
    assert_eq!(cfg.unit_mode, GravityUnit::Brix);
    assert_eq!(cfg.reader_mode, ReaderMode::Hydrometer);
    assert_eq!(cfg.wcf_defaults.brix, 1.04);

    let engine = AbvEngine::from_config(&cfg);
    assert_eq!(engine.unit_mode(), GravityUnit::Brix);
    assert_eq!(engine.wcf(), 1.04);
}

#[test]
fn config_custom_factor_defaults() {
    let src = r#"
reader_mode = "refractometer"

[wcf_defaults]
sg = 1.02
brix = 1.06
"#;
    let cfg: Config = toml::from_str(src).expect("parse");
    let engine = AbvEngine::from_config(&cfg);
    assert!(engine.wcf_visible());
    assert_eq!(engine.wcf(), 1.02);
}

#[test]
fn config_is_written_when_missing_and_reloaded() {
    let path = std::env::temp_dir().join(format!("abv_calculator_{}.toml", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let created = config::load_or_default(&path).expect("create");
    assert_eq!(created, Config::default());
    assert!(path.exists());

    let mut changed = created.clone();
    changed.unit_mode = GravityUnit::Brix;
    changed.save(&path).expect("save");
    let reloaded = config::load_or_default(&path).expect("reload");
    assert_eq!(reloaded, changed);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn config_factor_defaults_are_clamped() {
    let src = r#"
reader_mode = "refractometer"

[wcf_defaults]
sg = 5.0
brix = 0.0
"#;
    let cfg: Config = toml::from_str(src).expect("parse");
    let mut engine = AbvEngine::from_config(&cfg);
    assert_eq!(engine.wcf(), 1.25);

    engine.set_original(Some(1.050));
    let result = engine.set_final(Some(1.020));
    assert!(result.errors.is_empty());
    assert_ne!(result.abv, "--.--%");

    // 손대지 않은 기본값은 단위 전환 시 잘린 Brix 기본값으로 바뀐다
    engine.set_unit_mode(GravityUnit::Brix);
    assert_eq!(engine.wcf(), 0.75);

    // 빈 입력도 잘린 기본값으로 되돌린다
    engine.set_wcf(Some(1.1));
    engine.set_wcf(None);
    assert_eq!(engine.wcf(), 0.75);
}
