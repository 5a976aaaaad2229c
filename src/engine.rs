//! 입력 변경마다 OG/FG/ABV를 다시 계산하는 상태 엔진.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::abv::{self, Abv};
use crate::config::Config;
use crate::normalize::{normalize, normalize_wcf};
use crate::refractometer::{apply_wcf, corrected_final_gravity, WcfDefaults};
use crate::units::{brix_to_sg, convert_gravity, round_to, GravityUnit, SG_MAX, SG_MIN};

/// 측정 기구 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReaderMode {
    #[default]
    Hydrometer,
    /// 보정계수(WCF) 입력이 추가로 필요하다.
    Refractometer,
}

/// 오류가 연결되는 입력 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    OriginalGravity,
    FinalGravity,
    CorrectionFactor,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::OriginalGravity => write!(f, "original gravity"),
            Field::FinalGravity => write!(f, "final gravity"),
            Field::CorrectionFactor => write!(f, "wort correction factor"),
        }
    }
}

/// 필드별 사용자 표시용 오류.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, err: impl std::fmt::Display) -> Self {
        Self {
            field,
            message: err.to_string(),
        }
    }
}

/// 재계산 결과. 매 계산마다 세 출력값을 모두 새로 채운다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    /// 보정된 초기 비중 (SG, 소수 3자리)
    pub calculated_og: Option<f64>,
    /// 보정된 최종 비중 (SG, 소수 3자리)
    pub calculated_fg: Option<f64>,
    /// ABV 문자열 (`5.34%` 또는 `--.--%`)
    pub abv: String,
    pub errors: Vec<FieldError>,
}

/// 비중 변환 및 ABV 계산 세션.
#[derive(Debug, Clone)]
pub struct AbvEngine {
    reader_mode: ReaderMode,
    unit_mode: GravityUnit,
    original: Option<f64>,
    final_gravity: Option<f64>,
    wcf: f64,
    wcf_defaults: WcfDefaults,
}

impl Default for AbvEngine {
    fn default() -> Self {
        let wcf_defaults = WcfDefaults::default();
        Self {
            reader_mode: ReaderMode::Hydrometer,
            unit_mode: GravityUnit::SpecificGravity,
            original: None,
            final_gravity: None,
            wcf: wcf_defaults.sg,
            wcf_defaults,
        }
    }
}

impl AbvEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 설정 파일의 기본 모드와 보정계수로 세션을 만든다.
    ///
    /// 설정의 기본 보정계수도 0.75~1.25 범위로 자른다.
    pub fn from_config(cfg: &Config) -> Self {
        let wcf_defaults = WcfDefaults {
            sg: normalize_wcf(cfg.wcf_defaults.sg).0,
            brix: normalize_wcf(cfg.wcf_defaults.brix).0,
        };
        let mut engine = Self {
            reader_mode: cfg.reader_mode,
            unit_mode: cfg.unit_mode,
            wcf_defaults,
            ..Self::default()
        };
        engine.wcf = engine.default_wcf(cfg.unit_mode);
        engine
    }

    pub fn reader_mode(&self) -> ReaderMode {
        self.reader_mode
    }

    pub fn unit_mode(&self) -> GravityUnit {
        self.unit_mode
    }

    /// 현재 단위로 저장된 초기 측정값
    pub fn original(&self) -> Option<f64> {
        self.original
    }

    /// 현재 단위로 저장된 최종 측정값
    pub fn final_gravity(&self) -> Option<f64> {
        self.final_gravity
    }

    pub fn wcf(&self) -> f64 {
        self.wcf
    }

    /// 보정계수 입력란 표시 여부 (굴절계 모드에서만)
    pub fn wcf_visible(&self) -> bool {
        self.reader_mode == ReaderMode::Refractometer
    }

    fn default_wcf(&self, unit: GravityUnit) -> f64 {
        match unit {
            GravityUnit::SpecificGravity => self.wcf_defaults.sg,
            GravityUnit::Brix => self.wcf_defaults.brix,
        }
    }

    /// 측정 기구를 바꾼다. 값 변화와 무관하게 항상 재계산한다.
    pub fn set_reader_mode(&mut self, mode: ReaderMode) -> CalculationResult {
        self.reader_mode = mode;
        self.recalculate()
    }

    /// 단위를 바꾼다. 실제로 바뀐 경우에만 저장된 측정값을 변환 후 정규화한다.
    ///
    /// 보정계수가 이전 단위의 기본값 그대로라면 새 단위의 기본값으로 바꾼다.
    pub fn set_unit_mode(&mut self, unit: GravityUnit) -> CalculationResult {
        let previous = self.unit_mode;
        if previous == unit {
            return self.recalculate();
        }
        self.unit_mode = unit;

        let mut errors = Vec::new();
        let mut convert = |reading: Option<f64>, field: Field| {
            reading.map(|value| {
                let (converted, err) = normalize(convert_gravity(value, previous, unit), unit);
                errors.extend(err.map(|e| FieldError::new(field, e)));
                converted
            })
        };
        self.original = convert(self.original, Field::OriginalGravity);
        self.final_gravity = convert(self.final_gravity, Field::FinalGravity);

        if (self.wcf - self.default_wcf(previous)).abs() < 1e-9 {
            self.wcf = self.default_wcf(unit);
        }
        debug!(?previous, ?unit, wcf = self.wcf, "unit mode changed");
        self.calculate(errors)
    }

    /// 초기 측정값을 입력한다. `None`은 빈 입력.
    pub fn set_original(&mut self, raw: Option<f64>) -> CalculationResult {
        let (value, errors) = self.normalize_reading(raw, Field::OriginalGravity);
        self.original = value;
        self.calculate(errors)
    }

    /// 최종 측정값을 입력한다. `None`은 빈 입력.
    pub fn set_final(&mut self, raw: Option<f64>) -> CalculationResult {
        let (value, errors) = self.normalize_reading(raw, Field::FinalGravity);
        self.final_gravity = value;
        self.calculate(errors)
    }

    /// 보정계수를 입력한다. `None`이면 현재 단위의 기본값으로 되돌린다.
    pub fn set_wcf(&mut self, raw: Option<f64>) -> CalculationResult {
        let mut errors = Vec::new();
        self.wcf = match raw {
            Some(raw) => {
                let (wcf, err) = normalize_wcf(raw);
                errors.extend(err.map(|e| FieldError::new(Field::CorrectionFactor, e)));
                wcf
            }
            None => self.default_wcf(self.unit_mode),
        };
        self.calculate(errors)
    }

    /// 현재 상태로 출력값을 다시 계산한다.
    pub fn recalculate(&self) -> CalculationResult {
        self.calculate(Vec::new())
    }

    fn normalize_reading(
        &self,
        raw: Option<f64>,
        field: Field,
    ) -> (Option<f64>, Vec<FieldError>) {
        match raw {
            Some(raw) => {
                let (value, err) = normalize(raw, self.unit_mode);
                (Some(value), err.map(|e| FieldError::new(field, e)).into_iter().collect())
            }
            None => (None, Vec::new()),
        }
    }

    fn to_sg(&self, reading: f64) -> f64 {
        convert_gravity(reading, self.unit_mode, GravityUnit::SpecificGravity)
    }

    fn to_brix(&self, reading: f64) -> f64 {
        convert_gravity(reading, self.unit_mode, GravityUnit::Brix)
    }

    /// (보정 OG, 보정 FG)를 SG 기준으로 구한다.
    fn corrected_gravities(&self) -> (Option<f64>, Option<f64>) {
        match self.reader_mode {
            ReaderMode::Hydrometer => (
                self.original.map(|v| self.to_sg(v)),
                self.final_gravity.map(|v| self.to_sg(v)),
            ),
            ReaderMode::Refractometer => {
                let original_brix = self.original.map(|v| apply_wcf(self.to_brix(v), self.wcf));
                let final_brix = self
                    .final_gravity
                    .map(|v| apply_wcf(self.to_brix(v), self.wcf));
                (
                    original_brix.map(brix_to_sg),
                    original_brix
                        .zip(final_brix)
                        .map(|(o, f)| corrected_final_gravity(o, f)),
                )
            }
        }
    }

    fn calculate(&self, mut errors: Vec<FieldError>) -> CalculationResult {
        let (og, fg) = self.corrected_gravities();
        let og = og.map(|sg| round_to(sg, 3));
        let fg = fg.map(|sg| round_to(sg, 3));

        let abv = match og.zip(fg) {
            Some((og, fg)) => match abv::calc_abv(og, fg) {
                Ok(abv) => abv,
                Err(err) => {
                    warn!(og, fg, "final gravity above original gravity");
                    errors.push(FieldError::new(Field::FinalGravity, err));
                    Abv::InsufficientData
                }
            },
            None => Abv::InsufficientData,
        };
        // 환산 결과가 SG 범위 밖이면 자리표시자가 나온 이유를 남긴다
        for (field, sg) in [(Field::OriginalGravity, og), (Field::FinalGravity, fg)] {
            if let Some(sg) = sg.filter(|sg| !(SG_MIN..=SG_MAX).contains(sg)) {
                errors.push(FieldError {
                    field,
                    message: format!(
                        "Calculated {field} {sg:.3} is outside {SG_MIN:.3}-{SG_MAX:.3}"
                    ),
                });
            }
        }
        debug!(
            reader = ?self.reader_mode,
            unit = ?self.unit_mode,
            ?og,
            ?fg,
            %abv,
            "recalculated"
        );
        CalculationResult {
            calculated_og: og,
            calculated_fg: fg,
            abv: abv.to_string(),
            errors,
        }
    }
}
