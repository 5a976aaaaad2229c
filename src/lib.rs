//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 다른 입력 폼에서도 재사용한다.

pub mod abv;
pub mod app;
pub mod config;
pub mod conversion;
pub mod engine;
pub mod normalize;
pub mod refractometer;
pub mod ui_cli;
pub mod units;
