//! 단위 정의 및 변환 모듈 모음.

pub mod gravity;

pub use gravity::{
    brix_to_sg, convert_gravity, round_to, sg_to_brix, GravityUnit, BRIX_MAX, BRIX_MIN, SG_MAX,
    SG_MIN,
};
