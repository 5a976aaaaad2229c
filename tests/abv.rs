//! ABV 공식과 굴절계 보정식 회귀 테스트.
use abv_calculator::abv::{calc_abv, format_abv, Abv, AbvError, ABV_PLACEHOLDER};
use abv_calculator::refractometer::{apply_wcf, corrected_final_gravity};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.9} got {actual:.9} (diff {diff:.9}, tol {tol})"
    );
}

#[test]
fn standard_formula_reference_case() {
    // (76.08 * 0.040 / 0.725) * (1.010 / 0.794) = 5.3394...
    assert_eq!(format_abv(1.050, 1.010), "5.34%");
    match calc_abv(1.050, 1.010) {
        Ok(Abv::Percent(v)) => assert_close("abv", v, 5.3394, 1e-4),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn strong_beer_at_domain_edges() {
    assert_eq!(format_abv(1.125, 1.000), "18.43%");
    assert_eq!(format_abv(1.060, 1.012), "6.51%");
}

#[test]
fn equal_gravities_give_zero() {
    assert_eq!(format_abv(1.040, 1.040), "0.00%");
}

#[test]
fn inverted_gravities_report_invalid_ordering() {
    let err = calc_abv(1.010, 1.050).unwrap_err();
    assert_eq!(
        err,
        AbvError::InvalidOrdering {
            og: 1.010,
            fg: 1.050
        }
    );
    assert_eq!(
        err.to_string(),
        "Final gravity must be lower than original gravity"
    );
    assert_eq!(format_abv(1.010, 1.050), ABV_PLACEHOLDER);
}

#[test]
fn out_of_domain_is_insufficient_data() {
    assert_eq!(calc_abv(0.5, 0.1), Ok(Abv::InsufficientData));
    assert_eq!(format_abv(0.5, 0.1), "--.--%");
    assert_eq!(format_abv(1.050, 0.0), "--.--%");
    assert_eq!(format_abv(1.130, 1.010), "--.--%");
}

#[test]
fn wort_correction_divides_by_factor() {
    assert_eq!(apply_wcf(10.0, 1.0), 10.0);
    assert_close("wcf 1.04", apply_wcf(10.0, 1.04), 9.615, 1e-3);
}

#[test]
fn zero_factor_leaves_reading_unchanged() {
    assert_eq!(apply_wcf(10.0, 0.0), 10.0);
}

#[test]
fn corrected_final_gravity_reference_points() {
    assert_close("0/0", corrected_final_gravity(0.0, 0.0), 1.0, 1e-12);
    assert_close("12/6", corrected_final_gravity(12.0, 6.0), 1.011_679_288, 1e-9);
    assert_close("10/5", corrected_final_gravity(10.0, 5.0), 1.010_297_125, 1e-9);
}

#[test]
fn corrected_final_gravity_uses_published_coefficients() {
    // O 항만 남기면 -0.0044993*O + 0.00027581*O^2 - 0.00000728*O^3
    let o = 10.0;
    let expected = 1.0 - 0.0044993 * o + 0.00027581 * o * o - 0.0000072800 * o * o * o;
    assert_close("O only", corrected_final_gravity(o, 0.0), expected, 1e-12);
    // F 항만 남기면 0.011774*F - 0.0012717*F^2 + 0.000063293*F^3
    let f = 4.0;
    let expected = 1.0 + 0.011774 * f - 0.0012717 * f * f + 0.000063293 * f * f * f;
    assert_close("F only", corrected_final_gravity(0.0, f), expected, 1e-12);
}
