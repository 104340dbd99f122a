//! End-to-end scenarios exercising the full parse → check → compile →
//! evaluate pipeline across both crates.

use analyzer::Ty;
use evaluator::{compile_expression, EvalContext, ExpressionError, Feature, MapProperties, Value};
use serde_json::json;

fn context(map: &MapProperties, feature: &Feature) -> EvalContext<'_> {
    EvalContext::new(map, feature)
}

#[test]
fn variadic_arithmetic_sums_left_to_right() {
    let compiled = compile_expression(&json!(["+", 1, 2, 3]), &Ty::Value).unwrap();
    let map = MapProperties { zoom: 0.0 };
    let feature = Feature::new(Default::default(), "Point", Value::Null);
    assert_eq!(
        compiled.evaluate(&context(&map, &feature)).unwrap(),
        Value::Number(6.0)
    );
}

#[test]
fn case_over_a_property_is_feature_dependent_and_branches_correctly() {
    let compiled = compile_expression(
        &json!(["case", ["==", ["get", ["properties"], "large"], true], "big", "small"]),
        &Ty::Value,
    )
    .unwrap();
    assert!(!compiled.is_feature_constant);
    assert!(compiled.is_zoom_constant);

    let map = MapProperties { zoom: 0.0 };
    let mut big_props = serde_json::Map::new();
    big_props.insert("large".to_string(), json!(true));
    let big_feature = Feature::new(big_props, "Point", Value::Null);
    assert_eq!(
        compiled.evaluate(&context(&map, &big_feature)).unwrap(),
        Value::String("big".to_string())
    );

    let mut small_props = serde_json::Map::new();
    small_props.insert("large".to_string(), json!(false));
    let small_feature = Feature::new(small_props, "Point", Value::Null);
    assert_eq!(
        compiled.evaluate(&context(&map, &small_feature)).unwrap(),
        Value::String("small".to_string())
    );
}

#[test]
fn curve_with_exponential_interpolation_over_zoom() {
    let compiled = compile_expression(
        &json!(["curve", ["exponential", 2], ["zoom"], 0, 0, 2, 10]),
        &Ty::Value,
    )
    .unwrap();
    assert!(compiled.is_feature_constant);
    assert!(!compiled.is_zoom_constant);

    let map = MapProperties { zoom: 1.0 };
    let feature = Feature::new(Default::default(), "Point", Value::Null);
    let Value::Number(result) = compiled.evaluate(&context(&map, &feature)).unwrap() else {
        panic!("expected a number");
    };
    let factor = (2f64.powf(1.0) - 1.0) / (2f64.powf(2.0) - 1.0);
    let expected = 0.0 + (10.0 - 0.0) * factor;
    assert!((result - expected).abs() < 1e-9);
}

#[test]
fn rgba_without_alpha_defaults_to_opaque() {
    let expected = Ty::Array(Box::new(Ty::Number), 4);
    let compiled =
        compile_expression(&json!(["color_to_array", ["rgba", 255, 0, 0]]), &expected).unwrap();
    let map = MapProperties { zoom: 0.0 };
    let feature = Feature::new(Default::default(), "Point", Value::Null);
    assert_eq!(
        compiled.evaluate(&context(&map, &feature)).unwrap(),
        Value::Array(vec![
            Value::Number(1.0),
            Value::Number(0.0),
            Value::Number(0.0),
            Value::Number(1.0),
        ])
    );
}

#[test]
fn get_on_a_missing_property_is_a_runtime_error_not_a_panic() {
    let compiled =
        compile_expression(&json!(["get", ["properties"], "missing"]), &Ty::Value).unwrap();
    let map = MapProperties { zoom: 0.0 };
    let feature = Feature::new(Default::default(), "Point", Value::Null);
    let err = compiled.evaluate(&context(&map, &feature)).unwrap_err();
    assert_eq!(
        err.message,
        "Property missing not found in object with keys: []"
    );
}

#[test]
fn a_type_mismatch_is_reported_as_a_diagnostic_keyed_to_the_bad_argument() {
    let err = compile_expression(&json!(["+", 1, "two"]), &Ty::Value).unwrap_err();
    match err {
        ExpressionError::Diagnostics(diags) => {
            assert_eq!(diags.len(), 1);
            assert_eq!(diags[0].key, "2");
            assert!(diags[0].error.contains("Expected Number but found String"));
        }
        other => panic!("expected diagnostics, got {other:?}"),
    }
}
