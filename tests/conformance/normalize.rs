use super::common::fixture;
use campaign_config::normalize::normalize_krhred_tokens;

#[derive(Debug, serde::Deserialize)]
struct TestCase {
    id: String,
    name: String,
    input: String,
    expected: String,
    missing: bool,
}

#[test]
fn krhred_conformance_suite() {
    let cases: Vec<TestCase> = serde_saphyr::from_str(&fixture("krhred.yaml")).unwrap();
    assert!(!cases.is_empty());

    let mut failed = 0;
    for case in &cases {
        let out = normalize_krhred_tokens(&case.input);
        if out.text != case.expected || out.missing_detected != case.missing {
            eprintln!("  FAIL [{}] {}", case.id, case.name);
            eprintln!("    Expected: {:?} (missing: {})", case.expected, case.missing);
            eprintln!("    Actual:   {:?} (missing: {})", out.text, out.missing_detected);
            failed += 1;
        }
    }

    assert_eq!(failed, 0, "{} of {} KRHRED cases failed", failed, cases.len());
}

#[test]
fn krhred_suite_outputs_are_fixed_points() {
    let cases: Vec<TestCase> = serde_saphyr::from_str(&fixture("krhred.yaml")).unwrap();
    for case in cases.iter().filter(|c| !c.missing) {
        let once = normalize_krhred_tokens(&case.input).text;
        let twice = normalize_krhred_tokens(&once).text;
        assert_eq!(once, twice, "[{}] {}", case.id, case.name);
    }
}
