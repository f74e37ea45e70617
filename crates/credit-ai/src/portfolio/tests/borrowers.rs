use crate::portfolio::{
    search, Decision, PortfolioBand, PortfolioSnapshot, APPROVAL_CUTOFF, BORROWER_COUNT,
};

#[test]
fn generation_is_deterministic_per_seed() {
    let first = PortfolioSnapshot::generate(7);
    let second = PortfolioSnapshot::generate(7);
    let other = PortfolioSnapshot::generate(8);

    assert_eq!(first.borrowers, second.borrowers);
    assert_eq!(first.prediction_histogram, second.prediction_histogram);
    assert_ne!(first.borrowers, other.borrowers);
}

#[test]
fn borrowers_follow_naming_and_id_scheme() {
    let snapshot = PortfolioSnapshot::generate(42);
    assert_eq!(snapshot.borrowers.len(), BORROWER_COUNT);

    let first = &snapshot.borrowers[0];
    assert_eq!(first.id, "BRW-1001");
    assert_eq!(first.name, "Aarav Sharma");

    let second = &snapshot.borrowers[1];
    assert_eq!(second.id, "BRW-1002");
    assert_eq!(second.name, "Priya Mehta");

    assert_eq!(snapshot.borrowers[49].id, "BRW-1050");
}

#[test]
fn borrower_fields_stay_in_range() {
    let snapshot = PortfolioSnapshot::generate(42);

    for borrower in &snapshot.borrowers {
        assert!((350..=850).contains(&borrower.credit_score), "{}", borrower.id);
        assert_eq!(
            borrower.risk_band,
            PortfolioBand::from_credit_score(borrower.credit_score)
        );
        let expected = if borrower.credit_score >= APPROVAL_CUTOFF {
            Decision::Approve
        } else {
            Decision::Decline
        };
        assert_eq!(borrower.recommendation, expected);

        match borrower.risk_band {
            PortfolioBand::Low => assert!(borrower.prediction_probability <= 0.35 + 1e-9),
            PortfolioBand::Medium => {
                assert!((0.35..=0.65).contains(&borrower.prediction_probability))
            }
            PortfolioBand::High => assert!(borrower.prediction_probability >= 0.65),
        }

        assert!((0.6..=0.95).contains(&borrower.confidence));
        assert!((1..=13).contains(&borrower.open_accounts));
        assert_eq!(borrower.shap_values.len(), 7);
        for pair in borrower.shap_values.windows(2) {
            assert!(pair[0].value.abs() >= pair[1].value.abs());
        }
    }
}

#[test]
fn band_thresholds() {
    assert_eq!(PortfolioBand::from_credit_score(700), PortfolioBand::Low);
    assert_eq!(PortfolioBand::from_credit_score(699), PortfolioBand::Medium);
    assert_eq!(PortfolioBand::from_credit_score(550), PortfolioBand::Medium);
    assert_eq!(PortfolioBand::from_credit_score(549), PortfolioBand::High);
}

#[test]
fn search_matches_name_or_id_case_insensitively() {
    let snapshot = PortfolioSnapshot::generate(42);

    let by_name = snapshot.search("aarav", None);
    assert!(!by_name.is_empty());
    assert!(by_name.iter().all(|borrower| borrower.name.starts_with("Aarav")));

    let by_id = snapshot.search("brw-1010", None);
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id[0].id, "BRW-1010");

    assert_eq!(snapshot.search("   ", None).len(), BORROWER_COUNT);
    assert_eq!(snapshot.search("", Some(5)).len(), 5);
    assert!(search(&snapshot.borrowers, "zzz", None).is_empty());
}

#[test]
fn lookup_by_id() {
    let snapshot = PortfolioSnapshot::generate(42);
    assert!(snapshot.borrower("BRW-1025").is_some());
    assert!(snapshot.borrower("brw-1025").is_some());
    assert!(snapshot.borrower("BRW-9999").is_none());
}

#[test]
fn csv_export_writes_header_and_rows() {
    let snapshot = PortfolioSnapshot::generate(42);
    let mut buffer = Vec::new();
    snapshot.export_csv(&mut buffer).expect("export succeeds");

    let text = String::from_utf8(buffer).expect("utf-8");
    let mut lines = text.lines();
    let header = lines.next().expect("header row");
    assert!(header.starts_with("id,name,credit_score,risk_band"));
    assert!(header.ends_with("top_driver"));
    assert_eq!(lines.count(), BORROWER_COUNT);
    assert!(text.contains("BRW-1001,Aarav Sharma,"));
}
