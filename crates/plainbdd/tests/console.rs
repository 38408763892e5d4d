//! End-to-end check of the console transcript.

mod common;

use common::ShoppingCart;
use plainbdd::reporting::ConsoleReporter;
use plainbdd::{ProviderCatalog, StepProvider, interpret};
use rstest::rstest;

fn located(text: &str, line: usize) -> String {
    format!("{text:<60} # cart.feature : {line}")
}

#[test]
fn transcript_matches_the_classic_layout() {
    let Ok(mut provider) = StepProvider::build(ShoppingCart::default()) else {
        panic!("shopping cart steps must register");
    };
    let mut console = ConsoleReporter::new(Vec::new()).with_color(false);
    let script = "\
Feature: Cart
  Scenario: Counting
    Given I have 2 apples
    When I count aloud
    Then I should have 3 apples
    And nothing happens
    When I jump
";
    assert!(interpret(&mut provider, &mut console, script, "cart.feature").is_ok());
    let Ok(bytes) = console.finish() else {
        panic!("writing to a Vec cannot fail");
    };
    let expected = [
        located("Feature: Cart", 1),
        located("  Scenario: Counting", 2),
        located("    Given I have 2 apples", 3),
        located("    When I count aloud", 4),
        "2 apples".to_owned(),
        located("    Then I should have 3 apples", 5),
        "expected 3, got 2".to_owned(),
        located("    And nothing happens", 6),
        located("    When I jump", 7),
    ]
    .join("\n")
        + "\n";
    assert_eq!(String::from_utf8_lossy(&bytes), expected);
}

#[rstest]
#[case(false, 0)]
#[case(true, 1)]
fn advice_printing_is_controlled_by_the_reporter(#[case] show: bool, #[case] headings: usize) {
    let Ok(tmp) = tempfile::tempdir() else {
        panic!("cannot create a temp dir");
    };
    let Ok(dir) = camino::Utf8PathBuf::from_path_buf(tmp.path().join("features")) else {
        panic!("temp dir path is not UTF-8");
    };
    let mut console = ConsoleReporter::new(Vec::new())
        .with_color(false)
        .with_advise(show);
    let catalog = ProviderCatalog::new();
    assert!(plainbdd::FeatureRunner::new(&catalog).run(&dir, &mut console).is_ok());
    let Ok(bytes) = console.finish() else {
        panic!("writing to a Vec cannot fail");
    };
    let out = String::from_utf8_lossy(&bytes);
    assert_eq!(out.matches("[Advise]").count(), headings);
}
