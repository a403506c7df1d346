//! Tests for link-time rule set registration.

use formbind::prelude::*;
use formbind::rules::registered_rule_sets;

#[derive(Debug, Default, Model)]
struct Widget {
    label: String,
    size: u32,
}

#[derive(Debug, Default, Model)]
struct Gadget {
    label: String,
}

#[derive(Debug, Default, Model)]
struct Broken {
    code: String,
}

fn widget_size_rules() -> Result<RuleSet<Widget>, RuleError> {
    RuleSet::builder("widget-size")
        .rule_for("size", |w: &Widget| w.size)
        .greater_than(0, "Size must be positive")
        .build()
}

fn widget_label_rules() -> Result<RuleSet<Widget>, RuleError> {
    RuleSet::builder("widget-label")
        .asynchronous()
        .rule_for("label", |w: &Widget| w.label.clone())
        .must_async(|label: String| async move { label != "taken" }, "Label is taken")
        .build()
}

fn broken_rules() -> Result<RuleSet<Broken>, RuleError> {
    RuleSet::builder("broken")
        .rule_for("code", |b: &Broken| b.code.clone())
        .pattern("[0-9", "Digits only")
        .build()
}

register_rule_set!(Widget, widget_size_rules);
register_rule_set!(Widget, widget_label_rules);
register_rule_set!(Broken, broken_rules);

#[test]
fn test_registrations_are_collected() {
    let names: Vec<&str> = registered_rule_sets().map(|r| r.name).collect();
    assert!(names.contains(&"widget_size_rules"));
    assert!(names.contains(&"widget_label_rules"));
    assert!(names.contains(&"broken_rules"));
}

#[test]
fn test_inventory_provider_filters_and_orders() {
    let provider = InventoryProvider::<Widget>::new().unwrap();
    assert_eq!(provider.len(), 2);

    // Ordered by factory name, not by declaration.
    let names: Vec<String> = provider
        .rule_sets()
        .iter()
        .map(|s| s.name().to_string())
        .collect();
    assert_eq!(names, vec!["widget-label", "widget-size"]);
}

#[test]
fn test_inventory_provider_without_sets() {
    let provider = InventoryProvider::<Gadget>::new().unwrap();
    assert!(provider.is_empty());
    assert!(provider.rule_sets().is_empty());
}

#[test]
fn test_inventory_provider_reports_factory_error() {
    let err = InventoryProvider::<Broken>::new().err().unwrap();
    assert!(matches!(err, RuleError::InvalidPattern { ref pattern, .. } if pattern == "[0-9"));
}

#[tokio::test]
async fn test_registered_sets_drive_a_form() {
    let form = ValidatedForm::new(
        FormSource::Model(Widget {
            label: "taken".to_string(),
            size: 0,
        }),
        InventoryProvider::<Widget>::new().unwrap(),
        FormConfig::new("widget"),
    );

    form.edit("size", |_| {}).unwrap();
    assert_eq!(form.summary().messages(), ["Size must be positive"]);

    assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Invalid);
    assert_eq!(form.summary().messages(), ["Label is taken"]);
}
