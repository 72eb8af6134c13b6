//! Attribute-driven configuration of a live slider.

use std::cell::RefCell;
use std::rc::Rc;

use mrange::prelude::*;
use mrange::{Error, Recovery, apply_attribute, from_attributes};
use pretty_assertions::assert_eq;

fn recorder(slider: &mut MultiRangeSlider) -> Rc<RefCell<Vec<Notification>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    slider.subscribe(move |n: &Notification| sink.borrow_mut().push(n.clone()));
    seen
}

#[test]
fn markup_builds_configured_slider() {
    let mut slider = from_attributes(
        [
            ("min", "0"),
            ("max", "1000"),
            ("step", "50"),
            ("values", "180,820"),
            ("name", "price"),
        ],
        ParseMode::Lenient,
    )
    .unwrap();
    slider.on_attach();

    assert_eq!(slider.get_current_values(), vec![200.0, 800.0]);
    let names: Vec<_> = slider.form_fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["price[0]", "price[1]"]);
}

#[test]
fn missing_values_attribute_gives_default_pair() {
    let slider = from_attributes([("max", "200")], ParseMode::Lenient).unwrap();
    assert_eq!(slider.get_current_values(), vec![50.0, 150.0]);
}

#[test]
fn attribute_changes_do_not_notify() {
    let mut slider = from_attributes([("values", "20,60")], ParseMode::Lenient).unwrap();
    slider.on_attach();
    let seen = recorder(&mut slider);

    apply_attribute(&mut slider, "max", Some("50"), ParseMode::Lenient).unwrap();
    assert_eq!(slider.get_current_values(), vec![20.0, 50.0]);

    apply_attribute(&mut slider, "values", Some("5,10,15"), ParseMode::Lenient).unwrap();
    assert_eq!(slider.get_current_values(), vec![5.0, 10.0, 15.0]);
    assert_eq!(slider.form_fields().len(), 3);

    apply_attribute(&mut slider, "name", Some("range"), ParseMode::Lenient).unwrap();
    assert_eq!(slider.form_fields()[2].name, "range[2]");

    assert!(seen.borrow().is_empty());
}

#[test]
fn disabled_attribute_toggles_mutations() {
    let mut slider = from_attributes([("disabled", "")], ParseMode::Lenient).unwrap();
    assert!(slider.is_disabled());
    assert!(!slider.set_values(&[10.0, 20.0]));

    apply_attribute(&mut slider, "disabled", None, ParseMode::Strict).unwrap();
    assert!(!slider.is_disabled());
    assert!(slider.set_values(&[10.0, 20.0]));
}

#[test]
fn strict_failure_leaves_slider_untouched() {
    let mut slider = from_attributes([("values", "30,70")], ParseMode::Strict).unwrap();

    let err = apply_attribute(&mut slider, "max", Some("wide"), ParseMode::Strict).unwrap_err();
    assert_eq!(err.recovery(), Recovery::ParseLeniently);
    assert_eq!(slider.config().max, 100.0);

    apply_attribute(&mut slider, "max", Some("wide"), ParseMode::Lenient).unwrap();
    assert_eq!(slider.config().max, 100.0);
    assert_eq!(slider.get_current_values(), vec![30.0, 70.0]);
}

#[test]
fn strict_construction_reports_invalid_bounds() {
    let Err(err) = from_attributes([("min", "10"), ("max", "10")], ParseMode::Strict) else {
        panic!("equal bounds must be rejected in strict mode");
    };
    assert!(matches!(err, Error::Config(_)));
    assert_eq!(err.recovery(), Recovery::Normalize);
}
