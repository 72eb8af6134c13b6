#![forbid(unsafe_code)]

//! Hidden form-field mirror.
//!
//! Hosts that submit the slider inside a form keep one field per thumb,
//! named `base[index]`. The mirror rebuilds its field list when the thumb
//! count changes and updates values in place otherwise, so hosts can diff
//! [`FieldSync`] results instead of re-creating every field.

use mrange_core::value_math::format_value;

/// One mirrored field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// `base[index]`.
    pub name: String,
    /// Value rendered with the slider's precision.
    pub value: String,
}

/// How a sync changed the mirrored fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSync {
    /// Field count changed; every field was recreated.
    Rebuilt,
    /// Same count; only values were rewritten.
    Updated,
    /// Nothing changed.
    Unchanged,
}

/// Mirror of the thumb values as named form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldMirror {
    base: String,
    precision: u32,
    fields: Vec<FormField>,
}

impl FormFieldMirror {
    /// Create an empty mirror.
    #[must_use]
    pub fn new(base: impl Into<String>, precision: u32) -> Self {
        Self {
            base: base.into(),
            precision,
            fields: Vec::new(),
        }
    }

    /// Field base name.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Current fields, one per thumb.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Rename and re-render every field.
    pub fn reconfigure(&mut self, base: &str, precision: u32, values: &[f64]) -> FieldSync {
        if self.base == base && self.precision == precision {
            return self.sync(values);
        }
        self.base = base.to_owned();
        self.precision = precision;
        self.rebuild(values);
        FieldSync::Rebuilt
    }

    /// Bring the fields in line with `values`.
    pub fn sync(&mut self, values: &[f64]) -> FieldSync {
        if self.fields.len() != values.len() {
            self.rebuild(values);
            return FieldSync::Rebuilt;
        }
        let mut changed = false;
        for (field, &value) in self.fields.iter_mut().zip(values) {
            let rendered = format_value(value, self.precision);
            if field.value != rendered {
                field.value = rendered;
                changed = true;
            }
        }
        if changed {
            FieldSync::Updated
        } else {
            FieldSync::Unchanged
        }
    }

    /// Values parsed back from the fields.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.fields
            .iter()
            .map(|field| field.value.parse().unwrap_or(f64::NAN))
            .collect()
    }

    /// `(name, value)` pairs suitable for URL-encoded form submission.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|field| (field.name.as_str(), field.value.as_str()))
    }

    /// Remove every field.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    fn rebuild(&mut self, values: &[f64]) {
        self.fields = values
            .iter()
            .enumerate()
            .map(|(index, &value)| FormField {
                name: format!("{}[{index}]", self.base),
                value: format_value(value, self.precision),
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_indexed_by_thumb() {
        let mut mirror = FormFieldMirror::new("price", 0);
        assert_eq!(mirror.sync(&[25.0, 75.0]), FieldSync::Rebuilt);
        let pairs: Vec<_> = mirror.pairs().collect();
        assert_eq!(pairs, vec![("price[0]", "25"), ("price[1]", "75")]);
    }

    #[test]
    fn same_count_updates_in_place() {
        let mut mirror = FormFieldMirror::new("v", 1);
        mirror.sync(&[1.0, 2.0]);
        assert_eq!(mirror.sync(&[1.0, 2.5]), FieldSync::Updated);
        assert_eq!(mirror.fields()[1].value, "2.5");
        assert_eq!(mirror.sync(&[1.0, 2.5]), FieldSync::Unchanged);
    }

    #[test]
    fn count_change_rebuilds() {
        let mut mirror = FormFieldMirror::new("v", 0);
        mirror.sync(&[1.0, 2.0]);
        assert_eq!(mirror.sync(&[2.0]), FieldSync::Rebuilt);
        assert_eq!(mirror.fields()[0].name, "v[0]");
        assert_eq!(mirror.sync(&[]), FieldSync::Rebuilt);
        assert!(mirror.fields().is_empty());
    }

    #[test]
    fn values_round_trip_through_text() {
        let mut mirror = FormFieldMirror::new("v", 2);
        mirror.sync(&[0.25, 99.5]);
        assert_eq!(mirror.values(), vec![0.25, 99.5]);
    }

    #[test]
    fn reconfigure_renames() {
        let mut mirror = FormFieldMirror::new("a", 0);
        mirror.sync(&[10.0]);
        assert_eq!(mirror.reconfigure("b", 0, &[10.0]), FieldSync::Rebuilt);
        assert_eq!(mirror.fields()[0].name, "b[0]");
        assert_eq!(mirror.base(), "b");
    }
}
