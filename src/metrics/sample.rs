//! A single gauge sample of a metric family.

use super::descriptor::MetricDesc;

/// One sample: a descriptor, its label values and the gauge value.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    desc: &'static MetricDesc,
    label_values: Vec<String>,
    value: f64,
}

impl Sample {
    /// Create a sample. `label_values` follow the order of `desc.labels`.
    pub fn new<I, S>(desc: &'static MetricDesc, label_values: I, value: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let label_values: Vec<String> = label_values.into_iter().map(Into::into).collect();
        debug_assert_eq!(
            label_values.len(),
            desc.labels.len(),
            "label value count mismatch for {}",
            desc.name
        );

        Self {
            desc,
            label_values,
            value,
        }
    }

    pub fn desc(&self) -> &'static MetricDesc {
        self.desc
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// `(name, value)` label pairs in descriptor order.
    pub fn labels(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.desc
            .labels
            .iter()
            .copied()
            .zip(self.label_values.iter().map(String::as_str))
    }

    /// Value of the label `name`, if the family has it.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels().find(|(key, _)| *key == name).map(|(_, v)| v)
    }
}
