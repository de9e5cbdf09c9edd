//! Type and representation to JSON field dispatch.
//!
//! A field name is the element name of the data item type followed by the
//! representation suffix: `Position`, `PositionDataSet`, `PositionTable`,
//! `PositionTimeSeries`. Everything here is driven by the data item catalog;
//! no per-type code exists.

use std::collections::HashMap;

use indexmap::IndexMap;
use mtc_core::{Category, Representation};
use mtc_streams::{Observation, catalog};

/// Suffixes checked when parsing, longest first.
const SUFFIXES: [Representation; 3] = [
    Representation::TimeSeries,
    Representation::DataSet,
    Representation::Table,
];

pub fn field_name(type_id: &str, representation: Representation) -> String {
    let mut name = catalog::element_name(type_id);
    name.push_str(representation.suffix());
    name
}

/// Split a field name into type id and representation.
///
/// A field that is itself a known element name is always VALUE.
pub fn parse_field_name(field: &str) -> (String, Representation) {
    if let Some(entry) = catalog::lookup_element(field) {
        return (entry.id.to_string(), Representation::Value);
    }
    for representation in SUFFIXES {
        if let Some(base) = field.strip_suffix(representation.suffix())
            && !base.is_empty()
        {
            return (catalog::type_id_for_element(base), representation);
        }
    }
    (catalog::type_id_for_element(field), Representation::Value)
}

/// Observations sharing one JSON field.
#[derive(Debug)]
pub struct FieldGroup<'a> {
    pub field: String,
    pub type_id: &'a str,
    pub representation: Representation,
    pub observations: Vec<&'a Observation>,
}

/// Group observations of `category` by field.
///
/// Groups follow catalog order, with a type's representations kept together
/// in VALUE, DATA_SET, TABLE, TIME_SERIES order. Types missing from the
/// catalog come last in order of first appearance. Observations inside a
/// group keep their input order.
pub fn group_observations<'a, I>(observations: I, category: Category) -> Vec<FieldGroup<'a>>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let catalog_len = catalog::data_item_types().len();
    let mut first_seen: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: IndexMap<(&'a str, Representation), Vec<&'a Observation>> = IndexMap::new();

    for observation in observations {
        if observation.category != category {
            continue;
        }
        let type_id = observation.type_id.as_str();
        let next = first_seen.len();
        first_seen.entry(type_id).or_insert(next);
        groups
            .entry((type_id, observation.representation()))
            .or_default()
            .push(observation);
    }

    let type_rank = |type_id: &str| {
        catalog::position(type_id).unwrap_or_else(|| catalog_len + first_seen[type_id])
    };
    let mut ordered: Vec<_> = groups.into_iter().collect();
    ordered.sort_by_key(|((type_id, representation), _)| (type_rank(*type_id), *representation));

    tracing::debug!(
        category = %category,
        groups = ordered.len(),
        "grouped observations by field"
    );

    ordered
        .into_iter()
        .map(|((type_id, representation), observations)| FieldGroup {
            field: field_name(type_id, representation),
            type_id,
            representation,
            observations,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mtc_core::SequenceNumber;
    use mtc_streams::Payload;

    fn obs(type_id: &str, category: Category, representation: Representation, seq: u64) -> Observation {
        Observation::new(
            format!("{}-{seq}", type_id.to_lowercase()),
            type_id,
            category,
            Utc::now(),
            SequenceNumber::new(seq).unwrap(),
            Payload::unavailable(representation),
        )
    }

    #[test]
    fn field_names_append_the_suffix() {
        assert_eq!(field_name("POSITION", Representation::Value), "Position");
        assert_eq!(field_name("POSITION", Representation::DataSet), "PositionDataSet");
        assert_eq!(field_name("AMPERAGE_AC", Representation::Table), "AmperageACTable");
        assert_eq!(field_name("PH", Representation::TimeSeries), "PHTimeSeries");
        assert_eq!(field_name("SPINDLE_WOBBLE", Representation::Value), "SpindleWobble");
    }

    #[test]
    fn parse_reverses_field_name() {
        for entry in catalog::data_item_types() {
            for representation in Representation::ALL {
                let field = field_name(entry.id, representation);
                assert_eq!(
                    parse_field_name(&field),
                    (entry.id.to_string(), representation),
                    "field {field}"
                );
            }
        }
    }

    #[test]
    fn parse_handles_unknown_types() {
        assert_eq!(
            parse_field_name("SpindleWobbleTimeSeries"),
            ("SPINDLE_WOBBLE".to_string(), Representation::TimeSeries)
        );
        assert_eq!(
            parse_field_name("SpindleWobble"),
            ("SPINDLE_WOBBLE".to_string(), Representation::Value)
        );
    }

    #[test]
    fn bare_suffix_is_a_value_field() {
        assert_eq!(parse_field_name("Table"), ("TABLE".to_string(), Representation::Value));
    }

    #[test]
    fn groups_follow_catalog_then_appearance() {
        let observations = vec![
            obs("ZEBRA_COUNT", Category::Sample, Representation::Value, 1),
            obs("POSITION", Category::Sample, Representation::TimeSeries, 2),
            obs("ACCELERATION", Category::Sample, Representation::Value, 3),
            obs("EXECUTION", Category::Event, Representation::Value, 4),
            obs("POSITION", Category::Sample, Representation::Value, 5),
            obs("ALPHA_COUNT", Category::Sample, Representation::Value, 6),
            obs("POSITION", Category::Sample, Representation::Value, 7),
            obs("ZEBRA_COUNT", Category::Sample, Representation::DataSet, 8),
        ];

        let groups = group_observations(&observations, Category::Sample);
        let fields: Vec<_> = groups.iter().map(|g| g.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "Acceleration",
                "Position",
                "PositionTimeSeries",
                "ZebraCount",
                "ZebraCountDataSet",
                "AlphaCount",
            ]
        );

        let position = &groups[1];
        let seqs: Vec<_> = position.observations.iter().map(|o| o.sequence.get()).collect();
        assert_eq!(seqs, vec![5, 7]);
    }

    #[test]
    fn other_categories_are_filtered_out() {
        let observations = vec![
            obs("EXECUTION", Category::Event, Representation::Value, 1),
            obs("POSITION", Category::Sample, Representation::Value, 2),
        ];
        let groups = group_observations(&observations, Category::Event);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].field, "Execution");
    }
}
