use serde::Serialize;
use serde_json::{Map, Value};

/// A lifecycle event as received from the server.
pub type RawEvent = Map<String, Value>;

/// Outcome of an event that has not finished yet.
pub const STARTED_OUTCOME: &str = "STARTED";

/// A finished lifecycle event with upper-cased field names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LifecycleEvent {
    fields: Map<String, Value>,
}

impl LifecycleEvent {
    #[cfg(test)]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Looks a field up by its upper-cased name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Cell text for a column id, matched case-insensitively.
    pub fn display(&self, field_id: &str) -> String {
        match self.get(&field_id.to_uppercase()) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Drops started events and upper-cases the keys of the rest, keeping order.
pub fn normalize(raw: &[RawEvent]) -> Vec<LifecycleEvent> {
    raw.iter()
        .filter(|event| !is_started(event))
        .map(|event| LifecycleEvent {
            fields: event
                .iter()
                .map(|(key, value)| (key.to_uppercase(), value.clone()))
                .collect(),
        })
        .collect()
}

fn is_started(event: &RawEvent) -> bool {
    event.get("outcome").and_then(Value::as_str) == Some(STARTED_OUTCOME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn raw(value: Value) -> RawEvent {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    fn sample() -> Vec<RawEvent> {
        vec![
            raw(json!({"evId": "1", "evType": "LFC.CHECK_DIGEST", "outcome": "STARTED"})),
            raw(json!({"evId": "2", "evType": "LFC.CHECK_DIGEST", "outcome": "OK"})),
            raw(json!({"evId": "3", "evType": "LFC.STORE", "outcome": "STARTED"})),
            raw(json!({"evId": "4", "evType": "LFC.STORE", "outcome": "KO", "outDetail": "LFC.STORE.KO"})),
            raw(json!({"evId": "5", "evType": "LFC.AUDIT"})),
        ]
    }

    #[test]
    fn drops_exactly_the_started_events_in_order() {
        let events = normalize(&sample());
        let ids: Vec<_> = events.iter().map(|e| e.display("evId")).collect();
        assert_eq!(ids, vec!["2", "4", "5"]);
    }

    #[test]
    fn outcome_match_is_case_sensitive() {
        let events = normalize(&[
            raw(json!({"evId": "1", "outcome": "started"})),
            raw(json!({"evId": "2", "outcome": "STARTED "})),
            raw(json!({"evId": "3", "OUTCOME": "STARTED"})),
        ]);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn every_output_key_is_an_upper_cased_input_key() {
        let input = sample();
        let kept: Vec<_> = input.iter().filter(|e| !is_started(e)).collect();
        let output = normalize(&input);

        assert_eq!(kept.len(), output.len());
        for (before, after) in kept.iter().zip(&output) {
            assert_eq!(before.len(), after.fields().len());
            for (key, value) in before.iter() {
                assert_eq!(after.get(&key.to_uppercase()), Some(value));
            }
            for key in after.fields().keys() {
                assert_eq!(key, &key.to_uppercase());
            }
        }
    }

    #[test]
    fn input_is_left_untouched_and_result_is_stable() {
        let input = sample();
        let copy = input.clone();
        let first = normalize(&input);
        let second = normalize(&input);
        assert_eq!(input, copy);
        assert_eq!(first, second);
    }

    #[test]
    fn display_renders_non_string_values() {
        let events = normalize(&[raw(json!({"evId": 7, "outcome": "OK", "agId": null}))]);
        assert_eq!(events[0].display("EVID"), "7");
        assert_eq!(events[0].display("agId"), "");
        assert_eq!(events[0].display("missing"), "");
    }

    // Field names whose upper-cased forms are all distinct from each other
    // and from OUTCOME / EVID.
    const FIELD_NAMES: [&str; 5] = ["evType", "outDetail", "agId", "evDateTime", "obIdIn"];

    fn raw_event() -> impl Strategy<Value = RawEvent> {
        (
            prop::option::of(prop_oneof![
                Just("STARTED"),
                Just("OK"),
                Just("KO"),
                Just("WARNING"),
                Just("started")
            ]),
            prop::collection::vec(
                (prop::sample::select(FIELD_NAMES.to_vec()), "[A-Z._]{0,12}"),
                0..5,
            ),
        )
            .prop_map(|(outcome, fields)| {
                let mut event = RawEvent::new();
                for (key, value) in fields {
                    event.insert(key.to_string(), Value::String(value));
                }
                if let Some(outcome) = outcome {
                    event.insert("outcome".to_string(), Value::from(outcome));
                }
                event
            })
    }

    fn raw_events() -> impl Strategy<Value = Vec<RawEvent>> {
        prop::collection::vec(raw_event(), 0..24).prop_map(|mut events| {
            for (index, event) in events.iter_mut().enumerate() {
                event.insert("evId".to_string(), Value::from(index as u64));
            }
            events
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn keeps_unstarted_events_in_order(input in raw_events()) {
            let expected: Vec<String> = input
                .iter()
                .filter(|event| event.get("outcome").and_then(Value::as_str) != Some("STARTED"))
                .map(|event| event["evId"].to_string())
                .collect();
            let ids: Vec<String> = normalize(&input).iter().map(|e| e.display("evId")).collect();
            prop_assert_eq!(ids, expected);
        }

        #[test]
        fn no_started_event_survives(input in raw_events()) {
            for event in normalize(&input) {
                prop_assert_ne!(event.display("outcome"), STARTED_OUTCOME);
            }
        }

        #[test]
        fn kept_fields_move_to_upper_cased_keys(input in raw_events()) {
            let kept: Vec<&RawEvent> = input.iter().filter(|e| !is_started(e)).collect();
            let output = normalize(&input);

            prop_assert_eq!(kept.len(), output.len());
            for (before, after) in kept.into_iter().zip(&output) {
                prop_assert_eq!(before.len(), after.fields().len());
                for (key, value) in before {
                    prop_assert_eq!(after.get(&key.to_uppercase()), Some(value));
                }
            }
        }

        #[test]
        fn normalizing_leaves_input_untouched(input in raw_events()) {
            let copy = input.clone();
            let first = normalize(&input);
            prop_assert_eq!(&input, &copy);
            prop_assert_eq!(first, normalize(&input));
        }
    }
}
