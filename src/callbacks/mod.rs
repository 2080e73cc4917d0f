//! Reactive callbacks
//!
//! Each [`Callback`] is registered against `component-id.property` inputs and
//! recomputes its outputs from the immutable [`Datasets`]. The browser posts
//! the property that changed (the trigger) together with the current values
//! of every input on the page; [`Registry::dispatch`] runs the callbacks that
//! listen to the trigger, then any callbacks listening to the outputs those
//! produced.
//!
//! A request without a trigger is the initial render of a page: every
//! callback marked `initial` whose inputs are all present runs once, in
//! registration order.

pub mod error;
pub mod food_env;
pub mod footprints;
pub mod navigation;
pub mod poverty;
pub mod stakeholders;
pub mod supply;
pub mod sustainability;
pub mod trends;

pub use error::{CallbackError, CallbackResult};

use crate::data::Datasets;
use crate::view::{Figure, Node, Style};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// Signature shared by all callbacks; the returned outputs are aligned with
/// [`Callback::outputs`]
pub type Handler = fn(&Datasets, &Inputs) -> CallbackResult<Vec<Output>>;

/// A registered callback
pub struct Callback {
    pub name: &'static str,
    /// Properties whose change runs this callback
    pub inputs: &'static [&'static str],
    /// Properties read but never triggering
    pub states: &'static [&'static str],
    pub outputs: &'static [&'static str],
    /// Run on the initial render of a page
    pub initial: bool,
    pub handler: Handler,
}

impl Callback {
    fn listens_to(&self, property: &str) -> bool {
        self.inputs.contains(&property)
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .finish()
    }
}

/// A new value for one output property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Output {
    Figure { figure: Figure },
    /// Rendered HTML replacing the element's children
    Children { html: String },
    Data { data: Value },
    Style { style: Style },
    Text { text: String },
}

impl Output {
    pub fn figure(figure: Figure) -> Self {
        Output::Figure { figure }
    }

    pub fn children(node: impl Into<Node>) -> Self {
        Output::Children {
            html: node.into().render(),
        }
    }

    /// Several sibling nodes replacing the element's children
    pub fn fragment(nodes: impl IntoIterator<Item = Node>) -> Self {
        Output::Children {
            html: nodes.into_iter().map(|n| n.render()).collect(),
        }
    }

    pub fn data(data: impl Into<Value>) -> Self {
        Output::Data { data: data.into() }
    }

    pub fn style(style: Style) -> Self {
        Output::Style { style }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Output::Text { text: text.into() }
    }

    /// The value other callbacks see when this output feeds their input
    fn as_input_value(&self) -> Option<Value> {
        match self {
            Output::Data { data } => Some(data.clone()),
            Output::Text { text } => Some(Value::String(text.clone())),
            _ => None,
        }
    }
}

/// Callback RPC request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackRequest {
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub inputs: HashMap<String, Value>,
}

/// Input values seen by a handler
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    trigger: Option<String>,
    values: HashMap<String, Value>,
}

impl Inputs {
    pub fn new(trigger: Option<&str>, values: HashMap<String, Value>) -> Self {
        Self {
            trigger: trigger.map(str::to_string),
            values,
        }
    }

    /// Builder used by tests and chained runs
    pub fn with(mut self, property: &str, value: impl Into<Value>) -> Self {
        self.values.insert(property.to_string(), value.into());
        self
    }

    pub fn trigger(&self) -> Option<&str> {
        self.trigger.as_deref()
    }

    /// Component id part of the trigger
    pub fn trigger_id(&self) -> Option<&str> {
        self.trigger()
            .map(|t| t.split_once('.').map(|(id, _)| id).unwrap_or(t))
    }

    pub fn triggered_by(&self, property: &str) -> bool {
        self.trigger() == Some(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.values.contains_key(property)
    }

    /// Value of a property; `null` reads as absent
    pub fn value(&self, property: &str) -> Option<&Value> {
        self.values.get(property).filter(|v| !v.is_null())
    }

    /// Required string value
    pub fn str(&self, property: &str) -> CallbackResult<&str> {
        match self.value(property) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(CallbackError::invalid(property, format!("expected a string, got {}", other))),
            None => Err(CallbackError::MissingInput(property.to_string())),
        }
    }

    /// Optional string value
    pub fn opt_str(&self, property: &str) -> Option<&str> {
        self.value(property).and_then(Value::as_str)
    }

    /// Required integer, accepting numeric strings (range inputs post strings)
    pub fn i64(&self, property: &str) -> CallbackResult<i64> {
        let value = self
            .value(property)
            .ok_or_else(|| CallbackError::MissingInput(property.to_string()))?;
        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
            _ => None,
        };
        parsed.ok_or_else(|| CallbackError::invalid(property, format!("expected an integer, got {}", value)))
    }

    /// Multi-select value; a single string counts as one selection
    pub fn strings(&self, property: &str) -> Vec<String> {
        match self.value(property) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    fn set(&mut self, property: &str, value: Value) {
        self.values.insert(property.to_string(), value);
    }

    fn retrigger(&self, trigger: Option<&str>) -> Self {
        Self {
            trigger: trigger.map(str::to_string),
            values: self.values.clone(),
        }
    }
}

/// Outputs keyed by `id.prop`
pub type Outputs = BTreeMap<String, Output>;

/// All callbacks the dashboard registers
pub struct Registry {
    callbacks: Vec<Callback>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let mut callbacks = Vec::new();
        callbacks.extend(navigation::callbacks());
        callbacks.extend(stakeholders::callbacks());
        callbacks.extend(supply::callbacks());
        callbacks.extend(poverty::callbacks());
        callbacks.extend(food_env::callbacks());
        callbacks.extend(footprints::callbacks());
        callbacks.extend(sustainability::callbacks());
        callbacks.extend(trends::callbacks());
        Self { callbacks }
    }

    pub fn callbacks(&self) -> &[Callback] {
        &self.callbacks
    }

    pub fn get(&self, name: &str) -> Option<&Callback> {
        self.callbacks.iter().find(|c| c.name == name)
    }

    /// Run every callback affected by a request
    pub fn dispatch(&self, datasets: &Datasets, request: CallbackRequest) -> CallbackResult<Outputs> {
        let mut inputs = Inputs::new(None, request.inputs);
        let mut outputs = Outputs::new();

        match request.trigger.as_deref() {
            None => {
                for callback in self.callbacks.iter().filter(|c| c.initial) {
                    if callback.inputs.iter().all(|i| inputs.contains(i)) {
                        let run = self.run(callback, datasets, &inputs.retrigger(None))?;
                        merge(run, &mut inputs, &mut outputs, None);
                    }
                }
            }
            Some(trigger) => {
                if !self.callbacks.iter().any(|c| c.listens_to(trigger)) {
                    return Err(CallbackError::UnknownTrigger(trigger.to_string()));
                }

                let mut visited: HashSet<&str> = HashSet::new();
                let mut queue: VecDeque<String> = VecDeque::from([trigger.to_string()]);
                while let Some(changed) = queue.pop_front() {
                    for callback in self.callbacks.iter().filter(|c| c.listens_to(&changed)) {
                        if !visited.insert(callback.name) {
                            continue;
                        }
                        let run = self.run(callback, datasets, &inputs.retrigger(Some(&changed)))?;
                        merge(run, &mut inputs, &mut outputs, Some(&mut queue));
                    }
                }
            }
        }

        Ok(outputs)
    }

    fn run(
        &self,
        callback: &Callback,
        datasets: &Datasets,
        inputs: &Inputs,
    ) -> CallbackResult<Vec<(&'static str, Output)>> {
        tracing::debug!(callback = callback.name, trigger = ?inputs.trigger(), "Running callback");
        let values = (callback.handler)(datasets, inputs).map_err(|e| {
            tracing::warn!(callback = callback.name, error = %e, "Callback failed");
            e
        })?;

        if values.len() != callback.outputs.len() {
            return Err(CallbackError::OutputMismatch {
                callback: callback.name,
                expected: callback.outputs.len(),
                got: values.len(),
            });
        }
        Ok(callback.outputs.iter().copied().zip(values).collect())
    }
}

fn merge(
    run: Vec<(&'static str, Output)>,
    inputs: &mut Inputs,
    outputs: &mut Outputs,
    mut queue: Option<&mut VecDeque<String>>,
) {
    for (property, output) in run {
        if let Some(value) = output.as_input_value() {
            inputs.set(property, value);
            if let Some(queue) = queue.as_deref_mut() {
                queue.push_back(property.to_string());
            }
        }
        outputs.insert(property.to_string(), output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::Fixture;
    use serde_json::json;

    fn request(trigger: Option<&str>, inputs: Value) -> CallbackRequest {
        serde_json::from_value(json!({ "trigger": trigger, "inputs": inputs })).unwrap()
    }

    #[test]
    fn test_output_names_unique() {
        let registry = Registry::new();
        let mut seen = HashSet::new();
        for callback in registry.callbacks() {
            assert!(seen.insert(callback.name), "duplicate callback {}", callback.name);
        }

        let mut outputs = HashSet::new();
        for callback in registry.callbacks() {
            for output in callback.outputs {
                assert!(outputs.insert(*output), "{} written by two callbacks", output);
            }
        }
    }

    #[test]
    fn test_unknown_trigger() {
        let fixture = Fixture::new();
        let result = Registry::new().dispatch(&fixture.datasets, request(Some("nope.value"), json!({})));

        assert!(matches!(result, Err(CallbackError::UnknownTrigger(_))));
    }

    #[test]
    fn test_chain_reaches_table() {
        let fixture = Fixture::new();
        let outputs = Registry::new()
            .dispatch(
                &fixture.datasets,
                request(
                    Some("piechart.clickData"),
                    json!({
                        "pie-filter-dropdown.value": "Sector",
                        "piechart.clickData": {"points": [{"label": "Private"}]},
                        "selected_slice.data": null
                    }),
                ),
            )
            .unwrap();

        assert_eq!(outputs["selected_slice.data"], Output::data("Private"));
        match &outputs["sh_table.data"] {
            Output::Data { data } => assert_eq!(data.as_array().unwrap().len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_initial_render_runs_present_callbacks() {
        let fixture = Fixture::new();
        let outputs = Registry::new()
            .dispatch(
                &fixture.datasets,
                request(
                    None,
                    json!({
                        "slider.value": "2022",
                        "tab-1-stakeholders.n_clicks": 0,
                        "city-selector.value": "addis"
                    }),
                ),
            )
            .unwrap();

        assert!(outputs.contains_key("sankey-graph.figure"));
        assert_eq!(outputs["kpi-total-flow.children"], Output::text("150"));
        assert!(!outputs.contains_key("tab-content.children"));
    }

    #[test]
    fn test_inputs_accessors() {
        let inputs = Inputs::new(Some("slider.value"), HashMap::new())
            .with("slider.value", "2020")
            .with("layers.value", json!(["a.geojson", "b.geojson"]))
            .with("empty.value", Value::Null);

        assert_eq!(inputs.trigger_id(), Some("slider"));
        assert_eq!(inputs.i64("slider.value").unwrap(), 2020);
        assert_eq!(inputs.strings("layers.value").len(), 2);
        assert!(inputs.strings("empty.value").is_empty());
        assert!(matches!(inputs.str("empty.value"), Err(CallbackError::MissingInput(_))));
    }

    #[test]
    fn test_output_serialization() {
        let value = serde_json::to_value(Output::text("150")).unwrap();
        assert_eq!(value, json!({"kind": "text", "text": "150"}));

        let value = serde_json::to_value(Output::data(json!([1]))).unwrap();
        assert_eq!(value, json!({"kind": "data", "data": [1]}));
    }
}
