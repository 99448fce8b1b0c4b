use crate::convert::{ConversionOutcome, GraphConverter};
use crate::graph::api::ApiWorkflow;
use crate::graph::ui::UiWorkflow;
use crate::merge::{self, ParamOverrides};
use crate::schema::SchemaCache;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use serde_json::Value;

impl<'py> IntoPyObject<'py> for ConversionOutcome {
    type Target = PyDict;
    type Output = Bound<'py, Self::Target>;
    type Error = PyErr;

    fn into_pyobject(self, py: Python<'py>) -> Result<Self::Output, Self::Error> {
        let dict = PyDict::new(py);

        let workflow = serde_json::to_value(&self.workflow)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        dict.set_item("workflow", json_to_py(py, &workflow)?)?;

        let issues: Vec<String> = self
            .issues
            .iter()
            .map(|issue| format!("[{}] {}", issue.severity(), issue))
            .collect();
        dict.set_item("issues", issues)?;

        Ok(dict)
    }
}

/// Recursively converts a JSON value into native Python objects.
fn json_to_py<'py>(py: Python<'py>, value: &Value) -> PyResult<Bound<'py, PyAny>> {
    let object = match value {
        Value::Null => py.None().into_bound(py),
        Value::Bool(b) => b.into_pyobject(py)?.to_owned().into_any(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.into_pyobject(py)?.into_any()
            } else if let Some(u) = n.as_u64() {
                u.into_pyobject(py)?.into_any()
            } else {
                n.as_f64().unwrap_or(f64::NAN).into_pyobject(py)?.into_any()
            }
        }
        Value::String(s) => s.into_pyobject(py)?.into_any(),
        Value::Array(items) => {
            let list = PyList::empty(py);
            for item in items {
                list.append(json_to_py(py, item)?)?;
            }
            list.into_any()
        }
        Value::Object(map) => {
            let dict = PyDict::new(py);
            for (key, item) in map {
                dict.set_item(key, json_to_py(py, item)?)?;
            }
            dict.into_any()
        }
    };
    Ok(object)
}

/// A workflow graph conversion engine.
///
/// The class holds the execution engine's node schemas (if any were
/// provided) and converts editor workflows on demand. One instance serves
/// any number of conversions.
#[pyclass(name = "Henkan")]
struct HenkanPy {
    schemas: SchemaCache,
}

#[pymethods]
impl HenkanPy {
    /// Initializes the converter.
    ///
    /// Args:
    ///     object_info_json (str | None): The engine's introspection document
    ///         as JSON text. Omit it to run schema-less; widget naming then
    ///         falls back to the built-in table and positional names.
    ///
    /// Returns:
    ///     Henkan: An initialized converter instance.
    ///
    /// Raises:
    ///     ValueError: If the document is not valid JSON.
    #[new]
    #[pyo3(signature = (object_info_json=None))]
    fn new(object_info_json: Option<&str>) -> PyResult<Self> {
        let schemas = SchemaCache::new();
        if let Some(json) = object_info_json {
            let doc: Value =
                serde_json::from_str(json).map_err(|e| PyValueError::new_err(e.to_string()))?;
            schemas.populate(&doc);
        }
        Ok(HenkanPy { schemas })
    }

    /// Converts an editor workflow to the engine's API prompt format.
    ///
    /// Runs the full pipeline: conversion, optional override merging, and
    /// validation.
    ///
    /// Args:
    ///     workflow_json (str): The editor's saved workflow JSON.
    ///     overrides_json (str | None): Optional overrides object keyed by
    ///         node id or title, mapping input names to new values.
    ///
    /// Returns:
    ///     dict: A dictionary with two keys:
    ///         - "workflow" (dict): The API prompt, keyed by node id.
    ///         - "issues" (list[str]): Every non-fatal finding, formatted as
    ///           "[severity] message".
    ///
    /// Raises:
    ///     ValueError: On malformed JSON or duplicate node ids.
    #[pyo3(signature = (workflow_json, overrides_json=None))]
    fn convert(
        &self,
        workflow_json: &str,
        overrides_json: Option<&str>,
    ) -> PyResult<ConversionOutcome> {
        let workflow = UiWorkflow::from_json(workflow_json)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let overrides = overrides_json
            .map(ParamOverrides::from_json)
            .transpose()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        let converter = GraphConverter::new(&self.schemas);
        converter
            .compile(&workflow, overrides.as_ref())
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Merges parameter overrides into an already-converted workflow.
    ///
    /// Args:
    ///     workflow_json (str): An API prompt as produced by `convert`.
    ///     overrides_json (str): Overrides object keyed by node id or title.
    ///
    /// Returns:
    ///     dict: Same shape as `convert`.
    ///
    /// Raises:
    ///     ValueError: On malformed JSON.
    fn merge(&self, workflow_json: &str, overrides_json: &str) -> PyResult<ConversionOutcome> {
        let mut workflow = ApiWorkflow::from_json(workflow_json)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let overrides = ParamOverrides::from_json(overrides_json)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        let issues = merge::merge_overrides(&mut workflow, &overrides);
        Ok(ConversionOutcome { workflow, issues })
    }

    /// Validates an already-converted workflow against the cached schemas.
    ///
    /// Args:
    ///     workflow_json (str): An API prompt as produced by `convert`.
    ///
    /// Returns:
    ///     dict: Same shape as `convert`; the workflow may gain the
    ///     well-known save-node default fill.
    ///
    /// Raises:
    ///     ValueError: On malformed JSON.
    fn validate(&self, workflow_json: &str) -> PyResult<ConversionOutcome> {
        let mut workflow = ApiWorkflow::from_json(workflow_json)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        let issues = crate::validate::validate(&mut workflow, &self.schemas);
        Ok(ConversionOutcome { workflow, issues })
    }

    /// Replaces the cached schemas with a fresh introspection document.
    ///
    /// Raises:
    ///     ValueError: If the document is not valid JSON.
    fn reload_schemas(&self, object_info_json: &str) -> PyResult<()> {
        let doc: Value =
            serde_json::from_str(object_info_json).map_err(|e| PyValueError::new_err(e.to_string()))?;
        self.schemas.populate(&doc);
        Ok(())
    }

    /// Drops all cached schemas, for when the engine's registry changes.
    fn invalidate_schemas(&self) {
        self.schemas.invalidate();
    }

    /// Number of node classes with a cached schema.
    #[getter]
    fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

/// Workflow graph conversion for node-editor pipelines.
///
/// This module provides Python bindings to the Henkan Rust library: fast
/// flattening of editor workflows into execution-ready API prompts, with
/// override merging and schema validation.
#[pymodule]
fn henkan(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<HenkanPy>()?;
    Ok(())
}
