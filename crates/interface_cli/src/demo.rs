//! Demonstration run
//!
//! Binds a few statements whose parameters exercise every resolution path:
//! native values, a registered adapter, a conforming value, the default
//! date adapters, and one parameter nothing can adapt.

use std::any::Any;
use std::collections::HashMap;

use adapt_kernel::{impl_adaptable, AdaptResult, Adaptable, Adapted, Conform, Protocol, ProtocolId};
use chrono::NaiveDate;
use infra_bind::{register_default_adapters, BindContext, SqlValue};
use serde::Serialize;
use tracing::{info, warn};

/// A sensor reading with no conform capability
#[derive(Debug, Clone)]
pub struct Reading {
    pub sensor: String,
    pub celsius: f64,
}

impl_adaptable!(Reading);

/// A location that adapts itself to the context's prepare protocol
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    prepare: ProtocolId,
}

impl Location {
    pub fn new(lat: f64, lon: f64, prepare: &Protocol) -> Self {
        Self {
            lat,
            lon,
            prepare: prepare.id(),
        }
    }
}

impl Conform for Location {
    fn conform(&self, protocol: &Protocol) -> AdaptResult<Option<Adapted>> {
        if self.prepare != protocol.id() {
            return Ok(None);
        }
        Ok(Some(Adapted::new(SqlValue::Text(format!("{};{}", self.lat, self.lon)))))
    }
}

impl Adaptable for Location {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn conformer(&self) -> Option<&dyn Conform> {
        Some(self)
    }
}

/// Something with no adapter and no conform capability
#[derive(Debug)]
pub struct Unbindable;

impl_adaptable!(Unbindable);

/// Outcome of binding one statement
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BindOutcome {
    Bound { params: Vec<SqlValue> },
    Failed { error: String },
}

/// A statement and what binding its parameters produced
#[derive(Debug, Clone, Serialize)]
pub struct StatementReport {
    pub sql: String,
    #[serde(flatten)]
    pub outcome: BindOutcome,
}

/// Full report of a demonstration run
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub protocol: String,
    pub registry: String,
    pub base_type_adapted: bool,
    pub statements: Vec<StatementReport>,
}

impl DemoReport {
    pub fn failures(&self) -> usize {
        self.statements
            .iter()
            .filter(|s| matches!(s.outcome, BindOutcome::Failed { .. }))
            .count()
    }
}

/// Registers the demo adapters and binds the sample statements
///
/// Binding failures are reported per statement; only registry failures
/// abort the run.
pub fn run_demo(context: &BindContext) -> anyhow::Result<DemoReport> {
    register_default_adapters(context)?;
    context.register_adapter(|reading: &Reading| {
        Ok(Adapted::new(SqlValue::Real((reading.celsius * 100.0).round() / 100.0)))
    })?;

    let reading = Reading {
        sensor: "kitchen".to_string(),
        celsius: 21.456,
    };
    let location = Location::new(52.52, 13.405, context.prepare_protocol());
    let taken = NaiveDate::from_ymd_opt(2024, 3, 1).ok_or_else(|| anyhow::anyhow!("invalid demo date"))?;

    let mut statements = Vec::new();

    let sql = "INSERT INTO readings (sensor, celsius, taken) VALUES (?, ?, ?)";
    let outcome = to_outcome(context.bind_parameters(3, &[&reading.sensor, &reading, &taken]));
    statements.push(report(sql, outcome));

    let sql = "INSERT INTO sites (id, location) VALUES (:id, :location)";
    let mut named: HashMap<&str, &dyn Adaptable> = HashMap::new();
    named.insert("id", &7i64);
    named.insert("location", &location);
    let outcome = to_outcome(context.bind_named(&[":id", ":location"], &named));
    statements.push(report(sql, outcome));

    let sql = "SELECT * FROM readings WHERE sensor = ?";
    let outcome = to_outcome(context.bind_parameters(1, &[&Unbindable]));
    statements.push(report(sql, outcome));

    let sql = "SELECT * FROM readings WHERE sensor = ? AND taken = ?";
    let outcome = to_outcome(context.bind_parameters(2, &[&"kitchen"]));
    statements.push(report(sql, outcome));

    let demo = DemoReport {
        protocol: context.prepare_protocol().name().to_string(),
        registry: context.adapters().name().to_string(),
        base_type_adapted: context.base_type_adapted(),
        statements,
    };
    info!(statements = demo.statements.len(), failures = demo.failures(), "Demo run finished");
    Ok(demo)
}

fn to_outcome(result: Result<Vec<SqlValue>, infra_bind::BindError>) -> BindOutcome {
    match result {
        Ok(params) => BindOutcome::Bound { params },
        Err(err) => {
            warn!(error = %err, "Binding failed");
            BindOutcome::Failed {
                error: err.to_string(),
            }
        }
    }
}

fn report(sql: &str, outcome: BindOutcome) -> StatementReport {
    StatementReport {
        sql: sql.to_string(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infra_bind::BindConfig;

    fn run() -> DemoReport {
        let context = BindContext::initialize(&BindConfig::default()).unwrap();
        run_demo(&context).unwrap()
    }

    #[test]
    fn test_demo_binds_every_path() {
        let demo = run();
        assert_eq!(demo.statements.len(), 4);
        assert_eq!(demo.failures(), 2);
        assert!(!demo.base_type_adapted);

        match &demo.statements[0].outcome {
            BindOutcome::Bound { params } => assert_eq!(
                params,
                &vec![
                    SqlValue::Text("kitchen".into()),
                    SqlValue::Real(21.46),
                    SqlValue::Text("2024-03-01".into()),
                ]
            ),
            other => panic!("Expected Bound, got {:?}", other),
        }

        match &demo.statements[1].outcome {
            BindOutcome::Bound { params } => {
                assert_eq!(params[1], SqlValue::Text("52.52;13.405".into()))
            }
            other => panic!("Expected Bound, got {:?}", other),
        }
    }

    #[test]
    fn test_location_declines_foreign_protocol() {
        let context = BindContext::initialize(&BindConfig::default()).unwrap();
        let foreign = BindContext::initialize(&BindConfig::default()).unwrap();
        let location = Location::new(1.0, 2.0, foreign.prepare_protocol());

        let err = context.bind_parameters(1, &[&location]).unwrap_err();
        assert!(err.is_unsupported_type());
    }

    #[test]
    fn test_report_serializes_outcomes() {
        let json = serde_json::to_value(run()).unwrap();

        assert_eq!(json["protocol"], "PrepareProtocol");
        assert_eq!(json["statements"][0]["status"], "bound");
        assert_eq!(json["statements"][2]["status"], "failed");
        assert_eq!(
            json["statements"][3]["error"],
            "Incorrect number of bindings supplied. The current statement uses 2, and there are 1 supplied."
        );
    }
}
