use std::sync::{Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};
use routegen_core::parse;
use routegen_core::transform;

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static INSTALL: Once = Once::new();

struct Capture;

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("routegen_core")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            RECORDS
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture;

fn install() {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Debug);
    });
}

/// Warnings logged so far whose text contains `needle`. Tests in this file
/// run concurrently, so each one filters on text only its document produces.
fn warnings_containing(needle: &str) -> Vec<String> {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, msg)| *level == Level::Warn && msg.contains(needle))
        .map(|(_, msg)| msg.clone())
        .collect()
}

#[test]
fn colliding_route_names_warn_once() {
    install();
    let spec = parse::from_yaml(include_str!("fixtures/users.yaml")).unwrap();
    let ir = transform::transform(&spec).unwrap();
    assert!(ir.routes.iter().any(|r| r.route_name.usage == "getUser2"));

    let warnings = warnings_containing("already used in module `users`");
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("`getUser`"));
    assert!(warnings[0].contains("`getUser2`"));
}

#[test]
fn hyphenated_path_parameters_warn() {
    install();
    let yaml = r#"
openapi: "3.0.3"
info:
  title: stores
  version: "1"
paths:
  /stores/{store-id}:
    get:
      operationId: getStore
      responses:
        200:
          description: ok
"#;
    let spec = parse::from_yaml(yaml).unwrap();
    let ir = transform::transform(&spec).unwrap();
    assert_eq!(ir.routes[0].path, "/stores/${storeId}");

    let warnings = warnings_containing("'store-id'");
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("using 'storeId'"));
}
