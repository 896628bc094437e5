use std::{path::Path, rc::Rc};

use googletest::prelude::*;
use testutils::error_in_chain;

use super::*;
use crate::{
    plargs::{ArgSet, BindError, OutputPaths},
    plparams::SchemaError,
    progress::NoProgress,
    testutil::*,
};

fn catalog_with(algorithms: Vec<Rc<FakeAlgorithm>>) -> Catalog {
    let mut catalog = Catalog::new();
    for algorithm in algorithms {
        catalog
            .register(algorithm)
            .expect("expected algorithm to register");
    }
    catalog
}

fn valid_args() -> (ArgSet, OutputPaths) {
    let mut args = ArgSet::new();
    args.set(FAKE_INPUT, Path::new("in.tif"));
    let mut outputs = OutputPaths::new();
    outputs.set(FAKE_OUTPUT, "out.tif");
    (args, outputs)
}

#[gtest]
#[test_log::test]
fn test_register_declares_once() {
    let algorithm = Rc::new(FakeAlgorithm::new("Foo", "foo", "Group A"));

    let catalog = catalog_with(vec![algorithm.clone()]);

    expect_that!(algorithm.declare_calls.get(), eq(1));
    let entry = catalog.get("foo");
    expect_true!(entry.is_some());
    if let Some(entry) = entry {
        expect_that!(entry.schema.params, len(eq(2)));
        expect_that!(entry.schema.outputs, len(eq(1)));
        expect_that!(entry.description.name, eq("Foo"));
    }

    // Looking up and binding does not declare again.
    let (args, outputs) = valid_args();
    let _ = catalog.bind("foo", &args, &outputs);
    let _ = catalog.entries();
    expect_that!(algorithm.declare_calls.get(), eq(1));
}

#[gtest]
fn test_register_rejects_duplicate_name() {
    let mut catalog = catalog_with(vec![Rc::new(FakeAlgorithm::new("Foo", "foo", "Group A"))]);

    expect_true!(matches!(
        catalog.register(Rc::new(FakeAlgorithm::new("Other Foo", "foo", "Group B"))),
        Err(RegistryError::Duplicate("foo"))
    ));
    expect_that!(catalog.len(), eq(1));
}

#[gtest]
fn test_register_rejects_invalid_name() {
    let mut catalog = Catalog::new();

    expect_true!(matches!(
        catalog.register(Rc::new(FakeAlgorithm::new("Foo", "Foo Bar", "Group A"))),
        Err(RegistryError::InvalidName("Foo Bar"))
    ));
    expect_true!(catalog.is_empty());
}

#[gtest]
fn test_register_propagates_schema_error() {
    let mut catalog = Catalog::new();

    let result = catalog.register(Rc::new(DuplicatingAlgorithm));

    expect_true!(matches!(
        result,
        Err(RegistryError::Schema {
            cmd_name: "duplicating",
            source: SchemaError::DuplicateParam(_),
        })
    ));
    expect_true!(catalog.is_empty());
}

#[gtest]
fn test_entries_and_groups_are_ordered() {
    let catalog = catalog_with(vec![
        Rc::new(FakeAlgorithm::new("Zeta", "zeta", "Group B")),
        Rc::new(FakeAlgorithm::new("Beta", "beta", "Group A")),
        Rc::new(FakeAlgorithm::new("Alpha", "alpha", "Group B")),
    ]);

    expect_that!(
        catalog
            .entries()
            .iter()
            .map(|entry| entry.description.cmd_name)
            .collect::<Vec<_>>(),
        elements_are![eq(&"beta"), eq(&"alpha"), eq(&"zeta")]
    );
    expect_that!(
        catalog.groups(),
        elements_are![eq(&"Group A"), eq(&"Group B")]
    );
}

#[gtest]
#[test_log::test]
fn test_execute_binds_defaults() -> anyhow::Result<()> {
    let algorithm = Rc::new(FakeAlgorithm::new("Foo", "foo", "Group A"));
    let catalog = catalog_with(vec![algorithm.clone()]);
    let (args, outputs) = valid_args();

    catalog.execute("foo", &args, &outputs, &NoProgress)?;

    let executed = algorithm.executed.borrow();
    expect_that!(*executed, len(eq(1)));
    if let Some(bound) = executed.first() {
        expect_eq!(bound.number(&FAKE_FACTOR)?, 2.0);
        expect_eq!(bound.raster(&FAKE_INPUT)?, Path::new("in.tif"));
        expect_eq!(bound.output(&FAKE_OUTPUT)?, Path::new("out.tif"));
    }

    Ok(())
}

#[gtest]
fn test_execute_does_not_run_with_invalid_args() {
    let algorithm = Rc::new(FakeAlgorithm::new("Foo", "foo", "Group A"));
    let catalog = catalog_with(vec![algorithm.clone()]);
    let (args, _) = valid_args();

    let result = catalog.execute("foo", &args, &OutputPaths::new(), &NoProgress);

    expect_that!(
        result,
        err(error_in_chain::<BindError, _>(eq(&BindError::MissingOutput(
            FAKE_OUTPUT
        ))))
    );
    expect_that!(*algorithm.executed.borrow(), is_empty());
}

#[gtest]
fn test_execute_unknown_algorithm() {
    let catalog = Catalog::new();
    let (args, outputs) = valid_args();

    let result = catalog.execute("missing", &args, &outputs, &NoProgress);

    expect_true!(matches!(
        result
            .as_ref()
            .map_err(|err| err.downcast_ref::<RegistryError>()),
        Err(Some(RegistryError::Unknown(_)))
    ));
}

#[gtest]
fn test_execute_returns_algorithm_error_unchanged() {
    let mut algorithm = FakeAlgorithm::new("Foo", "foo", "Group A");
    algorithm.fail = true;
    let catalog = catalog_with(vec![Rc::new(algorithm)]);
    let (args, outputs) = valid_args();

    let result = catalog.execute("foo", &args, &outputs, &NoProgress);

    expect_that!(result, err(error_in_chain::<FakeError, _>(eq(&FakeError))));
    // No context is added around the algorithm's own error.
    expect_eq!(result.as_ref().err().map(|err| err.chain().count()), Some(1));
}
