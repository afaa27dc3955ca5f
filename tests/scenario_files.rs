use skycastle::scenario;
use std::path::Path;

#[test]
fn shipped_flat_walk_scenario_parses() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let scn = scenario::load(&root.join("data/scenarios/flat_walk.json")).expect("load");
    assert!(!scn.steps.is_empty());
    // Steps arrive tick-ordered so the harness can replay them in one pass.
    for w in scn.steps.windows(2) {
        assert!(w[0].at_tick <= w[1].at_tick);
    }
}

#[test]
fn missing_scenario_is_a_context_rich_error() {
    let err = scenario::load(Path::new("no/such/scenario.json")).unwrap_err();
    assert!(format!("{err:#}").contains("no/such/scenario.json"));
}
