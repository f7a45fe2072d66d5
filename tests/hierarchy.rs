use pretty_assertions::assert_eq;
use treetest::{ExitPolicy, TestNode, group, harness, leaf, log::ScopedLog};

fn report_string(node: &TestNode) -> String {
    let mut sink = Vec::new();
    node.report(&mut sink).unwrap();
    String::from_utf8(sink).unwrap()
}

#[test]
fn flat_log_report() {
    let log = ScopedLog::new("test");
    log.append("1");
    log.append_if("2", false);
    log.append_if("3", true);
    log.fail();

    let mut sink = Vec::new();
    log.report(&mut sink).unwrap();

    assert_eq!(String::from_utf8(sink).unwrap(), "test::1\ntest::3\ntest\n");
}

// Builds a hierarchy producing errors at all levels and checks both the
// count and the fully qualified message content.
#[test]
fn compound_hierarchy() {
    let first = leaf("A", |log: &ScopedLog| log.fail());
    let second = leaf("B", |log: &ScopedLog| log.fail());
    let third = leaf("C", |log: &ScopedLog| log.fail());

    let compound = group("compound", [first, group("sub", [second, third])]);

    compound.run();

    assert_eq!(compound.error_count(), 3);

    // The order of errors in the log is not uniquely determined, so sort
    // before comparing.
    let report = report_string(&compound);
    let mut lines: Vec<&str> = report.lines().collect();
    lines.sort_unstable();

    assert_eq!(lines, ["compound::A", "compound::sub::B", "compound::sub::C"]);
}

#[test]
fn group_count_matches_sum_regardless_of_child_order() {
    let noisy = || leaf("noisy", |log: &ScopedLog| log.append("msg"));
    let quiet = || leaf("quiet", |_: &ScopedLog| {});

    let forward = group("g", [noisy(), quiet(), noisy()]);
    let backward = group("g", [noisy(), noisy(), quiet()]);

    forward.run();
    backward.run();

    assert_eq!(forward.error_count(), 2);
    assert_eq!(forward.error_count(), backward.error_count());
}

#[test]
fn rerunning_a_tree_doubles_its_messages() {
    let root = group("root", [leaf("l", |log: &ScopedLog| log.append("x"))]);

    root.run();
    let first = report_string(&root);
    root.run();

    assert_eq!(first, "root::l::x\n");
    assert_eq!(report_string(&root), "root::l::x\nroot::l::x\n");
}

#[test]
fn driver_over_a_whole_tree() {
    let root = group(
        "suite",
        [
            leaf("passing", |_: &ScopedLog| {}),
            leaf("failing", |log: &ScopedLog| log.append("broken")),
        ],
    );

    let mut report = Vec::new();
    let mut summary = Vec::new();
    let run = harness(root)
        .with_report_sink(&mut report)
        .with_summary_sink(&mut summary)
        .with_exit_policy(ExitPolicy::FailOnErrors)
        .run()
        .unwrap();

    assert_eq!(run.error_count, 1);
    assert_eq!(run.exit_code, 1);
    assert_eq!(String::from_utf8(report).unwrap(), "suite::failing::broken\n");
    assert_eq!(String::from_utf8(summary).unwrap(), "There were 1 errors\n");
}
