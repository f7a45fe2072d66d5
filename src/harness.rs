use std::io;

use crate::node::NodeHandle;

/// How the exit code reacts to recorded failures.
///
/// The default keeps the process exit successful no matter what the report
/// says; wiring the error count to the exit code is an explicit choice the
/// driver's caller makes, not something the core assumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Exit code 0 regardless of failures.
    #[default]
    AlwaysSuccess,
    /// Exit code 1 when any failure was recorded.
    FailOnErrors,
}

impl ExitPolicy {
    fn exit_code(self, error_count: usize) -> i32 {
        match self {
            ExitPolicy::AlwaysSuccess => 0,
            ExitPolicy::FailOnErrors if error_count > 0 => 1,
            ExitPolicy::FailOnErrors => 0,
        }
    }
}

/// Create a driver for `root` with the default sinks: the report goes to
/// stderr, the summary line to stdout.
pub fn harness(root: NodeHandle) -> TestHarness<io::Stderr, io::Stdout> {
    TestHarness {
        root,
        exit_policy: ExitPolicy::default(),
        report_sink: io::stderr(),
        summary_sink: io::stdout(),
    }
}

/// Thin driver around a root node.
///
/// Runs the tree, writes the flattened failure report, writes a one-line
/// human summary, and decides an exit code via [`ExitPolicy`].
#[derive(Debug)]
pub struct TestHarness<Report, Summary> {
    root: NodeHandle,
    exit_policy: ExitPolicy,
    report_sink: Report,
    summary_sink: Summary,
}

impl<Report, Summary> TestHarness<Report, Summary> {
    pub fn with_exit_policy(self, exit_policy: ExitPolicy) -> Self {
        Self {
            exit_policy,
            ..self
        }
    }

    pub fn with_report_sink<WithReport: io::Write>(
        self,
        report_sink: WithReport,
    ) -> TestHarness<WithReport, Summary> {
        TestHarness {
            root: self.root,
            exit_policy: self.exit_policy,
            report_sink,
            summary_sink: self.summary_sink,
        }
    }

    pub fn with_summary_sink<WithSummary: io::Write>(
        self,
        summary_sink: WithSummary,
    ) -> TestHarness<Report, WithSummary> {
        TestHarness {
            root: self.root,
            exit_policy: self.exit_policy,
            report_sink: self.report_sink,
            summary_sink,
        }
    }
}

impl<Report: io::Write, Summary: io::Write> TestHarness<Report, Summary> {
    pub fn run(mut self) -> io::Result<RunReport> {
        self.root.run();
        let error_count = self.root.error_count();
        self.root.report(&mut self.report_sink)?;

        match error_count {
            0 => writeln!(self.summary_sink, "Success.")?,
            n => writeln!(self.summary_sink, "There were {n} errors")?,
        }

        Ok(RunReport {
            error_count,
            exit_code: self.exit_policy.exit_code(error_count),
        })
    }
}

/// What a finished run looked like.
#[derive(Debug)]
#[non_exhaustive]
pub struct RunReport {
    pub error_count: usize,
    pub exit_code: i32,
}

impl RunReport {
    pub fn success(&self) -> bool {
        self.error_count == 0
    }
}
