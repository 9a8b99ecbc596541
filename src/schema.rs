//! The table of every flag the command line understands.
//!
//! Each entry names the flag, the placeholder for its argument (if it takes
//! one) and the help line shown by `--help`. Adding a flag that only turns
//! on one category is a new entry here plus a row in
//! [`crate::implication::IMPLICATIONS`].

/// Identifier for every recognized flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionId {
    // perfetto modes
    System,
    App,
    // output controls
    Output,
    OutputPath,
    MaxSize,
    // events
    LoadAvg,
    RunnableAvg,
    UtilAvg,
    LoadAvgCpu,
    RunnableAvgCpu,
    UtilAvgCpu,
    LoadAvgTask,
    RunnableAvgTask,
    UtilAvgTask,
    UtilAvgRt,
    UtilAvgDl,
    UtilAvgIrq,
    UtilAvgThermal,
    UtilEst,
    UtilEstCpu,
    UtilEstTask,
    CpuNrRunning,
    CpuFreq,
    CpuIdle,
    Softirq,
    SchedSwitch,
    LoadBalance,
    // filters
    Pid,
    Comm,
}

#[derive(Debug)]
pub struct OptionSpec {
    pub id: OptionId,
    /// Long flag name, without the leading `--`.
    pub name: &'static str,
    /// Placeholder shown for the argument, `None` for plain switches.
    pub arg: Option<&'static str>,
    pub help: &'static str,
}

impl OptionSpec {
    pub fn takes_value(&self) -> bool {
        self.arg.is_some()
    }
}

const fn flag(id: OptionId, name: &'static str, help: &'static str) -> OptionSpec {
    OptionSpec {
        id,
        name,
        arg: None,
        help,
    }
}

const fn valued(
    id: OptionId,
    name: &'static str,
    arg: &'static str,
    help: &'static str,
) -> OptionSpec {
    OptionSpec {
        id,
        name,
        arg: Some(arg),
        help,
    }
}

pub static OPTIONS: &[OptionSpec] = &[
    flag(
        OptionId::System,
        "system",
        "Collect system wide data, requires traced and traced_probes to be running (default).",
    ),
    flag(
        OptionId::App,
        "app",
        "Collect only data generated by this app. Runs standalone without external dependencies on traced.",
    ),
    valued(
        OptionId::Output,
        "output",
        "FILE",
        "Filename of the perfetto-trace file to produce.",
    ),
    valued(
        OptionId::OutputPath,
        "output_path",
        "PATH",
        "Path to store perfetto-trace. PWD by default for perfetto.",
    ),
    valued(
        OptionId::MaxSize,
        "max_size",
        "SIZE(KiB)",
        "Maximum size of perfetto file to produce, 250MiB by default.",
    ),
    flag(OptionId::LoadAvg, "load_avg", "Collect load_avg for CPU and tasks."),
    flag(
        OptionId::RunnableAvg,
        "runnable_avg",
        "Collect runnable_avg for CPU and tasks.",
    ),
    flag(
        OptionId::UtilAvg,
        "util_avg",
        "Collect util_avg for CPU, tasks, irq, dl, rt and thermal pressure.",
    ),
    flag(OptionId::LoadAvgCpu, "load_avg_cpu", "Collect load_avg for CPU."),
    flag(
        OptionId::RunnableAvgCpu,
        "runnable_avg_cpu",
        "Collect runnable_avg for CPU.",
    ),
    flag(OptionId::UtilAvgCpu, "util_avg_cpu", "Collect util_avg for CPU."),
    flag(OptionId::LoadAvgTask, "load_avg_task", "Collect load_avg for tasks."),
    flag(
        OptionId::RunnableAvgTask,
        "runnable_avg_task",
        "Collect runnable_avg for tasks.",
    ),
    flag(OptionId::UtilAvgTask, "util_avg_task", "Collect util_avg for tasks."),
    flag(OptionId::UtilAvgRt, "util_avg_rt", "Collect util_avg for rt."),
    flag(OptionId::UtilAvgDl, "util_avg_dl", "Collect util_avg for dl."),
    flag(OptionId::UtilAvgIrq, "util_avg_irq", "Collect util_avg for irq."),
    flag(
        OptionId::UtilAvgThermal,
        "util_avg_thermal",
        "Collect util_avg for thermal pressure.",
    ),
    flag(OptionId::UtilEst, "util_est", "Collect util_est for CPU and tasks."),
    flag(OptionId::UtilEstCpu, "util_est_cpu", "Collect util_est for CPU."),
    flag(OptionId::UtilEstTask, "util_est_task", "Collect util_est for tasks."),
    flag(
        OptionId::CpuNrRunning,
        "cpu_nr_running",
        "Collect nr_running tasks for each CPU.",
    ),
    flag(OptionId::CpuFreq, "cpu_freq", "Collect frequency changes for each CPU."),
    flag(OptionId::CpuIdle, "cpu_idle", "Collect idle state changes for each CPU."),
    flag(OptionId::Softirq, "softirq", "Collect softirq entry and exit events."),
    flag(
        OptionId::SchedSwitch,
        "sched_switch",
        "Collect context switch events.",
    ),
    flag(
        OptionId::LoadBalance,
        "load_balance",
        "Collect load balance related info.",
    ),
    valued(
        OptionId::Pid,
        "pid",
        "PID",
        "Collect data for task match pid only.",
    ),
    valued(
        OptionId::Comm,
        "comm",
        "COMM",
        "Collect data for tasks that contain comm only.",
    ),
];

impl OptionId {
    pub fn spec(self) -> &'static OptionSpec {
        // Every variant has exactly one row; checked by the tests below.
        OPTIONS
            .iter()
            .find(|spec| spec.id == self)
            .unwrap_or_else(|| unreachable!("{self:?} missing from OPTIONS"))
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

/// Look up a flag by its long name (without `--`).
pub fn lookup(name: &str) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_and_ids_are_unique() {
        let names: HashSet<_> = OPTIONS.iter().map(|s| s.name).collect();
        let ids: HashSet<_> = OPTIONS.iter().map(|s| s.id).collect();
        assert_eq!(names.len(), OPTIONS.len());
        assert_eq!(ids.len(), OPTIONS.len());
    }

    #[test]
    fn test_spec_round_trips_through_lookup() {
        for spec in OPTIONS {
            assert_eq!(spec.id.spec().name, spec.name);
            assert_eq!(lookup(spec.name).map(|s| s.id), Some(spec.id));
        }
        assert!(lookup("bogus").is_none());
        assert!(lookup("--pid").is_none());
    }

    #[test]
    fn test_value_flags() {
        let valued: Vec<_> = OPTIONS
            .iter()
            .filter(|s| s.takes_value())
            .map(|s| s.name)
            .collect();
        assert_eq!(valued, ["output", "output_path", "max_size", "pid", "comm"]);
        assert_eq!(OptionId::MaxSize.spec().arg, Some("SIZE(KiB)"));
    }

    #[test]
    fn test_help_is_one_line() {
        for spec in OPTIONS {
            assert!(!spec.help.is_empty(), "{} has no help", spec.name);
            assert!(!spec.help.contains('\n'), "{} help spans lines", spec.name);
        }
    }
}
