//! Primitive telemetry categories and the packed set that records which of
//! them are enabled.

use std::fmt;

use bitfield::bitfield;
use serde::{Serialize, Serializer};

/// A single telemetry category the collection engine knows how to record.
///
/// The discriminant is the bit position inside [`Toggles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum Toggle {
    LoadAvgCpu = 0,
    RunnableAvgCpu = 1,
    UtilAvgCpu = 2,
    LoadAvgTask = 3,
    RunnableAvgTask = 4,
    UtilAvgTask = 5,
    UtilAvgRt = 6,
    UtilAvgDl = 7,
    UtilAvgIrq = 8,
    UtilAvgThermal = 9,
    UtilEstCpu = 10,
    UtilEstTask = 11,
    CpuNrRunning = 12,
    CpuFreq = 13,
    CpuIdle = 14,
    Softirq = 15,
    SchedSwitch = 16,
    LoadBalance = 17,
}

impl Toggle {
    pub const ALL: [Toggle; 18] = [
        Toggle::LoadAvgCpu,
        Toggle::RunnableAvgCpu,
        Toggle::UtilAvgCpu,
        Toggle::LoadAvgTask,
        Toggle::RunnableAvgTask,
        Toggle::UtilAvgTask,
        Toggle::UtilAvgRt,
        Toggle::UtilAvgDl,
        Toggle::UtilAvgIrq,
        Toggle::UtilAvgThermal,
        Toggle::UtilEstCpu,
        Toggle::UtilEstTask,
        Toggle::CpuNrRunning,
        Toggle::CpuFreq,
        Toggle::CpuIdle,
        Toggle::Softirq,
        Toggle::SchedSwitch,
        Toggle::LoadBalance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Toggle::LoadAvgCpu => "load_avg_cpu",
            Toggle::RunnableAvgCpu => "runnable_avg_cpu",
            Toggle::UtilAvgCpu => "util_avg_cpu",
            Toggle::LoadAvgTask => "load_avg_task",
            Toggle::RunnableAvgTask => "runnable_avg_task",
            Toggle::UtilAvgTask => "util_avg_task",
            Toggle::UtilAvgRt => "util_avg_rt",
            Toggle::UtilAvgDl => "util_avg_dl",
            Toggle::UtilAvgIrq => "util_avg_irq",
            Toggle::UtilAvgThermal => "util_avg_thermal",
            Toggle::UtilEstCpu => "util_est_cpu",
            Toggle::UtilEstTask => "util_est_task",
            Toggle::CpuNrRunning => "cpu_nr_running",
            Toggle::CpuFreq => "cpu_freq",
            Toggle::CpuIdle => "cpu_idle",
            Toggle::Softirq => "softirq",
            Toggle::SchedSwitch => "sched_switch",
            Toggle::LoadBalance => "load_balance",
        }
    }

    fn mask(self) -> u32 {
        1 << self as u32
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitfield! {
    /// Set of enabled telemetry categories, one bit per [`Toggle`].
    ///
    /// The named getters are what the collection engine reads; resolution
    /// only ever goes through [`Toggles::insert`] and [`Toggles::union`], so
    /// a bit that has been set is never cleared again.
    #[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Toggles(u32);
    impl Debug;
    pub load_avg_cpu, _: 0;
    pub runnable_avg_cpu, _: 1;
    pub util_avg_cpu, _: 2;
    pub load_avg_task, _: 3;
    pub runnable_avg_task, _: 4;
    pub util_avg_task, _: 5;
    pub util_avg_rt, _: 6;
    pub util_avg_dl, _: 7;
    pub util_avg_irq, _: 8;
    pub util_avg_thermal, _: 9;
    pub util_est_cpu, _: 10;
    pub util_est_task, _: 11;
    pub cpu_nr_running, _: 12;
    pub cpu_freq, _: 13;
    pub cpu_idle, _: 14;
    pub softirq, _: 15;
    pub sched_switch, _: 16;
    pub load_balance, _: 17;
}

impl Toggles {
    pub const fn empty() -> Self {
        Toggles(0)
    }

    pub fn insert(&mut self, toggle: Toggle) {
        self.0 |= toggle.mask();
    }

    pub fn union(&mut self, other: Toggles) {
        self.0 |= other.0;
    }

    pub fn contains(&self, toggle: Toggle) -> bool {
        self.0 & toggle.mask() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Enabled categories in bit order.
    pub fn iter(&self) -> impl Iterator<Item = Toggle> + '_ {
        Toggle::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl FromIterator<Toggle> for Toggles {
    fn from_iter<I: IntoIterator<Item = Toggle>>(iter: I) -> Self {
        let mut toggles = Toggles::empty();
        for toggle in iter {
            toggles.insert(toggle);
        }
        toggles
    }
}

impl Serialize for Toggles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(Toggle::name))
    }
}
