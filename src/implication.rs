//! Expansion of event flags into the primitive categories they enable.
//!
//! Umbrella flags map straight to primitives; no entry refers to another
//! umbrella flag, so a single lookup is the whole expansion.

use crate::schema::OptionId;
use crate::toggles::{Toggle, Toggles};

pub static IMPLICATIONS: &[(OptionId, &[Toggle])] = &[
    (OptionId::LoadAvg, &[Toggle::LoadAvgCpu, Toggle::LoadAvgTask]),
    // TODO: confirm with the collection engine owners whether this should be
    // RunnableAvgCpu; the cpu side currently follows load_avg.
    (
        OptionId::RunnableAvg,
        &[Toggle::LoadAvgCpu, Toggle::RunnableAvgTask],
    ),
    (
        OptionId::UtilAvg,
        &[
            Toggle::UtilAvgCpu,
            Toggle::UtilAvgTask,
            Toggle::UtilAvgRt,
            Toggle::UtilAvgDl,
            Toggle::UtilAvgIrq,
            Toggle::UtilAvgThermal,
        ],
    ),
    (OptionId::UtilEst, &[Toggle::UtilEstCpu, Toggle::UtilEstTask]),
    (OptionId::LoadAvgCpu, &[Toggle::LoadAvgCpu]),
    (OptionId::RunnableAvgCpu, &[Toggle::RunnableAvgCpu]),
    (OptionId::UtilAvgCpu, &[Toggle::UtilAvgCpu]),
    (OptionId::LoadAvgTask, &[Toggle::LoadAvgTask]),
    (OptionId::RunnableAvgTask, &[Toggle::RunnableAvgTask]),
    (OptionId::UtilAvgTask, &[Toggle::UtilAvgTask]),
    (OptionId::UtilAvgRt, &[Toggle::UtilAvgRt]),
    (OptionId::UtilAvgDl, &[Toggle::UtilAvgDl]),
    (OptionId::UtilAvgIrq, &[Toggle::UtilAvgIrq]),
    (OptionId::UtilAvgThermal, &[Toggle::UtilAvgThermal]),
    (OptionId::UtilEstCpu, &[Toggle::UtilEstCpu]),
    (OptionId::UtilEstTask, &[Toggle::UtilEstTask]),
    (OptionId::CpuNrRunning, &[Toggle::CpuNrRunning]),
    (OptionId::CpuFreq, &[Toggle::CpuFreq]),
    (OptionId::CpuIdle, &[Toggle::CpuIdle]),
    (OptionId::Softirq, &[Toggle::Softirq]),
    (OptionId::SchedSwitch, &[Toggle::SchedSwitch]),
    (OptionId::LoadBalance, &[Toggle::LoadBalance]),
];

/// Primitive categories turned on by `id`. Flags that are not events
/// (modes, outputs, filters) imply nothing.
pub fn implied(id: OptionId) -> &'static [Toggle] {
    IMPLICATIONS
        .iter()
        .find(|(flag, _)| *flag == id)
        .map(|(_, toggles)| *toggles)
        .unwrap_or(&[])
}

pub fn expand(id: OptionId) -> Toggles {
    implied(id).iter().copied().collect()
}

/// Whether `id` is an event flag handled purely by expansion.
pub fn is_event(id: OptionId) -> bool {
    !implied(id).is_empty()
}
