mod cycles;
mod inheritance;
mod usage;

pub(crate) use cycles::CycleReport;
pub(crate) use inheritance::InheritanceGraph;
pub(crate) use usage::UsageAnalyzer;
