pub use report::{
    read_report, write_table, EffectOrder, ReportIdentity, SensitivityRecord, SENSITIVITY_HEADER,
};

mod report;
