//! `netmon`: reports overlay interface statistics.

use crate::schema::{FieldRule, JobConfigSchema};
use crate::validate::Validator;

use super::shared;

pub(crate) const JOB: &str = "netmon";

pub(crate) fn schema() -> JobConfigSchema {
    JobConfigSchema::new(JOB, "config/netmon.json")
        .field(
            FieldRule::property("poll_interval")
                .or_default(30)
                .validate(Validator::PositiveIntegerSeconds),
        )
        .field(FieldRule::property("interface_name").or_default("silk-vtep"))
        .field(shared::metron_address())
        .field(shared::log_level())
        .field(shared::log_prefix())
}
